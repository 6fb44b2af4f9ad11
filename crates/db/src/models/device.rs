//! Device: a client an account has signed in from.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{DbId, Timestamp};

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub account_id: DbId,
    pub device_brand: String,
    pub device_model: String,
    pub ip_address: String,
    pub last_used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateDevice {
    pub id: DbId,
    pub account_id: DbId,
    pub device_brand: String,
    pub device_model: String,
    pub ip_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDevice {
    pub device_brand: Option<String>,
    pub device_model: Option<String>,
    pub ip_address: Option<String>,
    pub last_used_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub enum DeviceFilter {
    ById(DbId),
    ByAccount(DbId),
    ByAccountAndId(DbId, DbId),
}

impl Filter for DeviceFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            DeviceFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            DeviceFilter::ByAccount(account_id) => {
                vec![Condition::Eq("account_id", (*account_id).into())]
            }
            DeviceFilter::ByAccountAndId(account_id, id) => vec![
                Condition::Eq("account_id", (*account_id).into()),
                Condition::Eq("id", (*id).into()),
            ],
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("created_at")
    }
}

impl Insertable for CreateDevice {
    const TABLE: &'static str = "devices";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("account_id", self.account_id.into()),
            ("device_brand", self.device_brand.clone().into()),
            ("device_model", self.device_model.clone().into()),
            ("ip_address", self.ip_address.clone().into()),
        ]
    }
}

impl Patch<Device> for UpdateDevice {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "device_brand", &self.device_brand);
        assign(&mut out, "device_model", &self.device_model);
        assign(&mut out, "ip_address", &self.ip_address);
        assign(&mut out, "last_used_at", &self.last_used_at);
        out
    }

    fn apply(&self, device: &mut Device) {
        if let Some(v) = &self.device_brand {
            device.device_brand = v.clone();
        }
        if let Some(v) = &self.device_model {
            device.device_model = v.clone();
        }
        if let Some(v) = &self.ip_address {
            device.ip_address = v.clone();
        }
        if let Some(v) = self.last_used_at {
            device.last_used_at = Some(v);
        }
    }
}

impl Entity for Device {
    const NAME: &'static str = "Device";
    const TABLE: &'static str = "devices";
    const COLUMNS: &'static str =
        "id, account_id, device_brand, device_model, ip_address, last_used_at, created_at";

    type New = CreateDevice;
    type Filter = DeviceFilter;
    type Patch = UpdateDevice;

    fn key(&self) -> DeviceFilter {
        DeviceFilter::ById(self.id)
    }

    fn new_key(new: &CreateDevice) -> DeviceFilter {
        DeviceFilter::ById(new.id)
    }
}
