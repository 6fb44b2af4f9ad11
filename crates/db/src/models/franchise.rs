//! Franchise: a series or universe grouping several contents.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{DbId, Timestamp};

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Franchise {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateFranchise {
    pub id: DbId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateFranchise {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub enum FranchiseFilter {
    All,
    ById(DbId),
    AnyId(Vec<DbId>),
}

impl Filter for FranchiseFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            FranchiseFilter::All => vec![],
            FranchiseFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            FranchiseFilter::AnyId(ids) => vec![Condition::AnyOf("id", ids.clone())],
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("name")
    }
}

impl Insertable for CreateFranchise {
    const TABLE: &'static str = "franchises";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("name", self.name.clone().into()),
            ("description", self.description.clone().into()),
        ]
    }
}

impl Patch<Franchise> for UpdateFranchise {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "name", &self.name);
        assign(&mut out, "description", &self.description);
        out
    }

    fn apply(&self, franchise: &mut Franchise) {
        if let Some(v) = &self.name {
            franchise.name = v.clone();
        }
        if let Some(v) = &self.description {
            franchise.description = v.clone();
        }
    }
}

impl Entity for Franchise {
    const NAME: &'static str = "Franchise";
    const TABLE: &'static str = "franchises";
    const COLUMNS: &'static str = "id, name, description, created_at";

    type New = CreateFranchise;
    type Filter = FranchiseFilter;
    type Patch = UpdateFranchise;

    fn key(&self) -> FranchiseFilter {
        FranchiseFilter::ById(self.id)
    }

    fn new_key(new: &CreateFranchise) -> FranchiseFilter {
        FranchiseFilter::ById(new.id)
    }
}
