//! Watch history: how far an account got through a content.
//!
//! One row per `(account_id, content_id)` pair, enforced by
//! `uq_watch_histories_account_content`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{DbId, Timestamp};

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchHistory {
    pub id: DbId,
    pub account_id: DbId,
    pub content_id: DbId,
    pub watched_at: Timestamp,
    pub last_position: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CreateWatchHistory {
    pub id: DbId,
    pub account_id: DbId,
    pub content_id: DbId,
    pub last_position: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateWatchHistory {
    pub last_position: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum WatchHistoryFilter {
    ById(DbId),
    ByAccount(DbId),
    ByAccountAndId(DbId, DbId),
    ByAccountAndContent(DbId, DbId),
}

impl Filter for WatchHistoryFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            WatchHistoryFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            WatchHistoryFilter::ByAccount(account_id) => {
                vec![Condition::Eq("account_id", (*account_id).into())]
            }
            WatchHistoryFilter::ByAccountAndId(account_id, id) => vec![
                Condition::Eq("account_id", (*account_id).into()),
                Condition::Eq("id", (*id).into()),
            ],
            WatchHistoryFilter::ByAccountAndContent(account_id, content_id) => vec![
                Condition::Eq("account_id", (*account_id).into()),
                Condition::Eq("content_id", (*content_id).into()),
            ],
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("watched_at DESC")
    }
}

impl Insertable for CreateWatchHistory {
    const TABLE: &'static str = "watch_histories";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("account_id", self.account_id.into()),
            ("content_id", self.content_id.into()),
            ("last_position", self.last_position.into()),
        ]
    }
}

impl Patch<WatchHistory> for UpdateWatchHistory {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "last_position", &self.last_position);
        if !out.is_empty() {
            out.push(("watched_at", chrono::Utc::now().into()));
        }
        out
    }

    fn apply(&self, watch: &mut WatchHistory) {
        if let Some(v) = self.last_position {
            watch.last_position = Some(v);
        }
    }
}

impl Entity for WatchHistory {
    const NAME: &'static str = "WatchHistory";
    const TABLE: &'static str = "watch_histories";
    const COLUMNS: &'static str = "id, account_id, content_id, watched_at, last_position";

    type New = CreateWatchHistory;
    type Filter = WatchHistoryFilter;
    type Patch = UpdateWatchHistory;

    fn key(&self) -> WatchHistoryFilter {
        WatchHistoryFilter::ById(self.id)
    }

    fn new_key(new: &CreateWatchHistory) -> WatchHistoryFilter {
        WatchHistoryFilter::ById(new.id)
    }
}
