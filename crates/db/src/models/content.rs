//! Content: a catalog entry (film or episode) and its media files.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{Date, DbId, Timestamp};

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Content {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_date: Date,
    pub duration: String,
    pub thumbnail_file: String,
    pub content_file: String,
    pub trailer_file: Option<String>,
    pub episode_number: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct CreateContent {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_date: Date,
    pub duration: String,
    pub thumbnail_file: String,
    pub content_file: String,
    pub trailer_file: Option<String>,
    pub episode_number: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<Date>,
    pub duration: Option<String>,
    pub thumbnail_file: Option<String>,
    pub content_file: Option<String>,
    pub trailer_file: Option<String>,
    pub episode_number: Option<i32>,
}

#[derive(Debug, Clone)]
pub enum ContentFilter {
    All,
    ById(DbId),
    ByTitle(String),
}

impl Filter for ContentFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            ContentFilter::All => vec![],
            ContentFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            ContentFilter::ByTitle(title) => vec![Condition::Eq("title", title.as_str().into())],
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("release_date DESC, created_at DESC")
    }
}

impl Insertable for CreateContent {
    const TABLE: &'static str = "contents";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("title", self.title.clone().into()),
            ("description", self.description.clone().into()),
            ("release_date", self.release_date.into()),
            ("duration", self.duration.clone().into()),
            ("thumbnail_file", self.thumbnail_file.clone().into()),
            ("content_file", self.content_file.clone().into()),
            ("trailer_file", self.trailer_file.clone().into()),
            ("episode_number", self.episode_number.into()),
        ]
    }
}

impl Patch<Content> for UpdateContent {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "title", &self.title);
        assign(&mut out, "description", &self.description);
        assign(&mut out, "release_date", &self.release_date);
        assign(&mut out, "duration", &self.duration);
        assign(&mut out, "thumbnail_file", &self.thumbnail_file);
        assign(&mut out, "content_file", &self.content_file);
        assign(&mut out, "trailer_file", &self.trailer_file);
        assign(&mut out, "episode_number", &self.episode_number);
        if !out.is_empty() {
            out.push(("updated_at", chrono::Utc::now().into()));
        }
        out
    }

    fn apply(&self, content: &mut Content) {
        if let Some(v) = &self.title {
            content.title = v.clone();
        }
        if let Some(v) = &self.description {
            content.description = v.clone();
        }
        if let Some(v) = self.release_date {
            content.release_date = v;
        }
        if let Some(v) = &self.duration {
            content.duration = v.clone();
        }
        if let Some(v) = &self.thumbnail_file {
            content.thumbnail_file = v.clone();
        }
        if let Some(v) = &self.content_file {
            content.content_file = v.clone();
        }
        if let Some(v) = &self.trailer_file {
            content.trailer_file = Some(v.clone());
        }
        if let Some(v) = self.episode_number {
            content.episode_number = Some(v);
        }
    }
}

impl Entity for Content {
    const NAME: &'static str = "Content";
    const TABLE: &'static str = "contents";
    const COLUMNS: &'static str = "id, title, description, release_date, duration, thumbnail_file, \
                                   content_file, trailer_file, episode_number, created_at, updated_at";

    type New = CreateContent;
    type Filter = ContentFilter;
    type Patch = UpdateContent;

    fn key(&self) -> ContentFilter {
        ContentFilter::ById(self.id)
    }

    fn new_key(new: &CreateContent) -> ContentFilter {
        ContentFilter::ById(new.id)
    }
}
