use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::DbId;

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub genre_name: String,
}

#[derive(Debug, Clone)]
pub struct CreateGenre {
    pub id: DbId,
    pub genre_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateGenre {
    pub genre_name: Option<String>,
}

#[derive(Debug, Clone)]
pub enum GenreFilter {
    All,
    ById(DbId),
    ByName(String),
    AnyId(Vec<DbId>),
}

impl Filter for GenreFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            GenreFilter::All => vec![],
            GenreFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            GenreFilter::ByName(name) => vec![Condition::Eq("genre_name", name.as_str().into())],
            GenreFilter::AnyId(ids) => vec![Condition::AnyOf("id", ids.clone())],
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("genre_name")
    }
}

impl Insertable for CreateGenre {
    const TABLE: &'static str = "genres";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("genre_name", self.genre_name.clone().into()),
        ]
    }
}

impl Patch<Genre> for UpdateGenre {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "genre_name", &self.genre_name);
        out
    }

    fn apply(&self, genre: &mut Genre) {
        if let Some(v) = &self.genre_name {
            genre.genre_name = v.clone();
        }
    }
}

impl Entity for Genre {
    const NAME: &'static str = "Genre";
    const TABLE: &'static str = "genres";
    const COLUMNS: &'static str = "id, genre_name";

    type New = CreateGenre;
    type Filter = GenreFilter;
    type Patch = UpdateGenre;

    fn key(&self) -> GenreFilter {
        GenreFilter::ById(self.id)
    }

    fn new_key(new: &CreateGenre) -> GenreFilter {
        GenreFilter::ById(new.id)
    }
}
