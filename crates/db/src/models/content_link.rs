//! Link tables between contents and their genres / franchises.
//!
//! Link rows are identified by their `(content_id, other_id)` pair and have
//! no updatable columns.

use serde::Serialize;
use sqlx::FromRow;
use streamify_core::types::DbId;

use crate::query::{Condition, Filter, NoPatch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ContentGenre {
    pub content_id: DbId,
    pub genre_id: DbId,
}

#[derive(Debug, Clone)]
pub enum ContentGenreFilter {
    ByContent(DbId),
    ByGenre(DbId),
    ByPair(DbId, DbId),
}

impl Filter for ContentGenreFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            ContentGenreFilter::ByContent(content_id) => {
                vec![Condition::Eq("content_id", (*content_id).into())]
            }
            ContentGenreFilter::ByGenre(genre_id) => {
                vec![Condition::Eq("genre_id", (*genre_id).into())]
            }
            ContentGenreFilter::ByPair(content_id, genre_id) => vec![
                Condition::Eq("content_id", (*content_id).into()),
                Condition::Eq("genre_id", (*genre_id).into()),
            ],
        }
    }
}

impl Insertable for ContentGenre {
    const TABLE: &'static str = "content_genres";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("content_id", self.content_id.into()),
            ("genre_id", self.genre_id.into()),
        ]
    }
}

impl Entity for ContentGenre {
    const NAME: &'static str = "ContentGenre";
    const TABLE: &'static str = "content_genres";
    const COLUMNS: &'static str = "content_id, genre_id";

    type New = ContentGenre;
    type Filter = ContentGenreFilter;
    type Patch = NoPatch;

    fn key(&self) -> ContentGenreFilter {
        ContentGenreFilter::ByPair(self.content_id, self.genre_id)
    }

    fn new_key(new: &ContentGenre) -> ContentGenreFilter {
        new.key()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ContentFranchise {
    pub content_id: DbId,
    pub franchise_id: DbId,
}

#[derive(Debug, Clone)]
pub enum ContentFranchiseFilter {
    ByContent(DbId),
    ByFranchise(DbId),
    ByPair(DbId, DbId),
}

impl Filter for ContentFranchiseFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            ContentFranchiseFilter::ByContent(content_id) => {
                vec![Condition::Eq("content_id", (*content_id).into())]
            }
            ContentFranchiseFilter::ByFranchise(franchise_id) => {
                vec![Condition::Eq("franchise_id", (*franchise_id).into())]
            }
            ContentFranchiseFilter::ByPair(content_id, franchise_id) => vec![
                Condition::Eq("content_id", (*content_id).into()),
                Condition::Eq("franchise_id", (*franchise_id).into()),
            ],
        }
    }
}

impl Insertable for ContentFranchise {
    const TABLE: &'static str = "content_franchises";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("content_id", self.content_id.into()),
            ("franchise_id", self.franchise_id.into()),
        ]
    }
}

impl Entity for ContentFranchise {
    const NAME: &'static str = "ContentFranchise";
    const TABLE: &'static str = "content_franchises";
    const COLUMNS: &'static str = "content_id, franchise_id";

    type New = ContentFranchise;
    type Filter = ContentFranchiseFilter;
    type Patch = NoPatch;

    fn key(&self) -> ContentFranchiseFilter {
        ContentFranchiseFilter::ByPair(self.content_id, self.franchise_id)
    }

    fn new_key(new: &ContentFranchise) -> ContentFranchiseFilter {
        new.key()
    }
}
