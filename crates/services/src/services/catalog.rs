//! Genres and franchises: small lookup entities content links to.

use serde::Deserialize;
use streamify_core::error::CoreResult;
use streamify_core::types::new_id;
use streamify_db::models::franchise::{CreateFranchise, Franchise, FranchiseFilter};
use streamify_db::models::genre::{CreateGenre, Genre, GenreFilter};
use streamify_db::repositories::{FranchiseRepo, GenreRepo};
use streamify_db::UnitOfWork;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewGenre {
    #[validate(length(min = 1, max = 50))]
    pub genre_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewFranchise {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub struct GenreService;

impl GenreService {
    pub async fn list(uow: &mut UnitOfWork) -> CoreResult<Vec<Genre>> {
        GenreRepo::get_many(&GenreFilter::All, uow).await
    }

    /// Genre names are unique; a duplicate fails with `Integrity`.
    pub async fn create(input: &NewGenre, uow: &mut UnitOfWork) -> CoreResult<Genre> {
        input.validate()?;
        let new = CreateGenre {
            id: new_id(),
            genre_name: input.genre_name.trim().to_string(),
        };
        GenreRepo::create(new, uow, true).await?.into_committed()
    }
}

pub struct FranchiseService;

impl FranchiseService {
    pub async fn list(uow: &mut UnitOfWork) -> CoreResult<Vec<Franchise>> {
        FranchiseRepo::get_many(&FranchiseFilter::All, uow).await
    }

    pub async fn create(input: &NewFranchise, uow: &mut UnitOfWork) -> CoreResult<Franchise> {
        input.validate()?;
        let new = CreateFranchise {
            id: new_id(),
            name: input.name.clone(),
            description: input.description.clone(),
        };
        FranchiseRepo::create(new, uow, true).await?.into_committed()
    }
}
