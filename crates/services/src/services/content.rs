use streamify_core::error::CoreResult;
use streamify_core::types::DbId;
use streamify_db::models::content::{Content, ContentFilter, UpdateContent};
use streamify_db::repositories::ContentRepo;
use streamify_db::UnitOfWork;

use crate::aggregate::ContentAggregate;

/// Catalog reads and edits. New content goes through
/// [`ContentOrchestrator`](crate::ContentOrchestrator).
pub struct ContentService;

impl ContentService {
    pub async fn get(content_id: DbId, uow: &mut UnitOfWork) -> CoreResult<ContentAggregate> {
        ContentAggregate::load(content_id, uow).await
    }

    pub async fn list(uow: &mut UnitOfWork) -> CoreResult<Vec<Content>> {
        ContentRepo::get_many(&ContentFilter::All, uow).await
    }

    pub async fn update(
        content_id: DbId,
        patch: &UpdateContent,
        uow: &mut UnitOfWork,
    ) -> CoreResult<Content> {
        ContentRepo::update_one(&ContentFilter::ById(content_id), patch, uow, true).await
    }

    /// Link rows go with the content; genres and franchises stay.
    pub async fn delete(content_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Content> {
        ContentRepo::delete_one(&ContentFilter::ById(content_id), uow, true).await
    }
}
