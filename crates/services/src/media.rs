//! Public URLs for content files served by the media service.

use serde::Serialize;
use streamify_db::models::content::Content;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    base: String,
}

impl MediaUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn thumbnail(&self, file: &str) -> String {
        format!("{}/thumbnails/{file}", self.base)
    }

    /// `source` tells the streaming endpoint which file kind it serves
    /// (`movie` or `trailer`).
    pub fn stream(&self, file: &str, source: &str) -> String {
        format!("{}/streaming/{file}?source={source}", self.base)
    }

    pub fn links(&self, content: &Content) -> MediaLinks {
        MediaLinks {
            thumbnail_url: self.thumbnail(&content.thumbnail_file),
            content_url: self.stream(&content.content_file, "movie"),
            trailer_url: content
                .trailer_file
                .as_deref()
                .map(|file| self.stream(file, "trailer")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaLinks {
    pub thumbnail_url: String,
    pub content_url: String,
    pub trailer_url: Option<String>,
}
