//! Story service: read-only access to published stories.

use std::sync::Arc;

use crate::domain::{RecordId, Registry, SearchQuery, Story};
use crate::error::WinestaError;

/// Read-only story catalog.
#[derive(Debug, Clone)]
pub struct StoryService {
    stories: Arc<Registry<Story>>,
}

impl StoryService {
    /// Creates a service over a fixed set of stories.
    #[must_use]
    pub fn new(stories: Vec<Story>) -> Self {
        Self {
            stories: Arc::new(Registry::with_records(stories)),
        }
    }

    /// Stories in catalog order, optionally narrowed by a search query
    /// over title, description and author.
    pub async fn list(&self, query: Option<&str>) -> Vec<Story> {
        let mut stories = self.stories.snapshot().await;
        if let Some(query) = query.map(SearchQuery::new) {
            stories.retain(|story| query.matches(story));
        }
        stories
    }

    /// Returns the story with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if it does not exist.
    pub async fn get(&self, id: RecordId) -> Result<Story, WinestaError> {
        self.stories.get(id).await
    }
}
