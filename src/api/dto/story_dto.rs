//! Story DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Story;

/// Query parameters for `GET /stories`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoryFilterParams {
    /// Case-insensitive search over title, description and author.
    #[serde(default)]
    pub q: Option<String>,
}

/// A story with its card labels.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoryView {
    /// The stored story.
    #[serde(flatten)]
    pub story: Story,
    /// Upper-case publication date, e.g. `"OCT 12, 2024"`.
    pub date_label: String,
    /// e.g. `"5 MIN READ"`.
    pub read_time_label: String,
}

impl From<Story> for StoryView {
    fn from(story: Story) -> Self {
        Self {
            date_label: story.date_label(),
            read_time_label: story.read_time_label(),
            story,
        }
    }
}

/// Response body for `GET /stories`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StoryListResponse {
    /// Matching stories, in catalog order.
    pub data: Vec<StoryView>,
}
