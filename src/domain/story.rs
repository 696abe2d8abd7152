//! Stories: read-only editorial articles.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::filter::Searchable;
use super::{Record, RecordId};

/// A published story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Story {
    /// Identity.
    pub id: RecordId,
    /// Headline.
    pub title: String,
    /// Teaser paragraph.
    pub description: String,
    /// Publication date.
    pub date: NaiveDate,
    /// Estimated reading time in minutes.
    pub read_time_minutes: u32,
    /// Byline.
    pub author: String,
    /// Cover image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Story {
    /// Card date label, e.g. `"OCT 12, 2024"`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.date.format("%b %-d, %Y").to_string().to_uppercase()
    }

    /// Card read-time label, e.g. `"5 MIN READ"`.
    #[must_use]
    pub fn read_time_label(&self) -> String {
        format!("{} MIN READ", self.read_time_minutes)
    }
}

impl Record for Story {
    const KIND: &'static str = "story";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Searchable for Story {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.author.as_str(),
        ]
    }
}
