//! Community event DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{FormMeta, PaginationMeta};
use crate::domain::{CommunityEvent, EventDraft, FormBinding, MonthGroup};

/// Query parameters for `GET /events`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilterParams {
    /// Case-insensitive search over title, description and location.
    #[serde(default)]
    pub q: Option<String>,
    /// Exact event category; omitted or `all` keeps every event.
    #[serde(default)]
    pub category: Option<String>,
    /// When `true`, only featured events are returned.
    #[serde(default)]
    pub featured: Option<bool>,
}

/// An event with its card labels.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventView {
    /// The stored event.
    #[serde(flatten)]
    pub event: CommunityEvent,
    /// `"$70"` or `"Free"`.
    pub price_label: String,
    /// Abbreviated weekday and day of month, e.g. `"Tue 1"`.
    pub day_label: String,
}

impl From<CommunityEvent> for EventView {
    fn from(event: CommunityEvent) -> Self {
        Self {
            price_label: event.price.to_string(),
            day_label: event.day_label(),
            event,
        }
    }
}

/// One month heading of the event listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventMonthView {
    /// e.g. `"October 2024"`.
    pub label: String,
    /// That month's events on the current page.
    pub events: Vec<EventView>,
}

impl From<MonthGroup> for EventMonthView {
    fn from(group: MonthGroup) -> Self {
        Self {
            label: group.label,
            events: group.events.into_iter().map(EventView::from).collect(),
        }
    }
}

/// Paginated event listing for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events on the requested page, in listing order.
    pub data: Vec<EventView>,
    /// The same page grouped by month, oldest month first.
    pub months: Vec<EventMonthView>,
    /// Pagination metadata over the filtered result.
    pub pagination: PaginationMeta,
    /// Empty-state text, present only when the filtered result is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Create/edit form state for an event.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventFormResponse {
    /// Mode, bound record and submit label.
    #[serde(flatten)]
    pub form: FormMeta,
    /// Field values to prefill.
    pub draft: EventDraft,
}

impl From<FormBinding<EventDraft>> for EventFormResponse {
    fn from(binding: FormBinding<EventDraft>) -> Self {
        let form = FormMeta::new(binding.mode(), binding.submit_label("Event"));
        Self {
            form,
            draft: binding.draft().clone(),
        }
    }
}
