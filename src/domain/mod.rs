//! Domain layer: records, the collection store, filtering, form binding
//! and the change event system.
//!
//! This module contains the server-side domain model: record identity,
//! the wine, event, story and chat record types, the ordered
//! [`Registry`] that stores each collection, the pure category/search
//! filter, the create/edit [`FormBinding`], and the [`ChangeBus`] that
//! broadcasts mutations.

pub mod change_bus;
pub mod change_event;
pub mod chat;
pub mod community_event;
pub mod filter;
pub mod form;
pub mod record;
pub mod record_id;
pub mod registry;
pub mod seed;
pub mod story;
pub mod wine;

pub use change_bus::ChangeBus;
pub use change_event::{ChangeEvent, Topic};
pub use chat::{ChatMessage, Sender};
pub use community_event::{CommunityEvent, EventDraft, EventPrice, MonthGroup, group_by_month};
pub use filter::{CategorySelector, RecordFilter, SearchQuery};
pub use form::{Draft, FormBinding, FormEffect, FormMode};
pub use record::Record;
pub use record_id::RecordId;
pub use registry::Registry;
pub use story::Story;
pub use wine::{CategoryCounts, Rating, Wine, WineCategory, WineDraft};
