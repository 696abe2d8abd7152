//! Service layer: business logic orchestration.
//!
//! Services coordinate the per-collection [`crate::domain::Registry`]
//! stores, run the form binding, and emit change events through the
//! [`crate::domain::ChangeBus`].

pub mod catalog_service;
pub mod sommelier_service;
pub mod story_service;

pub use catalog_service::{CatalogService, CellarService, EventService};
pub use sommelier_service::SommelierService;
pub use story_service::StoryService;
