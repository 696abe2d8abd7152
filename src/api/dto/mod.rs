//! Data Transfer Objects for REST request/response serialization.
//!
//! Domain records serialize directly; DTOs add the display labels and list
//! metadata (pagination, category counts, empty-state message) the browser
//! renders.

pub mod chat_dto;
pub mod common_dto;
pub mod event_dto;
pub mod story_dto;
pub mod wine_dto;

pub use chat_dto::*;
pub use common_dto::*;
pub use event_dto::*;
pub use story_dto::*;
pub use wine_dto::*;
