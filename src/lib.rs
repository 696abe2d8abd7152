//! # winesta-api
//!
//! REST API and WebSocket service for the Winesta wine community app.
//!
//! This crate serves the four Winesta surfaces over HTTP: the personal
//! wine cellar, community events, editorial stories and a simulated
//! sommelier chat. Every collection lives in memory for the lifetime of
//! the process; changes are pushed to WebSocket subscribers.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── CellarService / EventService / StoryService / SommelierService (service/)
//!     ├── ChangeBus (domain/)
//!     │
//!     ├── FormBinding + RecordFilter (domain/)
//!     └── Registry<T> per collection (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
