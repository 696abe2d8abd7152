//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use chrono::Utc;

use crate::config::WinestaConfig;
use crate::domain::ChangeBus;
use crate::domain::seed::{demo_events, demo_stories, demo_wines};
use crate::service::{CellarService, EventService, SommelierService, StoryService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Wine cellar service.
    pub cellar: Arc<CellarService>,
    /// Community event service.
    pub events: Arc<EventService>,
    /// Read-only story catalog.
    pub stories: Arc<StoryService>,
    /// Sommelier chat service.
    pub sommelier: Arc<SommelierService>,
    /// Change bus for WebSocket subscriptions.
    pub change_bus: ChangeBus,
}

impl AppState {
    /// Wires up every service on a shared change bus, seeding the demo
    /// collections when `config.seed_demo_data` is set.
    #[must_use]
    pub fn from_config(config: &WinestaConfig) -> Self {
        let change_bus = ChangeBus::new(config.change_bus_capacity);
        let now = Utc::now();

        let (wines, events, stories) = if config.seed_demo_data {
            (demo_wines(now), demo_events(now), demo_stories())
        } else {
            (Vec::new(), Vec::new(), Vec::new())
        };
        tracing::info!(
            wines = wines.len(),
            events = events.len(),
            stories = stories.len(),
            "collections initialised"
        );

        Self {
            cellar: Arc::new(CellarService::with_wines(wines, change_bus.clone())),
            events: Arc::new(EventService::with_events(events, change_bus.clone())),
            stories: Arc::new(StoryService::new(stories)),
            sommelier: Arc::new(SommelierService::new(
                change_bus.clone(),
                config.reply_delay,
            )),
            change_bus,
        }
    }
}
