//! Catalog service: create/edit/delete/list for form-driven collections.
//!
//! The cellar and the event listing share the same shape, so one generic
//! [`CatalogService`] serves both; [`CellarService`] and [`EventService`]
//! are the concrete instantiations.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::community_event::EMPTY_EVENTS_MESSAGE;
use crate::domain::filter::{Categorized, Searchable};
use crate::domain::wine::empty_cellar_message;
use crate::domain::{
    CategoryCounts, CategorySelector, ChangeBus, ChangeEvent, CommunityEvent, Draft, EventDraft,
    FormBinding, FormEffect, Record, RecordFilter, RecordId, Registry, Topic, Wine, WineCategory,
    WineDraft,
};
use crate::error::WinestaError;

/// Orchestration layer for one form-driven collection.
///
/// Every mutation follows the same pattern: bind the form → submit →
/// apply the effect to the [`Registry`] → emit a [`ChangeEvent`] → return
/// the stored record.
#[derive(Debug)]
pub struct CatalogService<D: Draft> {
    registry: Arc<Registry<D::Record>>,
    change_bus: ChangeBus,
    topic: Topic,
}

/// Personal wine cellar.
pub type CellarService = CatalogService<WineDraft>;

/// Community event listing.
pub type EventService = CatalogService<EventDraft>;

impl<D: Draft> CatalogService<D> {
    /// Creates a new service over `registry`, publishing under `topic`.
    #[must_use]
    pub fn new(registry: Arc<Registry<D::Record>>, change_bus: ChangeBus, topic: Topic) -> Self {
        Self {
            registry,
            change_bus,
            topic,
        }
    }

    /// Returns a reference to the inner [`Registry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry<D::Record>> {
        &self.registry
    }

    /// Returns the record with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if it does not exist.
    pub async fn get(&self, id: RecordId) -> Result<D::Record, WinestaError> {
        self.registry.get(id).await
    }

    /// Opens a create-mode form with default values.
    #[must_use]
    pub fn create_form(&self) -> FormBinding<D> {
        FormBinding::create(Utc::now())
    }

    /// Opens an edit-mode form bound to the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if it does not exist.
    pub async fn edit_form(&self, id: RecordId) -> Result<FormBinding<D>, WinestaError> {
        let record = self.registry.get(id).await?;
        Ok(FormBinding::edit(&record))
    }

    /// Submits a bound form and applies the resulting effect.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid draft (the store is left
    /// unchanged), or [`WinestaError::RecordNotFound`] if an edit targets a
    /// record that no longer exists.
    pub async fn submit(&self, form: FormBinding<D>) -> Result<D::Record, WinestaError> {
        let now = Utc::now();
        let effect = form.submit(now)?;
        let created = matches!(effect, FormEffect::Insert(_));
        let record = effect.apply(&self.registry).await?;
        let record_id = record.id();

        let event = if created {
            tracing::info!(kind = <D::Record as Record>::KIND, %record_id, "record created");
            ChangeEvent::RecordCreated {
                topic: self.topic,
                record_id,
                timestamp: now,
            }
        } else {
            tracing::info!(kind = <D::Record as Record>::KIND, %record_id, "record updated");
            ChangeEvent::RecordUpdated {
                topic: self.topic,
                record_id,
                timestamp: now,
            }
        };
        let _ = self.change_bus.publish(event);

        Ok(record)
    }

    /// Creates a record from submitted field values.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid draft.
    pub async fn create(&self, draft: D) -> Result<D::Record, WinestaError> {
        self.submit(self.create_form().with_draft(draft)).await
    }

    /// Replaces the editable fields of the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if it does not exist, or a
    /// validation error for an invalid draft.
    pub async fn update(&self, id: RecordId, draft: D) -> Result<D::Record, WinestaError> {
        let form = self.edit_form(id).await?.with_draft(draft);
        self.submit(form).await
    }

    /// Deletes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if it does not exist.
    pub async fn delete(&self, id: RecordId) -> Result<(), WinestaError> {
        let _record = self.registry.remove(id).await?;

        let _ = self.change_bus.publish(ChangeEvent::RecordRemoved {
            topic: self.topic,
            record_id: id,
            timestamp: Utc::now(),
        });

        tracing::info!(kind = <D::Record as Record>::KIND, record_id = %id, "record removed");
        Ok(())
    }
}

impl<D> CatalogService<D>
where
    D: Draft,
    D::Record: Searchable + Categorized,
{
    /// Returns the ordered records passing `filter`.
    pub async fn list(
        &self,
        filter: &RecordFilter<<D::Record as Categorized>::Category>,
    ) -> Vec<D::Record> {
        self.registry.list(filter).await
    }
}

impl CatalogService<WineDraft> {
    /// Builds a cellar service that owns a fresh registry of `wines`.
    #[must_use]
    pub fn with_wines(wines: Vec<Wine>, change_bus: ChangeBus) -> Self {
        Self::new(Arc::new(Registry::with_records(wines)), change_bus, Topic::Wines)
    }

    /// Per-category counts over the whole cellar.
    pub async fn category_counts(&self) -> CategoryCounts {
        CategoryCounts::tally(&self.registry.snapshot().await)
    }

    /// Empty-state text for a cellar view filtered by `selector`.
    #[must_use]
    pub fn empty_message(selector: &CategorySelector<WineCategory>) -> String {
        empty_cellar_message(selector)
    }
}

impl CatalogService<EventDraft> {
    /// Builds an event service that owns a fresh registry of `events`.
    #[must_use]
    pub fn with_events(events: Vec<CommunityEvent>, change_bus: ChangeBus) -> Self {
        Self::new(
            Arc::new(Registry::with_records(events)),
            change_bus,
            Topic::Events,
        )
    }

    /// Events passing `filter`, optionally restricted to featured ones.
    pub async fn list_events(
        &self,
        filter: &RecordFilter<String>,
        featured_only: bool,
    ) -> Vec<CommunityEvent> {
        let mut events = self.registry.list(filter).await;
        if featured_only {
            events.retain(|e| e.is_featured);
        }
        events
    }

    /// Empty-state text for an event listing.
    #[must_use]
    pub const fn empty_message() -> &'static str {
        EMPTY_EVENTS_MESSAGE
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::seed::{demo_events, demo_wines};
    use crate::domain::EventPrice;
    use chrono::{NaiveDate, NaiveTime};

    fn cellar() -> CellarService {
        CellarService::with_wines(demo_wines(Utc::now()), ChangeBus::new(64))
    }

    fn wine_draft(name: &str) -> WineDraft {
        WineDraft {
            name: name.to_string(),
            year: 2016,
            region: "Ribera del Duero, Spain".to_string(),
            rating: 4,
            tasting_notes: "Plum, tobacco".to_string(),
            pairing_details: "Roast lamb".to_string(),
            category: WineCategory::Tried,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_appends_record_and_emits_event() {
        let service = cellar();
        let mut rx = service.change_bus.subscribe();
        let before = service.registry().len().await;

        let Ok(wine) = service.create(wine_draft("Vega Sicilia Único")).await else {
            panic!("create failed");
        };

        let all = service.list(&RecordFilter::all()).await;
        assert_eq!(all.len(), before + 1);
        assert_eq!(all.last().map(|w| w.id), Some(wine.id));
        assert_eq!(wine.name, "Vega Sicilia Único");

        let Ok(ChangeEvent::RecordCreated { topic, record_id, .. }) = rx.recv().await else {
            panic!("expected created event");
        };
        assert_eq!(topic, Topic::Wines);
        assert_eq!(record_id, wine.id);
    }

    #[tokio::test]
    async fn update_keeps_size_and_refreshes_timestamp() {
        let service = cellar();
        let Some(target) = service.registry().snapshot().await.into_iter().next() else {
            panic!("seed cellar is empty");
        };
        let before = service.registry().len().await;

        let Ok(updated) = service.update(target.id, wine_draft("Renamed")).await else {
            panic!("update failed");
        };

        assert_eq!(service.registry().len().await, before);
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.category, WineCategory::Tried);
        assert_eq!(updated.created_at, target.created_at);
        assert!(updated.updated_at >= target.updated_at);
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_untouched() {
        let service = cellar();
        let Some(target) = service.registry().snapshot().await.into_iter().next() else {
            panic!("seed cellar is empty");
        };
        let mut bad = wine_draft("Renamed");
        bad.year = 1850;

        assert!(service.update(target.id, bad).await.is_err());
        let Ok(stored) = service.get(target.id).await else {
            panic!("record vanished");
        };
        assert_eq!(stored, target);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let service = cellar();
        let result = service.update(RecordId::new(), wine_draft("Ghost")).await;
        assert!(matches!(result, Err(WinestaError::RecordNotFound { .. })));
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let service = cellar();
        let Some(target) = service.registry().snapshot().await.into_iter().next() else {
            panic!("seed cellar is empty");
        };
        let before = service.registry().len().await;

        assert!(service.delete(target.id).await.is_ok());
        assert_eq!(service.registry().len().await, before - 1);
        assert!(service.get(target.id).await.is_err());
        assert!(service.delete(target.id).await.is_err());
    }

    #[tokio::test]
    async fn counts_follow_mutations() {
        let service = cellar();
        let _ = service.create(wine_draft("Pingus")).await;
        let counts = service.category_counts().await;
        assert_eq!(counts.all, 4);
        assert_eq!(counts.tried, 2);
        assert_eq!(counts.favorite, 1);
    }

    #[tokio::test]
    async fn event_search_and_featured_filter() {
        let service = EventService::with_events(demo_events(Utc::now()), ChangeBus::new(64));

        let festival = service
            .list_events(&RecordFilter::all().with_query("FESTIVAL"), false)
            .await;
        assert_eq!(festival.len(), 1);

        let by_location = service
            .list_events(&RecordFilter::all().with_query("chicago"), false)
            .await;
        assert_eq!(by_location.len(), 3);

        let featured = service.list_events(&RecordFilter::all(), true).await;
        assert!(featured.iter().all(|e| e.is_featured));
        assert_eq!(featured.len(), 1);
    }

    fn event_draft(category: Option<&str>) -> EventDraft {
        EventDraft {
            title: "Riesling masterclass".to_string(),
            description: "Six Mosel wines".to_string(),
            location: "Wine bar".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap_or_default(),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            price: EventPrice::Amount(45.0),
            image_url: None,
            is_featured: false,
            category: category.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn event_create_with_category_is_filterable() {
        let service = EventService::with_events(Vec::new(), ChangeBus::new(8));
        assert!(service.create(event_draft(Some("tasting"))).await.is_ok());

        let tasting = RecordFilter::all().with_category(CategorySelector::Only("tasting".to_string()));
        assert_eq!(service.list_events(&tasting, false).await.len(), 1);

        let other = RecordFilter::all().with_category(CategorySelector::Only("gala".to_string()));
        assert!(service.list_events(&other, false).await.is_empty());
    }

    #[tokio::test]
    async fn event_edit_then_delete() {
        let service = EventService::with_events(demo_events(Utc::now()), ChangeBus::new(64));
        let Ok(created) = service.create(event_draft(Some("tasting"))).await else {
            panic!("create failed");
        };
        let mut rx = service.change_bus.subscribe();
        let before = service.registry().len().await;

        let mut edit = event_draft(Some("   "));
        edit.title = "Riesling & Sekt".to_string();
        edit.price = EventPrice::Free;
        let Ok(updated) = service.update(created.id, edit).await else {
            panic!("update failed");
        };

        assert_eq!(service.registry().len().await, before);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Riesling & Sekt");
        assert_eq!(updated.category, None);
        assert!(updated.price.is_free());
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let Ok(ChangeEvent::RecordUpdated { topic, record_id, .. }) = rx.recv().await else {
            panic!("expected updated event");
        };
        assert_eq!(topic, Topic::Events);
        assert_eq!(record_id, created.id);

        assert!(service.delete(created.id).await.is_ok());
        assert_eq!(service.registry().len().await, before - 1);
        let Ok(ChangeEvent::RecordRemoved { topic, .. }) = rx.recv().await else {
            panic!("expected removed event");
        };
        assert_eq!(topic, Topic::Events);
    }
}
