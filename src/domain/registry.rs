//! Ordered in-memory collection store.
//!
//! [`Registry`] keeps records in insertion order behind a single
//! [`tokio::sync::RwLock`]. Lookups are by [`RecordId`]; edits replace the
//! record in place so its position in the collection never changes.

use tokio::sync::RwLock;

use super::filter::{Categorized, RecordFilter, Searchable, filter_records};
use super::{Record, RecordId};
use crate::error::WinestaError;

/// Central store for one collection of records.
///
/// # Concurrency
///
/// - Multiple readers may list or look up concurrently.
/// - Writes are serialized per collection.
/// - Nothing survives a process restart.
#[derive(Debug)]
pub struct Registry<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> Registry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Creates a registry pre-populated with `records`, keeping their order.
    ///
    /// Records whose identity repeats an earlier one are dropped.
    #[must_use]
    pub fn with_records(records: Vec<T>) -> Self {
        let mut unique: Vec<T> = Vec::with_capacity(records.len());
        for record in records {
            if unique.iter().any(|r| r.id() == record.id()) {
                tracing::warn!(kind = T::KIND, id = %record.id(), "dropping duplicate seed record");
                continue;
            }
            unique.push(record);
        }
        Self {
            records: RwLock::new(unique),
        }
    }

    /// Appends a record to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::DuplicateRecord`] if a record with the same
    /// ID already exists (should never happen with UUID v4).
    pub async fn insert(&self, record: T) -> Result<RecordId, WinestaError> {
        let id = record.id();
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == id) {
            return Err(WinestaError::DuplicateRecord { kind: T::KIND, id });
        }
        records.push(record);
        Ok(id)
    }

    /// Returns a copy of the record with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if no such record exists.
    pub async fn get(&self, id: RecordId) -> Result<T, WinestaError> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(WinestaError::RecordNotFound { kind: T::KIND, id })
    }

    /// Mutates the record with the given ID in place and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if no such record exists.
    pub async fn update<F>(&self, id: RecordId, mutate: F) -> Result<T, WinestaError>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(WinestaError::RecordNotFound { kind: T::KIND, id })?;
        mutate(record);
        Ok(record.clone())
    }

    /// Swaps the record at `id`'s position for `replacement`, which may carry
    /// a different identity. Returns the old record.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if no record has `id`, or
    /// [`WinestaError::DuplicateRecord`] if the replacement's identity is
    /// already used by another record.
    pub async fn replace(&self, id: RecordId, replacement: T) -> Result<T, WinestaError> {
        let mut records = self.records.write().await;
        let new_id = replacement.id();
        if new_id != id && records.iter().any(|r| r.id() == new_id) {
            return Err(WinestaError::DuplicateRecord {
                kind: T::KIND,
                id: new_id,
            });
        }
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(WinestaError::RecordNotFound { kind: T::KIND, id })?;
        Ok(std::mem::replace(slot, replacement))
    }

    /// Removes a record, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if no such record exists.
    pub async fn remove(&self, id: RecordId) -> Result<T, WinestaError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(WinestaError::RecordNotFound { kind: T::KIND, id })?;
        Ok(records.remove(position))
    }

    /// Returns a copy of the whole collection in order.
    pub async fn snapshot(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    /// Returns the number of records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if the collection is empty.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T> Registry<T>
where
    T: Record + Searchable + Categorized,
{
    /// Returns the ordered subsequence of records passing `filter`.
    pub async fn list(&self, filter: &RecordFilter<T::Category>) -> Vec<T> {
        let records = self.records.read().await;
        filter_records(&records, filter)
    }
}

impl<T: Record> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::filter::CategorySelector;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: RecordId,
        text: String,
        pinned: bool,
    }

    impl Note {
        fn new(text: &str, pinned: bool) -> Self {
            Self {
                id: RecordId::new(),
                text: text.to_string(),
                pinned,
            }
        }
    }

    impl Record for Note {
        const KIND: &'static str = "note";

        fn id(&self) -> RecordId {
            self.id
        }
    }

    impl Searchable for Note {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.text.as_str()]
        }
    }

    impl Categorized for Note {
        type Category = bool;

        fn category(&self) -> Option<&bool> {
            Some(&self.pinned)
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let registry = Registry::new();
        let note = Note::new("decant the Barolo", false);
        let id = note.id;

        let Ok(inserted) = registry.insert(note.clone()).await else {
            panic!("insert failed");
        };
        assert_eq!(inserted, id);

        let Ok(fetched) = registry.get(id).await else {
            panic!("note not found");
        };
        assert_eq!(fetched, note);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let registry = Registry::new();
        let note = Note::new("a", false);
        let _ = registry.insert(note.clone()).await;
        let result = registry.insert(note).await;
        assert!(matches!(result, Err(WinestaError::DuplicateRecord { .. })));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn get_nonexistent_returns_error() {
        let registry: Registry<Note> = Registry::new();
        let result = registry.get(RecordId::new()).await;
        assert!(matches!(result, Err(WinestaError::RecordNotFound { kind: "note", .. })));
    }

    #[tokio::test]
    async fn update_keeps_position() {
        let registry = Registry::with_records(vec![
            Note::new("first", false),
            Note::new("second", false),
            Note::new("third", false),
        ]);
        let target = registry.snapshot().await.get(1).map(|n| n.id);
        let Some(target) = target else {
            panic!("seeded note missing");
        };

        let result = registry
            .update(target, |n| n.text = "edited".to_string())
            .await;
        assert!(result.is_ok());

        let texts: Vec<_> = registry.snapshot().await.into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["first", "edited", "third"]);
    }

    #[tokio::test]
    async fn replace_swaps_identity_in_place() {
        let registry = Registry::with_records(vec![Note::new("a", false), Note::new("b", false)]);
        let Some(old_id) = registry.snapshot().await.first().map(|n| n.id) else {
            panic!("seeded note missing");
        };
        let replacement = Note::new("a2", false);
        let new_id = replacement.id;

        let Ok(old) = registry.replace(old_id, replacement).await else {
            panic!("replace failed");
        };
        assert_eq!(old.text, "a");
        assert!(registry.get(old_id).await.is_err());

        let first = registry.snapshot().await.first().map(|n| n.id);
        assert_eq!(first, Some(new_id));
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn remove_returns_record() {
        let registry = Registry::new();
        let note = Note::new("a", false);
        let id = note.id;
        let _ = registry.insert(note).await;

        assert!(registry.remove(id).await.is_ok());
        assert!(registry.get(id).await.is_err());
        assert!(registry.is_empty().await);
        assert!(registry.remove(id).await.is_err());
    }

    #[tokio::test]
    async fn with_records_drops_duplicates() {
        let note = Note::new("a", false);
        let registry = Registry::with_records(vec![note.clone(), note]);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn list_applies_filter() {
        let registry = Registry::with_records(vec![
            Note::new("Pinned rosé", true),
            Note::new("loose notes", false),
            Note::new("pinned port", true),
        ]);

        let pinned = registry
            .list(&RecordFilter::all().with_category(CategorySelector::Only(true)))
            .await;
        assert_eq!(pinned.len(), 2);

        let port = registry
            .list(&RecordFilter::all().with_query("PORT"))
            .await;
        assert_eq!(port.len(), 1);
    }
}
