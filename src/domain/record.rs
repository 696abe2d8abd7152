//! The [`Record`] trait shared by every stored domain type.

use std::fmt;

use super::RecordId;

/// A value that can live in a [`super::Registry`].
///
/// Identity must be stable: [`Record::id`] returns the same value for the
/// lifetime of the record, including across in-place updates.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Collection kind used in errors and logs, e.g. `"wine"`.
    const KIND: &'static str;

    /// Returns the record's identity.
    fn id(&self) -> RecordId;
}
