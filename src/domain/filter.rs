//! Category and free-text filtering over record collections.
//!
//! Filtering is a pure function of the collection and a [`RecordFilter`]:
//! the result is the ordered subsequence of matching records. An empty
//! result is not an error.

/// Records exposing text fields for free-text search.
pub trait Searchable {
    /// Returns the fields that a search query is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Records bucketed by a category tag.
pub trait Categorized {
    /// The category type, e.g. [`super::WineCategory`].
    type Category: PartialEq;

    /// Returns the record's category, if it has one.
    fn category(&self) -> Option<&Self::Category>;
}

/// Category half of a filter: the `all` wildcard or one specific category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector<C> {
    /// Matches every record, including uncategorized ones.
    All,
    /// Matches records whose category equals the given one.
    Only(C),
}

impl<C> Default for CategorySelector<C> {
    fn default() -> Self {
        Self::All
    }
}

impl<C: PartialEq> CategorySelector<C> {
    /// Returns `true` if a record with `category` passes this selector.
    #[must_use]
    pub fn matches(&self, category: Option<&C>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted),
        }
    }

    /// Whether a raw filter-bar value names the wildcard: blank or `all`,
    /// in any case.
    #[must_use]
    pub fn is_wildcard(raw: &str) -> bool {
        let raw = raw.trim();
        raw.is_empty() || raw.eq_ignore_ascii_case("all")
    }
}

/// Case-insensitive substring query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Builds a query. The text is matched as-is, ignoring case.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    /// Returns `true` if any searchable field contains the query.
    ///
    /// The empty query matches everything.
    #[must_use]
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Combined category + search filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter<C> {
    /// Category selector; [`CategorySelector::All`] by default.
    pub category: CategorySelector<C>,
    /// Optional free-text query.
    pub query: Option<SearchQuery>,
}

impl<C> Default for RecordFilter<C> {
    fn default() -> Self {
        Self {
            category: CategorySelector::All,
            query: None,
        }
    }
}

impl<C: PartialEq> RecordFilter<C> {
    /// A filter that matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the filter to a category selector.
    #[must_use]
    pub fn with_category(mut self, category: CategorySelector<C>) -> Self {
        self.category = category;
        self
    }

    /// Adds a free-text query.
    #[must_use]
    pub fn with_query(mut self, text: &str) -> Self {
        self.query = Some(SearchQuery::new(text));
        self
    }

    /// Returns `true` if `record` passes both the category and the query.
    #[must_use]
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Searchable + Categorized<Category = C>,
    {
        self.category.matches(record.category())
            && self.query.as_ref().is_none_or(|q| q.matches(record))
    }
}

/// Returns the ordered subsequence of `records` that pass `filter`.
#[must_use]
pub fn filter_records<R>(records: &[R], filter: &RecordFilter<R::Category>) -> Vec<R>
where
    R: Searchable + Categorized + Clone,
{
    records
        .iter()
        .filter(|record| filter.matches(*record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Bottle {
        name: &'static str,
        note: &'static str,
        shelf: Option<u8>,
    }

    impl Searchable for Bottle {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.note]
        }
    }

    impl Categorized for Bottle {
        type Category = u8;

        fn category(&self) -> Option<&u8> {
            self.shelf.as_ref()
        }
    }

    fn bottles() -> Vec<Bottle> {
        vec![
            Bottle {
                name: "Barolo",
                note: "tar and roses",
                shelf: Some(1),
            },
            Bottle {
                name: "Chablis",
                note: "flint",
                shelf: Some(2),
            },
            Bottle {
                name: "Rioja",
                note: "vanilla, ROSES",
                shelf: None,
            },
        ]
    }

    #[test]
    fn all_returns_everything_in_order() {
        let all = filter_records(&bottles(), &RecordFilter::all());
        assert_eq!(all, bottles());
    }

    #[test]
    fn specific_category_skips_uncategorized() {
        let filter = RecordFilter::all().with_category(CategorySelector::Only(1));
        let hits = filter_records(&bottles(), &filter);
        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|b| b.shelf == Some(1)));
    }

    #[test]
    fn search_ignores_case_and_checks_every_field() {
        let filter = RecordFilter::all().with_query("Roses");
        let names: Vec<_> = filter_records(&bottles(), &filter)
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Barolo", "Rioja"]);
    }

    #[test]
    fn category_and_query_combine() {
        let filter = RecordFilter::all()
            .with_category(CategorySelector::Only(2))
            .with_query("roses");
        assert!(filter_records(&bottles(), &filter).is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let filter = RecordFilter::<u8>::all().with_query("");
        assert_eq!(filter_records(&bottles(), &filter).len(), 3);
    }

    #[test]
    fn wildcard_names() {
        assert!(CategorySelector::<u8>::is_wildcard("all"));
        assert!(CategorySelector::<u8>::is_wildcard(" ALL "));
        assert!(CategorySelector::<u8>::is_wildcard(""));
        assert!(!CategorySelector::<u8>::is_wildcard("tasting"));
    }
}
