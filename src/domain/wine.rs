//! Cellar wines: record, category, rating, and the wine form draft.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::filter::{Categorized, CategorySelector, Searchable};
use super::form::{Draft, require_text};
use super::{Record, RecordId};
use crate::error::WinestaError;

/// Earliest accepted vintage.
pub const MIN_VINTAGE: i32 = 1900;

/// Cellar bucket a wine is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WineCategory {
    /// Already tasted.
    #[default]
    Tried,
    /// Want to taste.
    Wishlist,
    /// Favorites.
    Favorite,
}

impl WineCategory {
    /// Every category, in filter-bar order.
    pub const ALL: [Self; 3] = [Self::Tried, Self::Wishlist, Self::Favorite];

    /// Wire name, e.g. `"wishlist"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tried => "tried",
            Self::Wishlist => "wishlist",
            Self::Favorite => "favorite",
        }
    }

    /// Display label, e.g. `"Wishlist"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Tried => "Tried",
            Self::Wishlist => "Wishlist",
            Self::Favorite => "Favorite",
        }
    }

    /// Parses a filter-bar selector, where `"all"` or a blank value is the
    /// wildcard.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::InvalidField`] for unknown values.
    pub fn parse_selector(value: &str) -> Result<CategorySelector<Self>, WinestaError> {
        if CategorySelector::<Self>::is_wildcard(value) {
            return Ok(CategorySelector::All);
        }
        value.trim().parse().map(CategorySelector::Only)
    }
}

impl fmt::Display for WineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WineCategory {
    type Err = WinestaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                WinestaError::invalid_field(
                    "category",
                    format!("unknown category {s:?}; expected all, tried, wishlist or favorite"),
                )
            })
    }
}

/// Star rating, always within `0..=5`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = u8)]
pub struct Rating(u8);

impl Rating {
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Clamps `stars` into `0..=5`.
    #[must_use]
    pub fn clamped(stars: i64) -> Self {
        let stars = stars.clamp(0, i64::from(Self::MAX));
        Self(u8::try_from(stars).unwrap_or(Self::MAX))
    }

    /// Number of stars.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// A wine in the personal cellar.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Wine {
    /// Identity.
    pub id: RecordId,
    /// Wine name, e.g. `"Château Margaux"`.
    pub name: String,
    /// Vintage year.
    pub year: i32,
    /// Region of origin.
    pub region: String,
    /// Star rating.
    pub rating: Rating,
    /// Free-text tasting notes.
    pub tasting_notes: String,
    /// Free-text food pairings.
    pub pairing_details: String,
    /// Cellar bucket.
    pub category: WineCategory,
    /// Bottle image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Record for Wine {
    const KIND: &'static str = "wine";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Searchable for Wine {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.region.as_str(),
            self.tasting_notes.as_str(),
            self.pairing_details.as_str(),
        ]
    }
}

impl Categorized for Wine {
    type Category = WineCategory;

    fn category(&self) -> Option<&WineCategory> {
        Some(&self.category)
    }
}

/// Number of wines per filter-bar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct CategoryCounts {
    /// Whole cellar.
    pub all: usize,
    /// Wines filed as tried.
    pub tried: usize,
    /// Wines on the wishlist.
    pub wishlist: usize,
    /// Favorite wines.
    pub favorite: usize,
}

impl CategoryCounts {
    /// Counts `wines` per category.
    #[must_use]
    pub fn tally(wines: &[Wine]) -> Self {
        wines.iter().fold(Self::default(), |mut counts, wine| {
            counts.all += 1;
            match wine.category {
                WineCategory::Tried => counts.tried += 1,
                WineCategory::Wishlist => counts.wishlist += 1,
                WineCategory::Favorite => counts.favorite += 1,
            }
            counts
        })
    }

    /// Count shown next to `selector`.
    #[must_use]
    pub const fn get(&self, selector: &CategorySelector<WineCategory>) -> usize {
        match selector {
            CategorySelector::All => self.all,
            CategorySelector::Only(WineCategory::Tried) => self.tried,
            CategorySelector::Only(WineCategory::Wishlist) => self.wishlist,
            CategorySelector::Only(WineCategory::Favorite) => self.favorite,
        }
    }
}

/// Empty-state text for a cellar view filtered by `selector`.
#[must_use]
pub fn empty_cellar_message(selector: &CategorySelector<WineCategory>) -> String {
    match selector {
        CategorySelector::All => {
            "No wines in your cellar yet. Start building your collection!".to_string()
        }
        CategorySelector::Only(category) => format!("No wines in the {category} category."),
    }
}

/// Editable wine fields, as submitted by the cellar form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WineDraft {
    /// Wine name (required).
    pub name: String,
    /// Vintage year, `1900..=current year + 1`.
    pub year: i32,
    /// Region (required).
    pub region: String,
    /// Star rating, `0..=5`.
    #[serde(default)]
    pub rating: i64,
    /// Tasting notes.
    #[serde(default)]
    pub tasting_notes: String,
    /// Pairing details.
    #[serde(default)]
    pub pairing_details: String,
    /// Cellar bucket; `tried` when omitted.
    #[serde(default)]
    pub category: WineCategory,
    /// Bottle image reference.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Draft for WineDraft {
    type Record = Wine;

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            year: now.year(),
            region: String::new(),
            rating: 0,
            tasting_notes: String::new(),
            pairing_details: String::new(),
            category: WineCategory::Tried,
            image_url: None,
        }
    }

    fn from_record(record: &Wine) -> Self {
        Self {
            name: record.name.clone(),
            year: record.year,
            region: record.region.clone(),
            rating: i64::from(record.rating.get()),
            tasting_notes: record.tasting_notes.clone(),
            pairing_details: record.pairing_details.clone(),
            category: record.category,
            image_url: record.image_url.clone(),
        }
    }

    fn validate(&self, now: DateTime<Utc>) -> Result<(), WinestaError> {
        require_text("name", &self.name)?;
        let max_year = now.year().saturating_add(1);
        if !(MIN_VINTAGE..=max_year).contains(&self.year) {
            return Err(WinestaError::invalid_field(
                "year",
                format!("must be between {MIN_VINTAGE} and {max_year}"),
            ));
        }
        require_text("region", &self.region)?;
        if !(0..=i64::from(Rating::MAX)).contains(&self.rating) {
            return Err(WinestaError::invalid_field(
                "rating",
                format!("must be between 0 and {}", Rating::MAX),
            ));
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, now: DateTime<Utc>) -> Wine {
        Wine {
            id,
            name: self.name,
            year: self.year,
            region: self.region,
            rating: Rating::clamped(self.rating),
            tasting_notes: self.tasting_notes,
            pairing_details: self.pairing_details,
            category: self.category,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_to(self, record: &mut Wine, now: DateTime<Utc>) {
        record.name = self.name;
        record.year = self.year;
        record.region = self.region;
        record.rating = Rating::clamped(self.rating);
        record.tasting_notes = self.tasting_notes;
        record.pairing_details = self.pairing_details;
        record.category = self.category;
        record.image_url = self.image_url;
        record.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 25, 18, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn draft() -> WineDraft {
        WineDraft {
            name: "Opus One".to_string(),
            year: 2018,
            region: "Napa Valley, USA".to_string(),
            rating: 4,
            tasting_notes: "Dark fruit, spice".to_string(),
            pairing_details: "Ribeye".to_string(),
            category: WineCategory::Wishlist,
            image_url: None,
        }
    }

    #[test]
    fn rating_is_clamped() {
        assert_eq!(Rating::clamped(-3).get(), 0);
        assert_eq!(Rating::clamped(3).get(), 3);
        assert_eq!(Rating::clamped(42).get(), 5);
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Favorite".parse::<WineCategory>().ok(), Some(WineCategory::Favorite));
        assert!("cellar".parse::<WineCategory>().is_err());
    }

    #[test]
    fn selector_accepts_all_wildcard() {
        assert_eq!(WineCategory::parse_selector("ALL").ok(), Some(CategorySelector::All));
        assert_eq!(WineCategory::parse_selector(" ").ok(), Some(CategorySelector::All));
        assert_eq!(
            WineCategory::parse_selector("tried").ok(),
            Some(CategorySelector::Only(WineCategory::Tried))
        );
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate(now()).is_ok());
    }

    #[test]
    fn year_bounds_follow_the_clock() {
        let mut d = draft();
        d.year = 1899;
        assert!(matches!(
            d.validate(now()),
            Err(WinestaError::InvalidField { field: "year", .. })
        ));
        d.year = 2027;
        assert!(d.validate(now()).is_ok());
        d.year = 2028;
        assert!(d.validate(now()).is_err());
    }

    #[test]
    fn rating_out_of_range_rejected() {
        let mut d = draft();
        d.rating = 6;
        assert!(matches!(
            d.validate(now()),
            Err(WinestaError::InvalidField { field: "rating", .. })
        ));
    }

    #[test]
    fn blank_region_rejected() {
        let mut d = draft();
        d.region = " ".to_string();
        assert!(matches!(
            d.validate(now()),
            Err(WinestaError::InvalidField { field: "region", .. })
        ));
    }

    #[test]
    fn counts_tally_per_category() {
        let wines: Vec<Wine> = [WineCategory::Tried, WineCategory::Favorite, WineCategory::Favorite]
            .into_iter()
            .map(|category| {
                let mut d = draft();
                d.category = category;
                d.into_record(RecordId::new(), now())
            })
            .collect();
        let counts = CategoryCounts::tally(&wines);
        assert_eq!(counts.all, 3);
        assert_eq!(counts.tried, 1);
        assert_eq!(counts.wishlist, 0);
        assert_eq!(counts.get(&CategorySelector::Only(WineCategory::Favorite)), 2);
    }

    #[test]
    fn empty_messages() {
        assert_eq!(
            empty_cellar_message(&CategorySelector::Only(WineCategory::Wishlist)),
            "No wines in the wishlist category."
        );
        assert!(empty_cellar_message(&CategorySelector::All).starts_with("No wines in your cellar"));
    }

    #[test]
    fn draft_defaults_when_fields_omitted() {
        let json = r#"{"name":"Chablis","year":2020,"region":"Burgundy"}"#;
        let Ok(parsed) = serde_json::from_str::<WineDraft>(json) else {
            panic!("minimal draft should parse");
        };
        assert_eq!(parsed.rating, 0);
        assert_eq!(parsed.category, WineCategory::Tried);
        assert!(parsed.tasting_notes.is_empty());
    }
}
