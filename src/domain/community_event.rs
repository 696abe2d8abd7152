//! Community events: record, price, month grouping and the event form draft.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use super::filter::{Categorized, Searchable};
use super::form::{Draft, require_text};
use super::{Record, RecordId};
use crate::error::WinestaError;

const FREE_LABEL: &str = "Free";

/// Ticket price: a non-negative amount or free entry.
///
/// On the wire this is either a JSON number or the string `"Free"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EventPrice {
    /// No charge.
    #[default]
    Free,
    /// Price in whole currency units (fractions allowed).
    Amount(f64),
}

impl EventPrice {
    /// Returns `true` for [`EventPrice::Free`].
    #[must_use]
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for EventPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str(FREE_LABEL),
            Self::Amount(amount) if amount.fract() == 0.0 => write!(f, "${amount:.0}"),
            Self::Amount(amount) => write!(f, "${amount:.2}"),
        }
    }
}

impl Serialize for EventPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Free => serializer.serialize_str(FREE_LABEL),
            Self::Amount(amount) => serializer.serialize_f64(*amount),
        }
    }
}

impl<'de> Deserialize<'de> for EventPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = EventPrice;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or \"Free\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<EventPrice, E> {
                Ok(EventPrice::Amount(v))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EventPrice, E> {
                Ok(EventPrice::Amount(v as f64))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EventPrice, E> {
                Ok(EventPrice::Amount(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EventPrice, E> {
                if v.eq_ignore_ascii_case(FREE_LABEL) {
                    Ok(EventPrice::Free)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

/// `HH:MM` wire format for event times.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub(super) fn serialize<S: Serializer>(
        time: &NaiveTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// A community event listing.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CommunityEvent {
    /// Identity.
    pub id: RecordId,
    /// Event title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Venue and address.
    pub location: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time, `HH:MM`.
    #[serde(with = "hh_mm")]
    #[schema(value_type = String, example = "06:00")]
    pub start_time: NaiveTime,
    /// End time, `HH:MM`.
    #[serde(with = "hh_mm")]
    #[schema(value_type = String, example = "15:00")]
    pub end_time: NaiveTime,
    /// Ticket price; a number or `"Free"`.
    #[schema(value_type = Object)]
    pub price: EventPrice,
    /// Banner image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Highlighted in listings.
    pub is_featured: bool,
    /// Free-form category tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CommunityEvent {
    /// Short day label shown on event cards, e.g. `"Tue 1"`.
    #[must_use]
    pub fn day_label(&self) -> String {
        self.date.format("%a %-d").to_string()
    }
}

impl Record for CommunityEvent {
    const KIND: &'static str = "event";

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Searchable for CommunityEvent {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.location.as_str(),
        ]
    }
}

impl Categorized for CommunityEvent {
    type Category = String;

    fn category(&self) -> Option<&String> {
        self.category.as_ref()
    }
}

/// Events sharing a calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    /// Month heading, e.g. `"October 2024"`.
    pub label: String,
    /// Events of that month, in listing order.
    pub events: Vec<CommunityEvent>,
}

/// Buckets `events` by the month of their date.
///
/// Groups come out in chronological order; within a group the incoming
/// order is kept.
#[must_use]
pub fn group_by_month(events: Vec<CommunityEvent>) -> Vec<MonthGroup> {
    let mut months: BTreeMap<(i32, u32), Vec<CommunityEvent>> = BTreeMap::new();
    for event in events {
        months
            .entry((event.date.year(), event.date.month()))
            .or_default()
            .push(event);
    }
    months
        .into_values()
        .filter_map(|events| {
            let label = events.first()?.date.format("%B %Y").to_string();
            Some(MonthGroup { label, events })
        })
        .collect()
}

/// Empty-state text for an event listing.
pub const EMPTY_EVENTS_MESSAGE: &str = "No events found. Try adjusting your search.";

/// Editable event fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventDraft {
    /// Title (required).
    pub title: String,
    /// Description (required).
    pub description: String,
    /// Venue (required).
    pub location: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time, `HH:MM`.
    #[serde(with = "hh_mm")]
    #[schema(value_type = String, example = "18:00")]
    pub start_time: NaiveTime,
    /// End time, `HH:MM`; not before the start.
    #[serde(with = "hh_mm")]
    #[schema(value_type = String, example = "21:30")]
    pub end_time: NaiveTime,
    /// A non-negative number or `"Free"`; free when omitted.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub price: EventPrice,
    /// Banner image reference.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Highlighted in listings.
    #[serde(default)]
    pub is_featured: bool,
    /// Free-form category tag; blank is stored as none.
    #[serde(default)]
    pub category: Option<String>,
}

impl EventDraft {
    fn normalized_category(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

impl Draft for EventDraft {
    type Record = CommunityEvent;

    fn blank(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            location: String::new(),
            date: now.date_naive(),
            start_time: NaiveTime::MIN,
            end_time: NaiveTime::MIN,
            price: EventPrice::Free,
            image_url: None,
            is_featured: false,
            category: None,
        }
    }

    fn from_record(record: &CommunityEvent) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            location: record.location.clone(),
            date: record.date,
            start_time: record.start_time,
            end_time: record.end_time,
            price: record.price,
            image_url: record.image_url.clone(),
            is_featured: record.is_featured,
            category: record.category.clone(),
        }
    }

    fn validate(&self, _now: DateTime<Utc>) -> Result<(), WinestaError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("location", &self.location)?;
        if self.end_time < self.start_time {
            return Err(WinestaError::invalid_field(
                "end_time",
                "must not be before start_time",
            ));
        }
        if let EventPrice::Amount(amount) = self.price
            && !(amount.is_finite() && amount >= 0.0)
        {
            return Err(WinestaError::invalid_field(
                "price",
                "must be a non-negative number or \"Free\"",
            ));
        }
        Ok(())
    }

    fn into_record(self, id: RecordId, now: DateTime<Utc>) -> CommunityEvent {
        let category = self.normalized_category();
        CommunityEvent {
            id,
            title: self.title,
            description: self.description,
            location: self.location,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            price: self.price,
            image_url: self.image_url,
            is_featured: self.is_featured,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_to(self, record: &mut CommunityEvent, now: DateTime<Utc>) {
        record.category = self.normalized_category();
        record.title = self.title;
        record.description = self.description;
        record.location = self.location;
        record.date = self.date;
        record.start_time = self.start_time;
        record.end_time = self.end_time;
        record.price = self.price;
        record.image_url = self.image_url;
        record.is_featured = self.is_featured;
        record.updated_at = now;
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Street Food Festival".to_string(),
            description: "Food trucks and natural wine".to_string(),
            location: "8 E 9th Street, Chicago".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap_or_default(),
            start_time: time(6, 0),
            end_time: time(15, 0),
            price: EventPrice::Amount(70.0),
            image_url: None,
            is_featured: true,
            category: Some("  festival ".to_string()),
        }
    }

    #[test]
    fn price_labels() {
        assert_eq!(EventPrice::Amount(70.0).to_string(), "$70");
        assert_eq!(EventPrice::Amount(12.5).to_string(), "$12.50");
        assert_eq!(EventPrice::Free.to_string(), "Free");
    }

    #[test]
    fn price_accepts_number_or_free() {
        let number: Result<EventPrice, _> = serde_json::from_str("85");
        assert_eq!(number.ok(), Some(EventPrice::Amount(85.0)));
        let free: Result<EventPrice, _> = serde_json::from_str("\"free\"");
        assert_eq!(free.ok(), Some(EventPrice::Free));
        assert!(serde_json::from_str::<EventPrice>("\"cheap\"").is_err());
        assert_eq!(
            serde_json::to_string(&EventPrice::Free).unwrap_or_default(),
            "\"Free\""
        );
    }

    #[test]
    fn times_use_hh_mm() {
        let json = r#"{"title":"t","description":"d","location":"l","date":"2024-10-04","start_time":"06:00","end_time":"15:00"}"#;
        let Ok(parsed) = serde_json::from_str::<EventDraft>(json) else {
            panic!("draft should parse");
        };
        assert_eq!(parsed.start_time, time(6, 0));
        assert!(parsed.price.is_free());

        let Ok(value) = serde_json::to_value(&parsed) else {
            panic!("draft should serialize");
        };
        assert_eq!(value.get("end_time").and_then(|v| v.as_str()), Some("15:00"));
    }

    #[test]
    fn end_before_start_rejected() {
        let mut d = draft();
        d.end_time = time(5, 0);
        assert!(matches!(
            d.validate(Utc::now()),
            Err(WinestaError::InvalidField { field: "end_time", .. })
        ));
    }

    #[test]
    fn negative_price_rejected() {
        let mut d = draft();
        d.price = EventPrice::Amount(-1.0);
        assert!(matches!(
            d.validate(Utc::now()),
            Err(WinestaError::InvalidField { field: "price", .. })
        ));
    }

    #[test]
    fn category_is_trimmed_and_blank_dropped() {
        let event = draft().into_record(RecordId::new(), Utc::now());
        assert_eq!(event.category.as_deref(), Some("festival"));

        let mut d = draft();
        d.category = Some("   ".to_string());
        let event = d.into_record(RecordId::new(), Utc::now());
        assert_eq!(event.category, None);
    }

    #[test]
    fn day_label_matches_card_format() {
        let event = draft().into_record(RecordId::new(), Utc::now());
        assert_eq!(event.day_label(), "Tue 1");
    }

    #[test]
    fn months_sorted_by_date_and_labelled() {
        let on = |y: i32, m: u32, d: u32, title: &str| {
            let mut draft = draft();
            draft.title = title.to_string();
            draft.date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
            draft.into_record(RecordId::new(), Utc::now())
        };
        let events = vec![
            on(2024, 11, 2, "Nouveau night"),
            on(2024, 10, 6, "Harvest walk"),
            on(2025, 1, 10, "Ice wine"),
            on(2024, 10, 1, "Street food"),
        ];

        let groups = group_by_month(events);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["October 2024", "November 2024", "January 2025"]);

        let Some(october) = groups.first() else {
            panic!("october group missing");
        };
        let titles: Vec<&str> = october.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Harvest walk", "Street food"]);
    }

    #[test]
    fn no_events_no_groups() {
        assert!(group_by_month(Vec::new()).is_empty());
    }
}
