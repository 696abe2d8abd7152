//! Demo records loaded at startup when `SEED_DEMO_DATA` is enabled.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::{CommunityEvent, EventPrice, Rating, RecordId, Story, Wine, WineCategory};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Starter cellar.
#[must_use]
pub fn demo_wines(now: DateTime<Utc>) -> Vec<Wine> {
    let wine = |name: &str,
                year: i32,
                region: &str,
                stars: i64,
                notes: &str,
                pairing: &str,
                category: WineCategory| Wine {
        id: RecordId::new(),
        name: name.to_string(),
        year,
        region: region.to_string(),
        rating: Rating::clamped(stars),
        tasting_notes: notes.to_string(),
        pairing_details: pairing.to_string(),
        category,
        image_url: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        wine(
            "Château Margaux",
            2015,
            "Bordeaux, France",
            5,
            "Elegant and refined with notes of blackcurrant, cedar, and violets. Silky tannins and a long, complex finish.",
            "Grilled steak, lamb, aged cheese",
            WineCategory::Favorite,
        ),
        wine(
            "Dom Pérignon",
            2012,
            "Champagne, France",
            5,
            "Crisp and refreshing with citrus and white flower notes. Fine bubbles and a creamy texture.",
            "Oysters, caviar, sushi",
            WineCategory::Tried,
        ),
        wine(
            "Opus One",
            2018,
            "Napa Valley, USA",
            4,
            "Bold and rich with dark fruit flavors, spice, and oak. Full-bodied with firm tannins.",
            "Ribeye steak, dark chocolate",
            WineCategory::Wishlist,
        ),
    ]
}

/// Starter event listings.
#[must_use]
pub fn demo_events(now: DateTime<Utc>) -> Vec<CommunityEvent> {
    const VENUE: &str = "Eventicity Club 8 E 9th Street, Chicago, IL, United States";
    const BLURB: &str = "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi architecto beatae vitae dicta sunt explicabo.";

    let event = |title: &str, day: NaiveDate, price: EventPrice, featured: bool| CommunityEvent {
        id: RecordId::new(),
        title: title.to_string(),
        description: BLURB.to_string(),
        location: VENUE.to_string(),
        date: day,
        start_time: time(6, 0),
        end_time: time(15, 0),
        price,
        image_url: None,
        is_featured: featured,
        category: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        event(
            "Street Food Festival",
            date(2024, 10, 1),
            EventPrice::Amount(70.0),
            true,
        ),
        event(
            "Corporate celebrations",
            date(2024, 10, 4),
            EventPrice::Amount(85.0),
            false,
        ),
        event(
            "Apple event: introducing new IOS",
            date(2024, 10, 6),
            EventPrice::Free,
            false,
        ),
    ]
}

/// Starter stories, newest first.
#[must_use]
pub fn demo_stories() -> Vec<Story> {
    let story = |title: &str,
                 description: &str,
                 image: &str,
                 day: NaiveDate,
                 minutes: u32,
                 author: &str| Story {
        id: RecordId::new(),
        title: title.to_string(),
        description: description.to_string(),
        date: day,
        read_time_minutes: minutes,
        author: author.to_string(),
        image_url: Some(image.to_string()),
    };

    vec![
        story(
            "The Renaissance of Tuscan Reds",
            "Exploring how a new generation of winemakers is redefining the classic Chianti profile while honoring centuries of tradition.",
            "https://images.unsplash.com/photo-1510812431401-41d2bd2722f3?w=800&h=600&fit=crop",
            date(2024, 10, 12),
            5,
            "Marco V.",
        ),
        story(
            "Biodynamic Viticulture Explained",
            "Beyond organic: understanding the holistic approach to vineyard management that views the farm as a self-sustaining organism.",
            "https://images.unsplash.com/photo-1506377247377-2a5b3b417ebb?w=800&h=600&fit=crop",
            date(2024, 10, 8),
            8,
            "Sarah J.",
        ),
        story(
            "Hidden Gems of South Africa",
            "From Stellenbosch to Swartland, discover the regions producing some of the most exciting and value-driven wines today.",
            "https://images.unsplash.com/photo-1510812431401-41d2bd2722f3?w=800&h=600&fit=crop",
            date(2024, 9, 28),
            6,
            "David K.",
        ),
    ]
}
