//! Hero slider selection.
//!
//! The landing page rotates up to three event banners ahead of the brand
//! slide. Editors control placement with `showInHero` and `heroOrder`;
//! events without a manual slot fall back to soonest-first.

use serde::Serialize;

use crate::labels;
use crate::normalize::NormalizedEvent;

/// How many event slides the slider takes.
pub const HERO_SLIDE_LIMIT: usize = 3;

/// One banner in the hero slider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: String,
    pub title: String,
    /// Banner date line, e.g. `"03 ноября 2025 · 19:30"`.
    pub date_label: String,
    pub image: String,
    /// Empty when tickets are not on sale yet.
    pub ticket_url: String,
}

/// Pick and order the hero slides from the normalized feed.
///
/// Eligible events have `showInHero` set and a non-empty title. Ordering:
/// `heroOrder` ascending (unset last), then start ascending (undated
/// last), then title.
pub fn select_hero_slides(events: &[NormalizedEvent]) -> Vec<HeroSlide> {
    let mut eligible: Vec<&NormalizedEvent> = events
        .iter()
        .filter(|e| e.show_in_hero && !e.title.is_empty())
        .collect();

    eligible.sort_by(|a, b| {
        order_key(a.hero_order)
            .partial_cmp(&order_key(b.hero_order))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| start_key(a).cmp(&start_key(b)))
            .then_with(|| a.title.cmp(&b.title))
    });

    eligible
        .into_iter()
        .take(HERO_SLIDE_LIMIT)
        .map(|event| HeroSlide {
            id: event.id.clone(),
            title: event.title.clone(),
            date_label: labels::hero_banner_date(event.start.map(|s| s.date()), event.time),
            image: event.image.clone(),
            ticket_url: event.ticket_url.clone(),
        })
        .collect()
}

fn order_key(order: Option<f64>) -> f64 {
    order.unwrap_or(f64::INFINITY)
}

fn start_key(event: &NormalizedEvent) -> i64 {
    event
        .start
        .map(|s| s.and_utc().timestamp())
        .unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_event;
    use serde_json::json;

    fn feed(records: &[serde_json::Value]) -> Vec<NormalizedEvent> {
        records.iter().filter_map(normalize_event).collect()
    }

    #[test]
    fn soonest_first_when_no_manual_order() {
        let events = feed(&[
            json!({ "title": "Позже", "date": "2025-12-01" }),
            json!({ "title": "Раньше", "date": "2025-11-01" }),
        ]);

        let slides = select_hero_slides(&events);
        assert_eq!(slides[0].title, "Раньше");
        assert_eq!(slides[1].title, "Позже");
    }

    #[test]
    fn manual_order_wins_over_date() {
        let events = feed(&[
            json!({ "title": "Скоро", "date": "2025-11-01" }),
            json!({ "title": "Флагман", "date": "2025-12-01", "heroOrder": 1 }),
        ]);

        let slides = select_hero_slides(&events);
        assert_eq!(slides[0].title, "Флагман");
    }

    #[test]
    fn hidden_and_untitled_events_are_skipped() {
        let events = feed(&[
            json!({ "title": "Скрытый", "showInHero": false }),
            json!({ "title": "Видимый", "date": "2025-11-01" }),
        ]);

        let slides = select_hero_slides(&events);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].title, "Видимый");
    }

    #[test]
    fn takes_at_most_three() {
        let events = feed(&[
            json!({ "title": "а", "date": "2025-11-01" }),
            json!({ "title": "б", "date": "2025-11-02" }),
            json!({ "title": "в", "date": "2025-11-03" }),
            json!({ "title": "г", "date": "2025-11-04" }),
        ]);

        let slides = select_hero_slides(&events);
        assert_eq!(slides.len(), HERO_SLIDE_LIMIT);
        assert_eq!(slides[2].title, "в");
    }

    #[test]
    fn undated_sort_after_dated() {
        let events = feed(&[
            json!({ "title": "Без даты" }),
            json!({ "title": "С датой", "date": "2026-01-01" }),
        ]);

        let slides = select_hero_slides(&events);
        assert_eq!(slides[0].title, "С датой");
        assert_eq!(slides[1].date_label, labels::DATE_PENDING);
    }

    #[test]
    fn slide_carries_banner_fields() {
        let events = feed(&[json!({
            "id": "marat",
            "title": "Мой бедный Марат",
            "date": "2025-11-03",
            "time": "19:30",
            "link": "https://tickets.example/marat"
        })]);

        let slides = select_hero_slides(&events);
        assert_eq!(slides[0].id, "marat");
        assert_eq!(slides[0].date_label, "03 ноября 2025 · 19:30");
        assert_eq!(slides[0].ticket_url, "https://tickets.example/marat");
        assert!(!slides[0].image.is_empty());
    }
}
