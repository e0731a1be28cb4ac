//! Normalization of raw event payloads into display-ready events.
//!
//! The feed has consumed several upstream shapes over the years (the
//! hand-maintained document, ticketing exports, scraped listings), so
//! every interesting field is resolved through an alias list and the
//! result is merged with the supplemental catalog entry for the event's
//! slug.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::{self, slugify, GalleryImage};
use crate::labels;
use crate::supplemental::{supplemental, PLACEHOLDER_IMAGE};

/// Title shown when neither the record nor the catalog has one.
pub const UNTITLED: &str = "Без названия";

/// Keys under which a payload object may carry its event array.
const LIST_KEYS: &[&str] = &["events", "data", "items", "results", "list", "records"];

/// Aliases for the start date, most specific first.
const DATE_KEYS: &[&str] = &[
    "date",
    "start_date",
    "startDate",
    "date_start",
    "dateStart",
    "starts_at",
    "startsAt",
    "start_at",
    "startAt",
    "datetime_start",
    "datetimeStart",
    "event_date",
    "eventDate",
];

/// Aliases that may carry a clock time, directly or inside a datetime.
const TIME_KEYS: &[&str] = &[
    "time",
    "start_time",
    "startTime",
    "start_at",
    "startAt",
    "starts_at",
    "startsAt",
    "datetime_start",
    "datetimeStart",
    "date_time",
    "dateTime",
    "event_time",
    "eventTime",
    "seance_time",
    "seanceTime",
    "start",
    "date",
];

/// Aliases for the ticket purchase URL.
const TICKET_KEYS: &[&str] = &[
    "link",
    "url",
    "seance_url",
    "seanceUrl",
    "purchase_url",
    "purchaseUrl",
    "ticket_url",
    "ticketUrl",
];

/// Aliases for the record id. Ticketing feeds use numeric ids, which
/// stringify.
const ID_KEYS: &[&str] = &["id", "event_id", "slug"];

/// Aliases for the short description.
const DESCRIPTION_KEYS: &[&str] = &[
    "short_description",
    "shortDescription",
    "preview",
    "teaser",
    "excerpt",
    "description",
];

/// First `H:MM` / `HH:MM` / `HH.MM` occurrence inside a string.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[:.](\d{2})").expect("valid time regex"));

/// A display-ready event: record fields resolved through their aliases
/// and merged with the supplemental catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub id: String,
    pub title: String,
    /// Derived start, date plus clock time when both are known.
    pub start: Option<NaiveDateTime>,
    #[serde(with = "event::hhmm")]
    pub time: Option<NaiveTime>,
    /// Card line, e.g. `"03 ноября · 19:30 · Сцена AmmA"`.
    pub card_meta: String,
    /// Modal header line, e.g. `"03 ноября 2025 · Начало в 19:30 · ..."`.
    pub modal_meta: String,
    pub description: String,
    pub creators: Vec<Creator>,
    pub gallery: Vec<GalleryImage>,
    pub image: String,
    pub ticket_url: String,
    pub venue: String,
    pub show_in_hero: bool,
    pub hero_order: Option<f64>,
}

/// A credit line in the feed.
#[derive(Debug, Clone, Serialize)]
pub struct Creator {
    pub role: String,
    pub name: String,
}

/// Feed ordering for the public listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateAsc,
    DateDesc,
}

/// Normalize a whole payload: unwrap the event array, then normalize
/// each entry. Non-object entries are dropped.
pub fn normalize_events(payload: &Value) -> Vec<NormalizedEvent> {
    events_from_payload(payload)
        .iter()
        .filter_map(normalize_event)
        .collect()
}

/// Find the event array inside a payload: a bare array, or the first
/// array under one of the conventional wrapper keys.
pub fn events_from_payload(payload: &Value) -> &[Value] {
    if let Some(list) = payload.as_array() {
        return list;
    }

    for key in LIST_KEYS {
        if let Some(list) = payload.get(key).and_then(Value::as_array) {
            return list;
        }
    }

    &[]
}

/// Normalize one raw record.
pub fn normalize_event(raw: &Value) -> Option<NormalizedEvent> {
    if !raw.is_object() {
        return None;
    }

    let raw_title = str_field(raw, "title");
    let id = ID_KEYS
        .iter()
        .find_map(|key| id_string(raw.get(key)?))
        .unwrap_or_else(|| slugify(&raw_title));
    let entry = supplemental(&id);

    let title = non_empty(raw_title)
        .or_else(|| entry.map(|e| e.title.to_string()))
        .unwrap_or_else(|| UNTITLED.to_string());

    let time = extract_time(raw);
    let start = start_datetime(raw, time);
    let date = start.map(|s| s.date());

    let venue = non_empty(str_field(raw, "venue"))
        .or_else(|| entry.map(|e| e.venue.to_string()))
        .unwrap_or_default();

    let description = pick_string(raw, DESCRIPTION_KEYS)
        .or_else(|| entry.map(|e| e.description.to_string()))
        .unwrap_or_default();

    let image = non_empty(str_field(raw, "image"))
        .or_else(|| entry.map(|e| e.image.to_string()))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    let ticket_url = pick_string(raw, TICKET_KEYS).unwrap_or_default();

    let creators = entry
        .map(|e| {
            e.creators
                .iter()
                .map(|c| Creator {
                    role: c.role.to_string(),
                    name: c.name.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let gallery = resolve_gallery(raw, entry);

    Some(NormalizedEvent {
        card_meta: labels::card_meta(date, time, &venue),
        modal_meta: labels::modal_meta(date, time, &venue),
        id,
        title,
        start,
        time,
        description,
        creators,
        gallery,
        image,
        ticket_url,
        venue,
        show_in_hero: event::sanitize_show_in_hero(raw.get("showInHero").unwrap_or(&Value::Null)),
        hero_order: event::sanitize_hero_order(raw.get("heroOrder").unwrap_or(&Value::Null)),
    })
}

/// Pull a clock time out of any of the time-bearing aliases.
pub fn extract_time(raw: &Value) -> Option<NaiveTime> {
    TIME_KEYS
        .iter()
        .find_map(|key| normalize_time_value(raw.get(key)?))
}

/// Extract `HH:MM` from a string value, wherever it sits inside it
/// (`"19:30"`, `"2025-11-03T19:30:00"`, `"19.30"` all resolve).
pub fn normalize_time_value(value: &Value) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(value.as_str()?.trim())?;
    let hours = caps[1].parse().ok()?;
    let minutes = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Derive the start datetime from the first usable date alias.
///
/// A datetime string carries its own clock; a plain date is combined
/// with `time` (midnight when unknown). Epoch milliseconds are taken
/// as UTC.
pub fn start_datetime(raw: &Value, time: Option<NaiveTime>) -> Option<NaiveDateTime> {
    let value = DATE_KEYS.iter().find_map(|key| {
        let v = raw.get(key)?;
        (!v.is_null() && v.as_str() != Some("")).then_some(v)
    })?;

    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.naive_local());
            }
            for format in [
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%dT%H:%M",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
            ] {
                if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(dt);
                }
            }
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
            Some(date.and_time(time.unwrap_or_default()))
        }
        Value::Number(n) => {
            let millis = n.as_i64()?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

/// Case-insensitive substring match over the title + venue haystack.
pub fn search_matches(event: &NormalizedEvent, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let haystack = format!("{} {}", event.title, event.venue).to_lowercase();
    haystack.contains(&term.to_lowercase())
}

/// Order the feed by start. Undated events sort as the epoch: first in
/// ascending order, last in descending.
pub fn sort_by_start(events: &mut [NormalizedEvent], order: SortOrder) {
    events.sort_by_key(|e| e.start.unwrap_or_default());
    if order == SortOrder::DateDesc {
        events.reverse();
    }
}

/// Record gallery wins over the catalog; empty captions get a
/// positional `"Кадр N"` fallback either way.
fn resolve_gallery(
    raw: &Value,
    entry: Option<&'static crate::supplemental::Supplemental>,
) -> Vec<GalleryImage> {
    let own = event::sanitize_gallery(raw.get("gallery").unwrap_or(&Value::Null));

    let images = if own.is_empty() {
        entry
            .map(|e| {
                e.gallery
                    .iter()
                    .map(|shot| GalleryImage {
                        src: shot.src.to_string(),
                        caption: shot.caption.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    } else {
        own
    };

    images
        .into_iter()
        .enumerate()
        .map(|(index, mut image)| {
            if image.caption.is_empty() {
                image.caption = format!("Кадр {}", index + 1);
            }
            image
        })
        .collect()
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn str_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn pick_string(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}
