//! The persisted event record and admin-draft sanitization.
//!
//! Admin saves replace the whole document. Incoming drafts are coerced
//! field by field rather than rejected: a missing or mistyped field falls
//! back to its zero value, dates and times are parsed from the handful of
//! shapes the admin panel has historically produced, and every event ends
//! up with a unique slug id.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single event as persisted in the `{ "events": [...] }` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique slug within the document.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Wall-clock start, `HH:MM` on the wire.
    #[serde(default, with = "hhmm")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub venue: String,
    /// Ticket purchase URL.
    #[serde(default)]
    pub link: String,
    /// Poster URL or an `/uploads/...` path.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_show_in_hero")]
    pub show_in_hero: bool,
    /// Manual slot in the hero slider; lower comes first.
    #[serde(default)]
    pub hero_order: Option<f64>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
}

fn default_show_in_hero() -> bool {
    true
}

/// A captioned gallery entry on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    #[serde(default)]
    pub caption: String,
}

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
    pub events: Vec<Event>,
}

/// An event as submitted by the admin panel, before sanitization.
///
/// Every field is a raw JSON value so that a mistyped field degrades to
/// its default instead of failing the whole save.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub id: Value,
    pub title: Value,
    pub date: Value,
    pub time: Value,
    pub venue: Value,
    pub link: Value,
    pub image: Value,
    pub description: Value,
    pub show_in_hero: Value,
    pub hero_order: Value,
    pub gallery: Value,
}

/// Sanitize a full submitted array: coerce each draft, then enforce id
/// uniqueness in array order.
pub fn sanitize_events(drafts: &[EventDraft]) -> Vec<Event> {
    let events = drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| sanitize_event(draft, index))
        .collect();
    ensure_unique_ids(events)
}

/// Coerce a single draft into a well-formed [`Event`].
///
/// `index` is the 0-based position in the submitted array, used for the
/// `event-{n}` fallback id.
pub fn sanitize_event(draft: &EventDraft, index: usize) -> Event {
    let title = trimmed_string(&draft.title);

    let mut id = slugify(&loose_string(&draft.id));
    if id.is_empty() {
        id = slugify(&title);
    }
    if id.is_empty() {
        id = format!("event-{}", index + 1);
    }

    Event {
        id,
        title,
        date: sanitize_date(&draft.date),
        time: sanitize_time(&draft.time),
        venue: trimmed_string(&draft.venue),
        link: trimmed_string(&draft.link),
        image: trimmed_string(&draft.image),
        description: trimmed_string(&draft.description),
        show_in_hero: sanitize_show_in_hero(&draft.show_in_hero),
        hero_order: sanitize_hero_order(&draft.hero_order),
        gallery: sanitize_gallery(&draft.gallery),
    }
}

/// Parse a draft date value into a calendar date.
///
/// Accepts `YYYY-MM-DD`, an ISO-8601 datetime (with `T` or a space, the
/// date part is kept), or Unix epoch milliseconds. Anything else is null.
pub fn sanitize_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(date);
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.date_naive());
            }
            for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
                if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(dt.date());
                }
            }
            None
        }
        Value::Number(n) => {
            let millis = n.as_i64()?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

/// Parse a draft time value: exactly `HH:MM`, two digits each.
pub fn sanitize_time(value: &Value) -> Option<NaiveTime> {
    let s = value.as_str()?.trim();
    let (hours, minutes) = s.split_once(':')?;
    if hours.len() != 2
        || minutes.len() != 2
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}

/// Parse a draft hero-order value: a finite number or a numeric string.
pub fn sanitize_hero_order(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Missing values default to visible; otherwise JS-style truthiness.
pub(crate) fn sanitize_show_in_hero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Gallery entries may be bare URL strings or `{src, caption}` objects.
pub(crate) fn sanitize_gallery(value: &Value) -> Vec<GalleryImage> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let (src, caption) = match entry {
                Value::String(src) => (src.trim(), ""),
                Value::Object(obj) => {
                    let src = obj.get("src").and_then(Value::as_str).unwrap_or_default();
                    let caption = obj
                        .get("caption")
                        .and_then(Value::as_str)
                        .unwrap_or_default();
                    (src.trim(), caption.trim())
                }
                _ => return None,
            };
            (!src.is_empty()).then(|| GalleryImage {
                src: src.to_string(),
                caption: caption.to_string(),
            })
        })
        .collect()
}

/// Turn a free-form value into a slug: lowercase, `ё` folded to `е`,
/// runs of anything outside `[a-z0-9а-я]` collapsed to single dashes,
/// dashes trimmed from both ends.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.to_lowercase().chars() {
        let ch = if ch == 'ё' { 'е' } else { ch };
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ('а'..='я').contains(&ch) {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Deduplicate ids in array order by suffixing `-2`, `-3`, ... to later
/// collisions. Re-derives each base from the id, the title, or the
/// array position, in that order.
pub fn ensure_unique_ids(events: Vec<Event>) -> Vec<Event> {
    let mut used = HashSet::new();

    events
        .into_iter()
        .enumerate()
        .map(|(index, mut event)| {
            let mut base = slugify(&event.id);
            if base.is_empty() {
                base = slugify(&event.title);
            }
            if base.is_empty() {
                base = format!("event-{}", index + 1);
            }

            let mut candidate = base.clone();
            let mut attempt = 2;
            while used.contains(&candidate) {
                candidate = format!("{base}-{attempt}");
                attempt += 1;
            }

            used.insert(candidate.clone());
            event.id = candidate;
            event
        })
        .collect()
}

fn trimmed_string(value: &Value) -> String {
    value
        .as_str()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Like [`trimmed_string`] but also stringifies numbers, matching how
/// historical ids sometimes arrived as raw numbers.
fn loose_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// `HH:MM` wire format for optional times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => NaiveTime::parse_from_str(&raw, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
