//! Russian display labels for event cards, the detail modal, and the
//! hero banner.
//!
//! The site renders dates in ru-RU prose ("03 ноября 2025"), so month
//! names live here as an explicit genitive table instead of pulling in a
//! locale library.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Shown wherever an event has no usable date.
pub const DATE_PENDING: &str = "Дата уточняется";

/// Genitive month names, January first.
const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// `"03 ноября"` -- day and genitive month, no year.
pub fn day_month(date: NaiveDate) -> String {
    format!("{:02} {}", date.day(), month_genitive(date))
}

/// `"03 ноября 2025"` -- day, genitive month, year.
pub fn day_month_year(date: NaiveDate) -> String {
    format!("{:02} {} {}", date.day(), month_genitive(date), date.year())
}

/// `"19:30"`.
pub fn hh_mm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Card line under the title: `"03 ноября · 19:30 · <venue>"` with absent
/// parts dropped, or [`DATE_PENDING`] when nothing is known.
pub fn card_meta(date: Option<NaiveDate>, time: Option<NaiveTime>, venue: &str) -> String {
    let mut parts = Vec::new();

    if let Some(date) = date {
        parts.push(day_month(date));
    }
    if let Some(time) = time {
        parts.push(hh_mm(time));
    }
    if !venue.is_empty() {
        parts.push(venue.to_string());
    }

    if parts.is_empty() {
        DATE_PENDING.to_string()
    } else {
        parts.join(" · ")
    }
}

/// Modal header line: adds the year and spells the time out as
/// `"Начало в 19:30"`; empty when nothing is known.
pub fn modal_meta(date: Option<NaiveDate>, time: Option<NaiveTime>, venue: &str) -> String {
    let mut parts = Vec::new();

    if let Some(date) = date {
        parts.push(day_month_year(date));
    }
    if let Some(time) = time {
        parts.push(format!("Начало в {}", hh_mm(time)));
    }
    if !venue.is_empty() {
        parts.push(venue.to_string());
    }

    parts.join(" · ")
}

/// Hero banner date line: `"03 ноября 2025 · 19:30"`, or [`DATE_PENDING`].
pub fn hero_banner_date(date: Option<NaiveDate>, time: Option<NaiveTime>) -> String {
    let mut parts = Vec::new();

    if let Some(date) = date {
        parts.push(day_month_year(date));
    }
    if let Some(time) = time {
        parts.push(hh_mm(time));
    }

    if parts.is_empty() {
        DATE_PENDING.to_string()
    } else {
        parts.join(" · ")
    }
}

fn month_genitive(date: NaiveDate) -> &'static str {
    MONTHS_GENITIVE[date.month0() as usize]
}
