//! The normalized public feed: afisha cards plus hero slides.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use afisha_core::hero::{select_hero_slides, HeroSlide};
use afisha_core::normalize::{normalize_events, search_matches, sort_by_start, NormalizedEvent, SortOrder};

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for the afisha feed.
#[derive(Debug, Default, Deserialize)]
pub struct AfishaParams {
    /// Case-insensitive substring filter over title and venue.
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
    /// Cap on the number of events returned (hero is unaffected).
    pub limit: Option<usize>,
}

/// The widget payload.
#[derive(Debug, Serialize)]
pub struct AfishaFeed {
    pub events: Vec<NormalizedEvent>,
    pub hero: Vec<HeroSlide>,
}

/// GET /api/afisha
///
/// Runs the full normalization pipeline over the persisted document:
/// alias resolution, supplemental merge, display labels, hero
/// selection. `search`/`sort`/`limit` shape the card list only; the
/// hero slides always come from the full set.
pub async fn afisha_feed(
    State(state): State<AppState>,
    Query(params): Query<AfishaParams>,
) -> AppResult<Json<AfishaFeed>> {
    let raw = state.store.load_raw().await?;
    let mut events = normalize_events(&raw);

    let hero = select_hero_slides(&events);

    if let Some(term) = params.search.as_deref() {
        let term = term.trim();
        events.retain(|event| search_matches(event, term));
    }

    sort_by_start(&mut events, params.sort.unwrap_or_default());

    if let Some(limit) = params.limit {
        events.truncate(limit);
    }

    Ok(Json(AfishaFeed { events, hero }))
}
