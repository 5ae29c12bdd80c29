//! Pickup location search handler
//!
//! Backs the map-pickup search box on the booking form.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::db;
use crate::error::Result;
use crate::models::Location;
use crate::AppState;

/// Query parameters for location search
#[derive(Debug, Deserialize)]
pub struct LocationSearchQuery {
    #[serde(default)]
    pub q: String,
    /// Comma-separated area filter, e.g. `areas=shinjuku,shibuya`
    #[serde(default)]
    pub areas: Option<String>,
}

fn parse_areas(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Search active pickup locations by address substring
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<LocationSearchQuery>,
) -> Result<Json<Vec<Location>>> {
    let areas = parse_areas(query.areas.as_deref());
    let locations = db::search_locations(&state.db, &query.q, &areas).await?;
    Ok(Json(locations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_areas_splits_and_trims() {
        assert_eq!(
            parse_areas(Some("shinjuku, shibuya ,ginza")),
            vec!["shinjuku", "shibuya", "ginza"]
        );
    }

    #[test]
    fn test_parse_areas_ignores_empty_segments() {
        assert_eq!(parse_areas(Some(",, ,")), Vec::<String>::new());
        assert_eq!(parse_areas(None), Vec::<String>::new());
    }
}
