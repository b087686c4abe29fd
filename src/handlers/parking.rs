use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::extract::FormOrJson;
use crate::app_state::AppState;
use crate::domain::{Coordinate, ParkingSpot};
use crate::error::ApiError;
use crate::session::session_from_jar;

/// Body of `POST /api/parking`.
#[derive(Debug, Deserialize)]
pub struct NewSpotRequest {
    longitude: f64,
    latitude: f64,

    /// RFC 3339 time the spot becomes free. Placeholder stamp when omitted.
    #[serde(default)]
    available_time: Option<DateTime<Utc>>,
}

/// Handler for listing every posting (GET /api/parking).
///
/// No filtering, paging, or ordering. Responds `200 OK` with a JSON array,
/// `[]` when nothing has been posted.
#[tracing::instrument(skip(state))]
pub async fn list_spots(State(state): State<AppState>) -> Result<Json<Vec<ParkingSpot>>, ApiError> {
    // ---
    let spots = state.repository().list_spots().await?;

    tracing::debug!("Listing {} parking spots", spots.len());

    Ok(Json(spots))
}

/// Handler for posting a parking spot (POST /api/parking).
///
/// The posting is attributed to the user behind the `ssid` cookie when it
/// names a live session, and left unattributed otherwise, including when the
/// session store cannot be reached.
///
/// - `201 Created` with the stored record on success.
/// - `400 Bad Request` if the coordinates are missing or out of range.
#[tracing::instrument(skip(state, jar))]
pub async fn create_spot(
    State(state): State<AppState>,
    jar: CookieJar,
    FormOrJson(request): FormOrJson<NewSpotRequest>,
) -> Result<(StatusCode, Json<ParkingSpot>), ApiError> {
    // ---
    let coordinate = Coordinate::new(request.longitude, request.latitude)?;

    // Attribution is advisory; posting proceeds without it.
    let poster = match session_from_jar(state.sessions(), &jar).await {
        Ok(poster) => poster,
        Err(err) => {
            tracing::warn!("Session lookup failed, posting anonymously: {}", err);
            None
        }
    };

    let spot = ParkingSpot::new(
        coordinate,
        request.available_time,
        poster.map(|session| session.user_id),
    );

    let spot = state.repository().create_spot(spot).await?;
    state.metrics().record_spot_created();

    tracing::info!(
        "Created parking spot {} at [{}, {}]",
        spot.id,
        coordinate.longitude,
        coordinate.latitude
    );

    Ok((StatusCode::CREATED, Json(spot)))
}
