use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Availability stamp used when a posting does not say when the spot frees up.
///
/// Kept from the first version of the client, which always sent this value.
pub const PLACEHOLDER_AVAILABLE_TIME: &str = "Fri, 02 Feb 1996 03:04:05 GMT";

/// Format used for `available_time`, the HTTP-date layout the client parses.
const AVAILABLE_TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A registered account in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    // ---
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,

    /// Argon2id PHC string. Never sent to clients.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    // ---
    pub fn new(username: String, password_hash: String) -> Self {
        // ---
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Rejected coordinate input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("longitude must be a finite number between -180 and 180")]
    Longitude,
    #[error("latitude must be a finite number between -90 and 90")]
    Latitude,
}

/// A `(longitude, latitude)` pair, stored as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    // ---
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordinateError> {
        // ---
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude);
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude);
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.longitude, c.latitude]
    }
}

/// The `spot` sub-document of a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    // ---
    pub coordinate: Coordinate,
    pub available_time: String,

    /// Poster's user id, when the request carried a live session.
    /// Advisory only, not checked against `users`.
    pub user_id: Option<String>,
}

/// A single reported parking-spot availability in the `parking` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    // ---
    #[serde(rename = "_id")]
    pub id: String,
    pub spot: Spot,
}

impl ParkingSpot {
    // ---
    pub fn new(
        coordinate: Coordinate,
        available_at: Option<DateTime<Utc>>,
        user_id: Option<String>,
    ) -> Self {
        // ---
        let available_time = match available_at {
            Some(at) => format_available_time(at),
            None => PLACEHOLDER_AVAILABLE_TIME.to_string(),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            spot: Spot {
                coordinate,
                available_time,
                user_id,
            },
        }
    }
}

fn format_available_time(at: DateTime<Utc>) -> String {
    at.format(AVAILABLE_TIME_FORMAT).to_string()
}
