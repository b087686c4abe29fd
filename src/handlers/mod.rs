// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod auth;
mod client;
mod extract;
mod health;
mod metrics;
mod parking;

// Core handlers
pub use health::health_check;
pub use metrics::{metrics_handler, track_http_metrics};

// Client shell and catch-all
pub use client::{client_shell, fallback, index};

// Account handlers
pub use auth::{login, signup};

// Parking-spot handlers
pub use parking::{create_spot, list_spots};
