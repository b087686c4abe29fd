mod metrics;
mod models;
mod repository;
mod sessions;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Records kept in the document store
pub use models::{Coordinate, CoordinateError, ParkingSpot, Spot, User, PLACEHOLDER_AVAILABLE_TIME};

// Persistence abstractions
pub use repository::{Repository, RepositoryError, RepositoryPtr};
pub use sessions::{SessionRecord, SessionStore, SessionStorePtr};
