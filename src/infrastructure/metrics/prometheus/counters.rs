use metrics::{counter, histogram};
use std::time::Instant;

/// Increment the counter of accounts created through `/signup`.
pub fn increment_user_created() {
    counter!("repark_users_created_total").increment(1);
}

/// Increment the login counter, labelled by outcome.
pub fn increment_login(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("repark_logins_total", "outcome" => outcome).increment(1);
}

/// Increment the counter of parking-spot postings.
pub fn increment_spot_created() {
    counter!("repark_spots_created_total").increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
