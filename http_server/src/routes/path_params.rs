use actix_web::HttpResponse;

/// Splits a `left&right` path segment at its last `&`. Both halves must be
/// non-empty.
pub fn split_pair(segment: &str) -> Option<(&str, &str)> {
    segment
        .rsplit_once('&')
        .filter(|(left, right)| !left.is_empty() && !right.is_empty())
}

/// Parses a coordinate, falling back to `0.0` on malformed input.
// TODO: reject malformed coordinates with a 400 once existing clients stop sending them.
pub fn parse_coordinate(raw: &str) -> f64 {
    raw.parse::<f64>().unwrap_or_else(|_| {
        tracing::warn!("Could not parse coordinate {raw:?}, storing 0.0");
        0.0
    })
}

/// Segments missing their `&` separator do not match any route.
pub fn unmatched() -> HttpResponse {
    HttpResponse::NotFound().finish()
}
