//! Pagination utilities for service layer
//!
//! `GET /products` takes raw `limit`/`offset` strings; anything unparsable
//! counts as 0 and the result is clamped into a [`ListWindow`].

/// Largest page a single list call may return; also the fallback page size.
pub const MAX_LIMIT: u64 = 10;

/// Normalized `(offset, limit)` pair for a list query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListWindow {
    pub offset: u64,
    pub limit: u64,
}

impl ListWindow {
    /// Parse raw query values, treating absent or malformed input as 0.
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Self {
        Self::normalize(parse_or_zero(limit), parse_or_zero(offset))
    }

    /// A limit outside `1..=MAX_LIMIT` becomes `MAX_LIMIT`; a negative offset becomes 0.
    pub fn normalize(limit: i64, offset: i64) -> Self {
        let limit = if (1..=MAX_LIMIT as i64).contains(&limit) { limit as u64 } else { MAX_LIMIT };
        let offset = offset.max(0) as u64;
        Self { offset, limit }
    }
}

impl Default for ListWindow {
    fn default() -> Self { Self { offset: 0, limit: MAX_LIMIT } }
}

fn parse_or_zero(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0)
}
