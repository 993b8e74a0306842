//! Page-count arithmetic for paginated listings
//!
//! Top-level listings and nested relation lookups deliberately disagree on
//! the zero-count case: an empty resource still produces a header-only
//! report file, so its page loop runs once, while a parent with zero
//! related items must not trigger any relation fetch beyond the count
//! probe that already happened.

/// Pages to fetch for a top-level resource listing (never less than 1)
pub fn pages_needed(total_count: u64, page_size: u32) -> u64 {
    total_count.div_ceil(page_size as u64).max(1)
}

/// Pages to fetch for a nested relation lookup (0 means skip entirely)
pub fn relation_pages_needed(total_count: u64, page_size: u32) -> u64 {
    total_count.div_ceil(page_size as u64)
}
