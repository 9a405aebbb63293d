//! Process-wide source of implicit identifiers
//!
//! Elements created without a caller-supplied ID get one minted here. The
//! counter starts at zero when the process starts, only ever grows, and is
//! shared by every chart, so two charts built on different threads never
//! receive the same implicit ID.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix reserved for minted identifiers
pub const IMPLICIT_ID_PREFIX: &str = "id";

static NEXT_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_CHART_TAG: AtomicU64 = AtomicU64::new(0);

/// Mint a fresh identifier of the form `id<N>`
///
/// Every call returns a value no earlier call in this process returned.
pub fn next_id() -> String {
    let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{IMPLICIT_ID_PREFIX}{n}")
}

/// Mint the tag a chart stamps into every handle it issues
pub(crate) fn next_chart_tag() -> u64 {
    NEXT_CHART_TAG.fetch_add(1, Ordering::Relaxed)
}

/// Returns true if `id` has the shape of a minted identifier
pub fn is_implicit_id(id: &str) -> bool {
    id.strip_prefix(IMPLICIT_ID_PREFIX)
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}
