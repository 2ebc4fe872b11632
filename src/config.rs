//! Global configuration constants for textsearch.
//!
//! Tuning parameters and fixed limits live here; everything else is supplied
//! by the caller at construction time.

/// Maximum number of documents returned by a single search.
pub const MAX_RESULT_COUNT: usize = 5;

/// Tolerance for comparing relevance values.
///
/// Two documents whose relevance differs by less than this are considered
/// tied and are ordered by rating instead. Also the documented accuracy of
/// the parallel execution mode relative to the sequential one.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Number of shards in the concurrent relevance accumulator.
///
/// Should be at least the number of worker threads so that independent
/// document ids rarely contend on the same lock.
pub const DEFAULT_SHARD_COUNT: usize = 20;

/// Capacity of the request-rate sliding window.
///
/// One day's worth of requests at one request per minute.
pub const REQUEST_WINDOW_SIZE: usize = 1440;
