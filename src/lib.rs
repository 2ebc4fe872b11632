//! # textsearch
//!
//! Embeddable in-memory full-text search engine for short documents, with
//! TF-IDF ranking, minus-word exclusion, predicate filtering, and an
//! optional rayon-backed parallel execution mode.
//!
//! Documents carry an integer id, a status tag, and an averaged rating;
//! queries are free text where a leading `-` excludes a word. Searches
//! return the top five most relevant documents.

/// Parallel fan-out over whole queries.
pub mod batch;
/// Tuning constants: result limits, relevance tolerance, shard count.
pub mod config;
/// Sharded relevance accumulator used by the parallel ranking path.
pub mod concurrent_map;
/// Duplicate-document detection over the forward index.
pub mod dedup;
/// Core result types: `Document`, `DocumentId`, and `DocumentStatus`.
pub mod document;
/// Error types for the engine surface.
pub mod error;
/// Inverted and forward indices.
pub mod index;
/// Query parsing: plus-words, minus-words, stop-word filtering.
pub mod query;
/// Sliding-window request-rate bookkeeping.
pub mod request_queue;
/// The search engine: document store, indexing, ranking, matching.
pub mod server;
/// Stop-word set shared by indexing and query parsing.
pub mod stopwords;
/// ASCII-space tokenizer producing borrowed slices.
pub mod tokenizer;

pub use batch::{process_queries, process_queries_joined};
pub use dedup::remove_duplicates;
pub use document::{Document, DocumentId, DocumentStatus};
pub use error::SearchError;
pub use query::Query;
pub use request_queue::RequestQueue;
pub use server::{ExecutionMode, SearchServer};
pub use stopwords::StopWordSet;
