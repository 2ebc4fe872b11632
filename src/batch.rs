//! Parallel fan-out over whole queries.
//!
//! Where [`ExecutionMode::Parallel`](crate::server::ExecutionMode)
//! parallelizes inside a single query, these helpers run many independent
//! queries across the rayon pool at once.

use crate::document::Document;
use crate::error::SearchError;
use crate::server::SearchServer;
use rayon::prelude::*;

/// Runs every query against `server`, returning per-query top documents in
/// input order. The first parse failure fails the whole batch.
pub fn process_queries<S>(
    server: &SearchServer,
    queries: &[S],
) -> Result<Vec<Vec<Document>>, SearchError>
where
    S: AsRef<str> + Sync,
{
    queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect()
}

/// Like [`process_queries`], flattened into one result list in query order.
pub fn process_queries_joined<S>(
    server: &SearchServer,
    queries: &[S],
) -> Result<Vec<Document>, SearchError>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
