//! Request-rate bookkeeping.
//!
//! [`RequestQueue`] wraps a [`SearchServer`] and keeps a sliding window of
//! the most recent [`REQUEST_WINDOW_SIZE`](config::REQUEST_WINDOW_SIZE)
//! requests, one day's worth at one request per minute, counting how many
//! of them returned no documents.

use crate::config;
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::SearchError;
use crate::server::SearchServer;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct QueryResult {
    has_result: bool,
}

/// Sliding window of recent search requests over a borrowed engine.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    /// Creates an empty window over `server`.
    pub fn new(server: &'a SearchServer) -> Self {
        Self {
            server,
            requests: VecDeque::with_capacity(config::REQUEST_WINDOW_SIZE),
            no_result_requests: 0,
        }
    }

    /// Runs a search with status [`DocumentStatus::Actual`] and records it.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>, SearchError> {
        let result = self.server.find_top_documents(raw_query)?;
        self.record(&result);
        Ok(result)
    }

    /// Runs a search with the given status and records it.
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, SearchError> {
        let result = self
            .server
            .find_top_documents_with_status(raw_query, status)?;
        self.record(&result);
        Ok(result)
    }

    /// Runs a search under a caller predicate and records it.
    ///
    /// A query that fails to parse is not recorded in the window.
    pub fn add_find_request_by<F>(
        &mut self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let result = self.server.find_top_documents_by(raw_query, filter)?;
        self.record(&result);
        Ok(result)
    }

    /// Number of empty-result requests currently inside the window.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    fn record(&mut self, docs: &[Document]) {
        if self.requests.len() == config::REQUEST_WINDOW_SIZE {
            if let Some(evicted) = self.requests.pop_front() {
                if !evicted.has_result {
                    self.no_result_requests -= 1;
                }
            }
        }
        // The flag always reflects the actual result.
        let has_result = !docs.is_empty();
        if !has_result {
            self.no_result_requests += 1;
        }
        self.requests.push_back(QueryResult { has_result });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> SearchServer {
        let mut server = SearchServer::new("in the").unwrap();
        server
            .add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        server
    }

    #[test]
    fn test_empty_and_nonempty_requests_counted() {
        let server = corpus();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("ghost").unwrap().is_empty());
        assert_eq!(queue.no_result_requests(), 1);
        assert_eq!(queue.add_find_request("cat").unwrap().len(), 1);
        assert_eq!(queue.no_result_requests(), 1);
    }

    #[test]
    fn test_window_eviction() {
        let server = corpus();
        let mut queue = RequestQueue::new(&server);
        for _ in 0..config::REQUEST_WINDOW_SIZE - 1 {
            queue.add_find_request("ghost").unwrap();
        }
        assert_eq!(queue.no_result_requests(), config::REQUEST_WINDOW_SIZE - 1);

        // Window fills without evicting anything yet.
        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), config::REQUEST_WINDOW_SIZE - 1);

        // The next request evicts the oldest empty-result entry.
        queue.add_find_request("cat").unwrap();
        assert_eq!(queue.no_result_requests(), config::REQUEST_WINDOW_SIZE - 2);
    }

    #[test]
    fn test_failed_parse_is_not_recorded() {
        let server = corpus();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("cat --dog").is_err());
        assert_eq!(queue.no_result_requests(), 0);
    }

    #[test]
    fn test_predicate_and_status_requests() {
        let server = corpus();
        let mut queue = RequestQueue::new(&server);
        queue
            .add_find_request_with_status("cat", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(queue.no_result_requests(), 1);
        queue
            .add_find_request_by("cat", |id, _, _| id == 42)
            .unwrap();
        assert_eq!(queue.no_result_requests(), 1);
    }
}
