//! Single-shot query path

use rqc_core::{Error, QueryBackend, QueryRequest, QueryResult, Result};

use crate::validate::parse_optional_json;

/// Validate and run one query against the backend.
///
/// The query text is trimmed and must be non-empty; the filters text is an
/// optional JSON object forwarded verbatim. Validation failures never reach
/// the transport.
pub async fn run_query<B>(backend: &B, query_text: &str, filters_text: &str) -> Result<QueryResult>
where
    B: QueryBackend,
{
    let query = query_text.trim();
    if query.is_empty() {
        return Err(Error::InvalidInput("Query must not be empty".to_string()));
    }

    let filters = parse_optional_json(filters_text, "Filters")?;

    let request = QueryRequest {
        query: query.to_string(),
        filters,
    };
    backend.query(&request).await
}
