//! Tests for core types: merge semantics and wire shapes

use serde_json::json;

use crate::types::*;

#[test]
fn terminal_states() {
    assert!(!IngestState::Queued.is_terminal());
    assert!(!IngestState::Processing.is_terminal());
    assert!(IngestState::Completed.is_terminal());
    assert!(IngestState::Failed.is_terminal());
}

#[test]
fn state_serializes_lowercase() {
    assert_eq!(serde_json::to_value(IngestState::Queued).unwrap(), json!("queued"));
    assert_eq!(serde_json::to_value(IngestState::Processing).unwrap(), json!("processing"));
    assert_eq!(serde_json::to_value(IngestState::Completed).unwrap(), json!("completed"));
    assert_eq!(serde_json::to_value(IngestState::Failed).unwrap(), json!("failed"));
}

#[test]
fn merge_overwrites_present_fields_and_retains_absent_ones() {
    let mut job = IngestJob::new("job-42");
    assert_eq!(job.state, IngestState::Queued);

    job.apply(&StatusReport {
        state: IngestState::Processing,
        progress: Some(10.0),
        message: None,
    });
    assert_eq!(job.state, IngestState::Processing);
    assert_eq!(job.progress, Some(10.0));
    assert_eq!(job.message, None);

    job.apply(&StatusReport {
        state: IngestState::Processing,
        progress: Some(55.0),
        message: None,
    });
    assert_eq!(job.progress, Some(55.0));

    // Final report omits progress; the previous value must survive.
    job.apply(&StatusReport {
        state: IngestState::Completed,
        progress: None,
        message: Some("done".to_string()),
    });
    assert_eq!(job.job_id, "job-42");
    assert_eq!(job.state, IngestState::Completed);
    assert_eq!(job.progress, Some(55.0));
    assert_eq!(job.message.as_deref(), Some("done"));
}

#[test]
fn merge_never_touches_the_job_id() {
    let mut job = IngestJob::new("original");
    job.apply(&StatusReport {
        state: IngestState::Failed,
        progress: None,
        message: Some("boom".to_string()),
    });
    assert_eq!(job.job_id, "original");
}

#[test]
fn upload_response_preserves_unknown_fields() {
    let response: UploadResponse = serde_json::from_value(json!({
        "jobId": "j1",
        "message": "accepted",
        "chunks": 3,
        "collection": "docs"
    }))
    .unwrap();

    assert_eq!(response.job_id.as_deref(), Some("j1"));
    assert_eq!(response.message.as_deref(), Some("accepted"));
    assert_eq!(response.extra.get("chunks"), Some(&json!(3)));
    assert_eq!(response.extra.get("collection"), Some(&json!("docs")));
}

#[test]
fn upload_response_without_job_id() {
    let response: UploadResponse = serde_json::from_value(json!({ "message": "ok" })).unwrap();
    assert_eq!(response.job_id, None);
    assert_eq!(response.message.as_deref(), Some("ok"));
    assert!(response.extra.is_empty());
}

#[test]
fn query_request_omits_absent_filters() {
    let request = QueryRequest {
        query: "what is rust".to_string(),
        filters: None,
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "query": "what is rust" })
    );

    let request = QueryRequest {
        query: "what is rust".to_string(),
        filters: Some(json!({ "sourceType": "pdf" })),
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "query": "what is rust", "filters": { "sourceType": "pdf" } })
    );
}

#[test]
fn query_result_defaults_citations_to_empty() {
    let result: QueryResult = serde_json::from_value(json!({ "answer": "Paris" })).unwrap();
    assert_eq!(result.answer.as_deref(), Some("Paris"));
    assert!(result.citations.is_empty());
}

#[test]
fn citations_keep_backend_order_verbatim() {
    let result: QueryResult = serde_json::from_value(json!({
        "answer": "Paris",
        "citations": [
            { "source": "doc2", "snippet": "second" },
            { "source": "doc1", "uri": "http://x", "snippet": "first" },
            { "source": "doc2", "snippet": "second" }
        ]
    }))
    .unwrap();

    // Order preserved, duplicates untouched.
    assert_eq!(result.citations.len(), 3);
    assert_eq!(result.citations[0].source.as_deref(), Some("doc2"));
    assert_eq!(result.citations[1].uri.as_deref(), Some("http://x"));
    assert_eq!(result.citations[0], result.citations[2]);
}
