//! Plain-text rendering of query results and job status
//!
//! Every function returns an uncolored `String`; callers decide where and in
//! which color to print it.

use rqc_core::{Citation, IngestJob, QueryResult};

pub const NO_ANSWER: &str = "No answer returned";
pub const NO_CITATIONS: &str = "No citations returned";
const UNKNOWN_SOURCE: &str = "Unknown Source";

/// The answer text, or a placeholder when the backend returned none
pub fn render_answer(result: &QueryResult) -> String {
    result
        .answer
        .clone()
        .unwrap_or_else(|| NO_ANSWER.to_string())
}

/// Numbered citation list in backend order.
///
/// Each entry shows the source label (or a placeholder), then the URI and
/// snippet when present. An empty list renders the placeholder line.
pub fn render_citations(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return NO_CITATIONS.to_string();
    }

    let mut out = String::new();
    for (index, citation) in citations.iter().enumerate() {
        let source = citation.source.as_deref().unwrap_or(UNKNOWN_SOURCE);
        out.push_str(&format!("{}. {}\n", index + 1, source));
        if let Some(uri) = &citation.uri {
            out.push_str(&format!("   {}\n", uri));
        }
        if let Some(snippet) = &citation.snippet {
            out.push_str(&format!("   {}\n", snippet));
        }
    }
    out.trim_end().to_string()
}

/// One-line job status: state, progress when known, message when present
pub fn render_status(job: &IngestJob) -> String {
    let mut line = format!("Status: {}", job.state);
    if let Some(progress) = job.progress {
        line.push_str(&format!(" ({}%)", progress));
    }
    if let Some(message) = &job.message {
        line.push_str(&format!(" - {}", message));
    }
    line.push_str(&format!(" • Job: {}", job.job_id));
    line
}

/// Pretty-printed JSON block for the last upload result panel
pub fn render_upload_result(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Human-readable byte count with one decimal place, trailing zero trimmed
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 10.0).round() / 10.0;

    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        format!("{:.1} {}", rounded, UNITS[exponent])
    }
}
