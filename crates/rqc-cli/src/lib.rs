//! Terminal front end for the RAG backend client
//!
//! Renders answers, citations, and job status lines, keeps a persistent
//! ingest history, and runs the interactive console with its sources and
//! query screens.

mod console;
mod history;
mod render;
mod theme;
mod ui;


pub use console::{Console, Screen};
pub use history::{DEFAULT_HISTORY_FILE, IngestHistory, IngestRecord};
pub use render::{
    NO_ANSWER, NO_CITATIONS, format_bytes, render_answer, render_citations, render_status,
    render_upload_result,
};
pub use theme::Theme;
pub use ui::{confirm, display_banner, print_alert, print_help, read_input, read_plain};

// Re-export core types for convenience
pub use rqc_core::{Error, Result};
