//! Interactive console with a sources screen and a query screen

use std::path::Path;
use std::sync::Arc;

use colored::*;

use rqc_client::{PollConfig, Submission, UploadWorkflow, parse_optional_json, run_query};
use rqc_core::{IngestBackend, IngestState, QueryBackend, Result};

use crate::history::{IngestHistory, IngestRecord};
use crate::render::{
    format_bytes, render_answer, render_citations, render_status, render_upload_result,
};
use crate::theme::Theme;
use crate::ui;

/// Which screen the console is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Sources,
    Query,
}

/// Interactive session over one backend.
///
/// Commands switch screens and toggle the theme; anything else is input for
/// the current screen. Errors print as alerts and leave the console running.
pub struct Console<B>
where
    B: IngestBackend + QueryBackend + 'static,
{
    backend: Arc<B>,
    workflow: UploadWorkflow<B>,
    history: IngestHistory,
    theme: Theme,
    screen: Screen,
    input_history: Vec<String>,
}

impl<B> Console<B>
where
    B: IngestBackend + QueryBackend + 'static,
{
    pub fn new(backend: Arc<B>, history: IngestHistory) -> Self {
        let workflow = UploadWorkflow::with_poll_config(backend.clone(), PollConfig::default());
        Self {
            backend,
            workflow,
            history,
            theme: Theme::default(),
            screen: Screen::Sources,
            input_history: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Run the read-dispatch loop until `exit`/`quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        ui::display_banner(&self.theme);
        self.show_sources();

        loop {
            let label = match self.screen {
                Screen::Sources => "rqc:sources",
                Screen::Query => "rqc:query",
            };
            let Some(input) = ui::read_input(label, &self.theme, &mut self.input_history).await?
            else {
                break;
            };
            let input = input.trim();

            match input {
                "" => continue,
                "exit" | "quit" => break,
                "help" => ui::print_help(),
                "theme" => {
                    self.theme.toggle();
                    println!("Theme: {}", self.theme.name());
                }
                "sources" => {
                    self.screen = Screen::Sources;
                    self.show_sources();
                }
                "query" => {
                    self.screen = Screen::Query;
                    println!("{}", "Ask a question; Enter on an empty line does nothing.".dimmed());
                }
                _ => {
                    let outcome = match self.screen {
                        Screen::Sources => self.handle_upload(input).await,
                        Screen::Query => self.handle_query(input).await,
                    };
                    if let Err(err) = outcome {
                        ui::print_alert(&self.theme, &err.to_string());
                        let _ = self.workflow.reset();
                    }
                }
            }
        }

        Ok(())
    }

    /// Sources screen header: the last recorded ingestion, if any
    fn show_sources(&self) {
        println!("{}", "Sources".color(self.theme.accent()).bold());
        match self.history.last() {
            Some(record) => {
                let job = record
                    .job_id
                    .as_deref()
                    .map(|id| format!(" • Job: {}", id))
                    .unwrap_or_default();
                println!(
                    "Last upload: {} ({}){}",
                    record.file_name, record.state, job
                );
            }
            None => println!("No uploads recorded yet."),
        }
        println!("{}", "Enter a file path to upload a document.".dimmed());
    }

    /// Drive one document from path input through upload and tracking
    async fn handle_upload(&mut self, path_text: &str) -> Result<()> {
        let path = Path::new(path_text);
        self.workflow.select(path)?;

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path_text)
            .to_string();
        match std::fs::metadata(path) {
            Ok(meta) => println!("Selected {} ({})", file_name, format_bytes(meta.len())),
            Err(_) => println!("Selected {}", file_name),
        }

        let metadata_text = ui::read_plain("Metadata JSON (optional)")?;
        let metadata = parse_optional_json(&metadata_text, "Metadata")?;
        self.workflow.set_metadata(metadata);

        if !ui::confirm("Upload this document?")? {
            self.workflow.reset()?;
            println!("Upload cancelled.");
            return Ok(());
        }

        match self.workflow.submit().await? {
            Submission::Completed(response) => {
                println!(
                    "{}",
                    "Ingested without a tracking job.".color(self.theme.success())
                );
                if let Some(result) = self.workflow.last_result() {
                    println!("{}", render_upload_result(result));
                }
                self.history
                    .record(IngestRecord::new(
                        file_name,
                        None,
                        IngestState::Completed,
                        response.message,
                    ))
                    .await?;
            }
            Submission::Queued(mut handle) => {
                while let Some(job) = handle.updates().recv().await {
                    println!("{}", render_status(&job).color(self.theme.accent()));
                }

                let job = self.workflow.finish(handle).await?;
                if job.state == IngestState::Failed {
                    let message = self.workflow.error().unwrap_or("Ingestion failed");
                    ui::print_alert(&self.theme, message);
                } else {
                    println!("{}", "Ingestion complete.".color(self.theme.success()));
                }
                self.history
                    .record(IngestRecord::new(
                        file_name,
                        Some(job.job_id.clone()),
                        job.state,
                        job.message,
                    ))
                    .await?;
            }
        }

        Ok(())
    }

    /// Run one question through the backend and print the rendered result
    async fn handle_query(&mut self, question: &str) -> Result<()> {
        let filters_text = ui::read_plain("Filters JSON (optional)")?;
        let result = run_query(self.backend.as_ref(), question, &filters_text).await?;

        println!();
        println!("{}", "Answer".color(self.theme.accent()).bold());
        println!("{}", render_answer(&result));
        println!();
        println!("{}", "Citations".color(self.theme.accent()).bold());
        println!("{}", render_citations(&result.citations));
        println!();

        Ok(())
    }
}
