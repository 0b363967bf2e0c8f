use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

// Import from our modular crates
use rqc_cli::{
    Console, DEFAULT_HISTORY_FILE, IngestHistory, IngestRecord, render_answer, render_citations,
    render_status, render_upload_result,
};
use rqc_client::{RagClient, Submission, UploadWorkflow, parse_optional_json, run_query};
use rqc_core::IngestState;

#[derive(Parser)]
#[command(name = "rqc")]
#[command(about = "Terminal console for a RAG backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a document and track its ingestion to completion
    Ingest {
        /// Path to the document (.pdf, .docx, .txt, .csv, .xlsx)
        file: PathBuf,
        /// JSON metadata stored alongside the document
        #[arg(long)]
        metadata: Option<String>,
        /// Suppress intermediate status lines
        #[arg(long)]
        quiet: bool,
    },
    /// Ask one question and print the answer with its citations
    Query {
        /// The question text
        text: String,
        /// JSON filters narrowing the search
        #[arg(long)]
        filters: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let client = Arc::new(RagClient::from_env()?);

    match cli.command {
        Some(Commands::Ingest {
            file,
            metadata,
            quiet,
        }) => run_ingest(client, &file, metadata.as_deref(), quiet).await,
        Some(Commands::Query { text, filters }) => {
            run_query_once(client, &text, filters.as_deref()).await
        }
        None => {
            let history = IngestHistory::new(DEFAULT_HISTORY_FILE);
            let mut console = Console::new(client, history);
            console.run().await?;
            println!("{}", "Goodbye!".green());
            Ok(())
        }
    }
}

async fn run_ingest(
    client: Arc<RagClient>,
    file: &Path,
    metadata: Option<&str>,
    quiet: bool,
) -> Result<()> {
    // Both validations happen before any request goes out.
    let metadata = parse_optional_json(metadata.unwrap_or(""), "Metadata")?;

    let mut workflow = UploadWorkflow::new(client);
    workflow.select(file)?;
    workflow.set_metadata(metadata);

    let file_name = file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document")
        .to_string();
    let mut history = IngestHistory::new(DEFAULT_HISTORY_FILE);

    match workflow.submit().await? {
        Submission::Completed(response) => {
            if let Some(result) = workflow.last_result() {
                println!("{}", render_upload_result(result));
            }
            history
                .record(IngestRecord::new(
                    file_name,
                    None,
                    IngestState::Completed,
                    response.message,
                ))
                .await?;
            println!("{}", "Ingestion complete.".green());
            Ok(())
        }
        Submission::Queued(mut handle) => {
            while let Some(job) = handle.updates().recv().await {
                if !quiet {
                    println!("{}", render_status(&job).cyan());
                }
            }

            let job = workflow.finish(handle).await?;
            history
                .record(IngestRecord::new(
                    file_name,
                    Some(job.job_id.clone()),
                    job.state,
                    job.message.clone(),
                ))
                .await?;

            if job.state == IngestState::Failed {
                anyhow::bail!("{}", workflow.error().unwrap_or("Ingestion failed"));
            }

            println!("{}", render_status(&job));
            println!("{}", "Ingestion complete.".green());
            Ok(())
        }
    }
}

async fn run_query_once(client: Arc<RagClient>, text: &str, filters: Option<&str>) -> Result<()> {
    let result = run_query(client.as_ref(), text, filters.unwrap_or("")).await?;

    println!("{}", "Answer".cyan().bold());
    println!("{}", render_answer(&result));
    println!();
    println!("{}", "Citations".cyan().bold());
    println!("{}", render_citations(&result.citations));
    Ok(())
}
