//! Ask command handler.
//!
//! One-shot, non-interactive submit: the same query view as the terminal UI,
//! printed to stdout instead of drawn.

use clap::Args;
use ragview_client::{create_client, QueryService};
use ragview_core::{config::AppConfig, AppError, AppResult};
use ragview_view::QueryView;
use std::path::PathBuf;
use std::time::Instant;

/// Ask the knowledge base a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Expand the source documents and every excerpt
    #[arg(short, long)]
    pub sources: bool,

    /// Output the raw response as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let client = create_client(&config.endpoint)?;
        self.run(client.as_ref(), config).await
    }

    async fn run(&self, service: &dyn QueryService, config: &AppConfig) -> AppResult<()> {
        let question = self.get_question()?;

        let mut view = QueryView::new(config.notices);
        view.query_mut().set(question);

        if let Err(e) = view.submit(service).await {
            if e.is_recoverable() {
                for notice in view.view(Instant::now()).notices {
                    eprintln!("{}: {}", notice.title, notice.description);
                }
            }
            return Err(e);
        }

        if self.json {
            let response = view
                .result()
                .ok_or_else(|| AppError::Other("No result after submit".to_string()))?;
            let json = serde_json::to_string_pretty(response)?;
            println!("{}", json);
            return Ok(());
        }

        let lines = self.render(&view);
        println!("{}", lines.join("\n"));
        Ok(())
    }

    fn render(&self, view: &QueryView) -> Vec<String> {
        view.view(Instant::now())
            .result
            .map(|result| result.to_text_lines(self.sources))
            .unwrap_or_default()
    }

    /// Get the question from the positional argument or `--file`.
    ///
    /// The text is passed through untouched; blank input is left for the view
    /// to reject.
    fn get_question(&self) -> AppResult<String> {
        if let Some(question) = &self.question {
            return Ok(question.clone());
        }

        match &self.file {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read question file {:?}: {}", path, e))
            }),
            None => Ok(String::new()),
        }
    }
}
