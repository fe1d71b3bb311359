//! Tui command handler.

use crate::tui;
use clap::Args;
use ragview_client::create_client;
use ragview_core::{config::AppConfig, AppError, AppResult};

/// Open the interactive query screen
#[derive(Args, Debug, Default)]
pub struct TuiCommand {
    /// Pre-fill the input field
    #[arg(short, long)]
    pub query: Option<String>,
}

impl TuiCommand {
    /// Execute the tui command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing tui command");

        let client = create_client(&config.endpoint)?;
        tui::run(client, config.notices, self.query.clone())
            .await
            .map_err(|e| AppError::Terminal(e.to_string()))
    }
}
