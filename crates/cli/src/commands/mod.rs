//! Command handlers for the ragview CLI.

pub mod ask;
pub mod tui;

pub use ask::AskCommand;
pub use tui::TuiCommand;
