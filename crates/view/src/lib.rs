//! Query view for ragview.
//!
//! A single screen: an input field with a submit control, a busy indicator
//! while a question is being answered, and the answer with its collapsible
//! list of source excerpts. This crate holds the screen's state and render
//! contract; frontends (terminal UI, headless command) only draw it.

pub mod controller;
pub mod disclosure;
pub mod notice;
pub mod render;
pub mod state;

pub use controller::{QueryView, EMPTY_QUERY_MESSAGE, ERROR_TITLE, REQUEST_FAILED_MESSAGE};
pub use disclosure::Disclosure;
pub use notice::{Notice, NoticeBoard, Severity};
pub use render::{ExcerptCard, ResultRegion, ViewModel};
pub use state::{QueryState, RequestStatus};
