//! Render contract of the query view.
//!
//! [`QueryView::view`] turns controller state into a toolkit-independent
//! [`ViewModel`]. Region visibility rules live here and nowhere else; the
//! terminal UI and the headless command only draw what they are given.

use crate::controller::QueryView;
use crate::notice::Severity;
use serde::Serialize;
use std::time::Instant;

pub const INPUT_PLACEHOLDER: &str = "Enter your question...";
pub const SUBMIT_LABEL: &str = "Search";
pub const BUSY_CAPTION: &str = "Processing your query...";
pub const ANSWER_HEADING: &str = "Answer:";
pub const SOURCES_TITLE: &str = "Source Documents";

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub input: InputRegion,
    /// Present iff a request is in flight
    pub status: Option<StatusRegion>,
    /// Present iff a result exists and no request is in flight
    pub result: Option<ResultRegion>,
    pub notices: Vec<NoticeView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRegion {
    pub text: String,
    pub cursor: usize,
    pub placeholder: &'static str,
    pub submit_label: &'static str,
    /// Submit control shows a busy affordance; the field stays editable
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRegion {
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRegion {
    pub answer_heading: &'static str,
    /// Answer split on embedded line breaks, preserved verbatim
    pub answer_lines: Vec<String>,
    pub sources: SourcesDisclosure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesDisclosure {
    pub title: &'static str,
    pub open: bool,
    /// One card per excerpt, in received order
    pub cards: Vec<ExcerptCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcerptCard {
    /// `File: <filename>`
    pub label: String,
    /// `<filepath> · chunk <index> · score <score>`
    pub detail: String,
    pub text_lines: Vec<String>,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeView {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

fn preformatted(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

impl QueryView {
    /// Build the view model for the current state.
    pub fn view(&self, now: Instant) -> ViewModel {
        let in_flight = self.status().is_in_flight();

        let input = InputRegion {
            text: self.query().text().to_string(),
            cursor: self.query().cursor(),
            placeholder: INPUT_PLACEHOLDER,
            submit_label: SUBMIT_LABEL,
            busy: in_flight,
        };

        let status = in_flight.then_some(StatusRegion {
            caption: BUSY_CAPTION,
        });

        let result = match self.result() {
            Some(response) if !in_flight => {
                let disclosure = self.disclosure();
                let cards = response
                    .source_chunks
                    .iter()
                    .enumerate()
                    .map(|(i, chunk)| ExcerptCard {
                        label: format!("File: {}", chunk.filename),
                        detail: format!(
                            "{} · chunk {} · score {:.3}",
                            chunk.filepath, chunk.chunk_index, chunk.score
                        ),
                        text_lines: preformatted(&chunk.chunk),
                        open: disclosure.is_item_open(i),
                    })
                    .collect();

                Some(ResultRegion {
                    answer_heading: ANSWER_HEADING,
                    answer_lines: preformatted(&response.answer),
                    sources: SourcesDisclosure {
                        title: SOURCES_TITLE,
                        open: disclosure.is_section_open(),
                        cards,
                    },
                })
            }
            _ => None,
        };

        let notices = self
            .notices()
            .active(now)
            .map(|n| NoticeView {
                title: n.title.clone(),
                description: n.description.clone(),
                severity: n.severity,
            })
            .collect();

        ViewModel {
            input,
            status,
            result,
            notices,
        }
    }
}

impl ResultRegion {
    /// Plain-text rendition for non-interactive output.
    ///
    /// With `expand_sources` the disclosure is drawn open regardless of its
    /// state; otherwise only its header is shown when collapsed.
    pub fn to_text_lines(&self, expand_sources: bool) -> Vec<String> {
        let mut lines = vec![self.answer_heading.to_string()];
        lines.extend(self.answer_lines.iter().cloned());
        lines.push(String::new());

        let open = expand_sources || self.sources.open;
        let marker = if open { "▾" } else { "▸" };
        lines.push(format!(
            "{} {} ({})",
            marker,
            self.sources.title,
            self.sources.cards.len()
        ));

        if open {
            for card in &self.sources.cards {
                lines.push(String::new());
                lines.push(format!("  {}", card.label));
                if expand_sources || card.open {
                    lines.push(format!("  {}", card.detail));
                    lines.extend(card.text_lines.iter().map(|l| format!("    {}", l)));
                }
            }
        }

        lines
    }
}
