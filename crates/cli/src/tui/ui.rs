//! Drawing of the query screen.

use super::app::App;
use super::keys::Focus;
use ragview_view::render::{InputRegion, NoticeView, ResultRegion};
use ragview_view::Severity;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

const TITLE: &str = "RAG Query System";
const HELP: &str =
    "Enter: search │ Tab: focus │ Space: expand │ ↑↓ PgUp/PgDn: scroll │ Esc: dismiss │ Ctrl+C: quit";
const BUTTON_WIDTH: u16 = 14;
const NOTICE_WIDTH: u16 = 48;

pub fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let model = app.view.view(now);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
        .split(chunks[1]);

    draw_input(frame, &model.input, app.focus == Focus::Input, input_row[0]);
    draw_button(frame, app, &model.input, input_row[1]);
    app.submit_area = Some(input_row[1]);

    let body = chunks[2];
    if let Some(status) = &model.status {
        let line = Line::from(vec![
            Span::styled(
                app.spinner.current_frame(),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" "),
            Span::raw(status.caption),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, body);
        app.max_scroll = 0;
    } else if let Some(result) = &model.result {
        let paragraph = Paragraph::new(result_lines(result, app.focus)).wrap(Wrap { trim: false });

        // Rows after wrapping, counted without the border
        let inner_width = body.width.saturating_sub(2).max(1);
        let inner_height = body.height.saturating_sub(2) as usize;
        let rendered = paragraph.line_count(inner_width);
        app.max_scroll = u16::try_from(rendered.saturating_sub(inner_height)).unwrap_or(u16::MAX);
        app.scroll = app.scroll.min(app.max_scroll);

        let paragraph = paragraph
            .block(Block::default().borders(Borders::ALL))
            .scroll((app.scroll, 0));
        frame.render_widget(paragraph, body);
    } else {
        frame.render_widget(Block::default().borders(Borders::ALL), body);
        app.max_scroll = 0;
    }

    let help = Paragraph::new(Line::from(Span::styled(
        HELP,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, chunks[3]);

    draw_notices(frame, &model.notices, body);
}

fn draw_input(frame: &mut Frame, input: &InputRegion, focused: bool, area: Rect) {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let (visible, cursor_column) = input_window(&input.text, input.cursor, inner_width);

    let line = if input.text.is_empty() {
        Line::from(Span::styled(
            input.placeholder,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(visible)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        let x = area.x + 1 + cursor_column as u16;
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// Visible tail of the input and the cursor's display column within it.
///
/// Leading characters are dropped until the cursor fits in `inner_width`
/// columns. Widths are display columns, so wide characters count double.
fn input_window(text: &str, cursor: usize, inner_width: usize) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let columns = |range: &[char]| Span::raw(range.iter().collect::<String>()).width();

    let mut start = 0;
    while start < cursor && columns(&chars[start..cursor]) + 1 > inner_width {
        start += 1;
    }

    (chars[start..].iter().collect(), columns(&chars[start..cursor]))
}

fn draw_button(frame: &mut Frame, app: &App, input: &InputRegion, area: Rect) {
    let focused = app.focus == Focus::SubmitButton;
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let label = if input.busy {
        format!("{} {}", app.spinner.current_frame(), input.submit_label)
    } else {
        input.submit_label.to_string()
    };

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn result_lines(result: &ResultRegion, focus: Focus) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        result.answer_heading,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(result.answer_lines.iter().map(|l| Line::from(l.clone())));
    lines.push(Line::default());

    let sources = &result.sources;
    let marker = if sources.open { "▾" } else { "▸" };
    lines.push(Line::from(Span::styled(
        format!("{} {} ({})", marker, sources.title, sources.cards.len()),
        focus_style(focus == Focus::SourcesHeader).add_modifier(Modifier::BOLD),
    )));

    if !sources.open {
        return lines;
    }

    for (i, card) in sources.cards.iter().enumerate() {
        let marker = if card.open { "▾" } else { "▸" };
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("  {} {}", marker, card.label),
            focus_style(focus == Focus::Card(i)).fg(Color::Yellow),
        )));
        if card.open {
            lines.push(Line::from(Span::styled(
                format!("    {}", card.detail),
                Style::default().fg(Color::DarkGray),
            )));
            lines.extend(
                card.text_lines
                    .iter()
                    .map(|l| Line::from(format!("    {}", l))),
            );
        }
    }

    lines
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
    }
}

/// Stack notices in the top-right corner of `area`, newest last.
fn draw_notices(frame: &mut Frame, notices: &[NoticeView], area: Rect) {
    let width = NOTICE_WIDTH.min(area.width);
    let height = 3;
    let x = area.x + area.width - width;

    for (i, notice) in notices.iter().enumerate() {
        let y = area.y + i as u16 * height;
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, height);
        let color = severity_color(notice.severity);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!("{} {}", notice.severity.icon(), notice.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(notice.description.clone()).block(block), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragview_client::{QueryResponse, SourceChunk};
    use ragview_core::config::NoticeConfig;
    use ragview_core::AppError;
    use ragview_view::{EMPTY_QUERY_MESSAGE, REQUEST_FAILED_MESSAGE};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let now = Instant::now();
        terminal.draw(|frame| draw(frame, app, now)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn refund() -> QueryResponse {
        QueryResponse {
            answer: "Refunds within 30 days.".to_string(),
            source_chunks: vec![SourceChunk {
                chunk: "Policy text...".to_string(),
                filename: "policy.md".to_string(),
                filepath: "/docs/policy.md".to_string(),
                chunk_index: 0,
                score: 0.92,
            }],
        }
    }

    #[test]
    fn test_initial_screen() {
        let mut app = App::new(NoticeConfig::default());
        let screen = render(&mut app);
        assert!(screen.contains(TITLE));
        assert!(screen.contains("Enter your question..."));
        assert!(screen.contains("Search"));
        assert!(!screen.contains("Answer:"));
        assert!(app.submit_area.is_some());
    }

    #[test]
    fn test_busy_screen() {
        let mut app = App::new(NoticeConfig::default());
        app.view.query_mut().set("What is the refund policy?");
        app.view.begin_submit(Instant::now()).unwrap();

        let screen = render(&mut app);
        assert!(screen.contains("Processing your query..."));
        assert!(screen.contains("What is the refund policy?"));
        assert!(!screen.contains("Answer:"));
    }

    #[test]
    fn test_result_collapsed_then_expanded() {
        let mut app = App::new(NoticeConfig::default());
        app.settle(Ok(refund()), Instant::now());

        let screen = render(&mut app);
        assert!(screen.contains("Answer:"));
        assert!(screen.contains("Refunds within 30 days."));
        assert!(screen.contains("▸ Source Documents (1)"));
        assert!(!screen.contains("File: policy.md"));

        app.view.disclosure_mut().toggle_section();
        let screen = render(&mut app);
        assert!(screen.contains("▾ Source Documents (1)"));
        assert!(screen.contains("File: policy.md"));
        assert!(screen.contains("Policy text..."));
        assert!(screen.contains("/docs/policy.md · chunk 0 · score 0.920"));
    }

    #[test]
    fn test_input_window_counts_display_columns() {
        assert_eq!(input_window("abc", 3, 20), ("abc".to_string(), 3));
        assert_eq!(input_window("你好世界", 4, 20), ("你好世界".to_string(), 8));
        assert_eq!(input_window("你好世界", 2, 20), ("你好世界".to_string(), 4));

        // Narrow field: scrolls so the cursor stays inside
        let (visible, column) = input_window("你好世界", 4, 5);
        assert_eq!(visible, "世界");
        assert_eq!(column, 4);

        let (visible, column) = input_window("abcdefgh", 8, 5);
        assert_eq!(visible, "efgh");
        assert_eq!(column, 4);
    }

    #[test]
    fn test_end_of_wrapped_answer_reachable() {
        let word = "x".repeat(60);
        let mut answer: Vec<String> = (0..20)
            .map(|_| format!("{} {} {}", word, word, word))
            .collect();
        answer.push("THE-END".to_string());

        let mut app = App::new(NoticeConfig::default());
        app.settle(
            Ok(QueryResponse {
                answer: answer.join("\n"),
                source_chunks: vec![],
            }),
            Instant::now(),
        );

        let screen = render(&mut app);
        assert!(!screen.contains("THE-END"));

        app.scroll = app.max_scroll;
        let screen = render(&mut app);
        assert!(screen.contains("THE-END"));
        assert!(screen.contains("▸ Source Documents (0)"));
    }

    #[test]
    fn test_notices_drawn() {
        let mut app = App::new(NoticeConfig::default());
        app.apply(super::super::keys::Action::Submit, Instant::now());
        let screen = render(&mut app);
        assert!(screen.contains(EMPTY_QUERY_MESSAGE));

        app.view.query_mut().set("q");
        app.view.begin_submit(Instant::now()).unwrap();
        app.settle(
            Err(AppError::RequestFailed("refused".to_string())),
            Instant::now(),
        );
        let screen = render(&mut app);
        assert!(screen.contains(REQUEST_FAILED_MESSAGE));
    }
}
