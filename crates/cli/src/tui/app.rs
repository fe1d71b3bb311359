//! Terminal-side state wrapped around the query view.
//!
//! [`App`] adds what only a terminal needs: keyboard focus, the scroll offset
//! of the result pane, the spinner and the last drawn position of the Search
//! button. Everything about the query itself lives in [`QueryView`].

use super::keys::{map_key, Action, Focus};
use super::spinner::Spinner;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ragview_client::{QueryRequest, QueryResponse};
use ragview_core::config::NoticeConfig;
use ragview_core::AppResult;
use ragview_view::QueryView;
use ratatui::layout::{Position, Rect};
use std::time::Instant;

const PAGE_LINES: u16 = 10;

pub struct App {
    pub view: QueryView,
    pub focus: Focus,
    /// First visible line of the result pane
    pub scroll: u16,
    /// Largest useful scroll offset, updated on every draw
    pub max_scroll: u16,
    pub spinner: Spinner,
    /// Where the Search button was last drawn
    pub submit_area: Option<Rect>,
    pub should_quit: bool,
}

impl App {
    pub fn new(notices: NoticeConfig) -> Self {
        Self {
            view: QueryView::new(notices),
            focus: Focus::Input,
            scroll: 0,
            max_scroll: 0,
            spinner: Spinner::new(),
            submit_area: None,
            should_quit: false,
        }
    }

    /// Handle a key press. Returns the request to send if one was accepted.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<QueryRequest> {
        let action = map_key(key, self.focus);
        self.apply(action, now)
    }

    /// Handle a mouse event. A left click on the Search button submits.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> Option<QueryRequest> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .submit_area
                    .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
                if hit {
                    self.focus = Focus::SubmitButton;
                    return self.apply(Action::Submit, now);
                }
                None
            }
            MouseEventKind::ScrollUp => self.apply(Action::ScrollUp, now),
            MouseEventKind::ScrollDown => self.apply(Action::ScrollDown, now),
            _ => None,
        }
    }

    pub fn apply(&mut self, action: Action, now: Instant) -> Option<QueryRequest> {
        match action {
            Action::Insert(c) => self.view.query_mut().insert_char(c),
            Action::Backspace => self.view.query_mut().backspace(),
            Action::Delete => self.view.query_mut().delete(),
            Action::CursorLeft => self.view.query_mut().move_left(),
            Action::CursorRight => self.view.query_mut().move_right(),
            Action::CursorHome => self.view.query_mut().move_home(),
            Action::CursorEnd => self.view.query_mut().move_end(),
            Action::ClearInput => self.view.query_mut().clear(),
            Action::Submit => {
                let request = self.view.begin_submit(now).ok();
                self.normalize_focus();
                return request;
            }
            Action::FocusNext => self.cycle_focus(1),
            Action::FocusPrev => self.cycle_focus(-1),
            Action::FocusInput => self.focus = Focus::Input,
            Action::ToggleSources => {
                self.view.disclosure_mut().toggle_section();
                self.normalize_focus();
            }
            Action::ToggleCard(index) => self.view.disclosure_mut().toggle_item(index),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = (self.scroll + 1).min(self.max_scroll),
            Action::PageUp => self.scroll = self.scroll.saturating_sub(PAGE_LINES),
            Action::PageDown => {
                self.scroll = self.scroll.saturating_add(PAGE_LINES).min(self.max_scroll)
            }
            Action::DismissNotice => self.view.notices_mut().dismiss_latest(),
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
        None
    }

    /// Apply the outcome of a spawned query.
    pub fn settle(&mut self, outcome: AppResult<QueryResponse>, now: Instant) {
        if self.view.settle(outcome, now).is_ok() {
            self.scroll = 0;
        }
        self.normalize_focus();
    }

    pub fn tick(&mut self, now: Instant) {
        self.view.tick(now);
        if self.view.status().is_in_flight() {
            self.spinner.tick(now);
        }
    }

    /// Focusable elements in tab order for the current state.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Input, Focus::SubmitButton];
        let result_visible = self.view.result().is_some() && !self.view.status().is_in_flight();
        if result_visible {
            order.push(Focus::SourcesHeader);
            let disclosure = self.view.disclosure();
            if disclosure.is_section_open() {
                order.extend((0..disclosure.len()).map(Focus::Card));
            }
        }
        order
    }

    fn cycle_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.focus = order[next];
    }

    /// Move focus back to the input if its element is no longer on screen.
    fn normalize_focus(&mut self) {
        if !self.focus_order().contains(&self.focus) {
            self.focus = Focus::Input;
        }
    }
}
