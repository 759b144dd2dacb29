use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use schoolid_core::domain::{LookupQuery, LookupResult};
use schoolid_core::rules::DisplayState;

use crate::actions::Action;

pub const FIELD_STUDENT_NO: usize = 0;
pub const FIELD_NAME: usize = 1;
pub const BUTTON_SEARCH: usize = 2;
pub const BUTTON_CLEAR: usize = 3;
pub const BUTTON_COPY: usize = 4;
pub const BUTTON_RESET: usize = 5;
const FOCUS_COUNT: usize = 6;

#[derive(Debug)]
pub enum Mode {
    Form,
    Confirm(ConfirmState),
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
}

impl ConfirmState {
    pub fn reset_request() -> Self {
        Self {
            message: "Ask an administrator to reset this account's password? (y/n)".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub mode: Mode,
    pub should_quit: bool,
    pub source_name: &'static str,
    pub student_no: String,
    pub name: String,
    pub focus: usize,
    pub display: DisplayState,
    /// Receiver for the lookup currently in flight. While this is `Some`,
    /// submit is ignored; there is at most one outstanding lookup.
    pub pending: Option<Receiver<LookupResult>>,
    actions: VecDeque<Action>,
}

impl App {
    pub fn new(source_name: &'static str) -> Self {
        Self {
            mode: Mode::Form,
            should_quit: false,
            source_name,
            student_no: String::new(),
            name: String::new(),
            focus: FIELD_STUDENT_NO,
            display: DisplayState::idle(),
            pending: None,
            actions: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        ) {
            self.should_quit = true;
            return;
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::Form);
        match &mut mode {
            Mode::Form => {
                if let Some(next) = self.handle_form_key(key) {
                    mode = next;
                }
            }
            Mode::Confirm(state) => {
                if let Some(next) = self.handle_confirm_key(state, key) {
                    mode = next;
                }
            }
        }
        self.mode = mode;
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => match self.focus {
                FIELD_STUDENT_NO | FIELD_NAME => self.submit(),
                BUTTON_SEARCH => self.submit(),
                BUTTON_CLEAR => self.enqueue(Action::Clear),
                BUTTON_COPY => self.enqueue(Action::CopyId),
                BUTTON_RESET => return Some(Mode::Confirm(ConfirmState::reset_request())),
                _ => {}
            },
            _ => {
                if let Some(target) = self.active_field_mut() {
                    apply_text_input(target, key);
                }
            }
        }
        None
    }

    fn handle_confirm_key(&mut self, _state: &mut ConfirmState, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.enqueue(Action::ResetRequest);
                Some(Mode::Form)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Mode::Form),
            _ => None,
        }
    }

    /// Validate and enter Searching, or short-circuit to an Error status.
    /// Ignored while a lookup is already in flight.
    pub fn submit(&mut self) {
        if self.pending.is_some() {
            return;
        }
        match LookupQuery::new(&self.student_no, &self.name) {
            Ok(query) => {
                self.display = self.display.searching();
                self.enqueue(Action::Lookup(query));
            }
            Err(err) => {
                self.display = self.display.rejected(&err);
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FOCUS_COUNT;
    }

    pub fn focus_prev(&mut self) {
        if self.focus == 0 {
            self.focus = FOCUS_COUNT - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FIELD_STUDENT_NO => Some(&mut self.student_no),
            FIELD_NAME => Some(&mut self.name),
            _ => None,
        }
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}
