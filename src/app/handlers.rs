//! Event handlers for keyboard and paste input

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::state::ViewMode;
use crate::workflow::WorkflowState;

impl App {
    /// Handle key events
    pub(super) fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.running = false;
            return;
        }

        if self.view_mode == ViewMode::Help {
            self.handle_help_keys(key);
            return;
        }

        match self.workflow.state() {
            WorkflowState::CreatingCredential | WorkflowState::InvalidCredential => {
                self.handle_credential_intro_keys(key)
            }
            WorkflowState::AskingCredential => self.handle_token_input_keys(key),
            WorkflowState::ListingBranches => self.handle_branch_list_keys(key),
            WorkflowState::MissingRepository | WorkflowState::Crashed => {
                self.handle_finished_keys(key)
            }
            _ => self.handle_busy_keys(key),
        }
    }

    /// Bracketed paste goes straight into the token input
    pub(super) fn on_paste(&mut self, text: &str) {
        if self.workflow.state() == WorkflowState::AskingCredential {
            self.token_input.insert(text);
        }
    }

    fn handle_credential_intro_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.confirm_credential_creation(),
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            _ => {}
        }
    }

    /// Every printable key is part of the token here, so only Esc quits
    fn handle_token_input_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Enter => self.submit_token(),
            KeyCode::Backspace => self.token_input.backspace(),
            KeyCode::Char(c) => self.token_input.insert(c.encode_utf8(&mut [0; 4])),
            _ => {}
        }
    }

    fn handle_branch_list_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.view_mode = ViewMode::Help,
            KeyCode::Down | KeyCode::Char('j') => self.branch_list_state.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.branch_list_state.select_previous(),
            KeyCode::Home => self.branch_list_state.select_first(),
            KeyCode::End => self.branch_list_state.select_last(),
            KeyCode::Enter => self.select_highlighted_branch(),
            _ => {}
        }
    }

    fn handle_help_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.view_mode = ViewMode::Workflow;
            }
            _ => {}
        }
    }

    fn handle_finished_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    /// Nothing to do while an effect runs except leave
    fn handle_busy_keys(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            self.running = false;
        }
    }
}
