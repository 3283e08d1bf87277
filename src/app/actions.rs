//! Application actions that feed user input into the workflow

use tracing::{debug, warn};

use super::App;
use super::state::ViewMode;
use crate::browser::{self, TOKEN_URL};
use crate::workflow::UserInput;

impl App {
    /// The user agreed to create a token: open the token page and move on
    pub(super) fn confirm_credential_creation(&mut self) {
        if let Err(e) = browser::open(TOKEN_URL) {
            warn!("Could not open browser: {:#}", e);
            self.status.last_notice = Some("Could not open a browser, use the URL below".to_string());
        }

        self.deliver(UserInput::ConfirmCredentialCreation);
    }

    /// Submit the typed token; an empty input is ignored
    pub(super) fn submit_token(&mut self) {
        if let Some(token) = self.token_input.take() {
            self.deliver(UserInput::SubmitCredential(token));
        }
    }

    /// Check out the highlighted branch
    pub(super) fn select_highlighted_branch(&mut self) {
        if let Some(branch) = self.branch_list_state.selected_branch() {
            self.view_mode = ViewMode::Workflow;
            self.deliver(UserInput::SelectBranch(branch));
        }
    }

    /// Start a fresh session, re-reading the stored credential
    pub(super) fn restart(&mut self) {
        self.workflow.restart(self.store.get());
        self.branch_list_state.set_items(Vec::new());
        self.token_input.clear();
        self.status.branch_count = 0;
        self.status.last_notice = None;
        self.view_mode = ViewMode::Workflow;
    }

    fn deliver(&mut self, input: UserInput) {
        match self.workflow.send_input(input) {
            Ok(()) => self.sync_view(),
            Err(e) => debug!("Input ignored: {}", e),
        }
    }
}
