//! Main application state and logic
//!
//! The TUI is a thin shell around [`Workflow`]: it renders the current
//! state, turns key presses into [`UserInput`](crate::workflow::UserInput),
//! and runs each entry effect on the tokio runtime, one at a time.

mod actions;
mod handlers;
mod state;
mod views;

use std::path::Path;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tokio::runtime::Handle;
use tracing::debug;

use crate::config::CredentialStore;
use crate::ui::{AppStatus, BranchListState, Theme, TokenInputState};
use crate::workflow::{EffectRunner, EffectTicket, Workflow, WorkflowEvent, WorkflowState};

pub use state::{Exit, ViewMode};

/// Main application state
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current view mode
    view_mode: ViewMode,
    /// The branch switching session
    workflow: Workflow,
    /// Performs entry effects
    runner: EffectRunner,
    /// Re-read on restart
    store: Arc<dyn CredentialStore>,
    /// Runtime effects are spawned on
    runtime: Handle,
    /// Effect outcomes, tagged with the ticket they were started under
    outcome_rx: mpsc::Receiver<(EffectTicket, WorkflowEvent)>,
    outcome_tx: mpsc::Sender<(EffectTicket, WorkflowEvent)>,
    /// Branch list state
    branch_list_state: BranchListState,
    /// Token being typed
    token_input: TokenInputState,
    /// Status bar contents
    status: AppStatus,
    /// Spinner frame counter
    spinner_tick: usize,
    /// Theme
    theme: Theme,
}

impl App {
    /// Create a new application; the credential is read from `store` once
    pub fn new(
        location: &Path,
        runner: EffectRunner,
        store: Arc<dyn CredentialStore>,
        runtime: Handle,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();
        let workflow = Workflow::new(store.get());

        let status = AppStatus {
            location: location.display().to_string(),
            ..AppStatus::default()
        };

        Self {
            running: false,
            view_mode: ViewMode::Workflow,
            workflow,
            runner,
            store,
            runtime,
            outcome_rx,
            outcome_tx,
            branch_list_state: BranchListState::new(),
            token_input: TokenInputState::default(),
            status,
            spinner_tick: 0,
            theme: Theme::default(),
        }
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<Exit> {
        self.running = true;

        while self.running {
            self.start_effect();
            self.process_outcomes();
            if !self.running {
                break;
            }

            terminal.draw(|frame| self.render(frame))?;

            // Handle events with timeout
            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.on_key_event(key);
                    }
                    Event::Paste(text) => {
                        self.on_paste(&text);
                    }
                    _ => {}
                }
            }

            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }

        Ok(self.exit())
    }

    /// Spawn the current state's entry effect, if one is due
    fn start_effect(&mut self) {
        let Some((ticket, effect)) = self.workflow.start_effect() else {
            return;
        };

        let runner = self.runner.clone();
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let event = runner.run(effect).await;
            // The receiver is gone only if the app already quit
            let _ = tx.send((ticket, event));
        });
    }

    /// Apply finished effect outcomes
    fn process_outcomes(&mut self) {
        while let Ok((ticket, event)) = self.outcome_rx.try_recv() {
            if self.workflow.complete_effect(ticket, event) {
                self.sync_view();
            }
        }
    }

    /// Bring view state in line with the workflow after it moved
    fn sync_view(&mut self) {
        match self.workflow.state() {
            WorkflowState::ListingBranches if self.branch_list_state.items.is_empty() => {
                let branches = self.workflow.context().branches.clone().unwrap_or_default();
                debug!("Listing {} branches", branches.len());
                self.status.branch_count = branches.len();
                self.branch_list_state.set_items(branches);
            }
            WorkflowState::BranchSelected if self.workflow.is_finished() => {
                self.running = false;
            }
            _ => {}
        }
    }

    /// How the session ended
    fn exit(&self) -> Exit {
        let context = self.workflow.context();

        match self.workflow.state() {
            WorkflowState::BranchSelected if self.workflow.is_finished() => {
                Exit::Switched(context.selected_branch.clone().unwrap_or_default())
            }
            WorkflowState::MissingRepository => Exit::NotARepository,
            WorkflowState::Crashed => Exit::Failed(
                context
                    .error
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown error".to_string()),
            ),
            _ => Exit::Quit,
        }
    }
}
