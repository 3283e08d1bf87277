//! Application state types and enums

use crate::workflow::WorkflowState;

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The screen for the current workflow state
    Workflow,
    /// Help overlay on top of the branch list
    Help,
}

/// How the session ended, reported after the terminal is restored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// The user quit before anything was checked out
    Quit,
    /// The working copy now has this branch checked out
    Switched(String),
    /// The directory is not a git repository
    NotARepository,
    /// A fatal error, already shown in the TUI
    Failed(String),
}

/// Spinner caption while a state's effect runs
pub fn busy_caption(state: WorkflowState, selected: Option<&str>) -> String {
    match state {
        WorkflowState::CheckingRepository => "Looking for a git repository".to_string(),
        WorkflowState::CheckingCredential => "Checking access token".to_string(),
        WorkflowState::SavingCredential => "Saving access token".to_string(),
        WorkflowState::LoadingBranches => "Loading branches".to_string(),
        WorkflowState::BranchSelected => {
            format!("Switching to {}", selected.unwrap_or("branch"))
        }
        _ => String::new(),
    }
}
