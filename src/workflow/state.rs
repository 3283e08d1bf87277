//! Workflow states, events and the accumulated context

use crate::catalog::BranchEntry;
use crate::error::WorkflowError;

/// Where the branch switching session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    CheckingRepository,
    CheckingCredential,
    /// No token stored yet; waiting for the user to go create one
    CreatingCredential,
    /// The stored token was rejected; waiting for the user to replace it
    InvalidCredential,
    /// Waiting for the user to paste a token
    AskingCredential,
    SavingCredential,
    LoadingBranches,
    /// Waiting for the user to pick a branch
    ListingBranches,
    BranchSelected,
    MissingRepository,
    Crashed,
}

impl WorkflowState {
    /// States with no outbound transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::BranchSelected | WorkflowState::MissingRepository | WorkflowState::Crashed
        )
    }

    /// States that only move on user input
    pub fn awaits_input(&self) -> bool {
        matches!(
            self,
            WorkflowState::CreatingCredential
                | WorkflowState::InvalidCredential
                | WorkflowState::AskingCredential
                | WorkflowState::ListingBranches
        )
    }
}

/// Input from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// The user acknowledged they need to create a token
    ConfirmCredentialCreation,
    /// The user pasted a token
    SubmitCredential(String),
    /// The user picked a branch from the list
    SelectBranch(String),
}

/// Everything that can move the machine: effect outcomes and user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    RepositoryFound,
    RepositoryMissing,
    CredentialPresent,
    CredentialAbsent,
    /// The token was persisted and is now the session credential
    CredentialSaved(String),
    BranchesLoaded(Vec<BranchEntry>),
    /// The forge answered 401
    TokenExpired,
    CheckedOut,
    /// A fatal, classified failure
    Errored(WorkflowError),
    Input(UserInput),
}

impl WorkflowEvent {
    /// Short name for logging; never includes payloads such as tokens
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::RepositoryFound => "repository-found",
            WorkflowEvent::RepositoryMissing => "repository-missing",
            WorkflowEvent::CredentialPresent => "credential-present",
            WorkflowEvent::CredentialAbsent => "credential-absent",
            WorkflowEvent::CredentialSaved(_) => "credential-saved",
            WorkflowEvent::BranchesLoaded(_) => "branches-loaded",
            WorkflowEvent::TokenExpired => "token-expired",
            WorkflowEvent::CheckedOut => "checked-out",
            WorkflowEvent::Errored(_) => "errored",
            WorkflowEvent::Input(UserInput::ConfirmCredentialCreation) => "confirm",
            WorkflowEvent::Input(UserInput::SubmitCredential(_)) => "submit",
            WorkflowEvent::Input(UserInput::SelectBranch(_)) => "selected",
        }
    }
}

impl From<UserInput> for WorkflowEvent {
    fn from(input: UserInput) -> Self {
        WorkflowEvent::Input(input)
    }
}

/// Values accumulated as transitions fire. Fields are only ever set, never
/// cleared; a new session starts from a fresh context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowContext {
    pub credential: Option<String>,
    pub branches: Option<Vec<BranchEntry>>,
    pub selected_branch: Option<String>,
    pub error: Option<WorkflowError>,
}
