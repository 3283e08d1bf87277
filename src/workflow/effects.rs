//! State entry effects and the runner that performs them
//!
//! Each effect runs to completion and reports exactly one event. Failures
//! are classified here, so the machine never sees an unclassified error.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::state::{UserInput, WorkflowContext, WorkflowEvent, WorkflowState};
use crate::catalog::{self, BranchEntry};
use crate::config::CredentialStore;
use crate::error::WorkflowError;
use crate::forge::Forge;
use crate::git::VersionControl;

/// The side effect a state performs on entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Is the working directory a git repository?
    ProbeRepository,
    /// Is there a credential to use?
    InspectCredential { credential: Option<String> },
    /// Persist a freshly entered token
    SaveCredential { token: String },
    /// Fetch user and pull requests, resolve the default branch, build the catalog
    LoadBranches { credential: String },
    /// Switch the working copy to the picked branch
    Checkout { branch: String },
}

impl Effect {
    /// The effect for entering `state` via `event`, if the state has one
    pub fn on_entry(
        state: WorkflowState,
        event: &WorkflowEvent,
        context: &WorkflowContext,
    ) -> Option<Self> {
        match (state, event) {
            (WorkflowState::CheckingRepository, _) => Some(Effect::ProbeRepository),
            (WorkflowState::CheckingCredential, _) => Some(Effect::InspectCredential {
                credential: context.credential.clone(),
            }),
            (WorkflowState::SavingCredential, WorkflowEvent::Input(UserInput::SubmitCredential(token))) => {
                Some(Effect::SaveCredential {
                    token: token.clone(),
                })
            }
            (WorkflowState::LoadingBranches, _) => Some(Effect::LoadBranches {
                // Only reachable with a credential present or just saved
                credential: context.credential.clone().unwrap_or_default(),
            }),
            (WorkflowState::BranchSelected, WorkflowEvent::Input(UserInput::SelectBranch(branch))) => {
                Some(Effect::Checkout {
                    branch: branch.clone(),
                })
            }
            _ => None,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Effect::ProbeRepository => "probe-repository",
            Effect::InspectCredential { .. } => "inspect-credential",
            Effect::SaveCredential { .. } => "save-credential",
            Effect::LoadBranches { .. } => "load-branches",
            Effect::Checkout { .. } => "checkout",
        }
    }
}

/// Performs effects against the real (or fake) collaborators
#[derive(Clone)]
pub struct EffectRunner {
    vcs: Arc<dyn VersionControl>,
    forge: Arc<dyn Forge>,
    store: Arc<dyn CredentialStore>,
}

impl EffectRunner {
    pub fn new(
        vcs: Arc<dyn VersionControl>,
        forge: Arc<dyn Forge>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self { vcs, forge, store }
    }

    /// Run an effect and report its outcome as an event
    pub async fn run(&self, effect: Effect) -> WorkflowEvent {
        debug!("Running effect: {}", effect.name());

        match effect {
            Effect::ProbeRepository => {
                let found = self.git(|vcs| Ok(vcs.is_repository())).await.unwrap_or(false);
                if found {
                    WorkflowEvent::RepositoryFound
                } else {
                    info!("Not a git repository");
                    WorkflowEvent::RepositoryMissing
                }
            }

            Effect::InspectCredential { credential } => {
                if credential.is_some_and(|c| !c.trim().is_empty()) {
                    WorkflowEvent::CredentialPresent
                } else {
                    WorkflowEvent::CredentialAbsent
                }
            }

            Effect::SaveCredential { token } => match self.store.set(&token) {
                Ok(()) => WorkflowEvent::CredentialSaved(token),
                Err(e) => {
                    error!("Failed to save access token: {}", e);
                    WorkflowEvent::Errored(e)
                }
            },

            Effect::LoadBranches { credential } => match self.load_branches(&credential).await {
                Ok(branches) => WorkflowEvent::BranchesLoaded(branches),
                Err(e) if e.is_recoverable() => {
                    warn!("Access token was rejected");
                    WorkflowEvent::TokenExpired
                }
                Err(e) => {
                    error!("Failed to load branches: {}", e);
                    WorkflowEvent::Errored(e)
                }
            },

            Effect::Checkout { branch } => {
                let target = branch.clone();
                match self.git(move |vcs| vcs.checkout(&target)).await {
                    Ok(()) => {
                        info!("Switched to {}", branch);
                        WorkflowEvent::CheckedOut
                    }
                    Err(e) => {
                        error!("Checkout of {} failed: {}", branch, e);
                        WorkflowEvent::Errored(e)
                    }
                }
            }
        }
    }

    async fn load_branches(&self, credential: &str) -> Result<Vec<BranchEntry>, WorkflowError> {
        let repository = self.git(|vcs| vcs.repository_ref()).await?;
        debug!("Loading pull requests for {}", repository);

        // The first failure drops the other request
        let (user, pull_requests) = tokio::try_join!(
            self.forge.fetch_current_user(credential),
            self.forge.fetch_pull_requests(credential, &repository),
        )?;

        let default_branch = self.git(|vcs| vcs.default_branch_name()).await?;

        let branches = catalog::build(&user, &default_branch, &pull_requests);
        info!(
            "{} of {} pull requests belong to {}",
            branches.len() - 1,
            pull_requests.len(),
            user.login
        );
        Ok(branches)
    }

    /// Run a git operation off the async threads
    async fn git<T, F>(&self, op: F) -> Result<T, WorkflowError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn VersionControl) -> Result<T, WorkflowError> + Send + 'static,
    {
        let vcs = Arc::clone(&self.vcs);
        tokio::task::spawn_blocking(move || op(vcs.as_ref()))
            .await
            .map_err(|e| WorkflowError::Vcs(format!("git task failed: {}", e)))?
    }
}
