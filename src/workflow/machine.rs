//! The pure transition function and the machine that applies it

use tracing::debug;

use super::effects::Effect;
use super::state::{UserInput, WorkflowContext, WorkflowEvent, WorkflowState};

/// Next state for `event` in `state`, or `None` if the event isn't accepted there
pub fn transition(state: WorkflowState, event: &WorkflowEvent) -> Option<WorkflowState> {
    use WorkflowEvent as E;
    use WorkflowState as S;

    match (state, event) {
        (S::CheckingRepository, E::RepositoryFound) => Some(S::CheckingCredential),
        (S::CheckingRepository, E::RepositoryMissing) => Some(S::MissingRepository),

        (S::CheckingCredential, E::CredentialPresent) => Some(S::LoadingBranches),
        (S::CheckingCredential, E::CredentialAbsent) => Some(S::CreatingCredential),

        (S::CreatingCredential | S::InvalidCredential, E::Input(UserInput::ConfirmCredentialCreation)) => {
            Some(S::AskingCredential)
        }
        (S::AskingCredential, E::Input(UserInput::SubmitCredential(_))) => Some(S::SavingCredential),

        (S::SavingCredential, E::CredentialSaved(_)) => Some(S::LoadingBranches),
        (S::SavingCredential, E::Errored(_)) => Some(S::Crashed),

        (S::LoadingBranches, E::BranchesLoaded(_)) => Some(S::ListingBranches),
        (S::LoadingBranches, E::TokenExpired) => Some(S::InvalidCredential),
        (S::LoadingBranches, E::Errored(_)) => Some(S::Crashed),

        (S::ListingBranches, E::Input(UserInput::SelectBranch(_))) => Some(S::BranchSelected),

        (S::BranchSelected, E::Errored(_)) => Some(S::Crashed),

        _ => None,
    }
}

/// Current state plus context, and the entry effect of the current state
/// until a driver takes it
#[derive(Debug, Clone)]
pub struct Machine {
    state: WorkflowState,
    context: WorkflowContext,
    entry_effect: Option<Effect>,
}

impl Machine {
    /// Start a session with the credential read from the store
    pub fn new(credential: Option<String>) -> Self {
        let context = WorkflowContext {
            credential: credential.filter(|c| !c.trim().is_empty()),
            ..WorkflowContext::default()
        };

        Self {
            state: WorkflowState::CheckingRepository,
            context,
            entry_effect: Some(Effect::ProbeRepository),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn context(&self) -> &WorkflowContext {
        &self.context
    }

    /// Hand out the entry effect of the current state (once per entry)
    pub fn take_entry_effect(&mut self) -> Option<Effect> {
        self.entry_effect.take()
    }

    /// Whether the current state's entry effect hasn't been taken yet
    pub fn has_pending_effect(&self) -> bool {
        self.entry_effect.is_some()
    }

    /// Apply an event. Returns whether the machine moved.
    ///
    /// An event that is valid but has no transition (a successful checkout)
    /// leaves the machine where it is.
    pub fn apply(&mut self, event: WorkflowEvent) -> bool {
        let Some(next) = transition(self.state, &event) else {
            debug!("{:?} ignores {}", self.state, event.name());
            return false;
        };

        debug!("{:?} --{}--> {:?}", self.state, event.name(), next);

        match &event {
            WorkflowEvent::CredentialSaved(token) => {
                self.context.credential = Some(token.clone());
            }
            WorkflowEvent::BranchesLoaded(branches) => {
                self.context.branches = Some(branches.clone());
            }
            WorkflowEvent::Input(UserInput::SelectBranch(branch)) => {
                self.context.selected_branch = Some(branch.clone());
            }
            WorkflowEvent::Errored(error) if next == WorkflowState::Crashed => {
                self.context.error = Some(error.clone());
            }
            _ => {}
        }

        self.entry_effect = Effect::on_entry(next, &event, &self.context);
        self.state = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BranchEntry;
    use crate::error::WorkflowError;

    const ALL_STATES: [WorkflowState; 11] = [
        WorkflowState::CheckingRepository,
        WorkflowState::CheckingCredential,
        WorkflowState::CreatingCredential,
        WorkflowState::InvalidCredential,
        WorkflowState::AskingCredential,
        WorkflowState::SavingCredential,
        WorkflowState::LoadingBranches,
        WorkflowState::ListingBranches,
        WorkflowState::BranchSelected,
        WorkflowState::MissingRepository,
        WorkflowState::Crashed,
    ];

    fn entry(value: &str) -> BranchEntry {
        BranchEntry {
            label: format!("Default ({})", value),
            value: value.to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_transition_table() {
        use WorkflowEvent as E;
        use WorkflowState as S;

        let cases = [
            (S::CheckingRepository, E::RepositoryFound, S::CheckingCredential),
            (S::CheckingRepository, E::RepositoryMissing, S::MissingRepository),
            (S::CheckingCredential, E::CredentialPresent, S::LoadingBranches),
            (S::CheckingCredential, E::CredentialAbsent, S::CreatingCredential),
            (S::CreatingCredential, UserInput::ConfirmCredentialCreation.into(), S::AskingCredential),
            (S::InvalidCredential, UserInput::ConfirmCredentialCreation.into(), S::AskingCredential),
            (S::AskingCredential, UserInput::SubmitCredential("t".into()).into(), S::SavingCredential),
            (S::SavingCredential, E::CredentialSaved("t".into()), S::LoadingBranches),
            (S::LoadingBranches, E::BranchesLoaded(vec![]), S::ListingBranches),
            (S::LoadingBranches, E::TokenExpired, S::InvalidCredential),
            (S::LoadingBranches, E::Errored(WorkflowError::Transport("x".into())), S::Crashed),
            (S::ListingBranches, UserInput::SelectBranch("main".into()).into(), S::BranchSelected),
            (S::BranchSelected, E::Errored(WorkflowError::Vcs("x".into())), S::Crashed),
        ];

        for (from, event, to) in cases {
            assert_eq!(transition(from, &event), Some(to), "{:?} on {}", from, event.name());
        }
    }

    #[test]
    fn test_terminal_states_accept_no_input() {
        let inputs: Vec<WorkflowEvent> = vec![
            UserInput::ConfirmCredentialCreation.into(),
            UserInput::SubmitCredential("t".into()).into(),
            UserInput::SelectBranch("main".into()).into(),
        ];

        for state in ALL_STATES.iter().filter(|s| s.is_terminal()) {
            for input in &inputs {
                assert_eq!(transition(*state, input), None);
            }
        }
    }

    #[test]
    fn test_effect_states_ignore_user_input() {
        let effect_states = [
            WorkflowState::CheckingRepository,
            WorkflowState::CheckingCredential,
            WorkflowState::SavingCredential,
            WorkflowState::LoadingBranches,
        ];

        for state in effect_states {
            assert_eq!(transition(state, &UserInput::ConfirmCredentialCreation.into()), None);
            assert_eq!(transition(state, &UserInput::SelectBranch("x".into()).into()), None);
        }
    }

    #[test]
    fn test_token_expiry_never_crashes_and_errors_never_ask_again() {
        assert_ne!(
            transition(WorkflowState::LoadingBranches, &WorkflowEvent::TokenExpired),
            Some(WorkflowState::Crashed)
        );
        assert_ne!(
            transition(
                WorkflowState::LoadingBranches,
                &WorkflowEvent::Errored(WorkflowError::Transport("boom".into()))
            ),
            Some(WorkflowState::InvalidCredential)
        );
    }

    #[test]
    fn test_awaiting_states_are_exactly_the_input_states() {
        let awaiting: Vec<_> = ALL_STATES.iter().filter(|s| s.awaits_input()).collect();
        assert_eq!(
            awaiting,
            [
                &WorkflowState::CreatingCredential,
                &WorkflowState::InvalidCredential,
                &WorkflowState::AskingCredential,
                &WorkflowState::ListingBranches,
            ]
        );
    }

    #[test]
    fn test_new_machine_probes_repository_first() {
        let mut machine = Machine::new(Some("ghp".into()));
        assert_eq!(machine.state(), WorkflowState::CheckingRepository);
        assert_eq!(machine.take_entry_effect(), Some(Effect::ProbeRepository));
        assert_eq!(machine.take_entry_effect(), None);
    }

    #[test]
    fn test_blank_startup_credential_is_absent() {
        let machine = Machine::new(Some("  ".into()));
        assert_eq!(machine.context().credential, None);
    }

    #[test]
    fn test_context_accumulates() {
        let mut machine = Machine::new(None);
        assert!(machine.apply(WorkflowEvent::RepositoryFound));
        assert!(machine.apply(WorkflowEvent::CredentialAbsent));
        assert!(machine.apply(UserInput::ConfirmCredentialCreation.into()));
        assert!(machine.apply(UserInput::SubmitCredential("ghp_new".into()).into()));
        assert_eq!(
            machine.take_entry_effect(),
            Some(Effect::SaveCredential {
                token: "ghp_new".into()
            })
        );

        assert!(machine.apply(WorkflowEvent::CredentialSaved("ghp_new".into())));
        assert_eq!(machine.context().credential.as_deref(), Some("ghp_new"));

        assert!(machine.apply(WorkflowEvent::BranchesLoaded(vec![entry("main")])));
        assert!(machine.apply(UserInput::SelectBranch("main".into()).into()));

        let context = machine.context();
        assert_eq!(context.credential.as_deref(), Some("ghp_new"));
        assert_eq!(context.branches.as_ref().map(Vec::len), Some(1));
        assert_eq!(context.selected_branch.as_deref(), Some("main"));
        assert_eq!(context.error, None);
        assert_eq!(
            machine.take_entry_effect(),
            Some(Effect::Checkout {
                branch: "main".into()
            })
        );
    }

    #[test]
    fn test_crash_records_error_and_keeps_earlier_context() {
        let mut machine = Machine::new(Some("ghp".into()));
        machine.apply(WorkflowEvent::RepositoryFound);
        machine.apply(WorkflowEvent::CredentialPresent);
        machine.apply(WorkflowEvent::BranchesLoaded(vec![entry("main")]));
        machine.apply(UserInput::SelectBranch("main".into()).into());

        let error = WorkflowError::Vcs("dirty tree".into());
        assert!(machine.apply(WorkflowEvent::Errored(error.clone())));

        assert_eq!(machine.state(), WorkflowState::Crashed);
        assert_eq!(machine.context().error, Some(error));
        assert_eq!(machine.context().selected_branch.as_deref(), Some("main"));
        assert!(machine.context().branches.is_some());
        assert_eq!(machine.take_entry_effect(), None);
    }

    #[test]
    fn test_successful_checkout_stays_put() {
        let mut machine = Machine::new(Some("ghp".into()));
        machine.apply(WorkflowEvent::RepositoryFound);
        machine.apply(WorkflowEvent::CredentialPresent);
        machine.apply(WorkflowEvent::BranchesLoaded(vec![entry("main")]));
        machine.apply(UserInput::SelectBranch("main".into()).into());
        machine.take_entry_effect();

        assert!(!machine.apply(WorkflowEvent::CheckedOut));
        assert_eq!(machine.state(), WorkflowState::BranchSelected);
        assert!(!machine.has_pending_effect());
    }

    #[test]
    fn test_ignored_event_keeps_pending_effect() {
        let mut machine = Machine::new(None);
        assert!(!machine.apply(UserInput::SelectBranch("main".into()).into()));
        assert!(machine.has_pending_effect());
    }
}
