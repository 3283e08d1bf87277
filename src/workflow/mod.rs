//! Branch switching workflow
//!
//! A state machine (`machine`) with a pure transition function, entry
//! effects performed by a separate runner (`effects`), and [`Workflow`],
//! the driver that keeps at most one effect in flight.

mod effects;
mod machine;
mod state;


pub use effects::{Effect, EffectRunner};
pub use machine::Machine;
pub use state::{UserInput, WorkflowContext, WorkflowEvent, WorkflowState};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Identifies one in-flight effect; outcomes carrying any other ticket are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectTicket(Uuid);

impl EffectTicket {
    fn issue() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Why user input was not delivered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejected {
    #[error("an operation is still running")]
    Busy,

    #[error("{state:?} does not accept this input")]
    NotAccepted { state: WorkflowState },
}

/// Drives a [`Machine`], handing out one effect at a time
#[derive(Debug)]
pub struct Workflow {
    machine: Machine,
    in_flight: Option<EffectTicket>,
}

impl Workflow {
    /// Start a session with the credential read from the store
    pub fn new(credential: Option<String>) -> Self {
        Self {
            machine: Machine::new(credential),
            in_flight: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.machine.state()
    }

    pub fn context(&self) -> &WorkflowContext {
        self.machine.context()
    }

    /// Whether an effect has been handed out and not completed yet
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Terminal state reached and its entry effect (if any) has finished
    pub fn is_finished(&self) -> bool {
        self.state().is_terminal() && !self.is_busy() && !self.machine.has_pending_effect()
    }

    /// Take the current state's entry effect, if it has one that hasn't run
    /// yet and nothing else is in flight
    pub fn start_effect(&mut self) -> Option<(EffectTicket, Effect)> {
        if self.in_flight.is_some() {
            return None;
        }

        let effect = self.machine.take_entry_effect()?;
        let ticket = EffectTicket::issue();
        debug!("Starting {} in {:?}", effect.name(), self.state());
        self.in_flight = Some(ticket);
        Some((ticket, effect))
    }

    /// Feed back the outcome of an effect. Returns `false` for a stale ticket.
    pub fn complete_effect(&mut self, ticket: EffectTicket, event: WorkflowEvent) -> bool {
        if self.in_flight != Some(ticket) {
            warn!("Dropping stale {} outcome", event.name());
            return false;
        }

        self.in_flight = None;
        self.machine.apply(event);
        true
    }

    /// Deliver user input to a state that is waiting for it
    pub fn send_input(&mut self, input: UserInput) -> Result<(), InputRejected> {
        if self.is_busy() {
            return Err(InputRejected::Busy);
        }

        let state = self.state();
        if !state.awaits_input() || !self.machine.apply(input.into()) {
            return Err(InputRejected::NotAccepted { state });
        }

        Ok(())
    }

    /// Throw the session away and start over; outcomes of any effect still
    /// in flight will be dropped
    pub fn restart(&mut self, credential: Option<String>) {
        debug!("Restarting session from {:?}", self.state());
        self.machine = Machine::new(credential);
        self.in_flight = None;
    }

    /// Run effects inline until the machine waits for input or is finished
    #[cfg(test)]
    pub async fn run_until_idle(&mut self, runner: &EffectRunner) {
        while let Some((ticket, effect)) = self.start_effect() {
            let event = runner.run(effect).await;
            self.complete_effect(ticket, event);
        }
    }
}
