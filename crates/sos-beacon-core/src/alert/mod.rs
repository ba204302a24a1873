mod notifier;
mod orchestrator;
mod outcome;

pub use {
    notifier::{AlertPayload, Notifier},
    orchestrator::AlertOrchestrator,
    outcome::{AlarmOutcome, AlertResult, DispatchOutcome},
};
