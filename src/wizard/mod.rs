//! Onboarding wizard: step sequence, navigation and completion
//!
//! The [`WizardController`] owns the aggregate. Step forms hand their output
//! up through [`WizardController::advance`]; the host renders whatever
//! [`WizardController::current_view`] returns.

pub mod controller;
pub mod finish;
pub mod indicator;
pub mod step;

pub use controller::{Transition, View, WizardController};
pub use finish::{FinishError, FinishHandler, LogFinish};
pub use indicator::{indicator_items, IndicatorItem, StepState};
pub use step::{default_steps, SequenceError, StepDescriptor, StepKind, StepSequence};

#[cfg(test)]
mod tests;
