//! Wizard state machine

use super::finish::{FinishError, FinishHandler};
use super::indicator::{indicator_items, IndicatorItem};
use super::step::{SequenceError, StepDescriptor, StepSequence};
use crate::model::{AggregatePatch, RegistrationAggregate};

/// Observable effect of a navigation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The current index changed
    Moved { from: usize, to: usize },
    /// The call was a defined no-op
    Unchanged,
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// What the host should show for the current index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// A data-collecting step
    Step(&'a StepDescriptor),
    /// The completion pseudo-step after the last data step
    Completion(&'a RegistrationAggregate),
}

/// Tracks the current step and accumulates the registration aggregate
///
/// The index is 1-based and ranges over `1..=N+1`, where `N+1` is the
/// completion view. Navigation never fails: anything not allowed from the
/// current position returns [`Transition::Unchanged`].
#[derive(Debug, Clone)]
pub struct WizardController {
    steps: StepSequence,
    current: usize,
    aggregate: RegistrationAggregate,
    finished: bool,
}

impl WizardController {
    /// Validate `steps` and start at step 1 with an empty aggregate
    pub fn new(steps: Vec<StepDescriptor>) -> Result<Self, SequenceError> {
        Ok(Self::with_sequence(StepSequence::new(steps)?))
    }

    pub fn with_sequence(steps: StepSequence) -> Self {
        Self {
            steps,
            current: 1,
            aggregate: RegistrationAggregate::default(),
            finished: false,
        }
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        self.steps.as_slice()
    }

    pub fn aggregate(&self) -> &RegistrationAggregate {
        &self.aggregate
    }

    pub fn current_step_index(&self) -> usize {
        self.current
    }

    /// Index of the completion view
    pub fn completion_index(&self) -> usize {
        self.steps.len() + 1
    }

    pub fn is_complete(&self) -> bool {
        self.current == self.completion_index()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The data step at the current index, `None` on the completion view
    pub fn current_step(&self) -> Option<&StepDescriptor> {
        self.steps.get(self.current)
    }

    pub fn current_view(&self) -> View<'_> {
        match self.current_step() {
            Some(step) => View::Step(step),
            None => View::Completion(&self.aggregate),
        }
    }

    /// Whether [`skip`](Self::skip) would move from here
    pub fn can_skip(&self) -> bool {
        !self.finished && self.current_step().is_some_and(|step| !step.required)
    }

    pub fn can_retreat(&self) -> bool {
        !self.finished && self.current > 1
    }

    /// Merge the step's output and move to the next step
    ///
    /// On the completion view this does nothing and the patch is dropped.
    pub fn advance(&mut self, patch: Option<AggregatePatch>) -> Transition {
        if self.finished || self.is_complete() {
            tracing::debug!(index = self.current, "advance ignored on completion view");
            return Transition::Unchanged;
        }

        if let Some(patch) = patch {
            tracing::debug!(index = self.current, slots = ?patch.keys(), "merging step output");
            patch.apply_to(&mut self.aggregate);
        }
        self.move_to(self.current + 1)
    }

    /// Go back one step; the aggregate is untouched
    pub fn retreat(&mut self) -> Transition {
        if !self.can_retreat() {
            return Transition::Unchanged;
        }
        self.move_to(self.current - 1)
    }

    /// Move past an optional step without merging anything
    pub fn skip(&mut self) -> Transition {
        if !self.can_skip() {
            tracing::debug!(index = self.current, "skip not allowed here");
            return Transition::Unchanged;
        }
        self.move_to(self.current + 1)
    }

    pub fn indicator(&self) -> Vec<IndicatorItem<'_>> {
        indicator_items(self.steps.as_slice(), self.current)
    }

    /// Hand the aggregate to `handler`
    ///
    /// Only valid on the completion view and only once; the handler is not
    /// retried if it fails.
    pub fn finish<H: FinishHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), FinishError> {
        if self.finished {
            return Err(FinishError::AlreadyFinished);
        }
        if !self.is_complete() {
            return Err(FinishError::NotComplete {
                current: self.current,
                total: self.steps.len(),
            });
        }

        self.finished = true;
        tracing::info!(steps = self.steps.len(), "finishing registration");
        handler
            .finish(self.aggregate.clone())
            .map_err(FinishError::Handler)
    }

    fn move_to(&mut self, to: usize) -> Transition {
        let from = self.current;
        self.current = to;
        tracing::debug!(from, to, "step changed");
        Transition::Moved { from, to }
    }
}
