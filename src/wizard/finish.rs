//! Hand-off of the completed aggregate

use thiserror::Error;

use crate::model::{RegistrationAggregate, RegistrationSummary};

/// Receives the aggregate once the user confirms the completion view
pub trait FinishHandler {
    fn finish(&mut self, aggregate: RegistrationAggregate) -> anyhow::Result<()>;
}

impl<F> FinishHandler for F
where
    F: FnMut(RegistrationAggregate) -> anyhow::Result<()>,
{
    fn finish(&mut self, aggregate: RegistrationAggregate) -> anyhow::Result<()> {
        self(aggregate)
    }
}

/// Logs the registration summary and keeps the last aggregate
#[derive(Debug, Default)]
pub struct LogFinish {
    received: Option<RegistrationAggregate>,
}

impl LogFinish {
    pub fn new() -> Self {
        Self::default()
    }

    /// The aggregate handed over, if finish has run
    pub fn received(&self) -> Option<&RegistrationAggregate> {
        self.received.as_ref()
    }

    pub fn into_received(self) -> Option<RegistrationAggregate> {
        self.received
    }
}

impl FinishHandler for LogFinish {
    fn finish(&mut self, aggregate: RegistrationAggregate) -> anyhow::Result<()> {
        let summary = RegistrationSummary::from_aggregate(&aggregate);
        tracing::info!(
            company = %summary.company_name,
            collaborators = summary.collaborators,
            login_collaborators = summary.login_collaborators,
            teams = summary.teams,
            roles = summary.roles,
            competencies = summary.competencies,
            "Registration completed"
        );
        self.received = Some(aggregate);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum FinishError {
    #[error("registration is not complete yet (at step {current} of {total})")]
    NotComplete { current: usize, total: usize },
    #[error("registration was already finished")]
    AlreadyFinished,
    #[error("finish handler failed")]
    Handler(#[source] anyhow::Error),
}
