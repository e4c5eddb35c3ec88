//! Registration data model
//!
//! The aggregate has one slot per wizard step. Steps hand their output up as
//! an [`AggregatePatch`], which the controller applies by shallow replacement.

pub mod aggregate;
pub mod patch;
pub mod summary;

pub use aggregate::{
    Collaborator, Company, CompanyDetails, Competency, CompetencyType, RegistrationAggregate,
    Role, Team, MAX_LOGIN_COLLABORATORS,
};
pub use patch::AggregatePatch;
pub use summary::RegistrationSummary;
