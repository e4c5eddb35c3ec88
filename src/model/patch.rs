//! Partial aggregate handed up by a step when it advances

use serde::{Deserialize, Serialize};

use super::aggregate::{
    Collaborator, Company, CompanyDetails, Competency, RegistrationAggregate, Role, Team,
};

/// A partial `RegistrationAggregate`
///
/// Each present slot replaces the aggregate's slot wholesale when applied.
/// Lists are never appended to or merged element-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_details: Option<CompanyDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competencies: Option<Vec<Competency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<Vec<Collaborator>>,
}

impl AggregatePatch {
    pub fn company(company: Company) -> Self {
        Self {
            company: Some(company),
            ..Default::default()
        }
    }

    pub fn company_details(details: CompanyDetails) -> Self {
        Self {
            company_details: Some(details),
            ..Default::default()
        }
    }

    pub fn teams(teams: Vec<Team>) -> Self {
        Self {
            teams: Some(teams),
            ..Default::default()
        }
    }

    pub fn roles(roles: Vec<Role>) -> Self {
        Self {
            roles: Some(roles),
            ..Default::default()
        }
    }

    pub fn competencies(competencies: Vec<Competency>) -> Self {
        Self {
            competencies: Some(competencies),
            ..Default::default()
        }
    }

    pub fn collaborators(collaborators: Vec<Collaborator>) -> Self {
        Self {
            collaborators: Some(collaborators),
            ..Default::default()
        }
    }

    /// Whether applying this patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Names of the slots this patch carries, for logging
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.company.is_some() {
            keys.push("company");
        }
        if self.company_details.is_some() {
            keys.push("companyDetails");
        }
        if self.teams.is_some() {
            keys.push("teams");
        }
        if self.roles.is_some() {
            keys.push("roles");
        }
        if self.competencies.is_some() {
            keys.push("competencies");
        }
        if self.collaborators.is_some() {
            keys.push("collaborators");
        }
        keys
    }

    /// Shallow merge: every present slot overwrites the aggregate's slot
    pub fn apply_to(self, aggregate: &mut RegistrationAggregate) {
        if let Some(company) = self.company {
            aggregate.company = company;
        }
        if let Some(details) = self.company_details {
            aggregate.company_details = details;
        }
        if let Some(teams) = self.teams {
            aggregate.teams = teams;
        }
        if let Some(roles) = self.roles {
            aggregate.roles = roles;
        }
        if let Some(competencies) = self.competencies {
            aggregate.competencies = competencies;
        }
        if let Some(collaborators) = self.collaborators {
            aggregate.collaborators = collaborators;
        }
    }
}
