//! Read-only digest of a completed registration

use serde::Serialize;

use super::aggregate::RegistrationAggregate;

/// What the completion view shows about the aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSummary {
    pub company_name: String,
    pub collaborators: usize,
    pub login_collaborators: usize,
    pub teams: usize,
    pub roles: usize,
    pub competencies: usize,
}

impl RegistrationSummary {
    pub fn from_aggregate(aggregate: &RegistrationAggregate) -> Self {
        Self {
            company_name: aggregate.company.name.clone(),
            collaborators: aggregate.collaborators.len(),
            login_collaborators: aggregate.login_collaborator_count(),
            teams: aggregate.teams.len(),
            roles: aggregate.roles.len(),
            competencies: aggregate.competencies.len(),
        }
    }

    /// Label/value lines, skipping sections with nothing in them
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = vec![("Company", self.company_name.clone())];

        if self.collaborators > 0 {
            let mut text = format!("{} collaborator(s) added", self.collaborators);
            if self.login_collaborators > 0 {
                text.push_str(&format!(", {} with login", self.login_collaborators));
            }
            lines.push(("Collaborators", text));
        }
        if self.teams > 0 {
            lines.push(("Teams", format!("{} team(s) created", self.teams)));
        }
        if self.roles > 0 {
            lines.push(("Roles", format!("{} role(s) defined", self.roles)));
        }
        if self.competencies > 0 {
            lines.push((
                "Competencies",
                format!("{} competency(ies) defined", self.competencies),
            ));
        }
        lines
    }
}

impl std::fmt::Display for RegistrationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .lines()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        write!(f, "{}", rendered.join("\n"))
    }
}
