//! Registration aggregate and the entry types each step produces

use serde::{Deserialize, Serialize};

/// Maximum number of collaborators that may be given a login
pub const MAX_LOGIN_COLLABORATORS: usize = 2;

/// Account credentials and identity collected by the mandatory first step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub email: String,
    pub password: String,
    pub cnpj: String,
    pub name: String,
}

/// Optional business metadata
///
/// Every field defaults to an empty string, which is also what a skipped
/// details step leaves behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

impl CompanyDetails {
    /// Whether nothing has been filled in
    pub fn is_empty(&self) -> bool {
        [
            &self.sector,
            &self.description,
            &self.address,
            &self.city,
            &self.state,
            &self.zip_code,
        ]
        .iter()
        .all(|v| v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Name of another team this one reports into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// Kind of competency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetencyType {
    Technical,
    Behavioral,
}

impl CompetencyType {
    pub fn all() -> &'static [CompetencyType] {
        &[CompetencyType::Technical, CompetencyType::Behavioral]
    }

    /// Wire name (`technical` / `behavioral`)
    pub fn as_str(&self) -> &'static str {
        match self {
            CompetencyType::Technical => "technical",
            CompetencyType::Behavioral => "behavioral",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompetencyType::Technical => "Technical",
            CompetencyType::Behavioral => "Behavioral",
        }
    }

    /// Parse a wire name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl std::fmt::Display for CompetencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(rename = "type")]
    pub competency_type: CompetencyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub has_login: bool,
}

/// The single record accumulating every step's committed output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationAggregate {
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub company_details: CompanyDetails,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub competencies: Vec<Competency>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
}

impl RegistrationAggregate {
    /// Names of the teams defined so far, in entry order
    pub fn team_names(&self) -> Vec<String> {
        self.teams.iter().map(|t| t.name.clone()).collect()
    }

    /// Titles of the roles defined so far, in entry order
    pub fn role_titles(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.title.clone()).collect()
    }

    pub fn login_collaborator_count(&self) -> usize {
        self.collaborators.iter().filter(|c| c.has_login).count()
    }
}
