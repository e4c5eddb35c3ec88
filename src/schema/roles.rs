//! Role entry schema

use super::rules;
use super::{ChoiceSource, Draft, FieldSpec, InputKind, StepSchema, ValidationErrors};
use crate::model::Role;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("title", "Role title", "Developer, Analyst...").required(),
    FieldSpec::text("level", "Level", "Junior, Senior, Lead..."),
    FieldSpec::text("description", "Description", "Responsibilities"),
    FieldSpec::text("team", "Team", "Owning team").with_input(InputKind::Choice(ChoiceSource::Teams)),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    pub title: String,
    pub level: String,
    pub description: String,
    pub team: String,
}

impl Draft for RoleDraft {
    fn get(&self, field: &str) -> String {
        match field {
            "title" => self.title.clone(),
            "level" => self.level.clone(),
            "description" => self.description.clone(),
            "team" => self.team.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "title" => &mut self.title,
            "level" => &mut self.level,
            "description" => &mut self.description,
            "team" => &mut self.team,
            _ => return,
        };
        *slot = value.to_string();
    }
}

pub struct RoleSchema;

impl StepSchema for RoleSchema {
    type Draft = RoleDraft;
    type Entry = Role;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &RoleDraft) -> Result<Role, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::require_min(&mut errors, "title", &draft.title, 2, "Role title is required");

        errors.into_result(Role {
            title: draft.title.trim().to_string(),
            level: rules::optional(&draft.level),
            description: rules::optional(&draft.description),
            team: rules::optional(&draft.team),
        })
    }

    fn describe(entry: &Role) -> String {
        let mut text = entry.title.clone();
        if let Some(ref level) = entry.level {
            text.push_str(&format!(" ({level})"));
        }
        if let Some(ref team) = entry.team {
            text.push_str(&format!(" · Team: {team}"));
        }
        if let Some(ref description) = entry.description {
            text.push_str(&format!(" · {description}"));
        }
        text
    }

    fn draft_from(entry: &Role) -> RoleDraft {
        RoleDraft {
            title: entry.title.clone(),
            level: entry.level.clone().unwrap_or_default(),
            description: entry.description.clone().unwrap_or_default(),
            team: entry.team.clone().unwrap_or_default(),
        }
    }
}
