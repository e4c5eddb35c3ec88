//! Team entry schema

use super::rules;
use super::{ChoiceSource, Draft, FieldSpec, InputKind, StepSchema, ValidationErrors};
use crate::model::Team;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Team name", "Engineering, Sales...").required(),
    FieldSpec::text("objectives", "Objectives", "What this team is accountable for"),
    FieldSpec::text("location", "Location", "Office or remote"),
    FieldSpec::text("parentTeam", "Parent team", "Reports into")
        .with_input(InputKind::Choice(ChoiceSource::Teams)),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub objectives: String,
    pub location: String,
    pub parent_team: String,
}

impl Draft for TeamDraft {
    fn get(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "objectives" => self.objectives.clone(),
            "location" => self.location.clone(),
            "parentTeam" => self.parent_team.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "name" => &mut self.name,
            "objectives" => &mut self.objectives,
            "location" => &mut self.location,
            "parentTeam" => &mut self.parent_team,
            _ => return,
        };
        *slot = value.to_string();
    }
}

pub struct TeamSchema;

impl StepSchema for TeamSchema {
    type Draft = TeamDraft;
    type Entry = Team;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &TeamDraft) -> Result<Team, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::require_min(&mut errors, "name", &draft.name, 2, "Team name is required");

        errors.into_result(Team {
            name: draft.name.trim().to_string(),
            objectives: rules::optional(&draft.objectives),
            location: rules::optional(&draft.location),
            parent_team: rules::optional(&draft.parent_team),
        })
    }

    fn describe(entry: &Team) -> String {
        let mut parts = vec![entry.name.clone()];
        if let Some(ref location) = entry.location {
            parts.push(format!("Location: {location}"));
        }
        if let Some(ref parent) = entry.parent_team {
            parts.push(format!("Parent: {parent}"));
        }
        if let Some(ref objectives) = entry.objectives {
            parts.push(format!("Objectives: {objectives}"));
        }
        parts.join(" · ")
    }

    fn draft_from(entry: &Team) -> TeamDraft {
        TeamDraft {
            name: entry.name.clone(),
            objectives: entry.objectives.clone().unwrap_or_default(),
            location: entry.location.clone().unwrap_or_default(),
            parent_team: entry.parent_team.clone().unwrap_or_default(),
        }
    }
}
