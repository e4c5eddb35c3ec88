//! Competency entry schema

use super::rules;
use super::{ChoiceSource, Draft, FieldSpec, InputKind, StepSchema, ValidationErrors};
use crate::model::{Competency, CompetencyType};

const TYPE_OPTIONS: &[(&str, &str)] = &[("technical", "Technical"), ("behavioral", "Behavioral")];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("title", "Competency", "Communication, Rust, Negotiation...").required(),
    FieldSpec::text("type", "Type", "Select a type")
        .with_input(InputKind::Choice(ChoiceSource::Fixed(TYPE_OPTIONS)))
        .required(),
    FieldSpec::text("team", "Team", "Applies to").with_input(InputKind::Choice(ChoiceSource::Teams)),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetencyDraft {
    pub title: String,
    pub competency_type: String,
    pub team: String,
}

impl Draft for CompetencyDraft {
    fn get(&self, field: &str) -> String {
        match field {
            "title" => self.title.clone(),
            "type" => self.competency_type.clone(),
            "team" => self.team.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "title" => &mut self.title,
            "type" => &mut self.competency_type,
            "team" => &mut self.team,
            _ => return,
        };
        *slot = value.to_string();
    }
}

pub struct CompetencySchema;

impl StepSchema for CompetencySchema {
    type Draft = CompetencyDraft;
    type Entry = Competency;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &CompetencyDraft) -> Result<Competency, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::require_min(
            &mut errors,
            "title",
            &draft.title,
            2,
            "Competency title is required",
        );

        let competency_type = if draft.competency_type.trim().is_empty() {
            errors.field("type", "Type is required");
            None
        } else {
            let parsed = CompetencyType::parse(&draft.competency_type);
            if parsed.is_none() {
                errors.field("type", "Type must be technical or behavioral");
            }
            parsed
        };

        match competency_type {
            Some(competency_type) if errors.is_empty() => Ok(Competency {
                title: draft.title.trim().to_string(),
                team: rules::optional(&draft.team),
                competency_type,
            }),
            _ => Err(errors),
        }
    }

    fn describe(entry: &Competency) -> String {
        let mut text = format!("{} · {}", entry.title, entry.competency_type.label());
        if let Some(ref team) = entry.team {
            text.push_str(&format!(" · Team: {team}"));
        }
        text
    }

    fn draft_from(entry: &Competency) -> CompetencyDraft {
        CompetencyDraft {
            title: entry.title.clone(),
            competency_type: entry.competency_type.as_str().to_string(),
            team: entry.team.clone().unwrap_or_default(),
        }
    }
}
