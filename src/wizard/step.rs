//! Step descriptors and the validated step sequence

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which aggregate slot (and form) a step owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Company,
    CompanyDetails,
    Teams,
    Roles,
    Competencies,
    Collaborators,
}

impl StepKind {
    pub fn all() -> &'static [StepKind] {
        &[
            StepKind::Company,
            StepKind::CompanyDetails,
            StepKind::Teams,
            StepKind::Roles,
            StepKind::Competencies,
            StepKind::Collaborators,
        ]
    }

    /// Config name (`company_details`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Company => "company",
            StepKind::CompanyDetails => "company_details",
            StepKind::Teams => "teams",
            StepKind::Roles => "roles",
            StepKind::Competencies => "competencies",
            StepKind::Collaborators => "collaborators",
        }
    }

    /// Default step title
    pub fn title(&self) -> &'static str {
        match self {
            StepKind::Company => "Company",
            StepKind::CompanyDetails => "Company Details",
            StepKind::Teams => "Teams",
            StepKind::Roles => "Roles",
            StepKind::Competencies => "Competencies",
            StepKind::Collaborators => "Collaborators",
        }
    }

    /// Steps that build a list of entries rather than a single record
    pub fn is_list(&self) -> bool {
        !matches!(self, StepKind::Company | StepKind::CompanyDetails)
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the step sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDescriptor {
    /// 1-based position in the sequence
    pub id: u32,
    pub title: String,
    pub required: bool,
    pub kind: StepKind,
}

impl StepDescriptor {
    pub fn new(id: u32, kind: StepKind, required: bool) -> Self {
        Self {
            id,
            title: kind.title().to_string(),
            required,
            kind,
        }
    }
}

/// Reasons a step sequence is rejected at construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("step sequence is empty")]
    Empty,
    #[error("step ids must be 1..={expected_last} without gaps, found id {found} at position {position}")]
    NonContiguous {
        position: usize,
        found: u32,
        expected_last: usize,
    },
    #[error("step 1 ('{title}') must be required")]
    FirstStepOptional { title: String },
    #[error("step kind '{kind}' is used by more than one step")]
    DuplicateKind { kind: StepKind },
}

/// Ordered, validated list of steps
///
/// Ids are exactly `1..=N` after sorting, step 1 is required and no two
/// steps own the same [`StepKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<StepDescriptor>,
}

impl StepSequence {
    pub fn new(mut steps: Vec<StepDescriptor>) -> Result<Self, SequenceError> {
        if steps.is_empty() {
            return Err(SequenceError::Empty);
        }

        steps.sort_by_key(|s| s.id);
        let expected_last = steps.len();
        for (position, step) in steps.iter().enumerate() {
            if step.id as usize != position + 1 {
                return Err(SequenceError::NonContiguous {
                    position,
                    found: step.id,
                    expected_last,
                });
            }
        }

        if !steps[0].required {
            return Err(SequenceError::FirstStepOptional {
                title: steps[0].title.clone(),
            });
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.kind) {
                return Err(SequenceError::DuplicateKind { kind: step.kind });
            }
        }

        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn as_slice(&self) -> &[StepDescriptor] {
        &self.steps
    }

    /// Step at a 1-based index
    pub fn get(&self, index: usize) -> Option<&StepDescriptor> {
        index.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter()
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self {
            steps: default_steps(),
        }
    }
}

/// Company first, then the optional steps in dependency order
pub fn default_steps() -> Vec<StepDescriptor> {
    StepKind::all()
        .iter()
        .enumerate()
        .map(|(i, kind)| StepDescriptor::new(i as u32 + 1, *kind, *kind == StepKind::Company))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steps_are_valid() {
        let sequence = StepSequence::new(default_steps()).unwrap();
        assert_eq!(sequence.len(), 6);
        assert_eq!(sequence.get(1).map(|s| s.kind), Some(StepKind::Company));
        assert!(sequence.get(1).map(|s| s.required).unwrap_or(false));
        assert!(sequence.iter().skip(1).all(|s| !s.required));
        assert_eq!(sequence.get(0), None);
        assert_eq!(sequence.get(7), None);
        assert_eq!(sequence, StepSequence::default());
    }

    #[test]
    fn test_sequence_is_sorted_by_id() {
        let steps = vec![
            StepDescriptor::new(2, StepKind::Teams, false),
            StepDescriptor::new(1, StepKind::Company, true),
        ];
        let sequence = StepSequence::new(steps).unwrap();
        let kinds: Vec<StepKind> = sequence.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StepKind::Company, StepKind::Teams]);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert_eq!(StepSequence::new(Vec::new()), Err(SequenceError::Empty));
    }

    #[test]
    fn test_gap_in_ids_rejected() {
        let steps = vec![
            StepDescriptor::new(1, StepKind::Company, true),
            StepDescriptor::new(3, StepKind::Teams, false),
        ];
        assert!(matches!(
            StepSequence::new(steps),
            Err(SequenceError::NonContiguous { found: 3, .. })
        ));
    }

    #[test]
    fn test_optional_first_step_rejected() {
        let steps = vec![StepDescriptor::new(1, StepKind::Company, false)];
        assert!(matches!(
            StepSequence::new(steps),
            Err(SequenceError::FirstStepOptional { .. })
        ));
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let steps = vec![
            StepDescriptor::new(1, StepKind::Company, true),
            StepDescriptor::new(2, StepKind::Teams, false),
            StepDescriptor::new(3, StepKind::Teams, false),
        ];
        assert_eq!(
            StepSequence::new(steps),
            Err(SequenceError::DuplicateKind {
                kind: StepKind::Teams
            })
        );
    }

    #[test]
    fn test_step_kind_serde_names() {
        let json = serde_json::to_string(&StepKind::CompanyDetails).unwrap();
        assert_eq!(json, "\"company_details\"");
        let descriptor: StepDescriptor = serde_json::from_value(serde_json::json!({
            "id": 2, "title": "Equipe", "required": false, "kind": "teams"
        }))
        .unwrap();
        assert_eq!(descriptor.kind, StepKind::Teams);
        assert_eq!(descriptor.title, "Equipe");
    }
}
