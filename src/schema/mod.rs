//! Step schemas - declarative field specs and validation rules
//!
//! Every wizard step declares its input fields as a static [`FieldSpec`]
//! table and validates a draft into a typed entry. Failures are collected
//! per field so a host can show each message under the field it belongs to.

pub mod collaborators;
pub mod company;
pub mod competencies;
pub mod roles;
pub mod rules;
pub mod teams;

use std::fmt::Debug;

use thiserror::Error;

pub use collaborators::{login_quota, CollaboratorDraft, CollaboratorSchema, LOGIN_FIELD};
pub use company::{CompanyDetailsDraft, CompanyDetailsSchema, CompanyDraft, CompanySchema};
pub use competencies::{CompetencyDraft, CompetencySchema};
pub use roles::{RoleDraft, RoleSchema};
pub use teams::{TeamDraft, TeamSchema};

/// Where the options of a choice field come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSource {
    /// A fixed list of `(value, label)` pairs
    Fixed(&'static [(&'static str, &'static str)]),
    /// Team names already in the aggregate (or in the list being edited)
    Teams,
    /// Role titles already in the aggregate
    Roles,
}

/// How a field is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Single-line text
    Text,
    /// Single-line text rendered masked
    Secret,
    /// Multi-line text
    Multiline,
    /// Yes/no
    Toggle,
    /// One value out of a list
    Choice(ChoiceSource),
}

/// Static description of one input field of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field key, matching the wire name of the entry field
    pub name: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
    pub placeholder: &'static str,
    /// Only shown when the named toggle is on
    pub visible_when: Option<&'static str>,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Text,
            required: false,
            placeholder,
            visible_when: None,
        }
    }

    pub const fn with_input(mut self, input: InputKind) -> Self {
        self.input = input;
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn shown_when(mut self, toggle: &'static str) -> Self {
        self.visible_when = Some(toggle);
        self
    }
}

/// Whether an error concerns one field or a rule spanning several
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required or format rule on a single field
    Field,
    /// Rule coupling several fields, reported against an anchor field
    CrossField,
}

/// A validation failure attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    pub kind: FieldErrorKind,
}

/// All failures found while validating one draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", render_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn render_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
            kind: FieldErrorKind::Field,
        });
    }

    pub fn cross_field(&mut self, anchor: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: anchor,
            message: message.into(),
            kind: FieldErrorKind::CrossField,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First error reported against `field`
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(value)` when nothing was reported
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A list-level cardinality limit was hit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QuotaExceeded {
    pub limit: usize,
    pub message: String,
}

/// In-progress input bound to form fields by name
///
/// Toggles read and write `"true"` / `"false"`.
pub trait Draft: Default + Clone + Debug {
    fn get(&self, field: &str) -> String;
    fn set(&mut self, field: &str, value: &str);
}

/// Validation contract of one wizard step
pub trait StepSchema {
    type Draft: Draft;
    type Entry: Clone + PartialEq + Debug;

    /// Input fields in display order
    fn fields() -> &'static [FieldSpec];

    /// Check a draft and produce the normalized entry
    fn validate(draft: &Self::Draft) -> Result<Self::Entry, ValidationErrors>;

    /// Draft pre-filled from a committed entry
    fn draft_from(entry: &Self::Entry) -> Self::Draft;

    /// One-line description for entry listings
    fn describe(entry: &Self::Entry) -> String;

    /// List-level rule checked before a valid entry is appended
    fn admit(_entries: &[Self::Entry], _entry: &Self::Entry) -> Result<(), QuotaExceeded> {
        Ok(())
    }
}

pub(crate) fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "yes" | "1")
}
