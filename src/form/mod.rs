//! Step forms: local entry building before output is handed to the wizard
//!
//! List steps use an [`EntryCollector`], record steps a [`RecordForm`].
//! [`StepForm`] wraps the six concrete forms so a host can drive whichever
//! step is current through one type.

pub mod collector;
pub mod record;

pub use collector::{AddEntryError, EntryCollector};
pub use record::RecordForm;

use crate::model::{AggregatePatch, RegistrationAggregate, MAX_LOGIN_COLLABORATORS};
use crate::schema::{
    login_quota, ChoiceSource, CollaboratorSchema, CompanyDetailsSchema, CompanySchema,
    CompetencySchema, Draft, FieldSpec, QuotaExceeded, RoleSchema, StepSchema, TeamSchema,
    ValidationErrors, LOGIN_FIELD,
};
use crate::wizard::StepKind;

/// Input field table of a step kind
pub fn fields_for(kind: StepKind) -> &'static [FieldSpec] {
    match kind {
        StepKind::Company => CompanySchema::fields(),
        StepKind::CompanyDetails => CompanyDetailsSchema::fields(),
        StepKind::Teams => TeamSchema::fields(),
        StepKind::Roles => RoleSchema::fields(),
        StepKind::Competencies => CompetencySchema::fields(),
        StepKind::Collaborators => CollaboratorSchema::fields(),
    }
}

/// The form of whichever step is mounted
#[derive(Debug)]
pub enum StepForm {
    Company(RecordForm<CompanySchema>),
    CompanyDetails(RecordForm<CompanyDetailsSchema>),
    Teams(EntryCollector<TeamSchema>),
    Roles(EntryCollector<RoleSchema>),
    Competencies(EntryCollector<CompetencySchema>),
    Collaborators(EntryCollector<CollaboratorSchema>),
}

/// Run the same expression against whichever form is inside
macro_rules! each_form {
    ($form:expr, $inner:ident => $body:expr) => {
        match $form {
            StepForm::Company($inner) => $body,
            StepForm::CompanyDetails($inner) => $body,
            StepForm::Teams($inner) => $body,
            StepForm::Roles($inner) => $body,
            StepForm::Competencies($inner) => $body,
            StepForm::Collaborators($inner) => $body,
        }
    };
}

fn labels<S: StepSchema>(collector: &EntryCollector<S>) -> Vec<String> {
    collector.entries().iter().map(S::describe).collect()
}

impl StepForm {
    /// Build the form for `kind`, pre-filled from its aggregate slot
    pub fn mount(kind: StepKind, aggregate: &RegistrationAggregate) -> Self {
        tracing::debug!(step = %kind, "mounting form");
        match kind {
            StepKind::Company => StepForm::Company(RecordForm::new(&aggregate.company)),
            StepKind::CompanyDetails => {
                StepForm::CompanyDetails(RecordForm::new(&aggregate.company_details))
            }
            StepKind::Teams => StepForm::Teams(EntryCollector::new(aggregate.teams.clone())),
            StepKind::Roles => StepForm::Roles(EntryCollector::new(aggregate.roles.clone())),
            StepKind::Competencies => {
                StepForm::Competencies(EntryCollector::new(aggregate.competencies.clone()))
            }
            StepKind::Collaborators => {
                StepForm::Collaborators(EntryCollector::new(aggregate.collaborators.clone()))
            }
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            StepForm::Company(_) => StepKind::Company,
            StepForm::CompanyDetails(_) => StepKind::CompanyDetails,
            StepForm::Teams(_) => StepKind::Teams,
            StepForm::Roles(_) => StepKind::Roles,
            StepForm::Competencies(_) => StepKind::Competencies,
            StepForm::Collaborators(_) => StepKind::Collaborators,
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.kind())
    }

    pub fn is_list(&self) -> bool {
        self.kind().is_list()
    }

    /// Current draft value of `field`
    pub fn field_value(&self, field: &str) -> String {
        each_form!(self, form => form.draft().get(field))
    }

    pub fn set_field(&mut self, field: &str, value: &str) {
        each_form!(self, form => form.set_field(field, value))
    }

    /// Whether `spec` should be shown given the draft's toggles
    pub fn is_visible(&self, spec: &FieldSpec) -> bool {
        match spec.visible_when {
            Some(toggle) => self.field_value(toggle) == "true",
            None => true,
        }
    }

    /// Append the in-progress draft on list steps
    ///
    /// Returns `Ok(false)` on record steps, which have no list.
    pub fn add_draft(&mut self) -> Result<bool, AddEntryError> {
        match self {
            StepForm::Company(_) | StepForm::CompanyDetails(_) => Ok(false),
            StepForm::Teams(c) => c.submit_draft().map(|_| true),
            StepForm::Roles(c) => c.submit_draft().map(|_| true),
            StepForm::Competencies(c) => c.submit_draft().map(|_| true),
            StepForm::Collaborators(c) => c.submit_draft().map(|_| true),
        }
    }

    /// Remove the entry at `position`; returns whether anything was removed
    pub fn remove_entry(&mut self, position: usize) -> bool {
        match self {
            StepForm::Company(_) | StepForm::CompanyDetails(_) => false,
            StepForm::Teams(c) => c.remove_entry(position).is_some(),
            StepForm::Roles(c) => c.remove_entry(position).is_some(),
            StepForm::Competencies(c) => c.remove_entry(position).is_some(),
            StepForm::Collaborators(c) => c.remove_entry(position).is_some(),
        }
    }

    /// One line per entry, in list order
    pub fn entry_labels(&self) -> Vec<String> {
        match self {
            StepForm::Company(_) | StepForm::CompanyDetails(_) => Vec::new(),
            StepForm::Teams(c) => labels(c),
            StepForm::Roles(c) => labels(c),
            StepForm::Competencies(c) => labels(c),
            StepForm::Collaborators(c) => labels(c),
        }
    }

    pub fn entry_count(&self) -> usize {
        match self {
            StepForm::Company(_) | StepForm::CompanyDetails(_) => 0,
            StepForm::Teams(c) => c.entries().len(),
            StepForm::Roles(c) => c.entries().len(),
            StepForm::Competencies(c) => c.entries().len(),
            StepForm::Collaborators(c) => c.entries().len(),
        }
    }

    /// Login-enabled collaborators in the list being edited
    pub fn login_count(&self) -> usize {
        match self {
            StepForm::Collaborators(c) => c.entries().iter().filter(|e| e.has_login).count(),
            _ => 0,
        }
    }

    /// Short status shown next to a field's label, such as `(1/2)` for logins
    pub fn field_hint(&self, spec: &FieldSpec) -> Option<String> {
        match self {
            StepForm::Collaborators(_) if spec.name == LOGIN_FIELD => Some(format!(
                "({}/{MAX_LOGIN_COLLABORATORS})",
                self.login_count()
            )),
            _ => None,
        }
    }

    /// Why `spec` may not be switched on right now
    ///
    /// The login toggle locks once the quota is used up, unless the draft
    /// already has it on. Adding an entry still goes through the schema's
    /// quota check.
    pub fn locked_reason(&self, spec: &FieldSpec) -> Option<QuotaExceeded> {
        match self {
            StepForm::Collaborators(c)
                if spec.name == LOGIN_FIELD
                    && !c.draft().has_login
                    && self.login_count() >= MAX_LOGIN_COLLABORATORS =>
            {
                Some(login_quota())
            }
            _ => None,
        }
    }

    /// Options for a choice field as `(value, label)` pairs
    ///
    /// Team choices on the teams step come from the list being edited, so a
    /// new team can report into one added moments ago.
    pub fn choices(
        &self,
        source: ChoiceSource,
        aggregate: &RegistrationAggregate,
    ) -> Vec<(String, String)> {
        let names = match (source, self) {
            (ChoiceSource::Fixed(options), _) => {
                return options
                    .iter()
                    .map(|(value, label)| (value.to_string(), label.to_string()))
                    .collect();
            }
            (ChoiceSource::Teams, StepForm::Teams(c)) => {
                c.entries().iter().map(|t| t.name.clone()).collect()
            }
            (ChoiceSource::Teams, _) => aggregate.team_names(),
            (ChoiceSource::Roles, StepForm::Roles(c)) => {
                c.entries().iter().map(|r| r.title.clone()).collect()
            }
            (ChoiceSource::Roles, _) => aggregate.role_titles(),
        };
        names.into_iter().map(|n| (n.clone(), n)).collect()
    }

    /// The step's output as a patch for the wizard
    ///
    /// List steps always succeed with the current entries; record steps
    /// validate their record first.
    pub fn commit(&self) -> Result<AggregatePatch, ValidationErrors> {
        match self {
            StepForm::Company(f) => f.commit().map(AggregatePatch::company),
            StepForm::CompanyDetails(f) => f.commit().map(AggregatePatch::company_details),
            StepForm::Teams(c) => Ok(AggregatePatch::teams(c.commit())),
            StepForm::Roles(c) => Ok(AggregatePatch::roles(c.commit())),
            StepForm::Competencies(c) => Ok(AggregatePatch::competencies(c.commit())),
            StepForm::Collaborators(c) => Ok(AggregatePatch::collaborators(c.commit())),
        }
    }
}
