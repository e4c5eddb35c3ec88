//! Collaborator entry schema
//!
//! The only step with a cross-field rule (login requires credentials) and a
//! list-level quota (at most [`MAX_LOGIN_COLLABORATORS`] logins).

use super::rules;
use super::{
    parse_flag, ChoiceSource, Draft, FieldSpec, InputKind, QuotaExceeded, StepSchema,
    ValidationErrors,
};
use crate::model::{Collaborator, MAX_LOGIN_COLLABORATORS};

/// Toggle that grants a collaborator a login
pub const LOGIN_FIELD: &str = "hasLogin";

/// Error for a login-enabled entry once the quota is used up
pub fn login_quota() -> QuotaExceeded {
    QuotaExceeded {
        limit: MAX_LOGIN_COLLABORATORS,
        message: format!("You can add at most {MAX_LOGIN_COLLABORATORS} collaborators with login"),
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Collaborator name", "Full name").required(),
    FieldSpec::text("role", "Role", "Select a role")
        .with_input(InputKind::Choice(ChoiceSource::Roles))
        .required(),
    FieldSpec::text("team", "Team", "Select a team")
        .with_input(InputKind::Choice(ChoiceSource::Teams)),
    FieldSpec::text("manager", "Manager", "Manager's name"),
    FieldSpec::text(LOGIN_FIELD, "Has login", "").with_input(InputKind::Toggle),
    FieldSpec::text("email", "Email", "email@example.com").shown_when(LOGIN_FIELD),
    FieldSpec::text("password", "Password", "Access password")
        .with_input(InputKind::Secret)
        .shown_when(LOGIN_FIELD),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollaboratorDraft {
    pub name: String,
    pub role: String,
    pub team: String,
    pub manager: String,
    pub email: String,
    pub password: String,
    pub has_login: bool,
}

impl Draft for CollaboratorDraft {
    fn get(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "role" => self.role.clone(),
            "team" => self.team.clone(),
            "manager" => self.manager.clone(),
            "email" => self.email.clone(),
            "password" => self.password.clone(),
            LOGIN_FIELD => self.has_login.to_string(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "name" => &mut self.name,
            "role" => &mut self.role,
            "team" => &mut self.team,
            "manager" => &mut self.manager,
            "email" => &mut self.email,
            "password" => &mut self.password,
            LOGIN_FIELD => {
                self.has_login = parse_flag(value);
                return;
            }
            _ => return,
        };
        *slot = value.to_string();
    }
}

pub struct CollaboratorSchema;

impl StepSchema for CollaboratorSchema {
    type Draft = CollaboratorDraft;
    type Entry = Collaborator;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(draft: &CollaboratorDraft) -> Result<Collaborator, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::require_min(&mut errors, "name", &draft.name, 2, "Collaborator name is required");
        rules::require_min(&mut errors, "role", &draft.role, 1, "Role is required");

        // Credentials only matter for collaborators who get a login
        let (email, password) = if draft.has_login {
            let email = rules::optional(&draft.email);
            let password = (!draft.password.trim().is_empty()).then(|| draft.password.clone());

            match (&email, &password) {
                (Some(address), Some(_)) => {
                    if !rules::is_email(address) {
                        errors.field("email", "Enter a valid email address");
                    }
                }
                _ => errors.cross_field(
                    "email",
                    "Email and password are required for collaborators with login",
                ),
            }
            (email, password)
        } else {
            (None, None)
        };

        errors.into_result(Collaborator {
            name: draft.name.trim().to_string(),
            role: draft.role.trim().to_string(),
            team: rules::optional(&draft.team),
            manager: rules::optional(&draft.manager),
            email,
            password,
            has_login: draft.has_login,
        })
    }

    fn describe(entry: &Collaborator) -> String {
        let mut text = format!("{} · Role: {}", entry.name, entry.role);
        if let Some(ref team) = entry.team {
            text.push_str(&format!(" · Team: {team}"));
        }
        if let Some(ref manager) = entry.manager {
            text.push_str(&format!(" · Manager: {manager}"));
        }
        if entry.has_login {
            text.push_str(" · ✓ login");
        }
        text
    }

    fn draft_from(entry: &Collaborator) -> CollaboratorDraft {
        CollaboratorDraft {
            name: entry.name.clone(),
            role: entry.role.clone(),
            team: entry.team.clone().unwrap_or_default(),
            manager: entry.manager.clone().unwrap_or_default(),
            email: entry.email.clone().unwrap_or_default(),
            password: entry.password.clone().unwrap_or_default(),
            has_login: entry.has_login,
        }
    }

    fn admit(entries: &[Collaborator], entry: &Collaborator) -> Result<(), QuotaExceeded> {
        let logins = entries.iter().filter(|c| c.has_login).count();
        if entry.has_login && logins >= MAX_LOGIN_COLLABORATORS {
            return Err(login_quota());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldErrorKind;

    fn draft(name: &str, has_login: bool) -> CollaboratorDraft {
        CollaboratorDraft {
            name: name.to_string(),
            role: "Engineer".to_string(),
            email: if has_login {
                format!("{}@acme.com", name.to_lowercase())
            } else {
                String::new()
            },
            password: if has_login { "secret1".to_string() } else { String::new() },
            has_login,
            ..Default::default()
        }
    }

    #[test]
    fn test_login_without_credentials_is_cross_field_error_on_email() {
        let errors = CollaboratorSchema::validate(&CollaboratorDraft {
            has_login: true,
            ..draft("Ana", false)
        })
        .unwrap_err();

        let error = errors.for_field("email").unwrap();
        assert_eq!(error.kind, FieldErrorKind::CrossField);
        assert_eq!(
            error.message,
            "Email and password are required for collaborators with login"
        );
        assert!(errors.for_field("password").is_none());
    }

    #[test]
    fn test_login_with_only_email_still_rejected() {
        let mut d = draft("Ana", true);
        d.password = "   ".to_string();
        let errors = CollaboratorSchema::validate(&d).unwrap_err();
        assert_eq!(
            errors.for_field("email").map(|e| e.kind),
            Some(FieldErrorKind::CrossField)
        );
    }

    #[test]
    fn test_login_email_must_look_like_an_address() {
        let mut d = draft("Ana", true);
        d.email = "ana".to_string();
        let errors = CollaboratorSchema::validate(&d).unwrap_err();
        assert_eq!(
            errors.for_field("email").map(|e| e.kind),
            Some(FieldErrorKind::Field)
        );
    }

    #[test]
    fn test_no_login_drops_credentials() {
        let mut d = draft("Bruno", false);
        d.email = "bruno@acme.com".to_string();
        d.password = "secret1".to_string();
        let collaborator = CollaboratorSchema::validate(&d).unwrap();
        assert!(!collaborator.has_login);
        assert_eq!(collaborator.email, None);
        assert_eq!(collaborator.password, None);
    }

    #[test]
    fn test_name_and_role_required() {
        let errors = CollaboratorSchema::validate(&CollaboratorDraft::default()).unwrap_err();
        assert_eq!(
            errors.for_field("name").map(|e| e.message.as_str()),
            Some("Collaborator name is required")
        );
        assert_eq!(
            errors.for_field("role").map(|e| e.message.as_str()),
            Some("Role is required")
        );
    }

    #[test]
    fn test_admit_enforces_login_quota() {
        let first = CollaboratorSchema::validate(&draft("Ana", true)).unwrap();
        let second = CollaboratorSchema::validate(&draft("Bia", true)).unwrap();
        let third = CollaboratorSchema::validate(&draft("Caio", true)).unwrap();
        let plain = CollaboratorSchema::validate(&draft("Duda", false)).unwrap();

        let entries = vec![first, second];
        let err = CollaboratorSchema::admit(&entries, &third).unwrap_err();
        assert_eq!(err.limit, 2);
        assert_eq!(err.to_string(), "You can add at most 2 collaborators with login");

        assert!(CollaboratorSchema::admit(&entries, &plain).is_ok());
    }

    #[test]
    fn test_has_login_binds_as_flag() {
        let mut d = CollaboratorDraft::default();
        d.set("hasLogin", "true");
        assert!(d.has_login);
        assert_eq!(d.get("hasLogin"), "true");
        d.set("hasLogin", "false");
        assert!(!d.has_login);
    }
}
