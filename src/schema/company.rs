//! Company registration and company details schemas

use super::rules::{self, CNPJ_DIGITS, MIN_PASSWORD_LEN};
use super::{Draft, FieldSpec, InputKind, StepSchema, ValidationErrors};
use crate::model::{Company, CompanyDetails};

const COMPANY_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Company name", "Acme Ltda").required(),
    FieldSpec::text("cnpj", "CNPJ", "00.000.000/0000-00").required(),
    FieldSpec::text("email", "Email", "contact@company.com").required(),
    FieldSpec::text("password", "Password", "At least 6 characters")
        .with_input(InputKind::Secret)
        .required(),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDraft {
    pub name: String,
    pub cnpj: String,
    pub email: String,
    pub password: String,
}

impl Draft for CompanyDraft {
    fn get(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "cnpj" => self.cnpj.clone(),
            "email" => self.email.clone(),
            "password" => self.password.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "name" => &mut self.name,
            "cnpj" => &mut self.cnpj,
            "email" => &mut self.email,
            "password" => &mut self.password,
            _ => return,
        };
        *slot = value.to_string();
    }
}

/// Mandatory first step: account identity and credentials
pub struct CompanySchema;

impl StepSchema for CompanySchema {
    type Draft = CompanyDraft;
    type Entry = Company;

    fn fields() -> &'static [FieldSpec] {
        COMPANY_FIELDS
    }

    fn validate(draft: &CompanyDraft) -> Result<Company, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        rules::require_min(&mut errors, "name", &draft.name, 2, "Company name is required");
        if rules::cnpj_digits(&draft.cnpj).is_none() {
            errors.field("cnpj", format!("CNPJ must have {CNPJ_DIGITS} digits"));
        }
        if !rules::is_email(&draft.email) {
            errors.field("email", "Enter a valid email address");
        }
        if draft.password.chars().count() < MIN_PASSWORD_LEN {
            errors.field(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }

        errors.into_result(Company {
            email: draft.email.trim().to_string(),
            password: draft.password.clone(),
            cnpj: draft.cnpj.trim().to_string(),
            name: draft.name.trim().to_string(),
        })
    }

    fn describe(entry: &Company) -> String {
        format!("{} ({})", entry.name, entry.email)
    }

    fn draft_from(entry: &Company) -> CompanyDraft {
        CompanyDraft {
            name: entry.name.clone(),
            cnpj: entry.cnpj.clone(),
            email: entry.email.clone(),
            password: entry.password.clone(),
        }
    }
}

const DETAILS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("sector", "Sector", "Technology, Retail, Services..."),
    FieldSpec::text("description", "Product / service description", "What does your company do?")
        .with_input(InputKind::Multiline),
    FieldSpec::text("address", "Address", "Street, number"),
    FieldSpec::text("city", "City", "City"),
    FieldSpec::text("state", "State", "SP"),
    FieldSpec::text("zipCode", "Zip code", "00000-000"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDetailsDraft {
    pub sector: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Draft for CompanyDetailsDraft {
    fn get(&self, field: &str) -> String {
        match field {
            "sector" => self.sector.clone(),
            "description" => self.description.clone(),
            "address" => self.address.clone(),
            "city" => self.city.clone(),
            "state" => self.state.clone(),
            "zipCode" => self.zip_code.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "sector" => &mut self.sector,
            "description" => &mut self.description,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "zipCode" => &mut self.zip_code,
            _ => return,
        };
        *slot = value.to_string();
    }
}

/// Free-form business metadata; every field is optional
pub struct CompanyDetailsSchema;

impl StepSchema for CompanyDetailsSchema {
    type Draft = CompanyDetailsDraft;
    type Entry = CompanyDetails;

    fn fields() -> &'static [FieldSpec] {
        DETAILS_FIELDS
    }

    fn validate(draft: &CompanyDetailsDraft) -> Result<CompanyDetails, ValidationErrors> {
        let description = draft
            .description
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CompanyDetails {
            sector: draft.sector.trim().to_string(),
            description: description.trim().to_string(),
            address: draft.address.trim().to_string(),
            city: draft.city.trim().to_string(),
            state: draft.state.trim().to_string(),
            zip_code: draft.zip_code.trim().to_string(),
        })
    }

    fn describe(entry: &CompanyDetails) -> String {
        [&entry.sector, &entry.city, &entry.state]
            .iter()
            .filter(|v| !v.is_empty())
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(" · ")
    }

    fn draft_from(entry: &CompanyDetails) -> CompanyDetailsDraft {
        CompanyDetailsDraft {
            sector: entry.sector.clone(),
            description: entry.description.clone(),
            address: entry.address.clone(),
            city: entry.city.clone(),
            state: entry.state.clone(),
            zip_code: entry.zip_code.clone(),
        }
    }
}
