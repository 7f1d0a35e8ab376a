use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{capabilities::Fields, strings};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// Wire names of the empty fields, in form order.
    #[error("{}", strings::FIELDS_REQUIRED)]
    MissingFields(Vec<&'static str>),
}

/// Outcome of pressing submit.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A write is already in flight.
    Ignored,
    Invalid(FormError),
    Write(Fields),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub error: Option<String>,
    pub submitting: bool,
}

/// A form whose every declared field is required. Values are checked with
/// plain emptiness: a field of spaces passes.
pub trait Form {
    /// `(wire name, value)` for every required field, in display order.
    fn entries(&self) -> Vec<(&'static str, &str)>;

    /// Fields written alongside the user's input.
    fn extra_fields(&self) -> Fields {
        Fields::new()
    }

    fn status(&self) -> &FormStatus;

    fn status_mut(&mut self) -> &mut FormStatus;

    fn validate(&self) -> Result<Fields, FormError> {
        let entries = self.entries();
        let missing: Vec<&'static str> = entries
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        let mut fields = self.extra_fields();
        for (name, value) in entries {
            fields.insert(name.to_string(), Value::String(value.to_string()));
        }
        Ok(fields)
    }

    fn submit(&mut self) -> Submission {
        if self.status().submitting {
            return Submission::Ignored;
        }
        match self.validate() {
            Ok(fields) => {
                let status = self.status_mut();
                status.error = None;
                status.submitting = true;
                Submission::Write(fields)
            }
            Err(e) => {
                self.status_mut().error = Some(e.to_string());
                Submission::Invalid(e)
            }
        }
    }

    /// Re-enables submit once the write settled. Input is kept either way.
    fn finish_submit(&mut self) {
        self.status_mut().submitting = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationField {
    Name,
    Surname,
    Email,
    Phone,
    Message,
}

impl RegistrationField {
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "ime",
            Self::Surname => "prezime",
            Self::Email => "email",
            Self::Phone => "mobitel",
            Self::Message => "poruka",
        }
    }
}

/// Sign-up for a community event, written to the registrations collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    pub event_title: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: FormStatus,
}

impl RegistrationForm {
    pub fn new(event_title: impl Into<String>) -> Self {
        Self {
            event_title: event_title.into(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: RegistrationField, value: String) {
        let slot = match field {
            RegistrationField::Name => &mut self.name,
            RegistrationField::Surname => &mut self.surname,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Phone => &mut self.phone,
            RegistrationField::Message => &mut self.message,
        };
        *slot = value;
    }
}

impl Form for RegistrationForm {
    fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            (RegistrationField::Name.wire_name(), self.name.as_str()),
            (RegistrationField::Surname.wire_name(), self.surname.as_str()),
            (RegistrationField::Email.wire_name(), self.email.as_str()),
            (RegistrationField::Phone.wire_name(), self.phone.as_str()),
            (RegistrationField::Message.wire_name(), self.message.as_str()),
        ]
    }

    fn extra_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(
            "dogadaj".to_string(),
            Value::String(self.event_title.clone()),
        );
        fields
    }

    fn status(&self) -> &FormStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportField {
    Address,
    Photo,
}

impl ReportField {
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Address => "adresa",
            Self::Photo => "slika",
        }
    }
}

/// Illegal dumping report: where, plus a photo reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportForm {
    pub address: String,
    pub photo: String,
    pub status: FormStatus,
}

impl ReportForm {
    pub fn set(&mut self, field: ReportField, value: String) {
        match field {
            ReportField::Address => self.address = value,
            ReportField::Photo => self.photo = value,
        }
    }
}

impl Form for ReportForm {
    fn entries(&self) -> Vec<(&'static str, &str)> {
        vec![
            (ReportField::Address.wire_name(), self.address.as_str()),
            (ReportField::Photo.wire_name(), self.photo.as_str()),
        ]
    }

    fn status(&self) -> &FormStatus {
        &self.status
    }

    fn status_mut(&mut self) -> &mut FormStatus {
        &mut self.status
    }
}
