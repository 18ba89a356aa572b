//! Appointment models and intake validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Durable appointment identifier, assigned by the store on insert.
///
/// Not to be confused with [`crate::models::TicketNumber`], the live queue's
/// local admission counter.
pub type AppointmentId = i64;

/// A patient appointment row.
///
/// Index-held copies of this struct reflect the store only as of the last
/// reload; the store owns the authoritative record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Store-assigned id, immutable after insert
    pub id: AppointmentId,
    /// Patient name
    pub name: String,
    /// Age in years, validated non-negative at intake
    pub age: i64,
    /// Gender
    pub gender: String,
    /// Location
    pub location: String,
    /// Scheduled time, free text as entered
    pub scheduled_time: String,
    /// Contact phone number
    pub phone: String,
    /// Emergency flag; routes triage at admission time only and is
    /// informational on stored rows
    pub is_emergency: bool,
}

/// Intake validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("age must be a number, got {0:?}")]
    AgeNotNumeric(String),

    #[error("age must not be negative, got {0}")]
    AgeNegative(i64),
}

/// Raw field values captured from the intake form, before validation.
///
/// Everything arrives as text, age included; [`AppointmentForm::validate`]
/// is the only path from here to a storable row.
#[derive(Debug, Clone, Default)]
pub struct AppointmentForm {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub location: String,
    pub scheduled_time: String,
    pub phone: String,
    pub is_emergency: bool,
}

impl AppointmentForm {
    /// Validate the form into an insertable appointment.
    ///
    /// Fails fast on the first problem; nothing is written anywhere on
    /// failure.
    pub fn validate(self) -> Result<NewAppointment, ValidationError> {
        let required: [(&'static str, &str); 6] = [
            ("name", &self.name),
            ("age", &self.age),
            ("gender", &self.gender),
            ("location", &self.location),
            ("scheduled time", &self.scheduled_time),
            ("phone", &self.phone),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }

        let age: i64 = self
            .age
            .trim()
            .parse()
            .map_err(|_| ValidationError::AgeNotNumeric(self.age.clone()))?;
        if age < 0 {
            return Err(ValidationError::AgeNegative(age));
        }

        Ok(NewAppointment {
            name: self.name.trim().to_string(),
            age,
            gender: self.gender.trim().to_string(),
            location: self.location.trim().to_string(),
            scheduled_time: self.scheduled_time.trim().to_string(),
            phone: self.phone.trim().to_string(),
            is_emergency: self.is_emergency,
        })
    }
}

/// A validated appointment ready for insert; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub location: String,
    pub scheduled_time: String,
    pub phone: String,
    pub is_emergency: bool,
}

impl NewAppointment {
    /// Attach the store-assigned id, producing the full row.
    pub fn with_id(self, id: AppointmentId) -> Appointment {
        Appointment {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            location: self.location,
            scheduled_time: self.scheduled_time,
            phone: self.phone,
            is_emergency: self.is_emergency,
        }
    }
}

/// Partial field update; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub scheduled_time: Option<String>,
    pub phone: Option<String>,
    pub is_emergency: Option<bool>,
}

impl AppointmentUpdate {
    /// Merge the populated fields into an existing appointment.
    ///
    /// The id is never touched.
    pub fn apply_to(&self, appointment: &mut Appointment) {
        if let Some(name) = &self.name {
            appointment.name = name.clone();
        }
        if let Some(age) = self.age {
            appointment.age = age;
        }
        if let Some(gender) = &self.gender {
            appointment.gender = gender.clone();
        }
        if let Some(location) = &self.location {
            appointment.location = location.clone();
        }
        if let Some(scheduled_time) = &self.scheduled_time {
            appointment.scheduled_time = scheduled_time.clone();
        }
        if let Some(phone) = &self.phone {
            appointment.phone = phone.clone();
        }
        if let Some(is_emergency) = self.is_emergency {
            appointment.is_emergency = is_emergency;
        }
    }

    /// True if no field is populated.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.location.is_none()
            && self.scheduled_time.is_none()
            && self.phone.is_none()
            && self.is_emergency.is_none()
    }
}
