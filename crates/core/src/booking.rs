//! Public booking wizard.
//!
//! An anonymous customer walks through seven fixed steps. Each step has a
//! gate that must pass before [`BookingDraft::advance`] moves on; going back
//! keeps every answer. Confirming only moves the draft to the terminal
//! `Done` step, nothing is written to the store.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{find_professional, find_service, is_offered_slot};
use crate::error::CoreError;

/// Minimum customer name length (characters).
pub const MIN_NAME_LEN: usize = 3;

/// Minimum phone length (characters, formatting included).
pub const MIN_PHONE_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Email,
    Contact,
    Service,
    Professional,
    DateTime,
    Confirmation,
    Done,
}

pub const TOTAL_STEPS: u8 = 7;
pub const MIN_STEP: u8 = 1;
pub const MAX_STEP: u8 = 7;

impl BookingStep {
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Email),
            2 => Ok(Self::Contact),
            3 => Ok(Self::Service),
            4 => Ok(Self::Professional),
            5 => Ok(Self::DateTime),
            6 => Ok(Self::Confirmation),
            7 => Ok(Self::Done),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking step {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    pub fn to_number(self) -> u8 {
        match self {
            Self::Email => 1,
            Self::Contact => 2,
            Self::Service => 3,
            Self::Professional => 4,
            Self::DateTime => 5,
            Self::Confirmation => 6,
            Self::Done => 7,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Email => "Bem-vindo ao agendamento",
            Self::Contact => "Cadastro rápido",
            Self::Service => "Escolha o serviço",
            Self::Professional => "Escolha o profissional",
            Self::DateTime => "Escolha a data e horário",
            Self::Confirmation => "Confirme seu agendamento",
            Self::Done => "Agendamento confirmado!",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Answers collected so far plus the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub step: BookingStep,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub service_id: Option<String>,
    pub professional_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            step: BookingStep::Email,
            email: String::new(),
            name: String::new(),
            phone: String::new(),
            service_id: None,
            professional_id: None,
            date: None,
            time: None,
        }
    }
}

/// Partial update of the answers. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingAnswers {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub service_id: Option<String>,
    pub professional_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

impl BookingDraft {
    pub fn is_done(&self) -> bool {
        self.step == BookingStep::Done
    }

    /// Merge answers into the draft. A finished booking is read-only.
    pub fn apply(&mut self, answers: BookingAnswers) -> Result<(), CoreError> {
        if self.is_done() {
            return Err(CoreError::Conflict(
                "Booking is already confirmed".to_string(),
            ));
        }
        if let Some(email) = answers.email {
            self.email = email.trim().to_string();
        }
        if let Some(name) = answers.name {
            self.name = name;
        }
        if let Some(phone) = answers.phone {
            self.phone = phone;
        }
        if let Some(id) = answers.service_id {
            self.service_id = Some(id);
        }
        if let Some(id) = answers.professional_id {
            self.professional_id = Some(id);
        }
        if let Some(date) = answers.date {
            self.date = Some(date);
        }
        if let Some(time) = answers.time {
            self.time = Some(time);
        }
        Ok(())
    }

    /// Check the gate of the current step.
    pub fn check_gate(&self) -> Result<(), CoreError> {
        match self.step {
            BookingStep::Email => self.check_email(),
            BookingStep::Contact => self.check_contact(),
            BookingStep::Service => self.check_service(),
            BookingStep::Professional => self.check_professional(),
            BookingStep::DateTime => self.check_date_time(),
            BookingStep::Confirmation => self.check_all(),
            BookingStep::Done => Err(CoreError::Conflict(
                "Booking is already confirmed".to_string(),
            )),
        }
    }

    /// Move forward one step if the current gate passes. The confirmation
    /// step is left through [`BookingDraft::confirm`] instead.
    pub fn advance(&mut self) -> Result<BookingStep, CoreError> {
        if self.step == BookingStep::Confirmation {
            return Err(CoreError::Validation(
                "Use confirm to finish the booking".to_string(),
            ));
        }
        self.check_gate()?;
        self.step = BookingStep::from_number(self.step.to_number() + 1)?;
        Ok(self.step)
    }

    /// Return to the previous step, keeping all answers.
    pub fn go_back(&mut self) -> Result<BookingStep, CoreError> {
        match self.step {
            BookingStep::Email => Err(CoreError::Validation(
                "Already at the first booking step".to_string(),
            )),
            BookingStep::Done => Err(CoreError::Conflict(
                "Booking is already confirmed".to_string(),
            )),
            step => {
                self.step = BookingStep::from_number(step.to_number() - 1)?;
                Ok(self.step)
            }
        }
    }

    /// Finish the booking from the confirmation step.
    pub fn confirm(&mut self) -> Result<BookingSummary, CoreError> {
        if self.step != BookingStep::Confirmation {
            return Err(CoreError::Validation(format!(
                "Booking can only be confirmed from the confirmation step (current: {})",
                self.step.to_number()
            )));
        }
        let summary = self.summary()?;
        self.step = BookingStep::Done;
        Ok(summary)
    }

    /// Resolve the selected ids into names and prices for display.
    pub fn summary(&self) -> Result<BookingSummary, CoreError> {
        self.check_all()?;
        let service = self
            .service_id
            .as_deref()
            .and_then(find_service)
            .ok_or_else(|| CoreError::validation("Select a service"))?;
        let professional = self
            .professional_id
            .as_deref()
            .and_then(find_professional)
            .ok_or_else(|| CoreError::validation("Select a professional"))?;
        let date = self
            .date
            .ok_or_else(|| CoreError::validation("Select a date"))?;
        let time = self
            .time
            .clone()
            .ok_or_else(|| CoreError::validation("Select a time"))?;

        Ok(BookingSummary {
            customer_name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            service_name: service.name.to_string(),
            price: service.price,
            professional_name: professional.name.to_string(),
            date: date.format("%d/%m/%Y").to_string(),
            time,
        })
    }

    // -- gates --

    fn check_email(&self) -> Result<(), CoreError> {
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err(CoreError::validation("Enter a valid email address"))
        }
    }

    fn check_contact(&self) -> Result<(), CoreError> {
        if self.name.chars().count() < MIN_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "Name must be at least {MIN_NAME_LEN} characters"
            )));
        }
        if self.phone.chars().count() < MIN_PHONE_LEN {
            return Err(CoreError::Validation(format!(
                "Phone must be at least {MIN_PHONE_LEN} characters"
            )));
        }
        Ok(())
    }

    fn check_service(&self) -> Result<(), CoreError> {
        match self.service_id.as_deref() {
            Some(id) if find_service(id).is_some() => Ok(()),
            Some(id) => Err(CoreError::not_found("Service", id)),
            None => Err(CoreError::validation("Select a service")),
        }
    }

    fn check_professional(&self) -> Result<(), CoreError> {
        match self.professional_id.as_deref() {
            Some(id) if find_professional(id).is_some() => Ok(()),
            Some(id) => Err(CoreError::not_found("Professional", id)),
            None => Err(CoreError::validation("Select a professional")),
        }
    }

    fn check_date_time(&self) -> Result<(), CoreError> {
        if self.date.is_none() {
            return Err(CoreError::validation("Select a date"));
        }
        match self.time.as_deref() {
            Some(t) if is_offered_slot(t) => Ok(()),
            Some(t) => Err(CoreError::Validation(format!(
                "Time {t} is not an available slot"
            ))),
            None => Err(CoreError::validation("Select a time")),
        }
    }

    fn check_all(&self) -> Result<(), CoreError> {
        self.check_email()?;
        self.check_contact()?;
        self.check_service()?;
        self.check_professional()?;
        self.check_date_time()
    }
}

/// Confirmation view of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub service_name: String,
    pub price: Decimal,
    pub professional_name: String,
    /// `dd/mm/yyyy`
    pub date: String,
    pub time: String,
}
