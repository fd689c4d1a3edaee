//! Onboarding wizard: step definitions, the in-progress draft, and the
//! submission built from it when the owner saves.
//!
//! The draft is persisted per user as JSON so a reload resumes the wizard
//! exactly where it was left. All mutation happens through the methods on
//! [`OnboardingDraft`]; they keep the step counter inside
//! `MIN_STEP..=MAX_STEP` and slot 0 of the staff list reserved for the owner.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::business_type::BusinessType;
use crate::error::CoreError;
use crate::plans::find_plan;
use crate::schedule::{Weekday, WeeklySchedule};
use crate::types::Minutes;

// ---------------------------------------------------------------------------
// Onboarding steps
// ---------------------------------------------------------------------------

/// The five steps in the onboarding wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    BusinessType,
    Professionals,
    Services,
    Schedule,
    Plan,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 5;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 5;

impl OnboardingStep {
    /// Convert a 1-based step number to an `OnboardingStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::BusinessType),
            2 => Ok(Self::Professionals),
            3 => Ok(Self::Services),
            4 => Ok(Self::Schedule),
            5 => Ok(Self::Plan),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::BusinessType => 1,
            Self::Professionals => 2,
            Self::Services => 3,
            Self::Schedule => 4,
            Self::Plan => 5,
        }
    }

    /// Title shown above the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::BusinessType => "Tipo de Negócio",
            Self::Professionals => "Profissionais",
            Self::Services => "Serviços",
            Self::Schedule => "Agenda",
            Self::Plan => "Conclusão",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft entries
// ---------------------------------------------------------------------------

/// A staff member as entered during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalDraft {
    pub name: String,
}

/// Largest price a `services.price NUMERIC(10, 2)` column holds.
pub const MAX_SERVICE_PRICE: Decimal = dec!(99999999.99);

/// A service as entered during onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub name: String,
    /// Duration in minutes.
    pub duration: Minutes,
    pub price: Decimal,
}

impl ServiceDraft {
    pub fn new(name: impl Into<String>, duration: Minutes, price: Decimal) -> Self {
        Self {
            name: name.into(),
            duration,
            price,
        }
    }

    /// A service can only be added with a name, a positive duration and a
    /// positive price in whole cents no larger than [`MAX_SERVICE_PRICE`].
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.duration > 0
            && self.price > Decimal::ZERO
            && self.price <= MAX_SERVICE_PRICE
            && self.price.normalize().scale() <= 2
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Everything collected by the wizard so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    pub step: u8,
    pub business_type: Option<BusinessType>,
    /// Slot 0 is the account owner.
    pub professionals: Vec<ProfessionalDraft>,
    pub services: Vec<ServiceDraft>,
    pub schedule: WeeklySchedule,
    pub plan_id: Option<String>,
}

impl Default for OnboardingDraft {
    fn default() -> Self {
        Self {
            step: MIN_STEP,
            business_type: None,
            professionals: vec![ProfessionalDraft::default()],
            services: Vec::new(),
            schedule: WeeklySchedule::default(),
            plan_id: None,
        }
    }
}

impl OnboardingDraft {
    pub fn current_step(&self) -> Result<OnboardingStep, CoreError> {
        OnboardingStep::from_number(self.step)
    }

    pub fn set_step(&mut self, n: u8) -> Result<OnboardingStep, CoreError> {
        let step = OnboardingStep::from_number(n)?;
        self.step = n;
        Ok(step)
    }

    pub fn next_step(&mut self) -> Result<OnboardingStep, CoreError> {
        if self.step >= MAX_STEP {
            return Err(CoreError::Validation(
                "Already at the last onboarding step".to_string(),
            ));
        }
        self.set_step(self.step + 1)
    }

    pub fn previous_step(&mut self) -> Result<OnboardingStep, CoreError> {
        if self.step <= MIN_STEP {
            return Err(CoreError::Validation(
                "Already at the first onboarding step".to_string(),
            ));
        }
        self.set_step(self.step - 1)
    }

    pub fn set_business_type(&mut self, business_type: BusinessType) {
        self.business_type = Some(business_type);
    }

    /// Append a staff member. Blank names are ignored and return `false`.
    pub fn add_professional(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.professionals.push(ProfessionalDraft {
            name: name.to_string(),
        });
        true
    }

    /// Fill the owner slot with `name` unless it already holds one.
    pub fn set_owner_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.professionals.first_mut() {
            Some(owner) if owner.name.trim().is_empty() => {
                owner.name = name.to_string();
                true
            }
            Some(_) => false,
            None => {
                self.professionals.push(ProfessionalDraft {
                    name: name.to_string(),
                });
                true
            }
        }
    }

    /// Remove a staff member. The owner at index 0 cannot be removed.
    pub fn remove_professional(&mut self, index: usize) -> Result<ProfessionalDraft, CoreError> {
        if index == 0 {
            return Err(CoreError::Validation(
                "The account owner cannot be removed from the staff list".to_string(),
            ));
        }
        if index >= self.professionals.len() {
            return Err(CoreError::Validation(format!(
                "Professional index {index} is out of range"
            )));
        }
        Ok(self.professionals.remove(index))
    }

    /// Append a service. Invalid input leaves the list untouched and
    /// returns `false`.
    pub fn add_service(&mut self, name: &str, duration: Minutes, price: Decimal) -> bool {
        let service = ServiceDraft::new(name.trim(), duration, price);
        if !service.is_valid() {
            return false;
        }
        self.services.push(service);
        true
    }

    /// Replace the service at `index`. Invalid input is ignored (`Ok(false)`).
    pub fn update_service(
        &mut self,
        index: usize,
        name: &str,
        duration: Minutes,
        price: Decimal,
    ) -> Result<bool, CoreError> {
        let slot = self.services.get_mut(index).ok_or_else(|| {
            CoreError::Validation(format!("Service index {index} is out of range"))
        })?;
        let service = ServiceDraft::new(name.trim(), duration, price);
        if !service.is_valid() {
            return Ok(false);
        }
        *slot = service;
        Ok(true)
    }

    pub fn remove_service(&mut self, index: usize) -> Result<ServiceDraft, CoreError> {
        if index >= self.services.len() {
            return Err(CoreError::Validation(format!(
                "Service index {index} is out of range"
            )));
        }
        Ok(self.services.remove(index))
    }

    /// Replace the service list with the starter catalog for `business_type`.
    /// Returns how many services were loaded.
    pub fn load_default_services(&mut self, business_type: BusinessType) -> usize {
        self.services = business_type.default_services();
        self.services.len()
    }

    pub fn set_schedule(
        &mut self,
        day: Weekday,
        enabled: bool,
        start: &str,
        end: &str,
    ) -> Result<(), CoreError> {
        self.schedule.set(day, enabled, start, end)
    }

    pub fn set_day_enabled(&mut self, day: Weekday, enabled: bool) {
        self.schedule.set_enabled(day, enabled);
    }

    pub fn select_plan(&mut self, plan_id: &str) -> Result<(), CoreError> {
        let plan = find_plan(plan_id)?;
        self.plan_id = Some(plan.id.to_string());
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the batch that the save operation hands to the store.
    ///
    /// Only names are checked here: every staff member and every service
    /// must have one.
    pub fn submission(&self) -> Result<OnboardingSubmission, CoreError> {
        let mut professionals = Vec::with_capacity(self.professionals.len());
        for (i, p) in self.professionals.iter().enumerate() {
            let name = p.name.trim();
            if name.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Professional #{} has no name",
                    i + 1
                )));
            }
            professionals.push(name.to_string());
        }

        let mut services = Vec::with_capacity(self.services.len());
        for (i, s) in self.services.iter().enumerate() {
            let name = s.name.trim();
            if name.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Service #{} has no name",
                    i + 1
                )));
            }
            services.push(ServiceDraft::new(name, s.duration, s.price));
        }

        Ok(OnboardingSubmission {
            business_type: self.business_type,
            plan_id: self.plan_id.clone(),
            professionals,
            services,
            schedule: self.schedule.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// The validated batch written by the save operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingSubmission {
    pub business_type: Option<BusinessType>,
    pub plan_id: Option<String>,
    /// Staff names in order; the first is the owner.
    pub professionals: Vec<String>,
    pub services: Vec<ServiceDraft>,
    pub schedule: WeeklySchedule,
}

/// Result reported to the owner after a save attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    pub message: String,
    pub professionals: usize,
    pub services: usize,
    pub schedule_days: usize,
}

impl SaveOutcome {
    pub fn saved(professionals: usize, services: usize, schedule_days: usize) -> Self {
        Self {
            success: true,
            message: "Configuração salva com sucesso!".to_string(),
            professionals,
            services,
            schedule_days,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            professionals: 0,
            services: 0,
            schedule_days: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- Steps --

    #[test]
    fn step_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            let step = OnboardingStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
        }
        assert_eq!(TOTAL_STEPS, MAX_STEP - MIN_STEP + 1);
    }

    #[test]
    fn step_out_of_range() {
        assert!(OnboardingStep::from_number(0).is_err());
        assert!(OnboardingStep::from_number(6).is_err());
    }

    #[test]
    fn step_labels() {
        assert_eq!(OnboardingStep::BusinessType.label(), "Tipo de Negócio");
        assert_eq!(OnboardingStep::Plan.label(), "Conclusão");
    }

    #[test]
    fn step_counter_stays_in_range() {
        let mut draft = OnboardingDraft::default();
        assert!(draft.previous_step().is_err());
        assert_eq!(draft.step, 1);

        for _ in 0..10 {
            let _ = draft.next_step();
            assert!((MIN_STEP..=MAX_STEP).contains(&draft.step));
        }
        assert_eq!(draft.step, MAX_STEP);
        assert_eq!(draft.current_step().unwrap(), OnboardingStep::Plan);

        assert!(draft.set_step(0).is_err());
        assert!(draft.set_step(9).is_err());
        assert_eq!(draft.step, MAX_STEP);

        assert_eq!(draft.previous_step().unwrap(), OnboardingStep::Schedule);
    }

    // -- Initial state --

    #[test]
    fn initial_draft() {
        let draft = OnboardingDraft::default();
        assert_eq!(draft.step, 1);
        assert!(draft.business_type.is_none());
        assert_eq!(draft.professionals, vec![ProfessionalDraft::default()]);
        assert!(draft.services.is_empty());
        assert!(draft.plan_id.is_none());
        assert!(!draft.schedule.is_open(Weekday::Sunday));
    }

    // -- Professionals --

    #[test]
    fn owner_cannot_be_removed() {
        let mut draft = OnboardingDraft::default();
        draft.set_owner_name("Ana");
        draft.add_professional("Bruna");
        assert_matches!(draft.remove_professional(0), Err(CoreError::Validation(_)));
        assert_eq!(draft.professionals.len(), 2);
    }

    #[test]
    fn removal_decrements_by_one() {
        let mut draft = OnboardingDraft::default();
        draft.add_professional("Bruna");
        draft.add_professional("Carla");
        draft.add_professional("Dani");
        let before = draft.professionals.len();

        let removed = draft.remove_professional(2).unwrap();
        assert_eq!(removed.name, "Carla");
        assert_eq!(draft.professionals.len(), before - 1);
        assert!(draft.remove_professional(10).is_err());
        assert_eq!(draft.professionals.len(), before - 1);
    }

    #[test]
    fn blank_professional_is_ignored() {
        let mut draft = OnboardingDraft::default();
        assert!(!draft.add_professional("   "));
        assert_eq!(draft.professionals.len(), 1);
        assert!(draft.add_professional("  Bruna "));
        assert_eq!(draft.professionals[1].name, "Bruna");
    }

    #[test]
    fn owner_name_fills_empty_slot_only() {
        let mut draft = OnboardingDraft::default();
        assert!(draft.set_owner_name("Ana Souza"));
        assert!(!draft.set_owner_name("Outra Pessoa"));
        assert_eq!(draft.professionals[0].name, "Ana Souza");
    }

    // -- Services --

    #[test]
    fn invalid_service_is_a_noop() {
        let mut draft = OnboardingDraft::default();
        assert!(!draft.add_service("", 30, Decimal::from(50)));
        assert!(!draft.add_service("Corte", 0, Decimal::from(50)));
        assert!(!draft.add_service("Corte", -15, Decimal::from(50)));
        assert!(!draft.add_service("Corte", 30, Decimal::ZERO));
        assert!(!draft.add_service("Corte", 30, Decimal::from(-1)));
        assert!(draft.services.is_empty());

        assert!(draft.add_service("Corte", 30, Decimal::from(50)));
        assert_eq!(draft.services.len(), 1);
    }

    #[test]
    fn price_must_fit_whole_cents() {
        let mut draft = OnboardingDraft::default();
        assert!(!draft.add_service("Corte", 30, dec!(0.001)));
        assert!(!draft.add_service("Corte", 30, dec!(49.995)));
        assert!(!draft.add_service("Corte", 30, dec!(100000000)));
        assert!(draft.services.is_empty());

        assert!(draft.add_service("Corte", 30, dec!(0.01)));
        assert!(draft.add_service("Escova", 45, dec!(60.500)));
        assert!(draft.add_service("Pacote", 240, MAX_SERVICE_PRICE));
        assert_eq!(draft.services.len(), 3);
    }

    #[test]
    fn update_service_validates() {
        let mut draft = OnboardingDraft::default();
        draft.add_service("Corte", 30, Decimal::from(50));

        assert!(!draft.update_service(0, "Corte", 0, Decimal::from(50)).unwrap());
        assert_eq!(draft.services[0].duration, 30);

        assert!(draft.update_service(0, "Corte Curto", 20, Decimal::from(40)).unwrap());
        assert_eq!(draft.services[0], ServiceDraft::new("Corte Curto", 20, Decimal::from(40)));

        assert!(draft.update_service(3, "X", 10, Decimal::ONE).is_err());
    }

    #[test]
    fn remove_service_returns_removed_entry() {
        let mut draft = OnboardingDraft::default();
        draft.load_default_services(BusinessType::BarberShop);
        let removed = draft.remove_service(1).unwrap();
        assert_eq!(removed.name, "Barba");
        assert_eq!(draft.services.len(), 3);
        assert!(draft.remove_service(3).is_err());
    }

    #[test]
    fn load_defaults_replaces_list() {
        let mut draft = OnboardingDraft::default();
        draft.add_service("Custom", 10, Decimal::from(10));
        let loaded = draft.load_default_services(BusinessType::HairSalon);
        assert_eq!(loaded, 4);
        assert_eq!(draft.services, BusinessType::HairSalon.default_services());
    }

    // -- Schedule & plan --

    #[test]
    fn toggling_day_keeps_times() {
        let mut draft = OnboardingDraft::default();
        draft
            .set_schedule(Weekday::Wednesday, true, "08:00", "12:00")
            .unwrap();
        draft.set_day_enabled(Weekday::Wednesday, false);
        let day = draft.schedule.day(Weekday::Wednesday);
        assert!(!day.enabled);
        assert_eq!((day.start.as_str(), day.end.as_str()), ("08:00", "12:00"));
    }

    #[test]
    fn plan_must_exist() {
        let mut draft = OnboardingDraft::default();
        assert!(draft.select_plan("gold").is_err());
        assert!(draft.plan_id.is_none());
        draft.select_plan("business").unwrap();
        assert_eq!(draft.plan_id.as_deref(), Some("business"));
    }

    #[test]
    fn reset_restores_initial_draft() {
        let mut draft = OnboardingDraft::default();
        draft.set_business_type(BusinessType::Spa);
        draft.add_professional("Bruna");
        draft.next_step().unwrap();
        draft.reset();
        assert_eq!(draft, OnboardingDraft::default());
    }

    // -- Submission --

    #[test]
    fn submission_requires_names() {
        let draft = OnboardingDraft::default();
        assert_matches!(draft.submission(), Err(CoreError::Validation(_)));

        let mut draft = OnboardingDraft::default();
        draft.set_owner_name("Ana");
        draft.services.push(ServiceDraft::new(" ", 30, Decimal::ONE));
        assert_matches!(draft.submission(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn submission_collects_draft() {
        let mut draft = OnboardingDraft::default();
        draft.set_owner_name("Ana");
        draft.add_professional("Bruna");
        draft.set_business_type(BusinessType::HairSalon);
        draft.load_default_services(BusinessType::HairSalon);
        draft.select_plan("pro").unwrap();

        let submission = draft.submission().unwrap();
        assert_eq!(submission.professionals, vec!["Ana", "Bruna"]);
        assert_eq!(submission.services.len(), 4);
        assert_eq!(submission.business_type, Some(BusinessType::HairSalon));
        assert_eq!(submission.plan_id.as_deref(), Some("pro"));
    }

    #[test]
    fn draft_json_roundtrip_resumes_wizard() {
        let mut draft = OnboardingDraft::default();
        draft.set_owner_name("Ana");
        draft.next_step().unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["step"], 2);
        let restored: OnboardingDraft = serde_json::from_value(json).unwrap();
        assert_eq!(restored, draft);
    }
}
