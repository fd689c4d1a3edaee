//! Subscription plans offered on the last onboarding step.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::CoreError;

/// Length of the free trial granted when onboarding completes.
pub const TRIAL_DAYS: i64 = 7;

/// A fixed subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionPlan {
    pub id: &'static str,
    pub name: &'static str,
    /// Monthly price in BRL.
    pub price: Decimal,
    pub features: Vec<&'static str>,
}

/// The three plans, cheapest first.
pub fn subscription_plans() -> Vec<SubscriptionPlan> {
    vec![
        SubscriptionPlan {
            id: "basic",
            name: "Básico",
            price: dec!(89.90),
            features: vec![
                "1 profissional",
                "Até 100 agendamentos por mês",
                "Link personalizado para agendamentos",
                "Suporte por email",
            ],
        },
        SubscriptionPlan {
            id: "pro",
            name: "Profissional",
            price: dec!(139.90),
            features: vec![
                "Até 5 profissionais",
                "Agendamentos ilimitados",
                "Link personalizado para agendamentos",
                "Lembretes por WhatsApp",
                "Suporte prioritário",
            ],
        },
        SubscriptionPlan {
            id: "business",
            name: "Empresarial",
            price: dec!(269.90),
            features: vec![
                "Até 15 profissionais",
                "Agendamentos ilimitados",
                "Link personalizado para agendamentos",
                "Lembretes por WhatsApp",
                "Relatórios avançados",
                "Suporte VIP",
            ],
        },
    ]
}

/// Look up a plan by id.
pub fn find_plan(id: &str) -> Result<SubscriptionPlan, CoreError> {
    subscription_plans()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown plan '{id}'. Must be one of: basic, pro, business"
            ))
        })
}
