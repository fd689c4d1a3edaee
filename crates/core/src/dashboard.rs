//! Dashboard summary figures and the report catalog.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::appointment::AppointmentStatus;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// An appointment joined with the names and price the dashboard shows.
#[derive(Debug, Clone)]
pub struct AppointmentFact {
    pub client_name: String,
    pub service_name: String,
    pub price: Decimal,
    pub starts_at: Timestamp,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingAppointment {
    pub client_name: String,
    pub service_name: String,
    pub starts_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub appointments_today: usize,
    pub total_clients: i64,
    pub services_available: i64,
    pub revenue_today: Decimal,
    pub next_appointment: Option<UpcomingAppointment>,
    pub cards: Vec<StatCard>,
}

/// Compute the summary as seen at `now` (days are UTC calendar days).
pub fn summarize(
    now: Timestamp,
    appointments: &[AppointmentFact],
    total_clients: i64,
    services_available: i64,
) -> DashboardSummary {
    let today = now.date_naive();
    let todays: Vec<&AppointmentFact> = appointments
        .iter()
        .filter(|a| a.starts_at.date_naive() == today)
        .collect();
    let revenue_today: Decimal = todays.iter().map(|a| a.price).sum();

    let next_appointment = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled && a.starts_at >= now)
        .min_by_key(|a| a.starts_at)
        .map(|a| UpcomingAppointment {
            client_name: a.client_name.clone(),
            service_name: a.service_name.clone(),
            starts_at: a.starts_at,
        });

    let cards = vec![
        StatCard {
            title: "Agendamentos Hoje",
            value: todays.len().to_string(),
        },
        StatCard {
            title: "Total de Clientes",
            value: total_clients.to_string(),
        },
        StatCard {
            title: "Serviços Disponíveis",
            value: services_available.to_string(),
        },
        StatCard {
            title: "Faturamento Hoje",
            value: format_brl(revenue_today),
        },
    ];

    DashboardSummary {
        appointments_today: todays.len(),
        total_clients,
        services_available,
        revenue_today,
        next_appointment,
        cards,
    }
}

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,50`.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    let text = format!("{rounded:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R$ {grouped},{frac_part}")
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportCard {
    /// Tab the card is listed under.
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const REPORT_CARDS: [ReportCard; 6] = [
    ReportCard {
        category: "financeiros",
        title: "Faturamento Mensal",
        description: "Relatório de faturamento do mês",
    },
    ReportCard {
        category: "financeiros",
        title: "Faturamento por Serviço",
        description: "Relatório detalhado por tipo de serviço",
    },
    ReportCard {
        category: "clientes",
        title: "Novos Clientes",
        description: "Relatório de novos clientes",
    },
    ReportCard {
        category: "clientes",
        title: "Clientes Recorrentes",
        description: "Análise de clientes frequentes",
    },
    ReportCard {
        category: "agendamentos",
        title: "Agendamentos por Dia",
        description: "Distribuição de agendamentos diários",
    },
    ReportCard {
        category: "agendamentos",
        title: "Horários mais Populares",
        description: "Análise dos horários mais agendados",
    },
];
