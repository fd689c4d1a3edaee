//! Fixed catalog presented by the public booking flow.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::Minutes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogService {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Decimal,
    pub duration: Minutes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogProfessional {
    pub id: &'static str,
    pub name: &'static str,
    pub photo_url: &'static str,
    pub specialty: &'static str,
}

/// Appointment start times offered for any date.
pub const TIME_SLOTS: [&str; 12] = [
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "14:00", "14:30", "15:00", "15:30",
    "16:00", "16:30",
];

pub fn public_services() -> Vec<CatalogService> {
    [
        ("1", "Corte de Cabelo", 50, 30),
        ("2", "Coloração", 120, 90),
        ("3", "Manicure", 40, 45),
        ("4", "Pedicure", 50, 45),
        ("5", "Design de Sobrancelhas", 35, 30),
        ("6", "Maquiagem", 80, 60),
    ]
    .into_iter()
    .map(|(id, name, price, duration)| CatalogService {
        id,
        name,
        price: Decimal::from(price),
        duration,
    })
    .collect()
}

pub fn public_professionals() -> Vec<CatalogProfessional> {
    [
        ("1", "Ana Silva", "https://i.pravatar.cc/150?img=1", "Cabeleireira"),
        ("2", "Pedro Costa", "https://i.pravatar.cc/150?img=3", "Colorista"),
        ("3", "Carla Mendes", "https://i.pravatar.cc/150?img=5", "Manicure"),
        ("4", "João Santos", "https://i.pravatar.cc/150?img=8", "Barbeiro"),
    ]
    .into_iter()
    .map(|(id, name, photo_url, specialty)| CatalogProfessional {
        id,
        name,
        photo_url,
        specialty,
    })
    .collect()
}

pub fn find_service(id: &str) -> Option<CatalogService> {
    public_services().into_iter().find(|s| s.id == id)
}

pub fn find_professional(id: &str) -> Option<CatalogProfessional> {
    public_professionals().into_iter().find(|p| p.id == id)
}

pub fn is_offered_slot(time: &str) -> bool {
    TIME_SLOTS.contains(&time)
}

/// Everything the booking page needs to render its choices.
#[derive(Debug, Clone, Serialize)]
pub struct PublicCatalog {
    pub services: Vec<CatalogService>,
    pub professionals: Vec<CatalogProfessional>,
    pub time_slots: Vec<&'static str>,
}

pub fn public_catalog() -> PublicCatalog {
    PublicCatalog {
        services: public_services(),
        professionals: public_professionals(),
        time_slots: TIME_SLOTS.to_vec(),
    }
}
