//! Business categories and the default service catalog each one suggests.
//!
//! The category chosen on the first onboarding step drives which services
//! are pre-filled on the third step.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::onboarding::ServiceDraft;

/// Category of beauty business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    HairSalon,
    NailSalon,
    Spa,
    BarberShop,
    Esthetician,
    MakeupArtist,
    Other,
}

/// Every business type in display order.
pub const ALL_BUSINESS_TYPES: [BusinessType; 7] = [
    BusinessType::HairSalon,
    BusinessType::NailSalon,
    BusinessType::Spa,
    BusinessType::BarberShop,
    BusinessType::Esthetician,
    BusinessType::MakeupArtist,
    BusinessType::Other,
];

impl BusinessType {
    /// Parse a business type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        ALL_BUSINESS_TYPES
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid business type '{s}'. Must be one of: hair_salon, nail_salon, \
                     spa, barber_shop, esthetician, makeup_artist, other"
                ))
            })
    }

    /// Convert to a database-compatible string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HairSalon => "hair_salon",
            Self::NailSalon => "nail_salon",
            Self::Spa => "spa",
            Self::BarberShop => "barber_shop",
            Self::Esthetician => "esthetician",
            Self::MakeupArtist => "makeup_artist",
            Self::Other => "other",
        }
    }

    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::HairSalon => "Salão de Cabelo",
            Self::NailSalon => "Manicure/Pedicure",
            Self::Spa => "Spa & Massagem",
            Self::BarberShop => "Barbearia",
            Self::Esthetician => "Estética Facial",
            Self::MakeupArtist => "Maquiagem",
            Self::Other => "Outros",
        }
    }

    /// Emoji shown on the selection card.
    pub fn icon(self) -> &'static str {
        match self {
            Self::HairSalon => "💇‍♀️",
            Self::NailSalon => "💅",
            Self::Spa => "💆‍♀️",
            Self::BarberShop => "💈",
            Self::Esthetician => "👩‍⚕️",
            Self::MakeupArtist => "💄",
            Self::Other => "✨",
        }
    }

    /// The fixed starter catalog for this business type.
    pub fn default_services(self) -> Vec<ServiceDraft> {
        let entries: &[(&str, i32, i64)] = match self {
            Self::HairSalon => &[
                ("Corte Feminino", 60, 80),
                ("Corte Masculino", 30, 50),
                ("Escova", 45, 60),
                ("Coloração", 120, 150),
            ],
            Self::NailSalon => &[
                ("Manicure", 45, 40),
                ("Pedicure", 60, 50),
                ("Esmaltação em Gel", 60, 70),
                ("Unhas de Fibra", 120, 120),
            ],
            Self::Spa => &[
                ("Massagem Relaxante", 60, 120),
                ("Massagem Modeladora", 60, 150),
                ("Drenagem Linfática", 60, 130),
                ("Esfoliação Corporal", 45, 90),
            ],
            Self::BarberShop => &[
                ("Corte Masculino", 30, 40),
                ("Barba", 30, 35),
                ("Corte + Barba", 60, 70),
                ("Pigmentação", 45, 50),
            ],
            Self::Esthetician => &[
                ("Limpeza de Pele", 60, 100),
                ("Microagulhamento", 60, 200),
                ("Peeling", 45, 150),
                ("Botox", 30, 350),
            ],
            Self::MakeupArtist => &[
                ("Maquiagem Social", 60, 120),
                ("Maquiagem para Noivas", 90, 250),
                ("Design de Sobrancelhas", 30, 50),
                ("Extensão de Cílios", 90, 180),
            ],
            Self::Other => &[("Serviço Padrão", 60, 100)],
        };

        entries
            .iter()
            .map(|&(name, duration, price)| ServiceDraft {
                name: name.to_string(),
                duration,
                price: Decimal::from(price),
            })
            .collect()
    }
}

/// Serializable view of a business type for selection screens.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessTypeOption {
    pub id: BusinessType,
    pub name: &'static str,
    pub icon: &'static str,
}

/// All business types as selection options.
pub fn business_type_options() -> Vec<BusinessTypeOption> {
    ALL_BUSINESS_TYPES
        .into_iter()
        .map(|t| BusinessTypeOption {
            id: t,
            name: t.label(),
            icon: t.icon(),
        })
        .collect()
}
