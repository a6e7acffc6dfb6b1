// src/models/sale.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Active,
    Restored,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Active => "active",
            SaleStatus::Restored => "restored",
        }
    }
}

// Tarifa aplicada na venda: estadia completa ou "passage" (uso de curta duração)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SaleType {
    Full,
    Passage,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::Full => "full",
            SaleType::Passage => "passage",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub room_id: i64,
    pub gestionnaire_id: i64,
    pub date: NaiveDate,

    // Snapshot do preço do quarto no momento da venda.
    // Nunca é recalculado a partir da tarifa atual.
    pub price: i64,

    pub status: SaleStatus,
    pub restore_date: Option<NaiveDate>,
    pub sale_type: SaleType,
}
