// src/models/room.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Estado do quarto. Derivado da última venda ativa: um quarto está 'sold'
// se, e somente se, existe exatamente uma venda ativa referenciando ele.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Sold,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: i64,
    pub room_number: i64,
    pub status: RoomStatus,

    // Tarifas em BIF (franco burundês, sem subunidade)
    pub price_full: i64,
    pub price_passage: i64,
}
