// src/models/expense.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub gestionnaire_id: i64,
    pub reason: String,

    // Valor em BIF
    pub amount: i64,

    pub date: NaiveDate,
}
