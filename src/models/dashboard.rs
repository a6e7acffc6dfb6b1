// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// Resumo do dia (os cards do topo do painel)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_rooms: i64,
    pub available_rooms: i64,
    pub sold_rooms: i64,
    pub today_income: i64,   // Vendas registradas hoje (BIF)
    pub today_expenses: i64, // Despesas registradas hoje (BIF)
    pub profit: i64,
}
