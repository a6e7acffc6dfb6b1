// src/handlers/expenses.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{GestionnaireOnly, RequireRole},
    },
    models::report::ReportViewer,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddExpensePayload {
    #[validate(length(min = 1, message = "O motivo é obrigatório."))]
    pub reason: String,

    #[validate(range(min = 1, message = "O valor deve ser um inteiro positivo (BIF)."))]
    pub amount: i64,
}

// A listagem respeita o escopo do viewer: admin vê tudo, gestionnaire só
// as próprias despesas.
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Expenses",
    responses((status = 200, description = "Despesas visíveis ao usuário", body = Vec<crate::models::report::ExpenseReportRow>)),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let viewer = ReportViewer::from_user(&user.0);
    let expenses = app_state.finance_service.list_expenses(viewer).await?;
    Ok((StatusCode::OK, Json(expenses)))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Expenses",
    request_body = AddExpensePayload,
    responses((status = 201, description = "Despesa registrada", body = crate::models::expense::Expense)),
    security(("api_jwt" = []))
)]
pub async fn add_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<GestionnaireOnly>,
    Json(payload): Json<AddExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state
        .finance_service
        .add_expense(&user.0, &payload.reason, payload.amount)
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}
