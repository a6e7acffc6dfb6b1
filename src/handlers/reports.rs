// src/handlers/reports.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
    models::report::{Period, ReportView, ReportViewer},
};

// Parâmetros de período na query string. `period` desconhecido cai no
// intervalo customizado; limites ausentes assumem o dia corrente.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportQuery {
    fn to_period(&self) -> Period {
        Period::from_query(self.period.as_deref(), self.start_date, self.end_date)
    }
}

#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    params(ReportQuery),
    responses((status = 200, description = "Resumo e detalhes do período", body = ReportView)),
    security(("api_jwt" = []))
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = ReportViewer::from_user(&user.0);
    let report = app_state
        .finance_service
        .build_report(viewer, query.to_period())
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

// ---
// Exportações: serializações puras do mesmo ReportView
// ---

#[utoipa::path(
    get,
    path = "/api/reports/export/csv",
    tag = "Reports",
    params(ReportQuery),
    responses((status = 200, description = "Relatório em CSV", content_type = "text/csv")),
    security(("api_jwt" = []))
)]
pub async fn export_csv(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = ReportViewer::from_user(&user.0);
    let report = app_state
        .finance_service
        .build_report(viewer, query.to_period())
        .await?;

    let bytes = app_state.export_service.render_csv(&report)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rapport.csv\"",
            ),
        ],
        bytes,
    ))
}

#[utoipa::path(
    get,
    path = "/api/reports/export/pdf",
    tag = "Reports",
    params(ReportQuery),
    responses((status = 200, description = "Relatório em PDF", content_type = "application/pdf")),
    security(("api_jwt" = []))
)]
pub async fn export_pdf(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = ReportViewer::from_user(&user.0);
    let report = app_state
        .finance_service
        .build_report(viewer, query.to_period())
        .await?;

    let bytes = app_state.export_service.render_pdf(&report)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rapport.pdf\"",
            ),
        ],
        bytes,
    ))
}

// Exclusão administrativa de um lançamento do relatório. Para vendas, o
// quarto só é liberado quando a venda excluída é a ativa (ver RoomService).
#[utoipa::path(
    delete,
    path = "/api/reports/{report_type}/{report_id}",
    tag = "Reports",
    params(
        ("report_type" = String, Path, description = "'sale' ou 'expense'"),
        ("report_id" = i64, Path, description = "ID do lançamento")
    ),
    responses(
        (status = 204, description = "Lançamento excluído"),
        (status = 400, description = "Tipo de relatório inválido"),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_report(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path((report_type, report_id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, AppError> {
    match report_type.as_str() {
        "sale" => app_state.room_service.delete_sale_report(report_id).await?,
        "expense" => {
            app_state
                .finance_service
                .delete_expense_report(report_id)
                .await?
        }
        other => return Err(AppError::InvalidReportType(other.to_string())),
    }

    Ok(StatusCode::NO_CONTENT)
}
