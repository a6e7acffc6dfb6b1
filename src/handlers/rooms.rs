// src/handlers/rooms.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, GestionnaireOnly, RequireRole},
    },
    models::sale::SaleType,
};

// ---
// Payload: CreateRoomPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    #[validate(range(min = 1, message = "O número do quarto deve ser positivo."))]
    pub room_number: i64,

    #[validate(range(min = 1, message = "A tarifa completa deve ser positiva."))]
    pub price_full: i64,

    #[validate(range(min = 1, message = "A tarifa passage deve ser positiva."))]
    pub price_passage: i64,
}

// ---
// Payload: SellRoomPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellRoomPayload {
    #[validate(range(min = 1, message = "O número do quarto deve ser positivo."))]
    pub room_number: i64,

    pub sale_type: SaleType,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRoomPayload {
    #[validate(range(min = 1, message = "O número do quarto deve ser positivo."))]
    pub room_number: i64,
}

// ---
// Handlers
// ---

#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Rooms",
    responses((status = 200, description = "Todos os quartos, por número", body = Vec<crate::models::room::Room>)),
    security(("api_jwt" = []))
)]
pub async fn list_rooms(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state.room_service.list_rooms().await?;
    Ok((StatusCode::OK, Json(rooms)))
}

#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = "Rooms",
    request_body = CreateRoomPayload,
    responses(
        (status = 201, description = "Quarto criado", body = crate::models::room::Room),
        (status = 409, description = "Número de quarto já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_room(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let room = app_state
        .room_service
        .add_room(payload.room_number, payload.price_full, payload.price_passage)
        .await?;

    Ok((StatusCode::CREATED, Json(room)))
}

#[utoipa::path(
    delete,
    path = "/api/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = i64, Path, description = "ID do quarto")),
    responses(
        (status = 204, description = "Quarto excluído"),
        (status = 409, description = "Quarto vendido não pode ser excluído")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_room(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(room_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.room_service.delete_room(room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/rooms/sell",
    tag = "Rooms",
    request_body = SellRoomPayload,
    responses(
        (status = 201, description = "Venda registrada", body = crate::models::sale::Sale),
        (status = 409, description = "Quarto indisponível")
    ),
    security(("api_jwt" = []))
)]
pub async fn sell_room(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<GestionnaireOnly>,
    Json(payload): Json<SellRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state
        .room_service
        .sell_room(&user.0, payload.room_number, payload.sale_type)
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

#[utoipa::path(
    post,
    path = "/api/rooms/restore",
    tag = "Rooms",
    request_body = RestoreRoomPayload,
    responses(
        (status = 200, description = "Venda restaurada", body = crate::models::sale::Sale),
        (status = 409, description = "Nenhuma venda ativa sua para o quarto")
    ),
    security(("api_jwt" = []))
)]
pub async fn restore_room(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    _guard: RequireRole<GestionnaireOnly>,
    Json(payload): Json<RestoreRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let sale = app_state
        .room_service
        .restore_room(&user.0, payload.room_number)
        .await?;

    Ok((StatusCode::OK, Json(sale)))
}
