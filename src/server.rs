// src/server.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

// Monta o router completo. As rotas protegidas passam todas pelo
// auth_guard; as restrições de papel ficam nos próprios handlers via
// RequireRole.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    let protected_routes = Router::new()
        .route("/users/me", get(handlers::auth::get_me))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route(
            "/rooms",
            get(handlers::rooms::list_rooms).post(handlers::rooms::add_room),
        )
        .route("/rooms/{room_id}", delete(handlers::rooms::delete_room))
        .route("/rooms/sell", post(handlers::rooms::sell_room))
        .route("/rooms/restore", post(handlers::rooms::restore_room))
        .route(
            "/expenses",
            get(handlers::expenses::list_expenses).post(handlers::expenses::add_expense),
        )
        .route("/reports", get(handlers::reports::get_report))
        .route("/reports/export/csv", get(handlers::reports::export_csv))
        .route("/reports/export/pdf", get(handlers::reports::export_pdf))
        .route(
            "/reports/{report_type}/{report_id}",
            delete(handlers::reports::delete_report),
        )
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::add_user),
        )
        .route(
            "/users/{user_id}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    // Combina tudo no router principal
    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api", api_routes)
        .with_state(app_state)
}
