// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Rooms ---
        handlers::rooms::list_rooms,
        handlers::rooms::add_room,
        handlers::rooms::delete_room,
        handlers::rooms::sell_room,
        handlers::rooms::restore_room,

        // --- Expenses ---
        handlers::expenses::list_expenses,
        handlers::expenses::add_expense,

        // --- Reports ---
        handlers::reports::get_report,
        handlers::reports::export_csv,
        handlers::reports::export_pdf,
        handlers::reports::delete_report,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::add_user,
        handlers::users::update_user,
        handlers::users::delete_user,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Rooms / Sales ---
            models::room::RoomStatus,
            models::room::Room,
            models::sale::SaleStatus,
            models::sale::SaleType,
            models::sale::Sale,

            // --- Expenses ---
            models::expense::Expense,

            // --- Reports ---
            models::report::SaleReportRow,
            models::report::ExpenseReportRow,
            models::report::ReportView,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,

            // --- Payloads ---
            handlers::rooms::CreateRoomPayload,
            handlers::rooms::SellRoomPayload,
            handlers::rooms::RestoreRoomPayload,
            handlers::expenses::AddExpensePayload,
            handlers::users::CreateUserPayload,
            handlers::users::UpdateUserPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Dashboard", description = "Resumo do dia"),
        (name = "Rooms", description = "Quartos: inventário, venda e restauração"),
        (name = "Expenses", description = "Despesas dos gestionnaires"),
        (name = "Reports", description = "Relatórios financeiros e exportações"),
        (name = "Users", description = "Gestão de usuários (admin)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
