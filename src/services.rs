pub mod auth;
pub mod dashboard_service;
pub mod export_service;
pub mod finance_service;
pub mod room_service;
pub mod user_service;
