pub mod auth;
pub mod dashboard;
pub mod expense;
pub mod report;
pub mod room;
pub mod sale;
