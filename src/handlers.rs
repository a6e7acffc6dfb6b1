pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod reports;
pub mod rooms;
pub mod users;
