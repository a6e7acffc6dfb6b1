pub mod migrations;
pub mod seed;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod room_repo;
pub use room_repo::RoomRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod expense_repo;
pub use expense_repo::ExpenseRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
