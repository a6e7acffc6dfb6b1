// src/config.rs

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{env, str::FromStr, time::Duration};

use crate::{
    db::{
        DashboardRepository, ExpenseRepository, RoomRepository, SaleRepository, UserRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, export_service::ExportService,
        finance_service::FinanceService, room_service::RoomService, user_service::UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub room_service: RoomService,
    pub finance_service: FinanceService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
    pub user_service: UserService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://myhotel.db".to_string());
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, jwt_secret))
    }

    // Monta o gráfico de dependências a partir de uma pool já existente.
    // Os testes de integração usam este construtor com SQLite em memória.
    pub fn with_pool(db_pool: SqlitePool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let room_repo = RoomRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let expense_repo = ExpenseRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone());
        let room_service = RoomService::new(room_repo, sale_repo.clone(), db_pool.clone());
        let finance_service =
            FinanceService::new(sale_repo.clone(), expense_repo.clone(), db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);
        let export_service =
            ExportService::new(env::var("FONT_DIR").unwrap_or_else(|_| "./fonts".to_string()));
        let user_service = UserService::new(user_repo, sale_repo, expense_repo, db_pool.clone());

        Self {
            db_pool,
            jwt_secret,
            auth_service,
            room_service,
            finance_service,
            dashboard_service,
            export_service,
            user_service,
        }
    }
}
