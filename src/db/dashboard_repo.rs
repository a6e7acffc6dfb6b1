// src/db/dashboard_repo.rs

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{common::error::AppError, models::dashboard::DashboardSummary};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Resumo do painel. Tudo dentro de uma transação para obter um
    // snapshot consistente dos contadores e das somas do dia.
    pub async fn get_summary(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        let total_rooms: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&mut *tx)
            .await?;

        let available_rooms: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status = 'available'")
                .fetch_one(&mut *tx)
                .await?;

        let sold_rooms: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rooms WHERE status = 'sold'")
                .fetch_one(&mut *tx)
                .await?;

        let today_income: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(price), 0) FROM sales WHERE date = ?1")
                .bind(today)
                .fetch_one(&mut *tx)
                .await?;

        let today_expenses: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE date = ?1")
                .bind(today)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_rooms,
            available_rooms,
            sold_rooms,
            today_income,
            today_expenses,
            profit: today_income - today_expenses,
        })
    }
}
