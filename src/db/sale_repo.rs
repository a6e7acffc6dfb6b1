// src/db/sale_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::{
        report::SaleReportRow,
        sale::{Sale, SaleType},
    },
};

const SALE_COLUMNS: &str = "id, room_id, gestionnaire_id, date, price, status, restore_date, sale_type";

#[derive(Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Registra a venda com o snapshot de preço já decidido pelo serviço.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        room_id: i64,
        gestionnaire_id: i64,
        date: NaiveDate,
        price: i64,
        sale_type: SaleType,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            r#"
            INSERT INTO sales (room_id, gestionnaire_id, date, price, status, sale_type)
            VALUES (?1, ?2, ?3, ?4, 'active', ?5)
            RETURNING {SALE_COLUMNS}
            "#
        ))
        .bind(room_id)
        .bind(gestionnaire_id)
        .bind(date)
        .bind(price)
        .bind(sale_type)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    /// Fecha a venda ativa do quarto pertencente ao gestionnaire informado.
    /// O filtro por `gestionnaire_id` é a regra de negócio: um gestionnaire
    /// não restaura venda de outro. Retorna `None` quando não há venda
    /// ativa que satisfaça as condições.
    pub async fn restore_active_for<'e, E>(
        &self,
        executor: E,
        room_id: i64,
        gestionnaire_id: i64,
        restore_date: NaiveDate,
    ) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            r#"
            UPDATE sales SET status = 'restored', restore_date = ?3
            WHERE room_id = ?1 AND gestionnaire_id = ?2 AND status = 'active'
            RETURNING {SALE_COLUMNS}
            "#
        ))
        .bind(room_id)
        .bind(gestionnaire_id)
        .bind(restore_date)
        .fetch_optional(executor)
        .await?;
        Ok(sale)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(sale)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_gestionnaire(&self, gestionnaire_id: i64) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE gestionnaire_id = ?1")
                .bind(gestionnaire_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    // ---
    // Consultas de relatório
    // ---
    // `scope` = None enxerga tudo; Some(id) restringe ao gestionnaire.

    pub async fn in_range<'e, E>(
        &self,
        executor: E,
        start: NaiveDate,
        end: NaiveDate,
        scope: Option<i64>,
    ) -> Result<Vec<SaleReportRow>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, SaleReportRow>(
            r#"
            SELECT s.id, s.date, r.room_number, u.name AS gestionnaire_name,
                   s.sale_type, s.price, s.status
            FROM sales s
            JOIN rooms r ON s.room_id = r.room_id
            JOIN users u ON s.gestionnaire_id = u.id
            WHERE s.date BETWEEN ?1 AND ?2
              AND (?3 IS NULL OR s.gestionnaire_id = ?3)
            ORDER BY s.date DESC, s.id DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(scope)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn total_income<'e, E>(
        &self,
        executor: E,
        start: NaiveDate,
        end: NaiveDate,
        scope: Option<i64>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(price), 0)
            FROM sales
            WHERE date BETWEEN ?1 AND ?2
              AND (?3 IS NULL OR gestionnaire_id = ?3)
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(scope)
        .fetch_one(executor)
        .await?;
        Ok(total)
    }
}
