// src/db/expense_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::{expense::Expense, report::ExpenseReportRow},
};

#[derive(Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        gestionnaire_id: i64,
        reason: &str,
        amount: i64,
        date: NaiveDate,
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (gestionnaire_id, reason, amount, date)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, gestionnaire_id, reason, amount, date
            "#,
        )
        .bind(gestionnaire_id)
        .bind(reason)
        .bind(amount)
        .bind(date)
        .fetch_one(executor)
        .await?;
        Ok(expense)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<Option<Expense>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let expense = sqlx::query_as::<_, Expense>(
            "SELECT id, gestionnaire_id, reason, amount, date FROM expenses WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(expense)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_gestionnaire(&self, gestionnaire_id: i64) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM expenses WHERE gestionnaire_id = ?1")
                .bind(gestionnaire_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    // Tela de despesas: lista completa (sem recorte de data), mais recente primeiro.
    pub async fn list_with_names(
        &self,
        scope: Option<i64>,
    ) -> Result<Vec<ExpenseReportRow>, AppError> {
        let rows = sqlx::query_as::<_, ExpenseReportRow>(
            r#"
            SELECT e.id, e.date, u.name AS gestionnaire_name, e.reason, e.amount
            FROM expenses e
            JOIN users u ON e.gestionnaire_id = u.id
            WHERE (?1 IS NULL OR e.gestionnaire_id = ?1)
            ORDER BY e.date DESC, e.id DESC
            "#,
        )
        .bind(scope)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Consultas de relatório
    // ---

    pub async fn in_range<'e, E>(
        &self,
        executor: E,
        start: NaiveDate,
        end: NaiveDate,
        scope: Option<i64>,
    ) -> Result<Vec<ExpenseReportRow>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, ExpenseReportRow>(
            r#"
            SELECT e.id, e.date, u.name AS gestionnaire_name, e.reason, e.amount
            FROM expenses e
            JOIN users u ON e.gestionnaire_id = u.id
            WHERE e.date BETWEEN ?1 AND ?2
              AND (?3 IS NULL OR e.gestionnaire_id = ?3)
            ORDER BY e.date DESC, e.id DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(scope)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn total_in_range<'e, E>(
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
            SELECT COALESCE(SUM(amount), 0)
            FROM expenses
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
