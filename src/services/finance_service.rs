// src/services/finance_service.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{ExpenseRepository, SaleRepository},
    models::{
        auth::User,
        expense::Expense,
        report::{ExpenseReportRow, Period, ReportView, ReportViewer},
    },
};

#[derive(Clone)]
pub struct FinanceService {
    sale_repo: SaleRepository,
    expense_repo: ExpenseRepository,
    pool: SqlitePool,
}

impl FinanceService {
    pub fn new(
        sale_repo: SaleRepository,
        expense_repo: ExpenseRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            sale_repo,
            expense_repo,
            pool,
        }
    }

    pub async fn add_expense(
        &self,
        actor: &User,
        reason: &str,
        amount: i64,
    ) -> Result<Expense, AppError> {
        let today = Utc::now().date_naive();
        self.expense_repo
            .create(&self.pool, actor.id, reason, amount, today)
            .await
    }

    pub async fn list_expenses(
        &self,
        viewer: ReportViewer,
    ) -> Result<Vec<ExpenseReportRow>, AppError> {
        self.expense_repo.list_with_names(viewer.scope()).await
    }

    // --- RELATÓRIO ---
    // Função do par (intervalo, viewer) sobre as tabelas persistidas.
    // As quatro leituras compartilham uma transação (snapshot único), e o
    // escopo de visibilidade entra uma vez, vindo do viewer.
    pub async fn build_report(
        &self,
        viewer: ReportViewer,
        period: Period,
    ) -> Result<ReportView, AppError> {
        let today = Utc::now().date_naive();
        let (start_date, end_date) = period.resolve(today);
        let scope = viewer.scope();

        let mut tx = self.pool.begin().await?;

        let sales = self
            .sale_repo
            .in_range(&mut *tx, start_date, end_date, scope)
            .await?;
        let expenses = self
            .expense_repo
            .in_range(&mut *tx, start_date, end_date, scope)
            .await?;
        let total_income = self
            .sale_repo
            .total_income(&mut *tx, start_date, end_date, scope)
            .await?;
        let total_expenses = self
            .expense_repo
            .total_in_range(&mut *tx, start_date, end_date, scope)
            .await?;

        tx.commit().await?;

        Ok(ReportView {
            start_date,
            end_date,
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
            sales,
            expenses,
        })
    }

    // Exclusão administrativa de um lançamento de despesa.
    pub async fn delete_expense_report(&self, expense_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        self.expense_repo
            .find_by_id(&mut *tx, expense_id)
            .await?
            .ok_or(AppError::ExpenseNotFound)?;

        self.expense_repo.delete(&mut *tx, expense_id).await?;

        tx.commit().await?;
        Ok(())
    }
}
