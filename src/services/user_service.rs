// src/services/user_service.rs

use bcrypt::hash;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{ExpenseRepository, SaleRepository, UserRepository},
    models::auth::{Role, User},
};

// Gestão administrativa de contas. A exclusão aplica a regra de negócio de
// integridade referencial antes de chegar na constraint do banco.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    sale_repo: SaleRepository,
    expense_repo: ExpenseRepository,
    pool: SqlitePool,
}

impl UserService {
    pub fn new(
        user_repo: UserRepository,
        sale_repo: SaleRepository,
        expense_repo: ExpenseRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            user_repo,
            sale_repo,
            expense_repo,
            pool,
        }
    }

    // Todo mundo menos o próprio solicitante, como na tela de gestão.
    pub async fn list_users(&self, actor_id: i64) -> Result<Vec<User>, AppError> {
        self.user_repo.list_except(actor_id).await
    }

    pub async fn create_user(
        &self,
        name: &str,
        role: Role,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password).await?;
        self.user_repo
            .create(&self.pool, name, role, &password_hash)
            .await
    }

    // Senha é opcional na edição: ausente mantém o hash atual.
    pub async fn update_user(
        &self,
        user_id: i64,
        name: &str,
        role: Role,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        let password_hash = match password {
            Some(p) => Some(hash_password(p).await?),
            None => None,
        };

        self.user_repo
            .update(&self.pool, user_id, name, role, password_hash.as_deref())
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn delete_user(&self, actor_id: i64, user_id: i64) -> Result<(), AppError> {
        if user_id == actor_id {
            return Err(AppError::CannotDeleteSelf);
        }

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // Regra de negócio, não só FK: usuário com vendas ou despesas fica.
        let sales = self.sale_repo.count_by_gestionnaire(user_id).await?;
        let expenses = self.expense_repo.count_by_gestionnaire(user_id).await?;
        if sales > 0 || expenses > 0 {
            return Err(AppError::UserHasRecords);
        }

        self.user_repo.delete(&self.pool, user_id).await?;
        Ok(())
    }
}

async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let password_hash =
        tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(password_hash)
}
