// src/db/user_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, name, role, password_hash FROM users WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, name, role, password_hash FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Lista para a tela de gestão de usuários: todo mundo menos quem pede.
    pub async fn list_except(&self, user_id: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, role, password_hash FROM users WHERE id != ?1 ORDER BY name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        role: Role,
        password_hash: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, role, password_hash)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, role, password_hash
            "#,
        )
        .bind(name)
        .bind(role)
        .bind(password_hash)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UserNameAlreadyExists(name.to_string());
                }
            }
            e.into()
        })
    }

    // Atualização sem troca de senha. A variante com senha recebe o hash já pronto.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: i64,
        name: &str,
        role: Role,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = match password_hash {
            Some(hash) => sqlx::query_as::<_, User>(
                r#"
                UPDATE users SET name = ?2, role = ?3, password_hash = ?4
                WHERE id = ?1
                RETURNING id, name, role, password_hash
                "#,
            )
            .bind(id)
            .bind(name)
            .bind(role)
            .bind(hash),
            None => sqlx::query_as::<_, User>(
                r#"
                UPDATE users SET name = ?2, role = ?3
                WHERE id = ?1
                RETURNING id, name, role, password_hash
                "#,
            )
            .bind(id)
            .bind(name)
            .bind(role),
        };

        query.fetch_optional(executor).await.map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UserNameAlreadyExists(name.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn delete<'e, E>(&self, executor: E, id: i64) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
