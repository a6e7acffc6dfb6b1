// src/db/room_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::room::{Room, RoomStatus},
};

#[derive(Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn list_all(&self) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT room_id, room_number, status, price_full, price_passage FROM rooms ORDER BY room_number ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    pub async fn find_by_id(&self, room_id: i64) -> Result<Option<Room>, AppError> {
        let room = sqlx::query_as::<_, Room>(
            "SELECT room_id, room_number, status, price_full, price_passage FROM rooms WHERE room_id = ?1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(room)
    }

    pub async fn find_by_number<'e, E>(
        &self,
        executor: E,
        room_number: i64,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let room = sqlx::query_as::<_, Room>(
            "SELECT room_id, room_number, status, price_full, price_passage FROM rooms WHERE room_number = ?1",
        )
        .bind(room_number)
        .fetch_optional(executor)
        .await?;
        Ok(room)
    }

    // ---
    // Escritas
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        room_number: i64,
        price_full: i64,
        price_passage: i64,
    ) -> Result<Room, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (room_number, price_full, price_passage)
            VALUES (?1, ?2, ?3)
            RETURNING room_id, room_number, status, price_full, price_passage
            "#,
        )
        .bind(room_number)
        .bind(price_full)
        .bind(price_passage)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateRoomNumber(room_number);
                }
            }
            e.into()
        })
    }

    /// Transição atômica disponível -> vendido. O UPDATE condicional garante
    /// que duas vendas concorrentes do mesmo quarto nunca passem as duas:
    /// quem chegar depois recebe `None`, sem janela de leitura-e-escrita.
    pub async fn mark_sold_if_available<'e, E>(
        &self,
        executor: E,
        room_number: i64,
    ) -> Result<Option<Room>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms SET status = 'sold'
            WHERE room_number = ?1 AND status = 'available'
            RETURNING room_id, room_number, status, price_full, price_passage
            "#,
        )
        .bind(room_number)
        .fetch_optional(executor)
        .await?;
        Ok(room)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        room_id: i64,
        status: RoomStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("UPDATE rooms SET status = ?2 WHERE room_id = ?1")
            .bind(room_id)
            .bind(status)
            .execute(executor)
            .await?;
        Ok(())
    }

    // A condição de disponibilidade fica no próprio DELETE: se o quarto foi
    // vendido entre a checagem do serviço e este comando, nada é apagado.
    pub async fn delete_if_available<'e, E>(
        &self,
        executor: E,
        room_id: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM rooms WHERE room_id = ?1 AND status = 'available'")
            .bind(room_id)
            .execute(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RoomHasSaleHistory;
                    }
                }
                AppError::from(e)
            })?;
        Ok(result.rows_affected())
    }
}
