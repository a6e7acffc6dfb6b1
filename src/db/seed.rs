// src/db/seed.rs

use bcrypt::hash;
use sqlx::SqlitePool;
use std::env;

use crate::{common::error::AppError, models::auth::Role};

// Provisionamento dos dados padrão no boot: conta de administrador, um
// gestionnaire de exemplo e os 50 quartos do hotel. Idempotente: um
// segundo boot não cria nada.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), AppError> {
    let admin_name = env::var("SEED_ADMIN_NAME").unwrap_or_else(|_| "Crescent".to_string());
    let admin_password =
        env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "Crescent12#".to_string());
    seed_user(pool, &admin_name, Role::Admin, &admin_password).await?;

    let gest_password =
        env::var("SEED_GESTIONNAIRE_PASSWORD").unwrap_or_else(|_| "gest123".to_string());
    seed_user(pool, "gestionnaire", Role::Gestionnaire, &gest_password).await?;

    seed_rooms(pool).await?;
    Ok(())
}

async fn seed_user(
    pool: &SqlitePool,
    name: &str,
    role: Role,
    password: &str,
) -> Result<(), AppError> {
    let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE name = ?1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    // A senha nunca é gravada em claro; o hash roda fora do executor async.
    let password_clone = password.to_owned();
    let password_hash =
        tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

    sqlx::query("INSERT INTO users (name, role, password_hash) VALUES (?1, ?2, ?3)")
        .bind(name)
        .bind(role)
        .bind(&password_hash)
        .execute(pool)
        .await?;

    tracing::info!("Usuário padrão '{}' provisionado.", name);
    Ok(())
}

async fn seed_rooms(pool: &SqlitePool) -> Result<(), AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for number in 1..=50i64 {
        // Quartos 1-25 na tarifa básica, 26-50 na tarifa superior.
        // A tarifa "passage" é 60% da tarifa completa.
        let price_full: i64 = if number <= 25 { 50_000 } else { 75_000 };
        let price_passage = price_full * 60 / 100;

        sqlx::query("INSERT INTO rooms (room_number, price_full, price_passage) VALUES (?1, ?2, ?3)")
            .bind(number)
            .bind(price_full)
            .bind(price_passage)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!("50 quartos de exemplo provisionados.");
    Ok(())
}
