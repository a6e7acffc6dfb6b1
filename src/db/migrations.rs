// src/db/migrations.rs

use sqlx::SqlitePool;

use crate::common::error::AppError;

// Migração versionada. Cada entrada roda no máximo uma vez, na ordem da
// lista, dentro da própria transação. Substitui o velho esquema de
// "introspectar e alterar" a cada boot.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "schema_inicial",
        sql: r#"
            CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                role TEXT NOT NULL,
                password_hash TEXT NOT NULL
            );

            CREATE TABLE rooms (
                room_id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_number INTEGER NOT NULL UNIQUE,
                status TEXT NOT NULL DEFAULT 'available',
                price_full INTEGER NOT NULL,
                price_passage INTEGER NOT NULL
            );

            CREATE TABLE sales (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_id INTEGER NOT NULL REFERENCES rooms(room_id),
                gestionnaire_id INTEGER NOT NULL REFERENCES users(id),
                date TEXT NOT NULL,
                price INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                restore_date TEXT,
                sale_type TEXT NOT NULL DEFAULT 'full'
            );

            CREATE TABLE expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                gestionnaire_id INTEGER NOT NULL REFERENCES users(id),
                reason TEXT NOT NULL,
                amount INTEGER NOT NULL,
                date TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        name: "indices_de_consulta",
        sql: r#"
            CREATE INDEX idx_sales_date ON sales(date);
            CREATE INDEX idx_sales_gestionnaire ON sales(gestionnaire_id);
            CREATE INDEX idx_sales_room_status ON sales(room_id, status);
            CREATE INDEX idx_expenses_date ON expenses(date);
            CREATE INDEX idx_expenses_gestionnaire ON expenses(gestionnaire_id);
        "#,
    },
];

pub async fn run(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    for migration in MIGRATIONS {
        let applied: Option<(i64,)> =
            sqlx::query_as("SELECT version FROM schema_migrations WHERE version = ?1")
                .bind(migration.version)
                .fetch_optional(pool)
                .await?;

        if applied.is_some() {
            continue;
        }

        let mut tx = pool.begin().await?;
        sqlx::raw_sql(migration.sql).execute(&mut *tx).await?;
        sqlx::query("INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!("Migração {} ({}) aplicada.", migration.version, migration.name);
    }

    Ok(())
}
