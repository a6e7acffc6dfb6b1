// Testes da máquina de estados quarto/venda sobre SQLite em memória.

use myhotel_backend::{
    common::error::AppError,
    config::AppState,
    db::migrations,
    models::{
        auth::{Role, User},
        room::RoomStatus,
        sale::{SaleStatus, SaleType},
    },
};
use sqlx::sqlite::SqlitePoolOptions;

async fn setup_state() -> AppState {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    migrations::run(&pool).await.expect("Failed to run migrations");
    AppState::with_pool(pool, "test-secret".to_string())
}

async fn create_test_user(state: &AppState, name: &str, role: Role) -> User {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, role, password_hash) VALUES (?1, ?2, 'hash') RETURNING id, name, role, password_hash",
    )
    .bind(name)
    .bind(role)
    .fetch_one(&state.db_pool)
    .await
    .expect("Failed to create user")
}

async fn room_status(state: &AppState, room_number: i64) -> String {
    sqlx::query_scalar("SELECT status FROM rooms WHERE room_number = ?1")
        .bind(room_number)
        .fetch_one(&state.db_pool)
        .await
        .expect("Room not found")
}

async fn count_sales(state: &AppState) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(&state.db_pool)
        .await
        .unwrap()
}

async fn count_rooms(state: &AppState) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
        .fetch_one(&state.db_pool)
        .await
        .unwrap()
}

// Invariante central: quarto 'sold' <=> exatamente uma venda ativa dele.
async fn assert_room_sale_invariant(state: &AppState) {
    let rows: Vec<(i64, String, i64)> = sqlx::query_as(
        r#"
        SELECT r.room_id, r.status,
               (SELECT COUNT(*) FROM sales s WHERE s.room_id = r.room_id AND s.status = 'active')
        FROM rooms r
        "#,
    )
    .fetch_all(&state.db_pool)
    .await
    .unwrap();

    for (room_id, status, active_sales) in rows {
        if status == "sold" {
            assert_eq!(active_sales, 1, "quarto {} vendido sem venda ativa única", room_id);
        } else {
            assert_eq!(active_sales, 0, "quarto {} disponível com venda ativa", room_id);
        }
    }
}

#[tokio::test]
async fn vender_e_restaurar_quarto() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;
    state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    let sale = state
        .room_service
        .sell_room(&manager, 1, SaleType::Full)
        .await
        .unwrap();

    assert_eq!(sale.price, 50_000);
    assert_eq!(sale.status, SaleStatus::Active);
    assert_eq!(sale.sale_type, SaleType::Full);
    assert!(sale.restore_date.is_none());
    assert_eq!(room_status(&state, 1).await, "sold");
    assert_room_sale_invariant(&state).await;

    let restored = state.room_service.restore_room(&manager, 1).await.unwrap();

    assert_eq!(restored.id, sale.id);
    assert_eq!(restored.status, SaleStatus::Restored);
    assert!(restored.restore_date.is_some());
    assert_eq!(room_status(&state, 1).await, "available");
    assert_room_sale_invariant(&state).await;
}

#[tokio::test]
async fn venda_passage_congela_tarifa_passage() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;
    state.room_service.add_room(7, 75_000, 45_000).await.unwrap();

    let sale = state
        .room_service
        .sell_room(&manager, 7, SaleType::Passage)
        .await
        .unwrap();

    assert_eq!(sale.price, 45_000);
    assert_eq!(sale.sale_type, SaleType::Passage);
}

#[tokio::test]
async fn vender_quarto_ja_vendido_falha_sem_criar_venda() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;
    state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    state
        .room_service
        .sell_room(&manager, 1, SaleType::Full)
        .await
        .unwrap();

    let err = state
        .room_service
        .sell_room(&manager, 1, SaleType::Full)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::RoomNotAvailable(1)));
    assert_eq!(count_sales(&state).await, 1);
    assert_room_sale_invariant(&state).await;
}

#[tokio::test]
async fn vender_quarto_inexistente_falha() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;

    let err = state
        .room_service
        .sell_room(&manager, 99, SaleType::Full)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::RoomNotAvailable(99)));
    assert_eq!(count_sales(&state).await, 0);
}

#[tokio::test]
async fn restaurar_venda_de_outro_gestionnaire_falha_sem_mudar_estado() {
    let state = setup_state().await;
    let manager_a = create_test_user(&state, "manager_a", Role::Gestionnaire).await;
    let manager_b = create_test_user(&state, "manager_b", Role::Gestionnaire).await;
    state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    state
        .room_service
        .sell_room(&manager_a, 1, SaleType::Full)
        .await
        .unwrap();

    let err = state
        .room_service
        .restore_room(&manager_b, 1)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NoActiveSaleForActor(1)));
    assert_eq!(room_status(&state, 1).await, "sold");
    assert_room_sale_invariant(&state).await;
}

#[tokio::test]
async fn restaurar_sem_venda_ativa_falha() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;
    state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    let err = state.room_service.restore_room(&manager, 1).await.unwrap_err();

    assert!(matches!(err, AppError::NoActiveSaleForActor(1)));
    assert_eq!(room_status(&state, 1).await, "available");
}

#[tokio::test]
async fn numero_de_quarto_duplicado_e_conflito() {
    let state = setup_state().await;
    state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    let err = state.room_service.add_room(1, 75_000, 45_000).await.unwrap_err();

    assert!(matches!(err, AppError::DuplicateRoomNumber(1)));
    assert_eq!(count_rooms(&state).await, 1);
}

#[tokio::test]
async fn excluir_quarto_vendido_e_rejeitado() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;
    let room = state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    state
        .room_service
        .sell_room(&manager, 1, SaleType::Full)
        .await
        .unwrap();

    let err = state.room_service.delete_room(room.room_id).await.unwrap_err();

    assert!(matches!(err, AppError::RoomIsSold));
    assert_eq!(count_rooms(&state).await, 1);
}

#[tokio::test]
async fn excluir_quarto_disponivel_sem_historico_funciona() {
    let state = setup_state().await;
    let room = state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    assert_eq!(room.status, RoomStatus::Available);
    state.room_service.delete_room(room.room_id).await.unwrap();
    assert_eq!(count_rooms(&state).await, 0);
}

#[tokio::test]
async fn excluir_quarto_com_historico_de_vendas_e_conflito() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;
    let room = state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    state
        .room_service
        .sell_room(&manager, 1, SaleType::Full)
        .await
        .unwrap();
    state.room_service.restore_room(&manager, 1).await.unwrap();

    let err = state.room_service.delete_room(room.room_id).await.unwrap_err();

    assert!(matches!(err, AppError::RoomHasSaleHistory));
    assert_eq!(count_rooms(&state).await, 1);
}

#[tokio::test]
async fn excluir_relatorio_da_venda_ativa_libera_o_quarto() {
    let state = setup_state().await;
    let manager = create_test_user(&state, "gestionnaire", Role::Gestionnaire).await;
    state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    let sale = state
        .room_service
        .sell_room(&manager, 1, SaleType::Full)
        .await
        .unwrap();

    state.room_service.delete_sale_report(sale.id).await.unwrap();

    assert_eq!(room_status(&state, 1).await, "available");
    assert_eq!(count_sales(&state).await, 0);
    assert_room_sale_invariant(&state).await;
}

// O caso que era um bug latente no sistema antigo: excluir uma venda já
// restaurada não pode derrubar a venda ativa de quem revendeu o quarto.
#[tokio::test]
async fn excluir_venda_restaurada_preserva_a_revenda_ativa() {
    let state = setup_state().await;
    let manager_a = create_test_user(&state, "manager_a", Role::Gestionnaire).await;
    let manager_b = create_test_user(&state, "manager_b", Role::Gestionnaire).await;
    state.room_service.add_room(1, 50_000, 30_000).await.unwrap();

    let first_sale = state
        .room_service
        .sell_room(&manager_a, 1, SaleType::Full)
        .await
        .unwrap();
    state.room_service.restore_room(&manager_a, 1).await.unwrap();

    let second_sale = state
        .room_service
        .sell_room(&manager_b, 1, SaleType::Passage)
        .await
        .unwrap();

    state
        .room_service
        .delete_sale_report(first_sale.id)
        .await
        .unwrap();

    // O quarto continua vendido pela venda ativa do manager_b
    assert_eq!(room_status(&state, 1).await, "sold");
    assert_eq!(count_sales(&state).await, 1);
    let remaining: i64 = sqlx::query_scalar("SELECT id FROM sales")
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, second_sale.id);
    assert_room_sale_invariant(&state).await;
}

#[tokio::test]
async fn excluir_relatorio_de_venda_inexistente_e_not_found() {
    let state = setup_state().await;

    let err = state.room_service.delete_sale_report(42).await.unwrap_err();

    assert!(matches!(err, AppError::SaleNotFound));
}
