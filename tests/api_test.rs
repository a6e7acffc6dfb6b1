// Testes de ponta a ponta da superfície HTTP: autenticação, papéis e o
// fluxo venda -> relatório -> exportação, dirigindo o router com oneshot.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use myhotel_backend::{config::AppState, db::migrations, models::auth::Role, server};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn setup_app() -> (AppState, Router) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    migrations::run(&pool).await.expect("Failed to run migrations");

    let state = AppState::with_pool(pool, "test-secret".to_string());

    state
        .user_service
        .create_user("admin", Role::Admin, "admin123")
        .await
        .expect("Failed to create admin");
    state
        .user_service
        .create_user("gestionnaire", Role::Gestionnaire, "gest123")
        .await
        .expect("Failed to create gestionnaire");

    let app = server::build_router(state.clone());
    (state, app)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

async fn login(app: &Router, name: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "name": name, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token ausente").to_string()
}

#[tokio::test]
async fn login_valido_emite_token_e_me_responde() {
    let (_state, app) = setup_app().await;

    let token = login(&app, "gestionnaire", "gest123").await;

    let (status, body) = send(&app, "GET", "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "gestionnaire");
    assert_eq!(body["role"], "gestionnaire");
    // O hash de senha nunca sai na resposta
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn credenciais_invalidas_sao_401() {
    let (_state, app) = setup_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "name": "gestionnaire", "password": "errada" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rotas_protegidas_exigem_token() {
    let (_state, app) = setup_app().await;

    let (status, _) = send(&app, "GET", "/api/rooms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/reports", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn papel_divergente_recebe_403() {
    let (_state, app) = setup_app().await;
    let admin_token = login(&app, "admin", "admin123").await;
    let gest_token = login(&app, "gestionnaire", "gest123").await;

    // Vender é exclusivo do gestionnaire
    let (status, _) = send(
        &app,
        "POST",
        "/api/rooms/sell",
        Some(&admin_token),
        Some(serde_json::json!({ "roomNumber": 1, "saleType": "full" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Criar quarto é exclusivo do admin
    let (status, _) = send(
        &app,
        "POST",
        "/api/rooms",
        Some(&gest_token),
        Some(serde_json::json!({ "roomNumber": 1, "priceFull": 50000, "pricePassage": 30000 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Gestão de usuários idem
    let (status, _) = send(&app, "GET", "/api/users", Some(&gest_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn fluxo_completo_venda_relatorio_e_exclusao() {
    let (_state, app) = setup_app().await;
    let admin_token = login(&app, "admin", "admin123").await;
    let gest_token = login(&app, "gestionnaire", "gest123").await;

    // Admin cria o quarto
    let (status, room) = send(
        &app,
        "POST",
        "/api/rooms",
        Some(&admin_token),
        Some(serde_json::json!({ "roomNumber": 1, "priceFull": 50000, "pricePassage": 30000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(room["status"], "available");

    // Quarto duplicado é conflito
    let (status, _) = send(
        &app,
        "POST",
        "/api/rooms",
        Some(&admin_token),
        Some(serde_json::json!({ "roomNumber": 1, "priceFull": 50000, "pricePassage": 30000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Gestionnaire vende
    let (status, sale) = send(
        &app,
        "POST",
        "/api/rooms/sell",
        Some(&gest_token),
        Some(serde_json::json!({ "roomNumber": 1, "saleType": "full" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["price"], 50000);
    assert_eq!(sale["status"], "active");

    // Vender de novo falha com conflito
    let (status, _) = send(
        &app,
        "POST",
        "/api/rooms/sell",
        Some(&gest_token),
        Some(serde_json::json!({ "roomNumber": 1, "saleType": "passage" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Relatório do dia na visão do admin
    let (status, report) = send(
        &app,
        "GET",
        "/api/reports?period=today",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalIncome"], 50000);
    assert_eq!(report["netProfit"], 50000);
    assert_eq!(report["sales"].as_array().unwrap().len(), 1);

    // Exportação CSV carrega o resumo formatado em BIF
    let request = Request::builder()
        .method("GET")
        .uri("/api/reports/export/csv?period=today")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("Revenu total,50 000 BIF"));
    assert!(text.contains("Date,Chambre,Gestionnaire,Type,Prix,Statut"));

    // Admin exclui o relatório da venda; o quarto volta a ficar disponível
    let sale_id = sale["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/reports/sale/{}", sale_id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, rooms) = send(&app, "GET", "/api/rooms", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rooms[0]["status"], "available");
}

#[tokio::test]
async fn tipo_de_relatorio_desconhecido_e_400() {
    let (_state, app) = setup_app().await;
    let admin_token = login(&app, "admin", "admin123").await;

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/reports/bogus/1",
        Some(&admin_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_resume_o_dia() {
    let (_state, app) = setup_app().await;
    let admin_token = login(&app, "admin", "admin123").await;
    let gest_token = login(&app, "gestionnaire", "gest123").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/rooms",
        Some(&admin_token),
        Some(serde_json::json!({ "roomNumber": 1, "priceFull": 50000, "pricePassage": 30000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/rooms/sell",
        Some(&gest_token),
        Some(serde_json::json!({ "roomNumber": 1, "saleType": "full" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(&gest_token),
        Some(serde_json::json!({ "reason": "Savon", "amount": 10000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, summary) = send(
        &app,
        "GET",
        "/api/dashboard/summary",
        Some(&gest_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalRooms"], 1);
    assert_eq!(summary["availableRooms"], 0);
    assert_eq!(summary["soldRooms"], 1);
    assert_eq!(summary["todayIncome"], 50000);
    assert_eq!(summary["todayExpenses"], 10000);
    assert_eq!(summary["profit"], 40000);
}

#[tokio::test]
async fn valor_de_despesa_invalido_e_400() {
    let (_state, app) = setup_app().await;
    let gest_token = login(&app, "gestionnaire", "gest123").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/expenses",
        Some(&gest_token),
        Some(serde_json::json!({ "reason": "Savon", "amount": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
