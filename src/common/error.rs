use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Toda falha de negócio ou de infraestrutura vira uma variante daqui e é
// convertida em JSON na borda da requisição.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Tipo de relatório inválido: {0}")]
    InvalidReportType(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Permissões insuficientes")]
    InsufficientPermissions,

    #[error("Quarto não encontrado")]
    RoomNotFound,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Despesa não encontrada")]
    ExpenseNotFound,

    #[error("Quarto {0} indisponível")]
    RoomNotAvailable(i64),

    #[error("Nenhuma venda ativa do gestionnaire para o quarto {0}")]
    NoActiveSaleForActor(i64),

    #[error("Número de quarto {0} já existe")]
    DuplicateRoomNumber(i64),

    #[error("Quarto vendido não pode ser excluído")]
    RoomIsSold,

    #[error("Quarto possui histórico de vendas")]
    RoomHasSaleHistory,

    #[error("Nome de usuário '{0}' já existe")]
    UserNameAlreadyExists(String),

    #[error("Usuário possui vendas ou despesas registradas")]
    UserHasRecords,

    #[error("Não é possível excluir a própria conta")]
    CannotDeleteSelf,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidReportType(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Nome ou senha inválidos.".into())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".into(),
            ),

            AppError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                "Acesso negado. Permissões insuficientes.".into(),
            ),

            AppError::RoomNotFound
            | AppError::UserNotFound
            | AppError::SaleNotFound
            | AppError::ExpenseNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::RoomNotAvailable(n) => (
                StatusCode::CONFLICT,
                format!("Quarto {} não está disponível ou não existe.", n),
            ),
            AppError::NoActiveSaleForActor(n) => (
                StatusCode::CONFLICT,
                format!("Não há venda ativa sua para o quarto {}.", n),
            ),
            AppError::DuplicateRoomNumber(n) => {
                (StatusCode::CONFLICT, format!("Quarto {} já existe.", n))
            }
            AppError::RoomIsSold => (
                StatusCode::CONFLICT,
                "Não é possível excluir um quarto vendido.".into(),
            ),
            AppError::RoomHasSaleHistory => (
                StatusCode::CONFLICT,
                "Quarto possui histórico de vendas e não pode ser excluído.".into(),
            ),
            AppError::UserNameAlreadyExists(name) => {
                (StatusCode::CONFLICT, format!("Usuário '{}' já existe.", name))
            }
            AppError::UserHasRecords => (
                StatusCode::CONFLICT,
                "Não é possível excluir usuário com vendas ou despesas registradas.".into(),
            ),
            AppError::CannotDeleteSelf => (
                StatusCode::CONFLICT,
                "Você não pode excluir a sua própria conta.".into(),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".into(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
