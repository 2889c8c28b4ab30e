use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Taxonomia: validação, duplicidade, autenticação, não-encontrado,
// pagamento e persistência — tudo convertido em resposta HTTP na borda.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Validação de checkout: lista de campos obrigatórios ausentes.
    #[error("Campos obrigatórios ausentes")]
    MissingFields(Vec<&'static str>),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso restrito a fornecedores")]
    VendorOnly,

    #[error("Acesso restrito a moderadores")]
    ModeratorOnly,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("Endereço não encontrado")]
    AddressNotFound,

    #[error("Empresa não encontrada")]
    CompanyNotFound,

    #[error("Item do carrinho não encontrado")]
    CartItemNotFound,

    #[error("Este produto já está no carrinho")]
    AlreadyInCart,

    #[error("Este produto já está nos favoritos")]
    AlreadyFavorited,

    #[error("Você já avaliou este produto")]
    ReviewAlreadyExists,

    #[error("Este usuário já possui uma empresa cadastrada")]
    CompanyAlreadyExists,

    #[error("Quantidade inválida: {0}")]
    InvalidQuantity(i32),

    #[error("O carrinho está vazio")]
    EmptyCart,

    #[error("Produto sem estoque suficiente")]
    OutOfStock,

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Pagamento recusado: {0}")]
    PaymentFailed(String),

    // Pagamento capturado, mas o pedido não pôde ser gravado mesmo após
    // nova tentativa. O valor JÁ está na fila de reconciliação.
    #[error("Falha ao gravar o pedido após o pagamento")]
    PersistenceFailed,

    #[error("Preço inválido no catálogo para o produto {0}")]
    PriceIntegrity(uuid::Uuid),

    // Fornecedor tentou gravar um preço não positivo ou desconto negativo.
    #[error("Preço inválido")]
    InvalidPrice,

    // Variante para erros de banco de dados (sqlx)
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
        let (status, error_message) = match self {
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
            AppError::MissingFields(fields) => {
                let body = Json(json!({
                    "error": "Campos obrigatórios ausentes.",
                    "details": fields,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::PaymentFailed(reason) => {
                // O motivo vem do gateway e é exibido literalmente ao usuário.
                let body = Json(json!({ "error": format!("Pagamento recusado: {}", reason) }));
                return (StatusCode::PAYMENT_REQUIRED, body).into_response();
            }
            AppError::InvalidTransition { ref from, ref to } => {
                let body = Json(json!({
                    "error": format!("Transição de status inválida: {} -> {}", from, to),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::InvalidQuantity(q) => {
                let body = Json(json!({ "error": format!("Quantidade inválida: {}", q) }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::AlreadyInCart => (
                StatusCode::CONFLICT,
                "Este produto já está no carrinho. Ajuste a quantidade na sacola.",
            ),
            AppError::AlreadyFavorited => {
                (StatusCode::CONFLICT, "Este produto já está nos favoritos.")
            }
            AppError::ReviewAlreadyExists => {
                (StatusCode::CONFLICT, "Você já avaliou este produto.")
            }
            AppError::CompanyAlreadyExists => {
                (StatusCode::CONFLICT, "Este usuário já possui uma empresa cadastrada.")
            }
            AppError::OutOfStock => (StatusCode::CONFLICT, "Produto sem estoque suficiente."),
            AppError::EmptyCart => (StatusCode::BAD_REQUEST, "O carrinho está vazio."),
            AppError::InvalidPrice => (
                StatusCode::BAD_REQUEST,
                "Preço inválido: o preço deve ser positivo e o desconto não pode ser negativo.",
            ),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos."),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::VendorOnly => (StatusCode::FORBIDDEN, "Acesso restrito a fornecedores."),
            AppError::ModeratorOnly => (StatusCode::FORBIDDEN, "Acesso restrito a moderadores."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "Produto não encontrado."),
            AppError::CartItemNotFound => {
                (StatusCode::NOT_FOUND, "Item do carrinho não encontrado.")
            }
            AppError::OrderNotFound => (StatusCode::NOT_FOUND, "Pedido não encontrado."),
            AppError::AddressNotFound => (StatusCode::NOT_FOUND, "Endereço não encontrado."),
            AppError::CompanyNotFound => (StatusCode::NOT_FOUND, "Empresa não encontrada."),
            AppError::PersistenceFailed => (
                // O cliente FOI cobrado: a mensagem deixa claro que a equipe
                // vai concluir o pedido manualmente (fila de reconciliação).
                StatusCode::INTERNAL_SERVER_ERROR,
                "Seu pagamento foi confirmado, mas houve uma falha ao registrar o pedido. Nossa equipe foi notificada e concluirá o pedido manualmente.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_de_carrinho_ausente_vira_404() {
        // Linha de carrinho ausente não é "produto não encontrado":
        // o recurso que faltou é o item do carrinho.
        let response = AppError::CartItemNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicata_no_carrinho_vira_409() {
        let response = AppError::AlreadyInCart.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
