// src/handlers/checkout.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::address::ShippingDetails,
    models::order::OrderDetail,
    services::checkout_service::AddressSelection,
    services::payment::PaymentAttempt,
};

/// Ou `addressId` (endereço salvo) ou `newAddress` (inline, vira o novo
/// padrão do usuário). Os dois juntos: o id salvo vence.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub address_id: Option<Uuid>,
    pub new_address: Option<ShippingDetails>,
    pub payment: PaymentAttempt,
}

// POST /api/checkout
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "Checkout",
    request_body = CheckoutPayload,
    responses(
        (status = 201, description = "Pedido criado", body = OrderDetail),
        (status = 400, description = "Carrinho vazio ou endereço incompleto"),
        (status = 402, description = "Pagamento recusado pelo gateway"),
        (status = 500, description = "Pagamento capturado mas pedido não gravado (reconciliação)")
    ),
    security(("api_jwt" = []))
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    let selection = match (payload.address_id, payload.new_address) {
        (Some(id), _) => AddressSelection::Saved(id),
        (None, Some(details)) => AddressSelection::New(details),
        (None, None) => return Err(AppError::MissingFields(vec!["addressId", "newAddress"])),
    };

    let detail = app_state
        .checkout_service
        .checkout(&user, selection, payload.payment)
        .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}
