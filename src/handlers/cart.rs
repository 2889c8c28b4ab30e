// src/handlers/cart.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::cart::{CartItem, CartSummary},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartPayload {
    pub product_id: Uuid,
    #[validate(range(min = 1, message = "A quantidade deve ser no mínimo 1."))]
    #[schema(example = 2)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityPayload {
    #[validate(range(min = 1, message = "A quantidade deve ser no mínimo 1."))]
    #[schema(example = 3)]
    pub quantity: i32,
}

// GET /api/cart
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses((status = 200, description = "Carrinho com subtotal, frete e total", body = CartSummary)),
    security(("api_jwt" = []))
)]
pub async fn get_cart(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<CartSummary>, AppError> {
    let summary = app_state.cart_service.get_cart(user.id).await?;
    Ok(Json(summary))
}

// POST /api/cart/items
#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = "Cart",
    request_body = AddToCartPayload,
    responses(
        (status = 201, description = "Item adicionado com o preço congelado", body = CartItem),
        (status = 409, description = "Produto já está no carrinho")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AddToCartPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let item = app_state
        .cart_service
        .add_item(&app_state.pool, user.id, payload.product_id, payload.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PATCH /api/cart/items/{id}
#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}",
    tag = "Cart",
    params(("id" = Uuid, Path, description = "ID da linha do carrinho")),
    request_body = UpdateQuantityPayload,
    responses((status = 200, description = "Quantidade ajustada", body = CartItem)),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityPayload>,
) -> Result<Json<CartItem>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let item = app_state
        .cart_service
        .set_quantity(user.id, id, payload.quantity)
        .await?;

    Ok(Json(item))
}

// DELETE /api/cart/items/{id}
#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    tag = "Cart",
    params(("id" = Uuid, Path, description = "ID da linha do carrinho")),
    responses((status = 204, description = "Item removido (idempotente)")),
    security(("api_jwt" = []))
)]
pub async fn remove_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.cart_service.remove_item(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/cart/count
#[utoipa::path(
    get,
    path = "/api/cart/count",
    tag = "Cart",
    responses((status = 200, description = "Quantidade de linhas no carrinho (badge)")),
    security(("api_jwt" = []))
)]
pub async fn count_items(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let count = app_state.cart_service.count_items(user.id).await?;
    Ok(Json(json!({ "count": count })))
}
