// src/handlers/company.rs
// Painel da loja: empresa, produtos do fornecedor, pedidos e moderação.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, ModeratorUser, VendorUser},
    models::catalog::{Company, Product},
    models::order::{Order, OrderDetail, OrderStatus},
};

// ---
// Empresa
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyPayload {
    #[validate(length(min = 2, message = "O nome da empresa é obrigatório."))]
    #[schema(example = "Sítio Boa Terra")]
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub certificate_url: Option<String>,
}

// POST /api/company
#[utoipa::path(
    post,
    path = "/api/company",
    tag = "Company",
    request_body = RegisterCompanyPayload,
    responses(
        (status = 201, description = "Empresa cadastrada; o dono vira fornecedor", body = Company),
        (status = 409, description = "Usuário já possui empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn register_company(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RegisterCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .catalog_service
        .register_company(
            &app_state.pool,
            &user,
            &payload.name,
            payload.description.as_deref(),
            payload.logo_url.as_deref(),
            payload.certificate_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

// GET /api/company
#[utoipa::path(
    get,
    path = "/api/company",
    tag = "Company",
    responses(
        (status = 200, description = "Empresa do fornecedor logado", body = Company),
        (status = 404, description = "Fornecedor sem empresa cadastrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_company(
    State(app_state): State<AppState>,
    VendorUser(user): VendorUser,
) -> Result<Json<Company>, AppError> {
    let company = app_state.catalog_service.my_company(user.id).await?;
    Ok(Json(company))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 2, message = "O nome da empresa não pode ficar vazio."))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub certificate_url: Option<String>,
}

// PATCH /api/company
#[utoipa::path(
    patch,
    path = "/api/company",
    tag = "Company",
    request_body = UpdateCompanyPayload,
    responses((status = 200, description = "Empresa atualizada", body = Company)),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    VendorUser(user): VendorUser,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<Json<Company>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .catalog_service
        .update_company(
            user.id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.logo_url.as_deref(),
            payload.certificate_url.as_deref(),
        )
        .await?;

    Ok(Json(company))
}

// ---
// Produtos do fornecedor
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 2, message = "O nome do produto é obrigatório."))]
    #[schema(example = "Tomate orgânico (kg)")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "12.50")]
    pub original_price: Decimal,
    #[schema(example = "9.90")]
    pub discount_price: Option<Decimal>,
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    #[schema(example = 40)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "empty_object")]
    #[schema(value_type = Object)]
    pub nutrients: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::json!({})
}

// POST /api/company/products
#[utoipa::path(
    post,
    path = "/api/company/products",
    tag = "Company",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado (aguardando aprovação)", body = Product),
        (status = 400, description = "Preço inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    VendorUser(user): VendorUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .create_product(
            user.id,
            &payload.name,
            payload.description.as_deref(),
            payload.original_price,
            payload.discount_price,
            payload.stock_quantity,
            &payload.media_urls,
            payload.video_url.as_deref(),
            &payload.tags,
            payload.nutrients,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/company/products
#[utoipa::path(
    get,
    path = "/api/company/products",
    tag = "Company",
    responses((status = 200, description = "Produtos da empresa (aprovados ou não)", body = [Product])),
    security(("api_jwt" = []))
)]
pub async fn list_my_products(
    State(app_state): State<AppState>,
    VendorUser(user): VendorUser,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state.catalog_service.list_my_products(user.id).await?;
    Ok(Json(products))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 2, message = "O nome do produto não pode ficar vazio."))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<Decimal>,
    pub discount_price: Option<Decimal>,
    #[validate(range(min = 0, message = "O estoque não pode ser negativo."))]
    pub stock_quantity: Option<i32>,
    pub media_urls: Option<Vec<String>>,
    pub video_url: Option<String>,
    pub tags: Option<Vec<String>>,
    #[schema(value_type = Object)]
    pub nutrients: Option<serde_json::Value>,
}

// PATCH /api/company/products/{id}
#[utoipa::path(
    patch,
    path = "/api/company/products/{id}",
    tag = "Company",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado ou de outra empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    VendorUser(user): VendorUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .update_product(
            user.id,
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.original_price,
            payload.discount_price,
            payload.stock_quantity,
            payload.media_urls.as_deref(),
            payload.video_url.as_deref(),
            payload.tags.as_deref(),
            payload.nutrients,
        )
        .await?;

    Ok(Json(product))
}

// ---
// Pedidos da loja
// ---

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StoreOrdersParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// GET /api/company/orders
#[utoipa::path(
    get,
    path = "/api/company/orders",
    tag = "Company",
    params(StoreOrdersParams),
    responses((status = 200, description = "Pedidos da loja, mais recentes primeiro", body = [Order])),
    security(("api_jwt" = []))
)]
pub async fn list_store_orders(
    State(app_state): State<AppState>,
    VendorUser(_user): VendorUser,
    Query(params): Query<StoreOrdersParams>,
) -> Result<Json<Vec<Order>>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);
    let orders = app_state
        .order_service
        .list_store_orders(per_page, (page - 1) * per_page)
        .await?;
    Ok(Json(orders))
}

// GET /api/company/orders/{id}
#[utoipa::path(
    get,
    path = "/api/company/orders/{id}",
    tag = "Company",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses((status = 200, description = "Detalhe do pedido", body = OrderDetail)),
    security(("api_jwt" = []))
)]
pub async fn get_store_order(
    State(app_state): State<AppState>,
    VendorUser(_user): VendorUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = app_state.order_service.get_store_order(id).await?;
    Ok(Json(detail))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceOrderPayload {
    #[schema(example = "SHIPPED")]
    pub status: OrderStatus,
}

// POST /api/company/orders/{id}/advance
#[utoipa::path(
    post,
    path = "/api/company/orders/{id}/advance",
    tag = "Company",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = AdvanceOrderPayload,
    responses(
        (status = 200, description = "Status avançado", body = Order),
        (status = 409, description = "Transição inválida (voltar ou repetir estágio)")
    ),
    security(("api_jwt" = []))
)]
pub async fn advance_order(
    State(app_state): State<AppState>,
    VendorUser(_user): VendorUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdvanceOrderPayload>,
) -> Result<Json<Order>, AppError> {
    let order = app_state.order_service.advance(id, payload.status).await?;
    Ok(Json(order))
}

// POST /api/company/orders/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/company/orders/{id}/cancel",
    tag = "Company",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido cancelado", body = Order),
        (status = 409, description = "Pedido já entregue ou já cancelado")
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel_order(
    State(app_state): State<AppState>,
    VendorUser(_user): VendorUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = app_state.order_service.cancel(id).await?;
    Ok(Json(order))
}

// ---
// Moderação
// ---

// GET /api/moderation/products
#[utoipa::path(
    get,
    path = "/api/moderation/products",
    tag = "Moderation",
    responses((status = 200, description = "Fila de produtos aguardando aprovação", body = [Product])),
    security(("api_jwt" = []))
)]
pub async fn list_pending_products(
    State(app_state): State<AppState>,
    ModeratorUser(_user): ModeratorUser,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state.catalog_service.list_pending_products().await?;
    Ok(Json(products))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPayload {
    #[schema(example = true)]
    pub approved: bool,
}

// POST /api/moderation/products/{id}/approval
#[utoipa::path(
    post,
    path = "/api/moderation/products/{id}/approval",
    tag = "Moderation",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = ApprovalPayload,
    responses((status = 200, description = "Flag de aprovação atualizada", body = Product)),
    security(("api_jwt" = []))
)]
pub async fn set_product_approval(
    State(app_state): State<AppState>,
    ModeratorUser(_user): ModeratorUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ApprovalPayload>,
) -> Result<Json<Product>, AppError> {
    let product = app_state
        .catalog_service
        .set_product_approval(id, payload.approved)
        .await?;
    Ok(Json(product))
}
