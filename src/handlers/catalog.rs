// src/handlers/catalog.rs
// Vitrine pública: navegação sem autenticação, só produtos aprovados.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{ProductDetail, ProductPage},
    models::review::Review,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BrowseParams {
    /// Busca por nome (parcial, sem diferenciar maiúsculas).
    pub search: Option<String>,
    /// Filtra por uma tag exata, ex: "legumes".
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(BrowseParams),
    responses((status = 200, description = "Página da vitrine", body = ProductPage))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<ProductPage>, AppError> {
    let page = app_state
        .catalog_service
        .list_products(
            params.search.as_deref(),
            params.tag.as_deref(),
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(20),
        )
        .await?;

    Ok(Json(page))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Detalhe do produto com nota média", body = ProductDetail),
        (status = 404, description = "Produto não encontrado ou não aprovado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductDetail>, AppError> {
    let detail = app_state.catalog_service.get_product(id).await?;
    Ok(Json(detail))
}

// GET /api/products/{id}/reviews
#[utoipa::path(
    get,
    path = "/api/products/{id}/reviews",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses((status = 200, description = "Avaliações do produto", body = [Review]))
)]
pub async fn list_product_reviews(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = app_state.review_service.list_for_product(id).await?;
    Ok(Json(reviews))
}
