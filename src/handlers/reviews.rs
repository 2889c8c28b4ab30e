// src/handlers/reviews.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::Product,
    models::review::Review,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    #[validate(range(min = 1, max = 5, message = "A nota deve estar entre 1 e 5."))]
    #[schema(example = 5)]
    pub rating: i32,
    #[validate(length(min = 1, message = "O comentário é obrigatório."))]
    #[schema(example = "Tomates fresquíssimos, chegaram no mesmo dia!")]
    pub comment: String,
}

// POST /api/products/{id}/reviews
#[utoipa::path(
    post,
    path = "/api/products/{id}/reviews",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = CreateReviewPayload,
    responses(
        (status = 201, description = "Avaliação criada", body = Review),
        (status = 409, description = "Usuário já avaliou este produto")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let review = app_state
        .review_service
        .create_review(user.id, product_id, payload.rating, &payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

// GET /api/favorites
#[utoipa::path(
    get,
    path = "/api/favorites",
    tag = "Reviews",
    responses((status = 200, description = "Produtos favoritos do usuário", body = [Product])),
    security(("api_jwt" = []))
)]
pub async fn list_favorites(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state.review_service.list_favorites(user.id).await?;
    Ok(Json(products))
}

// POST /api/favorites/{product_id}
#[utoipa::path(
    post,
    path = "/api/favorites/{product_id}",
    tag = "Reviews",
    params(("product_id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 201, description = "Produto favoritado"),
        (status = 409, description = "Produto já está nos favoritos")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_favorite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.review_service.add_favorite(user.id, product_id).await?;
    Ok(StatusCode::CREATED)
}

// DELETE /api/favorites/{product_id}
#[utoipa::path(
    delete,
    path = "/api/favorites/{product_id}",
    tag = "Reviews",
    params(("product_id" = Uuid, Path, description = "ID do produto")),
    responses((status = 204, description = "Produto desfavoritado (idempotente)")),
    security(("api_jwt" = []))
)]
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(product_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.review_service.remove_favorite(user.id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
