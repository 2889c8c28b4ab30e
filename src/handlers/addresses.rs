// src/handlers/addresses.rs
// Caderno de endereços do perfil. O banco garante no máximo UM padrão
// por usuário; o serviço limpa os demais na mesma transação.

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
    models::address::{Address, ShippingDetails},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    #[validate(length(min = 2, message = "O nome do destinatário é obrigatório."))]
    #[schema(example = "Maria da Silva")]
    pub recipient_name: String,
    #[validate(length(min = 1, message = "O complemento é obrigatório."))]
    #[schema(example = "Casa 2")]
    pub house_unit: String,
    #[validate(length(min = 1, message = "A rua é obrigatória."))]
    #[schema(example = "Rua das Flores, 123")]
    pub street: String,
    #[validate(length(min = 1, message = "O bairro é obrigatório."))]
    #[schema(example = "Jardim Primavera")]
    pub locality: String,
    #[validate(length(min = 1, message = "A cidade é obrigatória."))]
    #[schema(example = "São Paulo")]
    pub city: String,
    #[validate(length(min = 1, message = "O estado é obrigatório."))]
    #[schema(example = "SP")]
    pub state: String,
    #[validate(length(min = 1, message = "O CEP é obrigatório."))]
    #[schema(example = "01234-567")]
    pub postal_code: String,
    #[validate(length(min = 1, message = "O país é obrigatório."))]
    #[schema(example = "Brasil")]
    pub country: String,
    #[validate(length(min = 8, message = "O telefone principal é obrigatório."))]
    #[schema(example = "(11) 99999-8888")]
    pub phone_primary: String,
    pub phone_secondary: Option<String>,
    pub latitude: Option<rust_decimal::Decimal>,
    pub longitude: Option<rust_decimal::Decimal>,
    #[serde(default)]
    #[schema(example = true)]
    pub is_default: bool,
}

impl AddressPayload {
    fn shipping_details(&self) -> ShippingDetails {
        ShippingDetails {
            recipient_name: self.recipient_name.clone(),
            house_unit: self.house_unit.clone(),
            street: self.street.clone(),
            locality: self.locality.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
            phone_primary: self.phone_primary.clone(),
            phone_secondary: self.phone_secondary.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

// GET /api/addresses
#[utoipa::path(
    get,
    path = "/api/addresses",
    tag = "Addresses",
    responses((status = 200, description = "Endereços do usuário", body = [Address])),
    security(("api_jwt" = []))
)]
pub async fn list_addresses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Address>>, AppError> {
    let addresses = app_state.address_service.list(user.id).await?;
    Ok(Json(addresses))
}

// POST /api/addresses
#[utoipa::path(
    post,
    path = "/api/addresses",
    tag = "Addresses",
    request_body = AddressPayload,
    responses((status = 201, description = "Endereço criado", body = Address)),
    security(("api_jwt" = []))
)]
pub async fn create_address(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AddressPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let address = app_state
        .address_service
        .upsert(&app_state.pool, user.id, None, &payload.shipping_details(), payload.is_default)
        .await?;

    Ok((StatusCode::CREATED, Json(address)))
}

// PUT /api/addresses/{id}
#[utoipa::path(
    put,
    path = "/api/addresses/{id}",
    tag = "Addresses",
    params(("id" = Uuid, Path, description = "ID do endereço")),
    request_body = AddressPayload,
    responses(
        (status = 200, description = "Endereço atualizado", body = Address),
        (status = 404, description = "Endereço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_address(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddressPayload>,
) -> Result<Json<Address>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let address = app_state
        .address_service
        .upsert(&app_state.pool, user.id, Some(id), &payload.shipping_details(), payload.is_default)
        .await?;

    Ok(Json(address))
}

// DELETE /api/addresses/{id}
#[utoipa::path(
    delete,
    path = "/api/addresses/{id}",
    tag = "Addresses",
    params(("id" = Uuid, Path, description = "ID do endereço")),
    responses(
        (status = 204, description = "Endereço removido"),
        (status = 404, description = "Endereço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_address(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.address_service.remove(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
