// src/handlers/orders.rs
// Lado do cliente: pedidos são SOMENTE leitura (a régua de progresso é
// exibida; quem avança o status é o painel da loja).

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::order::{Order, OrderDetail},
};

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    responses((status = 200, description = "Pedidos do usuário, mais recentes primeiro", body = [Order])),
    security(("api_jwt" = []))
)]
pub async fn list_my_orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = app_state.order_service.list_my_orders(user.id).await?;
    Ok(Json(orders))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com itens e linha do tempo", body = OrderDetail),
        (status = 404, description = "Pedido não encontrado ou de outro usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_my_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = app_state.order_service.get_my_order(user.id, id).await?;
    Ok(Json(detail))
}
