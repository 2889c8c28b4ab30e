// src/models/events.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::order::OrderStatus;

// Eventos de domínio publicados no barramento interno. Substituem o
// push-channel do serviço hospedado: qualquer transporte (polling,
// websocket, SSE) pode assinar o barramento e re-buscar o agregado.
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Order(OrderEvent),
    Cart(CartEvent),
}

#[derive(Clone, Debug)]
pub enum OrderEvent {
    Placed {
        order_id: Uuid,
        user_id: Uuid,
        total: Decimal,
    },
    StatusChanged {
        order_id: Uuid,
        user_id: Uuid,
        status: OrderStatus,
    },
}

#[derive(Clone, Debug)]
pub enum CartEvent {
    Changed { user_id: Uuid },
    FavoritesChanged { user_id: Uuid },
}
