// src/services/order_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::events::{DomainEvent, OrderEvent},
    models::order::{timeline, Order, OrderDetail, OrderStatus},
    services::event_bus::EventBus,
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    events: EventBus,
}

impl OrderService {
    pub fn new(order_repo: OrderRepository, events: EventBus) -> Self {
        Self { order_repo, events }
    }

    // --- Visão do cliente (somente leitura) ---

    pub async fn list_my_orders(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        self.order_repo.list_by_user(user_id).await
    }

    pub async fn get_my_order(&self, user_id: Uuid, order_id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .filter(|o| o.user_id == user_id)
            .ok_or(AppError::OrderNotFound)?;
        self.detail(order).await
    }

    // --- Visão do fornecedor ---

    pub async fn list_store_orders(&self, limit: i64, offset: i64) -> Result<Vec<Order>, AppError> {
        self.order_repo.list_all(limit, offset).await
    }

    pub async fn get_store_order(&self, order_id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;
        self.detail(order).await
    }

    /// Avança o status do pedido — só para estágios estritamente
    /// posteriores. A gravação é compare-and-swap sobre o status lido, de
    /// modo que duas chamadas iguais nunca apliquem duas vezes.
    pub async fn advance(&self, order_id: Uuid, target: OrderStatus) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;

        order.status.ensure_advance_to(target)?;

        let updated = self.order_repo.update_status(order_id, order.status, target).await?;

        tracing::info!("📦 Pedido {} avançou para {:?}", updated.id, updated.status);
        self.events.publish(DomainEvent::Order(OrderEvent::StatusChanged {
            order_id: updated.id,
            user_id: updated.user_id,
            status: updated.status,
        }));
        Ok(updated)
    }

    /// CANCELLED é absorvente e alcançável de qualquer estágio não
    /// terminal — ação exclusiva do lado do fornecedor.
    pub async fn cancel(&self, order_id: Uuid) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;

        if !order.status.can_cancel() {
            return Err(AppError::InvalidTransition {
                from: format!("{:?}", order.status),
                to: format!("{:?}", OrderStatus::Cancelled),
            });
        }

        let updated = self
            .order_repo
            .update_status(order_id, order.status, OrderStatus::Cancelled)
            .await?;

        self.events.publish(DomainEvent::Order(OrderEvent::StatusChanged {
            order_id: updated.id,
            user_id: updated.user_id,
            status: updated.status,
        }));
        Ok(updated)
    }

    async fn detail(&self, order: Order) -> Result<OrderDetail, AppError> {
        let items = self.order_repo.list_items(order.id).await?;
        let timeline = timeline(order.status);
        Ok(OrderDetail { header: order, items, timeline })
    }
}
