// src/services/cart_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CartRepository, ProductRepository},
    models::cart::{CartItem, CartSummary},
    models::events::{CartEvent, DomainEvent},
    services::event_bus::EventBus,
};

#[derive(Clone)]
pub struct CartService {
    cart_repo: CartRepository,
    product_repo: ProductRepository,
    events: EventBus,
}

impl CartService {
    pub fn new(cart_repo: CartRepository, product_repo: ProductRepository, events: EventBus) -> Self {
        Self { cart_repo, product_repo, events }
    }

    pub async fn get_cart(&self, user_id: Uuid) -> Result<CartSummary, AppError> {
        let lines = self.cart_repo.list_lines(user_id).await?;
        Ok(CartSummary::from_lines(lines))
    }

    /// Adiciona uma linha nova. Produto já no carrinho é REJEITADO (a
    /// quantidade se ajusta por incremento explícito, nunca por soma
    /// silenciosa no add). O preço efetivo é congelado aqui.
    pub async fn add_item<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if quantity < 1 {
            return Err(AppError::InvalidQuantity(quantity));
        }

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .filter(|p| p.is_approved)
            .ok_or(AppError::ProductNotFound)?;

        // Preço malformado nunca vira "zero": erro de integridade.
        product.check_price_integrity()?;

        if product.stock_quantity < quantity {
            return Err(AppError::OutOfStock);
        }

        let item = self
            .cart_repo
            .insert_item(executor, user_id, product_id, quantity, product.effective_unit_price())
            .await?;

        self.events.publish(DomainEvent::Cart(CartEvent::Changed { user_id }));
        Ok(item)
    }

    /// Troca a quantidade de uma linha; o preço congelado fica intocado.
    pub async fn set_quantity(
        &self,
        user_id: Uuid,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        if quantity < 1 {
            return Err(AppError::InvalidQuantity(quantity));
        }
        let item = self.cart_repo.update_quantity(user_id, line_id, quantity).await?;
        self.events.publish(DomainEvent::Cart(CartEvent::Changed { user_id }));
        Ok(item)
    }

    pub async fn remove_item(&self, user_id: Uuid, line_id: Uuid) -> Result<(), AppError> {
        self.cart_repo.remove_item(user_id, line_id).await?;
        self.events.publish(DomainEvent::Cart(CartEvent::Changed { user_id }));
        Ok(())
    }

    pub async fn count_items(&self, user_id: Uuid) -> Result<i64, AppError> {
        self.cart_repo.count_items(user_id).await
    }
}
