// src/services/checkout_service.rs

use std::sync::Arc;

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AddressRepository, CartRepository, OrderRepository, ProductRepository},
    models::address::ShippingDetails,
    models::cart::CartSummary,
    models::events::{CartEvent, DomainEvent, OrderEvent},
    models::order::{timeline, Order, OrderDetail},
    models::auth::User,
    services::event_bus::EventBus,
    services::payment::{PaymentAttempt, PaymentConfirmation, PaymentGateway, PaymentRequest},
};

/// Endereço escolhido no checkout: um salvo (por id) ou um novo vindo
/// inline — o novo é gravado como padrão do usuário, por construção.
#[derive(Debug, Clone)]
pub enum AddressSelection {
    Saved(Uuid),
    New(ShippingDetails),
}

/// Orquestrador do checkout. Máquina de estados por tentativa:
/// CollectingDetails -> AwaitingPayment -> [OrderPersisted] |
/// [PaymentFailed] | [PersistenceFailed].
#[derive(Clone)]
pub struct CheckoutService {
    pool: PgPool,
    cart_repo: CartRepository,
    address_repo: AddressRepository,
    order_repo: OrderRepository,
    product_repo: ProductRepository,
    gateway: Arc<dyn PaymentGateway>,
    events: EventBus,
}

impl CheckoutService {
    pub fn new(
        pool: PgPool,
        cart_repo: CartRepository,
        address_repo: AddressRepository,
        order_repo: OrderRepository,
        product_repo: ProductRepository,
        gateway: Arc<dyn PaymentGateway>,
        events: EventBus,
    ) -> Self {
        Self { pool, cart_repo, address_repo, order_repo, product_repo, gateway, events }
    }

    pub async fn checkout(
        &self,
        user: &User,
        selection: AddressSelection,
        attempt: PaymentAttempt,
    ) -> Result<OrderDetail, AppError> {
        // --- CollectingDetails ---
        // Valida tudo ANTES de tocar no pagamento; nada persistido ainda.
        let lines = self.cart_repo.list_lines(user.id).await?;
        let summary = CartSummary::from_lines(lines);
        if summary.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let (details, save_new_address) = match selection {
            AddressSelection::Saved(id) => {
                let address = self
                    .address_repo
                    .find(user.id, id)
                    .await?
                    .ok_or(AppError::AddressNotFound)?;
                (ShippingDetails::from(address), false)
            }
            AddressSelection::New(details) => (details, true),
        };

        let missing = details.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        // --- AwaitingPayment ---
        // Entrega a requisição opaca ao colaborador e suspende. Falha ou
        // desistência aqui não deixa pedido nenhum para trás.
        let request = PaymentRequest {
            amount: summary.total,
            currency: "BRL".into(),
            customer_name: user.full_name.clone(),
            customer_phone: user.phone.clone().unwrap_or_else(|| details.phone_primary.clone()),
            attempt,
        };
        let confirmation = self.gateway.confirm(request).await?;

        // --- OrderPersisted | PersistenceFailed ---
        // O pagamento JÁ foi capturado: endereço + pedido + itens + limpeza
        // do carrinho numa transação só, com uma nova tentativa automática.
        let mut last_error: Option<AppError> = None;
        for persist_attempt in 1..=2u8 {
            match self
                .persist_order(user, &details, save_new_address, &summary, &confirmation)
                .await
            {
                Ok(order) => {
                    self.events.publish(DomainEvent::Order(OrderEvent::Placed {
                        order_id: order.id,
                        user_id: user.id,
                        total: order.total_amount,
                    }));
                    self.events.publish(DomainEvent::Cart(CartEvent::Changed { user_id: user.id }));

                    let items = self.order_repo.list_items(order.id).await?;
                    let progress = timeline(order.status);
                    return Ok(OrderDetail { header: order, items, timeline: progress });
                }
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Falha ao gravar pedido (tentativa {}) para o usuário {}: {}",
                        persist_attempt,
                        user.id,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        // Esgotadas as tentativas: escala para a fila durável de
        // reconciliação. A confirmação do pagamento NÃO pode se perder.
        let error_text = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "erro desconhecido".into());
        let snapshot = json!({
            "shipping": details,
            "lines": summary.lines,
            "subtotal": summary.subtotal,
            "shippingFee": summary.shipping_fee,
            "total": summary.total,
        });
        if let Err(e) = self
            .order_repo
            .insert_reconciliation(
                user.id,
                summary.total,
                &confirmation.gateway_order_id,
                &confirmation.transaction_id,
                snapshot,
                &error_text,
            )
            .await
        {
            // Pior caso possível: pagamento capturado e nem a fila aceitou.
            // O log é o último rastro para a operação agir.
            tracing::error!(
                "🚨 Pagamento {} capturado SEM pedido e SEM reconciliação: {}",
                confirmation.transaction_id,
                e
            );
        }

        Err(AppError::PersistenceFailed)
    }

    /// Os três "writes" do checkout original (endereço, pedido, carrinho)
    /// viram UMA transação: ou tudo, ou nada.
    async fn persist_order(
        &self,
        user: &User,
        details: &ShippingDetails,
        save_new_address: bool,
        summary: &CartSummary,
        confirmation: &PaymentConfirmation,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        if save_new_address {
            self.address_repo.clear_defaults(&mut *tx, user.id).await?;
            self.address_repo.insert(&mut *tx, user.id, details, true).await?;
        }

        let customer_phone = user.phone.clone().unwrap_or_else(|| details.phone_primary.clone());
        let order = self
            .order_repo
            .insert_order(
                &mut *tx,
                user.id,
                &user.full_name,
                &customer_phone,
                details,
                summary.subtotal,
                summary.shipping_fee,
                summary.total,
                &confirmation.gateway_order_id,
                &confirmation.transaction_id,
                &confirmation.signature,
            )
            .await?;

        for line in &summary.lines {
            self.order_repo
                .insert_item(
                    &mut *tx,
                    order.id,
                    line.product_id,
                    &line.product_name,
                    line.quantity,
                    line.price_at_add,
                    line.line_total(),
                )
                .await?;
            self.product_repo
                .decrement_stock(&mut *tx, line.product_id, line.quantity)
                .await?;
        }

        self.cart_repo.clear_user(&mut *tx, user.id).await?;

        tx.commit().await?;
        Ok(order)
    }
}
