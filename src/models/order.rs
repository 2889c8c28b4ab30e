// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// --- Status do pedido ---
// Cinco estágios estritamente ordenados + CANCELLED fora de banda
// (absorvente, alcançável de qualquer estágio não terminal, só pelo
// fornecedor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Confirmed,
    PaymentAccepted,
    Preparing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Estágios da progressão feliz, na ordem exibida ao cliente.
pub const ORDERED_STAGES: [OrderStatus; 5] = [
    OrderStatus::Confirmed,
    OrderStatus::PaymentAccepted,
    OrderStatus::Preparing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// Posição na progressão linear; CANCELLED fica fora da régua.
    pub fn stage_index(&self) -> Option<usize> {
        ORDERED_STAGES.iter().position(|s| s == self)
    }

    /// Regra única de avanço: só para estágios estritamente POSTERIORES
    /// ao atual. Sem voltar, sem re-confirmar, sem sair de CANCELLED.
    /// Chamada repetida com o mesmo alvo é rejeitada (idempotência segura:
    /// o estado nunca é aplicado duas vezes).
    pub fn can_advance_to(&self, target: OrderStatus) -> bool {
        match (self.stage_index(), target.stage_index()) {
            (Some(current), Some(target)) => target > current,
            _ => false,
        }
    }

    pub fn can_cancel(&self) -> bool {
        !matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn ensure_advance_to(&self, target: OrderStatus) -> Result<(), AppError> {
        if self.can_advance_to(target) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition {
                from: format!("{:?}", self),
                to: format!("{:?}", target),
            })
        }
    }
}

// --- Linha do tempo (visão do cliente, somente leitura) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageState {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageProgress {
    pub stage: OrderStatus,
    pub state: StageState,
}

/// Régua de progresso: estágios antes do atual = concluídos, o atual =
/// ativo, depois = pendentes. Para pedido cancelado a régua congela
/// (nenhum estágio ativo).
pub fn timeline(current: OrderStatus) -> Vec<StageProgress> {
    let current_index = current.stage_index();
    ORDERED_STAGES
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let state = match current_index {
                Some(c) if i < c => StageState::Completed,
                Some(c) if i == c => StageState::Active,
                _ => StageState::Pending,
            };
            StageProgress { stage: *stage, state }
        })
        .collect()
}

// --- Pedido ---
// Snapshot denormalizado: nome/telefone do cliente e endereço COPIADOS
// (não referenciados), para que edições futuras do caderno de endereços
// não alterem pedidos históricos. Imutável após a criação, exceto `status`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub customer_name: String,
    pub customer_phone: String,
    pub recipient_name: String,
    pub house_unit: String,
    pub street: String,
    pub locality: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[schema(example = "200.00")]
    pub subtotal: Decimal,
    #[schema(example = "99.00")]
    pub shipping_fee: Decimal,
    #[schema(example = "299.00")]
    pub total_amount: Decimal,
    pub payment_order_id: String,
    pub payment_transaction_id: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub payment_signature: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item do pedido: snapshot congelado no momento da compra
/// (nome e preço copiados do catálogo, imunes a mudanças posteriores).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    #[schema(example = "Tomate orgânico (kg)")]
    pub product_name: String,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = "9.90")]
    pub unit_price: Decimal,
    #[schema(example = "19.80")]
    pub line_total: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub header: Order,
    pub items: Vec<OrderItem>,
    pub timeline: Vec<StageProgress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avanco_so_para_frente() {
        use OrderStatus::*;
        assert!(Confirmed.can_advance_to(PaymentAccepted));
        assert!(Confirmed.can_advance_to(Delivered)); // pular para frente é permitido
        assert!(Shipped.can_advance_to(Delivered));
        assert!(!Shipped.can_advance_to(Preparing)); // voltar, nunca
        assert!(!Shipped.can_advance_to(Shipped)); // re-aplicar, nunca
        assert!(!Delivered.can_advance_to(Delivered));
    }

    #[test]
    fn segundo_avanco_identico_e_rejeitado() {
        use OrderStatus::*;
        // Primeira chamada muda o estado; a segunda (mesmo alvo) falha.
        let mut status = Shipped;
        status.ensure_advance_to(Delivered).unwrap();
        status = Delivered;
        assert!(matches!(
            status.ensure_advance_to(Delivered),
            Err(AppError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn cancelado_e_absorvente() {
        use OrderStatus::*;
        assert!(Confirmed.can_cancel());
        assert!(Shipped.can_cancel());
        assert!(!Delivered.can_cancel());
        assert!(!Cancelled.can_cancel());
        // De CANCELLED não se avança para lugar nenhum.
        for target in ORDERED_STAGES {
            assert!(!Cancelled.can_advance_to(target));
        }
        // E CANCELLED nunca é alvo de `advance` (fora da régua).
        assert!(!Confirmed.can_advance_to(Cancelled));
    }

    #[test]
    fn regua_de_progresso_do_cliente() {
        let t = timeline(OrderStatus::Preparing);
        assert_eq!(t.len(), 5);
        assert_eq!(t[0].state, StageState::Completed); // CONFIRMED
        assert_eq!(t[1].state, StageState::Completed); // PAYMENT_ACCEPTED
        assert_eq!(t[2].state, StageState::Active); // PREPARING
        assert_eq!(t[3].state, StageState::Pending); // SHIPPED
        assert_eq!(t[4].state, StageState::Pending); // DELIVERED
    }

    #[test]
    fn regua_congela_em_pedido_cancelado() {
        let t = timeline(OrderStatus::Cancelled);
        assert!(t.iter().all(|p| p.state == StageState::Pending));
    }
}
