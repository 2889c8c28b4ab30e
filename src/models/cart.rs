// src/models/cart.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Frete fixo aplicado apenas quando 0 < subtotal < 1000.
// Acima do teto o frete é grátis; carrinho vazio não paga frete.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::ONE_THOUSAND;

pub fn flat_shipping_fee() -> Decimal {
    Decimal::new(99, 0)
}

/// Linha do carrinho como está no banco: o `price_at_add` é congelado
/// na inserção e NÃO é rederivado do preço atual do catálogo
/// (proteção de preço entre o "adicionar" e o checkout).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(example = "9.90")]
    pub price_at_add: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Linha do carrinho enriquecida para exibição (JOIN com o produto).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: Uuid,
    pub product_id: Uuid,
    #[schema(example = "Tomate orgânico (kg)")]
    pub product_name: String,
    pub product_media_url: Option<String>,
    pub quantity: i32,
    pub price_at_add: Decimal,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price_at_add * Decimal::from(self.quantity)
    }
}

pub fn shipping_fee(subtotal: Decimal) -> Decimal {
    if subtotal > Decimal::ZERO && subtotal < FREE_SHIPPING_THRESHOLD {
        flat_shipping_fee()
    } else {
        Decimal::ZERO
    }
}

/// Agregado do carrinho: subtotal, frete e total calculados das linhas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    #[schema(example = "200.00")]
    pub subtotal: Decimal,
    #[schema(example = "99.00")]
    pub shipping_fee: Decimal,
    #[schema(example = "299.00")]
    pub total: Decimal,
}

impl CartSummary {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
        let shipping_fee = shipping_fee(subtotal);
        Self {
            lines,
            subtotal,
            shipping_fee,
            total: subtotal + shipping_fee,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: Decimal, quantity: i32) -> CartLine {
        CartLine {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_name: "Cenoura orgânica".into(),
            product_media_url: None,
            quantity,
            price_at_add: unit_price,
        }
    }

    #[test]
    fn subtotal_1000_tem_frete_gratis() {
        // 1 linha: preço unitário 500, qtd 2 -> subtotal 1000, frete 0, total 1000
        let summary = CartSummary::from_lines(vec![line(Decimal::new(500, 0), 2)]);
        assert_eq!(summary.subtotal, Decimal::new(1000, 0));
        assert_eq!(summary.shipping_fee, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::new(1000, 0));
    }

    #[test]
    fn subtotal_abaixo_do_teto_paga_frete_fixo() {
        // 1 linha: preço unitário 200, qtd 1 -> subtotal 200, frete 99, total 299
        let summary = CartSummary::from_lines(vec![line(Decimal::new(200, 0), 1)]);
        assert_eq!(summary.subtotal, Decimal::new(200, 0));
        assert_eq!(summary.shipping_fee, Decimal::new(99, 0));
        assert_eq!(summary.total, Decimal::new(299, 0));
    }

    #[test]
    fn carrinho_vazio_nao_paga_frete() {
        let summary = CartSummary::from_lines(vec![]);
        assert!(summary.is_empty());
        assert_eq!(summary.subtotal, Decimal::ZERO);
        assert_eq!(summary.shipping_fee, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn total_sempre_igual_a_subtotal_mais_frete() {
        for (price, qty) in [(1i64, 1), (99, 3), (450, 2), (1200, 1), (999, 1)] {
            let summary = CartSummary::from_lines(vec![line(Decimal::new(price, 0), qty)]);
            assert_eq!(summary.total, summary.subtotal + summary.shipping_fee);
        }
    }

    #[test]
    fn soma_dos_itens_fecha_com_o_total_menos_frete() {
        // As linhas viram itens do pedido no checkout: a soma dos totais de
        // linha tem que bater com o total cobrado menos o frete.
        let summary = CartSummary::from_lines(vec![
            line(Decimal::new(990, 2), 3),  // 29.70
            line(Decimal::new(4550, 2), 2), // 91.00
        ]);
        let items_sum: Decimal = summary.lines.iter().map(CartLine::line_total).sum();
        assert_eq!(items_sum, Decimal::new(12070, 2));
        assert_eq!(items_sum, summary.subtotal);
        assert_eq!(items_sum, summary.total - summary.shipping_fee);
    }

    #[test]
    fn preco_congelado_nao_depende_do_catalogo() {
        // A linha carrega o preço capturado na inserção; o total usa esse
        // valor, não o preço corrente do produto.
        let l = line(Decimal::new(990, 2), 3);
        assert_eq!(l.line_total(), Decimal::new(2970, 2));
    }
}
