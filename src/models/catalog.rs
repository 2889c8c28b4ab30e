// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// --- Empresa (fornecedor) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Sítio Boa Terra")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "https://cdn.quitanda.com/logos/boa-terra.png")]
    pub logo_url: Option<String>,
    pub certificate_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Produto ---
// Criado pelo fornecedor; preço/estoque/mídia mutáveis pelo fornecedor,
// flag de aprovação mutável apenas pelo moderador. Nunca é deletado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub company_id: Uuid,
    #[schema(example = "Tomate orgânico (kg)")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "12.50")]
    pub original_price: Decimal,
    #[schema(example = "9.90")]
    pub discount_price: Option<Decimal>,
    #[schema(example = 40)]
    pub stock_quantity: i32,
    pub media_urls: Vec<String>,
    pub video_url: Option<String>,
    #[schema(example = json!(["legumes", "sem agrotóxico"]))]
    pub tags: Vec<String>,
    // Pares chave/valor de informação nutricional, ex: {"fibra": "1.2g"}
    #[schema(value_type = Object)]
    pub nutrients: serde_json::Value,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Resolvedor de preço: usa o preço promocional apenas se existir
    /// E for menor que o original. Função pura, sem efeitos.
    pub fn effective_unit_price(&self) -> Decimal {
        match self.discount_price {
            Some(discount) if discount < self.original_price => discount,
            _ => self.original_price,
        }
    }

    /// Preço malformado é erro de integridade de dados, nunca "zero por
    /// padrão". O chamador decide como apresentar.
    pub fn check_price_integrity(&self) -> Result<(), AppError> {
        if self.original_price <= Decimal::ZERO {
            return Err(AppError::PriceIntegrity(self.id));
        }
        if let Some(discount) = self.discount_price {
            if discount < Decimal::ZERO {
                return Err(AppError::PriceIntegrity(self.id));
            }
        }
        Ok(())
    }
}

// --- Respostas compostas da vitrine ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub data: Vec<Product>,
    #[schema(example = 128)]
    pub total: i64,
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 20)]
    pub per_page: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub rating: crate::models::review::ProductRating,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(original: Decimal, discount: Option<Decimal>) -> Product {
        Product {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            name: "Tomate orgânico".into(),
            description: None,
            original_price: original,
            discount_price: discount,
            stock_quantity: 10,
            media_urls: vec![],
            video_url: None,
            tags: vec![],
            nutrients: serde_json::json!({}),
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn usa_preco_promocional_quando_menor() {
        let p = product(Decimal::new(1250, 2), Some(Decimal::new(990, 2)));
        assert_eq!(p.effective_unit_price(), Decimal::new(990, 2));
    }

    #[test]
    fn ignora_promocao_maior_ou_igual_ao_original() {
        let p = product(Decimal::new(1000, 2), Some(Decimal::new(1500, 2)));
        assert_eq!(p.effective_unit_price(), Decimal::new(1000, 2));

        let p = product(Decimal::new(1000, 2), Some(Decimal::new(1000, 2)));
        assert_eq!(p.effective_unit_price(), Decimal::new(1000, 2));
    }

    #[test]
    fn sem_promocao_usa_original() {
        let p = product(Decimal::new(700, 2), None);
        assert_eq!(p.effective_unit_price(), Decimal::new(700, 2));
    }

    #[test]
    fn preco_malformado_e_erro_de_integridade() {
        let p = product(Decimal::ZERO, None);
        assert!(matches!(p.check_price_integrity(), Err(AppError::PriceIntegrity(_))));

        let p = product(Decimal::new(-500, 2), None);
        assert!(p.check_price_integrity().is_err());

        let p = product(Decimal::new(500, 2), Some(Decimal::new(-100, 2)));
        assert!(p.check_price_integrity().is_err());

        let p = product(Decimal::new(500, 2), Some(Decimal::new(100, 2)));
        assert!(p.check_price_integrity().is_ok());
    }
}
