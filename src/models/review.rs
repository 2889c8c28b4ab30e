// src/models/review.rs

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Avaliação: no máximo uma por par (usuário, produto) — unique no banco.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    #[schema(example = 4)]
    pub rating: i32,
    #[schema(example = "Muito fresco, chegou rápido.")]
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Agregado de avaliações de um produto. A média numérica é exposta SEM
/// arredondar; o arredondamento para estrelas é só para exibição.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRating {
    #[schema(example = "4.33")]
    pub average: Option<Decimal>,
    #[schema(example = 3)]
    pub count: i64,
    #[schema(example = 4)]
    pub stars: Option<i32>,
}

impl ProductRating {
    pub fn new(average: Option<Decimal>, count: i64) -> Self {
        let stars = average.map(star_display);
        Self { average, count, stars }
    }
}

/// Arredonda a média para o inteiro mais próximo, apenas para as estrelas.
/// Meio ponto sobe (`round()` sozinho arredondaria 4.5 para 4, par mais próximo).
pub fn star_display(average: Decimal) -> i32 {
    average
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i32()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_nao_arredondada_estrelas_sim() {
        // ratings 4, 5, 4 -> média 4.33..., 4 estrelas
        let average = Decimal::new(13, 0) / Decimal::new(3, 0);
        let rating = ProductRating::new(Some(average), 3);
        assert_eq!(rating.stars, Some(4));
        // a média exposta continua sendo a não arredondada
        assert_eq!(rating.average, Some(average));
    }

    #[test]
    fn meio_ponto_arredonda_para_cima() {
        assert_eq!(star_display(Decimal::new(45, 1)), 5); // 4.5 -> 5
        assert_eq!(star_display(Decimal::new(35, 1)), 4); // 3.5 -> 4
        assert_eq!(star_display(Decimal::new(44, 1)), 4); // 4.4 -> 4
    }

    #[test]
    fn produto_sem_avaliacoes() {
        let rating = ProductRating::new(None, 0);
        assert_eq!(rating.average, None);
        assert_eq!(rating.stars, None);
        assert_eq!(rating.count, 0);
    }
}
