// src/db/review_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::Product,
    models::review::{ProductRating, Review},
};

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Avaliações ---

    pub async fn insert_review(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> Result<Review, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, product_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::ReviewAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn list_by_product(&self, product_id: Uuid) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    /// Média aritmética (não arredondada) + contagem, direto do banco.
    pub async fn rating_aggregate(&self, product_id: Uuid) -> Result<ProductRating, AppError> {
        let (average, count): (Option<Decimal>, i64) =
            sqlx::query_as("SELECT AVG(rating), COUNT(*) FROM reviews WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(ProductRating::new(average, count))
    }

    // --- Favoritos ---

    /// `ON CONFLICT DO NOTHING`: a relação (usuário, produto) é de
    /// pertencimento — inserir de novo é duplicidade, não acumulação.
    pub async fn insert_favorite(&self, user_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::AlreadyFavorited);
        }
        Ok(())
    }

    /// Remoção idempotente.
    pub async fn remove_favorite(&self, user_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_favorite_products(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.* FROM products p
            JOIN favorites f ON f.product_id = p.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}
