// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ---
    // Leitura (vitrine pública: só produtos aprovados)
    // ---

    pub async fn list_approved(
        &self,
        search: Option<&str>,
        tag: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE is_approved = TRUE
              AND ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR $2 = ANY(tags))
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(tag)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn count_approved(
        &self,
        search: Option<&str>,
        tag: Option<&str>,
    ) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM products
            WHERE is_approved = TRUE
              AND ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::TEXT IS NULL OR $2 = ANY(tags))
            "#,
        )
        .bind(search)
        .bind(tag)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    pub async fn list_by_company(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Fila de moderação: produtos ainda não aprovados, mais antigos primeiro.
    pub async fn list_pending(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE is_approved = FALSE ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // ---
    // Escrita (fornecedor dono / moderador)
    // ---

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        name: &str,
        description: Option<&str>,
        original_price: Decimal,
        discount_price: Option<Decimal>,
        stock_quantity: i32,
        media_urls: &[String],
        video_url: Option<&str>,
        tags: &[String],
        nutrients: serde_json::Value,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (company_id, name, description, original_price, discount_price,
                 stock_quantity, media_urls, video_url, tags, nutrients)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(description)
        .bind(original_price)
        .bind(discount_price)
        .bind(stock_quantity)
        .bind(media_urls)
        .bind(video_url)
        .bind(tags)
        .bind(nutrients)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    /// Atualização parcial pelo fornecedor (preço/estoque/mídia).
    /// A flag de aprovação NÃO passa por aqui.
    pub async fn update_product(
        &self,
        product_id: Uuid,
        company_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        original_price: Option<Decimal>,
        discount_price: Option<Decimal>,
        stock_quantity: Option<i32>,
        media_urls: Option<&[String]>,
        video_url: Option<&str>,
        tags: Option<&[String]>,
        nutrients: Option<serde_json::Value>,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                original_price = COALESCE($5, original_price),
                discount_price = COALESCE($6, discount_price),
                stock_quantity = COALESCE($7, stock_quantity),
                media_urls = COALESCE($8, media_urls),
                video_url = COALESCE($9, video_url),
                tags = COALESCE($10, tags),
                nutrients = COALESCE($11, nutrients),
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(company_id)
        .bind(name)
        .bind(description)
        .bind(original_price)
        .bind(discount_price)
        .bind(stock_quantity)
        .bind(media_urls)
        .bind(video_url)
        .bind(tags)
        .bind(nutrients)
        .fetch_optional(&self.pool)
        .await?;
        product.ok_or(AppError::ProductNotFound)
    }

    /// Só o moderador mexe na flag de aprovação.
    pub async fn set_approval(&self, product_id: Uuid, approved: bool) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET is_approved = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(product_id)
        .bind(approved)
        .fetch_optional(&self.pool)
        .await?;
        product.ok_or(AppError::ProductNotFound)
    }

    /// Baixa de estoque atômica: só desconta se houver saldo suficiente.
    pub async fn decrement_stock<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $2, updated_at = NOW()
            WHERE id = $1 AND stock_quantity >= $2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::OutOfStock);
        }
        Ok(())
    }
}
