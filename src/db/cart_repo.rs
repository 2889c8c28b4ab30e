// src/db/cart_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cart::{CartItem, CartLine},
};

#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Linhas do carrinho com nome/mídia do produto para exibição.
    /// O preço vem SEMPRE de `price_at_add`, nunca do catálogo atual.
    pub async fn list_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, AppError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT ci.id, ci.product_id, p.name AS product_name,
                   p.media_urls[1] AS product_media_url,
                   ci.quantity, ci.price_at_add
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    /// Insere a linha congelando o preço. `ON CONFLICT DO NOTHING`:
    /// se já existe linha para o par (usuário, produto), nada é inserido
    /// e o chamador recebe `AlreadyInCart` — a quantidade existente fica
    /// intocada (o ajuste é via incremento explícito, não via novo add).
    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        price_at_add: Decimal,
    ) -> Result<CartItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity, price_at_add)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, product_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price_at_add)
        .fetch_optional(executor)
        .await?;

        item.ok_or(AppError::AlreadyInCart)
    }

    /// Troca a quantidade; `price_at_add` fica intocado.
    pub async fn update_quantity(
        &self,
        user_id: Uuid,
        line_id: Uuid,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items SET quantity = $3
            WHERE id = $2 AND user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(line_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;
        item.ok_or(AppError::CartItemNotFound)
    }

    /// Remoção incondicional e idempotente: linha ausente não é erro.
    pub async fn remove_item(&self, user_id: Uuid, line_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cart_items WHERE id = $2 AND user_id = $1")
            .bind(user_id)
            .bind(line_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Limpeza total — só acontece dentro da transação do checkout.
    pub async fn clear_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn count_items(&self, user_id: Uuid) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// Testes que batem no Postgres de verdade (o unique de (usuário, produto)
// mora no schema). Rodam com `cargo test -- --ignored` e DATABASE_URL.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CompanyRepository, ProductRepository, UserRepository};
    use crate::models::auth::UserRole;

    async fn pool_de_teste() -> PgPool {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL para testes de banco");
        let pool = PgPool::connect(&url).await.expect("conexão com o Postgres de teste");
        sqlx::migrate!().run(&pool).await.expect("migrações");
        pool
    }

    async fn usuario_e_produto(pool: &PgPool) -> (Uuid, Uuid) {
        let users = UserRepository::new(pool.clone());
        let email = format!("{}@teste.local", Uuid::new_v4());
        let user = users
            .create_user(pool, &email, "hash", "Fornecedor Teste", None, UserRole::Vendor)
            .await
            .unwrap();

        let companies = CompanyRepository::new(pool.clone());
        let company = companies
            .create_company(pool, user.id, "Quitanda Teste", None, None, None)
            .await
            .unwrap();

        let products = ProductRepository::new(pool.clone());
        let product = products
            .create_product(
                pool,
                company.id,
                "Tomate orgânico (kg)",
                None,
                Decimal::new(990, 2),
                None,
                10,
                &[],
                None,
                &[],
                serde_json::json!({}),
            )
            .await
            .unwrap();
        products.set_approval(product.id, true).await.unwrap();

        (user.id, product.id)
    }

    #[tokio::test]
    #[ignore = "requer Postgres via DATABASE_URL"]
    async fn add_duplicado_rejeita_e_preserva_a_quantidade() {
        let pool = pool_de_teste().await;
        let (user_id, product_id) = usuario_e_produto(&pool).await;
        let repo = CartRepository::new(pool.clone());

        let original = repo
            .insert_item(&pool, user_id, product_id, 2, Decimal::new(990, 2))
            .await
            .unwrap();

        // Segundo add do mesmo produto: rejeitado, sem tocar na linha.
        let err = repo
            .insert_item(&pool, user_id, product_id, 5, Decimal::new(990, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyInCart));

        let lines = repo.list_lines(user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, original.id);
        assert_eq!(lines[0].quantity, 2);
    }

    #[tokio::test]
    #[ignore = "requer Postgres via DATABASE_URL"]
    async fn linha_inexistente_da_item_nao_encontrado() {
        let pool = pool_de_teste().await;
        let (user_id, _) = usuario_e_produto(&pool).await;
        let repo = CartRepository::new(pool.clone());

        let err = repo.update_quantity(user_id, Uuid::new_v4(), 3).await.unwrap_err();
        assert!(matches!(err, AppError::CartItemNotFound));
    }
}
