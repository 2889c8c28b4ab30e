// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::address::ShippingDetails,
    models::order::{Order, OrderItem, OrderStatus},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// Lista do painel do fornecedor (toda a loja).
    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn list_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY created_at ASC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    // ---
    // Escrita (transacional, dentro do checkout)
    // ---

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        customer_name: &str,
        customer_phone: &str,
        shipping: &ShippingDetails,
        subtotal: Decimal,
        shipping_fee: Decimal,
        total_amount: Decimal,
        payment_order_id: &str,
        payment_transaction_id: &str,
        payment_signature: &str,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (user_id, customer_name, customer_phone, recipient_name, house_unit,
                 street, locality, city, state, postal_code, country,
                 subtotal, shipping_fee, total_amount,
                 payment_order_id, payment_transaction_id, payment_signature, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, 'CONFIRMED')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(customer_name)
        .bind(customer_phone)
        .bind(&shipping.recipient_name)
        .bind(&shipping.house_unit)
        .bind(&shipping.street)
        .bind(&shipping.locality)
        .bind(&shipping.city)
        .bind(&shipping.state)
        .bind(&shipping.postal_code)
        .bind(&shipping.country)
        .bind(subtotal)
        .bind(shipping_fee)
        .bind(total_amount)
        .bind(payment_order_id)
        .bind(payment_transaction_id)
        .bind(payment_signature)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        product_name: &str,
        quantity: i32,
        unit_price: Decimal,
        line_total: Decimal,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items
                (order_id, product_id, product_name, quantity, unit_price, line_total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(product_name)
        .bind(quantity)
        .bind(unit_price)
        .bind(line_total)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    /// Troca de status com compare-and-swap: só aplica se o status atual
    /// ainda for o esperado. Uma segunda chamada idêntica não encontra a
    /// linha e vira `InvalidTransition` — nunca aplica duas vezes.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Order, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(expected)
        .bind(target)
        .fetch_optional(&self.pool)
        .await?;

        order.ok_or(AppError::InvalidTransition {
            from: format!("{:?}", expected),
            to: format!("{:?}", target),
        })
    }

    /// Fila durável de intervenção manual: pagamento capturado cujo pedido
    /// não pôde ser gravado. Nunca perder a confirmação do pagamento.
    pub async fn insert_reconciliation(
        &self,
        user_id: Uuid,
        amount: Decimal,
        payment_order_id: &str,
        payment_transaction_id: &str,
        order_snapshot: serde_json::Value,
        error: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO payment_reconciliations
                (user_id, amount, payment_order_id, payment_transaction_id, order_snapshot, error)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .bind(payment_order_id)
        .bind(payment_transaction_id)
        .bind(order_snapshot)
        .bind(error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
