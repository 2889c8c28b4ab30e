// src/db/address_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::address::{Address, ShippingDetails},
};

#[derive(Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Address>, AppError> {
        let addresses = sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(addresses)
    }

    pub async fn find(&self, user_id: Uuid, address_id: Uuid) -> Result<Option<Address>, AppError> {
        let address =
            sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $2 AND user_id = $1")
                .bind(user_id)
                .bind(address_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(address)
    }

    /// Limpa a flag de padrão de TODOS os endereços do usuário.
    /// Sempre chamada na mesma transação que define o novo padrão
    /// (o índice parcial do banco rejeitaria dois padrões simultâneos).
    pub async fn clear_defaults<'e, E>(&self, executor: E, user_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE addresses SET is_default = FALSE, updated_at = NOW() WHERE user_id = $1")
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        details: &ShippingDetails,
        is_default: bool,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let address = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses
                (user_id, recipient_name, house_unit, street, locality, city, state,
                 postal_code, country, phone_primary, phone_secondary, is_default,
                 latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&details.recipient_name)
        .bind(&details.house_unit)
        .bind(&details.street)
        .bind(&details.locality)
        .bind(&details.city)
        .bind(&details.state)
        .bind(&details.postal_code)
        .bind(&details.country)
        .bind(&details.phone_primary)
        .bind(&details.phone_secondary)
        .bind(is_default)
        .bind(details.latitude)
        .bind(details.longitude)
        .fetch_one(executor)
        .await?;
        Ok(address)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        address_id: Uuid,
        details: &ShippingDetails,
        is_default: bool,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let address = sqlx::query_as::<_, Address>(
            r#"
            UPDATE addresses
            SET recipient_name = $3, house_unit = $4, street = $5, locality = $6,
                city = $7, state = $8, postal_code = $9, country = $10,
                phone_primary = $11, phone_secondary = $12, is_default = $13,
                latitude = $14, longitude = $15, updated_at = NOW()
            WHERE id = $2 AND user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(address_id)
        .bind(&details.recipient_name)
        .bind(&details.house_unit)
        .bind(&details.street)
        .bind(&details.locality)
        .bind(&details.city)
        .bind(&details.state)
        .bind(&details.postal_code)
        .bind(&details.country)
        .bind(&details.phone_primary)
        .bind(&details.phone_secondary)
        .bind(is_default)
        .bind(details.latitude)
        .bind(details.longitude)
        .fetch_optional(executor)
        .await?;
        address.ok_or(AppError::AddressNotFound)
    }

    /// Remoção incondicional. Se o removido era o padrão, NENHUM outro é
    /// promovido — a lista pode ficar sem padrão (comportamento observado
    /// do sistema original, mantido de propósito).
    pub async fn delete(&self, user_id: Uuid, address_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $2 AND user_id = $1")
            .bind(user_id)
            .bind(address_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::AddressNotFound);
        }
        Ok(())
    }
}
