// src/db/company_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::Company};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria a empresa do fornecedor. Uma por usuário (unique em owner_id).
    pub async fn create_company<'e, E>(
        &self,
        executor: E,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
        logo_url: Option<&str>,
        certificate_url: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (owner_id, name, description, logo_url, certificate_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(logo_url)
        .bind(certificate_url)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::CompanyAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn update_company(
        &self,
        owner_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        logo_url: Option<&str>,
        certificate_url: Option<&str>,
    ) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                logo_url = COALESCE($4, logo_url),
                certificate_url = COALESCE($5, certificate_url),
                updated_at = NOW()
            WHERE owner_id = $1
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(logo_url)
        .bind(certificate_url)
        .fetch_optional(&self.pool)
        .await?;
        company.ok_or(AppError::CompanyNotFound)
    }
}
