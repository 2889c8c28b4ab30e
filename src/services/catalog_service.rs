// src/services/catalog_service.rs

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CompanyRepository, ProductRepository, ReviewRepository, UserRepository},
    models::auth::{User, UserRole},
    models::catalog::{Company, Product, ProductDetail, ProductPage},
    services::storage::ObjectStorage,
};

/// Preço não positivo ou desconto negativo nunca entra no catálogo.
fn check_prices(
    original_price: Option<Decimal>,
    discount_price: Option<Decimal>,
) -> Result<(), AppError> {
    if original_price.is_some_and(|p| p <= Decimal::ZERO) {
        return Err(AppError::InvalidPrice);
    }
    if discount_price.is_some_and(|d| d < Decimal::ZERO) {
        return Err(AppError::InvalidPrice);
    }
    Ok(())
}

/// Vitrine pública + painel do fornecedor + fila de moderação.
#[derive(Clone)]
pub struct CatalogService {
    product_repo: ProductRepository,
    company_repo: CompanyRepository,
    user_repo: UserRepository,
    review_repo: ReviewRepository,
    storage: Arc<dyn ObjectStorage>,
}

impl CatalogService {
    pub fn new(
        product_repo: ProductRepository,
        company_repo: CompanyRepository,
        user_repo: UserRepository,
        review_repo: ReviewRepository,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self { product_repo, company_repo, user_repo, review_repo, storage }
    }

    // ---
    // Vitrine pública
    // ---

    pub async fn list_products(
        &self,
        search: Option<&str>,
        tag: Option<&str>,
        page: i64,
        per_page: i64,
    ) -> Result<ProductPage, AppError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, 100);
        let offset = (page - 1) * per_page;

        let data = self.product_repo.list_approved(search, tag, per_page, offset).await?;
        let total = self.product_repo.count_approved(search, tag).await?;

        Ok(ProductPage { data, total, page, per_page })
    }

    /// Detalhe público: só produtos aprovados, com a agregação de notas.
    pub async fn get_product(&self, product_id: Uuid) -> Result<ProductDetail, AppError> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .filter(|p| p.is_approved)
            .ok_or(AppError::ProductNotFound)?;

        let rating = self.review_repo.rating_aggregate(product_id).await?;
        Ok(ProductDetail { product, rating })
    }

    // ---
    // Empresa do fornecedor
    // ---

    /// Cadastro da empresa + promoção do dono a fornecedor, na mesma
    /// transação. Cliente que cadastra empresa vira VENDOR na hora.
    pub async fn register_company<'e, E>(
        &self,
        executor: E,
        user: &User,
        name: &str,
        description: Option<&str>,
        logo_url: Option<&str>,
        certificate_url: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let company = self
            .company_repo
            .create_company(&mut *tx, user.id, name, description, logo_url, certificate_url)
            .await?;

        if user.role == UserRole::Customer {
            self.user_repo.set_role(&mut *tx, user.id, UserRole::Vendor).await?;
        }

        tx.commit().await?;
        tracing::info!("✅ Empresa cadastrada: {} ({})", company.name, company.id);
        Ok(company)
    }

    pub async fn my_company(&self, owner_id: Uuid) -> Result<Company, AppError> {
        self.company_repo
            .find_by_owner(owner_id)
            .await?
            .ok_or(AppError::CompanyNotFound)
    }

    pub async fn update_company(
        &self,
        owner_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        logo_url: Option<&str>,
        certificate_url: Option<&str>,
    ) -> Result<Company, AppError> {
        let before = self.my_company(owner_id).await?;

        let company = self
            .company_repo
            .update_company(owner_id, name, description, logo_url, certificate_url)
            .await?;

        // Mídia substituída não fica órfã no storage.
        if logo_url.is_some() {
            self.discard_replaced(before.logo_url.as_deref(), company.logo_url.as_deref()).await;
        }
        if certificate_url.is_some() {
            self.discard_replaced(
                before.certificate_url.as_deref(),
                company.certificate_url.as_deref(),
            )
            .await;
        }

        Ok(company)
    }

    // ---
    // Produtos do fornecedor
    // ---

    pub async fn list_my_products(&self, owner_id: Uuid) -> Result<Vec<Product>, AppError> {
        let company = self.my_company(owner_id).await?;
        self.product_repo.list_by_company(company.id).await
    }

    /// Produto novo nasce NÃO aprovado: entra na fila do moderador.
    pub async fn create_product(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
        original_price: Decimal,
        discount_price: Option<Decimal>,
        stock_quantity: i32,
        media_urls: &[String],
        video_url: Option<&str>,
        tags: &[String],
        nutrients: serde_json::Value,
    ) -> Result<Product, AppError> {
        check_prices(Some(original_price), discount_price)?;
        let company = self.my_company(owner_id).await?;

        let product = self
            .product_repo
            .create_product(
                self.product_repo.pool(),
                company.id,
                name,
                description,
                original_price,
                discount_price,
                stock_quantity,
                media_urls,
                video_url,
                tags,
                nutrients,
            )
            .await?;

        tracing::info!("📦 Produto {} criado pela empresa {}", product.id, company.id);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        owner_id: Uuid,
        product_id: Uuid,
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
        check_prices(original_price, discount_price)?;
        let company = self.my_company(owner_id).await?;

        let before = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .filter(|p| p.company_id == company.id)
            .ok_or(AppError::ProductNotFound)?;

        let product = self
            .product_repo
            .update_product(
                product_id,
                company.id,
                name,
                description,
                original_price,
                discount_price,
                stock_quantity,
                media_urls,
                video_url,
                tags,
                nutrients,
            )
            .await?;

        // Fotos retiradas do produto são apagadas do storage.
        if let Some(new_urls) = media_urls {
            for old in &before.media_urls {
                if !new_urls.contains(old) {
                    if let Err(e) = self.storage.delete(old).await {
                        tracing::warn!("⚠️ Falha ao apagar mídia {}: {}", old, e);
                    }
                }
            }
        }

        Ok(product)
    }

    // ---
    // Moderação
    // ---

    pub async fn list_pending_products(&self) -> Result<Vec<Product>, AppError> {
        self.product_repo.list_pending().await
    }

    pub async fn set_product_approval(
        &self,
        product_id: Uuid,
        approved: bool,
    ) -> Result<Product, AppError> {
        let product = self.product_repo.set_approval(product_id, approved).await?;
        tracing::info!(
            "🛡️ Produto {} {} pelo moderador",
            product.id,
            if approved { "aprovado" } else { "reprovado" }
        );
        Ok(product)
    }

    // ---

    async fn discard_replaced(&self, old: Option<&str>, new: Option<&str>) {
        if let Some(old_url) = old {
            if Some(old_url) != new {
                if let Err(e) = self.storage.delete(old_url).await {
                    tracing::warn!("⚠️ Falha ao apagar mídia {}: {}", old_url, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preco_positivo_passa() {
        assert!(check_prices(Some(Decimal::new(990, 2)), None).is_ok());
        assert!(check_prices(Some(Decimal::new(990, 2)), Some(Decimal::ZERO)).is_ok());
        assert!(check_prices(None, None).is_ok());
    }

    #[test]
    fn preco_nao_positivo_rejeitado() {
        assert!(matches!(
            check_prices(Some(Decimal::ZERO), None),
            Err(AppError::InvalidPrice)
        ));
        assert!(check_prices(Some(Decimal::new(-100, 2)), None).is_err());
        assert!(check_prices(None, Some(Decimal::new(-1, 2))).is_err());
    }
}
