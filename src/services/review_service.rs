// src/services/review_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductRepository, ReviewRepository},
    models::catalog::Product,
    models::events::{CartEvent, DomainEvent},
    models::review::Review,
    services::event_bus::EventBus,
};

/// Avaliações e favoritos — sempre sobre produtos aprovados.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    product_repo: ProductRepository,
    events: EventBus,
}

impl ReviewService {
    pub fn new(
        review_repo: ReviewRepository,
        product_repo: ProductRepository,
        events: EventBus,
    ) -> Self {
        Self { review_repo, product_repo, events }
    }

    // --- Avaliações ---

    /// Uma avaliação por (usuário, produto); duplicata é rejeitada pelo
    /// unique do banco, não por leitura prévia.
    pub async fn create_review(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> Result<Review, AppError> {
        self.ensure_visible_product(product_id).await?;
        self.review_repo.insert_review(user_id, product_id, rating, comment).await
    }

    pub async fn list_for_product(&self, product_id: Uuid) -> Result<Vec<Review>, AppError> {
        self.ensure_visible_product(product_id).await?;
        self.review_repo.list_by_product(product_id).await
    }

    // --- Favoritos ---

    pub async fn add_favorite(&self, user_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        self.ensure_visible_product(product_id).await?;
        self.review_repo.insert_favorite(user_id, product_id).await?;
        self.events
            .publish(DomainEvent::Cart(CartEvent::FavoritesChanged { user_id }));
        Ok(())
    }

    pub async fn remove_favorite(&self, user_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        self.review_repo.remove_favorite(user_id, product_id).await?;
        self.events
            .publish(DomainEvent::Cart(CartEvent::FavoritesChanged { user_id }));
        Ok(())
    }

    pub async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.review_repo.list_favorite_products(user_id).await
    }

    // ---

    async fn ensure_visible_product(&self, product_id: Uuid) -> Result<(), AppError> {
        self.product_repo
            .find_by_id(product_id)
            .await?
            .filter(|p| p.is_approved)
            .ok_or(AppError::ProductNotFound)?;
        Ok(())
    }
}
