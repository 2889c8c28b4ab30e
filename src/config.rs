// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AddressRepository, CartRepository, CompanyRepository, OrderRepository,
        ProductRepository, ReviewRepository, UserRepository,
    },
    services::{
        AddressService, AuthService, CartService, CatalogService, CheckoutService, EventBus,
        HostedCheckoutGateway, LocalDiskStorage, OrderService, ReviewService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_repo: UserRepository,
    pub auth_service: AuthService,
    pub cart_service: CartService,
    pub address_service: AddressService,
    pub checkout_service: CheckoutService,
    pub order_service: OrderService,
    pub catalog_service: CatalogService,
    pub review_service: ReviewService,
    pub events: EventBus,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let payment_key_secret =
            env::var("PAYMENT_KEY_SECRET").expect("PAYMENT_KEY_SECRET deve ser definido");
        let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "uploads".into());
        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(pool.clone());
        let company_repo = CompanyRepository::new(pool.clone());
        let product_repo = ProductRepository::new(pool.clone());
        let cart_repo = CartRepository::new(pool.clone());
        let address_repo = AddressRepository::new(pool.clone());
        let order_repo = OrderRepository::new(pool.clone());
        let review_repo = ReviewRepository::new(pool.clone());

        let events = EventBus::default();
        let gateway = Arc::new(HostedCheckoutGateway::new(payment_key_secret));
        let storage = Arc::new(LocalDiskStorage::new(storage_dir, public_base_url));

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let cart_service =
            CartService::new(cart_repo.clone(), product_repo.clone(), events.clone());
        let address_service = AddressService::new(address_repo.clone());
        let checkout_service = CheckoutService::new(
            pool.clone(),
            cart_repo,
            address_repo,
            order_repo.clone(),
            product_repo.clone(),
            gateway,
            events.clone(),
        );
        let order_service = OrderService::new(order_repo, events.clone());
        let catalog_service = CatalogService::new(
            product_repo.clone(),
            company_repo,
            user_repo.clone(),
            review_repo.clone(),
            storage,
        );
        let review_service = ReviewService::new(review_repo, product_repo, events.clone());

        Ok(Self {
            pool,
            user_repo,
            auth_service,
            cart_service,
            address_service,
            checkout_service,
            order_service,
            catalog_service,
            review_service,
            events,
        })
    }
}
