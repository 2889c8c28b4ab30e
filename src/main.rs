//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Vitrine pública (sem autenticação)
    let catalog_routes = Router::new()
        .route("/", get(handlers::catalog::list_products))
        .route("/{id}", get(handlers::catalog::get_product))
        .route("/{id}/reviews", get(handlers::catalog::list_product_reviews));

    // Rotas do usuário logado
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me).patch(handlers::auth::update_me));

    let cart_routes = Router::new()
        .route("/", get(handlers::cart::get_cart))
        .route("/count", get(handlers::cart::count_items))
        .route("/items", post(handlers::cart::add_item))
        .route(
            "/items/{id}",
            axum::routing::patch(handlers::cart::update_item).delete(handlers::cart::remove_item),
        );

    let address_routes = Router::new()
        .route(
            "/",
            get(handlers::addresses::list_addresses).post(handlers::addresses::create_address),
        )
        .route(
            "/{id}",
            put(handlers::addresses::update_address).delete(handlers::addresses::delete_address),
        );

    let order_routes = Router::new()
        .route("/", get(handlers::orders::list_my_orders))
        .route("/{id}", get(handlers::orders::get_my_order));

    let favorite_routes = Router::new()
        .route("/", get(handlers::reviews::list_favorites))
        .route(
            "/{product_id}",
            post(handlers::reviews::add_favorite).delete(handlers::reviews::remove_favorite),
        );

    // Painel da loja (os extratores VendorUser/ModeratorUser checam o papel)
    let company_routes = Router::new()
        .route(
            "/",
            post(handlers::company::register_company)
                .get(handlers::company::get_my_company)
                .patch(handlers::company::update_company),
        )
        .route(
            "/products",
            post(handlers::company::create_product).get(handlers::company::list_my_products),
        )
        .route(
            "/products/{id}",
            axum::routing::patch(handlers::company::update_product),
        )
        .route("/orders", get(handlers::company::list_store_orders))
        .route("/orders/{id}", get(handlers::company::get_store_order))
        .route("/orders/{id}/advance", post(handlers::company::advance_order))
        .route("/orders/{id}/cancel", post(handlers::company::cancel_order));

    let moderation_routes = Router::new()
        .route("/products", get(handlers::company::list_pending_products))
        .route(
            "/products/{id}/approval",
            post(handlers::company::set_product_approval),
        );

    // Tudo que exige login passa pelo mesmo middleware de autenticação.
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/cart", cart_routes)
        .nest("/addresses", address_routes)
        .route("/checkout", post(handlers::checkout::checkout))
        .nest("/orders", order_routes)
        .nest("/favorites", favorite_routes)
        .nest("/company", company_routes)
        .nest("/moderation", moderation_routes)
        .route(
            // O GET público fica na vitrine; o POST exige login.
            "/products/{id}/reviews",
            post(handlers::reviews::create_review),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/products", catalog_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
