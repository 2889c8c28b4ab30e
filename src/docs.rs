// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::update_me,

        // --- Catalog (vitrine pública) ---
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::list_product_reviews,

        // --- Cart ---
        handlers::cart::get_cart,
        handlers::cart::add_item,
        handlers::cart::update_item,
        handlers::cart::remove_item,
        handlers::cart::count_items,

        // --- Addresses ---
        handlers::addresses::list_addresses,
        handlers::addresses::create_address,
        handlers::addresses::update_address,
        handlers::addresses::delete_address,

        // --- Checkout ---
        handlers::checkout::checkout,

        // --- Orders ---
        handlers::orders::list_my_orders,
        handlers::orders::get_my_order,

        // --- Reviews & Favorites ---
        handlers::reviews::create_review,
        handlers::reviews::list_favorites,
        handlers::reviews::add_favorite,
        handlers::reviews::remove_favorite,

        // --- Company (painel da loja) ---
        handlers::company::register_company,
        handlers::company::get_my_company,
        handlers::company::update_company,
        handlers::company::create_product,
        handlers::company::list_my_products,
        handlers::company::update_product,
        handlers::company::list_store_orders,
        handlers::company::get_store_order,
        handlers::company::advance_order,
        handlers::company::cancel_order,

        // --- Moderation ---
        handlers::company::list_pending_products,
        handlers::company::set_product_approval,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Catalog ---
            models::catalog::Company,
            models::catalog::Product,
            models::catalog::ProductPage,
            models::catalog::ProductDetail,

            // --- Cart ---
            models::cart::CartItem,
            models::cart::CartLine,
            models::cart::CartSummary,

            // --- Addresses ---
            models::address::Address,
            models::address::ShippingDetails,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::StageState,
            models::order::StageProgress,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderDetail,

            // --- Reviews ---
            models::review::Review,
            models::review::ProductRating,

            // --- Payment ---
            services::payment::PaymentAttempt,

            // --- Payloads ---
            handlers::auth::UpdateProfilePayload,
            handlers::cart::AddToCartPayload,
            handlers::cart::UpdateQuantityPayload,
            handlers::addresses::AddressPayload,
            handlers::checkout::CheckoutPayload,
            handlers::reviews::CreateReviewPayload,
            handlers::company::RegisterCompanyPayload,
            handlers::company::UpdateCompanyPayload,
            handlers::company::CreateProductPayload,
            handlers::company::UpdateProductPayload,
            handlers::company::AdvanceOrderPayload,
            handlers::company::ApprovalPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Catalog", description = "Vitrine Pública de Produtos"),
        (name = "Cart", description = "Carrinho de Compras"),
        (name = "Addresses", description = "Caderno de Endereços"),
        (name = "Checkout", description = "Fechamento do Pedido e Pagamento"),
        (name = "Orders", description = "Acompanhamento de Pedidos (Cliente)"),
        (name = "Reviews", description = "Avaliações e Favoritos"),
        (name = "Company", description = "Painel da Loja (Fornecedor)"),
        (name = "Moderation", description = "Aprovação de Produtos (Moderador)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
