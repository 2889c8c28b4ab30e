// src/services/mod.rs

pub mod address_service;
pub mod auth;
pub mod cart_service;
pub mod catalog_service;
pub mod checkout_service;
pub mod event_bus;
pub mod order_service;
pub mod payment;
pub mod review_service;
pub mod storage;

pub use address_service::AddressService;
pub use auth::AuthService;
pub use cart_service::CartService;
pub use catalog_service::CatalogService;
pub use checkout_service::{AddressSelection, CheckoutService};
pub use event_bus::EventBus;
pub use order_service::OrderService;
pub use payment::{HostedCheckoutGateway, PaymentGateway};
pub use review_service::ReviewService;
pub use storage::{LocalDiskStorage, ObjectStorage};
