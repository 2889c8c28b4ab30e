pub mod address_repo;
pub use address_repo::AddressRepository;
pub mod cart_repo;
pub use cart_repo::CartRepository;
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod review_repo;
pub use review_repo::ReviewRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
