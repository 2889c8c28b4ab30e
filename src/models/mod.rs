pub mod address;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod events;
pub mod order;
pub mod review;
