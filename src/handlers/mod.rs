// src/handlers/mod.rs

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod company;
pub mod orders;
pub mod reviews;
