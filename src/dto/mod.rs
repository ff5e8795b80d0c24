pub mod admin;
pub mod auth;
pub mod cart;
pub mod delivery;
pub mod design;
pub mod finance;
pub mod inventory;
pub mod orders;
