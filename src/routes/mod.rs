pub mod cache;
pub mod health;
pub mod monitor;
pub mod portfolio;
pub mod projects;
