pub mod auth;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod screenshot;
pub mod supabase;

pub use db::create_pool;
