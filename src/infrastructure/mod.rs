pub mod database;
pub mod placeholder;
pub mod repositories;
pub mod telegram;
