pub mod chat;
pub mod export;
