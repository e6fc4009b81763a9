pub mod config;
pub mod direction;
pub mod error;
pub mod notification;
pub mod request;
