#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod card_storage;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod signature;
pub mod types;

pub use client::Client;
pub use config::{Config, ConfigOption};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
