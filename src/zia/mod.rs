//! ZIA module providing the API abstraction, the HTTP client, data models,
//! endpoint derivation, and the credential-driven client factory.

pub mod api;
pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod factory;
pub mod models;

pub use api::ZiaApi;
pub use auth::obfuscate_api_key;
pub use client::{ClientOptions, DEFAULT_TIMEOUT_SECS, ZiaClient};
pub use error::{ApiError, FactoryError, response_body};
pub use factory::{create_client, create_client_with};
pub use models::{CategoryScope, CategoryType, NewUrlCategory, Reference, UrlCategory, User};
