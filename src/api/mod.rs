//! Backend REST API module
//!
//! The tracker backend is an external collaborator; this module is its
//! typed client plus session-token persistence.

pub mod client;
pub mod token_store;
pub mod types;

pub use client::ApiClient;
pub use token_store::TokenStore;
pub use types::{
    AssetType, AuthResponse, Investment, InvestmentCreate, InvestmentUpdate, LoginRequest,
    PortfolioSummary, RegisterRequest, Transaction, TransactionCreate, TransactionType, User,
};
