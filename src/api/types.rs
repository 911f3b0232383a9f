//! Backend REST API types
//!
//! Mirrors the tracker backend's schemas: users and auth tokens,
//! investments, buy/sell transactions, and the computed portfolio
//! summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Stock,
    Bond,
    MutualFund,
    Etf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub name: String,
    pub asset_type: AssetType,
    pub quantity: f64,
    pub average_purchase_price: f64,
    pub current_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub current_value: Option<f64>,
    pub total_gain_loss: Option<f64>,
    pub gain_loss_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentCreate {
    pub symbol: String,
    pub name: String,
    pub asset_type: AssetType,
    pub quantity: f64,
    pub purchase_price: f64,
}

/// Partial update; `None` fields are omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvestmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub investment_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total_amount: f64,
    pub transaction_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub investment_symbol: Option<String>,
    pub investment_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionCreate {
    pub investment_id: i64,
    pub transaction_type: TransactionType,
    pub quantity: f64,
    pub price_per_unit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_invested: f64,
    pub total_gain_loss: f64,
    pub gain_loss_percentage: f64,
    pub investments_count: i64,
    pub transactions_count: i64,
}
