//! Thin wrappers over the backend's JSON endpoints. Every request carries the
//! session cookie; every non-2xx response is reduced to the server's `error`
//! message so callers can show it verbatim.

use chrono::NaiveDate;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::models::{
    BudgetSummary, Category, DashboardData, Frequency, Priority, RecurringTransaction,
    SavingsGoal, Transaction, TransactionFilter, TransactionType, User,
};

/// Empty for same-origin deployment behind the backend; point this at the API
/// server (e.g. "http://localhost:5000") when serving the frontend separately.
pub const API_BASE_URL: &str = "";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an `{"error": ...}` payload.
    #[error("{0}")]
    Server(String),
    /// Non-2xx response without a decodable error body.
    #[error("request failed with status {0}")]
    Status(u16),
    /// The request never completed or a success body could not be decoded.
    #[error("network error: {0}")]
    Network(#[from] gloo_net::Error),
}

impl ApiError {
    /// The server's own message when there is one, otherwise the given
    /// context fallback. Toasts are built from this.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Server(message) => message.clone(),
            Self::Status(_) | Self::Network(_) => fallback.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
pub struct AuthCheck {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Deserialize)]
struct SessionBody {
    user: User,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
pub struct TransactionPayload {
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category_id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
}

#[derive(Serialize)]
pub struct BudgetPayload {
    pub category_id: i64,
    pub amount: f64,
    pub budget_month_str: String,
    pub period: String,
}

#[derive(Serialize)]
pub struct RecurringPayload {
    pub description: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category_id: Option<i64>,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date_str: String,
    pub end_date_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Serialize)]
pub struct SavingsGoalPayload {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    pub description: String,
    pub priority: Priority,
}

#[derive(Serialize)]
struct ContributionBody {
    amount: f64,
}

fn url(path: &str) -> String {
    format!("{API_BASE_URL}{path}")
}

async fn reject_errors(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(body) => Err(ApiError::Server(body.error)),
        Err(_) => Err(ApiError::Status(status)),
    }
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let resp = Request::get(&url(path))
        .credentials(RequestCredentials::Include)
        .send()
        .await?;
    Ok(reject_errors(resp).await?.json::<T>().await?)
}

async fn get_json_with_query<T: DeserializeOwned>(
    path: &str,
    pairs: &[(&str, String)],
) -> Result<T, ApiError> {
    let resp = Request::get(&url(path))
        .credentials(RequestCredentials::Include)
        .query(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .send()
        .await?;
    Ok(reject_errors(resp).await?.json::<T>().await?)
}

async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<Response, ApiError> {
    let resp = Request::post(&url(path))
        .credentials(RequestCredentials::Include)
        .json(body)?
        .send()
        .await?;
    reject_errors(resp).await
}

async fn put_json<B: Serialize>(path: &str, body: &B) -> Result<Response, ApiError> {
    let resp = Request::put(&url(path))
        .credentials(RequestCredentials::Include)
        .json(body)?
        .send()
        .await?;
    reject_errors(resp).await
}

async fn delete(path: &str) -> Result<(), ApiError> {
    let resp = Request::delete(&url(path))
        .credentials(RequestCredentials::Include)
        .send()
        .await?;
    reject_errors(resp).await?;
    Ok(())
}

pub async fn check_auth() -> Result<AuthCheck, ApiError> {
    get_json("/api/auth/check").await
}

pub async fn login(username: &str, password: &str) -> Result<User, ApiError> {
    let resp = post_json("/api/auth/login", &Credentials { username, password }).await?;
    Ok(resp.json::<SessionBody>().await?.user)
}

pub async fn signup(username: &str, email: &str, password: &str) -> Result<User, ApiError> {
    let body = SignupBody {
        username,
        email,
        password,
    };
    let resp = post_json("/api/auth/signup", &body).await?;
    Ok(resp.json::<SessionBody>().await?.user)
}

pub async fn logout() -> Result<(), ApiError> {
    let resp = Request::post(&url("/api/auth/logout"))
        .credentials(RequestCredentials::Include)
        .send()
        .await?;
    reject_errors(resp).await?;
    Ok(())
}

pub async fn fetch_categories() -> Result<Vec<Category>, ApiError> {
    get_json("/api/categories").await
}

pub async fn fetch_dashboard() -> Result<DashboardData, ApiError> {
    get_json("/api/dashboard").await
}

pub async fn fetch_transactions(filter: &TransactionFilter) -> Result<Vec<Transaction>, ApiError> {
    let pairs = filter.query_pairs();
    if pairs.is_empty() {
        get_json("/api/transactions").await
    } else {
        get_json_with_query("/api/transactions", &pairs).await
    }
}

pub async fn fetch_transaction(id: i64) -> Result<Transaction, ApiError> {
    get_json(&format!("/api/transactions/{id}")).await
}

pub async fn create_transaction(payload: &TransactionPayload) -> Result<(), ApiError> {
    post_json("/api/transactions", payload).await?;
    Ok(())
}

pub async fn update_transaction(id: i64, payload: &TransactionPayload) -> Result<(), ApiError> {
    put_json(&format!("/api/transactions/{id}"), payload).await?;
    Ok(())
}

pub async fn delete_transaction(id: i64) -> Result<(), ApiError> {
    delete(&format!("/api/transactions/{id}")).await
}

pub async fn fetch_budget_summary(
    month_year: Option<&str>,
) -> Result<Vec<BudgetSummary>, ApiError> {
    match month_year {
        Some(month_year) => {
            let pairs = [("month_year", month_year.to_string())];
            get_json_with_query("/api/budgets/summary", &pairs).await
        }
        None => get_json("/api/budgets/summary").await,
    }
}

pub async fn create_budget(payload: &BudgetPayload) -> Result<(), ApiError> {
    post_json("/api/budgets", payload).await?;
    Ok(())
}

pub async fn update_budget(id: i64, payload: &BudgetPayload) -> Result<(), ApiError> {
    put_json(&format!("/api/budgets/{id}"), payload).await?;
    Ok(())
}

pub async fn delete_budget(id: i64) -> Result<(), ApiError> {
    delete(&format!("/api/budgets/{id}")).await
}

pub async fn fetch_recurring(active_only: bool) -> Result<Vec<RecurringTransaction>, ApiError> {
    let pairs = [(
        "active_only",
        if active_only { "true" } else { "false" }.to_string(),
    )];
    get_json_with_query("/api/recurring-transactions", &pairs).await
}

pub async fn create_recurring(payload: &RecurringPayload) -> Result<(), ApiError> {
    post_json("/api/recurring-transactions", payload).await?;
    Ok(())
}

pub async fn update_recurring(id: i64, payload: &RecurringPayload) -> Result<(), ApiError> {
    put_json(&format!("/api/recurring-transactions/{id}"), payload).await?;
    Ok(())
}

/// The backend deactivates rather than deletes; the row stays visible under
/// "show inactive".
pub async fn deactivate_recurring(id: i64) -> Result<(), ApiError> {
    delete(&format!("/api/recurring-transactions/{id}")).await
}

pub async fn fetch_savings_goals() -> Result<Vec<SavingsGoal>, ApiError> {
    get_json("/api/savings-goals").await
}

pub async fn create_savings_goal(payload: &SavingsGoalPayload) -> Result<(), ApiError> {
    post_json("/api/savings-goals", payload).await?;
    Ok(())
}

pub async fn update_savings_goal(id: i64, payload: &SavingsGoalPayload) -> Result<(), ApiError> {
    put_json(&format!("/api/savings-goals/{id}"), payload).await?;
    Ok(())
}

pub async fn delete_savings_goal(id: i64) -> Result<(), ApiError> {
    delete(&format!("/api/savings-goals/{id}")).await
}

pub async fn contribute_to_goal(id: i64, amount: f64) -> Result<(), ApiError> {
    post_json(
        &format!("/api/savings-goals/{id}/contribute"),
        &ContributionBody { amount },
    )
    .await?;
    Ok(())
}
