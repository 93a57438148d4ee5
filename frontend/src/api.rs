use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use web_sys::RequestCredentials;

use crate::config::ApiConfig;
use crate::error::{parse_error_message, ApiError};
use crate::models::{decode_incomes, Category, IncomeForm, IncomeRecord};

pub const INCOME_CATEGORIES_PATH: &str = "/api/v1/categories/get-categories/income";
pub const INCOMES_PATH: &str = "/api/v1/incomes/get-incomes";
pub const ADD_INCOME_PATH: &str = "/api/v1/incomes/add-income";

pub fn update_income_path(id: &str) -> String {
    format!("/api/v1/incomes/update-income/{}", id)
}

pub fn delete_income_path(id: &str) -> String {
    format!("/api/v1/incomes/delete-income/{}", id)
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// The backend operations the incomes page depends on.
#[async_trait(?Send)]
pub trait IncomeApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
    async fn list_incomes(&self) -> Result<Vec<IncomeRecord>, ApiError>;
    async fn add_income(&self, form: &IncomeForm) -> Result<(), ApiError>;
    async fn update_income(&self, id: &str, form: &IncomeForm) -> Result<(), ApiError>;
    async fn delete_income(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpIncomeApi {
    config: ApiConfig,
}

impl HttpIncomeApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.url(path);
        let resp = Request::get(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        let resp = ensure_ok(resp).await?;
        let envelope = resp.json::<Envelope<T>>().await?;
        Ok(envelope.data)
    }

    async fn send_form(&self, builder: RequestBuilder, form: &IncomeForm) -> Result<(), ApiError> {
        let request = builder
            .credentials(RequestCredentials::Include)
            .json(form)
            .map_err(|err| ApiError::Encode(err.to_string()))?;
        ensure_ok(request.send().await?).await?;
        Ok(())
    }
}

async fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status,
        message: parse_error_message(&body),
    })
}

#[async_trait(?Send)]
impl IncomeApi for HttpIncomeApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.fetch_list(INCOME_CATEGORIES_PATH).await
    }

    async fn list_incomes(&self) -> Result<Vec<IncomeRecord>, ApiError> {
        let values: Vec<Value> = self.fetch_list(INCOMES_PATH).await?;
        Ok(decode_incomes(values))
    }

    async fn add_income(&self, form: &IncomeForm) -> Result<(), ApiError> {
        let url = self.config.url(ADD_INCOME_PATH);
        self.send_form(Request::post(&url), form).await
    }

    async fn update_income(&self, id: &str, form: &IncomeForm) -> Result<(), ApiError> {
        let url = self.config.url(&update_income_path(id));
        self.send_form(Request::patch(&url), form).await
    }

    async fn delete_income(&self, id: &str) -> Result<(), ApiError> {
        let url = self.config.url(&delete_income_path(id));
        let resp = Request::delete(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        ensure_ok(resp).await?;
        Ok(())
    }
}
