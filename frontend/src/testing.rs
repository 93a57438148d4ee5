//! Recording stand-in for the backend used by the loader and mutation tests.

use std::cell::RefCell;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Map;

use crate::api::IncomeApi;
use crate::error::ApiError;
use crate::models::{Category, IncomeForm, IncomeRecord};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ListCategories,
    ListIncomes,
    Add(IncomeForm),
    Update(String, IncomeForm),
    Delete(String),
}

/// In-memory backend. Added incomes are persisted so a following
/// `list_incomes` reflects them.
#[derive(Default)]
pub struct MockApi {
    pub categories: Vec<Category>,
    pub incomes: RefCell<Vec<IncomeRecord>>,
    pub calls: RefCell<Vec<Call>>,
    pub fail_with: Option<(u16, String)>,
}

impl MockApi {
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            fail_with: Some((status, message.to_string())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match &self.fail_with {
            Some((status, message)) => Err(ApiError::Server {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl IncomeApi for MockApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record(Call::ListCategories)?;
        Ok(self.categories.clone())
    }

    async fn list_incomes(&self) -> Result<Vec<IncomeRecord>, ApiError> {
        self.record(Call::ListIncomes)?;
        Ok(self.incomes.borrow().clone())
    }

    async fn add_income(&self, form: &IncomeForm) -> Result<(), ApiError> {
        self.record(Call::Add(form.clone()))?;
        let mut incomes = self.incomes.borrow_mut();
        let id = format!("i{}", incomes.len() + 1);
        incomes.push(income(&id, &form.title, "c1"));
        Ok(())
    }

    async fn update_income(&self, id: &str, form: &IncomeForm) -> Result<(), ApiError> {
        self.record(Call::Update(id.to_string(), form.clone()))
    }

    async fn delete_income(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()))?;
        self.incomes.borrow_mut().retain(|income| income.id != id);
        Ok(())
    }
}

pub fn income(id: &str, title: &str, category: &str) -> IncomeRecord {
    IncomeRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        amount: 100.0,
        date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        category_id: category.to_string(),
        created_at: None,
        updated_at: None,
        raw: Map::new(),
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
    }
}
