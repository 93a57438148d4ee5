use crate::api::IncomeApi;
use crate::models::{Category, IncomeRecord};

// Load failures are only logged; the page keeps whatever it showed before.

pub async fn load_categories<A: IncomeApi + ?Sized>(api: &A) -> Option<Vec<Category>> {
    match api.list_categories().await {
        Ok(categories) => {
            tracing::debug!(count = categories.len(), "loaded income categories");
            Some(categories)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load income categories");
            None
        }
    }
}

pub async fn load_incomes<A: IncomeApi + ?Sized>(api: &A) -> Option<Vec<IncomeRecord>> {
    match api.list_incomes().await {
        Ok(incomes) => {
            tracing::debug!(count = incomes.len(), "loaded incomes");
            Some(incomes)
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load incomes");
            None
        }
    }
}
