use serde::{Deserialize, Serialize};

/// Where the incomes backend lives. Empty means same origin.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("INCOMES_API_BASE_URL").unwrap_or(""))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

pub fn load_settings() -> AppSettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item("settings") {
                return parse_settings(&raw);
            }
        }
    }
    AppSettings::default()
}

fn parse_settings(raw: &str) -> AppSettings {
    match serde_json::from_str::<AppSettings>(raw) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed stored settings");
            AppSettings::default()
        }
    }
}
