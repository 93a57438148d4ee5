use thiserror::Error;

const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("could not build request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text shown in the error toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) => "Network error".to_string(),
            ApiError::Decode(_) | ApiError::Encode(_) => FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(err) => ApiError::Decode(err.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    #[error("could not start download: {0}")]
    Download(String),
}

/// Turns an error response body into a short, user-facing message.
///
/// Handles JSON bodies carrying `message` or `error`, and the HTML page an
/// Express backend renders for unhandled errors (`<pre>Error: ...<br> at ...`).
pub fn parse_error_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = json.get(key).and_then(|v| v.as_str()) {
                if !message.trim().is_empty() {
                    return message.trim().to_string();
                }
            }
        }
        return FALLBACK_MESSAGE.to_string();
    }

    if let Some(start) = body.find("<pre>") {
        let rest = &body[start + "<pre>".len()..];
        let end = ["<br", "</pre>"]
            .iter()
            .filter_map(|tag| rest.find(tag))
            .min()
            .unwrap_or(rest.len());
        let message = rest[..end].trim();
        let message = message.strip_prefix("Error:").unwrap_or(message).trim();
        if !message.is_empty() {
            return message.to_string();
        }
        return FALLBACK_MESSAGE.to_string();
    }

    if body.starts_with('<') {
        return FALLBACK_MESSAGE.to_string();
    }

    body.to_string()
}
