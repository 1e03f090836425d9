use crate::taxonomy::Locale;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http { status: u16 },
    Parse,
    /// Well-formed response whose `error` field reports a logical failure.
    Application,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub(crate) fn http(status: u16, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http { status },
            message: format!("{ctx} ({status}): {body}"),
        }
    }

    pub(crate) fn application(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Application,
            message: message.into(),
        }
    }

    /// Text shown next to the topic whose fetch failed.
    pub fn user_message(&self) -> String {
        match &self.kind {
            ApiErrorKind::Network => {
                "Couldn't reach the server. Check your connection.".to_string()
            }
            ApiErrorKind::Http { status } => {
                format!("The server couldn't load subtopics ({status}).")
            }
            ApiErrorKind::Parse => "The server sent an unexpected response.".to_string(),
            ApiErrorKind::Application => format!("Couldn't load subtopics: {}", self.message),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub locale: Option<String>,
}

fn read_env_string(env: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        js_sys::Reflect::get(env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:8787".to_string();

        let Some(window) = web_sys::window() else {
            return Self {
                api_url: default_api_url,
                locale: None,
            };
        };

        // `window.ENV.API_URL` is documented; `api_url` is accepted for older deploys.
        let env = window
            .get("ENV")
            .filter(|env| !env.is_undefined() && env.is_object());

        let api_url = env
            .as_ref()
            .and_then(|env| read_env_string(env, &["API_URL", "api_url"]))
            .unwrap_or(default_api_url);

        let locale = env
            .as_ref()
            .and_then(|env| read_env_string(env, &["LOCALE", "locale"]))
            .or_else(|| window.navigator().language());

        Self { api_url, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::parse)
            .unwrap_or_default()
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env(env: &EnvConfig) -> Self {
        Self::new(env.api_url.trim_end_matches('/').to_string())
    }

    pub(crate) fn subtopics_url(&self, path: &str) -> String {
        format!(
            "{}/subtopics?path={}",
            self.base_url,
            urlencoding::encode(path)
        )
    }

    async fn get_json(&self, url: String, ctx: &str) -> ApiResult<serde_json::Value> {
        let client = reqwest::Client::new();
        let res = client.get(url).send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    /// Ask the suggestion service for the children of `path`.
    pub async fn fetch_subtopics(&self, path: &str) -> ApiResult<Vec<String>> {
        let data = self
            .get_json(self.subtopics_url(path), "Subtopic request failed")
            .await?;
        Self::parse_subtopics_response(data)
    }

    /// Accepts `{"subtopics": [..]}` or `{"error": ".."}`.
    pub(crate) fn parse_subtopics_response(data: serde_json::Value) -> ApiResult<Vec<String>> {
        if let Some(err) = data.get("error").filter(|v| !v.is_null()) {
            let message = err
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| err.to_string());
            return Err(ApiError::application(message));
        }

        let list = data
            .get("subtopics")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ApiError::parse(format!("missing `subtopics` in {data}")))?;

        list.iter()
            .map(|v| {
                v.as_str()
                    .map(|s| s.to_string())
                    .ok_or_else(|| ApiError::parse(format!("subtopic is not a string: {v}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8787".to_string())
    }

    #[test]
    fn test_subtopics_url_percent_encodes_path() {
        let url = client().subtopics_url("Sports > Football & Co");
        assert_eq!(
            url,
            "http://localhost:8787/subtopics?path=Sports%20%3E%20Football%20%26%20Co"
        );
    }

    #[test]
    fn test_parse_subtopics_preserves_order() {
        let data = serde_json::json!({ "subtopics": ["Zoology", "Astronomy", "Physics"] });
        let list = ApiClient::parse_subtopics_response(data).expect("should parse");
        assert_eq!(list, vec!["Zoology", "Astronomy", "Physics"]);
    }

    #[test]
    fn test_parse_subtopics_empty_list_is_ok() {
        let data = serde_json::json!({ "subtopics": [] });
        let list = ApiClient::parse_subtopics_response(data).expect("should parse");
        assert!(list.is_empty());
    }

    #[test]
    fn test_parse_subtopics_error_field_is_application_error() {
        let data = serde_json::json!({ "error": "rate limited" });
        let err = ApiClient::parse_subtopics_response(data).expect_err("should fail");
        assert_eq!(err.kind, ApiErrorKind::Application);
        assert!(err.user_message().contains("rate limited"));
    }

    #[test]
    fn test_parse_subtopics_wrong_shape_is_parse_error() {
        let err = ApiClient::parse_subtopics_response(serde_json::json!({ "topics": [] }))
            .expect_err("should fail");
        assert_eq!(err.kind, ApiErrorKind::Parse);

        let err = ApiClient::parse_subtopics_response(serde_json::json!({ "subtopics": [1, 2] }))
            .expect_err("should fail");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn test_http_error_message_includes_status_and_body() {
        let err = ApiError::http(503, "unavailable".to_string(), "Subtopic request failed");
        assert_eq!(err.kind, ApiErrorKind::Http { status: 503 });
        assert_eq!(err.to_string(), "Subtopic request failed (503): unavailable");
        assert!(err.user_message().contains("503"));
    }

    #[test]
    fn test_from_env_trims_trailing_slash() {
        let env = EnvConfig {
            api_url: "https://api.example.com/".to_string(),
            locale: Some("en-US".to_string()),
        };
        assert_eq!(ApiClient::from_env(&env).base_url, "https://api.example.com");
        assert_eq!(env.locale(), Locale::Us);
    }
}
