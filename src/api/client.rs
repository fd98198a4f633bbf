//! API client for communicating with the Calorie AI REST service.
//!
//! This module provides the `ApiClient` struct for account calls
//! (login, signup, profile) and analysis calls (analyze an image,
//! list/fetch/delete stored analyses).

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{AnalysisDetail, AnalysisResult, AnalysisSummary, UserProfile};

use super::ApiError;

/// HTTP request timeout in seconds.
/// Image analysis is the slowest call the server exposes. The same bound
/// caps the startup profile validation so the loading gate cannot hang
/// indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Login request body. The server accepts either an email or a username
/// alongside the password; exactly one of the two is sent.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    Email { email: String, password: String },
    Username { username: String, password: String },
}

impl LoginRequest {
    /// Classify a free-form identifier: anything containing `@` is
    /// treated as an email, everything else as a username.
    pub fn from_identifier(identifier: &str, password: &str) -> Self {
        if identifier.contains('@') {
            LoginRequest::Email {
                email: identifier.to_string(),
                password: password.to_string(),
            }
        } else {
            LoginRequest::Username {
                username: identifier.to_string(),
                password: password.to_string(),
            }
        }
    }
}

/// Signup request body for `POST /user/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    response: LoginTokens,
}

#[derive(Debug, Deserialize)]
struct LoginTokens {
    #[serde(rename = "accessToken")]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    result: AnalysisResult,
}

/// API client for the Calorie AI service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given server base URL
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token (after sign-out)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning a typed error with the
    /// body if not. Every failure is terminal; there is no retry path.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Account calls =====

    /// Log in and return the access token
    pub async fn login(&self, request: &LoginRequest) -> Result<String> {
        let response: LoginResponse = self.post("/user/login", request).await?;
        debug!("Login accepted");
        Ok(response.response.access_token)
    }

    /// Create an account. The response body is an account object the
    /// client has no further use for; only success matters here.
    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let url = format!("{}/user/signup", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .context("Failed to send signup request")?;

        Self::check_response(response).await?;
        debug!("Signup accepted");
        Ok(())
    }

    /// Fetch the profile of the account owning the current bearer token
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        self.get("/user/profile").await
    }

    // ===== Analysis calls =====

    /// Submit a base64-encoded food image for analysis
    pub async fn analyze(&self, image_base64: &str) -> Result<AnalysisResult> {
        debug!(image_len = image_base64.len(), "Sending analyze request");
        let body = serde_json::json!({ "image": image_base64 });
        let response: AnalyzeResponse = self.post("/openai/analyze", &body).await?;
        Ok(response.result)
    }

    /// Fetch the analysis history for the current account
    pub async fn list_analyses(&self) -> Result<Vec<AnalysisSummary>> {
        self.get("/openai/analyses").await
    }

    /// Fetch one stored analysis with its full result
    pub async fn fetch_analysis(&self, id: &str) -> Result<AnalysisDetail> {
        self.get(&format!("/openai/analyses/{}", id)).await
    }

    /// Delete a stored analysis
    pub async fn delete_analysis(&self, id: &str) -> Result<()> {
        let url = format!("{}/openai/analyses/{}", self.base_url, id);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(ApiError::NetworkError)
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_classification() {
        let email = LoginRequest::from_identifier("a@b.com", "x");
        assert!(matches!(email, LoginRequest::Email { .. }));

        let username = LoginRequest::from_identifier("jdoe", "x");
        assert!(matches!(username, LoginRequest::Username { .. }));
    }

    #[test]
    fn test_login_request_wire_format() {
        let email = LoginRequest::from_identifier("a@b.com", "x");
        let json = serde_json::to_value(&email).expect("serialize email login");
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("username").is_none());

        let username = LoginRequest::from_identifier("jdoe", "x");
        let json = serde_json::to_value(&username).expect("serialize username login");
        assert_eq!(json["username"], "jdoe");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"response":{"accessToken":"tok1"}}"#;
        let parsed: LoginResponse = serde_json::from_str(json).expect("Failed to parse login response");
        assert_eq!(parsed.response.access_token, "tok1");
    }

    #[test]
    fn test_parse_analyze_response() {
        let json = r#"{
            "result": {
                "title": "Pasta bowl",
                "items": [{"name": "Pasta", "weight": "180g", "calories": "280 kcal"}],
                "totalCalories": "280 kcal"
            }
        }"#;
        let parsed: AnalyzeResponse = serde_json::from_str(json).expect("Failed to parse analyze response");
        assert_eq!(parsed.result.title, "Pasta bowl");
        assert_eq!(parsed.result.items.len(), 1);
    }

    #[test]
    fn test_signup_request_omits_absent_names() {
        let request = SignupRequest {
            email: "a@b.com".to_string(),
            username: "ab".to_string(),
            password: "x".to_string(),
            first_name: None,
            last_name: Some("Doe".to_string()),
        };
        let json = serde_json::to_value(&request).expect("serialize signup");
        assert!(json.get("firstName").is_none());
        assert_eq!(json["lastName"], "Doe");
    }
}
