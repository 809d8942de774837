//! HTTP client for the POS backend REST API

use crate::tables::TableSource;
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{MenuItem, TableStatus, TableStatusUpdate};
use shared::order::{AddItemsPayload, OrderAck, OrderCreate, PaymentAck, PaymentInput};

/// HTTP client for making requests to the POS backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace or clear the authentication token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the bearer token attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::POST, path).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return Err(Self::status_error(status, text));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Map a non-2xx response to a client error, preferring the backend's
    /// own error envelope when the body carries one
    fn status_error(status: StatusCode, body: String) -> ClientError {
        let envelope = serde_json::from_str::<ApiResponse<Value>>(&body)
            .ok()
            .and_then(|resp| resp.into_result().err());

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => {
                ClientError::Forbidden(envelope.map(|e| e.message).unwrap_or(body))
            }
            StatusCode::NOT_FOUND => {
                ClientError::NotFound(envelope.map(|e| e.message).unwrap_or(body))
            }
            _ => ClientError::Api(envelope.unwrap_or_else(|| {
                AppError::with_message(ErrorCode::from_http_status(status), body)
            })),
        }
    }

    /// Unwrap an envelope that must carry data
    fn into_data<T>(response: ApiResponse<T>, what: &str) -> ClientResult<T> {
        response
            .into_result()
            .map_err(ClientError::Api)?
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {what} data")))
    }

    /// Unwrap an envelope whose data is irrelevant
    fn into_unit(response: ApiResponse<Value>) -> ClientResult<()> {
        response.into_result().map_err(ClientError::Api)?;
        Ok(())
    }

    // ========== Auth API ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.post("api/auth/login", &request).await?;
        Self::into_data(response, "login")
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        let response = self.get("api/auth/me").await?;
        Self::into_data(response, "user")
    }

    /// Logout and forget the token
    pub async fn logout(&mut self) -> ClientResult<()> {
        let response = self.post_empty("api/auth/logout").await?;
        Self::into_unit(response)?;
        self.token = None;
        Ok(())
    }

    // ========== Tables & Menu ==========

    /// Raw table listing. The envelope varies; see [`crate::tables::extract_table_rows`].
    pub async fn table_listing(&self) -> ClientResult<Value> {
        let payload: Value = self.get("api/tables").await?;

        // An enveloped error with 200 status still counts as an error
        if let Some(code) = payload.get("code").and_then(Value::as_u64)
            && code != 0
        {
            let response: ApiResponse<Value> = serde_json::from_value(payload)?;
            return Self::into_unit(response).map(|_| Value::Null);
        }
        Ok(payload)
    }

    /// Menu catalog
    pub async fn menu(&self) -> ClientResult<Vec<MenuItem>> {
        let response = self.get("api/menu").await?;
        Self::into_data(response, "menu")
    }

    /// Request a table status change
    pub async fn update_table_status(&self, table_id: &str, status: TableStatus) -> ClientResult<()> {
        let path = format!("api/tables/{}/status", table_id);
        let response = self.put(&path, &TableStatusUpdate { status }).await?;
        Self::into_unit(response)
    }

    // ========== Orders & Payments ==========

    /// Open a new order (first KOT for a table)
    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<OrderAck> {
        let response = self.post("api/orders", order).await?;
        Self::into_data(response, "order")
    }

    /// Append items to a running order
    pub async fn add_items(&self, payload: &AddItemsPayload) -> ClientResult<OrderAck> {
        let path = format!("api/orders/{}/items", payload.order_id);
        let response = self.post(&path, payload).await?;
        Self::into_data(response, "order")
    }

    /// Record a payment
    pub async fn process_payment(&self, payment: &PaymentInput) -> ClientResult<PaymentAck> {
        let response = self.post("api/payments", payment).await?;
        Self::into_data(response, "payment")
    }
}

#[async_trait]
impl TableSource for HttpClient {
    async fn fetch_tables(&self) -> ClientResult<Value> {
        self.table_listing().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> HttpClient {
        HttpClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_url_join() {
        let http = client("http://pos.local:8080/");
        assert_eq!(http.url("/api/tables"), "http://pos.local:8080/api/tables");
        assert_eq!(http.url("api/menu"), "http://pos.local:8080/api/menu");
    }

    #[test]
    fn test_token() {
        let mut http = client("http://pos.local").with_token("abc");
        assert_eq!(http.token(), Some("abc"));
        http.set_token(None);
        assert_eq!(http.token(), None);
    }

    #[test]
    fn test_status_error_uses_envelope() {
        let body = json!({ "code": 7002, "message": "Table 4 is occupied" }).to_string();
        match HttpClient::status_error(StatusCode::CONFLICT, body) {
            ClientError::Api(e) => {
                assert_eq!(e.code, ErrorCode::TableOccupied);
                assert_eq!(e.message, "Table 4 is occupied");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_error_plain_body() {
        match HttpClient::status_error(StatusCode::BAD_GATEWAY, "upstream down".into()) {
            ClientError::Api(e) => {
                assert_eq!(e.code, ErrorCode::NetworkError);
                assert_eq!(e.message, "upstream down");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            HttpClient::status_error(StatusCode::UNAUTHORIZED, String::new()),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            HttpClient::status_error(StatusCode::NOT_FOUND, "no table".into()),
            ClientError::NotFound(m) if m == "no table"
        ));
    }
}
