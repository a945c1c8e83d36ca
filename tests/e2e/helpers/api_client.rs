use anyhow::Result;
use axum::http::{request::Builder, HeaderMap, Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Thin HTTP/1 client bound to one test server
#[derive(Clone)]
pub struct TestClient {
    base_url: String,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl TestClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(self.request(Method::GET, path), Bytes::new()).await
    }

    pub async fn get_with_header(
        &self,
        path: &str,
        name: &str,
        value: &str,
    ) -> Result<ApiResponse> {
        let builder = self.request(Method::GET, path).header(name, value);
        self.send(builder, Bytes::new()).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        let bytes = Bytes::from(serde_json::to_vec(body)?);
        self.send(self.json_request(path), bytes).await
    }

    /// POST a body verbatim, e.g. malformed JSON
    pub async fn post_raw(&self, path: &str, body: &str) -> Result<ApiResponse> {
        self.send(self.json_request(path), Bytes::copy_from_slice(body.as_bytes()))
            .await
    }

    fn request(&self, method: Method, path: &str) -> Builder {
        Request::builder()
            .method(method)
            .uri(format!("{}{}", self.base_url, path))
    }

    fn json_request(&self, path: &str) -> Builder {
        self.request(Method::POST, path)
            .header("Content-Type", "application/json")
    }

    async fn send(
        &self,
        builder: Builder,
        body: Bytes,
    ) -> Result<ApiResponse> {
        let response = self.client.request(builder.body(Full::new(body))?).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let raw = response.into_body().collect().await?.to_bytes();
        let body = serde_json::from_slice(&raw).ok();

        Ok(ApiResponse {
            status,
            headers,
            raw,
            body,
        })
    }
}

pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw: Bytes,
    /// Parsed body, when it is JSON
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "unexpected status, body: {}",
            self.text()
        );
        self
    }

    /// Assert the `error` field of an error envelope contains `expected`
    pub fn assert_error_message(&self, expected: &str) -> &Self {
        let message = self.body()["error"]
            .as_str()
            .unwrap_or_else(|| panic!("no error message in {}", self.text()));
        assert!(
            message.contains(expected),
            "error '{}' does not contain '{}'",
            message,
            expected
        );
        self
    }

    pub fn assert_header_exists(&self, name: &str) -> &Self {
        assert!(self.headers.contains_key(name), "missing header '{}'", name);
        self
    }

    pub fn body(&self) -> &Value {
        self.body
            .as_ref()
            .unwrap_or_else(|| panic!("expected a JSON body, got: {}", self.text()))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.raw)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
