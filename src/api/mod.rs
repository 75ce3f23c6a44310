pub(crate) mod auth;
pub(crate) mod matches;
pub(crate) mod players;
pub(crate) mod scorers;
pub(crate) mod teams;
pub(crate) mod tournaments;
pub(crate) mod zones;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TorneoError};

/// HTTP plumbing shared by every endpoint: base URL, bearer token, and
/// response envelope handling.
#[derive(Debug, Clone)]
pub(crate) struct Api {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl Api {
    pub(crate) fn new(http: reqwest::Client, base_url: &str, token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    pub(crate) fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let body = self.execute(&url, self.request(Method::GET, &url)).await?;
        unwrap_envelope(&url, body)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.request(Method::POST, &url).json(payload);
        let body = self.execute(&url, request).await?;
        unwrap_envelope(&url, body)
    }

    /// POST and hand back the raw body, for responses whose envelope carries
    /// more than `data`.
    pub(crate) async fn post_raw<B>(&self, path: &str, payload: &B) -> Result<(String, Value)>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.request(Method::POST, &url).json(payload);
        let body = self.execute(&url, request).await?;
        check_rejection(&url, &body)?;
        Ok((url, body))
    }

    pub(crate) async fn put<B, T>(&self, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.request(Method::PUT, &url).json(payload);
        let body = self.execute(&url, request).await?;
        unwrap_envelope(&url, body)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let body = self.execute(&url, self.request(Method::DELETE, &url)).await?;
        check_rejection(&url, &body)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and read its body as JSON. An empty body reads as
    /// `null`.
    async fn execute(&self, url: &str, request: RequestBuilder) -> Result<Value> {
        debug!(url, "calling backend");

        let response = request.send().await.map_err(|e| TorneoError::Http {
            url: url.to_owned(),
            source: e,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| TorneoError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(TorneoError::UnexpectedStatus {
                url: url.to_owned(),
                status,
                message: error_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| TorneoError::Decode {
            url: url.to_owned(),
            source: e,
        })
    }
}

/// Pull the backend's `message` out of an error body, if it has one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}

fn check_rejection(url: &str, body: &Value) -> Result<()> {
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message")
            .to_owned();
        return Err(TorneoError::Rejected {
            url: url.to_owned(),
            message,
        });
    }
    Ok(())
}

/// Unwrap `{ "success": true, "data": ... }` envelopes. Bodies without a
/// `data` key are the payload themselves.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(url: &str, mut body: Value) -> Result<T> {
    check_rejection(url, &body)?;
    let payload = match body.get_mut("data") {
        Some(data) => data.take(),
        None => body,
    };
    serde_json::from_value(payload).map_err(|e| TorneoError::Decode {
        url: url.to_owned(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TeamRecord;
    use serde_json::json;

    const URL: &str = "http://localhost:8080/api/equipos";

    #[test]
    fn test_unwrap_bare_and_wrapped_payloads() {
        let bare: Vec<TeamRecord> =
            unwrap_envelope(URL, json!([{ "_id": "a", "nombre": "A" }])).unwrap();
        assert_eq!(bare[0].id, "a");

        let wrapped: Vec<TeamRecord> = unwrap_envelope(
            URL,
            json!({ "success": true, "count": 1, "data": [{ "_id": "b", "nombre": "B" }] }),
        )
        .unwrap();
        assert_eq!(wrapped[0].id, "b");
    }

    #[test]
    fn test_unwrap_rejected_envelope() {
        let err = unwrap_envelope::<Vec<TeamRecord>>(
            URL,
            json!({ "success": false, "message": "Torneo no encontrado" }),
        )
        .unwrap_err();
        match err {
            TorneoError::Rejected { message, .. } => assert_eq!(message, "Torneo no encontrado"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unwrap_wrong_shape() {
        assert!(matches!(
            unwrap_envelope::<Vec<TeamRecord>>(URL, json!({ "data": 5 })),
            Err(TorneoError::Decode { .. })
        ));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"message":"Token inválido"}"#).as_deref(),
            Some("Token inválido")
        );
        assert_eq!(error_message("<html>502</html>"), None);
    }

    #[test]
    fn test_url_joining() {
        let api = Api::new(reqwest::Client::new(), "http://localhost:8080/api/", None);
        assert_eq!(api.url("/torneos"), "http://localhost:8080/api/torneos");
        assert_eq!(api.url("zonas/z1/tabla"), "http://localhost:8080/api/zonas/z1/tabla");
    }
}
