use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{unwrap_envelope, Api};
use crate::error::{Result, TorneoError};
use crate::model::{Session, User};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Exchange credentials for a bearer token. The response is
/// `{ "success": true, "data": <user>, "token": "..." }`.
#[instrument(skip(api, password))]
pub(crate) async fn login(api: &Api, email: &str, password: &str) -> Result<Session> {
    let (url, mut body) = api
        .post_raw("auth/login", &Credentials { email, password })
        .await?;

    let token = body
        .get_mut("token")
        .map(Value::take)
        .and_then(|t| t.as_str().map(str::to_owned))
        .ok_or_else(|| TorneoError::Rejected {
            url: url.clone(),
            message: "login response carried no token".to_owned(),
        })?;
    let user: User = unwrap_envelope(&url, body)?;

    debug!(user = %user.email, "logged in");
    Ok(Session { user, token })
}

#[instrument(skip(api))]
pub(crate) async fn me(api: &Api) -> Result<User> {
    api.get("auth/me").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_payload() {
        let payload = Credentials {
            email: "admin@liga.example",
            password: "hunter2",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "email": "admin@liga.example", "password": "hunter2" })
        );
    }

    #[test]
    fn test_user_from_login_envelope() {
        let body = json!({
            "success": true,
            "token": "abc",
            "data": { "id": "u1", "email": "admin@liga.example", "nombre": "Ana", "apellido": "Pérez", "rol": "admin" }
        });
        let user: User = unwrap_envelope("http://localhost:8080/api/auth/login", body).unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(user.first_name, "Ana");
    }
}
