//! Login, logout and the session check that gates every other command.

use super::api_client::{ApiClient, rejection};
use crate::models::{LoginResponse, User};
use crate::storage::ClientError;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    #[serde(default)]
    exp: Option<i64>,
}

/// Whether `token` is a JWT whose `exp` has passed. The signature is not
/// checked (the backend does that); tokens that are not JWTs, or carry no
/// `exp`, are never considered expired here.
pub fn token_expired(token: &str) -> bool {
    let Ok(header) = decode_header(token) else {
        return false;
    };
    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();

    match decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data
            .claims
            .exp
            .is_some_and(|exp| exp <= Utc::now().timestamp()),
        Err(_) => false,
    }
}

impl ApiClient {
    /// Exchange credentials for a session token and store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ClientError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }
        let request = self
            .request(Method::POST, "/auth/login")?
            .form(&[("username", username), ("password", password)]);
        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Bad credentials are reported with the backend's own wording.
            return Err(match rejection(response).await {
                ClientError::Rejected { status, detail } if detail == "Unauthorized" => {
                    ClientError::Rejected {
                        status,
                        detail: "Invalid username or password".to_string(),
                    }
                }
                other => other,
            });
        }
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let login: LoginResponse = response.json().await?;
        self.session().set_token(login.access_token)?;
        info!(username, "Logged in");
        Ok(())
    }

    /// Forget the session token. Returns whether one was stored.
    pub fn logout(&self) -> Result<bool, ClientError> {
        let cleared = self.session().clear_token()?;
        if cleared {
            info!("Logged out");
        }
        Ok(cleared)
    }

    /// Confirm the stored session is still good and return its user. The
    /// token is dropped when it has expired or the backend rejects it.
    pub async fn verify(&self) -> Result<User, ClientError> {
        let Some(token) = self.session().token() else {
            return Err(ClientError::Unauthorized);
        };
        if token_expired(&token) {
            warn!("Session token expired, cleared");
            self.session().clear_token()?;
            return Err(ClientError::Unauthorized);
        }
        // A 401 has already cleared the token inside `send`. Anything else
        // says nothing about the credential, so the session is kept.
        self.me().await.inspect_err(|e| {
            if !matches!(e, ClientError::Unauthorized) {
                warn!("Session check failed, keeping token: {}", e);
            }
        })
    }
}
