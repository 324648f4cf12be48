// ABOUTME: Session token management and caller authentication
// ABOUTME: HS256 session tokens plus verification of gateway identity assertions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Authentication
//!
//! External OAuth is a black box handled by the auth gateway. The gateway
//! posts a signed identity assertion to `/api/auth/callback`; this module
//! verifies it, and mints the HS256 session token the browser then carries
//! in an `httpOnly` cookie (or an `Authorization: Bearer` header for API
//! clients).

use chrono::{Duration, Utc};
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Name of the session cookie set on login
pub const SESSION_COOKIE: &str = "ferro_session";

/// Audience claim for session tokens
const SESSION_AUDIENCE: &str = "ferro-session";
/// Audience claim for gateway identity assertions
const LOGIN_AUDIENCE: &str = "ferro-login";

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// External-auth subject id of the user
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Claims carried by a gateway identity assertion
///
/// The gateway signs these with the shared secret after completing the
/// external OAuth flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// External-auth subject id
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Display name, when the provider supplied one
    pub name: Option<String>,
    /// Email, when the provider supplied one
    pub email: Option<String>,
    /// Authentication method, e.g. "google", "github"
    pub login_method: Option<String>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mints and validates HS256 tokens with the shared secret
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a manager from the shared secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Session token lifetime in seconds, used for the cookie max-age
    #[must_use]
    pub const fn session_max_age_seconds(&self) -> i64 {
        self.token_expiry_hours * 3600
    }

    /// Generate a session token for the given subject
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, open_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: open_id.to_owned(),
            aud: SESSION_AUDIENCE.to_owned(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an auth error if the signature, audience or expiry is invalid
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[SESSION_AUDIENCE]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::auth_invalid(format!("Invalid session token: {e}")))
    }

    /// Validate a gateway identity assertion and return its claims
    ///
    /// # Errors
    ///
    /// Returns an auth error if the signature, audience or expiry is invalid
    pub fn validate_identity_assertion(&self, token: &str) -> AppResult<IdentityClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[LOGIN_AUDIENCE]);

        decode::<IdentityClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::auth_invalid(format!("Invalid identity assertion: {e}")))
    }

    /// Sign an identity assertion; test and tooling helper standing in for
    /// the gateway
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn sign_identity_assertion(
        &self,
        open_id: &str,
        name: Option<&str>,
        email: Option<&str>,
        login_method: Option<&str>,
    ) -> AppResult<String> {
        let claims = IdentityClaims {
            sub: open_id.to_owned(),
            aud: LOGIN_AUDIENCE.to_owned(),
            name: name.map(ToOwned::to_owned),
            email: email.map(ToOwned::to_owned),
            login_method: login_method.map(ToOwned::to_owned),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode identity assertion: {e}")))
    }
}

/// Extract a cookie value from request headers
#[must_use]
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Extract the bearer token from request headers, preferring the
/// `Authorization` header with the session cookie as fallback
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_owned());
        }
    }
    cookie_value(headers, SESSION_COOKIE)
}
