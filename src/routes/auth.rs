// ABOUTME: Authentication route handlers: session callback, current user, logout
// ABOUTME: Exchanges gateway identity assertions for httpOnly session cookies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ferro Fitness

//! Authentication routes
//!
//! The external OAuth flow happens at the gateway. On success the gateway
//! posts a signed identity assertion to `/api/auth/callback`; the handler
//! upserts the user row (refreshing `last_signed_in`) and answers with a
//! session cookie. `/api/auth/me` is public and returns the current user
//! or null.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::SESSION_COOKIE;
use crate::database::UpsertUser;
use crate::errors::AppError;
use crate::models::User;
use crate::resources::ServerResources;

use super::optional_user;

/// Response shape for a user profile
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique identifier
    pub id: i64,
    /// External-auth subject id
    pub open_id: String,
    /// Display name
    pub name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Authentication method
    pub login_method: Option<String>,
    /// Role
    pub role: String,
    /// Account creation timestamp
    pub created_at: String,
    /// Last login timestamp
    pub last_signed_in: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            open_id: user.open_id,
            name: user.name,
            email: user.email,
            login_method: user.login_method,
            role: user.role.as_str().to_owned(),
            created_at: user.created_at.to_rfc3339(),
            last_signed_in: user.last_signed_in.to_rfc3339(),
        }
    }
}

/// Request body for the gateway login callback
#[derive(Debug, Deserialize)]
pub struct CallbackBody {
    /// Signed identity assertion issued by the auth gateway
    pub token: String,
}

/// Response for logout
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Always true; the cookie is cleared
    pub success: bool,
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/me", get(Self::handle_me))
            .route("/api/auth/callback", post(Self::handle_callback))
            .route("/api/auth/logout", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Handle GET /api/auth/me - Current user or null
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = optional_user(&headers, &resources).await?;
        let response: Option<UserResponse> = user.map(Into::into);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/auth/callback - Exchange an identity assertion for
    /// a session cookie
    async fn handle_callback(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CallbackBody>,
    ) -> Result<Response, AppError> {
        let identity = resources
            .auth_manager
            .validate_identity_assertion(&body.token)?;

        resources
            .database
            .upsert_user(&UpsertUser {
                open_id: identity.sub.clone(),
                name: identity.name,
                email: identity.email,
                login_method: identity.login_method,
                role: None,
            })
            .await?;

        let user = resources
            .database
            .get_user_by_open_id(&identity.sub)
            .await?
            .ok_or_else(|| AppError::internal("User row missing after upsert"))?;

        let token = resources.auth_manager.generate_token(&user.open_id)?;
        let max_age = resources.auth_manager.session_max_age_seconds();
        let cookie =
            format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");

        let mut response =
            (StatusCode::OK, Json(UserResponse::from(user))).into_response();
        response.headers_mut().insert(
            http::header::SET_COOKIE,
            cookie
                .parse()
                .map_err(|_| AppError::internal("Failed to build session cookie"))?,
        );
        Ok(response)
    }

    /// Handle POST /api/auth/logout - Clear the session cookie
    async fn handle_logout() -> Result<Response, AppError> {
        let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");

        let mut response =
            (StatusCode::OK, Json(LogoutResponse { success: true })).into_response();
        response.headers_mut().insert(
            http::header::SET_COOKIE,
            cookie
                .parse()
                .map_err(|_| AppError::internal("Failed to build logout cookie"))?,
        );
        Ok(response)
    }
}
