use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hearth_auth_types::identity::{USER_ID_HEADER, USER_ROLES_HEADER};
use hearth_auth_types::token::{TokenInfo, bearer_token};
use hearth_core::tenant::{TENANT_HEADER, TenantContext};
use hearth_domain::id::{TenantId, UserId};

use crate::error::IdentityError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::token::{IntrospectTokenUseCase, LoginInput, LoginUseCase};

fn exp_to_datetime(exp: u64) -> Result<DateTime<Utc>, IdentityError> {
    i64::try_from(exp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| anyhow::anyhow!("token expiry {exp} out of range").into())
}

// ── POST /token ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    /// User name or email.
    #[serde(alias = "user_name", alias = "email")]
    pub login: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

pub async fn create_token(
    tenant: TenantContext,
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, IdentityError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
        hasher: state.hasher.clone(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let out = usecase
        .execute(
            tenant.tenant_id,
            LoginInput {
                login: body.login,
                password: body.password,
            },
        )
        .await?;
    Ok(Json(TokenResponse {
        access_token: out.access_token,
        token_type: "Bearer",
        expires_at: exp_to_datetime(out.access_token_exp)?,
        user: out.profile.into(),
    }))
}

// ── POST /token/introspect ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct IntrospectResponse {
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub roles: Vec<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub expires_at: DateTime<Utc>,
}

/// Headers the gateway forwards to downstream services.
fn identity_headers(info: &TokenInfo) -> Result<HeaderMap, IdentityError> {
    let value = |s: String| {
        HeaderValue::from_str(&s).map_err(|e| IdentityError::Internal(e.into()))
    };
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(TENANT_HEADER),
        value(info.tenant_id.to_string())?,
    );
    headers.insert(
        HeaderName::from_static(USER_ID_HEADER),
        value(info.user_id.to_string())?,
    );
    headers.insert(
        HeaderName::from_static(USER_ROLES_HEADER),
        value(info.roles.join(","))?,
    );
    Ok(headers)
}

pub async fn introspect_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, IdentityError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .ok_or(IdentityError::InvalidToken)?;

    let usecase = IntrospectTokenUseCase {
        jwt_secret: state.jwt_secret.clone(),
    };
    let info = usecase.execute(token)?;

    let forwarded = identity_headers(&info)?;
    let body = IntrospectResponse {
        tenant_id: info.tenant_id,
        user_id: info.user_id,
        expires_at: exp_to_datetime(info.access_token_exp)?,
        roles: info.roles,
    };
    Ok((StatusCode::OK, forwarded, Json(body)))
}
