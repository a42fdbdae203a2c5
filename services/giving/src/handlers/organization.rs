use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_core::tenant::TenantContext;
use hearth_domain::pagination::PageRequest;

use crate::domain::types::Organization;
use crate::error::GivingError;
use crate::state::AppState;
use crate::usecase::organization::{
    CreateOrganizationUseCase, DeleteOrganizationUseCase, GetOrganizationUseCase,
    ListOrganizationsUseCase, OrganizationInput, UpdateOrganizationUseCase,
};

#[derive(Deserialize)]
pub struct OrganizationRequest {
    pub name: String,
    pub ein: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub is_501c3: bool,
    pub notes: Option<String>,
}

impl From<OrganizationRequest> for OrganizationInput {
    fn from(body: OrganizationRequest) -> Self {
        Self {
            name: body.name,
            ein: body.ein,
            address: body.address,
            website: body.website,
            is_501c3: body.is_501c3,
            notes: body.notes,
        }
    }
}

#[derive(Serialize)]
pub struct OrganizationResponse {
    pub id: Uuid,
    pub name: String,
    pub ein: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub is_501c3: bool,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            ein: organization.ein,
            address: organization.address,
            website: organization.website,
            is_501c3: organization.is_501c3,
            notes: organization.notes,
            created_at: organization.created_at,
            updated_at: organization.updated_at,
        }
    }
}

// ── POST /organizations ──────────────────────────────────────────────────────

pub async fn create_organization(
    tenant: TenantContext,
    State(state): State<AppState>,
    Json(body): Json<OrganizationRequest>,
) -> Result<(StatusCode, Json<OrganizationResponse>), GivingError> {
    let usecase = CreateOrganizationUseCase {
        repo: state.organization_repo(),
    };
    let organization = usecase.execute(tenant.tenant_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(organization.into())))
}

// ── GET /organizations ───────────────────────────────────────────────────────

pub async fn get_organizations(
    tenant: TenantContext,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<OrganizationResponse>>, GivingError> {
    let usecase = ListOrganizationsUseCase {
        repo: state.organization_repo(),
    };
    let organizations = usecase.execute(tenant.tenant_id, page).await?;
    Ok(Json(organizations.into_iter().map(Into::into).collect()))
}

// ── GET /organizations/{id} ──────────────────────────────────────────────────

pub async fn get_organization(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizationResponse>, GivingError> {
    let usecase = GetOrganizationUseCase {
        repo: state.organization_repo(),
    };
    let organization = usecase.execute(tenant.tenant_id, id).await?;
    Ok(Json(organization.into()))
}

// ── PUT /organizations/{id} ──────────────────────────────────────────────────

pub async fn update_organization(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<OrganizationRequest>,
) -> Result<Json<OrganizationResponse>, GivingError> {
    let usecase = UpdateOrganizationUseCase {
        repo: state.organization_repo(),
    };
    let organization = usecase.execute(tenant.tenant_id, id, body.into()).await?;
    Ok(Json(organization.into()))
}

// ── DELETE /organizations/{id} ───────────────────────────────────────────────

pub async fn delete_organization(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GivingError> {
    let usecase = DeleteOrganizationUseCase {
        repo: state.organization_repo(),
    };
    usecase.execute(tenant.tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
