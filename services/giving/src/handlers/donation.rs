use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_core::tenant::TenantContext;
use hearth_domain::pagination::{DEFAULT_PER_PAGE, PageRequest};

use crate::domain::types::{Donation, DonationFilter, DonationType};
use crate::error::GivingError;
use crate::state::AppState;
use crate::usecase::donation::{
    CreateDonationUseCase, DeleteDonationUseCase, DonationInput, GetDonationUseCase,
    ListDonationsUseCase, UpdateDonationUseCase,
};

// ── Request types ────────────────────────────────────────────────────────────

fn deductible_by_default() -> bool {
    true
}

#[derive(Deserialize)]
pub struct DonationRequest {
    pub organization_id: Uuid,
    pub amount: Decimal,
    pub donation_date: NaiveDate,
    pub donation_type: DonationType,
    pub receipt_number: Option<String>,
    #[serde(default = "deductible_by_default")]
    pub is_tax_deductible: bool,
    pub notes: Option<String>,
}

impl From<DonationRequest> for DonationInput {
    fn from(body: DonationRequest) -> Self {
        Self {
            organization_id: body.organization_id,
            amount: body.amount,
            donation_date: body.donation_date,
            donation_type: body.donation_type,
            receipt_number: body.receipt_number,
            is_tax_deductible: body.is_tax_deductible,
            notes: body.notes,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DonationListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub organization_id: Option<Uuid>,
    pub year: Option<i32>,
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DonationResponse {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub amount: Decimal,
    pub donation_date: NaiveDate,
    pub donation_type: DonationType,
    pub is_cash: bool,
    pub receipt_number: Option<String>,
    pub is_tax_deductible: bool,
    pub notes: Option<String>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "hearth_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Donation> for DonationResponse {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id,
            organization_id: donation.organization_id,
            amount: donation.amount,
            donation_date: donation.donation_date,
            donation_type: donation.donation_type,
            is_cash: donation.donation_type.is_cash(),
            receipt_number: donation.receipt_number,
            is_tax_deductible: donation.is_tax_deductible,
            notes: donation.notes,
            created_at: donation.created_at,
            updated_at: donation.updated_at,
        }
    }
}

// ── POST /donations ──────────────────────────────────────────────────────────

pub async fn create_donation(
    tenant: TenantContext,
    State(state): State<AppState>,
    Json(body): Json<DonationRequest>,
) -> Result<(StatusCode, Json<DonationResponse>), GivingError> {
    let usecase = CreateDonationUseCase {
        organizations: state.organization_repo(),
        donations: state.donation_repo(),
    };
    let donation = usecase.execute(tenant.tenant_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(donation.into())))
}

// ── GET /donations ───────────────────────────────────────────────────────────

pub async fn get_donations(
    tenant: TenantContext,
    State(state): State<AppState>,
    Query(query): Query<DonationListQuery>,
) -> Result<Json<Vec<DonationResponse>>, GivingError> {
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        page: query.page.unwrap_or(1),
    };
    let filter = DonationFilter {
        organization_id: query.organization_id,
        year: query.year,
    };
    let usecase = ListDonationsUseCase {
        repo: state.donation_repo(),
    };
    let donations = usecase.execute(tenant.tenant_id, filter, page).await?;
    Ok(Json(donations.into_iter().map(Into::into).collect()))
}

// ── GET /donations/{id} ──────────────────────────────────────────────────────

pub async fn get_donation(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DonationResponse>, GivingError> {
    let usecase = GetDonationUseCase {
        repo: state.donation_repo(),
    };
    let donation = usecase.execute(tenant.tenant_id, id).await?;
    Ok(Json(donation.into()))
}

// ── PUT /donations/{id} ──────────────────────────────────────────────────────

pub async fn update_donation(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DonationRequest>,
) -> Result<Json<DonationResponse>, GivingError> {
    let usecase = UpdateDonationUseCase {
        organizations: state.organization_repo(),
        donations: state.donation_repo(),
    };
    let donation = usecase.execute(tenant.tenant_id, id, body.into()).await?;
    Ok(Json(donation.into()))
}

// ── DELETE /donations/{id} ───────────────────────────────────────────────────

pub async fn delete_donation(
    tenant: TenantContext,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, GivingError> {
    let usecase = DeleteDonationUseCase {
        repo: state.donation_repo(),
    };
    usecase.execute(tenant.tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
