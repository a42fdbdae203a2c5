use std::str::FromStr;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use hearth_core::sea_ext::{SelectExt, is_foreign_key_violation};
use hearth_domain::id::TenantId;
use hearth_domain::pagination::PageRequest;
use hearth_giving_schema::{donations, organizations, tax_reports};
use hearth_outbox::{OutboxEvent, store::record};

use crate::domain::repository::{
    DonationRepository, OrganizationRepository, TaxReportRepository,
};
use crate::domain::types::{
    Donation, DonationFilter, DonationType, Organization, TaxReport, TaxTotals, year_bounds,
};
use crate::error::GivingError;

// ── Organization repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrganizationRepository {
    pub db: DatabaseConnection,
}

impl OrganizationRepository for DbOrganizationRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        page: PageRequest,
    ) -> Result<Vec<Organization>, GivingError> {
        let models = organizations::Entity::find()
            .tenant_scoped(organizations::Column::TenantId, tenant_id)
            .order_by_asc(organizations::Column::Name)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list organizations")?;
        Ok(models.into_iter().map(organization_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<Organization>, GivingError> {
        let model = organizations::Entity::find_by_id(id)
            .tenant_scoped(organizations::Column::TenantId, tenant_id)
            .one(&self.db)
            .await
            .context("find organization by id")?;
        Ok(model.map(organization_from_model))
    }

    async fn has_donations(&self, tenant_id: TenantId, id: Uuid) -> Result<bool, GivingError> {
        let found = donations::Entity::find()
            .tenant_scoped(donations::Column::TenantId, tenant_id)
            .filter(donations::Column::OrganizationId.eq(id))
            .one(&self.db)
            .await
            .context("check organization donations")?;
        Ok(found.is_some())
    }

    async fn create(
        &self,
        organization: &Organization,
        event: &OutboxEvent,
    ) -> Result<(), GivingError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = organization_to_active_model(organization);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create organization with outbox")?;
        Ok(())
    }

    async fn update(
        &self,
        organization: &Organization,
        event: &OutboxEvent,
    ) -> Result<(), GivingError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = organization_to_active_model(organization);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("update organization with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GivingError> {
        self.db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = organizations::Entity::delete_many()
                        .filter(organizations::Column::Id.eq(id))
                        .filter(organizations::Column::TenantId.eq(tenant_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .map_err(|e| match e {
                // a donation was added between the check and the delete
                TransactionError::Transaction(ref db) if is_foreign_key_violation(db) => {
                    GivingError::OrganizationHasDonations
                }
                other => {
                    GivingError::Internal(anyhow::Error::new(other).context("delete organization"))
                }
            })
    }
}

fn organization_to_active_model(organization: &Organization) -> organizations::ActiveModel {
    organizations::ActiveModel {
        id: Set(organization.id),
        tenant_id: Set(organization.tenant_id.0),
        name: Set(organization.name.clone()),
        ein: Set(organization.ein.clone()),
        address: Set(organization.address.clone()),
        website: Set(organization.website.clone()),
        is_501c3: Set(organization.is_501c3),
        notes: Set(organization.notes.clone()),
        created_at: Set(organization.created_at),
        updated_at: Set(organization.updated_at),
    }
}

fn organization_from_model(model: organizations::Model) -> Organization {
    Organization {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        name: model.name,
        ein: model.ein,
        address: model.address,
        website: model.website,
        is_501c3: model.is_501c3,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Donation repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDonationRepository {
    pub db: DatabaseConnection,
}

impl DonationRepository for DbDonationRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: DonationFilter,
        page: PageRequest,
    ) -> Result<Vec<Donation>, GivingError> {
        let mut query =
            donations::Entity::find().tenant_scoped(donations::Column::TenantId, tenant_id);
        if let Some(organization_id) = filter.organization_id {
            query = query.filter(donations::Column::OrganizationId.eq(organization_id));
        }
        if let Some((from, to)) = filter.year.and_then(year_bounds) {
            query = query
                .filter(donations::Column::DonationDate.gte(from))
                .filter(donations::Column::DonationDate.lt(to));
        }
        let models = query
            .order_by_desc(donations::Column::DonationDate)
            .order_by_desc(donations::Column::CreatedAt)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list donations")?;
        models.into_iter().map(donation_from_model).collect()
    }

    async fn all_in_year(
        &self,
        tenant_id: TenantId,
        year: i32,
    ) -> Result<Vec<Donation>, GivingError> {
        let Some((from, to)) = year_bounds(year) else {
            return Ok(vec![]);
        };
        let models = donations::Entity::find()
            .tenant_scoped(donations::Column::TenantId, tenant_id)
            .filter(donations::Column::DonationDate.gte(from))
            .filter(donations::Column::DonationDate.lt(to))
            .order_by_asc(donations::Column::DonationDate)
            .all(&self.db)
            .await
            .context("list donations in year")?;
        models.into_iter().map(donation_from_model).collect()
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<Donation>, GivingError> {
        let model = donations::Entity::find_by_id(id)
            .tenant_scoped(donations::Column::TenantId, tenant_id)
            .one(&self.db)
            .await
            .context("find donation by id")?;
        model.map(donation_from_model).transpose()
    }

    async fn create(&self, donation: &Donation, event: &OutboxEvent) -> Result<(), GivingError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = donation_to_active_model(donation);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| donation_write_error(e, "create donation with outbox"))
    }

    async fn update(&self, donation: &Donation, event: &OutboxEvent) -> Result<(), GivingError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = donation_to_active_model(donation);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| donation_write_error(e, "update donation with outbox"))
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GivingError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = donations::Entity::delete_many()
                        .filter(donations::Column::Id.eq(id))
                        .filter(donations::Column::TenantId.eq(tenant_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete donation with outbox")?;
        Ok(deleted)
    }
}

/// The organization disappeared between the existence check and the write.
fn donation_write_error(err: TransactionError<DbErr>, context: &'static str) -> GivingError {
    match err {
        TransactionError::Transaction(ref db) if is_foreign_key_violation(db) => {
            GivingError::OrganizationNotFound
        }
        other => GivingError::Internal(anyhow::Error::new(other).context(context)),
    }
}

fn donation_to_active_model(donation: &Donation) -> donations::ActiveModel {
    donations::ActiveModel {
        id: Set(donation.id),
        tenant_id: Set(donation.tenant_id.0),
        organization_id: Set(donation.organization_id),
        amount: Set(donation.amount),
        donation_date: Set(donation.donation_date),
        donation_type: Set(donation.donation_type.as_str().to_owned()),
        receipt_number: Set(donation.receipt_number.clone()),
        is_tax_deductible: Set(donation.is_tax_deductible),
        notes: Set(donation.notes.clone()),
        created_at: Set(donation.created_at),
        updated_at: Set(donation.updated_at),
    }
}

fn donation_from_model(model: donations::Model) -> Result<Donation, GivingError> {
    let donation_type = DonationType::from_str(&model.donation_type)
        .map_err(|e| GivingError::Internal(anyhow::anyhow!(e)))?;
    Ok(Donation {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        organization_id: model.organization_id,
        amount: model.amount,
        donation_date: model.donation_date,
        donation_type,
        receipt_number: model.receipt_number,
        is_tax_deductible: model.is_tax_deductible,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Tax report repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTaxReportRepository {
    pub db: DatabaseConnection,
}

impl TaxReportRepository for DbTaxReportRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        page: PageRequest,
    ) -> Result<Vec<TaxReport>, GivingError> {
        let models = tax_reports::Entity::find()
            .tenant_scoped(tax_reports::Column::TenantId, tenant_id)
            .order_by_desc(tax_reports::Column::TaxYear)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list tax reports")?;
        Ok(models.into_iter().map(tax_report_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<TaxReport>, GivingError> {
        let model = tax_reports::Entity::find_by_id(id)
            .tenant_scoped(tax_reports::Column::TenantId, tenant_id)
            .one(&self.db)
            .await
            .context("find tax report by id")?;
        Ok(model.map(tax_report_from_model))
    }

    async fn find_by_year(
        &self,
        tenant_id: TenantId,
        tax_year: i32,
    ) -> Result<Option<TaxReport>, GivingError> {
        let model = tax_reports::Entity::find()
            .tenant_scoped(tax_reports::Column::TenantId, tenant_id)
            .filter(tax_reports::Column::TaxYear.eq(tax_year))
            .one(&self.db)
            .await
            .context("find tax report by year")?;
        Ok(model.map(tax_report_from_model))
    }

    async fn save(&self, report: &TaxReport, event: &OutboxEvent) -> Result<bool, GivingError> {
        let saved = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let model = tax_report_to_active_model(report);
                let same_report =
                    Expr::col((tax_reports::Entity, tax_reports::Column::Id)).eq(report.id);
                let event = event.clone();
                Box::pin(async move {
                    // a row for the year with a different id is left alone
                    let written = tax_reports::Entity::insert(model)
                        .on_conflict(
                            OnConflict::columns([
                                tax_reports::Column::TenantId,
                                tax_reports::Column::TaxYear,
                            ])
                            .update_columns([
                                tax_reports::Column::TotalCashDonations,
                                tax_reports::Column::TotalNonCashDonations,
                                tax_reports::Column::TotalDeductibleAmount,
                                tax_reports::Column::GeneratedDate,
                                tax_reports::Column::Notes,
                            ])
                            .action_and_where(same_report)
                            .to_owned(),
                        )
                        .exec_without_returning(txn)
                        .await?;
                    if written == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("save tax report with outbox")?;
        Ok(saved)
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GivingError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = tax_reports::Entity::delete_many()
                        .filter(tax_reports::Column::Id.eq(id))
                        .filter(tax_reports::Column::TenantId.eq(tenant_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete tax report with outbox")?;
        Ok(deleted)
    }
}

fn tax_report_to_active_model(report: &TaxReport) -> tax_reports::ActiveModel {
    tax_reports::ActiveModel {
        id: Set(report.id),
        tenant_id: Set(report.tenant_id.0),
        tax_year: Set(report.tax_year),
        total_cash_donations: Set(report.totals.total_cash_donations),
        total_non_cash_donations: Set(report.totals.total_non_cash_donations),
        total_deductible_amount: Set(report.total_deductible_amount()),
        generated_date: Set(report.generated_date),
        notes: Set(report.notes.clone()),
    }
}

fn tax_report_from_model(model: tax_reports::Model) -> TaxReport {
    TaxReport {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        tax_year: model.tax_year,
        totals: TaxTotals {
            total_cash_donations: model.total_cash_donations,
            total_non_cash_donations: model.total_non_cash_donations,
        },
        generated_date: model.generated_date,
        notes: model.notes,
    }
}
