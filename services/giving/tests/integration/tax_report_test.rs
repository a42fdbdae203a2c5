use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::TenantId;
use hearth_domain::pagination::PageRequest;
use hearth_giving::domain::repository::TaxReportRepository;
use hearth_giving::domain::types::{DonationType, TaxReport, TaxTotals};
use hearth_giving::error::GivingError;
use hearth_giving::usecase::tax_report::{
    DeleteTaxReportUseCase, GenerateTaxReportUseCase, GetTaxReportByYearUseCase,
};
use hearth_outbox::OutboxEvent;

use crate::helpers::{
    MockDonationRepo, MockTaxReportRepo, date, dec, tenant, test_donation, test_organization,
};

#[tokio::test]
async fn should_total_deductible_donations_for_the_year() {
    let tenant_id = tenant();
    let charity = test_organization(tenant_id, "American Red Cross");
    let mut not_deductible = test_donation(&charity, "999", date(2024, 5, 5), DonationType::Cash);
    not_deductible.is_tax_deductible = false;
    let donations = MockDonationRepo::new(vec![
        test_donation(&charity, "3000.00", date(2024, 2, 1), DonationType::Check),
        test_donation(&charity, "2000.00", date(2024, 9, 1), DonationType::Stock),
        test_donation(&charity, "125.50", date(2023, 12, 31), DonationType::Cash),
        not_deductible,
    ]);
    let reports = MockTaxReportRepo::empty();
    let events = reports.events_handle();
    let usecase = GenerateTaxReportUseCase { donations, reports };

    let report = usecase.execute(tenant_id, 2024, None).await.unwrap();

    assert_eq!(report.tax_year, 2024);
    assert_eq!(report.totals.total_cash_donations, dec("3000.00"));
    assert_eq!(report.totals.total_non_cash_donations, dec("2000.00"));
    assert_eq!(report.total_deductible_amount(), dec("5000.00"));
    let events = events.lock().unwrap();
    assert_eq!(events[0].kind, "tax_report.generated");
    assert_eq!(events[0].payload["replaced"], false);
}

#[tokio::test]
async fn should_replace_existing_report_for_the_year() {
    let tenant_id = tenant();
    let charity = test_organization(tenant_id, "UNICEF");
    let donations = MockDonationRepo::new(vec![test_donation(
        &charity,
        "100",
        date(2024, 4, 1),
        DonationType::Cash,
    )]);
    let stored = donations.donations_handle();
    let reports = MockTaxReportRepo::empty();
    let saved = reports.reports_handle();
    let events = reports.events_handle();
    let usecase = GenerateTaxReportUseCase { donations, reports };

    let first = usecase.execute(tenant_id, 2024, None).await.unwrap();
    stored.lock().unwrap().push(test_donation(
        &charity,
        "50",
        date(2024, 10, 1),
        DonationType::Property,
    ));
    let second = usecase
        .execute(tenant_id, 2024, Some("after year-end gift".to_owned()))
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.total_deductible_amount(), dec("150"));
    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].notes.as_deref(), Some("after year-end gift"));
    assert_eq!(events.lock().unwrap()[1].payload["replaced"], true);
}

#[tokio::test]
async fn should_generate_empty_report_for_quiet_year() {
    let usecase = GenerateTaxReportUseCase {
        donations: MockDonationRepo::empty(),
        reports: MockTaxReportRepo::empty(),
    };

    let report = usecase.execute(tenant(), 2020, None).await.unwrap();

    assert_eq!(report.total_deductible_amount(), Decimal::ZERO);
}

#[tokio::test]
async fn should_reject_year_outside_range() {
    let usecase = GenerateTaxReportUseCase {
        donations: MockDonationRepo::empty(),
        reports: MockTaxReportRepo::empty(),
    };

    let too_early = usecase.execute(tenant(), 1899, None).await;
    let too_late = usecase.execute(tenant(), 10_000, None).await;

    assert!(matches!(too_early, Err(GivingError::InvalidInput(_))));
    assert!(matches!(too_late, Err(GivingError::InvalidInput(_))));
}

#[tokio::test]
async fn should_find_report_by_year_within_tenant() {
    let tenant_id = tenant();
    let reports = MockTaxReportRepo::empty();
    let saved = reports.reports_handle();
    GenerateTaxReportUseCase {
        donations: MockDonationRepo::empty(),
        reports,
    }
    .execute(tenant_id, 2024, None)
    .await
    .unwrap();
    let lookup = GetTaxReportByYearUseCase {
        repo: MockTaxReportRepo::new(saved.lock().unwrap().clone()),
    };

    let found = lookup.execute(tenant_id, 2024).await.unwrap();
    let other_tenant = lookup.execute(tenant(), 2024).await;
    let other_year = lookup.execute(tenant_id, 2023).await;

    assert_eq!(found.tax_year, 2024);
    assert!(matches!(other_tenant, Err(GivingError::TaxReportNotFound)));
    assert!(matches!(other_year, Err(GivingError::TaxReportNotFound)));
}

#[tokio::test]
async fn should_report_missing_report_on_delete() {
    let usecase = DeleteTaxReportUseCase {
        repo: MockTaxReportRepo::empty(),
    };

    let result = usecase.execute(tenant(), Uuid::new_v4()).await;

    assert!(matches!(result, Err(GivingError::TaxReportNotFound)));
}

/// Hides the stored report from the first year lookup, as if another request
/// inserted it between the lookup and the save.
struct LateWriterRepo {
    inner: MockTaxReportRepo,
    hidden: AtomicBool,
}

impl TaxReportRepository for LateWriterRepo {
    async fn list(
        &self,
        tenant_id: TenantId,
        page: PageRequest,
    ) -> Result<Vec<TaxReport>, GivingError> {
        self.inner.list(tenant_id, page).await
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        id: Uuid,
    ) -> Result<Option<TaxReport>, GivingError> {
        self.inner.find_by_id(tenant_id, id).await
    }

    async fn find_by_year(
        &self,
        tenant_id: TenantId,
        tax_year: i32,
    ) -> Result<Option<TaxReport>, GivingError> {
        if self.hidden.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_by_year(tenant_id, tax_year).await
    }

    async fn save(&self, report: &TaxReport, event: &OutboxEvent) -> Result<bool, GivingError> {
        self.inner.save(report, event).await
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, GivingError> {
        self.inner.delete(tenant_id, id, event).await
    }
}

#[tokio::test]
async fn should_return_the_stored_report_when_another_generation_won_the_insert() {
    let tenant_id = tenant();
    let winner = TaxReport {
        id: Uuid::now_v7(),
        tenant_id,
        tax_year: 2024,
        totals: TaxTotals::default(),
        generated_date: Utc::now(),
        notes: None,
    };
    let inner = MockTaxReportRepo::new(vec![winner.clone()]);
    let saved = inner.reports_handle();
    let events = inner.events_handle();
    let usecase = GenerateTaxReportUseCase {
        donations: MockDonationRepo::empty(),
        reports: LateWriterRepo {
            inner,
            hidden: AtomicBool::new(true),
        },
    };

    let report = usecase.execute(tenant_id, 2024, None).await.unwrap();

    assert_eq!(report.id, winner.id);
    assert_eq!(saved.lock().unwrap().len(), 1);
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].aggregate_id, winner.id);
    assert_eq!(events[0].payload["replaced"], true);
}

#[tokio::test]
async fn should_reject_totals_beyond_the_money_column() {
    let tenant_id = tenant();
    let charity = test_organization(tenant_id, "UNICEF");
    let donations = MockDonationRepo::new(vec![
        test_donation(&charity, "9000000000000000", date(2024, 1, 1), DonationType::Cash),
        test_donation(&charity, "9000000000000000", date(2024, 6, 1), DonationType::Cash),
    ]);
    let reports = MockTaxReportRepo::empty();
    let saved = reports.reports_handle();
    let usecase = GenerateTaxReportUseCase { donations, reports };

    let result = usecase.execute(tenant_id, 2024, None).await;

    assert!(matches!(result, Err(GivingError::InvalidInput(_))));
    assert!(saved.lock().unwrap().is_empty());
}
