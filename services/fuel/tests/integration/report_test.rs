use hearth_domain::pagination::PageRequest;
use hearth_fuel::error::FuelError;
use hearth_fuel::usecase::report::{
    DeleteReportUseCase, GenerateReportInput, GenerateReportUseCase, GetReportUseCase,
    ListReportsUseCase,
};
use rust_decimal::Decimal;

use crate::helpers::{
    MockFillUpRepo, MockReportRepo, MockVehicleRepo, at, date, dec, owner, test_fill_up,
    test_vehicle,
};

fn march() -> GenerateReportInput {
    GenerateReportInput {
        start_date: date(2026, 3, 1),
        end_date: date(2026, 3, 31),
        notes: None,
    }
}

#[tokio::test]
async fn should_summarise_fill_ups_within_range() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let fill_ups = MockFillUpRepo::new(vec![
        test_fill_up(&vehicle, "900", "10", None, at(2026, 2, 20)),
        test_fill_up(&vehicle, "1000", "10", Some("25"), at(2026, 3, 2)),
        test_fill_up(&vehicle, "1300", "10", Some("30"), at(2026, 3, 15)),
        test_fill_up(&vehicle, "1600", "12", Some("25"), at(2026, 3, 31)),
        test_fill_up(&vehicle, "1900", "10", Some("30"), at(2026, 4, 1)),
    ]);
    let reports = MockReportRepo::empty();
    let events = reports.events_handle();
    let usecase = GenerateReportUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups,
        reports,
    };

    let report = usecase
        .execute(tenant_id, user_id, vehicle.id, march())
        .await
        .unwrap();

    let totals = &report.totals;
    assert_eq!(totals.number_of_fill_ups, 3);
    assert_eq!(totals.total_miles, dec("600"));
    assert_eq!(totals.total_gallons, dec("32"));
    assert_eq!(totals.average_mpg, dec("18.75"));
    assert_eq!(totals.total_fuel_cost, dec("112.00"));
    assert_eq!(totals.cost_per_mile, dec("0.1867"));
    assert_eq!(totals.best_mpg, Some(dec("30")));
    assert_eq!(totals.worst_mpg, Some(dec("25")));
    assert_eq!(events.lock().unwrap()[0].kind, "efficiency_report.generated");
}

#[tokio::test]
async fn should_reject_totals_the_report_columns_cannot_hold() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let fill_ups = MockFillUpRepo::new(vec![
        test_fill_up(&vehicle, "1000", "6000000", None, at(2026, 3, 2)),
        test_fill_up(&vehicle, "1300", "6000000", None, at(2026, 3, 15)),
    ]);
    let reports = MockReportRepo::empty();
    let events = reports.events_handle();
    let usecase = GenerateReportUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups,
        reports,
    };

    let result = usecase
        .execute(tenant_id, user_id, vehicle.id, march())
        .await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_generate_zero_report_for_empty_range() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let usecase = GenerateReportUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::empty(),
        reports: MockReportRepo::empty(),
    };

    let report = usecase
        .execute(tenant_id, user_id, vehicle.id, march())
        .await
        .unwrap();

    assert_eq!(report.totals.number_of_fill_ups, 0);
    assert_eq!(report.totals.average_mpg, Decimal::ZERO);
    assert_eq!(report.totals.cost_per_mile, Decimal::ZERO);
    assert_eq!(report.totals.best_mpg, None);
}

#[tokio::test]
async fn should_reject_end_before_start() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let usecase = GenerateReportUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::empty(),
        reports: MockReportRepo::empty(),
    };

    let result = usecase
        .execute(
            tenant_id,
            user_id,
            vehicle.id,
            GenerateReportInput {
                start_date: date(2026, 3, 31),
                end_date: date(2026, 3, 1),
                notes: None,
            },
        )
        .await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
}

#[tokio::test]
async fn should_list_get_and_delete_reports() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let reports = MockReportRepo::empty();
    let stored = reports.reports_handle();
    let generate = GenerateReportUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::empty(),
        reports,
    };
    let report = generate
        .execute(tenant_id, user_id, vehicle.id, march())
        .await
        .unwrap();

    let listed = ListReportsUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        reports: MockReportRepo::new(stored.lock().unwrap().clone()),
    }
    .execute(tenant_id, user_id, vehicle.id, PageRequest::default())
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);

    let fetched = GetReportUseCase {
        repo: MockReportRepo::new(stored.lock().unwrap().clone()),
    }
    .execute(tenant_id, user_id, report.id)
    .await
    .unwrap();
    assert_eq!(fetched.id, report.id);

    let delete = DeleteReportUseCase {
        repo: MockReportRepo::new(stored.lock().unwrap().clone()),
    };
    delete
        .execute(tenant_id, user_id, report.id)
        .await
        .unwrap();
    let again = delete.execute(tenant_id, user_id, report.id).await;
    assert!(matches!(again, Err(FuelError::ReportNotFound)));
}

#[tokio::test]
async fn should_not_list_reports_for_unknown_vehicle() {
    let (tenant_id, user_id) = owner();
    let usecase = ListReportsUseCase {
        vehicles: MockVehicleRepo::empty(),
        reports: MockReportRepo::empty(),
    };

    let result = usecase
        .execute(tenant_id, user_id, uuid::Uuid::new_v4(), PageRequest::default())
        .await;

    assert!(matches!(result, Err(FuelError::VehicleNotFound)));
}
