use hearth_domain::pagination::PageRequest;
use hearth_fuel::error::FuelError;
use hearth_fuel::usecase::fill_up::{
    DeleteFillUpUseCase, FillUpInput, GetFillUpUseCase, ListFillUpsUseCase, RecordFillUpUseCase,
};
use uuid::Uuid;

use crate::helpers::{MockFillUpRepo, MockVehicleRepo, at, dec, owner, test_fill_up, test_vehicle};

fn input(odometer: &str, gallons: &str, price: &str) -> FillUpInput {
    FillUpInput {
        fill_up_date: Some(at(2026, 2, 10)),
        odometer: dec(odometer),
        gallons: dec(gallons),
        price_per_gallon: dec(price),
        is_full_tank: true,
        fuel_grade: Some("Regular".to_owned()),
        gas_station: None,
        notes: None,
    }
}

#[tokio::test]
async fn should_compute_cost_and_mpg_from_previous_reading() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let earlier = test_fill_up(&vehicle, "50000", "11", None, at(2026, 2, 1));
    let fill_ups = MockFillUpRepo::new(vec![earlier]);
    let events = fill_ups.events_handle();
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups,
    };

    let fill_up = usecase
        .execute(tenant_id, user_id, vehicle.id, input("50333", "12", "3.459"))
        .await
        .unwrap();

    assert_eq!(fill_up.total_cost, dec("41.51"));
    assert_eq!(fill_up.miles_per_gallon, Some(dec("27.75")));
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "fill_up.recorded");
}

#[tokio::test]
async fn should_leave_mpg_empty_for_first_fill_up() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::empty(),
    };

    let fill_up = usecase
        .execute(tenant_id, user_id, vehicle.id, input("12000", "10", "3.00"))
        .await
        .unwrap();

    assert_eq!(fill_up.miles_per_gallon, None);
    assert_eq!(fill_up.total_cost, dec("30.00"));
}

#[tokio::test]
async fn should_measure_against_closest_lower_reading_when_back_dated() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let fill_ups = MockFillUpRepo::new(vec![
        test_fill_up(&vehicle, "1000", "10", None, at(2026, 1, 1)),
        test_fill_up(&vehicle, "1600", "10", None, at(2026, 1, 20)),
    ]);
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups,
    };

    let fill_up = usecase
        .execute(tenant_id, user_id, vehicle.id, input("1300", "10", "3.00"))
        .await
        .unwrap();

    assert_eq!(fill_up.miles_per_gallon, Some(dec("30")));
}

#[tokio::test]
async fn should_refuse_fill_up_on_inactive_vehicle() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", false);
    let fill_ups = MockFillUpRepo::empty();
    let stored = fill_ups.fill_ups_handle();
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups,
    };

    let result = usecase
        .execute(tenant_id, user_id, vehicle.id, input("100", "5", "3.00"))
        .await;

    assert!(matches!(result, Err(FuelError::VehicleInactive)));
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_zero_gallons() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::empty(),
    };

    let result = usecase
        .execute(tenant_id, user_id, vehicle.id, input("100", "0", "3.00"))
        .await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
}

#[tokio::test]
async fn should_reject_quantities_beyond_their_columns_without_panicking() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let fill_ups = MockFillUpRepo::empty();
    let stored = fill_ups.fill_ups_handle();
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups,
    };

    let huge = "1000000000000000";
    let result = usecase
        .execute(tenant_id, user_id, vehicle.id, input("100", huge, huge))
        .await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_mpg_the_column_cannot_hold() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let earlier = test_fill_up(&vehicle, "0", "10", None, at(2026, 2, 1));
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::new(vec![earlier]),
    };

    let result = usecase
        .execute(tenant_id, user_id, vehicle.id, input("999999999", "0.001", "3.00"))
        .await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
}

#[tokio::test]
async fn should_store_readings_at_column_scale() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::empty(),
    };

    let fill_up = usecase
        .execute(tenant_id, user_id, vehicle.id, input("50000.25", "12.3456", "3.4595"))
        .await
        .unwrap();

    assert_eq!(fill_up.odometer, dec("50000.3"));
    assert_eq!(fill_up.gallons, dec("12.346"));
    assert_eq!(fill_up.price_per_gallon, dec("3.460"));
    assert_eq!(fill_up.total_cost, dec("42.72"));
}

#[tokio::test]
async fn should_reject_gallons_that_round_to_nothing() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::empty(),
    };

    let result = usecase
        .execute(tenant_id, user_id, vehicle.id, input("100", "0.0004", "3.00"))
        .await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
}

#[tokio::test]
async fn should_return_not_found_when_vehicle_missing() {
    let (tenant_id, user_id) = owner();
    let usecase = RecordFillUpUseCase {
        vehicles: MockVehicleRepo::empty(),
        fill_ups: MockFillUpRepo::empty(),
    };

    let result = usecase
        .execute(tenant_id, user_id, Uuid::new_v4(), input("100", "5", "3.00"))
        .await;

    assert!(matches!(result, Err(FuelError::VehicleNotFound)));
}

#[tokio::test]
async fn should_list_newest_fill_up_first() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let older = test_fill_up(&vehicle, "1000", "10", None, at(2026, 1, 1));
    let newer = test_fill_up(&vehicle, "1300", "10", Some("30"), at(2026, 1, 9));
    let usecase = ListFillUpsUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::new(vec![older.clone(), newer.clone()]),
    };

    let fill_ups = usecase
        .execute(tenant_id, user_id, vehicle.id, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(
        fill_ups.iter().map(|f| f.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );
}

#[tokio::test]
async fn should_get_and_delete_fill_up() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let fill_up = test_fill_up(&vehicle, "1000", "10", None, at(2026, 1, 1));
    let repo = MockFillUpRepo::new(vec![fill_up.clone()]);
    let stored = repo.fill_ups_handle();
    let events = repo.events_handle();

    let found = GetFillUpUseCase {
        repo: MockFillUpRepo::new(vec![fill_up.clone()]),
    }
    .execute(tenant_id, user_id, fill_up.id)
    .await
    .unwrap();
    assert_eq!(found.id, fill_up.id);

    let delete = DeleteFillUpUseCase { repo };
    delete
        .execute(tenant_id, user_id, fill_up.id)
        .await
        .unwrap();
    assert!(stored.lock().unwrap().is_empty());
    assert_eq!(events.lock().unwrap()[0].kind, "fill_up.deleted");

    let again = delete.execute(tenant_id, user_id, fill_up.id).await;
    assert!(matches!(again, Err(FuelError::FillUpNotFound)));
}
