use hearth_domain::pagination::PageRequest;
use hearth_fuel::error::FuelError;
use hearth_fuel::usecase::vehicle::{
    CreateVehicleUseCase, DeleteVehicleUseCase, GetVehicleUseCase, ListVehiclesUseCase,
    SetVehicleActiveUseCase, UpdateVehicleUseCase, VehicleInput,
};
use uuid::Uuid;

use crate::helpers::{
    MockFillUpRepo, MockVehicleRepo, at, dec, owner, test_fill_up, test_vehicle,
};

fn input(make: &str, year: i32) -> VehicleInput {
    VehicleInput {
        make: make.to_owned(),
        model: " Corolla ".to_owned(),
        year,
        vin: Some("  ".to_owned()),
        license_plate: Some("ABC-123".to_owned()),
        tank_capacity: Some(dec("13.2")),
        epa_city_mpg: Some(dec("30")),
        epa_highway_mpg: Some(dec("38")),
    }
}

#[tokio::test]
async fn should_create_active_vehicle_and_record_event() {
    let (tenant_id, user_id) = owner();
    let repo = MockVehicleRepo::empty();
    let events = repo.events_handle();
    let usecase = CreateVehicleUseCase { repo };

    let vehicle = usecase
        .execute(tenant_id, user_id, input("Toyota", 2020))
        .await
        .unwrap();

    assert!(vehicle.is_active);
    assert_eq!(vehicle.model, "Corolla");
    assert_eq!(vehicle.vin, None);
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "vehicle.saved");
    assert_eq!(events[0].aggregate_id, vehicle.id);
}

#[tokio::test]
async fn should_reject_year_before_first_automobile() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateVehicleUseCase {
        repo: MockVehicleRepo::empty(),
    };

    let result = usecase
        .execute(tenant_id, user_id, input("Benz", 1885))
        .await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
}

#[tokio::test]
async fn should_store_ratings_at_column_scale() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateVehicleUseCase {
        repo: MockVehicleRepo::empty(),
    };
    let mut input = input("Toyota", 2020);
    input.tank_capacity = Some(dec("13.205"));

    let vehicle = usecase.execute(tenant_id, user_id, input).await.unwrap();

    assert_eq!(vehicle.tank_capacity, Some(dec("13.21")));
}

#[tokio::test]
async fn should_reject_rating_beyond_the_column() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateVehicleUseCase {
        repo: MockVehicleRepo::empty(),
    };
    let mut input = input("Toyota", 2020);
    input.epa_city_mpg = Some(dec("100000000"));

    let result = usecase.execute(tenant_id, user_id, input).await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
}

#[tokio::test]
async fn should_reject_blank_make() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateVehicleUseCase {
        repo: MockVehicleRepo::empty(),
    };

    let result = usecase.execute(tenant_id, user_id, input("  ", 2020)).await;

    assert!(matches!(result, Err(FuelError::InvalidInput(_))));
}

#[tokio::test]
async fn should_hide_inactive_vehicles_unless_requested() {
    let (tenant_id, user_id) = owner();
    let active = test_vehicle(tenant_id, user_id, "Honda", true);
    let retired = test_vehicle(tenant_id, user_id, "Ford", false);
    let usecase = ListVehiclesUseCase {
        repo: MockVehicleRepo::new(vec![active.clone(), retired.clone()]),
    };

    let visible = usecase
        .execute(tenant_id, user_id, false, PageRequest::default())
        .await
        .unwrap();
    let all = usecase
        .execute(tenant_id, user_id, true, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(visible.iter().map(|v| v.id).collect::<Vec<_>>(), vec![active.id]);
    assert_eq!(
        all.iter().map(|v| v.id).collect::<Vec<_>>(),
        vec![retired.id, active.id]
    );
}

#[tokio::test]
async fn should_not_list_another_users_vehicles() {
    let (tenant_id, user_id) = owner();
    let (_, other_user) = owner();
    let usecase = ListVehiclesUseCase {
        repo: MockVehicleRepo::new(vec![test_vehicle(tenant_id, other_user, "Kia", true)]),
    };

    let vehicles = usecase
        .execute(tenant_id, user_id, true, PageRequest::default())
        .await
        .unwrap();

    assert!(vehicles.is_empty());
}

#[tokio::test]
async fn should_include_fill_up_figures_in_details() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let fill_ups = vec![
        test_fill_up(&vehicle, "1000", "10", None, at(2026, 1, 1)),
        test_fill_up(&vehicle, "1300", "10", Some("30"), at(2026, 1, 8)),
        test_fill_up(&vehicle, "1550", "10", Some("25"), at(2026, 1, 15)),
    ];
    let usecase = GetVehicleUseCase {
        vehicles: MockVehicleRepo::new(vec![vehicle.clone()]),
        fill_ups: MockFillUpRepo::new(fill_ups),
    };

    let details = usecase
        .execute(tenant_id, user_id, vehicle.id)
        .await
        .unwrap();

    assert_eq!(details.fill_up_count, 3);
    assert_eq!(details.overall_mpg, Some(dec("27.5")));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_vehicle() {
    let (tenant_id, user_id) = owner();
    let usecase = GetVehicleUseCase {
        vehicles: MockVehicleRepo::empty(),
        fill_ups: MockFillUpRepo::empty(),
    };

    let result = usecase.execute(tenant_id, user_id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(FuelError::VehicleNotFound)));
}

#[tokio::test]
async fn should_update_vehicle_fields() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let repo = MockVehicleRepo::new(vec![vehicle.clone()]);
    let stored = repo.vehicles_handle();
    let usecase = UpdateVehicleUseCase { repo };

    let updated = usecase
        .execute(tenant_id, user_id, vehicle.id, input("Toyota", 2021))
        .await
        .unwrap();

    assert_eq!(updated.make, "Toyota");
    assert_eq!(updated.year, 2021);
    assert_eq!(stored.lock().unwrap()[0].make, "Toyota");
}

#[tokio::test]
async fn should_deactivate_once_and_ignore_repeat() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let repo = MockVehicleRepo::new(vec![vehicle.clone()]);
    let events = repo.events_handle();
    let usecase = SetVehicleActiveUseCase { repo };

    let first = usecase
        .execute(tenant_id, user_id, vehicle.id, false)
        .await
        .unwrap();
    let second = usecase
        .execute(tenant_id, user_id, vehicle.id, false)
        .await
        .unwrap();

    assert!(!first.is_active);
    assert!(!second.is_active);
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "vehicle.status_changed");
    assert_eq!(events[0].payload["is_active"], false);
}

#[tokio::test]
async fn should_reactivate_inactive_vehicle() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", false);
    let usecase = SetVehicleActiveUseCase {
        repo: MockVehicleRepo::new(vec![vehicle.clone()]),
    };

    let reactivated = usecase
        .execute(tenant_id, user_id, vehicle.id, true)
        .await
        .unwrap();

    assert!(reactivated.is_active);
}

#[tokio::test]
async fn should_delete_vehicle_then_report_not_found() {
    let (tenant_id, user_id) = owner();
    let vehicle = test_vehicle(tenant_id, user_id, "Honda", true);
    let usecase = DeleteVehicleUseCase {
        repo: MockVehicleRepo::new(vec![vehicle.clone()]),
    };

    usecase
        .execute(tenant_id, user_id, vehicle.id)
        .await
        .unwrap();
    let again = usecase.execute(tenant_id, user_id, vehicle.id).await;

    assert!(matches!(again, Err(FuelError::VehicleNotFound)));
}
