use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::pagination::{PageRequest, Sort};
use hearth_hydration::domain::types::{BeverageType, IntakeFilter, IntakeSortBy};
use hearth_hydration::error::HydrationError;
use hearth_hydration::usecase::intake::{
    CreateIntakeUseCase, DeleteIntakeUseCase, GetIntakeUseCase, IntakeInput, ListIntakesUseCase,
    UpdateIntakeUseCase,
};

use crate::helpers::{MockIntakeRepo, at, owner, test_intake};

fn input(amount_ml: i64) -> IntakeInput {
    IntakeInput {
        beverage_type: BeverageType::Tea,
        amount_ml: Decimal::from(amount_ml),
        intake_time: Some(at(2026, 3, 1, 9)),
        notes: Some("  morning cup  ".to_owned()),
    }
}

// ── CreateIntakeUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_intake_and_record_event() {
    let (tenant_id, user_id) = owner();
    let repo = MockIntakeRepo::empty();
    let intakes = repo.intakes_handle();
    let events = repo.events_handle();
    let usecase = CreateIntakeUseCase { repo };

    let intake = usecase
        .execute(tenant_id, user_id, input(250))
        .await
        .unwrap();

    assert_eq!(intake.tenant_id, tenant_id);
    assert_eq!(intake.notes.as_deref(), Some("morning cup"));
    assert_eq!(intakes.lock().unwrap().len(), 1);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, "intake.saved");
    assert_eq!(events[0].tenant_id, tenant_id);
    assert_eq!(events[0].aggregate_id, intake.id);
    assert_eq!(events[0].payload["created"], true);
}

#[tokio::test]
async fn should_reject_amount_beyond_the_column() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateIntakeUseCase {
        repo: MockIntakeRepo::empty(),
    };

    let result = usecase.execute(tenant_id, user_id, input(100_000_000)).await;

    assert!(matches!(result, Err(HydrationError::InvalidInput(_))));
}

#[tokio::test]
async fn should_reject_non_positive_amount() {
    let (tenant_id, user_id) = owner();
    let repo = MockIntakeRepo::empty();
    let events = repo.events_handle();
    let usecase = CreateIntakeUseCase { repo };

    let result = usecase.execute(tenant_id, user_id, input(0)).await;

    assert!(
        matches!(result, Err(HydrationError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_default_intake_time_to_now() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateIntakeUseCase {
        repo: MockIntakeRepo::empty(),
    };
    let mut body = input(100);
    body.intake_time = None;

    let intake = usecase.execute(tenant_id, user_id, body).await.unwrap();

    assert_eq!(intake.intake_time, intake.created_at);
}

// ── ListIntakesUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_callers_intakes_newest_first() {
    let (tenant_id, user_id) = owner();
    let (other_tenant, other_user) = owner();
    let older = test_intake(tenant_id, user_id, 200, at(2026, 3, 1, 8));
    let newer = test_intake(tenant_id, user_id, 300, at(2026, 3, 1, 12));
    let foreign = test_intake(other_tenant, other_user, 400, at(2026, 3, 1, 10));
    let usecase = ListIntakesUseCase {
        repo: MockIntakeRepo::new(vec![older.clone(), newer.clone(), foreign]),
    };

    let items = usecase
        .execute(
            tenant_id,
            user_id,
            IntakeFilter::default(),
            IntakeSortBy::default(),
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        items.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );
}

#[tokio::test]
async fn should_filter_by_range_and_sort_ascending() {
    let (tenant_id, user_id) = owner();
    let a = test_intake(tenant_id, user_id, 200, at(2026, 3, 1, 8));
    let b = test_intake(tenant_id, user_id, 300, at(2026, 3, 2, 8));
    let c = test_intake(tenant_id, user_id, 400, at(2026, 3, 3, 8));
    let usecase = ListIntakesUseCase {
        repo: MockIntakeRepo::new(vec![c, b.clone(), a.clone()]),
    };

    let items = usecase
        .execute(
            tenant_id,
            user_id,
            IntakeFilter {
                from: Some(at(2026, 3, 1, 0)),
                to: Some(at(2026, 3, 3, 0)),
                beverage_type: Some(BeverageType::Water),
            },
            IntakeSortBy::IntakeTime(Sort::Asc),
            PageRequest::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        items.iter().map(|i| i.id).collect::<Vec<_>>(),
        vec![a.id, b.id]
    );
}

#[tokio::test]
async fn should_reject_empty_range() {
    let (tenant_id, user_id) = owner();
    let usecase = ListIntakesUseCase {
        repo: MockIntakeRepo::empty(),
    };

    let result = usecase
        .execute(
            tenant_id,
            user_id,
            IntakeFilter {
                from: Some(at(2026, 3, 2, 0)),
                to: Some(at(2026, 3, 1, 0)),
                beverage_type: None,
            },
            IntakeSortBy::default(),
            PageRequest::default(),
        )
        .await;

    assert!(matches!(result, Err(HydrationError::InvalidInput(_))));
}

// ── Get / Update / Delete ────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_find_intake_of_another_tenant() {
    let (tenant_id, user_id) = owner();
    let (other_tenant, _) = owner();
    let intake = test_intake(tenant_id, user_id, 200, at(2026, 3, 1, 8));
    let usecase = GetIntakeUseCase {
        repo: MockIntakeRepo::new(vec![intake.clone()]),
    };

    let result = usecase.execute(other_tenant, user_id, intake.id).await;

    assert!(matches!(result, Err(HydrationError::IntakeNotFound)));
}

#[tokio::test]
async fn should_update_intake_and_keep_time_when_omitted() {
    let (tenant_id, user_id) = owner();
    let intake = test_intake(tenant_id, user_id, 200, at(2026, 3, 1, 8));
    let repo = MockIntakeRepo::new(vec![intake.clone()]);
    let events = repo.events_handle();
    let usecase = UpdateIntakeUseCase { repo };
    let mut body = input(500);
    body.intake_time = None;

    let updated = usecase
        .execute(tenant_id, user_id, intake.id, body)
        .await
        .unwrap();

    assert_eq!(updated.amount_ml, Decimal::from(500));
    assert_eq!(updated.beverage_type, BeverageType::Tea);
    assert_eq!(updated.intake_time, intake.intake_time);
    assert!(updated.updated_at > intake.updated_at);
    assert_eq!(events.lock().unwrap()[0].payload["created"], false);
}

#[tokio::test]
async fn should_delete_intake_and_record_event() {
    let (tenant_id, user_id) = owner();
    let intake = test_intake(tenant_id, user_id, 200, at(2026, 3, 1, 8));
    let repo = MockIntakeRepo::new(vec![intake.clone()]);
    let intakes = repo.intakes_handle();
    let events = repo.events_handle();
    let usecase = DeleteIntakeUseCase { repo };

    usecase.execute(tenant_id, user_id, intake.id).await.unwrap();

    assert!(intakes.lock().unwrap().is_empty());
    assert_eq!(events.lock().unwrap()[0].kind, "intake.deleted");
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_intake() {
    let (tenant_id, user_id) = owner();
    let repo = MockIntakeRepo::empty();
    let events = repo.events_handle();
    let usecase = DeleteIntakeUseCase { repo };

    let result = usecase.execute(tenant_id, user_id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(HydrationError::IntakeNotFound)));
    assert!(events.lock().unwrap().is_empty());
}
