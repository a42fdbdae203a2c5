use chrono::NaiveTime;
use uuid::Uuid;

use hearth_hydration::error::HydrationError;
use hearth_hydration::usecase::reminder::{
    CreateReminderUseCase, DeleteReminderUseCase, ListRemindersUseCase, ReminderInput,
    ToggleReminderUseCase,
};

use crate::helpers::{MockReminderRepo, owner, test_reminder};

#[tokio::test]
async fn should_create_reminder_with_trimmed_message() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateReminderUseCase {
        repo: MockReminderRepo::empty(),
    };

    let reminder = usecase
        .execute(
            tenant_id,
            user_id,
            ReminderInput {
                reminder_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
                message: "  Refill the bottle ".to_owned(),
                is_enabled: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(reminder.message, "Refill the bottle");
}

#[tokio::test]
async fn should_reject_blank_message() {
    let (tenant_id, user_id) = owner();
    let usecase = CreateReminderUseCase {
        repo: MockReminderRepo::empty(),
    };

    let result = usecase
        .execute(
            tenant_id,
            user_id,
            ReminderInput {
                reminder_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
                message: "   ".to_owned(),
                is_enabled: true,
            },
        )
        .await;

    assert!(matches!(result, Err(HydrationError::InvalidInput(_))));
}

#[tokio::test]
async fn should_list_enabled_reminders_by_time_of_day() {
    let (tenant_id, user_id) = owner();
    let afternoon = test_reminder(tenant_id, user_id, 15, true);
    let morning = test_reminder(tenant_id, user_id, 9, true);
    let disabled = test_reminder(tenant_id, user_id, 12, false);
    let usecase = ListRemindersUseCase {
        repo: MockReminderRepo::new(vec![afternoon.clone(), disabled, morning.clone()]),
    };

    let reminders = usecase.execute(tenant_id, user_id, true).await.unwrap();

    assert_eq!(
        reminders.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![morning.id, afternoon.id]
    );
}

#[tokio::test]
async fn should_toggle_reminder_twice_back_to_original() {
    let (tenant_id, user_id) = owner();
    let reminder = test_reminder(tenant_id, user_id, 9, true);
    let repo = MockReminderRepo::new(vec![reminder.clone()]);
    let events = repo.events_handle();
    let usecase = ToggleReminderUseCase { repo };

    let first = usecase
        .execute(tenant_id, user_id, reminder.id)
        .await
        .unwrap();
    let second = usecase
        .execute(tenant_id, user_id, reminder.id)
        .await
        .unwrap();

    assert!(!first.is_enabled);
    assert!(second.is_enabled);
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.kind == "reminder.toggled"));
    assert_eq!(events[0].payload["is_enabled"], false);
}

#[tokio::test]
async fn should_return_not_found_when_toggling_foreign_reminder() {
    let (tenant_id, user_id) = owner();
    let (_, other_user) = owner();
    let reminder = test_reminder(tenant_id, user_id, 9, true);
    let usecase = ToggleReminderUseCase {
        repo: MockReminderRepo::new(vec![reminder.clone()]),
    };

    let result = usecase.execute(tenant_id, other_user, reminder.id).await;

    assert!(matches!(result, Err(HydrationError::ReminderNotFound)));
}

#[tokio::test]
async fn should_delete_reminder() {
    let (tenant_id, user_id) = owner();
    let reminder = test_reminder(tenant_id, user_id, 9, true);
    let repo = MockReminderRepo::new(vec![reminder.clone()]);
    let reminders = repo.reminders_handle();
    let usecase = DeleteReminderUseCase { repo };

    usecase
        .execute(tenant_id, user_id, reminder.id)
        .await
        .unwrap();
    let again = usecase.execute(tenant_id, user_id, Uuid::new_v4()).await;

    assert!(reminders.lock().unwrap().is_empty());
    assert!(matches!(again, Err(HydrationError::ReminderNotFound)));
}
