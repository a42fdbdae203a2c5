use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::{PageRequest, Sort};
use hearth_hydration::domain::repository::{GoalRepository, IntakeRepository, ReminderRepository};
use hearth_hydration::domain::types::{
    BeverageType, Goal, Intake, IntakeFilter, IntakeSortBy, Reminder,
};
use hearth_hydration::error::HydrationError;
use hearth_outbox::OutboxEvent;

pub type Events = Arc<Mutex<Vec<OutboxEvent>>>;

pub fn owner() -> (TenantId, UserId) {
    (TenantId(Uuid::new_v4()), UserId(Uuid::new_v4()))
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn test_intake(
    tenant_id: TenantId,
    user_id: UserId,
    amount_ml: i64,
    intake_time: DateTime<Utc>,
) -> Intake {
    Intake {
        id: Uuid::now_v7(),
        tenant_id,
        user_id,
        beverage_type: BeverageType::Water,
        amount_ml: Decimal::from(amount_ml),
        intake_time,
        notes: None,
        created_at: intake_time,
        updated_at: intake_time,
    }
}

pub fn test_goal(
    tenant_id: TenantId,
    user_id: UserId,
    daily_goal_ml: i64,
    start_date: NaiveDate,
) -> Goal {
    let created = Utc::now();
    Goal {
        id: Uuid::now_v7(),
        tenant_id,
        user_id,
        daily_goal_ml: Decimal::from(daily_goal_ml),
        start_date,
        end_date: None,
        is_active: true,
        notes: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn test_reminder(tenant_id: TenantId, user_id: UserId, hour: u32, enabled: bool) -> Reminder {
    let created = Utc::now();
    Reminder {
        id: Uuid::now_v7(),
        tenant_id,
        user_id,
        reminder_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        message: "Drink a glass of water".to_owned(),
        is_enabled: enabled,
        created_at: created,
        updated_at: created,
    }
}

// ── MockIntakeRepo ───────────────────────────────────────────────────────────

pub struct MockIntakeRepo {
    pub intakes: Arc<Mutex<Vec<Intake>>>,
    pub events: Events,
}

impl MockIntakeRepo {
    pub fn new(intakes: Vec<Intake>) -> Self {
        Self {
            intakes: Arc::new(Mutex::new(intakes)),
            events: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn intakes_handle(&self) -> Arc<Mutex<Vec<Intake>>> {
        Arc::clone(&self.intakes)
    }

    pub fn events_handle(&self) -> Events {
        Arc::clone(&self.events)
    }
}

impl IntakeRepository for MockIntakeRepo {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        filter: &IntakeFilter,
        sort_by: IntakeSortBy,
        page: PageRequest,
    ) -> Result<Vec<Intake>, HydrationError> {
        let mut items: Vec<Intake> = self
            .intakes
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.tenant_id == tenant_id && i.user_id == user_id)
            .filter(|i| filter.from.is_none_or(|from| i.intake_time >= from))
            .filter(|i| filter.to.is_none_or(|to| i.intake_time < to))
            .filter(|i| {
                filter
                    .beverage_type
                    .is_none_or(|b| i.beverage_type == b)
            })
            .cloned()
            .collect();
        match sort_by {
            IntakeSortBy::IntakeTime(Sort::Desc) => {
                items.sort_by(|a, b| b.intake_time.cmp(&a.intake_time))
            }
            IntakeSortBy::IntakeTime(Sort::Asc) => {
                items.sort_by(|a, b| a.intake_time.cmp(&b.intake_time))
            }
        }
        Ok(items
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn list_between(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Intake>, HydrationError> {
        Ok(self
            .intakes
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.tenant_id == tenant_id && i.user_id == user_id)
            .filter(|i| i.intake_time >= from && i.intake_time < to)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Intake>, HydrationError> {
        Ok(self
            .intakes
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id && i.tenant_id == tenant_id && i.user_id == user_id)
            .cloned())
    }

    async fn create(&self, intake: &Intake, event: &OutboxEvent) -> Result<(), HydrationError> {
        self.intakes.lock().unwrap().push(intake.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn update(&self, intake: &Intake, event: &OutboxEvent) -> Result<(), HydrationError> {
        let mut intakes = self.intakes.lock().unwrap();
        if let Some(existing) = intakes.iter_mut().find(|i| i.id == intake.id) {
            *existing = intake.clone();
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError> {
        let mut intakes = self.intakes.lock().unwrap();
        let before = intakes.len();
        intakes.retain(|i| !(i.id == id && i.tenant_id == tenant_id && i.user_id == user_id));
        if intakes.len() == before {
            return Ok(false);
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(true)
    }
}

// ── MockGoalRepo ─────────────────────────────────────────────────────────────

pub struct MockGoalRepo {
    pub goals: Arc<Mutex<Vec<Goal>>>,
    pub events: Events,
}

impl MockGoalRepo {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self {
            goals: Arc::new(Mutex::new(goals)),
            events: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn events_handle(&self) -> Events {
        Arc::clone(&self.events)
    }
}

impl GoalRepository for MockGoalRepo {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Goal>, HydrationError> {
        let mut goals: Vec<Goal> = self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.tenant_id == tenant_id && g.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(goals
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn list_active(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
    ) -> Result<Vec<Goal>, HydrationError> {
        let mut goals: Vec<Goal> = self
            .goals
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.tenant_id == tenant_id && g.user_id == user_id && g.is_active)
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(goals)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Goal>, HydrationError> {
        Ok(self
            .goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id && g.tenant_id == tenant_id && g.user_id == user_id)
            .cloned())
    }

    async fn create(&self, goal: &Goal, event: &OutboxEvent) -> Result<(), HydrationError> {
        self.goals.lock().unwrap().push(goal.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn update(&self, goal: &Goal, event: &OutboxEvent) -> Result<(), HydrationError> {
        let mut goals = self.goals.lock().unwrap();
        if let Some(existing) = goals.iter_mut().find(|g| g.id == goal.id) {
            *existing = goal.clone();
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError> {
        let mut goals = self.goals.lock().unwrap();
        let before = goals.len();
        goals.retain(|g| !(g.id == id && g.tenant_id == tenant_id && g.user_id == user_id));
        if goals.len() == before {
            return Ok(false);
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(true)
    }
}

// ── MockReminderRepo ─────────────────────────────────────────────────────────

pub struct MockReminderRepo {
    pub reminders: Arc<Mutex<Vec<Reminder>>>,
    pub events: Events,
}

impl MockReminderRepo {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self {
            reminders: Arc::new(Mutex::new(reminders)),
            events: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn reminders_handle(&self) -> Arc<Mutex<Vec<Reminder>>> {
        Arc::clone(&self.reminders)
    }

    pub fn events_handle(&self) -> Events {
        Arc::clone(&self.events)
    }
}

impl ReminderRepository for MockReminderRepo {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        enabled_only: bool,
    ) -> Result<Vec<Reminder>, HydrationError> {
        let mut reminders: Vec<Reminder> = self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.tenant_id == tenant_id && r.user_id == user_id)
            .filter(|r| !enabled_only || r.is_enabled)
            .cloned()
            .collect();
        reminders.sort_by_key(|r| r.reminder_time);
        Ok(reminders)
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Reminder>, HydrationError> {
        Ok(self
            .reminders
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.tenant_id == tenant_id && r.user_id == user_id)
            .cloned())
    }

    async fn create(
        &self,
        reminder: &Reminder,
        event: &OutboxEvent,
    ) -> Result<(), HydrationError> {
        self.reminders.lock().unwrap().push(reminder.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn update(
        &self,
        reminder: &Reminder,
        event: &OutboxEvent,
    ) -> Result<(), HydrationError> {
        let mut reminders = self.reminders.lock().unwrap();
        if let Some(existing) = reminders.iter_mut().find(|r| r.id == reminder.id) {
            *existing = reminder.clone();
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, HydrationError> {
        let mut reminders = self.reminders.lock().unwrap();
        let before = reminders.len();
        reminders.retain(|r| !(r.id == id && r.tenant_id == tenant_id && r.user_id == user_id));
        if reminders.len() == before {
            return Ok(false);
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(true)
    }
}
