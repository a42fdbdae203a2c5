use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_domain::field::{FieldError, Numeric, optional, required};
use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::Sort;

/// Millilitres to US fluid ounces.
pub const ML_TO_OZ: Decimal = Decimal::from_parts(33_814, 0, 0, false, 6);

/// `numeric(10, 2)`: intake amounts and daily goals in millilitres.
pub const VOLUME_ML: Numeric = Numeric::new(10, 2);

pub const NOTES_MAX: usize = 500;
pub const MESSAGE_MAX: usize = 200;

/// Convert a volume in millilitres to fluid ounces (unrounded).
pub fn ml_to_oz(ml: Decimal) -> Decimal {
    ml * ML_TO_OZ
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeverageType {
    Water,
    Coffee,
    Tea,
    Juice,
    Milk,
    Soda,
    SportsDrink,
    Other,
}

impl BeverageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Coffee => "coffee",
            Self::Tea => "tea",
            Self::Juice => "juice",
            Self::Milk => "milk",
            Self::Soda => "soda",
            Self::SportsDrink => "sports-drink",
            Self::Other => "other",
        }
    }
}

impl FromStr for BeverageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water" => Ok(Self::Water),
            "coffee" => Ok(Self::Coffee),
            "tea" => Ok(Self::Tea),
            "juice" => Ok(Self::Juice),
            "milk" => Ok(Self::Milk),
            "soda" => Ok(Self::Soda),
            "sports-drink" => Ok(Self::SportsDrink),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown beverage type: {other}")),
        }
    }
}

// ── Intake ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub beverage_type: BeverageType,
    pub amount_ml: Decimal,
    pub intake_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Intake {
    pub fn amount_oz(&self) -> Decimal {
        ml_to_oz(self.amount_ml)
    }
}

/// Sort order for `GET /intakes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSortBy {
    IntakeTime(Sort),
}

impl Default for IntakeSortBy {
    fn default() -> Self {
        Self::IntakeTime(Sort::Desc)
    }
}

impl IntakeSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "intake-time-desc" => Some(Self::IntakeTime(Sort::Desc)),
            "intake-time-asc" => Some(Self::IntakeTime(Sort::Asc)),
            _ => None,
        }
    }
}

/// Optional filters for listing intakes. `from` is inclusive, `to` exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub beverage_type: Option<BeverageType>,
}

// ── Goal ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub daily_goal_ml: Decimal,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn daily_goal_oz(&self) -> Decimal {
        ml_to_oz(self.daily_goal_ml)
    }

    /// Whether this goal applies on `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.is_active && self.start_date <= date && self.end_date.is_none_or(|end| date <= end)
    }
}

/// Pick the goal in force on `date`: the active goal covering it with the latest start.
pub fn goal_for_date(goals: &[Goal], date: NaiveDate) -> Option<&Goal> {
    goals
        .iter()
        .filter(|g| g.covers(date))
        .max_by_key(|g| (g.start_date, g.created_at))
}

// ── Reminder ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub reminder_time: NaiveTime,
    pub message: String,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// Flip `is_enabled`.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.is_enabled = !self.is_enabled;
        self.updated_at = now;
    }
}

// ── Daily summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub intake_count: usize,
    pub total_ml: Decimal,
    /// Rounded to 2 dp.
    pub total_oz: Decimal,
    pub goal_ml: Option<Decimal>,
    /// Percentage of the goal reached, 1 dp; zero without a goal.
    pub progress_percent: Decimal,
    pub goal_met: bool,
}

impl DailySummary {
    pub fn compute(date: NaiveDate, intakes: &[Intake], goal: Option<&Goal>) -> Self {
        let total_ml: Decimal = intakes.iter().map(|i| i.amount_ml).sum();
        let goal_ml = goal.map(|g| g.daily_goal_ml);
        let progress_percent = match goal_ml {
            Some(target) if target > Decimal::ZERO => {
                (total_ml / target * Decimal::ONE_HUNDRED).round_dp(1)
            }
            _ => Decimal::ZERO,
        };
        Self {
            date,
            intake_count: intakes.len(),
            total_ml,
            total_oz: ml_to_oz(total_ml).round_dp(2),
            goal_ml,
            progress_percent,
            goal_met: goal_ml.is_some_and(|target| total_ml >= target),
        }
    }
}

/// UTC bounds of a calendar day: `[start, end)`.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

// ── Validation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("end_date must not be before start_date")]
    EndBeforeStart,
    #[error("`from` must be before `to`")]
    EmptyRange,
}

/// Round a volume to the column scale and require the stored value to be above zero.
pub fn validate_volume(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    let stored = VOLUME_ML.fit(field, value)?;
    if stored <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(stored)
}

pub fn validate_notes(notes: Option<&str>) -> Result<Option<String>, ValidationError> {
    Ok(optional("notes", notes, NOTES_MAX)?)
}

pub fn validate_message(message: &str) -> Result<String, ValidationError> {
    Ok(required("message", message, MESSAGE_MAX)?)
}

pub fn validate_date_range(
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(ValidationError::EndBeforeStart),
        _ => Ok(()),
    }
}
