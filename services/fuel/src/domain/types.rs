use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::field::{FieldError, Numeric, optional, required};
use hearth_domain::id::{TenantId, UserId};

pub const MAKE_MAX: usize = 100;
pub const MODEL_MAX: usize = 100;
pub const VIN_MAX: usize = 17;
pub const LICENSE_PLATE_MAX: usize = 20;
pub const FUEL_GRADE_MAX: usize = 50;
pub const GAS_STATION_MAX: usize = 200;
pub const NOTES_MAX: usize = 1000;

/// Column shapes of the stored figures.
pub const ODOMETER: Numeric = Numeric::new(10, 1);
pub const GALLONS: Numeric = Numeric::new(10, 3);
pub const PRICE_PER_GALLON: Numeric = Numeric::new(10, 3);
/// Tank capacity, EPA ratings and every MPG figure.
pub const MPG: Numeric = Numeric::new(10, 2);
pub const MONEY: Numeric = Numeric::new(18, 2);
pub const COST_PER_MILE: Numeric = Numeric::new(10, 4);

pub const MIN_MODEL_YEAR: i32 = 1886;
pub const MAX_MODEL_YEAR: i32 = 2100;

// ── Vehicle ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub tank_capacity: Option<Decimal>,
    pub epa_city_mpg: Option<Decimal>,
    pub epa_highway_mpg: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Retire the vehicle. New fill-ups are refused until it is reactivated.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.updated_at = now;
    }

    pub fn reactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.updated_at = now;
    }
}

/// Mean MPG over the fill-ups that have one, 2 dp. `None` when none do.
pub fn overall_mpg(fill_ups: &[FillUp]) -> Option<Decimal> {
    let readings: Vec<Decimal> = fill_ups.iter().filter_map(|f| f.miles_per_gallon).collect();
    if readings.is_empty() {
        return None;
    }
    let sum: Decimal = readings.iter().sum();
    Some((sum / Decimal::from(readings.len())).round_dp(2))
}

// ── Fill-up ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FillUp {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub vehicle_id: Uuid,
    pub fill_up_date: DateTime<Utc>,
    pub odometer: Decimal,
    pub gallons: Decimal,
    pub price_per_gallon: Decimal,
    pub total_cost: Decimal,
    pub is_full_tank: bool,
    pub fuel_grade: Option<String>,
    pub gas_station: Option<String>,
    pub miles_per_gallon: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `gallons * price_per_gallon`, unrounded. `None` on overflow.
pub fn total_cost(gallons: Decimal, price_per_gallon: Decimal) -> Option<Decimal> {
    gallons.checked_mul(price_per_gallon)
}

/// Miles per gallon since the previous reading, 2 dp.
///
/// `None` unless fuel was added and the odometer moved forward.
pub fn mpg_since(
    odometer: Decimal,
    gallons: Decimal,
    previous_odometer: Decimal,
) -> Option<Decimal> {
    if gallons <= Decimal::ZERO || odometer <= previous_odometer {
        return None;
    }
    let miles = odometer.checked_sub(previous_odometer)?;
    Some(miles.checked_div(gallons)?.round_dp(2))
}

// ── Efficiency report ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyReport {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: ReportTotals,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Figures of an efficiency report over a set of fill-ups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportTotals {
    pub total_miles: Decimal,
    pub total_gallons: Decimal,
    pub average_mpg: Decimal,
    pub total_fuel_cost: Decimal,
    pub cost_per_mile: Decimal,
    pub number_of_fill_ups: i32,
    pub best_mpg: Option<Decimal>,
    pub worst_mpg: Option<Decimal>,
}

impl ReportTotals {
    /// Aggregate `fill_ups` over a distance of `total_miles`.
    ///
    /// Best and worst only consider fill-ups that carry an MPG reading. Fails when a
    /// figure does not fit its column.
    pub fn generate(total_miles: Decimal, fill_ups: &[FillUp]) -> Result<Self, ValidationError> {
        let total_miles = ODOMETER.fit("total_miles", total_miles)?;
        let total_gallons = checked_sum("total_gallons", GALLONS, fill_ups.iter().map(|f| f.gallons))?;
        let total_fuel_cost =
            checked_sum("total_fuel_cost", MONEY, fill_ups.iter().map(|f| f.total_cost))?;
        let readings = fill_ups.iter().filter_map(|f| f.miles_per_gallon);
        Ok(Self {
            total_miles,
            total_gallons,
            average_mpg: average_mpg(total_miles, total_gallons)?,
            total_fuel_cost,
            cost_per_mile: cost_per_mile(total_fuel_cost, total_miles)?,
            number_of_fill_ups: i32::try_from(fill_ups.len()).unwrap_or(i32::MAX),
            best_mpg: readings.clone().max(),
            worst_mpg: readings.min(),
        })
    }
}

fn out_of_range(field: &'static str, column: Numeric) -> ValidationError {
    FieldError::OutOfRange {
        field,
        max: column.max(),
    }
    .into()
}

fn checked_sum(
    field: &'static str,
    column: Numeric,
    values: impl Iterator<Item = Decimal>,
) -> Result<Decimal, ValidationError> {
    let mut total = Decimal::ZERO;
    for value in values {
        total = total
            .checked_add(value)
            .ok_or_else(|| out_of_range(field, column))?;
    }
    Ok(column.fit(field, total)?)
}

/// `miles / gallons`, 2 dp; zero when no fuel was bought.
pub fn average_mpg(total_miles: Decimal, total_gallons: Decimal) -> Result<Decimal, ValidationError> {
    if total_gallons <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let mpg = total_miles
        .checked_div(total_gallons)
        .ok_or_else(|| out_of_range("average_mpg", MPG))?;
    Ok(MPG.fit("average_mpg", mpg.round_dp(2))?)
}

/// `cost / miles`, 4 dp; zero when nothing was driven.
pub fn cost_per_mile(
    total_fuel_cost: Decimal,
    total_miles: Decimal,
) -> Result<Decimal, ValidationError> {
    if total_miles <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let cost = total_fuel_cost
        .checked_div(total_miles)
        .ok_or_else(|| out_of_range("cost_per_mile", COST_PER_MILE))?;
    Ok(COST_PER_MILE.fit("cost_per_mile", cost.round_dp(4))?)
}

/// Distance covered by fill-ups: highest minus lowest odometer reading.
pub fn distance_covered(fill_ups: &[FillUp]) -> Decimal {
    let lowest = fill_ups.iter().map(|f| f.odometer).min();
    let highest = fill_ups.iter().map(|f| f.odometer).max();
    match (lowest, highest) {
        (Some(lo), Some(hi)) => hi - lo,
        _ => Decimal::ZERO,
    }
}

/// UTC instants covering the inclusive date range: `[start 00:00, end+1 00:00)`.
pub fn date_range_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let from = start.and_time(NaiveTime::MIN).and_utc();
    let to = end.and_time(NaiveTime::MIN).and_utc() + Duration::days(1);
    (from, to)
}

// ── Validation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("year must be between 1886 and 2100")]
    YearOutOfRange,
    #[error("end_date must not be before start_date")]
    EndBeforeStart,
}

/// Bring `value` to `column` and require the stored value to be above zero.
pub fn validate_positive(
    field: &'static str,
    value: Decimal,
    column: Numeric,
) -> Result<Decimal, ValidationError> {
    let stored = column.fit(field, value)?;
    if stored <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(stored)
}

pub fn validate_non_negative(
    field: &'static str,
    value: Decimal,
    column: Numeric,
) -> Result<Decimal, ValidationError> {
    let stored = column.fit(field, value)?;
    if stored < Decimal::ZERO {
        return Err(ValidationError::Negative { field });
    }
    Ok(stored)
}

pub fn validate_optional_positive(
    field: &'static str,
    value: Option<Decimal>,
    column: Numeric,
) -> Result<Option<Decimal>, ValidationError> {
    value.map(|v| validate_positive(field, v, column)).transpose()
}

/// Fit a derived figure into `column`. `None` stands for an overflowed computation.
pub fn fit_derived(
    field: &'static str,
    value: Option<Decimal>,
    column: Numeric,
) -> Result<Decimal, ValidationError> {
    let value = value.ok_or_else(|| out_of_range(field, column))?;
    Ok(column.fit(field, value)?)
}

pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    if !(MIN_MODEL_YEAR..=MAX_MODEL_YEAR).contains(&year) {
        return Err(ValidationError::YearOutOfRange);
    }
    Ok(())
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::EndBeforeStart);
    }
    Ok(())
}

pub fn text(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    Ok(required(field, value, max)?)
}

pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    Ok(optional(field, value, max)?)
}
