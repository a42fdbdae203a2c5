use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use hearth_domain::field::{FieldError, Numeric, optional, required};
use hearth_domain::id::{TenantId, UserId};

pub const NAME_MAX: usize = 200;
pub const LOCATION_MAX: usize = 300;
pub const WEATHER_MAX: usize = 100;
pub const NOTES_MAX: usize = 1000;

pub const MIN_HOLE_PAR: i32 = 3;
pub const MAX_HOLE_PAR: i32 = 6;
pub const MAX_HOLE_SCORE: i32 = 20;
pub const MAX_PUTTS: i32 = 20;
pub const MAX_COURSE_PAR: i32 = MAX_HOLE_PAR * 18;
pub const MAX_ROUND_SCORE: i32 = MAX_HOLE_SCORE * 18;
pub const MAX_SLOPE_RATING: i32 = 155;
pub const COURSE_RATING: Numeric = Numeric::new(4, 1);

// ── Course ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    pub location: Option<String>,
    pub number_of_holes: i32,
    pub total_par: i32,
    pub course_rating: Option<Decimal>,
    pub slope_rating: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn has_hole(&self, hole_number: i32) -> bool {
        (1..=self.number_of_holes).contains(&hole_number)
    }
}

// ── Round ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: UserId,
    pub course_id: Uuid,
    pub played_date: NaiveDate,
    pub total_score: i32,
    pub total_par: i32,
    pub weather: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Round {
    pub fn score_to_par(&self) -> i32 {
        self.total_score - self.total_par
    }

    pub fn apply_totals(&mut self, totals: RoundTotals, now: DateTime<Utc>) {
        self.total_score = totals.total_score;
        self.total_par = totals.total_par;
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTotals {
    pub total_score: i32,
    pub total_par: i32,
}

impl RoundTotals {
    /// Sum the recorded holes. With no holes left the round falls back to the
    /// course par and a zero score.
    pub fn from_holes(holes: &[HoleScore], course_par: i32) -> Self {
        if holes.is_empty() {
            return Self {
                total_score: 0,
                total_par: course_par,
            };
        }
        Self {
            total_score: sum(holes.iter().map(|h| h.score)),
            total_par: sum(holes.iter().map(|h| h.par)),
        }
    }
}

// ── Hole score ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct HoleScore {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub round_id: Uuid,
    pub hole_number: i32,
    pub par: i32,
    pub score: i32,
    pub putts: Option<i32>,
    pub fairway_hit: bool,
    pub green_in_regulation: bool,
    pub created_at: DateTime<Utc>,
}

impl HoleScore {
    pub fn score_to_par(&self) -> i32 {
        self.score - self.par
    }

    pub fn outcome(&self) -> HoleOutcome {
        HoleOutcome::from_score_to_par(self.score_to_par())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleOutcome {
    AlbatrossOrBetter,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogeyOrWorse,
}

impl HoleOutcome {
    pub fn from_score_to_par(diff: i32) -> Self {
        match diff {
            i32::MIN..=-3 => Self::AlbatrossOrBetter,
            -2 => Self::Eagle,
            -1 => Self::Birdie,
            0 => Self::Par,
            1 => Self::Bogey,
            _ => Self::DoubleBogeyOrWorse,
        }
    }
}

fn sum(values: impl Iterator<Item = i32>) -> i32 {
    values.fold(0, i32::saturating_add)
}

/// Replace the hole with the same number, or add it, keeping hole order.
pub fn merge_hole(holes: &mut Vec<HoleScore>, hole: HoleScore) {
    match holes.iter_mut().find(|h| h.hole_number == hole.hole_number) {
        Some(existing) => *existing = hole,
        None => {
            holes.push(hole);
            holes.sort_by_key(|h| h.hole_number);
        }
    }
}

// ── Scorecard ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub round: Round,
    pub course: Course,
    pub holes: Vec<HoleScore>,
    pub stats: ScorecardStats,
}

impl Scorecard {
    pub fn new(round: Round, course: Course, holes: Vec<HoleScore>) -> Self {
        let stats = ScorecardStats::from_holes(&holes);
        Self {
            round,
            course,
            holes,
            stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScorecardStats {
    pub total_par: i32,
    pub total_score: i32,
    pub total_putts: i32,
    pub fairway_hits: i32,
    pub greens_in_regulation: i32,
    /// 1 dp, zero when no holes are recorded.
    pub fairway_hit_percentage: Decimal,
    pub gir_percentage: Decimal,
    /// Mean over holes with a putt count, 1 dp.
    pub average_putts: Option<Decimal>,
}

impl ScorecardStats {
    pub fn from_holes(holes: &[HoleScore]) -> Self {
        let count = |pred: fn(&HoleScore) -> bool| -> i32 {
            i32::try_from(holes.iter().filter(|h| pred(h)).count()).unwrap_or(i32::MAX)
        };
        let fairway_hits = count(|h| h.fairway_hit);
        let greens_in_regulation = count(|h| h.green_in_regulation);
        let putts: Vec<i32> = holes.iter().filter_map(|h| h.putts).collect();
        let holes_played = holes.len();
        Self {
            total_par: sum(holes.iter().map(|h| h.par)),
            total_score: sum(holes.iter().map(|h| h.score)),
            total_putts: sum(putts.iter().copied()),
            fairway_hits,
            greens_in_regulation,
            fairway_hit_percentage: percentage(fairway_hits, holes_played),
            gir_percentage: percentage(greens_in_regulation, holes_played),
            average_putts: (!putts.is_empty()).then(|| {
                (Decimal::from(sum(putts.iter().copied())) / Decimal::from(putts.len()))
                    .round_dp(1)
            }),
        }
    }
}

fn percentage(hits: i32, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(hits) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(1)
}

// ── Validation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("number_of_holes must be 9 or 18")]
    HoleCount,
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must be at most {max}")]
    AboveMax { field: &'static str, max: i32 },
    #[error("par must be between 3 and 6")]
    HoleParOutOfRange,
    #[error("hole_number must be between 1 and {holes}")]
    HoleOutOfRange { holes: i32 },
}

pub fn validate_hole_count(number_of_holes: i32) -> Result<(), ValidationError> {
    if number_of_holes != 9 && number_of_holes != 18 {
        return Err(ValidationError::HoleCount);
    }
    Ok(())
}

pub fn validate_positive(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

pub fn validate_non_negative(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub fn validate_at_most(field: &'static str, value: i32, max: i32) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::AboveMax { field, max });
    }
    Ok(())
}

/// The rating as stored: one decimal place, above zero.
pub fn validate_course_rating(value: Option<Decimal>) -> Result<Option<Decimal>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let field = "course_rating";
    let stored = COURSE_RATING.fit(field, value)?;
    if stored <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(Some(stored))
}

pub fn validate_hole_par(par: i32) -> Result<(), ValidationError> {
    if !(MIN_HOLE_PAR..=MAX_HOLE_PAR).contains(&par) {
        return Err(ValidationError::HoleParOutOfRange);
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
