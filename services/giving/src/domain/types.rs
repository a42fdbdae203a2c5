use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hearth_domain::field::{FieldError, Numeric, optional, required};
use hearth_domain::id::TenantId;

pub const NAME_MAX: usize = 500;
pub const EIN_MAX: usize = 20;
pub const ADDRESS_MAX: usize = 1000;
pub const WEBSITE_MAX: usize = 500;
pub const RECEIPT_MAX: usize = 100;
pub const NOTES_MAX: usize = 2000;

/// `numeric(18, 2)`: donation amounts and report totals.
pub const MONEY: Numeric = Numeric::new(18, 2);

pub const MIN_TAX_YEAR: i32 = 1900;
pub const MAX_TAX_YEAR: i32 = 9999;

// ── Organization ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    pub ein: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub is_501c3: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Donation ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationType {
    Cash,
    Check,
    CreditCard,
    Stock,
    Property,
    Goods,
    Other,
}

impl DonationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::CreditCard => "credit_card",
            Self::Stock => "stock",
            Self::Property => "property",
            Self::Goods => "goods",
            Self::Other => "other",
        }
    }

    /// Cash, check and card gifts count as cash on a tax report; the rest are non-cash.
    pub fn is_cash(self) -> bool {
        matches!(self, Self::Cash | Self::Check | Self::CreditCard)
    }
}

impl FromStr for DonationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "check" => Ok(Self::Check),
            "credit_card" => Ok(Self::CreditCard),
            "stock" => Ok(Self::Stock),
            "property" => Ok(Self::Property),
            "goods" => Ok(Self::Goods),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown donation type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub organization_id: Uuid,
    pub amount: Decimal,
    pub donation_date: NaiveDate,
    pub donation_type: DonationType,
    pub receipt_number: Option<String>,
    pub is_tax_deductible: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    pub fn is_in_year(&self, year: i32) -> bool {
        self.donation_date.year() == year
    }
}

/// Optional narrowing for the donation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DonationFilter {
    pub organization_id: Option<Uuid>,
    pub year: Option<i32>,
}

impl DonationFilter {
    pub fn matches(&self, donation: &Donation) -> bool {
        self.organization_id
            .is_none_or(|id| donation.organization_id == id)
            && self.year.is_none_or(|y| donation.is_in_year(y))
    }
}

/// `[Jan 1 of year, Jan 1 of the next year)`.
pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?,
    ))
}

// ── Tax report ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxTotals {
    pub total_cash_donations: Decimal,
    pub total_non_cash_donations: Decimal,
}

impl TaxTotals {
    /// Sum the tax-deductible donations dated in `year`, split into cash and non-cash.
    ///
    /// Fails when a total no longer fits the money column.
    pub fn generate(year: i32, donations: &[Donation]) -> Result<Self, ValidationError> {
        let mut cash = Decimal::ZERO;
        let mut non_cash = Decimal::ZERO;
        for d in donations.iter().filter(|d| d.is_tax_deductible && d.is_in_year(year)) {
            let (field, bucket) = if d.donation_type.is_cash() {
                ("total_cash_donations", &mut cash)
            } else {
                ("total_non_cash_donations", &mut non_cash)
            };
            *bucket = bucket.checked_add(d.amount).ok_or(out_of_range(field))?;
        }
        let totals = Self {
            total_cash_donations: MONEY.fit("total_cash_donations", cash)?,
            total_non_cash_donations: MONEY.fit("total_non_cash_donations", non_cash)?,
        };
        MONEY.fit("total_deductible_amount", totals.total_deductible_amount())?;
        Ok(totals)
    }

    pub fn total_deductible_amount(&self) -> Decimal {
        self.total_cash_donations + self.total_non_cash_donations
    }
}

fn out_of_range(field: &'static str) -> ValidationError {
    FieldError::OutOfRange {
        field,
        max: MONEY.max(),
    }
    .into()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxReport {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub tax_year: i32,
    pub totals: TaxTotals,
    pub generated_date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl TaxReport {
    pub fn total_deductible_amount(&self) -> Decimal {
        self.totals.total_deductible_amount()
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("tax_year must be between 1900 and 9999")]
    TaxYear,
}

/// Round `value` to cents and require the stored amount to be above zero.
pub fn validate_amount(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    let stored = MONEY.fit(field, value)?;
    if stored <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(stored)
}

pub fn validate_tax_year(year: i32) -> Result<(), ValidationError> {
    if !(MIN_TAX_YEAR..=MAX_TAX_YEAR).contains(&year) {
        return Err(ValidationError::TaxYear);
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
