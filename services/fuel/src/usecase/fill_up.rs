use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{FillUpDeleted, FillUpRecorded, outbox};
use crate::domain::repository::{FillUpRepository, VehicleRepository};
use crate::domain::types::{
    FUEL_GRADE_MAX, FillUp, GALLONS, GAS_STATION_MAX, MONEY, MPG, NOTES_MAX, ODOMETER,
    PRICE_PER_GALLON, ValidationError, fit_derived, mpg_since, optional_text, total_cost, validate_non_negative,
    validate_positive,
};
use crate::error::FuelError;

pub struct FillUpInput {
    /// Defaults to now.
    pub fill_up_date: Option<DateTime<Utc>>,
    pub odometer: Decimal,
    pub gallons: Decimal,
    pub price_per_gallon: Decimal,
    pub is_full_tank: bool,
    pub fuel_grade: Option<String>,
    pub gas_station: Option<String>,
    pub notes: Option<String>,
}

// ── RecordFillUp ─────────────────────────────────────────────────────────────

pub struct RecordFillUpUseCase<V: VehicleRepository, F: FillUpRepository> {
    pub vehicles: V,
    pub fill_ups: F,
}

impl<V: VehicleRepository, F: FillUpRepository> RecordFillUpUseCase<V, F> {
    /// Record a fill-up on an active vehicle.
    ///
    /// MPG is taken against the closest lower odometer reading of the same vehicle.
    /// Figures are taken at the scale they are stored with; the stored cost is rounded to cents.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        input: FillUpInput,
    ) -> Result<FillUp, FuelError> {
        let odometer = validate_non_negative("odometer", input.odometer, ODOMETER)?;
        let gallons = validate_positive("gallons", input.gallons, GALLONS)?;
        let price_per_gallon =
            validate_positive("price_per_gallon", input.price_per_gallon, PRICE_PER_GALLON)?;
        let cost = total_cost(gallons, price_per_gallon).map(|c| c.round_dp(2));
        let total_cost = fit_derived("total_cost", cost, MONEY)?;
        let fuel_grade = optional_text("fuel_grade", input.fuel_grade.as_deref(), FUEL_GRADE_MAX)?;
        let gas_station =
            optional_text("gas_station", input.gas_station.as_deref(), GAS_STATION_MAX)?;
        let notes = optional_text("notes", input.notes.as_deref(), NOTES_MAX)?;

        let vehicle = self
            .vehicles
            .find_by_id(tenant_id, user_id, vehicle_id)
            .await?
            .ok_or(FuelError::VehicleNotFound)?;
        if !vehicle.is_active {
            return Err(FuelError::VehicleInactive);
        }

        let previous = self
            .fill_ups
            .previous_odometer(tenant_id, vehicle.id, odometer)
            .await?;
        let miles_per_gallon = previous
            .and_then(|prev| mpg_since(odometer, gallons, prev))
            .map(|mpg| MPG.fit("miles_per_gallon", mpg).map_err(ValidationError::from))
            .transpose()?;
        let now = Utc::now();
        let fill_up = FillUp {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            vehicle_id: vehicle.id,
            fill_up_date: input.fill_up_date.unwrap_or(now),
            odometer,
            gallons,
            price_per_gallon,
            total_cost,
            is_full_tank: input.is_full_tank,
            fuel_grade,
            gas_station,
            miles_per_gallon,
            notes,
            created_at: now,
        };
        let event = outbox(tenant_id, &FillUpRecorded::new(&fill_up))?;
        self.fill_ups.create(&fill_up, &event).await?;
        Ok(fill_up)
    }
}

// ── ListFillUps ──────────────────────────────────────────────────────────────

pub struct ListFillUpsUseCase<V: VehicleRepository, F: FillUpRepository> {
    pub vehicles: V,
    pub fill_ups: F,
}

impl<V: VehicleRepository, F: FillUpRepository> ListFillUpsUseCase<V, F> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<FillUp>, FuelError> {
        self.vehicles
            .find_by_id(tenant_id, user_id, vehicle_id)
            .await?
            .ok_or(FuelError::VehicleNotFound)?;
        self.fill_ups
            .list_for_vehicle(tenant_id, user_id, vehicle_id, page.clamped())
            .await
    }
}

// ── GetFillUp ────────────────────────────────────────────────────────────────

pub struct GetFillUpUseCase<F: FillUpRepository> {
    pub repo: F,
}

impl<F: FillUpRepository> GetFillUpUseCase<F> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<FillUp, FuelError> {
        self.repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(FuelError::FillUpNotFound)
    }
}

// ── DeleteFillUp ─────────────────────────────────────────────────────────────

pub struct DeleteFillUpUseCase<F: FillUpRepository> {
    pub repo: F,
}

impl<F: FillUpRepository> DeleteFillUpUseCase<F> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<(), FuelError> {
        let event = outbox(
            tenant_id,
            &FillUpDeleted {
                event_id: Uuid::now_v7(),
                fill_up_id: id,
                user_id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, user_id, id, &event).await? {
            return Err(FuelError::FillUpNotFound);
        }
        Ok(())
    }
}
