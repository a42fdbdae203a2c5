use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;

use crate::domain::events::{VehicleDeleted, VehicleSaved, VehicleStatusChanged, outbox};
use crate::domain::repository::{FillUpRepository, VehicleRepository};
use crate::domain::types::{
    LICENSE_PLATE_MAX, MAKE_MAX, MODEL_MAX, MPG, VIN_MAX, Vehicle, optional_text, overall_mpg, text,
    validate_optional_positive, validate_year,
};
use crate::error::FuelError;

pub struct VehicleInput {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub license_plate: Option<String>,
    pub tank_capacity: Option<Decimal>,
    pub epa_city_mpg: Option<Decimal>,
    pub epa_highway_mpg: Option<Decimal>,
}

/// Input after trimming and bounds checks.
struct ValidVehicle {
    make: String,
    model: String,
    vin: Option<String>,
    license_plate: Option<String>,
    tank_capacity: Option<Decimal>,
    epa_city_mpg: Option<Decimal>,
    epa_highway_mpg: Option<Decimal>,
}

fn validate(input: &VehicleInput) -> Result<ValidVehicle, FuelError> {
    validate_year(input.year)?;
    Ok(ValidVehicle {
        make: text("make", &input.make, MAKE_MAX)?,
        model: text("model", &input.model, MODEL_MAX)?,
        vin: optional_text("vin", input.vin.as_deref(), VIN_MAX)?,
        license_plate: optional_text(
            "license_plate",
            input.license_plate.as_deref(),
            LICENSE_PLATE_MAX,
        )?,
        tank_capacity: validate_optional_positive("tank_capacity", input.tank_capacity, MPG)?,
        epa_city_mpg: validate_optional_positive("epa_city_mpg", input.epa_city_mpg, MPG)?,
        epa_highway_mpg: validate_optional_positive(
            "epa_highway_mpg",
            input.epa_highway_mpg,
            MPG,
        )?,
    })
}

// ── CreateVehicle ────────────────────────────────────────────────────────────

pub struct CreateVehicleUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> CreateVehicleUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        input: VehicleInput,
    ) -> Result<Vehicle, FuelError> {
        let valid = validate(&input)?;
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::now_v7(),
            tenant_id,
            user_id,
            make: valid.make,
            model: valid.model,
            year: input.year,
            vin: valid.vin,
            license_plate: valid.license_plate,
            tank_capacity: valid.tank_capacity,
            epa_city_mpg: valid.epa_city_mpg,
            epa_highway_mpg: valid.epa_highway_mpg,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let event = outbox(tenant_id, &VehicleSaved::new(&vehicle, true))?;
        self.repo.create(&vehicle, &event).await?;
        Ok(vehicle)
    }
}

// ── ListVehicles ─────────────────────────────────────────────────────────────

pub struct ListVehiclesUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> ListVehiclesUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        include_inactive: bool,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, FuelError> {
        self.repo
            .list(tenant_id, user_id, include_inactive, page.clamped())
            .await
    }
}

// ── GetVehicle ───────────────────────────────────────────────────────────────

/// A vehicle together with figures derived from its fill-ups.
#[derive(Debug, Clone)]
pub struct VehicleDetails {
    pub vehicle: Vehicle,
    pub fill_up_count: usize,
    pub overall_mpg: Option<Decimal>,
}

pub struct GetVehicleUseCase<V: VehicleRepository, F: FillUpRepository> {
    pub vehicles: V,
    pub fill_ups: F,
}

impl<V: VehicleRepository, F: FillUpRepository> GetVehicleUseCase<V, F> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<VehicleDetails, FuelError> {
        let vehicle = self
            .vehicles
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(FuelError::VehicleNotFound)?;
        let fill_ups = self
            .fill_ups
            .all_for_vehicle(tenant_id, user_id, vehicle.id)
            .await?;
        Ok(VehicleDetails {
            vehicle,
            fill_up_count: fill_ups.len(),
            overall_mpg: overall_mpg(&fill_ups),
        })
    }
}

// ── UpdateVehicle ────────────────────────────────────────────────────────────

pub struct UpdateVehicleUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> UpdateVehicleUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        input: VehicleInput,
    ) -> Result<Vehicle, FuelError> {
        let valid = validate(&input)?;
        let mut vehicle = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(FuelError::VehicleNotFound)?;

        vehicle.make = valid.make;
        vehicle.model = valid.model;
        vehicle.year = input.year;
        vehicle.vin = valid.vin;
        vehicle.license_plate = valid.license_plate;
        vehicle.tank_capacity = valid.tank_capacity;
        vehicle.epa_city_mpg = valid.epa_city_mpg;
        vehicle.epa_highway_mpg = valid.epa_highway_mpg;
        vehicle.updated_at = Utc::now();

        let event = outbox(tenant_id, &VehicleSaved::new(&vehicle, false))?;
        self.repo.update(&vehicle, &event).await?;
        Ok(vehicle)
    }
}

// ── Deactivate / Reactivate ──────────────────────────────────────────────────

pub struct SetVehicleActiveUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> SetVehicleActiveUseCase<R> {
    /// Idempotent: an unchanged status records no event.
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        active: bool,
    ) -> Result<Vehicle, FuelError> {
        let mut vehicle = self
            .repo
            .find_by_id(tenant_id, user_id, id)
            .await?
            .ok_or(FuelError::VehicleNotFound)?;
        if vehicle.is_active == active {
            return Ok(vehicle);
        }

        let now = Utc::now();
        if active {
            vehicle.reactivate(now);
        } else {
            vehicle.deactivate(now);
        }

        let event = outbox(
            tenant_id,
            &VehicleStatusChanged {
                event_id: Uuid::now_v7(),
                vehicle_id: vehicle.id,
                user_id,
                is_active: vehicle.is_active,
                occurred_at: now,
            },
        )?;
        self.repo.update(&vehicle, &event).await?;
        Ok(vehicle)
    }
}

// ── DeleteVehicle ────────────────────────────────────────────────────────────

pub struct DeleteVehicleUseCase<R: VehicleRepository> {
    pub repo: R,
}

impl<R: VehicleRepository> DeleteVehicleUseCase<R> {
    pub async fn execute(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<(), FuelError> {
        let event = outbox(
            tenant_id,
            &VehicleDeleted {
                event_id: Uuid::now_v7(),
                vehicle_id: id,
                user_id,
                occurred_at: Utc::now(),
            },
        )?;
        if !self.repo.delete(tenant_id, user_id, id, &event).await? {
            return Err(FuelError::VehicleNotFound);
        }
        Ok(())
    }
}
