#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;
use hearth_outbox::OutboxEvent;

use crate::domain::types::{EfficiencyReport, FillUp, Vehicle};
use crate::error::FuelError;

/// Repository for the caller's vehicles.
pub trait VehicleRepository: Send + Sync {
    /// Ordered by make, model, year. Inactive vehicles only when asked for.
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        include_inactive: bool,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, FuelError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Vehicle>, FuelError>;

    async fn create(&self, vehicle: &Vehicle, event: &OutboxEvent) -> Result<(), FuelError>;

    async fn update(&self, vehicle: &Vehicle, event: &OutboxEvent) -> Result<(), FuelError>;

    /// Deletes the vehicle with its fill-ups and reports. `false` if not found.
    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, FuelError>;
}

/// Repository for fill-ups. Always addressed through the owning vehicle's owner.
pub trait FillUpRepository: Send + Sync {
    /// Newest fill-up date first.
    async fn list_for_vehicle(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<FillUp>, FuelError>;

    /// Every fill-up of the vehicle, unpaged.
    async fn all_for_vehicle(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
    ) -> Result<Vec<FillUp>, FuelError>;

    /// Fill-ups with `from <= fill_up_date < to`, lowest odometer first.
    async fn list_between(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<FillUp>, FuelError>;

    /// Highest odometer reading strictly below `odometer`.
    async fn previous_odometer(
        &self,
        tenant_id: TenantId,
        vehicle_id: Uuid,
        odometer: Decimal,
    ) -> Result<Option<Decimal>, FuelError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<FillUp>, FuelError>;

    async fn create(&self, fill_up: &FillUp, event: &OutboxEvent) -> Result<(), FuelError>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, FuelError>;
}

/// Repository for generated efficiency reports.
pub trait ReportRepository: Send + Sync {
    /// Newest first.
    async fn list_for_vehicle(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<EfficiencyReport>, FuelError>;

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<EfficiencyReport>, FuelError>;

    async fn create(
        &self,
        report: &EfficiencyReport,
        event: &OutboxEvent,
    ) -> Result<(), FuelError>;

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, FuelError>;
}
