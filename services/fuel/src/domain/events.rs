//! Integration events raised by the fuel service.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use hearth_domain::event::IntegrationEvent;
use hearth_domain::id::{TenantId, UserId};
use hearth_outbox::OutboxEvent;

use crate::domain::types::{EfficiencyReport, FillUp, Vehicle};
use crate::error::FuelError;

pub fn outbox<E: IntegrationEvent>(tenant_id: TenantId, event: &E) -> Result<OutboxEvent, FuelError> {
    OutboxEvent::from_event(tenant_id, event).map_err(|e| FuelError::Internal(e.into()))
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleSaved {
    pub event_id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: UserId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub is_active: bool,
    pub created: bool,
    pub occurred_at: DateTime<Utc>,
}

impl VehicleSaved {
    pub fn new(vehicle: &Vehicle, created: bool) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            vehicle_id: vehicle.id,
            user_id: vehicle.user_id,
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            year: vehicle.year,
            is_active: vehicle.is_active,
            created,
            occurred_at: vehicle.updated_at,
        }
    }
}

impl IntegrationEvent for VehicleSaved {
    const KIND: &'static str = "vehicle.saved";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.vehicle_id
    }
}

/// Raised by both deactivate and reactivate; `is_active` tells which.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleStatusChanged {
    pub event_id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: UserId,
    pub is_active: bool,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for VehicleStatusChanged {
    const KIND: &'static str = "vehicle.status_changed";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.vehicle_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleDeleted {
    pub event_id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for VehicleDeleted {
    const KIND: &'static str = "vehicle.deleted";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.vehicle_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FillUpRecorded {
    pub event_id: Uuid,
    pub fill_up_id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: UserId,
    pub odometer: Decimal,
    pub gallons: Decimal,
    pub total_cost: Decimal,
    pub miles_per_gallon: Option<Decimal>,
    pub occurred_at: DateTime<Utc>,
}

impl FillUpRecorded {
    pub fn new(fill_up: &FillUp) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            fill_up_id: fill_up.id,
            vehicle_id: fill_up.vehicle_id,
            user_id: fill_up.user_id,
            odometer: fill_up.odometer,
            gallons: fill_up.gallons,
            total_cost: fill_up.total_cost,
            miles_per_gallon: fill_up.miles_per_gallon,
            occurred_at: fill_up.created_at,
        }
    }
}

impl IntegrationEvent for FillUpRecorded {
    const KIND: &'static str = "fill_up.recorded";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.fill_up_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FillUpDeleted {
    pub event_id: Uuid,
    pub fill_up_id: Uuid,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for FillUpDeleted {
    const KIND: &'static str = "fill_up.deleted";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.fill_up_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportGenerated {
    pub event_id: Uuid,
    pub report_id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub average_mpg: Decimal,
    pub cost_per_mile: Decimal,
    pub occurred_at: DateTime<Utc>,
}

impl ReportGenerated {
    pub fn new(report: &EfficiencyReport) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            report_id: report.id,
            vehicle_id: report.vehicle_id,
            user_id: report.user_id,
            start_date: report.start_date,
            end_date: report.end_date,
            average_mpg: report.totals.average_mpg,
            cost_per_mile: report.totals.cost_per_mile,
            occurred_at: report.created_at,
        }
    }
}

impl IntegrationEvent for ReportGenerated {
    const KIND: &'static str = "efficiency_report.generated";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.report_id
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDeleted {
    pub event_id: Uuid,
    pub report_id: Uuid,
    pub user_id: UserId,
    pub occurred_at: DateTime<Utc>,
}

impl IntegrationEvent for ReportDeleted {
    const KIND: &'static str = "efficiency_report.deleted";

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn aggregate_id(&self) -> Uuid {
        self.report_id
    }
}
