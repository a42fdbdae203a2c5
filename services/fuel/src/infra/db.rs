use anyhow::Context as _;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use hearth_core::sea_ext::SelectExt;
use hearth_domain::id::{TenantId, UserId};
use hearth_domain::pagination::PageRequest;
use hearth_fuel_schema::{efficiency_reports, fill_ups, vehicles};
use hearth_outbox::{OutboxEvent, store::record};

use crate::domain::repository::{FillUpRepository, ReportRepository, VehicleRepository};
use crate::domain::types::{EfficiencyReport, FillUp, ReportTotals, Vehicle};
use crate::error::FuelError;

// ── Vehicle repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVehicleRepository {
    pub db: DatabaseConnection,
}

impl VehicleRepository for DbVehicleRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        include_inactive: bool,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, FuelError> {
        let mut query = vehicles::Entity::find()
            .tenant_scoped(vehicles::Column::TenantId, tenant_id)
            .owned_by(vehicles::Column::UserId, user_id);
        if !include_inactive {
            query = query.filter(vehicles::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(vehicles::Column::Make)
            .order_by_asc(vehicles::Column::Model)
            .order_by_desc(vehicles::Column::Year)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list vehicles")?;
        Ok(models.into_iter().map(vehicle_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<Vehicle>, FuelError> {
        let model = vehicles::Entity::find_by_id(id)
            .tenant_scoped(vehicles::Column::TenantId, tenant_id)
            .owned_by(vehicles::Column::UserId, user_id)
            .one(&self.db)
            .await
            .context("find vehicle by id")?;
        Ok(model.map(vehicle_from_model))
    }

    async fn create(&self, vehicle: &Vehicle, event: &OutboxEvent) -> Result<(), FuelError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = vehicle_to_active_model(vehicle);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create vehicle with outbox")?;
        Ok(())
    }

    async fn update(&self, vehicle: &Vehicle, event: &OutboxEvent) -> Result<(), FuelError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = vehicle_to_active_model(vehicle);
                let event = event.clone();
                Box::pin(async move {
                    model.update(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("update vehicle with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, FuelError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    // fill_ups and efficiency_reports cascade
                    let result = vehicles::Entity::delete_many()
                        .filter(vehicles::Column::Id.eq(id))
                        .filter(vehicles::Column::TenantId.eq(tenant_id.0))
                        .filter(vehicles::Column::UserId.eq(user_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete vehicle with outbox")?;
        Ok(deleted)
    }
}

fn vehicle_to_active_model(vehicle: &Vehicle) -> vehicles::ActiveModel {
    vehicles::ActiveModel {
        id: Set(vehicle.id),
        tenant_id: Set(vehicle.tenant_id.0),
        user_id: Set(vehicle.user_id.0),
        make: Set(vehicle.make.clone()),
        model: Set(vehicle.model.clone()),
        year: Set(vehicle.year),
        vin: Set(vehicle.vin.clone()),
        license_plate: Set(vehicle.license_plate.clone()),
        tank_capacity: Set(vehicle.tank_capacity),
        epa_city_mpg: Set(vehicle.epa_city_mpg),
        epa_highway_mpg: Set(vehicle.epa_highway_mpg),
        is_active: Set(vehicle.is_active),
        created_at: Set(vehicle.created_at),
        updated_at: Set(vehicle.updated_at),
    }
}

fn vehicle_from_model(model: vehicles::Model) -> Vehicle {
    Vehicle {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        make: model.make,
        model: model.model,
        year: model.year,
        vin: model.vin,
        license_plate: model.license_plate,
        tank_capacity: model.tank_capacity,
        epa_city_mpg: model.epa_city_mpg,
        epa_highway_mpg: model.epa_highway_mpg,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Fill-up repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFillUpRepository {
    pub db: DatabaseConnection,
}

impl FillUpRepository for DbFillUpRepository {
    async fn list_for_vehicle(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<FillUp>, FuelError> {
        let models = fill_ups::Entity::find()
            .tenant_scoped(fill_ups::Column::TenantId, tenant_id)
            .owned_by(fill_ups::Column::UserId, user_id)
            .filter(fill_ups::Column::VehicleId.eq(vehicle_id))
            .order_by_desc(fill_ups::Column::FillUpDate)
            .order_by_desc(fill_ups::Column::Odometer)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list fill-ups")?;
        Ok(models.into_iter().map(fill_up_from_model).collect())
    }

    async fn all_for_vehicle(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
    ) -> Result<Vec<FillUp>, FuelError> {
        let models = fill_ups::Entity::find()
            .tenant_scoped(fill_ups::Column::TenantId, tenant_id)
            .owned_by(fill_ups::Column::UserId, user_id)
            .filter(fill_ups::Column::VehicleId.eq(vehicle_id))
            .order_by_asc(fill_ups::Column::Odometer)
            .all(&self.db)
            .await
            .context("list all fill-ups")?;
        Ok(models.into_iter().map(fill_up_from_model).collect())
    }

    async fn list_between(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<FillUp>, FuelError> {
        let models = fill_ups::Entity::find()
            .tenant_scoped(fill_ups::Column::TenantId, tenant_id)
            .owned_by(fill_ups::Column::UserId, user_id)
            .filter(fill_ups::Column::VehicleId.eq(vehicle_id))
            .filter(fill_ups::Column::FillUpDate.gte(from))
            .filter(fill_ups::Column::FillUpDate.lt(to))
            .order_by_asc(fill_ups::Column::Odometer)
            .all(&self.db)
            .await
            .context("list fill-ups between")?;
        Ok(models.into_iter().map(fill_up_from_model).collect())
    }

    async fn previous_odometer(
        &self,
        tenant_id: TenantId,
        vehicle_id: Uuid,
        odometer: Decimal,
    ) -> Result<Option<Decimal>, FuelError> {
        let model = fill_ups::Entity::find()
            .tenant_scoped(fill_ups::Column::TenantId, tenant_id)
            .filter(fill_ups::Column::VehicleId.eq(vehicle_id))
            .filter(fill_ups::Column::Odometer.lt(odometer))
            .order_by_desc(fill_ups::Column::Odometer)
            .one(&self.db)
            .await
            .context("find previous odometer")?;
        Ok(model.map(|m| m.odometer))
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<FillUp>, FuelError> {
        let model = fill_ups::Entity::find_by_id(id)
            .tenant_scoped(fill_ups::Column::TenantId, tenant_id)
            .owned_by(fill_ups::Column::UserId, user_id)
            .one(&self.db)
            .await
            .context("find fill-up by id")?;
        Ok(model.map(fill_up_from_model))
    }

    async fn create(&self, fill_up: &FillUp, event: &OutboxEvent) -> Result<(), FuelError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = fill_up_to_active_model(fill_up);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create fill-up with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, FuelError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = fill_ups::Entity::delete_many()
                        .filter(fill_ups::Column::Id.eq(id))
                        .filter(fill_ups::Column::TenantId.eq(tenant_id.0))
                        .filter(fill_ups::Column::UserId.eq(user_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete fill-up with outbox")?;
        Ok(deleted)
    }
}

fn fill_up_to_active_model(fill_up: &FillUp) -> fill_ups::ActiveModel {
    fill_ups::ActiveModel {
        id: Set(fill_up.id),
        tenant_id: Set(fill_up.tenant_id.0),
        user_id: Set(fill_up.user_id.0),
        vehicle_id: Set(fill_up.vehicle_id),
        fill_up_date: Set(fill_up.fill_up_date),
        odometer: Set(fill_up.odometer),
        gallons: Set(fill_up.gallons),
        price_per_gallon: Set(fill_up.price_per_gallon),
        total_cost: Set(fill_up.total_cost),
        is_full_tank: Set(fill_up.is_full_tank),
        fuel_grade: Set(fill_up.fuel_grade.clone()),
        gas_station: Set(fill_up.gas_station.clone()),
        miles_per_gallon: Set(fill_up.miles_per_gallon),
        notes: Set(fill_up.notes.clone()),
        created_at: Set(fill_up.created_at),
    }
}

fn fill_up_from_model(model: fill_ups::Model) -> FillUp {
    FillUp {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        vehicle_id: model.vehicle_id,
        fill_up_date: model.fill_up_date,
        odometer: model.odometer,
        gallons: model.gallons,
        price_per_gallon: model.price_per_gallon,
        total_cost: model.total_cost,
        is_full_tank: model.is_full_tank,
        fuel_grade: model.fuel_grade,
        gas_station: model.gas_station,
        miles_per_gallon: model.miles_per_gallon,
        notes: model.notes,
        created_at: model.created_at,
    }
}

// ── Report repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReportRepository {
    pub db: DatabaseConnection,
}

impl ReportRepository for DbReportRepository {
    async fn list_for_vehicle(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        vehicle_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<EfficiencyReport>, FuelError> {
        let models = efficiency_reports::Entity::find()
            .tenant_scoped(efficiency_reports::Column::TenantId, tenant_id)
            .owned_by(efficiency_reports::Column::UserId, user_id)
            .filter(efficiency_reports::Column::VehicleId.eq(vehicle_id))
            .order_by_desc(efficiency_reports::Column::CreatedAt)
            .in_page(page)
            .all(&self.db)
            .await
            .context("list efficiency reports")?;
        Ok(models.into_iter().map(report_from_model).collect())
    }

    async fn find_by_id(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
    ) -> Result<Option<EfficiencyReport>, FuelError> {
        let model = efficiency_reports::Entity::find_by_id(id)
            .tenant_scoped(efficiency_reports::Column::TenantId, tenant_id)
            .owned_by(efficiency_reports::Column::UserId, user_id)
            .one(&self.db)
            .await
            .context("find efficiency report by id")?;
        Ok(model.map(report_from_model))
    }

    async fn create(
        &self,
        report: &EfficiencyReport,
        event: &OutboxEvent,
    ) -> Result<(), FuelError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let model = report_to_active_model(report);
                let event = event.clone();
                Box::pin(async move {
                    model.insert(txn).await?;
                    record(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create efficiency report with outbox")?;
        Ok(())
    }

    async fn delete(
        &self,
        tenant_id: TenantId,
        user_id: UserId,
        id: Uuid,
        event: &OutboxEvent,
    ) -> Result<bool, FuelError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                let event = event.clone();
                Box::pin(async move {
                    let result = efficiency_reports::Entity::delete_many()
                        .filter(efficiency_reports::Column::Id.eq(id))
                        .filter(efficiency_reports::Column::TenantId.eq(tenant_id.0))
                        .filter(efficiency_reports::Column::UserId.eq(user_id.0))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    record(txn, &event).await?;
                    Ok(true)
                })
            })
            .await
            .context("delete efficiency report with outbox")?;
        Ok(deleted)
    }
}

fn report_to_active_model(report: &EfficiencyReport) -> efficiency_reports::ActiveModel {
    let totals = &report.totals;
    efficiency_reports::ActiveModel {
        id: Set(report.id),
        tenant_id: Set(report.tenant_id.0),
        user_id: Set(report.user_id.0),
        vehicle_id: Set(report.vehicle_id),
        start_date: Set(report.start_date),
        end_date: Set(report.end_date),
        total_miles: Set(totals.total_miles),
        total_gallons: Set(totals.total_gallons),
        average_mpg: Set(totals.average_mpg),
        total_fuel_cost: Set(totals.total_fuel_cost),
        cost_per_mile: Set(totals.cost_per_mile),
        number_of_fill_ups: Set(totals.number_of_fill_ups),
        best_mpg: Set(totals.best_mpg),
        worst_mpg: Set(totals.worst_mpg),
        notes: Set(report.notes.clone()),
        created_at: Set(report.created_at),
    }
}

fn report_from_model(model: efficiency_reports::Model) -> EfficiencyReport {
    EfficiencyReport {
        id: model.id,
        tenant_id: TenantId(model.tenant_id),
        user_id: UserId(model.user_id),
        vehicle_id: model.vehicle_id,
        start_date: model.start_date,
        end_date: model.end_date,
        totals: ReportTotals {
            total_miles: model.total_miles,
            total_gallons: model.total_gallons,
            average_mpg: model.average_mpg,
            total_fuel_cost: model.total_fuel_cost,
            cost_per_mile: model.cost_per_mile,
            number_of_fill_ups: model.number_of_fill_ups,
            best_mpg: model.best_mpg,
            worst_mpg: model.worst_mpg,
        },
        notes: model.notes,
        created_at: model.created_at,
    }
}
