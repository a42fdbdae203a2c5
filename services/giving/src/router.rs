use axum::{Router, routing::get};

use hearth_core::health::{healthz, readyz};
use hearth_core::middleware::with_http_layers;

use crate::handlers::{
    donation::{create_donation, delete_donation, get_donation, get_donations, update_donation},
    organization::{
        create_organization, delete_organization, get_organization, get_organizations,
        update_organization,
    },
    tax_report::{
        delete_tax_report, generate_tax_report, get_tax_report, get_tax_report_by_year,
        get_tax_reports,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Organizations
        .route(
            "/organizations",
            get(get_organizations).post(create_organization),
        )
        .route(
            "/organizations/{id}",
            get(get_organization)
                .put(update_organization)
                .delete(delete_organization),
        )
        // Donations
        .route("/donations", get(get_donations).post(create_donation))
        .route(
            "/donations/{id}",
            get(get_donation).put(update_donation).delete(delete_donation),
        )
        // Tax reports. POST takes the tax year, GET and DELETE the report id.
        .route("/tax-reports", get(get_tax_reports))
        .route("/tax-reports/year/{year}", get(get_tax_report_by_year))
        .route(
            "/tax-reports/{key}",
            get(get_tax_report)
                .delete(delete_tax_report)
                .post(generate_tax_report),
        )
        .with_state(state);
    with_http_layers(router)
}
