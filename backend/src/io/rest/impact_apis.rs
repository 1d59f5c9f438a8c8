//! # REST API for Impact Estimates

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{ImpactConfigQuery, ImpactPreviewRequest, ImpactQuery};
use tracing::info;

use super::error_response;
use super::mappers::impact_mapper::ImpactMapper;
use crate::domain::commands::impact::{ImpactPreviewCommand, VendorImpactQuery};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vendors/:vendor_id/impact", get(get_vendor_impact))
        .route("/impact/preview", post(preview_impact))
        .route("/impact/config", get(get_impact_config))
}

/// Impact of a vendor's stored schedule plus an optional slider delta
pub async fn get_vendor_impact(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    Query(query): Query<ImpactQuery>,
) -> impl IntoResponse {
    info!("GET /api/vendors/{}/impact - query: {:?}", vendor_id, query);

    let domain_query = VendorImpactQuery {
        vendor_id,
        extra_bags_per_day: query.extra_bags_per_day,
    };

    match state.impact_service.estimate_for_vendor(domain_query).await {
        Ok(result) => (StatusCode::OK, Json(ImpactMapper::to_dto(result))).into_response(),
        Err(e) => error_response(e, "Error estimating impact"),
    }
}

/// Impact of a schedule supplied in the request body
pub async fn preview_impact(
    State(state): State<AppState>,
    Json(request): Json<ImpactPreviewRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/impact/preview - vendor: {:?}, {} active days",
        request.vendor_id,
        request.schedule.active_day_count()
    );

    let command = ImpactPreviewCommand {
        vendor_id: request.vendor_id,
        schedule: request.schedule,
        extra_bags_per_day: request.extra_bags_per_day,
    };

    match state.impact_service.preview(command) {
        Ok(result) => (StatusCode::OK, Json(ImpactMapper::to_dto(result))).into_response(),
        Err(e) => error_response(e, "Error previewing impact"),
    }
}

/// Effective impact configuration
pub async fn get_impact_config(
    State(state): State<AppState>,
    Query(query): Query<ImpactConfigQuery>,
) -> impl IntoResponse {
    info!("GET /api/impact/config - query: {:?}", query);

    match state.impact_service.impact_config(query.vendor_id.as_deref()) {
        Ok(config) => (StatusCode::OK, Json(config)).into_response(),
        Err(e) => error_response(e, "Error loading impact config"),
    }
}
