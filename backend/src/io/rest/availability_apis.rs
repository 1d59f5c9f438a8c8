//! # REST API for Vendor Availability
//!
//! Endpoints for reading and writing a vendor's weekly schedule.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use shared::{
    ApplyBagTargetRequest, ApplyBagTargetResponse, AvailabilityListResponse,
    DeleteAvailabilityResponse, ErrorResponse, UpdateAvailabilityRequest,
    UpdateAvailabilityResponse,
};
use tracing::info;

use super::error_response;
use super::mappers::availability_mapper::AvailabilityMapper;
use crate::domain::commands::availability::{
    ApplyBagTargetCommand, GetAvailabilityCommand, UpdateAvailabilityCommand,
};
use crate::AppState;

/// Create a router for availability related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/availability", get(list_availabilities))
        .route(
            "/vendors/:vendor_id/availability",
            get(get_availability)
                .put(update_availability)
                .delete(delete_availability),
        )
        .route(
            "/vendors/:vendor_id/availability/apply-target",
            post(apply_bag_target),
        )
}

/// List every stored vendor availability
pub async fn list_availabilities(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/availability");

    match state.availability_service.list_availabilities().await {
        Ok(availabilities) => {
            let response = AvailabilityListResponse {
                availabilities: availabilities
                    .into_iter()
                    .map(AvailabilityMapper::to_dto)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Error listing availability"),
    }
}

/// Get a vendor's weekly availability
pub async fn get_availability(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/vendors/{}/availability", vendor_id);

    let command = GetAvailabilityCommand {
        vendor_id: vendor_id.clone(),
    };

    match state.availability_service.get_availability(command).await {
        Ok(result) => match result.availability {
            Some(availability) => {
                (StatusCode::OK, Json(AvailabilityMapper::to_dto(availability))).into_response()
            }
            None => {
                let body = ErrorResponse {
                    error: format!("No availability found for vendor '{}'", vendor_id),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
        },
        Err(e) => error_response(e, "Error retrieving availability"),
    }
}

/// Create or replace a vendor's weekly availability
pub async fn update_availability(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    Json(request): Json<UpdateAvailabilityRequest>,
) -> impl IntoResponse {
    info!("PUT /api/vendors/{}/availability", vendor_id);

    let command = UpdateAvailabilityCommand {
        vendor_id,
        schedule: request.schedule,
    };

    match state.availability_service.update_availability(command).await {
        Ok(result) => {
            let response = UpdateAvailabilityResponse {
                availability: AvailabilityMapper::to_dto(result.availability),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Error updating availability"),
    }
}

/// Delete a vendor's weekly availability
pub async fn delete_availability(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/vendors/{}/availability", vendor_id);

    match state.availability_service.delete_availability(&vendor_id).await {
        Ok(deleted) => {
            (StatusCode::OK, Json(DeleteAvailabilityResponse { deleted })).into_response()
        }
        Err(e) => error_response(e, "Error deleting availability"),
    }
}

/// Write a bags/day target onto every active day of the stored schedule
pub async fn apply_bag_target(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
    Json(request): Json<ApplyBagTargetRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/vendors/{}/availability/apply-target - request: {:?}",
        vendor_id, request
    );

    let command = ApplyBagTargetCommand {
        vendor_id,
        total_bags_per_day: request.total_bags_per_day,
    };

    match state.availability_service.apply_bag_target(command).await {
        Ok(result) => {
            let response = ApplyBagTargetResponse {
                availability: AvailabilityMapper::to_dto(result.availability),
                applied_quantity: result.applied_quantity,
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e, "Error applying bag target"),
    }
}
