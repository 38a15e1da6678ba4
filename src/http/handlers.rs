//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. The current instant is captured once per
//! request with `Utc::now()` and threaded through the engine explicitly.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::{AvailabilityQuery, AvailabilityResponse, BookingDto, BookingRequest, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::api::{BookingId, SalonId};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Liveness check that also touches the repository.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = match state.repository.stylists_for_salon(SalonId::new(0)).await {
        Ok(_) => "ready".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        repository,
    }))
}

/// GET /v1/salons/{salon_id}/availability
///
/// List feasible start times per stylist for a salon, service and date.
pub async fn get_availability(
    State(state): State<AppState>,
    Path(salon_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> HandlerResult<AvailabilityResponse> {
    let repo = state.repository.as_ref();
    let salon = repo.get_salon(SalonId::new(salon_id)).await?;
    let service = repo.get_service(query.service_id).await?;
    if service.salon_id != salon.id {
        return Err(AppError::BadRequest(
            "Service does not belong to this salon".to_string(),
        ));
    }

    let duration_minutes = query.duration.unwrap_or(service.duration_minutes);
    if duration_minutes == 0 {
        return Err(AppError::BadRequest(
            "Duration must be positive".to_string(),
        ));
    }

    let stylist = match query.stylist_id {
        Some(id) => {
            let stylist = repo.get_stylist(id).await?;
            if stylist.salon_id != salon.id {
                return Err(AppError::BadRequest(
                    "Stylist does not work at this salon".to_string(),
                ));
            }
            Some(stylist)
        }
        None => None,
    };

    let stylists = services::list_available_slots(
        repo,
        &salon,
        &service,
        query.date,
        duration_minutes,
        stylist.as_ref(),
        Utc::now(),
    )
    .await?;

    Ok(Json(AvailabilityResponse {
        salon_id: salon.id,
        service_id: service.id,
        date: query.date,
        duration_minutes,
        stylists,
    }))
}

/// POST /v1/bookings
///
/// Admit and persist a new booking. Any admission failure or reservation
/// race returns 409 SLOT_UNAVAILABLE.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingDto>), AppError> {
    let booking = services::create_booking(
        state.repository.as_ref(),
        state.notifier.as_ref(),
        &request,
        Utc::now(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(BookingDto::from(booking))))
}

/// DELETE /v1/bookings/{booking_id}
///
/// Cancel a booking and trigger the waitlist replacement pass. Repeating
/// the call on an already cancelled booking is a no-op.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> HandlerResult<BookingDto> {
    let booking = services::cancel_booking(
        state.repository.as_ref(),
        state.notifier.as_ref(),
        BookingId::new(booking_id),
        "cancelled via API",
        state.promotion_policy,
        Utc::now(),
    )
    .await?;

    Ok(Json(BookingDto::from(booking)))
}
