//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Types from the service layer that already derive Serialize/Deserialize
//! are re-exported rather than duplicated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{BookingId, SalonId, ServiceId, StylistId, UserId};
use crate::models::{Booking, BookingStatus};

// Re-export existing serializable types used on the wire.
pub use crate::services::availability::StylistSlots;
pub use crate::services::bookings::BookingRequest;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub repository: String,
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// Service the client wants to book
    pub service_id: ServiceId,
    /// Day to list slots for (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Override for the slot length in minutes (defaults to the service duration)
    #[serde(default)]
    pub duration: Option<u32>,
    /// Restrict the listing to a single stylist
    #[serde(default)]
    pub stylist_id: Option<StylistId>,
}

/// Availability listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub salon_id: SalonId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    /// One entry per stylist with at least one feasible slot
    pub stylists: Vec<StylistSlots>,
}

/// Booking representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: BookingId,
    pub salon_id: SalonId,
    pub stylist_id: StylistId,
    pub service_id: ServiceId,
    pub client_id: UserId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            salon_id: booking.salon_id,
            stylist_id: booking.stylist_id,
            service_id: booking.service_id,
            client_id: booking.client_id,
            start_at: booking.start_at,
            end_at: booking.end_at,
            status: booking.status,
        }
    }
}
