//! Identifier newtypes shared across the crate.
//!
//! Every entity gets its own id type so a stylist id can never be passed
//! where a salon id is expected. All types derive Serialize/Deserialize for
//! JSON serialization.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                $name(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Salon identifier (database primary key).
    SalonId
);

entity_id!(
    /// Stylist identifier.
    StylistId
);

entity_id!(
    /// Service identifier.
    ServiceId
);

entity_id!(
    /// User account identifier (salon owners, stylists and clients).
    UserId
);

entity_id!(
    /// Booking identifier.
    BookingId
);

entity_id!(
    /// Waitlist entry identifier.
    WaitlistEntryId
);

entity_id!(
    /// Availability exception identifier.
    ExceptionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_value_roundtrip() {
        let id = SalonId::new(42);
        assert_eq!(id.value(), 42);
        assert_eq!(id, SalonId(42));
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Compile-time check: these are different types with the same payload.
        let salon = SalonId::new(1);
        let stylist = StylistId::new(1);
        assert_eq!(salon.value(), stylist.value());
    }

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let id = BookingId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: BookingId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
