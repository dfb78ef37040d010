pub mod inquiry;
pub mod property;
pub mod user;

pub use inquiry::{Inquiry, InquiryPatch, InquiryStatus, NewInquiry};
pub use property::{
    format_usd, Address, Coordinates, ListingType, NewProperty, Property, PropertyPatch,
    PropertyType,
};
pub use user::{NewUser, User, UserPatch};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Generate a fresh record id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Timestamp for a record update, strictly later than `previous`.
///
/// The wall clock can return the same instant for two updates in quick
/// succession (or step backwards), so fall back to `previous + 1ms`.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_do_not_collide_under_rapid_creation() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn next_timestamp_advances_past_a_future_previous() {
        let future = Utc::now() + Duration::hours(1);
        let next = next_timestamp(future);
        assert_eq!(next, future + Duration::milliseconds(1));
    }

    #[test]
    fn next_timestamp_uses_clock_when_it_has_moved_on() {
        let past = Utc::now() - Duration::hours(1);
        let next = next_timestamp(past);
        assert!(next > past + Duration::minutes(59));
    }
}
