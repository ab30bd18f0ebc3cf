//! IdGenerator port: mints notification ids.

use ulid::Ulid;

use super::clock::Clock;
use crate::domain::NotificationId;

/// Generates notification ids.
///
/// Abstracted behind a trait so tests can produce predictable ids when they
/// need to.
pub trait IdGenerator: Send + Sync {
    fn notification_id(&self) -> NotificationId;
}

/// ULID-based generator: timestamp from the injected clock, random entropy
/// from the thread RNG. Ids sort by creation time without coordination.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn notification_id(&self) -> NotificationId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        NotificationId::from_ulid(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generated_ids_are_unique() {
        let ids = UlidGenerator::new(SystemClock);

        let a = ids.notification_id();
        let b = ids.notification_id();
        assert_ne!(a, b);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp_part() {
        let fixed = Utc.with_ymd_and_hms(2026, 12, 1, 12, 0, 0).unwrap();
        let ids = UlidGenerator::new(FixedClock::new(fixed));

        let id = ids.notification_id();
        assert_eq!(
            id.as_ulid().timestamp_ms(),
            fixed.timestamp_millis() as u64
        );
    }
}
