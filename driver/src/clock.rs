use kernel::interface::clock::Clock;
use time::OffsetDateTime;

/// Wall clock in UTC, cut to the microsecond precision of `timestamptz`
/// so stamped values survive a round trip through the database unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        now.replace_microsecond(now.microsecond()).unwrap_or(now)
    }
}
