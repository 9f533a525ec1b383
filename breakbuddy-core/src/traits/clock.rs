//! Wall-clock source
//!
//! The clock is read, never set: synchronizing it (NTP, RTC seeding) is the
//! firmware's business.

/// Milliseconds per hour
const MS_PER_HOUR: i64 = 3_600_000;

/// Milliseconds per day
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// A clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    /// Milliseconds since the Unix epoch (UTC); only differences matter
    pub epoch_ms: u64,
    /// Hour of day on the device's local clock (0-23)
    pub local_hour: u8,
}

impl WallTime {
    /// Build a reading from an epoch time and a UTC offset
    pub fn from_epoch_ms(epoch_ms: u64, utc_offset_minutes: i16) -> Self {
        Self {
            epoch_ms,
            local_hour: local_hour(epoch_ms, utc_offset_minutes),
        }
    }
}

/// Errors reading the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// The clock has not been set yet
    NotSet,
    /// The clock hardware did not respond
    Unavailable,
}

/// Source of the current wall-clock time
pub trait Clock {
    /// Read the current time
    fn now(&self) -> Result<WallTime, ClockError>;
}

/// Local hour of day for an epoch time shifted by a UTC offset
pub fn local_hour(epoch_ms: u64, utc_offset_minutes: i16) -> u8 {
    let local_ms = epoch_ms as i64 + i64::from(utc_offset_minutes) * 60_000;
    (local_ms.rem_euclid(MS_PER_DAY) / MS_PER_HOUR) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_hour_utc() {
        // 1970-01-01 10:30 UTC
        assert_eq!(local_hour(10 * 3_600_000 + 30 * 60_000, 0), 10);
    }

    #[test]
    fn test_local_hour_negative_offset_wraps_to_previous_day() {
        // 02:00 UTC at UTC-4 is 22:00 the day before
        assert_eq!(local_hour(2 * 3_600_000, -240), 22);
    }

    #[test]
    fn test_local_hour_positive_offset() {
        // 23:00 UTC at UTC+5:30 is 04:30
        assert_eq!(local_hour(23 * 3_600_000, 330), 4);
    }

    #[test]
    fn test_wall_time_from_epoch() {
        let t = WallTime::from_epoch_ms(13 * 3_600_000, -240);
        assert_eq!(t.local_hour, 9);
        assert_eq!(t.epoch_ms, 13 * 3_600_000);
    }
}
