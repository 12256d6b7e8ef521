//! Half-hour time bucketing for historical data lookup.

use std::fmt;

use chrono::{NaiveTime, Timelike};

/// A clock time rounded to the nearest half hour.
///
/// Historical route data is indexed at half-hour resolution; a query at
/// 09:35 falls into the 09:30 bucket, a query at 09:50 into the 10:00
/// bucket. Rounding past 23:45 wraps to 00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBucket {
    hour: u8,
    minute: u8,
}

impl TimeBucket {
    /// Round a clock time to the nearest 30-minute mark.
    pub fn from_time(t: NaiveTime) -> Self {
        let rounded = (t.minute() + 15) / 30 * 30;
        if rounded == 60 {
            TimeBucket {
                hour: ((t.hour() + 1) % 24) as u8,
                minute: 0,
            }
        } else {
            TimeBucket {
                hour: t.hour() as u8,
                minute: rounded as u8,
            }
        }
    }

    /// The dataset key for this bucket (`HHMM`, no separator).
    pub fn key(&self) -> String {
        format!("{:02}{:02}", self.hour, self.minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
