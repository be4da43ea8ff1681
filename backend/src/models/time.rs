use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Julian Date of the Unix epoch (1970-01-01 00:00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2451545.0;

pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Days from the Unix epoch to J2000.0.
const UNIX_EPOCH_TO_J2000_DAYS: f64 = J2000_JD - UNIX_EPOCH_JD;

/// Convert a Unix timestamp (seconds) to a Julian Date.
pub fn to_julian_date(unix_timestamp: f64) -> f64 {
    unix_timestamp / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Convert a Julian Date back to a Unix timestamp (seconds).
pub fn from_julian_date(julian_date: f64) -> f64 {
    (julian_date - UNIX_EPOCH_JD) * SECONDS_PER_DAY
}

/// Julian Date representation.
///
/// The value is stored as days elapsed since the Unix epoch rather than as the
/// raw Julian day count. A bare `f64` near JD 2.46e6 only resolves ~40 µs, so
/// keeping the small offset lets timestamps round-trip with sub-microsecond
/// precision. Serialized as the plain Julian Date number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDate(qtty::Days);

impl JulianDate {
    /// Create from a Julian Date value.
    pub fn new(julian_date: f64) -> Self {
        Self(qtty::Days::new(julian_date - UNIX_EPOCH_JD))
    }

    /// Raw Julian Date value.
    pub fn value(&self) -> f64 {
        UNIX_EPOCH_JD + self.0.value()
    }

    /// Days elapsed since the Unix epoch.
    pub fn days_since_unix_epoch(&self) -> qtty::Days {
        self.0
    }

    /// Days elapsed since J2000.0 (negative before it).
    pub fn days_since_j2000(&self) -> f64 {
        self.0.value() - UNIX_EPOCH_TO_J2000_DAYS
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self(qtty::Days::new(timestamp / SECONDS_PER_DAY))
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        self.0.value() * SECONDS_PER_DAY
    }

    /// Shift by a number of days.
    pub fn add_days(&self, days: f64) -> Self {
        Self(qtty::Days::new(self.0.value() + days))
    }

    /// The current instant.
    pub fn now() -> Self {
        Self::from_datetime(chrono::Utc::now())
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        let secs = self.to_unix_timestamp();
        let secs_i64 = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1e9) as u32;
        chrono::DateTime::from_timestamp(secs_i64, nanos)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }
}

impl From<f64> for JulianDate {
    fn from(v: f64) -> Self {
        JulianDate::new(v)
    }
}

impl Serialize for JulianDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for JulianDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(JulianDate::new)
    }
}
