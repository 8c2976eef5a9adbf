use chrono::{TimeZone, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct Timestamp(chrono::DateTime<Utc>);

impl Timestamp {
    /// Midnight UTC on the given calendar day; the seed data only carries
    /// dates.
    pub fn from_date(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("valid calendar date")
            .into()
    }
}

impl From<chrono::DateTime<Utc>> for Timestamp {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl std::ops::Deref for Timestamp {
    type Target = chrono::DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.to_rfc3339().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        chrono::DateTime::parse_from_rfc3339(&s)
            .map(|dt| Self(dt.into()))
            .map_err(serde::de::Error::custom)
    }
}
