use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DashboardError, DashboardResult};

/// Reporting window in days.
///
/// Only 30/60/90 are offered to users, but the type stays open so payloads with
/// other windows still round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportingPeriod(u32);

impl ReportingPeriod {
    pub const DAYS_30: Self = Self(30);
    pub const DAYS_60: Self = Self(60);
    pub const DAYS_90: Self = Self(90);

    /// Options shown in the period selector, in display order.
    pub const SELECTABLE: [Self; 3] = [Self::DAYS_30, Self::DAYS_60, Self::DAYS_90];

    #[must_use]
    pub const fn from_days(days: u32) -> Self {
        Self(days)
    }

    #[must_use]
    pub const fn days(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_supported(self) -> bool {
        Self::SELECTABLE.contains(&self)
    }

    #[must_use]
    pub fn label(self) -> String {
        match self.0 {
            1 => "1 day".to_owned(),
            days => format!("{days} days"),
        }
    }

    /// Parses `"60 days"`, `"60"` or `"1 day"`.
    pub fn parse_label(input: &str) -> DashboardResult<Self> {
        let trimmed = input.trim();
        let number = trimmed
            .strip_suffix("days")
            .or_else(|| trimmed.strip_suffix("day"))
            .unwrap_or(trimmed)
            .trim();
        number
            .parse::<u32>()
            .map(Self)
            .map_err(|_| DashboardError::Parse(format!("invalid reporting period `{input}`")))
    }
}

impl Default for ReportingPeriod {
    fn default() -> Self {
        Self::DAYS_30
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for ReportingPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for ReportingPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Days(u32),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Days(days) => Ok(Self(days)),
            Raw::Label(label) => Self::parse_label(&label).map_err(serde::de::Error::custom),
        }
    }
}
