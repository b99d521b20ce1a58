//! The calendar unit a counter is measured in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for unrecognized unit strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid count unit: {0}")]
pub struct UnknownUnit(pub String);

/// Whether elapsed time is measured in whole days or whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CountUnit {
    #[default]
    Days,
    Months,
}

impl CountUnit {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
        }
    }

    /// Display label for a count, pluralized the way the widget phrases it.
    #[must_use]
    pub const fn label(&self, count: i64) -> &'static str {
        match self {
            Self::Days => {
                if count == 1 {
                    "dia"
                } else {
                    "dias"
                }
            }
            Self::Months => {
                if count == 1 {
                    "mês"
                } else {
                    "meses"
                }
            }
        }
    }

    /// Maps to the persisted `use_months` flag.
    #[must_use]
    pub const fn uses_months(&self) -> bool {
        matches!(self, Self::Months)
    }

    #[must_use]
    pub const fn from_use_months(use_months: bool) -> Self {
        if use_months { Self::Months } else { Self::Days }
    }
}

impl std::fmt::Display for CountUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CountUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "days" => Ok(Self::Days),
            "months" => Ok(Self::Months),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for unit in [CountUnit::Days, CountUnit::Months] {
            let parsed: CountUnit = unit.as_str().parse().unwrap();
            assert_eq!(parsed, unit);
            assert_eq!(unit.to_string(), unit.as_str());
        }
    }

    #[test]
    fn rejects_unknown_strings() {
        assert!("weeks".parse::<CountUnit>().is_err());
        assert!("".parse::<CountUnit>().is_err());
    }

    #[test]
    fn serde_matches_as_str() {
        for unit in [CountUnit::Days, CountUnit::Months] {
            let value = serde_json::to_value(unit).unwrap();
            assert_eq!(value.as_str().unwrap(), unit.as_str());
        }
    }

    #[test]
    fn labels_pluralize_on_count() {
        assert_eq!(CountUnit::Days.label(1), "dia");
        assert_eq!(CountUnit::Days.label(0), "dias");
        assert_eq!(CountUnit::Days.label(10), "dias");
        assert_eq!(CountUnit::Months.label(1), "mês");
        assert_eq!(CountUnit::Months.label(3), "meses");
    }

    #[test]
    fn use_months_flag_round_trips() {
        for unit in [CountUnit::Days, CountUnit::Months] {
            assert_eq!(CountUnit::from_use_months(unit.uses_months()), unit);
        }
    }
}
