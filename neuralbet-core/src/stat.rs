//! Stat code enumeration
//!
//! Short identifiers for the tracked basketball statistics the predictor
//! understands. The HTTP layer passes stat codes through as-is and lets the
//! predictor reject unknown ones; the CLI parses eagerly via this enum.

use crate::error::BridgeError;
use std::fmt;
use std::str::FromStr;

/// A tracked basketball statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCode {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    ThreePointersMade,
    FreeThrowsMade,
}

impl StatCode {
    /// All supported stat codes
    pub const ALL: [StatCode; 7] = [
        StatCode::Points,
        StatCode::Rebounds,
        StatCode::Assists,
        StatCode::Steals,
        StatCode::Blocks,
        StatCode::ThreePointersMade,
        StatCode::FreeThrowsMade,
    ];

    /// Parse from a wire code, case-insensitive
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PTS" => Some(StatCode::Points),
            "REB" => Some(StatCode::Rebounds),
            "AST" => Some(StatCode::Assists),
            "STL" => Some(StatCode::Steals),
            "BLK" => Some(StatCode::Blocks),
            "3PM" => Some(StatCode::ThreePointersMade),
            "FTM" => Some(StatCode::FreeThrowsMade),
            _ => None,
        }
    }

    /// Convert to the wire code passed to the predictor
    pub fn as_code(self) -> &'static str {
        match self {
            StatCode::Points => "PTS",
            StatCode::Rebounds => "REB",
            StatCode::Assists => "AST",
            StatCode::Steals => "STL",
            StatCode::Blocks => "BLK",
            StatCode::ThreePointersMade => "3PM",
            StatCode::FreeThrowsMade => "FTM",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            StatCode::Points => "points",
            StatCode::Rebounds => "rebounds",
            StatCode::Assists => "assists",
            StatCode::Steals => "steals",
            StatCode::Blocks => "blocks",
            StatCode::ThreePointersMade => "three-pointers made",
            StatCode::FreeThrowsMade => "free throws made",
        }
    }
}

impl fmt::Display for StatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

impl FromStr for StatCode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatCode::from_code(s).ok_or_else(|| BridgeError::UnknownStat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_code_parsing() {
        assert_eq!(StatCode::from_code("PTS"), Some(StatCode::Points));
        assert_eq!(StatCode::from_code("pts"), Some(StatCode::Points));
        assert_eq!(StatCode::from_code(" reb "), Some(StatCode::Rebounds));
        assert_eq!(StatCode::from_code("3PM"), Some(StatCode::ThreePointersMade));
        assert_eq!(StatCode::from_code("FTM"), Some(StatCode::FreeThrowsMade));
        assert_eq!(StatCode::from_code("XYZ"), None);
        assert_eq!(StatCode::from_code(""), None);
    }

    #[test]
    fn test_stat_code_roundtrip() {
        for stat in StatCode::ALL {
            assert_eq!(StatCode::from_code(stat.as_code()), Some(stat));
        }
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("TOV".parse::<StatCode>().is_err());
        assert!("AST".parse::<StatCode>().is_ok());
    }
}
