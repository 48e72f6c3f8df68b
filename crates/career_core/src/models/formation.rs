use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CareerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FormationStyle {
    Defensive,
    Balanced,
    Attacking,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Pressing {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BuildUp {
    Short,
    Mixed,
    Long,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FormationCode {
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "4-1-4-1")]
    F4141,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "3-4-3")]
    F343,
}

impl FormationCode {
    pub const ALL: [FormationCode; 6] = [
        FormationCode::F433,
        FormationCode::F4231,
        FormationCode::F352,
        FormationCode::F4141,
        FormationCode::F532,
        FormationCode::F343,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormationCode::F433 => "4-3-3",
            FormationCode::F4231 => "4-2-3-1",
            FormationCode::F352 => "3-5-2",
            FormationCode::F4141 => "4-1-4-1",
            FormationCode::F532 => "5-3-2",
            FormationCode::F343 => "3-4-3",
        }
    }

    /// Returns (defenders, midfielders, forwards)
    pub fn lines(&self) -> (u8, u8, u8) {
        match self {
            FormationCode::F433 => (4, 3, 3),
            FormationCode::F4231 => (4, 5, 1),
            FormationCode::F352 => (3, 5, 2),
            FormationCode::F4141 => (4, 5, 1),
            FormationCode::F532 => (5, 3, 2),
            FormationCode::F343 => (3, 4, 3),
        }
    }
}

impl fmt::Display for FormationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormationCode {
    type Err = CareerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormationCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| CareerError::InvalidParameter(format!("unknown formation '{}'", s)))
    }
}

/// A named shape plus the team instructions that go with it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Formation {
    pub code: FormationCode,
    pub defenders: u8,
    pub midfielders: u8,
    pub forwards: u8,
    pub style: FormationStyle,
    pub pressing: Pressing,
    pub build_up: BuildUp,
}

impl Formation {
    /// Preset for a code with its default instructions.
    pub fn preset(code: FormationCode) -> Self {
        let (defenders, midfielders, forwards) = code.lines();
        let (style, pressing, build_up) = match code {
            FormationCode::F433 => (FormationStyle::Balanced, Pressing::Medium, BuildUp::Mixed),
            FormationCode::F4231 => (FormationStyle::Defensive, Pressing::Low, BuildUp::Short),
            FormationCode::F352 => (FormationStyle::Balanced, Pressing::Medium, BuildUp::Mixed),
            FormationCode::F4141 => (FormationStyle::Attacking, Pressing::High, BuildUp::Short),
            FormationCode::F532 => (FormationStyle::Defensive, Pressing::Low, BuildUp::Long),
            FormationCode::F343 => (FormationStyle::Attacking, Pressing::High, BuildUp::Mixed),
        };
        Self { code, defenders, midfielders, forwards, style, pressing, build_up }
    }

    pub fn with_style(mut self, style: FormationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn presets() -> Vec<Formation> {
        FormationCode::ALL.iter().map(|c| Formation::preset(*c)).collect()
    }

    /// Ten outfield players plus the goalkeeper.
    pub fn is_valid(&self) -> bool {
        self.defenders as u16 + self.midfielders as u16 + self.forwards as u16 == 10
    }
}

impl Default for Formation {
    fn default() -> Self {
        Formation::preset(FormationCode::F433)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_have_ten_outfield_players() {
        for formation in Formation::presets() {
            assert!(formation.is_valid(), "{} is invalid", formation.code);
        }
    }

    #[test]
    fn test_code_roundtrip_through_str() {
        for code in FormationCode::ALL {
            assert_eq!(code.as_str().parse::<FormationCode>().unwrap(), code);
        }
        assert!("4-4-2".parse::<FormationCode>().is_err());
    }

    #[test]
    fn test_serde_uses_dashed_codes() {
        let json = serde_json::to_string(&Formation::preset(FormationCode::F4231)).unwrap();
        assert!(json.contains("\"4-2-3-1\""));
        assert!(json.contains("\"defensive\""));
    }
}
