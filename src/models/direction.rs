use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which currency is the source of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Direction {
    #[serde(rename = "SAR to SDG")]
    #[value(name = "sar-to-sdg")]
    SarToSdg,
    #[serde(rename = "SDG to SAR")]
    #[value(name = "sdg-to-sar")]
    SdgToSar,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::SarToSdg, Direction::SdgToSar];

    /// Label stored in the history log and written in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::SarToSdg => "SAR to SDG",
            Direction::SdgToSar => "SDG to SAR",
        }
    }

    /// Exact, case-sensitive match on the label.
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "SAR to SDG" => Some(Direction::SarToSdg),
            "SDG to SAR" => Some(Direction::SdgToSar),
            _ => None,
        }
    }

    /// Short CLI form (`sar-to-sdg`), also used in storage.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::SarToSdg => "sar-to-sdg",
            Direction::SdgToSar => "sdg-to-sar",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sar-to-sdg" => Some(Direction::SarToSdg),
            "sdg-to-sar" => Some(Direction::SdgToSar),
            _ => None,
        }
    }

    pub fn source(&self) -> Currency {
        match self {
            Direction::SarToSdg => Currency::Sar,
            Direction::SdgToSar => Currency::Sdg,
        }
    }

    pub fn target(&self) -> Currency {
        match self {
            Direction::SarToSdg => Currency::Sdg,
            Direction::SdgToSar => Currency::Sar,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two amount fields of the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Sar,
    Sdg,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Sar => "SAR",
            Currency::Sdg => "SDG",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Sar => "Saudi Riyals",
            Currency::Sdg => "Sudanese Pounds",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
