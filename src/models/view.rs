use super::direction::Direction;
use clap::ValueEnum;
use std::fmt;

/// Which entries the history view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DirectionFilter {
    #[default]
    All,
    Only(Direction),
}

impl DirectionFilter {
    pub fn matches(&self, direction: Direction) -> bool {
        match self {
            DirectionFilter::All => true,
            DirectionFilter::Only(d) => *d == direction,
        }
    }

    /// `all`, `sar-to-sdg` or `sdg-to-sar`.
    pub fn code(&self) -> &'static str {
        match self {
            DirectionFilter::All => "all",
            DirectionFilter::Only(d) => d.code(),
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Some(DirectionFilter::All);
        }
        Direction::from_code(s).map(DirectionFilter::Only)
    }
}

impl fmt::Display for DirectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionFilter::All => f.write_str("All"),
            DirectionFilter::Only(d) => write!(f, "{d}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SortKey {
    #[value(name = "timestamp", alias = "date")]
    Timestamp,
    #[value(name = "from-amount", alias = "from")]
    FromAmount,
    #[value(name = "to-amount", alias = "to")]
    ToAmount,
    #[value(name = "direction", alias = "type")]
    Direction,
    #[value(name = "rate-used", alias = "rate")]
    RateUsed,
}

impl SortKey {
    pub fn code(&self) -> &'static str {
        match self {
            SortKey::Timestamp => "timestamp",
            SortKey::FromAmount => "fromAmount",
            SortKey::ToAmount => "toAmount",
            SortKey::Direction => "direction",
            SortKey::RateUsed => "rateUsed",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "timestamp" => Some(SortKey::Timestamp),
            "fromAmount" => Some(SortKey::FromAmount),
            "toAmount" => Some(SortKey::ToAmount),
            "direction" => Some(SortKey::Direction),
            "rateUsed" => Some(SortKey::RateUsed),
            _ => None,
        }
    }

    /// Direction picked when this key is newly selected.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortKey::Timestamp => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SortDirection {
    #[value(name = "asc")]
    Ascending,
    #[value(name = "desc")]
    Descending,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Sort key plus direction. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Timestamp,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Selecting the current key flips the direction; selecting another key
    /// switches to it with that key's default direction.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, key.default_direction())
        }
    }

    /// Storage form: `<key>:<asc|desc>`.
    pub fn encode(&self) -> String {
        format!("{}:{}", self.key.code(), self.direction.code())
    }

    pub fn decode(s: &str) -> Option<Self> {
        let (key, dir) = s.split_once(':')?;
        let key = SortKey::from_code(key)?;
        let direction = match dir {
            "asc" => SortDirection::Ascending,
            "desc" => SortDirection::Descending,
            _ => return None,
        };
        Some(Self::new(key, direction))
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key.code(), self.direction.code())
    }
}
