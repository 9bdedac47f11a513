//! Heat buckets: classifies a count by its ratio to the largest count.
//!
//! Comparisons are strict: a ratio of exactly 0.66 is `Warm`, exactly 0.33
//! is `Cool`, and a zero count is always `Cold`.

use ratatui::widgets::BorderType;

pub const HOT_ABOVE: f64 = 0.66;
pub const WARM_ABOVE: f64 = 0.33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeatLevel {
    Cold,
    Cool,
    Warm,
    Hot,
}

impl HeatLevel {
    /// Bucket for `count` given the largest count on display.
    pub fn classify(count: u64, max: u64) -> Self {
        if count == 0 || max == 0 {
            return HeatLevel::Cold;
        }
        Self::from_ratio(count as f64 / max as f64)
    }

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > HOT_ABOVE {
            HeatLevel::Hot
        } else if ratio > WARM_ABOVE {
            HeatLevel::Warm
        } else if ratio > 0.0 {
            HeatLevel::Cool
        } else {
            HeatLevel::Cold
        }
    }

    /// Border drawn around a key cap, so heat is readable without colour.
    pub fn border_type(self) -> BorderType {
        match self {
            HeatLevel::Hot => BorderType::Double,
            HeatLevel::Warm => BorderType::Thick,
            HeatLevel::Cool => BorderType::Plain,
            HeatLevel::Cold => BorderType::Rounded,
        }
    }

    /// Top edge of a cap drawn with this level's border, for legends.
    pub fn sample(self) -> &'static str {
        match self {
            HeatLevel::Hot => "╔═╗",
            HeatLevel::Warm => "┏━┓",
            HeatLevel::Cool => "┌─┐",
            HeatLevel::Cold => "╭─╮",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeatLevel::Hot => "hot",
            HeatLevel::Warm => "warm",
            HeatLevel::Cool => "cool",
            HeatLevel::Cold => "cold",
        }
    }
}
