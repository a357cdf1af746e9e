use std::fmt;

use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Calendar position of a timestep. One timestep is one month.
///
/// Step 0 is year 1, month 1. Natural ordering is chronological.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "MonthRepr", try_from = "MonthRepr")]
pub struct SimMonth(u32);

#[derive(Serialize, Deserialize)]
struct MonthRepr {
    year: u32,
    month: u32,
}

impl From<SimMonth> for MonthRepr {
    fn from(m: SimMonth) -> Self {
        MonthRepr {
            year: m.year(),
            month: m.month(),
        }
    }
}

impl TryFrom<MonthRepr> for SimMonth {
    type Error = String;

    fn try_from(repr: MonthRepr) -> Result<Self, Self::Error> {
        SimMonth::checked(repr.year, repr.month)
            .ok_or_else(|| format!("invalid calendar month Y{}.M{}", repr.year, repr.month))
    }
}

impl SimMonth {
    /// Create from a 1-based year and month (1–12).
    pub fn new(year: u32, month: u32) -> Self {
        assert!(year >= 1, "year out of range: {year}");
        assert!(
            (1..=MONTHS_PER_YEAR).contains(&month),
            "month out of range: {month}"
        );
        Self((year - 1) * MONTHS_PER_YEAR + (month - 1))
    }

    /// Like [`SimMonth::new`], but `None` when out of range.
    pub fn checked(year: u32, month: u32) -> Option<Self> {
        if year == 0 || !(1..=MONTHS_PER_YEAR).contains(&month) {
            return None;
        }
        (year - 1)
            .checked_mul(MONTHS_PER_YEAR)?
            .checked_add(month - 1)
            .map(Self)
    }

    pub fn from_step(t: u32) -> Self {
        Self(t)
    }

    pub fn step(self) -> u32 {
        self.0
    }

    pub fn year(self) -> u32 {
        self.0 / MONTHS_PER_YEAR + 1
    }

    pub fn month(self) -> u32 {
        self.0 % MONTHS_PER_YEAR + 1
    }
}

impl fmt::Display for SimMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}.M{:02}", self.year(), self.month())
    }
}
