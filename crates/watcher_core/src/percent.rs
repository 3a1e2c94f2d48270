use std::fmt;

/// Completion percentage with two decimal digits, stored in hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percent {
    hundredths: u64,
}

impl Percent {
    pub const ZERO: Percent = Percent { hundredths: 0 };
    pub const FULL: Percent = Percent { hundredths: 10_000 };

    /// `step * 100 / total`, rounded half-up to two decimals.
    ///
    /// A zero total yields `0.00`. Steps past the total are not clamped.
    pub fn from_steps(step: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let scaled = u128::from(step) * 10_000;
        let total = u128::from(total);
        let rounded = (scaled + total / 2) / total;
        Self {
            hundredths: u64::try_from(rounded).unwrap_or(u64::MAX),
        }
    }

    pub fn hundredths(self) -> u64 {
        self.hundredths
    }

    pub fn as_f64(self) -> f64 {
        self.hundredths as f64 / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}
