use std::fmt;

pub const TOP4_SLOTS: usize = 4;
pub const TOP8_SLOTS: usize = 8;
pub const RELEGATION_SLOTS: usize = 3;

/// A percentage stored as hundredths of a percent (`1234` is `12.34%`).
///
/// Values come from exact integer division rounded half-up, so two decimal
/// places are always exact and a tie such as `0.005%` becomes `0.01%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(u32);

impl Percent {
    pub const ZERO: Percent = Percent(0);

    /// `count / total` as a percentage. A zero `total` yields zero.
    pub fn from_ratio(count: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let numerator = u128::from(count) * 20_000 + u128::from(total);
        let denominator = u128::from(total) * 2;
        let hundredths = numerator / denominator;
        Percent(u32::try_from(hundredths).unwrap_or(u32::MAX))
    }

    pub fn from_hundredths(hundredths: u32) -> Self {
        Percent(hundredths)
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Probabilities {
    pub total: u64,
    pub win: Percent,
    pub top4: Percent,
    pub top8: Percent,
    pub relegation: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionShare {
    pub label: String,
    pub count: u64,
    pub share: Percent,
}

pub fn total_simulations(positions: &[u64]) -> u64 {
    sum(positions)
}

/// Summarizes a simulation distribution (index 0 is first place).
///
/// Slices clamp to the distribution length: a three-team league reports the
/// whole table as its relegation zone, and an empty or all-zero distribution
/// reports zero everywhere.
pub fn aggregate(positions: &[u64]) -> Probabilities {
    let total = total_simulations(positions);
    let head = |n: usize| sum(&positions[..n.min(positions.len())]);
    let tail_start = positions.len().saturating_sub(RELEGATION_SLOTS);

    Probabilities {
        total,
        win: Percent::from_ratio(head(1), total),
        top4: Percent::from_ratio(head(TOP4_SLOTS), total),
        top8: Percent::from_ratio(head(TOP8_SLOTS), total),
        relegation: Percent::from_ratio(sum(&positions[tail_start..]), total),
    }
}

/// Per-position share of all simulations, labelled `#1`, `#2`, ...
pub fn position_shares(positions: &[u64]) -> Vec<PositionShare> {
    let total = total_simulations(positions);
    positions
        .iter()
        .enumerate()
        .map(|(idx, &count)| PositionShare {
            label: format!("#{}", idx + 1),
            count,
            share: Percent::from_ratio(count, total),
        })
        .collect()
}

fn sum(values: &[u64]) -> u64 {
    values.iter().fold(0u64, |acc, &v| acc.saturating_add(v))
}
