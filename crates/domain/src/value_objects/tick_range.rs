use crate::errors::RebalanceError;
use crate::math::tick::{MAX_TICK, MIN_TICK};
use serde::{Deserialize, Serialize};

/// An ordered pair of tick bounds for a range position.
///
/// Construction enforces `lower < upper` and both bounds in the tick domain,
/// so a held `TickRange` is always depositable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    lower: i32,
    upper: i32,
}

impl TickRange {
    pub fn new(lower: i32, upper: i32) -> Result<Self, RebalanceError> {
        if lower >= upper {
            return Err(RebalanceError::InvalidRange { lower, upper });
        }
        for tick in [lower, upper] {
            if !(MIN_TICK..=MAX_TICK).contains(&tick) {
                return Err(RebalanceError::TickOutOfRange { tick });
            }
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    pub fn width(&self) -> u32 {
        self.upper.abs_diff(self.lower)
    }

    pub fn contains(&self, tick: i32) -> bool {
        tick >= self.lower && tick < self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unordered_bounds() {
        assert_eq!(
            TickRange::new(1000, 1000).unwrap_err(),
            RebalanceError::InvalidRange {
                lower: 1000,
                upper: 1000
            }
        );
        assert!(TickRange::new(500, -500).is_err());
    }

    #[test]
    fn rejects_bounds_outside_tick_domain() {
        assert_eq!(
            TickRange::new(MIN_TICK - 1, 0).unwrap_err(),
            RebalanceError::TickOutOfRange { tick: MIN_TICK - 1 }
        );
        assert!(TickRange::new(0, MAX_TICK + 1).is_err());
    }

    #[test]
    fn accessors_and_containment() {
        let range = TickRange::new(-1000, 1000).unwrap();
        assert_eq!(range.lower(), -1000);
        assert_eq!(range.upper(), 1000);
        assert_eq!(range.width(), 2000);
        assert!(range.contains(0));
        assert!(range.contains(-1000));
        assert!(!range.contains(1000));
    }
}
