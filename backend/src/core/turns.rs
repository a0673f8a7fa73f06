//! Turn management for the simulation
//!
//! The ladder advances in whole turns; there are no partial turns and no
//! notion of wall-clock time. The clock also carries the safety ceiling that
//! stops a run whose sample targets can never be met.

use serde::{Deserialize, Serialize};

/// Counts completed turns against a hard ceiling
///
/// # Example
/// ```
/// use cohort_ladder_core::TurnClock;
///
/// let mut clock = TurnClock::new(2);
/// assert_eq!(clock.current_turn(), 0);
///
/// clock.advance();
/// clock.advance();
/// assert!(clock.at_ceiling());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnClock {
    /// Turns completed since the run started
    current_turn: usize,
    /// Maximum number of turns a run may execute
    max_turns: usize,
}

impl TurnClock {
    /// Create a clock at turn 0
    ///
    /// # Panics
    /// Panics if `max_turns` is zero. The orchestrator validates this before
    /// building a clock.
    pub fn new(max_turns: usize) -> Self {
        assert!(max_turns > 0, "max_turns must be positive");
        Self {
            current_turn: 0,
            max_turns,
        }
    }

    /// Record one completed turn and return the new turn number
    pub fn advance(&mut self) -> usize {
        self.current_turn += 1;
        self.current_turn
    }

    /// Turns completed so far
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// Configured ceiling
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// True once the ceiling has been reached
    pub fn at_ceiling(&self) -> bool {
        self.current_turn >= self.max_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_returns_new_turn() {
        let mut clock = TurnClock::new(10);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert!(!clock.at_ceiling());
    }

    #[test]
    fn test_ceiling_reached_after_max_turns() {
        let mut clock = TurnClock::new(2);
        assert_eq!(clock.max_turns(), 2);
        clock.advance();
        clock.advance();
        assert!(clock.at_ceiling());
        assert_eq!(clock.current_turn(), clock.max_turns());
    }

    #[test]
    #[should_panic(expected = "max_turns must be positive")]
    fn test_zero_ceiling_rejected() {
        TurnClock::new(0);
    }
}
