//! Win/loss run tracking.
//!
//! A run is closed when the opposite outcome interrupts it. The run still
//! open when the match sequence ends is closed exactly once by [`StreakTracker::finish`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum StreakState {
    #[default]
    Idle,
    Winning(u32),
    Losing(u32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakRuns {
    pub win_streaks: Vec<u32>,
    pub loss_streaks: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct StreakTracker {
    state: StreakState,
    closed: StreakRuns,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, won: bool) {
        self.state = match (self.state, won) {
            (StreakState::Idle, true) => StreakState::Winning(1),
            (StreakState::Idle, false) => StreakState::Losing(1),
            (StreakState::Winning(n), true) => StreakState::Winning(n + 1),
            (StreakState::Losing(n), false) => StreakState::Losing(n + 1),
            (StreakState::Winning(n), false) => {
                self.closed.win_streaks.push(n);
                StreakState::Losing(1)
            }
            (StreakState::Losing(n), true) => {
                self.closed.loss_streaks.push(n);
                StreakState::Winning(1)
            }
        };
    }

    /// Flushes the open run and returns every run.
    pub fn finish(mut self) -> StreakRuns {
        match self.state {
            StreakState::Idle => {}
            StreakState::Winning(n) => self.closed.win_streaks.push(n),
            StreakState::Losing(n) => self.closed.loss_streaks.push(n),
        }
        self.closed
    }
}
