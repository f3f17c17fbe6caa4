use crate::errors::EngineError;

/// Running bankroll for one seat session.
///
/// Peak and drawdown are maintained incrementally as each round settles, so
/// a finished session's figures are read straight off the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct BankrollTracker {
    starting: i64,
    current: i64,
    peak: i64,
    max_drawdown: i64,
    max_drawdown_pct: f64,
    wagered_main: i64,
    wagered_bonus: i64,
}

impl BankrollTracker {
    pub fn new(starting: i64) -> Self {
        Self {
            starting,
            current: starting,
            peak: starting,
            max_drawdown: 0,
            max_drawdown_pct: 0.0,
            wagered_main: 0,
            wagered_bonus: 0,
        }
    }

    /// Apply one settled round: `net` is the signed result across all bets,
    /// the wagered amounts are what was actually left in action.
    ///
    /// Nothing is applied when any running total would leave the `i64` range.
    pub fn record(
        &mut self,
        net: i64,
        wagered_main: i64,
        wagered_bonus: i64,
    ) -> Result<(), EngineError> {
        let current = self.current.checked_add(net);
        let main = self.wagered_main.checked_add(wagered_main);
        let bonus = self.wagered_bonus.checked_add(wagered_bonus);
        let (Some(current), Some(main), Some(bonus)) = (current, main, bonus) else {
            return Err(EngineError::AmountOverflow);
        };
        let peak = self.peak.max(current);
        let drawdown = peak.checked_sub(current).ok_or(EngineError::AmountOverflow)?;

        self.current = current;
        self.wagered_main = main;
        self.wagered_bonus = bonus;
        self.peak = peak;
        if drawdown > self.max_drawdown {
            self.max_drawdown = drawdown;
            self.max_drawdown_pct = drawdown as f64 / peak as f64 * 100.0;
        }
        Ok(())
    }

    pub fn starting(&self) -> i64 {
        self.starting
    }
    pub fn current(&self) -> i64 {
        self.current
    }
    pub fn peak(&self) -> i64 {
        self.peak
    }
    pub fn max_drawdown(&self) -> i64 {
        self.max_drawdown
    }
    pub fn max_drawdown_pct(&self) -> f64 {
        self.max_drawdown_pct
    }
    pub fn wagered_main(&self) -> i64 {
        self.wagered_main
    }
    pub fn wagered_bonus(&self) -> i64 {
        self.wagered_bonus
    }

    pub fn profit(&self) -> i64 {
        self.current - self.starting
    }
}
