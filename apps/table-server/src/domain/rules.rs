use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 2;

pub const DEFAULT_ROUND_POINTS: u32 = 10;
pub const DEFAULT_TRICK_POINTS: u32 = 1;
/// Exclusive upper bound for configured point values.
pub const POINTS_LIMIT: u32 = 100;
/// Upper bound on how many times each round size is repeated.
pub const MAX_ITERATIONS: u32 = 100;

/// Largest round that still leaves one card to expose as trump.
pub fn max_round_for(deck_size: usize, players: usize) -> u8 {
    if players == 0 {
        return 0;
    }
    ((deck_size.saturating_sub(1)) / players).min(u8::MAX as usize) as u8
}

pub fn valid_bid_range(round: u8) -> RangeInclusive<u8> {
    0..=round
}

/// Fully resolved scoring and schedule parameters for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSettings {
    pub min_round: u8,
    pub max_round: u8,
    pub round_points: u32,
    pub trick_points: u32,
    /// How many times each round size is played.
    pub iterations: u32,
}

impl RoundSettings {
    /// Points for a seat that finished a round with `tricks` after betting `bet`.
    pub fn round_score(&self, bet: u8, tricks: u8) -> u32 {
        if bet == tricks {
            self.round_points + self.trick_points * bet as u32
        } else {
            0
        }
    }

    /// Best achievable total: every bet made exactly with every card winning.
    pub fn max_score(&self) -> u32 {
        let (min, max) = (self.min_round as u32, self.max_round as u32);
        let total_rounds = 2 * (max - min) + 1;
        let total_cards = 2 * ((min..=max).sum::<u32>()) - max;
        self.iterations * (self.round_points * total_rounds + self.trick_points * total_cards)
    }
}

/// Position in the up-then-down round schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundCursor {
    pub round: u8,
    pub ascending: bool,
    pub iteration: u32,
}

impl RoundCursor {
    /// Cursor positioned on the last repetition of the round before
    /// `min_round`, so the first `advance` lands on `min_round`.
    pub fn before_first(settings: &RoundSettings) -> Self {
        Self {
            round: settings.min_round.saturating_sub(1),
            ascending: true,
            iteration: settings.iterations.saturating_sub(1),
        }
    }

    /// Step to the next round. Returns `false` once the schedule is exhausted,
    /// leaving the cursor on the final round.
    pub fn advance(&mut self, settings: &RoundSettings) -> bool {
        if self.iteration.saturating_add(1) < settings.iterations {
            self.iteration += 1;
            return true;
        }
        if self.ascending && self.round >= settings.max_round {
            self.ascending = false;
        }
        if !self.ascending && self.round <= settings.min_round {
            return false;
        }
        self.iteration = 0;
        if self.ascending {
            self.round += 1;
        } else {
            self.round -= 1;
        }
        true
    }
}

/// Every round size a game with these settings plays, in order.
pub fn schedule(settings: &RoundSettings) -> Vec<u8> {
    let mut cursor = RoundCursor::before_first(settings);
    let mut rounds = Vec::new();
    while cursor.advance(settings) {
        rounds.push(cursor.round);
    }
    rounds
}
