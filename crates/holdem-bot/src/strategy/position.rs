//! Position-aware heuristic strategy: no search and no rollouts, just hand
//! strength shifted by where the hero sits relative to the button, blended
//! with draw equity and an occasional in-position semi-bluff.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use holdem_core::eval::{draws, strength};
use holdem_core::model::card::Card;
use holdem_core::model::street::Street;
use holdem_core::state::Decision;

use crate::ev;
use crate::strategy::{
    fallback_decision, legalize, log_decision, log_fallback, raise_near, DecisionError,
    DecisionOutcome, Strategy, StrategyContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatPosition {
    Button,
    SmallBlind,
    BigBlind,
    Early,
    Middle,
    Late,
}

impl SeatPosition {
    pub const fn in_position(self) -> bool {
        matches!(self, SeatPosition::Button | SeatPosition::Late)
    }
}

/// Maps a seat to its position class by its clockwise offset from the
/// button. Seats past the blinds are split into early/middle/late thirds.
pub fn seat_position(hero_seat: usize, button_seat: usize, player_count: usize) -> SeatPosition {
    if player_count <= 1 {
        return SeatPosition::Button;
    }
    let offset =
        (hero_seat % player_count + player_count - button_seat % player_count) % player_count;
    match offset {
        0 => SeatPosition::Button,
        1 => SeatPosition::SmallBlind,
        2 => SeatPosition::BigBlind,
        _ => {
            let rank = offset - 3;
            let field = player_count.saturating_sub(3).max(1);
            if rank * 3 < field {
                SeatPosition::Early
            } else if rank * 3 < field * 2 {
                SeatPosition::Middle
            } else {
                SeatPosition::Late
            }
        }
    }
}

/// Additive strength adjustment for a position, scaled up preflop where
/// position matters most and down on the river where it matters least.
pub fn position_adjustment(position: SeatPosition, street: Street) -> f64 {
    let base = match position {
        SeatPosition::Button | SeatPosition::Late => 0.07,
        SeatPosition::SmallBlind => -0.05,
        SeatPosition::BigBlind => -0.02,
        SeatPosition::Early => -0.03,
        SeatPosition::Middle => 0.0,
    };
    let scale = match street {
        Street::Preflop => 1.5,
        Street::River => 0.7,
        _ => 1.0,
    };
    base * scale
}

const SEMI_BLUFF_FREQUENCY: f64 = 0.3;

const PREFLOP_RAISE_THRESHOLD: f64 = 0.55;
const PREFLOP_CALL_THRESHOLD: f64 = 0.35;
const PREFLOP_CHEAP_CALL_THRESHOLD: f64 = 0.25;

const POSTFLOP_VALUE_THRESHOLD: f64 = 0.75;
const POSTFLOP_BET_THRESHOLD: f64 = 0.55;

pub struct PositionStrategy {
    rng: SmallRng,
}

impl PositionStrategy {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn decide_inner(&mut self, ctx: &StrategyContext<'_>) -> Result<Decision, DecisionError> {
        let street = ctx.street();
        let position = seat_position(
            ctx.state.hero_seat,
            ctx.state.button_seat,
            ctx.state.player_count,
        );
        let adjustment = position_adjustment(position, street);

        let decision = if street == Street::Preflop {
            self.preflop(ctx, adjustment)
        } else {
            self.postflop(ctx, position, adjustment, street)?
        };
        Ok(legalize(decision, ctx.state))
    }

    fn preflop(&mut self, ctx: &StrategyContext<'_>, adjustment: f64) -> Decision {
        let score = preflop_score(ctx.hole) + adjustment;
        if score >= PREFLOP_RAISE_THRESHOLD {
            let target = ctx.state.big_blind.saturating_mul(3);
            return raise_near(ctx.state, target)
                .map(Decision::Raise)
                .unwrap_or(Decision::Call);
        }
        if ctx.to_call == 0 {
            return Decision::Check;
        }
        if score >= PREFLOP_CALL_THRESHOLD {
            return Decision::Call;
        }
        if score >= PREFLOP_CHEAP_CALL_THRESHOLD && ctx.to_call <= ctx.state.big_blind {
            return Decision::Call;
        }
        Decision::Fold
    }

    fn postflop(
        &mut self,
        ctx: &StrategyContext<'_>,
        position: SeatPosition,
        adjustment: f64,
        street: Street,
    ) -> Result<Decision, DecisionError> {
        let made = strength::hand_strength(ctx.hole, ctx.community)? + adjustment;
        let cards = ctx.known_cards();
        let draw = draws::draw_potential(&cards, street);
        let effective = (made + draw).clamp(0.0, 1.0);

        if effective >= POSTFLOP_VALUE_THRESHOLD {
            return Ok(raise_near(ctx.state, ctx.pot)
                .map(Decision::Raise)
                .unwrap_or(Decision::Call));
        }

        // In position, medium hands and live draws bet some of the time to
        // take the pot down.
        let semi_bluff_spot = position.in_position()
            && (draw > 0.0 || (0.40..POSTFLOP_BET_THRESHOLD).contains(&effective));
        if semi_bluff_spot && self.rng.gen_bool(SEMI_BLUFF_FREQUENCY) {
            if let Some(amount) = raise_near(ctx.state, ctx.pot / 2) {
                return Ok(Decision::Raise(amount));
            }
        }

        if effective >= POSTFLOP_BET_THRESHOLD {
            return Ok(raise_near(ctx.state, ctx.pot / 2)
                .map(Decision::Raise)
                .unwrap_or(Decision::Call));
        }

        if ctx.to_call == 0 {
            return Ok(Decision::Check);
        }

        let pot_odds = ctx.to_call as f64 / (ctx.pot + ctx.to_call) as f64;
        if effective >= pot_odds {
            return Ok(Decision::Call);
        }
        Ok(Decision::Fold)
    }
}

/// Additive preflop score built from the raw card features rather than the
/// equity table, so position shifts weigh in directly.
fn preflop_score(hole: [Card; 2]) -> f64 {
    let high = hole[0].rank.value().max(hole[1].rank.value()) as f64;
    let low = hole[0].rank.value().min(hole[1].rank.value()) as f64;
    let gap = high - low;
    let mut score = high * 0.025;

    if hole[0].rank == hole[1].rank {
        score += 0.28 + low * 0.012;
    }
    if hole[0].suit == hole[1].suit {
        score += 0.06;
    }
    if gap == 1.0 {
        score += 0.05;
    } else if gap == 2.0 {
        score += 0.02;
    }
    if hole[0].rank.is_broadway() && hole[1].rank.is_broadway() {
        score += 0.08;
    }
    score
}

impl Default for PositionStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for PositionStrategy {
    fn name(&self) -> &'static str {
        "position-based"
    }

    fn decide(&mut self, ctx: &StrategyContext<'_>) -> DecisionOutcome {
        let decision = match self.decide_inner(ctx) {
            Ok(decision) => decision,
            Err(err) => {
                log_fallback(self.name(), &err);
                fallback_decision(ctx.state)
            }
        };
        log_decision(self.name(), ctx, decision);
        DecisionOutcome::plain(decision)
    }
}
