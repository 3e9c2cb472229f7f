//! Opponent-modeling strategy. Keeps a per-player behavioral model updated
//! from observed actions, discounts the hero's hand strength against
//! aggressive or tight reads and scary board textures, then acts on tiered
//! thresholds plus pot odds.

use holdem_core::eval::{draws, strength};
use holdem_core::state::{ActionKind, Decision};

use crate::ev;
use crate::opponent::OpponentModelTable;
use crate::strategy::{
    fallback_decision, legalize, log_decision, log_fallback, raise_near, DecisionError,
    DecisionOutcome, Strategy, StrategyContext,
};

const STRENGTH_FLOOR: f64 = 0.1;
const STRENGTH_CEILING: f64 = 0.95;

/// Extra equity margin demanded over raw pot odds before calling.
const CALL_MARGIN: f64 = 0.05;

const VALUE_RAISE_THRESHOLD: f64 = 0.80;
const MEDIUM_RAISE_THRESHOLD: f64 = 0.60;
const CHEAP_CALL_THRESHOLD: f64 = 0.30;

#[derive(Default)]
pub struct BayesianStrategy {
    models: OpponentModelTable,
}

impl BayesianStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Models accumulated so far, keyed by opponent. Survives across hands
    /// for the lifetime of the strategy value.
    pub fn models(&self) -> &OpponentModelTable {
        &self.models
    }

    fn update_models(&mut self, ctx: &StrategyContext<'_>) {
        for opp in &ctx.state.opponents {
            if opp.folded && opp.last_action.map(|a| a.kind) != Some(ActionKind::Fold) {
                continue;
            }
            if let Some(action) = opp.last_action {
                self.models
                    .model_mut(opp.id)
                    .observe(action, ctx.pot, ctx.community.len());
            }
        }
    }

    /// Hand strength shaded by reads, field size and board texture.
    fn adjusted_strength(&self, base: f64, ctx: &StrategyContext<'_>) -> f64 {
        let mut adjusted = base;

        for opp in ctx.state.live_opponents() {
            let Some(model) = self.models.get(opp.id) else {
                continue;
            };
            let last = opp.last_action.map(|a| a.kind);
            if model.aggression > 0.6 && last == Some(ActionKind::Raise) {
                // An aggressive player's raise is real in proportion to how
                // rarely they bluff.
                adjusted -= (model.aggression - 0.5) * (1.0 - model.bluff_frequency) * 0.4;
            }
            if model.tightness > 0.6
                && matches!(last, Some(ActionKind::Call) | Some(ActionKind::Raise))
            {
                adjusted -= (model.tightness - 0.5) * 0.2;
            }
        }

        let extra_opponents = ctx.state.live_opponent_count().saturating_sub(1);
        adjusted -= 0.05 * extra_opponents as f64;
        adjusted -= board_texture_discount(ctx);

        adjusted.clamp(STRENGTH_FLOOR, STRENGTH_CEILING)
    }

    fn decide_inner(&mut self, ctx: &StrategyContext<'_>) -> Result<Decision, DecisionError> {
        let base = strength::hand_strength(ctx.hole, ctx.community)?;
        let adjusted = self.adjusted_strength(base, ctx);
        let draw = draws::draw_potential(&ctx.known_cards(), ctx.street());

        let decision = if ctx.to_call == 0 {
            if adjusted >= VALUE_RAISE_THRESHOLD {
                raise_near(ctx.state, ctx.pot)
                    .map(Decision::Raise)
                    .unwrap_or(Decision::Check)
            } else if adjusted >= MEDIUM_RAISE_THRESHOLD {
                raise_near(ctx.state, ctx.pot / 2)
                    .map(Decision::Raise)
                    .unwrap_or(Decision::Check)
            } else {
                Decision::Check
            }
        } else {
            let pot_odds = ctx.to_call as f64 / (ctx.pot + ctx.to_call) as f64;
            if adjusted >= VALUE_RAISE_THRESHOLD {
                raise_near(ctx.state, ctx.pot)
                    .map(Decision::Raise)
                    .unwrap_or(Decision::Call)
            } else if adjusted >= MEDIUM_RAISE_THRESHOLD {
                raise_near(ctx.state, ctx.pot / 2)
                    .map(Decision::Raise)
                    .unwrap_or(Decision::Call)
            } else if adjusted + draw >= pot_odds + CALL_MARGIN {
                Decision::Call
            } else if ctx.to_call <= ev::SMALL_BET_LIMIT && adjusted >= CHEAP_CALL_THRESHOLD {
                Decision::Call
            } else {
                Decision::Fold
            }
        };

        Ok(legalize(decision, ctx.state))
    }
}

/// Discount for boards that hit many ranges: pairs, three to a suit, and
/// tightly connected cards.
fn board_texture_discount(ctx: &StrategyContext<'_>) -> f64 {
    let community = ctx.community;
    let mut discount = 0.0;

    let paired = community
        .iter()
        .enumerate()
        .any(|(i, a)| community[i + 1..].iter().any(|b| a.rank == b.rank));
    if paired {
        discount += 0.05;
    }

    let mut suit_counts = [0usize; 4];
    for card in community {
        suit_counts[card.suit.index()] += 1;
    }
    if suit_counts.iter().any(|&count| count >= 3) {
        discount += 0.10;
    }

    let connected = community.iter().enumerate().any(|(i, a)| {
        community[i + 1..]
            .iter()
            .any(|b| a.rank != b.rank && a.rank.value().abs_diff(b.rank.value()) <= 2)
    });
    if connected {
        discount += 0.05;
    }

    discount
}

impl Strategy for BayesianStrategy {
    fn name(&self) -> &'static str {
        "bayesian"
    }

    fn decide(&mut self, ctx: &StrategyContext<'_>) -> DecisionOutcome {
        self.update_models(ctx);
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
