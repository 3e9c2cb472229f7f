//! Alpha-beta search over an alternating betting tree. Same leaf valuation
//! as the minimax strategy, but the opponent gets synthetic re-raise
//! continuations and branches outside the alpha/beta window are pruned.
//!
//! The opponent strength at min nodes is sampled from 0.5..0.8 rather than
//! the full unit range: a player still in the pot rarely holds pure air.
//! As in the minimax strategy, min nodes blend the leaf value evenly with
//! the adversarial reply instead of taking the one-sample minimum verbatim,
//! damping the noise of a single draw.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use holdem_core::eval::strength;
use holdem_core::state::Decision;

use crate::ev;
use crate::strategy::{
    fallback_decision, legalize, log_decision, log_fallback, search_leaf_value, DecisionError,
    DecisionOutcome, Strategy, StrategyContext,
};

const DEFAULT_DEPTH: u8 = 4;
const CHEAP_FOLD_PENALTY: f64 = 15.0;
const STANDARD_FOLD_PENALTY: f64 = 5.0;

pub struct AlphaBetaStrategy {
    rng: SmallRng,
    depth: u8,
}

impl AlphaBetaStrategy {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.max(1);
        self
    }

    fn decide_inner(&mut self, ctx: &StrategyContext<'_>) -> Result<Decision, DecisionError> {
        let strength = strength::hand_strength(ctx.hole, ctx.community)?;
        let on_button = ctx.on_button();
        let depth = self.depth;
        let mut alpha = f64::NEG_INFINITY;

        let mut best_decision = if ctx.to_call == 0 {
            Decision::Check
        } else {
            Decision::Call
        };
        let mut best_value = self.min_node(
            strength,
            ctx.pot,
            ctx.to_call,
            depth,
            alpha,
            f64::INFINITY,
            on_button,
            false,
        );
        alpha = alpha.max(best_value);

        if ctx.to_call > 0 {
            let penalty = if ctx.to_call < ctx.state.big_blind.saturating_mul(2) {
                CHEAP_FOLD_PENALTY
            } else {
                STANDARD_FOLD_PENALTY
            };
            let fold_value = ev::fold_ev(ctx.state.hero_bet) - penalty;
            if fold_value > best_value {
                best_decision = Decision::Fold;
                best_value = fold_value;
                alpha = alpha.max(best_value);
            }
        }

        for raise in ev::raise_candidates(ctx.state) {
            let value = self.min_node(
                strength,
                ctx.pot,
                raise,
                depth,
                alpha,
                f64::INFINITY,
                on_button,
                true,
            );
            if value > best_value {
                best_decision = Decision::Raise(raise);
                best_value = value;
                alpha = alpha.max(best_value);
            }
        }

        Ok(legalize(best_decision, ctx.state))
    }

    /// Min node: the opponent picks whichever of fold, call or re-raise is
    /// worst for us, pruned against the alpha/beta window. The adversarial
    /// value is averaged with the showdown leaf exactly as in minimax.
    #[allow(clippy::too_many_arguments)]
    fn min_node(
        &mut self,
        strength: f64,
        pot: u32,
        bet: u32,
        depth: u8,
        alpha: f64,
        beta: f64,
        on_button: bool,
        raising: bool,
    ) -> f64 {
        let leaf = search_leaf_value(strength, pot, bet, on_button, raising);
        if depth == 0 || bet == 0 {
            return leaf;
        }

        let opponent_strength = self.rng.gen_range(0.5..0.8);
        let mut beta = beta;

        // Opponent folds: the pot is ours.
        let mut value = pot as f64;
        beta = beta.min(value);

        if alpha < beta {
            let showdown = if strength > opponent_strength {
                (pot + bet) as f64
            } else {
                -(bet as f64)
            };
            value = value.min(showdown);
            beta = beta.min(value);
        }

        if alpha < beta {
            for next in continuations(pot, bet) {
                let continued =
                    self.max_node(strength, pot + next, next, depth - 1, alpha, beta, on_button);
                value = value.min(continued);
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
        }

        0.5 * leaf + 0.5 * value
    }

    /// Max node after the opponent re-raises to `bet`: call it down, give
    /// up, or re-raise again.
    #[allow(clippy::too_many_arguments)]
    fn max_node(
        &mut self,
        strength: f64,
        pot: u32,
        bet: u32,
        depth: u8,
        alpha: f64,
        beta: f64,
        on_button: bool,
    ) -> f64 {
        let call = search_leaf_value(strength, pot, bet, on_button, false);
        if depth == 0 {
            return call;
        }

        let mut alpha = alpha;
        let mut value = call.max(ev::fold_ev(bet));
        alpha = alpha.max(value);

        if alpha < beta {
            for next in continuations(pot, bet) {
                let raised = self.min_node(
                    strength,
                    pot + next,
                    next,
                    depth - 1,
                    alpha,
                    beta,
                    on_button,
                    true,
                );
                value = value.max(raised);
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
        }

        value
    }
}

impl Default for AlphaBetaStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AlphaBetaStrategy {
    fn name(&self) -> &'static str {
        "alpha-beta"
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

/// Synthetic re-raise sizes: double the current bet, half pot and full pot.
fn continuations(pot: u32, bet: u32) -> Vec<u32> {
    let mut sizes = vec![bet.saturating_mul(2), pot / 2, pot];
    sizes.sort_unstable();
    sizes.dedup();
    sizes.retain(|&size| size > 0);
    sizes
}
