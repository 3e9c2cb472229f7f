//! Strategy surface: the `Strategy` trait every decision engine implements,
//! the read-only context handed to it, and `StrategyKind` for selecting one
//! by name or environment variable.

mod alpha_beta;
mod bayesian;
mod expectimax;
mod minimax;
mod monte_carlo;
mod position;
mod weighted;

use core::fmt;
use std::sync::OnceLock;

use tracing::{event, Level};

use holdem_core::eval::EvalError;
use holdem_core::model::card::Card;
use holdem_core::model::street::Street;
use holdem_core::state::{Decision, GameStateSnapshot};

use crate::ev;
use crate::trace::DecisionTrace;

pub use alpha_beta::AlphaBetaStrategy;
pub use bayesian::BayesianStrategy;
pub use expectimax::ExpectimaxStrategy;
pub use minimax::MinimaxStrategy;
pub use monte_carlo::MonteCarloStrategy;
pub use position::{seat_position, PositionStrategy, SeatPosition};
pub use weighted::WeightedSimulationStrategy;

/// Everything a strategy may look at for one decision. Borrowed from the
/// snapshot; strategies never mutate game state.
pub struct StrategyContext<'a> {
    pub hole: [Card; 2],
    pub community: &'a [Card],
    pub pot: u32,
    pub to_call: u32,
    pub state: &'a GameStateSnapshot,
}

impl<'a> StrategyContext<'a> {
    pub fn new(hole: [Card; 2], state: &'a GameStateSnapshot) -> Self {
        Self {
            hole,
            community: &state.community,
            pot: state.pot,
            to_call: state.to_call,
            state,
        }
    }

    pub fn street(&self) -> Street {
        Street::from_community_count(self.community.len())
    }

    pub(crate) fn known_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(2 + self.community.len());
        cards.extend_from_slice(&self.hole);
        cards.extend_from_slice(self.community);
        cards
    }

    pub(crate) fn on_button(&self) -> bool {
        self.state.hero_seat == self.state.button_seat
    }

    /// Live opponent count with a safe default when the snapshot carries a
    /// degenerate opponent list.
    pub(crate) fn live_opponents_or_default(&self) -> usize {
        match self.state.live_opponent_count() {
            0 => {
                event!(
                    target: "holdem_bot::decide",
                    Level::DEBUG,
                    "no live opponents in snapshot, assuming 3"
                );
                3
            }
            n => n,
        }
    }
}

/// A decision plus an optional search trace. Only the expectimax strategy
/// populates the trace.
#[derive(Debug, Clone)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub trace: Option<DecisionTrace>,
}

impl DecisionOutcome {
    pub fn plain(decision: Decision) -> Self {
        Self {
            decision,
            trace: None,
        }
    }

    pub fn with_trace(decision: Decision, trace: DecisionTrace) -> Self {
        Self {
            decision,
            trace: Some(trace),
        }
    }
}

pub trait Strategy: Send {
    fn name(&self) -> &'static str;

    /// Produces a legal decision for the snapshot. Implementations absorb
    /// internal errors and fall back to a conservative line rather than
    /// surfacing them.
    fn decide(&mut self, ctx: &StrategyContext<'_>) -> DecisionOutcome;
}

/// Internal failure while computing a decision. Strategies convert these
/// into the conservative fallback at their public boundary.
#[derive(Debug)]
pub enum DecisionError {
    Eval(EvalError),
}

impl fmt::Display for DecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionError::Eval(err) => write!(f, "hand evaluation failed: {err}"),
        }
    }
}

impl std::error::Error for DecisionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecisionError::Eval(err) => Some(err),
        }
    }
}

impl From<EvalError> for DecisionError {
    fn from(err: EvalError) -> Self {
        DecisionError::Eval(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Minimax,
    AlphaBeta,
    Expectimax,
    MonteCarlo,
    WeightedSimulation,
    Bayesian,
    PositionBased,
}

const STRATEGY_ENV: &str = "HOLDEM_BOT_STRATEGY";

impl StrategyKind {
    pub const DEFAULT: StrategyKind = StrategyKind::MonteCarlo;

    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Minimax => Box::new(MinimaxStrategy::new()),
            StrategyKind::AlphaBeta => Box::new(AlphaBetaStrategy::new()),
            StrategyKind::Expectimax => Box::new(ExpectimaxStrategy::new()),
            StrategyKind::MonteCarlo => Box::new(MonteCarloStrategy::new()),
            StrategyKind::WeightedSimulation => Box::new(WeightedSimulationStrategy::new()),
            StrategyKind::Bayesian => Box::new(BayesianStrategy::new()),
            StrategyKind::PositionBased => Box::new(PositionStrategy::new()),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "minimax" => Some(StrategyKind::Minimax),
            "alpha-beta" | "alpha_beta" | "alphabeta" => Some(StrategyKind::AlphaBeta),
            "expectimax" => Some(StrategyKind::Expectimax),
            "monte-carlo" | "monte_carlo" | "montecarlo" => Some(StrategyKind::MonteCarlo),
            "weighted" | "weighted-simulation" | "weighted_simulation" => {
                Some(StrategyKind::WeightedSimulation)
            }
            "bayesian" => Some(StrategyKind::Bayesian),
            "position" | "position-based" | "position_based" => Some(StrategyKind::PositionBased),
            _ => None,
        }
    }

    /// Reads `HOLDEM_BOT_STRATEGY` once and caches the result for the life
    /// of the process. Unknown values log a warning and fall back to the
    /// default.
    pub fn from_env() -> Self {
        static CACHED: OnceLock<StrategyKind> = OnceLock::new();
        *CACHED.get_or_init(|| match std::env::var(STRATEGY_ENV) {
            Ok(raw) => StrategyKind::parse(&raw).unwrap_or_else(|| {
                event!(
                    target: "holdem_bot::decide",
                    Level::WARN,
                    value = raw.as_str(),
                    "unrecognized strategy name, using default"
                );
                StrategyKind::DEFAULT
            }),
            Err(_) => StrategyKind::DEFAULT,
        })
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Minimax => "minimax",
            StrategyKind::AlphaBeta => "alpha-beta",
            StrategyKind::Expectimax => "expectimax",
            StrategyKind::MonteCarlo => "monte-carlo",
            StrategyKind::WeightedSimulation => "weighted-simulation",
            StrategyKind::Bayesian => "bayesian",
            StrategyKind::PositionBased => "position-based",
        };
        f.write_str(name)
    }
}

const STRENGTH_BONUS_SCALE: f64 = 8.0;
const BUTTON_BONUS: f64 = 6.0;

/// Leaf valuation shared by the tree-search strategies: raw EV plus a
/// strength-scaled aggression bonus, plus a positional bonus on the button.
pub(crate) fn search_leaf_value(
    strength: f64,
    pot: u32,
    commit: u32,
    on_button: bool,
    raising: bool,
) -> f64 {
    let base = if raising {
        ev::raise_ev(strength, pot, commit)
    } else {
        ev::call_ev(strength, pot, commit)
    };
    let mut value = base + strength * STRENGTH_BONUS_SCALE;
    if on_button {
        value += BUTTON_BONUS;
    }
    value
}

/// The conservative line every strategy degrades to on internal failure:
/// check when free, call when cheap, otherwise fold.
pub(crate) fn fallback_decision(state: &GameStateSnapshot) -> Decision {
    if state.to_call == 0 {
        Decision::Check
    } else if state.to_call <= ev::SMALL_BET_LIMIT {
        Decision::Call
    } else {
        Decision::Fold
    }
}

/// Clamps a proposed decision to the legal action set. Raises are capped to
/// the stack and downgraded when they cannot beat the call amount or the
/// minimum raise; check facing a bet becomes call.
pub(crate) fn legalize(decision: Decision, state: &GameStateSnapshot) -> Decision {
    match decision {
        Decision::Check if state.to_call > 0 => Decision::Call,
        Decision::Raise(amount) => {
            let amount = amount.min(state.hero_chips);
            if amount > state.to_call && amount >= state.min_raise {
                Decision::Raise(amount)
            } else if state.to_call == 0 {
                Decision::Check
            } else {
                Decision::Call
            }
        }
        other => other,
    }
}

/// Largest candidate raise at or below `target`, falling back to the
/// smallest legal raise. `None` when the stack cannot raise.
pub(crate) fn raise_near(state: &GameStateSnapshot, target: u32) -> Option<u32> {
    let candidates = ev::raise_candidates(state);
    candidates
        .iter()
        .rev()
        .find(|&&amount| amount <= target)
        .or_else(|| candidates.first())
        .copied()
}

pub(crate) fn log_decision(name: &str, ctx: &StrategyContext<'_>, decision: Decision) {
    event!(
        target: "holdem_bot::decide",
        Level::INFO,
        strategy = name,
        street = %ctx.street(),
        pot = ctx.pot,
        to_call = ctx.to_call,
        decision = %decision,
    );
}

pub(crate) fn log_fallback(name: &str, err: &DecisionError) {
    event!(
        target: "holdem_bot::decide",
        Level::WARN,
        strategy = name,
        error = %err,
        "decision failed, using conservative fallback",
    );
}
