//! Expectimax over chance nodes instead of an adversarial opponent: the
//! opponent folds, calls or raises with fixed probabilities, and our own
//! continuation is a strength-dependent behavioral mixture. Fully
//! deterministic, and the only strategy that emits a `DecisionTrace`.

use holdem_core::eval::strength;
use holdem_core::state::Decision;

use crate::ev;
use crate::strategy::{
    fallback_decision, legalize, log_decision, log_fallback, search_leaf_value, DecisionError,
    DecisionOutcome, Strategy, StrategyContext,
};
use crate::trace::{DecisionTrace, TraceNode};

const DEFAULT_DEPTH: u8 = 10;

/// Opponent response mixture at chance nodes. The raise mass is split
/// evenly across the synthetic raise sizes.
const OPPONENT_FOLD_P: f64 = 0.3;
const OPPONENT_CALL_P: f64 = 0.5;
const OPPONENT_RAISE_P: f64 = 0.2;

pub struct ExpectimaxStrategy {
    depth: u8,
}

impl ExpectimaxStrategy {
    pub fn new() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.max(1);
        self
    }

    fn decide_inner(
        &self,
        ctx: &StrategyContext<'_>,
    ) -> Result<(Decision, DecisionTrace), DecisionError> {
        let strength = strength::hand_strength(ctx.hole, ctx.community)?;
        let on_button = ctx.on_button();
        let mut reasoning = vec![format!("hand strength {strength:.3}")];
        let mut children = Vec::new();
        let mut options: Vec<(Decision, f64)> = Vec::new();

        let (call_decision, call_label) = if ctx.to_call == 0 {
            (Decision::Check, "check".to_string())
        } else {
            (Decision::Call, format!("call {}", ctx.to_call))
        };
        let (call_value, call_node) = self.opponent_chance(
            strength,
            ctx.pot,
            ctx.to_call,
            self.depth,
            1.0,
            on_button,
            false,
            call_label.clone(),
        );
        reasoning.push(format!("{call_label}: EV {call_value:.1}"));
        children.push(call_node);
        options.push((call_decision, call_value));

        if ctx.to_call > 0 {
            let fold_value = ev::fold_ev(ctx.state.hero_bet);
            reasoning.push(format!("fold: EV {fold_value:.1}"));
            children.push(TraceNode::leaf("fold", fold_value, 1.0));
            options.push((Decision::Fold, fold_value));
        }

        for raise in ev::raise_candidates(ctx.state) {
            let label = format!("raise {raise}");
            let (value, node) = self.opponent_chance(
                strength,
                ctx.pot,
                raise,
                self.depth,
                1.0,
                on_button,
                true,
                label.clone(),
            );
            reasoning.push(format!("{label}: EV {value:.1}"));
            children.push(node);
            options.push((Decision::Raise(raise), value));
        }

        // Options and trace children are in lockstep, so the highest-valued
        // child marked below is the decision returned here.
        let (decision, best_value) = options
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((fallback_decision(ctx.state), 0.0));
        reasoning.push(format!("chose {decision}"));

        let mut root = TraceNode::new("root", best_value, 1.0).with_children(children);
        root.mark_best_path();
        let trace = DecisionTrace::new(root, reasoning);
        Ok((legalize(decision, ctx.state), trace))
    }

    /// Chance node after we commit `commit` chips: the opponent folds,
    /// calls, or raises one of the synthetic sizes.
    #[allow(clippy::too_many_arguments)]
    fn opponent_chance(
        &self,
        strength: f64,
        pot: u32,
        commit: u32,
        depth: u8,
        reach: f64,
        on_button: bool,
        raising: bool,
        label: String,
    ) -> (f64, TraceNode) {
        let leaf_value = search_leaf_value(strength, pot, commit, on_button, raising);
        if depth == 0 || commit == 0 {
            return (leaf_value, TraceNode::leaf(label, leaf_value, reach));
        }

        let fold_value = pot as f64;
        let mut children = vec![
            TraceNode::leaf("opponent folds", fold_value, reach * OPPONENT_FOLD_P),
            TraceNode::leaf("opponent calls", leaf_value, reach * OPPONENT_CALL_P),
        ];
        let mut expected = OPPONENT_FOLD_P * fold_value + OPPONENT_CALL_P * leaf_value;

        let sizes = raise_sizes(pot);
        let per_size = OPPONENT_RAISE_P / sizes.len() as f64;
        for size in sizes {
            let (value, node) = self.hero_response(
                strength,
                pot + size,
                size,
                depth - 1,
                reach * per_size,
                on_button,
                format!("opponent raises {size}"),
            );
            expected += per_size * value;
            children.push(node);
        }

        let node = TraceNode::new(label, expected, reach).with_children(children);
        (expected, node)
    }

    /// Behavioral node for our own reply to a raise. Fold weight grows as
    /// strength falls, call weight peaks at median strength, raise weight
    /// tracks strength; the three are normalized into a mixture.
    #[allow(clippy::too_many_arguments)]
    fn hero_response(
        &self,
        strength: f64,
        pot: u32,
        bet: u32,
        depth: u8,
        reach: f64,
        on_button: bool,
        label: String,
    ) -> (f64, TraceNode) {
        let call_value = search_leaf_value(strength, pot, bet, on_button, false);
        if depth == 0 {
            return (call_value, TraceNode::leaf(label, call_value, reach));
        }

        let fold_weight = (1.0 - strength).max(0.05);
        let call_weight = (1.0 - (strength - 0.5).abs() * 2.0).max(0.05);
        let raise_weight = strength.max(0.05);
        let total = fold_weight + call_weight + raise_weight;
        let p_fold = fold_weight / total;
        let p_call = call_weight / total;
        let p_raise = raise_weight / total;

        let fold_value = ev::fold_ev(bet);
        let reraise = bet.saturating_mul(2);
        let (raise_value, raise_node) = self.opponent_chance(
            strength,
            pot + reraise,
            reraise,
            depth - 1,
            reach * p_raise,
            on_button,
            true,
            format!("we raise {reraise}"),
        );

        let expected = p_fold * fold_value + p_call * call_value + p_raise * raise_value;
        let node = TraceNode::new(label, expected, reach).with_children(vec![
            TraceNode::leaf("we fold", fold_value, reach * p_fold),
            TraceNode::leaf("we call", call_value, reach * p_call),
            raise_node,
        ]);
        (expected, node)
    }
}

impl Default for ExpectimaxStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for ExpectimaxStrategy {
    fn name(&self) -> &'static str {
        "expectimax"
    }

    fn decide(&mut self, ctx: &StrategyContext<'_>) -> DecisionOutcome {
        let (decision, trace) = match self.decide_inner(ctx) {
            Ok(result) => result,
            Err(err) => {
                log_fallback(self.name(), &err);
                let decision = fallback_decision(ctx.state);
                let root = TraceNode::leaf("conservative fallback", 0.0, 1.0);
                let trace =
                    DecisionTrace::new(root, vec![format!("internal error: {err}")]);
                (decision, trace)
            }
        };
        log_decision(self.name(), ctx, decision);
        DecisionOutcome::with_trace(decision, trace)
    }
}

/// Synthetic opponent raise sizes: half pot, pot, two pots.
fn raise_sizes(pot: u32) -> Vec<u32> {
    let mut sizes = vec![(pot / 2).max(1), pot.max(1), pot.saturating_mul(2).max(1)];
    sizes.sort_unstable();
    sizes.dedup();
    sizes
}
