//! Per-opponent behavioral model maintained by the Bayesian strategy. Each
//! observed action nudges a running mean, so early reads move the model a
//! lot and later ones refine it.

use std::collections::HashMap;

use holdem_core::state::{ActionKind, ObservedAction, PlayerId};

pub const MODEL_MIN: f64 = 0.1;
pub const MODEL_MAX: f64 = 0.9;

/// Bluff-frequency evidence is only collected once a flop is out; preflop
/// raises are too routine to read anything into.
const POSTFLOP_COMMUNITY: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentModel {
    /// Tendency to bet and raise.
    pub aggression: f64,
    /// How often large bets turn out to be air.
    pub bluff_frequency: f64,
    /// Willingness to call rather than fold.
    pub call_frequency: f64,
    /// Overall selectivity; tight players fold a lot.
    pub tightness: f64,
    pub observations: u64,
}

impl Default for OpponentModel {
    fn default() -> Self {
        Self {
            aggression: 0.5,
            bluff_frequency: 0.2,
            call_frequency: 0.5,
            tightness: 0.5,
            observations: 0,
        }
    }
}

impl OpponentModel {
    /// Folds one action into the model. `pot` is the pot at the time of the
    /// action and `community_count` the number of board cards out.
    pub fn observe(&mut self, action: ObservedAction, pot: u32, community_count: usize) {
        self.observations += 1;
        let n = self.observations;
        match action.kind {
            ActionKind::Raise => {
                self.aggression = blend(self.aggression, 1.0, n);
                if community_count >= POSTFLOP_COMMUNITY {
                    // A large postflop bet usually means it: read big sizing
                    // as value, smaller stabs as more likely air.
                    let overbet = pot > 0 && action.amount as f64 > pot as f64 * 0.7;
                    let bluff_sample = if overbet { 0.1 } else { 0.7 };
                    self.bluff_frequency = blend(self.bluff_frequency, bluff_sample, n);
                }
            }
            ActionKind::Call => {
                self.call_frequency = blend(self.call_frequency, 1.0, n);
                self.aggression = blend(self.aggression, 0.3, n);
            }
            ActionKind::Fold => {
                self.tightness = blend(self.tightness, 0.7, n);
                self.call_frequency = blend(self.call_frequency, 0.0, n);
            }
            ActionKind::Check => {
                self.aggression = blend(self.aggression, 0.4, n);
            }
        }
        self.clamp_all();
    }

    fn clamp_all(&mut self) {
        self.aggression = self.aggression.clamp(MODEL_MIN, MODEL_MAX);
        self.bluff_frequency = self.bluff_frequency.clamp(MODEL_MIN, MODEL_MAX);
        self.call_frequency = self.call_frequency.clamp(MODEL_MIN, MODEL_MAX);
        self.tightness = self.tightness.clamp(MODEL_MIN, MODEL_MAX);
    }
}

/// Running mean update: the new sample carries weight 1/n.
fn blend(current: f64, sample: f64, n: u64) -> f64 {
    (current * (n - 1) as f64 + sample) / n as f64
}

/// Models keyed by player identity, persisted across hands for the lifetime
/// of the strategy instance.
#[derive(Debug, Default)]
pub struct OpponentModelTable {
    models: HashMap<PlayerId, OpponentModel>,
}

impl OpponentModelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_mut(&mut self, id: PlayerId) -> &mut OpponentModel {
        self.models.entry(id).or_default()
    }

    pub fn get(&self, id: PlayerId) -> Option<&OpponentModel> {
        self.models.get(&id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raise(amount: u32) -> ObservedAction {
        ObservedAction {
            kind: ActionKind::Raise,
            amount,
        }
    }

    fn action(kind: ActionKind) -> ObservedAction {
        ObservedAction { kind, amount: 0 }
    }

    #[test]
    fn repeated_raises_push_aggression_up() {
        let mut model = OpponentModel::default();
        for _ in 0..10 {
            model.observe(raise(50), 100, 3);
        }
        assert!(model.aggression > 0.8);
    }

    #[test]
    fn repeated_folds_push_tightness_up_and_calls_down() {
        let mut model = OpponentModel::default();
        for _ in 0..10 {
            model.observe(action(ActionKind::Fold), 100, 0);
        }
        assert!(model.tightness > 0.6);
        assert!(model.call_frequency < 0.2);
    }

    #[test]
    fn bluff_reads_apply_only_postflop() {
        let mut preflop = OpponentModel::default();
        preflop.observe(raise(200), 100, 0);
        assert_eq!(preflop.bluff_frequency, OpponentModel::default().bluff_frequency);

        // Small stabs push the bluff read up, overbets push it down.
        let mut stabber = OpponentModel::default();
        for _ in 0..5 {
            stabber.observe(raise(30), 100, 3);
        }
        assert!(stabber.bluff_frequency > OpponentModel::default().bluff_frequency);

        let mut overbetter = OpponentModel::default();
        for _ in 0..5 {
            overbetter.observe(raise(200), 100, 3);
        }
        assert!(overbetter.bluff_frequency < OpponentModel::default().bluff_frequency);
    }

    #[test]
    fn all_fields_stay_within_bounds() {
        let mut model = OpponentModel::default();
        for i in 0..200 {
            let kind = match i % 4 {
                0 => ActionKind::Raise,
                1 => ActionKind::Call,
                2 => ActionKind::Fold,
                _ => ActionKind::Check,
            };
            model.observe(
                ObservedAction {
                    kind,
                    amount: (i * 7) as u32,
                },
                100,
                (i % 6) as usize,
            );
            for value in [
                model.aggression,
                model.bluff_frequency,
                model.call_frequency,
                model.tightness,
            ] {
                assert!((MODEL_MIN..=MODEL_MAX).contains(&value));
            }
        }
        assert_eq!(model.observations, 200);
    }

    #[test]
    fn first_observation_moves_fast_later_ones_slowly() {
        let mut model = OpponentModel::default();
        model.observe(action(ActionKind::Call), 100, 0);
        let after_one = model.call_frequency;
        for _ in 0..50 {
            model.observe(action(ActionKind::Call), 100, 0);
        }
        let step = model.call_frequency - after_one;
        assert!(after_one > 0.7);
        assert!(step.abs() < after_one - 0.5);
    }

    #[test]
    fn table_hands_out_per_player_models() {
        let mut table = OpponentModelTable::new();
        table.model_mut(PlayerId(1)).observe(raise(60), 100, 3);
        table.model_mut(PlayerId(2)).observe(action(ActionKind::Fold), 100, 3);
        assert_eq!(table.len(), 2);
        assert!(table.get(PlayerId(1)).unwrap().aggression > 0.5);
        assert!(table.get(PlayerId(2)).unwrap().tightness > 0.5);
        assert!(table.get(PlayerId(3)).is_none());
    }
}
