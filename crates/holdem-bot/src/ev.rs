//! Shared expected-value arithmetic. Every strategy scores fold/call/raise
//! lines through these formulas so their outputs stay comparable.

use holdem_core::state::GameStateSnapshot;

/// Bets at or below this amount are treated as cheap: calling them gets a
/// small bonus and the conservative fallback is willing to pay them.
pub const SMALL_BET_LIMIT: u32 = 20;

/// Flat EV bonus for calling a cheap bet. Keeps the engine from folding to
/// probe bets it can see a card with.
pub const SMALL_BET_BONUS: f64 = 5.0;

/// Flat EV bonus on raise lines, encoding fold equity the raw showdown
/// arithmetic cannot see.
pub const AGGRESSION_BONUS: f64 = 10.0;

/// Penalty applied to folding after chips are already committed.
pub const FOLD_PENALTY: f64 = 10.0;

/// Pot fractions used to generate candidate raise sizes.
pub const RAISE_POT_FRACTIONS: [f64; 5] = [0.5, 0.75, 1.0, 1.5, 2.0];

/// EV of calling `call_amount` into `pot` with the given win probability.
pub fn call_ev(win_probability: f64, pot: u32, call_amount: u32) -> f64 {
    let pot = pot as f64;
    let call = call_amount as f64;
    let mut value = win_probability * pot - (1.0 - win_probability) * call;
    if call_amount <= SMALL_BET_LIMIT {
        value += SMALL_BET_BONUS;
    }
    value
}

/// EV of raising by `raise_amount`. The raise is assumed called, so the pot
/// we win grows by our own raise; the aggression bonus stands in for the
/// times the opponent folds instead.
pub fn raise_ev(win_probability: f64, pot: u32, raise_amount: u32) -> f64 {
    let pot = pot as f64;
    let raise = raise_amount as f64;
    win_probability * (pot + raise) - (1.0 - win_probability) * raise + AGGRESSION_BONUS
}

/// EV of folding: the chips already committed this round are gone, plus a
/// flat penalty so marginal spots prefer continuing.
pub fn fold_ev(current_bet: u32) -> f64 {
    -(current_bet as f64) - FOLD_PENALTY
}

/// Legal raise sizes worth considering: the minimum raise plus a ladder of
/// pot fractions, deduplicated, each affordable and strictly above the call
/// amount. Empty when the stack cannot raise at all.
pub fn raise_candidates(state: &GameStateSnapshot) -> Vec<u32> {
    let mut sizes = vec![state.min_raise];
    for fraction in RAISE_POT_FRACTIONS {
        sizes.push((state.pot as f64 * fraction) as u32);
    }
    sizes.sort_unstable();
    sizes.dedup();
    sizes.retain(|&amount| {
        amount >= state.min_raise && amount > state.to_call && amount <= state.hero_chips
    });
    sizes
}
