use criterion::{black_box, criterion_group, criterion_main, Criterion};

use holdem_bot::{
    ExpectimaxStrategy, MinimaxStrategy, MonteCarloStrategy, Strategy, StrategyContext,
};
use holdem_core::model::card::Card;
use holdem_core::model::rank::Rank;
use holdem_core::model::suit::Suit;
use holdem_core::state::{GameStateSnapshot, OpponentState, PlayerId};

fn flop_snapshot() -> (GameStateSnapshot, [Card; 2]) {
    let state = GameStateSnapshot {
        pot: 120,
        to_call: 40,
        big_blind: 20,
        min_raise: 40,
        community: vec![
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Nine, Suit::Hearts),
            Card::new(Rank::Four, Suit::Clubs),
        ],
        opponents: (1..=2)
            .map(|id| OpponentState {
                id: PlayerId(id),
                folded: false,
                active: true,
                chips: 1000,
                last_action: None,
            })
            .collect(),
        hero_seat: 0,
        button_seat: 0,
        player_count: 3,
        hero_chips: 1000,
        hero_bet: 0,
    };
    let hole = [
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
    ];
    (state, hole)
}

fn bench_minimax(c: &mut Criterion) {
    let (state, hole) = flop_snapshot();
    let mut strategy = MinimaxStrategy::with_seed(7);
    c.bench_function("minimax_decide_flop", |b| {
        b.iter(|| {
            let ctx = StrategyContext::new(hole, &state);
            black_box(strategy.decide(&ctx).decision)
        })
    });
}

fn bench_expectimax(c: &mut Criterion) {
    let (state, hole) = flop_snapshot();
    let mut strategy = ExpectimaxStrategy::new();
    c.bench_function("expectimax_decide_flop", |b| {
        b.iter(|| {
            let ctx = StrategyContext::new(hole, &state);
            black_box(strategy.decide(&ctx).decision)
        })
    });
}

fn bench_monte_carlo_1k(c: &mut Criterion) {
    let (state, hole) = flop_snapshot();
    let mut strategy = MonteCarloStrategy::with_seed(7).with_iterations(1_000);
    c.bench_function("monte_carlo_decide_flop_1k", |b| {
        b.iter(|| {
            let ctx = StrategyContext::new(hole, &state);
            black_box(strategy.decide(&ctx).decision)
        })
    });
}

criterion_group!(
    benches,
    bench_minimax,
    bench_expectimax,
    bench_monte_carlo_1k
);
criterion_main!(benches);
