pub mod ev;
pub mod opponent;
pub mod strategy;
pub mod trace;

pub use opponent::{OpponentModel, OpponentModelTable};
pub use strategy::{
    AlphaBetaStrategy, BayesianStrategy, DecisionOutcome, ExpectimaxStrategy, MinimaxStrategy,
    MonteCarloStrategy, PositionStrategy, Strategy, StrategyContext, StrategyKind,
    WeightedSimulationStrategy,
};
pub use trace::{DecisionTrace, TraceNode};
