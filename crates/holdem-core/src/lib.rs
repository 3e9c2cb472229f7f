#![deny(warnings)]
pub mod eval;
pub mod model;
pub mod state;

pub struct EngineInfo;

impl EngineInfo {
    pub const fn name() -> &'static str {
        "holdem-engine"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
