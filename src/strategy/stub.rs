//! Strategies that only announce themselves

use async_trait::async_trait;

use crate::strategy::traits::{BoxedStrategy, Strategy};
use crate::strategy::types::StrategyKind;

/// A named strategy whose hooks are all no-ops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubStrategy {
    kind: StrategyKind,
}

impl StubStrategy {
    pub fn new(kind: StrategyKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }
}

#[async_trait]
impl Strategy for StubStrategy {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn version(&self) -> &str {
        self.kind.version()
    }
}

/// Build a strategy and log its startup message
pub fn load_strategy(kind: StrategyKind) -> BoxedStrategy {
    let strategy = StubStrategy::new(kind);
    strategy.startup_message();
    Box::new(strategy)
}
