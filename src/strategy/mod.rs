//! Strategy module
//!
//! Strategies are selected by [`StrategyKind`] and driven through the
//! [`Strategy`] trait. The bundled strategies carry a name and version and
//! log a startup message; their hooks do not trade yet.
//!
//! # Example
//!
//! ```ignore
//! let kind: StrategyKind = "hedge".parse()?;
//! let mut strategy = load_strategy(kind);
//! strategy.position_entry(&exchange, &ctx).await?;
//! ```

mod stub;
mod traits;
mod types;

pub use stub::{load_strategy, StubStrategy};
pub use traits::{BoxedStrategy, Strategy, UNLOADED_NAME, UNLOADED_VERSION};
pub use types::{StrategyContext, StrategyKind};
