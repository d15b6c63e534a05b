//! The Edit-Strategy Engine (pure transforms over canonical message
//! sequences, §4.3) and the Output Assembler (§4.5) that packages a
//! converter's result with pagination and per-message metadata.

mod assembler;
mod estimator;
mod strategies;

pub use assembler::{assemble, AssembleInput, AssembledOutput};
pub use estimator::{resolve_model_context_window, CharsDiv4Estimator, ModelAwareEstimator, TokenEstimator};
pub use strategies::{apply_strategies, StrategyOutcome, ELISION_SENTINEL};
