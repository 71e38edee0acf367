//! @ai:module:intent Subject execution and multi-suite sessions
//! @ai:module:layer application
//! @ai:module:public_api ExecutionEngine, BenchmarkSession

pub mod engine;
pub mod session;

pub use engine::ExecutionEngine;
pub use session::BenchmarkSession;
