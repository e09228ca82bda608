/// Instrumentation for the draw loop. Counters are free when the
/// `profiling` feature is off.
pub mod profiling;

pub use profiling::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};
