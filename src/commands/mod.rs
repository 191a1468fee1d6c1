//! Command implementations

pub mod analyze;
pub mod benchmark;
pub mod interactive;
pub mod precompute;
pub mod solve;

pub use analyze::{AnalysisResult, AnalyzeError, analyze_word};
pub use benchmark::{BenchmarkResult, run_benchmark};
pub use interactive::run_interactive;
pub use precompute::{PrecomputeError, PrecomputeResult, precompute_book};
pub use solve::{GuessStep, SolveConfig, SolveError, SolveResult, solve_word};
