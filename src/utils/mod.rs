//! Supporting machinery for the descriptor and scanning pipelines
//!
//! - Worker-pool fan-out over index ranges (the dispatcher)

pub mod dispatcher;

pub use dispatcher::run_parallel;
