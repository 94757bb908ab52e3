//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! through the outbound ports.

pub mod evaluation;
pub mod scheduler;

pub use evaluation::{AlertPolicy, Evaluator, Outcome};
pub use scheduler::{PollScheduler, SchedulerState, TickReport};
