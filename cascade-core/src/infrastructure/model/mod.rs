//! Model infrastructure module
//!
//! Provider adapters behind one attempt contract, plus the polling protocol
//! used by job-based providers.
//!
//! # Structure
//! - `types` - Provider error taxonomy
//! - `traits` - ProviderAdapter trait
//! - `polling` - AsyncJob state machine and poll loop
//! - `factory` - Builds the adapter registry from config
//! - `clients` - Individual adapter implementations

pub mod clients;
pub mod factory;
pub mod polling;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use factory::ProviderFactory;
pub use polling::{AsyncJob, JobSnapshot, JobStatus, JobStatusSource, PollingPolicy, poll_job};
pub use traits::ProviderAdapter;
pub use types::ProviderError;
