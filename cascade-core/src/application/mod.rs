pub mod sequencer;

pub use sequencer::{FallbackSequencer, ProviderStatus};
