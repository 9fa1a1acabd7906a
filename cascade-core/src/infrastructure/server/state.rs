use crate::application::FallbackSequencer;
use std::sync::Arc;

pub struct ServerState {
    sequencer: Arc<FallbackSequencer>,
}

impl ServerState {
    pub fn new(sequencer: Arc<FallbackSequencer>) -> Self {
        Self { sequencer }
    }

    pub fn sequencer(&self) -> &FallbackSequencer {
        &self.sequencer
    }
}
