//! Pipeline coordinator

mod orchestrator;

pub use orchestrator::{ProviderHealth, RagOrchestrator, MAX_PAGE_SIZE};
