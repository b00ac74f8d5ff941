//! Agent compositions for each business stage, and the sequential build
//! that chains them.

pub mod context;
pub mod operations;
pub mod orchestrator;
pub mod outcome;
pub mod stages;
pub mod templates;
pub mod types;

pub use context::{BuildEvent, BuildRequest};
pub use operations::{DEFAULT_LEAD_COUNT, Pipeline};
pub use orchestrator::{BuildObserver, BuildOrchestrator};
pub use outcome::{BuildOutcome, BuildOutputs};
pub use types::StageKind;
