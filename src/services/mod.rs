pub mod attempt_recorder;
pub mod paper_loader;
pub mod submission;

pub use attempt_recorder::AttemptRecorder;
pub use paper_loader::{LoadError, PaperLoader};
pub use submission::SubmissionCoordinator;
