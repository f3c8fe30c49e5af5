pub mod attempt_client;
pub mod paper_client;

pub use attempt_client::AttemptClient;
pub use paper_client::PaperClient;
