pub mod paper;
pub mod wire;

pub use paper::{Difficulty, ExamPaper, PaperQuestion, Question};
pub use wire::{
    ApiEnvelope, AttemptRequest, PaperData, SubmissionRequest, SubmissionResult, WireQuestion,
};
