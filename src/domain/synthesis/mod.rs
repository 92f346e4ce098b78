pub mod error;
pub mod model;
pub mod service;

pub use error::SynthesisError;
pub use model::{
    AudioEncoding, CompletedSynthesis, OperationHandle, OperationStatus, SsmlVoiceGender,
    SubmissionState, SubmittedOperation, SynthesisJob, SynthesisRequest, VoiceSelection,
};
pub use service::{build_request, AwaitSettings, SynthesisRequestSubmitter, SynthesisSubmitterApi};
