use crate::domain::synthesis::{OperationHandle, OperationStatus, SubmittedOperation, SynthesisRequest};
use async_trait::async_trait;

/// Repository for long-form speech synthesis.
/// Abstracts the remote provider that runs synthesis out-of-process and writes
/// the audio to the request's destination URI.
///
/// Implementations are responsible for:
/// - Mapping the request onto the provider's wire format
/// - Authenticating against the provider
/// - Translating the provider's operation resource into an `OperationStatus`
#[async_trait]
pub trait LongAudioRepository: Send + Sync {
    /// Submit the request and return the handle of the started operation
    ///
    /// # Errors
    /// Returns error if the provider rejects the request or is unreachable
    async fn start(&self, request: &SynthesisRequest) -> Result<SubmittedOperation, String>;

    /// Fetch the current status of a previously started operation
    ///
    /// # Errors
    /// Returns error if the status could not be retrieved. A job that ran and
    /// failed is reported as `OperationStatus::Failed`, not as an error.
    async fn poll(&self, handle: &OperationHandle) -> Result<OperationStatus, String>;
}
