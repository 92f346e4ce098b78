use super::error::SynthesisError;
use super::model::{
    CompletedSynthesis, OperationHandle, OperationStatus, SubmissionState, SynthesisJob,
    SynthesisRequest, VoiceSelection,
};
use crate::infrastructure::repositories::LongAudioRepository;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How the submitter waits on a remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwaitSettings {
    pub poll_interval: Duration,
    /// `None` waits for as long as the operation runs
    pub operation_timeout: Option<Duration>,
}

impl Default for AwaitSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            operation_timeout: None,
        }
    }
}

/// Build the request for a job. The text is taken verbatim.
pub fn build_request(job: &SynthesisJob, source_text: String) -> SynthesisRequest {
    SynthesisRequest {
        source_text,
        voice: VoiceSelection {
            language_code: job.language_code.clone(),
            name: job.voice_name.clone(),
            ssml_gender: job.ssml_gender,
        },
        audio_encoding: job.audio_encoding,
        destination_uri: job.destination_uri.clone(),
    }
}

pub struct SynthesisRequestSubmitter {
    repo: Arc<dyn LongAudioRepository>,
    settings: AwaitSettings,
}

impl SynthesisRequestSubmitter {
    pub fn new(repo: Arc<dyn LongAudioRepository>, settings: AwaitSettings) -> Self {
        Self { repo, settings }
    }
}

#[async_trait]
pub trait SynthesisSubmitterApi: Send + Sync {
    /// Synthesize the job's text file into its destination URI
    ///
    /// This operation:
    /// - Reads the whole text file (fails before any remote call if it can't)
    /// - Submits exactly one request to the provider
    /// - Waits until the remote operation resolves, the timeout expires or
    ///   `cancel` fires
    ///
    /// `cancel` is honoured at every step. Once the request has been accepted,
    /// cancelling only stops the local wait; the remote job keeps running.
    async fn submit(
        &self,
        job: &SynthesisJob,
        cancel: CancellationToken,
    ) -> Result<CompletedSynthesis, SynthesisError>;
}

#[async_trait]
impl SynthesisSubmitterApi for SynthesisRequestSubmitter {
    async fn submit(
        &self,
        job: &SynthesisJob,
        cancel: CancellationToken,
    ) -> Result<CompletedSynthesis, SynthesisError> {
        let mut state = SubmissionState::NotStarted;

        // 1. Read the source text
        let source_text =
            until_cancelled(&cancel, "reading source text", self.read_source_text(job)).await?;

        tracing::info!(
            path = %job.text_file_path.display(),
            text_length = source_text.len(),
            state = %state,
            "Source text loaded"
        );

        // 2. Build the request
        let request = build_request(job, source_text);

        tracing::info!(
            language_code = %request.voice.language_code,
            voice = request.voice.name.as_deref().unwrap_or("<provider default>"),
            ssml_gender = %request.voice.ssml_gender,
            audio_encoding = %request.audio_encoding,
            destination_uri = %request.destination_uri,
            "Submitting long audio synthesis request"
        );

        // 3. Submit it once
        let start = async {
            self.repo.start(&request).await.map_err(|e| {
                tracing::error!(
                    error = %e,
                    state = %SubmissionState::Failed,
                    "Long audio synthesis submission rejected"
                );
                SynthesisError::RemoteSubmission(e)
            })
        };
        let submitted = until_cancelled(&cancel, "submitting request", start).await?;
        state = SubmissionState::Submitted;

        println!("Long audio synthesis in progress...");

        tracing::info!(
            operation = %submitted.handle,
            state = %state,
            "Long audio synthesis in progress"
        );

        // 4. Wait for the operation to resolve
        let outcome = self
            .await_completion(&submitted.handle, submitted.status, cancel)
            .await;

        state = if outcome.is_ok() {
            SubmissionState::Succeeded
        } else {
            SubmissionState::Failed
        };

        match outcome {
            Ok(()) => {
                println!("Long audio synthesis complete!");
                tracing::info!(
                    operation = %submitted.handle,
                    destination_uri = %request.destination_uri,
                    state = %state,
                    "Long audio synthesis complete"
                );
                Ok(CompletedSynthesis {
                    operation: submitted.handle,
                    destination_uri: request.destination_uri,
                })
            }
            Err(e) => {
                tracing::error!(
                    operation = %submitted.handle,
                    error = %e,
                    state = %state,
                    "Long audio synthesis did not complete"
                );
                Err(e)
            }
        }
    }
}

/// Run one step before submission, giving up as soon as `cancel` fires
async fn until_cancelled<T, F>(
    cancel: &CancellationToken,
    step: &str,
    fut: F,
) -> Result<T, SynthesisError>
where
    F: Future<Output = Result<T, SynthesisError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::warn!(step, "Cancelled before the request was accepted");
            Err(SynthesisError::Cancelled(step.to_string()))
        }
        result = fut => result,
    }
}

impl SynthesisRequestSubmitter {
    async fn read_source_text(&self, job: &SynthesisJob) -> Result<String, SynthesisError> {
        tokio::fs::read_to_string(&job.text_file_path)
            .await
            .map_err(|e| SynthesisError::read(job.text_file_path.clone(), e))
    }

    /// Race the poll loop against the timeout and the cancellation token
    async fn await_completion(
        &self,
        handle: &OperationHandle,
        initial: OperationStatus,
        cancel: CancellationToken,
    ) -> Result<(), SynthesisError> {
        let wait = self.poll_until_done(handle, initial);

        let bounded = async move {
            match self.settings.operation_timeout {
                Some(limit) => match tokio::time::timeout(limit, wait).await {
                    Ok(result) => result,
                    Err(_) => Err(SynthesisError::Timeout {
                        operation: handle.to_string(),
                        limit,
                    }),
                },
                None => wait.await,
            }
        };

        // A finished operation wins over a cancellation that arrives at the same time
        tokio::select! {
            biased;
            result = bounded => result,
            _ = cancel.cancelled() => {
                tracing::warn!(operation = %handle, "Stopped waiting; remote operation keeps running");
                Err(SynthesisError::Cancelled(handle.to_string()))
            }
        }
    }

    async fn poll_until_done(
        &self,
        handle: &OperationHandle,
        initial: OperationStatus,
    ) -> Result<(), SynthesisError> {
        let mut status = initial;
        let mut polls: u32 = 0;

        loop {
            match status {
                OperationStatus::Succeeded => return Ok(()),
                OperationStatus::Failed { code, message } => {
                    return Err(SynthesisError::RemoteOperation {
                        operation: handle.to_string(),
                        message: format!("{} (code {})", message, code),
                    });
                }
                OperationStatus::Running => {}
            }

            tokio::time::sleep(self.settings.poll_interval).await;
            polls += 1;

            status = self.repo.poll(handle).await.map_err(|e| {
                SynthesisError::RemoteOperation {
                    operation: handle.to_string(),
                    message: e,
                }
            })?;

            tracing::debug!(operation = %handle, polls, done = status.is_done(), "Polled operation");
        }
    }
}
