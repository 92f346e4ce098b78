use super::synthesis_repository::LongAudioRepository;
use crate::domain::synthesis::{
    AudioEncoding, OperationHandle, OperationStatus, SsmlVoiceGender, SubmittedOperation,
    SynthesisRequest,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "https://texttospeech.googleapis.com";
pub const DEFAULT_LOCATION: &str = "global";

/// Where and as whom to call the Text-to-Speech API
#[derive(Debug, Clone)]
pub struct GoogleCloudSettings {
    pub api_endpoint: String,
    pub project_id: String,
    pub location: String,
    /// OAuth2 access token, e.g. from `gcloud auth print-access-token`
    pub access_token: String,
}

impl GoogleCloudSettings {
    /// `projects/{project}/locations/{location}`
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LongAudioRequestBody<'a> {
    input: SynthesisInputBody<'a>,
    voice: VoiceSelectionBody<'a>,
    audio_config: AudioConfigBody,
    output_gcs_uri: &'a str,
}

#[derive(Debug, Serialize)]
struct SynthesisInputBody<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionBody<'a> {
    language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    ssml_gender: SsmlVoiceGender,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfigBody {
    audio_encoding: AudioEncoding,
}

impl<'a> From<&'a SynthesisRequest> for LongAudioRequestBody<'a> {
    fn from(request: &'a SynthesisRequest) -> Self {
        Self {
            input: SynthesisInputBody {
                text: &request.source_text,
            },
            voice: VoiceSelectionBody {
                language_code: &request.voice.language_code,
                name: request.voice.name.as_deref(),
                ssml_gender: request.voice.ssml_gender,
            },
            audio_config: AudioConfigBody {
                audio_encoding: request.audio_encoding,
            },
            output_gcs_uri: &request.destination_uri,
        }
    }
}

/// google.longrunning.Operation, reduced to the fields we act on
#[derive(Debug, Deserialize)]
struct OperationResource {
    name: String,
    #[serde(default)]
    done: bool,
    error: Option<RpcStatus>,
}

/// google.rpc.Status
#[derive(Debug, Deserialize)]
struct RpcStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

impl OperationResource {
    fn status(&self) -> OperationStatus {
        match (&self.error, self.done) {
            (Some(error), _) => OperationStatus::Failed {
                code: error.code,
                message: error.message.clone(),
            },
            (None, true) => OperationStatus::Succeeded,
            (None, false) => OperationStatus::Running,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
}

/// Turn a non-2xx response body into a readable message
fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{} {}: {}", status.as_u16(), code, envelope.error.message),
            None => format!("{}: {}", status.as_u16(), envelope.error.message),
        },
        Err(_) if body.trim().is_empty() => format!("{}", status),
        Err(_) => format!("{}: {}", status.as_u16(), body.trim()),
    }
}

/// Google Cloud Text-to-Speech long audio implementation of the synthesis repository
pub struct GoogleLongAudioRepository {
    http_client: reqwest::Client,
    settings: GoogleCloudSettings,
}

impl GoogleLongAudioRepository {
    pub fn new(http_client: reqwest::Client, settings: GoogleCloudSettings) -> Self {
        Self {
            http_client,
            settings,
        }
    }

    fn synthesize_url(&self) -> String {
        format!(
            "{}/v1/{}:synthesizeLongAudio",
            self.settings.api_endpoint.trim_end_matches('/'),
            self.settings.parent()
        )
    }

    fn operation_url(&self, handle: &OperationHandle) -> String {
        format!(
            "{}/v1/{}",
            self.settings.api_endpoint.trim_end_matches('/'),
            handle.name()
        )
    }

    async fn read_operation(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<OperationResource, String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("{}: failed to read response body: {}", context, e))?;

        if !status.is_success() {
            return Err(format!("{}: {}", context, describe_api_error(status, &body)));
        }

        serde_json::from_str::<OperationResource>(&body)
            .map_err(|e| format!("{}: unexpected operation payload: {}", context, e))
    }
}

#[async_trait]
impl LongAudioRepository for GoogleLongAudioRepository {
    async fn start(&self, request: &SynthesisRequest) -> Result<SubmittedOperation, String> {
        let url = self.synthesize_url();
        let body = LongAudioRequestBody::from(request);

        tracing::info!(
            parent = %self.settings.parent(),
            text_length = request.source_text.len(),
            "Calling Google synthesizeLongAudio"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.settings.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %url, "synthesizeLongAudio request failed");
                format!("synthesizeLongAudio request failed: {}", e)
            })?;

        let operation = self.read_operation(response, "synthesizeLongAudio").await?;
        let status = operation.status();

        tracing::debug!(
            operation = %operation.name,
            done = operation.done,
            "synthesizeLongAudio accepted"
        );

        Ok(SubmittedOperation {
            handle: OperationHandle::new(operation.name),
            status,
        })
    }

    async fn poll(&self, handle: &OperationHandle) -> Result<OperationStatus, String> {
        let url = self.operation_url(handle);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.settings.access_token)
            .send()
            .await
            .map_err(|e| format!("operations.get request failed: {}", e))?;

        let operation = self.read_operation(response, "operations.get").await?;
        Ok(operation.status())
    }
}
