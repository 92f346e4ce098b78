use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Preferred voice gender, as understood by the synthesis provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlVoiceGender {
    #[serde(rename = "SSML_VOICE_GENDER_UNSPECIFIED")]
    Unspecified,
    Male,
    Female,
    #[default]
    Neutral,
}

impl SsmlVoiceGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            SsmlVoiceGender::Unspecified => "SSML_VOICE_GENDER_UNSPECIFIED",
            SsmlVoiceGender::Male => "MALE",
            SsmlVoiceGender::Female => "FEMALE",
            SsmlVoiceGender::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SsmlVoiceGender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SsmlVoiceGender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unspecified" | "ssml_voice_gender_unspecified" => Ok(SsmlVoiceGender::Unspecified),
            "male" => Ok(SsmlVoiceGender::Male),
            "female" => Ok(SsmlVoiceGender::Female),
            "neutral" => Ok(SsmlVoiceGender::Neutral),
            other => Err(format!("unknown voice gender: {}", other)),
        }
    }
}

/// Output audio format written to the destination object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// Uncompressed 16-bit signed little-endian PCM with a WAV header
    #[default]
    #[serde(rename = "LINEAR16")]
    Linear16,
    #[serde(rename = "MP3")]
    Mp3,
    OggOpus,
    Mulaw,
    Alaw,
}

impl AudioEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Linear16 => "LINEAR16",
            AudioEncoding::Mp3 => "MP3",
            AudioEncoding::OggOpus => "OGG_OPUS",
            AudioEncoding::Mulaw => "MULAW",
            AudioEncoding::Alaw => "ALAW",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AudioEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "linear16" | "wav" | "pcm" => Ok(AudioEncoding::Linear16),
            "mp3" => Ok(AudioEncoding::Mp3),
            "ogg_opus" | "opus" => Ok(AudioEncoding::OggOpus),
            "mulaw" => Ok(AudioEncoding::Mulaw),
            "alaw" => Ok(AudioEncoding::Alaw),
            other => Err(format!("unknown audio encoding: {}", other)),
        }
    }
}

/// Voice parameters sent along with the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    pub language_code: String,
    /// `None` lets the provider pick a voice for the language
    pub name: Option<String>,
    pub ssml_gender: SsmlVoiceGender,
}

/// Everything needed to run one synthesis invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisJob {
    pub text_file_path: PathBuf,
    /// Storage object that receives the audio, e.g. `gs://bucket/folder/file.wav`
    pub destination_uri: String,
    pub language_code: String,
    pub voice_name: Option<String>,
    pub ssml_gender: SsmlVoiceGender,
    pub audio_encoding: AudioEncoding,
}

impl SynthesisJob {
    /// Job with the default locale, provider-selected voice, neutral gender and LINEAR16 output
    pub fn new(text_file_path: impl Into<PathBuf>, destination_uri: impl Into<String>) -> Self {
        Self {
            text_file_path: text_file_path.into(),
            destination_uri: destination_uri.into(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            voice_name: None,
            ssml_gender: SsmlVoiceGender::default(),
            audio_encoding: AudioEncoding::default(),
        }
    }

    pub fn with_language_code(mut self, language_code: &str) -> Self {
        self.language_code = language_code.to_string();
        self
    }

    pub fn with_voice_name(mut self, voice_name: &str) -> Self {
        self.voice_name = Some(voice_name.to_string());
        self
    }

    pub fn with_audio_encoding(mut self, audio_encoding: AudioEncoding) -> Self {
        self.audio_encoding = audio_encoding;
        self
    }
}

/// The single request built per invocation. Never mutated once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub source_text: String,
    pub voice: VoiceSelection,
    pub audio_encoding: AudioEncoding,
    pub destination_uri: String,
}

/// Opaque name of a remote long-running operation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationHandle(String);

impl OperationHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Running,
    Succeeded,
    Failed { code: i32, message: String },
}

impl OperationStatus {
    pub fn is_done(&self) -> bool {
        !matches!(self, OperationStatus::Running)
    }
}

/// Operation accepted by the provider, with the status reported at submission time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedOperation {
    pub handle: OperationHandle,
    pub status: OperationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSynthesis {
    pub operation: OperationHandle,
    pub destination_uri: String,
}

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    NotStarted,
    Submitted,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::NotStarted => "not_started",
            SubmissionState::Submitted => "submitted",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
