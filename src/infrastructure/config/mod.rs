use crate::domain::synthesis::model::DEFAULT_LANGUAGE_CODE;
use crate::domain::synthesis::service::DEFAULT_POLL_INTERVAL;
use crate::domain::synthesis::{AudioEncoding, AwaitSettings, SsmlVoiceGender, SynthesisJob};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::google_long_audio_repository::{
    DEFAULT_API_ENDPOINT, DEFAULT_LOCATION,
};
use crate::infrastructure::repositories::GoogleCloudSettings;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Job
    pub text_file_path: PathBuf,
    pub output_gcs_uri: String,
    pub language_code: String,
    pub voice_name: Option<String>,
    pub ssml_gender: SsmlVoiceGender,
    pub audio_encoding: AudioEncoding,
    // Google Cloud
    pub project_id: String,
    pub location: String,
    pub api_endpoint: String,
    pub access_token: String,
    // Waiting
    pub poll_interval: Duration,
    pub operation_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let config = Config {
            text_file_path: PathBuf::from(require("TEXT_FILE_PATH")?),
            output_gcs_uri: require("OUTPUT_GCS_URI")?,
            language_code: get("LANGUAGE_CODE").unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string()),
            voice_name: get("VOICE_NAME"),
            ssml_gender: match get("SSML_GENDER") {
                Some(value) => value.parse().map_err(AppError::Config)?,
                None => SsmlVoiceGender::default(),
            },
            audio_encoding: match get("AUDIO_ENCODING") {
                Some(value) => value.parse().map_err(AppError::Config)?,
                None => AudioEncoding::default(),
            },
            project_id: require("GOOGLE_CLOUD_PROJECT")?,
            location: get("TTS_LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            api_endpoint: get("TTS_API_ENDPOINT").unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            access_token: require("GOOGLE_ACCESS_TOKEN")?,
            poll_interval: match get("POLL_INTERVAL_SECS") {
                Some(value) => parse_secs("POLL_INTERVAL_SECS", &value)?,
                None => DEFAULT_POLL_INTERVAL,
            },
            operation_timeout: get("OPERATION_TIMEOUT_SECS")
                .map(|value| parse_secs("OPERATION_TIMEOUT_SECS", &value))
                .transpose()?,
            log_format: match get("LOG_FORMAT").map(|s| s.to_lowercase()).as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }

    pub fn job(&self) -> SynthesisJob {
        SynthesisJob {
            text_file_path: self.text_file_path.clone(),
            destination_uri: self.output_gcs_uri.clone(),
            language_code: self.language_code.clone(),
            voice_name: self.voice_name.clone(),
            ssml_gender: self.ssml_gender,
            audio_encoding: self.audio_encoding,
        }
    }

    pub fn google_settings(&self) -> GoogleCloudSettings {
        GoogleCloudSettings {
            api_endpoint: self.api_endpoint.clone(),
            project_id: self.project_id.clone(),
            location: self.location.clone(),
            access_token: self.access_token.clone(),
        }
    }

    pub fn await_settings(&self) -> AwaitSettings {
        AwaitSettings {
            poll_interval: self.poll_interval,
            operation_timeout: self.operation_timeout,
        }
    }
}

fn parse_secs(key: &str, value: &str) -> AppResult<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{} must be a whole number of seconds: {}", key, e)))?;
    if secs == 0 {
        return Err(AppError::Config(format!("{} must be greater than zero", key)));
    }
    Ok(Duration::from_secs(secs))
}
