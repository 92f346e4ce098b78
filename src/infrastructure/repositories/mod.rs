pub mod google_long_audio_repository;
pub mod synthesis_repository;

pub use google_long_audio_repository::{GoogleCloudSettings, GoogleLongAudioRepository};
pub use synthesis_repository::LongAudioRepository;
