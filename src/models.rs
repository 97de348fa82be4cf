//! Data models and structures
//!
//! Defines the form fields collected from the applicant, the generation
//! options, and the runtime configuration read from the environment.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_DATA_DIR: &str = ".cover-letter";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// The reusable part of the applicant's details. This is the only data that
/// is persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileFields {
    pub name: String,
    pub recent_position: String,
    pub background: String,
}

/// Details of the job being applied for. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFields {
    pub company_name: String,
    pub target_position: String,
    pub job_description: String,
}

/// Everything the generation client needs from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverLetterInputs {
    pub profile: ProfileFields,
    pub job: JobFields,
}

impl CoverLetterInputs {
    /// Presence check for the two fields a letter cannot be written without.
    pub fn validate(&self) -> Result<()> {
        if self.profile.background.trim().is_empty() || self.job.job_description.trim().is_empty()
        {
            return Err(Error::Validation(
                "Please provide at least your background summary and the job description."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Approximate word-count target for the letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LetterLength {
    VeryShort,
    Short,
    #[default]
    Standard,
    Full,
}

impl LetterLength {
    pub const ALL: [LetterLength; 4] = [
        LetterLength::VeryShort,
        LetterLength::Short,
        LetterLength::Standard,
        LetterLength::Full,
    ];

    pub fn words(self) -> u32 {
        match self {
            LetterLength::VeryShort => 50,
            LetterLength::Short => 100,
            LetterLength::Standard => 200,
            LetterLength::Full => 500,
        }
    }
}

impl fmt::Display for LetterLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words())
    }
}

impl FromStr for LetterLength {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix("words").unwrap_or(trimmed).trim();
        LetterLength::ALL
            .into_iter()
            .find(|length| length.words().to_string() == trimmed)
            .ok_or_else(|| format!("Invalid length '{}'. Expected one of: 50, 100, 200, 500", input))
    }
}

/// Tone of the letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LetterStyle {
    #[default]
    Professional,
    ImpactOriented,
    Storytelling,
    Passionate,
    CreativeAndLively,
}

impl LetterStyle {
    pub const ALL: [LetterStyle; 5] = [
        LetterStyle::Professional,
        LetterStyle::ImpactOriented,
        LetterStyle::Storytelling,
        LetterStyle::Passionate,
        LetterStyle::CreativeAndLively,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LetterStyle::Professional => "Professional",
            LetterStyle::ImpactOriented => "Impact-Oriented",
            LetterStyle::Storytelling => "Storytelling",
            LetterStyle::Passionate => "Passionate",
            LetterStyle::CreativeAndLively => "Creative & Lively",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            LetterStyle::Professional => "professional",
            LetterStyle::ImpactOriented => "impact",
            LetterStyle::Storytelling => "storytelling",
            LetterStyle::Passionate => "passionate",
            LetterStyle::CreativeAndLively => "creative",
        }
    }
}

impl fmt::Display for LetterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LetterStyle {
    type Err = String;

    /// Accepts the display label (case-insensitive) or a short slug such as
    /// `impact` or `creative`.
    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let needle = input.trim().to_lowercase();
        LetterStyle::ALL
            .into_iter()
            .find(|style| style.label().to_lowercase() == needle || style.slug() == needle)
            .ok_or_else(|| {
                format!(
                    "Invalid style '{}'. Expected one of: professional, impact, storytelling, passionate, creative",
                    input
                )
            })
    }
}

/// The `{length, style}` pair governing the prompt. Both fields always hold
/// exactly one value; the default is 200 words, professional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    pub length: LetterLength,
    pub style: LetterStyle,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub model: String,
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl Config {
    /// Load `.env` (if any) and read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_vars(|key| std::env::var(key).ok());

        if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "GEMINI_BASE_URL must be an http(s) URL, got '{}'",
                config.api_base_url
            )));
        }
        Ok(config)
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            model: var("COVER_LETTER_MODEL", DEFAULT_MODEL),
            api_base_url: var("GEMINI_BASE_URL", DEFAULT_API_BASE_URL),
            data_dir: PathBuf::from(var("COVER_LETTER_DATA_DIR", DEFAULT_DATA_DIR)),
            output_dir: PathBuf::from(var("COVER_LETTER_OUTPUT_DIR", DEFAULT_OUTPUT_DIR)),
        }
    }
}
