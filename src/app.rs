//! Form/session controller.
//!
//! Owns the field values, the selected options, the last result or error,
//! and the transient UI flags. All host capabilities (generation, profile
//! storage, clipboard, PDF) are injected so the controller can be driven
//! from the CLI or from tests alike.

use crate::ai::{CoverLetterService, GeminiCoverLetterClient};
use crate::clipboard::{ClipboardService, SystemClipboard};
use crate::credentials::{CredentialSource, EnvCredentialSource};
use crate::models::{
    Config, CoverLetterInputs, GenerationConfig, JobFields, LetterLength, LetterStyle,
    ProfileFields,
};
use crate::pdf::{PdfExporter, PdfService, DOCUMENT_TITLE};
use crate::profile::{FileProfileStore, ProfileStore};
use crate::Result;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// How long the "copied" / "saved" confirmations stay visible.
pub const FLASH_DURATION: Duration = Duration::from_secs(2);

pub const CLEAR_PROFILE_PROMPT: &str = "Are you sure you want to clear your saved profile?";
pub const PDF_FAILURE_MESSAGE: &str =
    "Failed to generate PDF. You can still copy the text manually.";

/// What happens when `generate` is called while a previous call is still in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// The newest call wins; completions of earlier calls are discarded.
    #[default]
    Supersede,
    /// Calls made while busy are dropped without side effects.
    Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub overlap: OverlapPolicy,
}

/// Result of one `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The letter was generated and stored as the current result.
    Completed(String),
    /// The generation call failed; the message was stored as the inline error.
    Failed(String),
    /// Required fields were missing; nothing was sent.
    Rejected(String),
    /// A newer call was issued before this one finished; its result was dropped.
    Superseded,
    /// Another call was in flight and the policy is [`OverlapPolicy::Ignore`].
    Ignored,
}

/// Snapshot of everything a front end needs to draw the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub profile: ProfileFields,
    pub job: JobFields,
    pub config: GenerationConfig,
    pub result: String,
    pub error: Option<String>,
    pub is_generating: bool,
    pub copied: bool,
    pub profile_saved: bool,
    pub api_key_present: bool,
    pub can_generate: bool,
}

#[derive(Default)]
struct SessionState {
    inputs: CoverLetterInputs,
    config: GenerationConfig,
    result: String,
    error: String,
    busy: bool,
    latest_request: u64,
    copied_at: Option<Instant>,
    saved_at: Option<Instant>,
}

impl SessionState {
    fn set_error(&mut self, message: impl Into<String>) {
        self.error = message.into();
    }
}

fn flashing(since: Option<Instant>) -> bool {
    since.is_some_and(|at| at.elapsed() < FLASH_DURATION)
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub generator: Box<dyn CoverLetterService>,
    pub profiles: Box<dyn ProfileStore>,
    pub clipboard: Box<dyn ClipboardService>,
    pub pdf: Box<dyn PdfService>,
    pub credentials: Arc<dyn CredentialSource>,
}

pub struct App {
    generator: Box<dyn CoverLetterService>,
    profiles: Box<dyn ProfileStore>,
    clipboard: Box<dyn ClipboardService>,
    pdf: Box<dyn PdfService>,
    credentials: Arc<dyn CredentialSource>,
    overlap: OverlapPolicy,
    state: Mutex<SessionState>,
}

impl App {
    /// Build an app from concrete service dependencies and restore any saved
    /// profile.
    pub fn with_services(services: AppServices, options: AppOptions) -> Self {
        let app = Self {
            generator: services.generator,
            profiles: services.profiles,
            clipboard: services.clipboard,
            pdf: services.pdf,
            credentials: services.credentials,
            overlap: options.overlap,
            state: Mutex::new(SessionState::default()),
        };
        app.restore_profile();
        app
    }

    /// Construct an app wired to Gemini, the profile file, the system
    /// clipboard, and the PDF exporter described by `config`.
    pub fn new(config: &Config) -> Self {
        let credentials: Arc<dyn CredentialSource> = Arc::new(EnvCredentialSource::default());

        let generator = GeminiCoverLetterClient::new(config.model.clone(), credentials.clone())
            .with_base_url(config.api_base_url.clone());
        info!(
            "Generation provider: Gemini (model: {}, base URL: {})",
            generator.model(),
            config.api_base_url
        );

        Self::with_services(
            AppServices {
                generator: Box::new(generator),
                profiles: Box::new(FileProfileStore::new(&config.data_dir)),
                clipboard: Box::new(SystemClipboard::new()),
                pdf: Box::new(PdfExporter::new(&config.output_dir)),
                credentials,
            },
            AppOptions::default(),
        )
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn restore_profile(&self) {
        match self.profiles.load() {
            Ok(Some(profile)) => {
                info!("Restored saved profile");
                self.state().inputs.profile = profile;
            }
            Ok(None) => debug!("No saved profile to restore"),
            Err(e) => warn!("Failed to load saved profile, starting empty: {}", e),
        }
    }

    pub fn set_name(&self, value: impl Into<String>) {
        self.state().inputs.profile.name = value.into();
    }

    pub fn set_recent_position(&self, value: impl Into<String>) {
        self.state().inputs.profile.recent_position = value.into();
    }

    pub fn set_background(&self, value: impl Into<String>) {
        self.state().inputs.profile.background = value.into();
    }

    pub fn set_profile(&self, profile: ProfileFields) {
        self.state().inputs.profile = profile;
    }

    pub fn set_company_name(&self, value: impl Into<String>) {
        self.state().inputs.job.company_name = value.into();
    }

    pub fn set_target_position(&self, value: impl Into<String>) {
        self.state().inputs.job.target_position = value.into();
    }

    pub fn set_job_description(&self, value: impl Into<String>) {
        self.state().inputs.job.job_description = value.into();
    }

    pub fn set_length(&self, length: LetterLength) {
        self.state().config.length = length;
    }

    pub fn set_style(&self, style: LetterStyle) {
        self.state().config.style = style;
    }

    pub fn api_key_present(&self) -> bool {
        self.credentials.resolve().is_some()
    }

    pub fn view(&self) -> SessionView {
        let api_key_present = self.api_key_present();
        let state = self.state();

        SessionView {
            profile: state.inputs.profile.clone(),
            job: state.inputs.job.clone(),
            config: state.config,
            result: state.result.clone(),
            error: (!state.error.is_empty()).then(|| state.error.clone()),
            is_generating: state.busy,
            copied: flashing(state.copied_at),
            profile_saved: flashing(state.saved_at),
            api_key_present,
            can_generate: api_key_present && !state.busy && state.inputs.validate().is_ok(),
        }
    }

    /// Generate a letter from the current form values.
    ///
    /// Validation failures never reach the generation service. Successful
    /// text is stored exactly as returned.
    pub async fn generate(&self) -> GenerateOutcome {
        let (token, inputs, config) = {
            let mut state = self.state();

            if state.busy && self.overlap == OverlapPolicy::Ignore {
                info!("Generation already in flight, ignoring request");
                return GenerateOutcome::Ignored;
            }

            if let Err(e) = state.inputs.validate() {
                let message = e.to_string();
                state.set_error(message.clone());
                return GenerateOutcome::Rejected(message);
            }

            state.error.clear();
            state.result.clear();
            state.busy = true;
            state.latest_request += 1;
            (state.latest_request, state.inputs.clone(), state.config)
        };

        info!(
            "Generating cover letter #{} ({} words, {})",
            token,
            config.length.words(),
            config.style
        );
        let outcome = self.generator.generate_cover_letter(&inputs, &config).await;

        let mut state = self.state();
        if token != state.latest_request {
            debug!(
                "Discarding result of request #{} superseded by #{}",
                token, state.latest_request
            );
            return GenerateOutcome::Superseded;
        }

        state.busy = false;
        match outcome {
            Ok(text) => {
                info!("Cover letter #{} generated ({} chars)", token, text.len());
                state.error.clear();
                state.result = text.clone();
                GenerateOutcome::Completed(text)
            }
            Err(e) => {
                let message = e.to_string();
                error!("Cover letter #{} failed: {}", token, message);
                state.set_error(message.clone());
                GenerateOutcome::Failed(message)
            }
        }
    }

    /// Persist `{name, recentPosition, background}`, replacing any earlier save.
    pub fn save_profile(&self) -> Result<()> {
        let profile = self.state().inputs.profile.clone();

        match self.profiles.save(&profile) {
            Ok(()) => {
                self.state().saved_at = Some(Instant::now());
                Ok(())
            }
            Err(e) => {
                error!("Failed to save profile: {}", e);
                self.state()
                    .set_error(format!("Failed to save profile: {}", e));
                Err(e)
            }
        }
    }

    /// Delete the saved profile and blank the three profile fields, but only
    /// if `confirm` agrees. Returns whether anything was cleared.
    pub fn clear_profile<F>(&self, confirm: F) -> Result<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(CLEAR_PROFILE_PROMPT) {
            debug!("Profile clear cancelled");
            return Ok(false);
        }

        if let Err(e) = self.profiles.clear() {
            error!("Failed to clear profile: {}", e);
            self.state()
                .set_error(format!("Failed to clear profile: {}", e));
            return Err(e);
        }

        self.state().inputs.profile = ProfileFields::default();
        info!("Cleared saved profile");
        Ok(true)
    }

    /// Copy the current result to the clipboard. Returns `Ok(false)` when
    /// there is nothing to copy.
    pub fn copy_result(&self) -> Result<bool> {
        let result = self.state().result.clone();
        if result.is_empty() {
            return Ok(false);
        }

        match self.clipboard.write_text(&result) {
            Ok(()) => {
                self.state().copied_at = Some(Instant::now());
                Ok(true)
            }
            Err(e) => {
                error!("Failed to copy result: {}", e);
                self.state().set_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Save the current result as a PDF. Returns `Ok(None)` when there is
    /// nothing to export. A renderer failure leaves the result untouched.
    pub fn export_pdf(&self) -> Result<Option<PathBuf>> {
        let result = self.state().result.clone();
        if result.is_empty() {
            return Ok(None);
        }

        match self.pdf.export(DOCUMENT_TITLE, &result) {
            Ok(path) => Ok(Some(path)),
            Err(e) => {
                error!("PDF export failed: {}", e);
                self.state().set_error(PDF_FAILURE_MESSAGE);
                Err(e)
            }
        }
    }
}
