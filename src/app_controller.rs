use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::providers::deepl::DeepL;
use crate::quota::QuotaVerdict;
use crate::session::TranslationSession;

/// Main application controller.
///
/// Owns the configuration and drives a translation session for one subtitle
/// file: read, load, translate, serialize, write. The session itself never
/// touches the filesystem.
pub struct Controller {
    /// Application configuration
    config: Config,
}

impl Controller {
    /// Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Controller { config })
    }

    /// Build a session from the configuration, installing the DeepL client
    /// when an API key is stored
    fn build_session(&self) -> TranslationSession {
        let mut session = TranslationSession::with_character_limit(self.config.character_limit);
        if self.config.has_api_key() {
            session.set_provider(Box::new(DeepL::new(self.config.deepl_api_key.clone())));
        }
        session
    }

    /// Translate a single subtitle file and write the result next to it.
    ///
    /// The output file is named `{stem}.{target_language}.srt`; an existing
    /// output is only replaced when `force_overwrite` is set.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_file = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.target_language,
            "srt",
        );
        if FileManager::file_exists(&output_file) && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                output_file
            ));
        }

        info!("Translating {:?} to {}", input_file, self.config.target_language);

        let raw = FileManager::read_to_string(&input_file)?;

        let mut session = self.build_session();
        session.load(&raw)?;

        if let Some(quota) = session.quota() {
            debug!("Quota check: {} ({:?})", quota, quota.verdict);
            if quota.verdict == QuotaVerdict::Exceeded {
                // The session would refuse anyway; failing here keeps the
                // message close to the file that caused it
                return Err(anyhow!(
                    "{:?} has {} characters, exceeding the configured quota of {}",
                    input_file,
                    quota.total_chars,
                    quota.limit
                ));
            }
        }

        let source_language = match self.config.source_language.trim() {
            "" => None,
            code => Some(code),
        };
        session
            .translate(source_language, &self.config.target_language)
            .await?;

        let output = session.serialize()?;
        FileManager::write_to_file(&output_file, &output)?;

        info!("Success: {:?}", output_file);
        Ok(())
    }

    /// Report the account's remote character usage
    pub async fn report_usage(&self) -> Result<()> {
        if !self.config.has_api_key() {
            return Err(anyhow!("No DeepL API key configured. Run `subtran set-key` first."));
        }

        let client = DeepL::new(self.config.deepl_api_key.clone());
        let usage = client.usage().await?;

        let percent = if usage.character_limit > 0 {
            (usage.character_count as f64 / usage.character_limit as f64) * 100.0
        } else {
            0.0
        };
        info!(
            "DeepL usage: {} of {} characters ({:.1}%)",
            usage.character_count, usage.character_limit, percent
        );
        Ok(())
    }

    /// Store the API key into the config file
    pub fn save_api_key<P: AsRef<Path>>(config_path: P, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(anyhow!("API key must not be empty"));
        }

        let mut config = Config::load_or_default(&config_path)?;
        config.deepl_api_key = key.to_string();
        config.save(&config_path)?;

        info!("API key saved to {}", config_path.as_ref().display());
        Ok(())
    }
}
