use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module validates ISO 639-1 (2-letter) and ISO 639-3 (3-letter)
/// language codes and maps them to the uppercase form DeepL expects.
/// Regional variants such as `en-US` or `pt-BR` are validated on their
/// primary subtag.
/// Validate that a code is a known ISO 639 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();
    let primary = normalized.split('-').next().unwrap_or_default();

    let known = match primary.len() {
        2 => Language::from_639_1(primary).is_some(),
        3 => Language::from_639_3(primary).is_some(),
        _ => false,
    };

    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();
    let primary = normalized.split('-').next().unwrap_or_default();

    let language = match primary.len() {
        2 => Language::from_639_1(primary),
        3 => Language::from_639_3(primary),
        _ => None,
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Map a language code to the uppercase form the DeepL API expects
pub fn to_deepl_code(code: &str) -> Result<String> {
    validate_language_code(code)?;
    Ok(code.trim().to_ascii_uppercase())
}
