/*!
 * # subtran - SRT subtitle translation with DeepL
 *
 * A Rust library for translating SRT subtitle files through the DeepL API
 * while preserving cue timing.
 *
 * ## Features
 *
 * - Strict SRT parsing with line-accurate error reporting
 * - Character-volume quota gating before any remote call
 * - Ordered batch translation with all-or-nothing failure semantics
 * - Byte-exact SRT serialization with positional renumbering
 * - JSON configuration holding the API key and language defaults
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: Cue model, SRT parsing and serialization
 * - `quota`: Character quota classification
 * - `providers`: Translation clients behind a common trait:
 *   - `providers::deepl`: DeepL REST API client
 *   - `providers::mock`: In-process provider for tests
 * - `session`: The translation session state machine
 * - `app_config`: Configuration management
 * - `app_controller`: Ties config, session and file I/O together
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod quota;
pub mod session;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, SessionError, SubtitleError};
pub use quota::{QuotaStatus, QuotaVerdict};
pub use session::{SessionState, TranslationSession};
pub use subtitle_processor::{SrtTimestamp, SubtitleDocument, SubtitleEntry};
