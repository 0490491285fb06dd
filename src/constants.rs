//! Application-wide constants for tuning and configuration
//!
//! Centralizes fixed texts and magic numbers to make them discoverable.

/// Seeded assistant message shown when a conversation starts.
pub const WELCOME_MESSAGE: &str = "Hello! I am PhishGuard AI. Paste the content of any suspicious email here, and I will analyze it for phishing attempts, fraud, and other cybersecurity risks. \n\nPlease include as much detail as possible (sender name, email address, links, etc.)";

/// The only failure text the user ever sees. Diagnostic detail goes to the log.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to analyze email. Please try again or check your API configuration.";

/// Sampling temperature for analysis requests.
/// Kept low so the service returns schema-shaped output rather than prose.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default model used for analysis.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Default base URL of the generative language API.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Capacity of the command and event channels of the analysis actor.
/// Only one turn is ever in flight, so a small buffer is enough.
pub const ANALYSIS_CHANNEL_CAPACITY: usize = 4;

// === UI Constants ===

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u64 = 80;

/// Input poll timeout while idle, in milliseconds.
pub const IDLE_POLL_MS: u64 = 150;

/// Lines moved per PageUp/PageDown in the transcript.
pub const PAGE_SCROLL_LINES: usize = 10;

/// Minimum and maximum height of the input box, borders included.
pub const INPUT_MIN_HEIGHT: u16 = 4;
pub const INPUT_MAX_HEIGHT: u16 = 10;

/// Horizontal padding applied to transcript content.
pub const CONTENT_PADDING_H: u16 = 2;

/// Characters of the analyzed email quoted above each assessment.
pub const EXCERPT_CHARS: usize = 100;

/// Maximum width of the risk score gauge.
pub const GAUGE_MAX_WIDTH: usize = 30;
