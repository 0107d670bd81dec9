//! # Threadweave
//!
//! A Rust library for composing X (formerly Twitter) threads from long-form
//! text: split a block of text into tweet-sized segments, attach media
//! references, and publish the segments in order as a reply chain.
//!
//! ## Features
//!
//! - Four splitting strategies behind one orchestrator: manual
//!   double-newline breaks, greedy word-fill, the strict numbered
//!   Plain-Thread format, and AI-assisted composition via the `genai` crate
//! - Typed, positional errors: malformed Plain-Thread input is rejected
//!   with the offending line, never repaired
//! - Over-limit segments are flagged, never dropped or truncated
//! - Reply-chained publishing over the X API v2 with resumable state
//! - A local workspace for saving, reopening, and archiving drafts
//!
//! ## Example
//!
//! ```rust,no_run
//! use threadweave::{AiConfig, GenAiBackend, SplitMode, ThreadSplitter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load GENAI_API_KEY and friends from .env
//!     threadweave::init()?;
//!
//!     let backend = GenAiBackend::new(AiConfig::from_env()?);
//!     let splitter = ThreadSplitter::with_backend(Box::new(backend));
//!
//!     let text = "A long post about Rust error handling...";
//!     let draft = splitter.split(text, SplitMode::Compose).await?;
//!
//!     let summary = draft.summary();
//!     println!("{} segments, {} over limit", summary.segment_count, summary.over_limit.len());
//!
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod autosplit;
pub mod delimiter;
pub mod error;
pub mod limit;
pub mod plain_thread;
pub mod promo;
pub mod publisher;
pub mod splitter;
pub mod types;
pub mod workspace;

pub use ai::{AiConfig, GenAiBackend, ThreadBackend};
pub use error::{Error, FormatError, Result};
pub use limit::{display_len, TWEET_LIMIT};
pub use promo::{Promo, PromoLibrary};
pub use publisher::{PublishError, PublisherConfig, ThreadPublisher};
pub use splitter::{SplitMode, ThreadSplitter};
pub use types::{Segment, SourceMode, SplitSummary, ThreadDraft};
pub use workspace::DraftWorkspace;

/// Initialize the library by loading a `.env` file
///
/// Call this at the start of your application to load environment variables
/// from a `.env` file in the current directory or parent directories.
///
/// # Errors
///
/// Currently infallible; kept fallible for future configuration sources.
pub fn init() -> Result<()> {
    dotenvy::dotenv().ok(); // Ignore if .env doesn't exist
    Ok(())
}
