//! animedl Core Library
//!
//! This crate provides the search, classification and download engine for
//! AnimeWorld, with VVVVID as the fallback service.
//!
//! # Features
//! - Search titles on the primary site
//! - Decide between direct download, VVVVID fallback or no path at all
//! - Resolve VVVVID show ids through a web search
//! - Validate episode selections against the displayed range
//! - Download episodes one by one, isolating per-episode failures
//!
//! The `testing` feature exposes [`ScriptedConsole`], a console replaying
//! fixed answers, for driving a session from tests.

pub mod classifier;
pub mod client;
pub mod console;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod parser;
pub mod range;
pub mod runner;
pub mod search;
pub mod selectors;
pub mod session;
pub mod transfer;
pub mod types;

// Re-export main types for convenience
pub use classifier::{classify, classify_signals};
pub use client::{ClientConfig, RateLimiter, SiteClient};
pub use console::Console;
#[cfg(any(test, feature = "testing"))]
pub use console::ScriptedConsole;
pub use error::{AnimeDlError, ErrorKind, Result};
pub use fallback::{FallbackConfig, FallbackIdResolver};
pub use orchestrator::DownloadOrchestrator;
pub use runner::{CommandRunner, FallbackRunner};
pub use search::SearchResolver;
pub use selectors::{Page, PageQuery, SelectorName, Selectors};
pub use session::{Session, SessionConfig, TitleOutcome};
pub use transfer::{EpisodeTransfer, HttpTransfer, TransferRequest};
pub use types::{
    AnimePage, Classification, DownloadOutcome, DownloadReport, EpisodeLink, EpisodeRef,
    FallbackIdentifier, SearchResult,
};
