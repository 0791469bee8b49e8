//! Error types for animedl
//!
//! Every error carries a [`ErrorKind`] that tells the caller how to react:
//! terminate, drop the current title, skip one episode or ask again.
//! Display strings are user-facing and therefore Italian.

use thiserror::Error;

pub use reqwest::StatusCode;

/// Handling policy attached to each error variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Print a diagnostic and terminate the process
    Fatal,
    /// Abandon the current title and go back to a fresh search
    SkipTitle,
    /// Report the episode and continue with the next one
    SkipEpisode,
    /// Ask the user again
    Reprompt,
    /// The user interrupted a prompt; exit without further output
    Interrupted,
}

/// Error type for animedl operations
#[derive(Error, Debug)]
pub enum AnimeDlError {
    /// Host unreachable, connection reset, timeout
    #[error("errore di connessione: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("il server ha risposto {status} per {url}")]
    Protocol {
        status: StatusCode,
        url: String,
    },

    /// Failed to parse HTML content
    #[error("impossibile interpretare la pagina: {0}")]
    ParseError(String),

    /// Required HTML element was not found
    #[error("elemento non trovato: {0}")]
    ElementNotFound(String),

    /// Invalid URL format
    #[error("URL non valido: {0}")]
    InvalidUrl(String),

    /// Neither the direct nor the fallback path can serve this title
    #[error("Non e' possibile scaricare {0}.")]
    UnsupportedTitle(String),

    /// A single episode could not be fetched or transferred
    #[error("Non e' stato possibile scaricare l'episodio {episode}: {reason}")]
    EpisodeDownload { episode: u32, reason: String },

    /// The search phrase was empty
    #[error("Il nome non puo' essere vuoto.")]
    EmptyInput,

    /// The primary site returned no results for the phrase
    #[error("Nessun risultato per {0}.")]
    EmptyResults(String),

    /// The episode selection could not be understood or is out of range
    #[error("Selezione non valida: {0}")]
    InvalidSelection(String),

    /// Ctrl-C or end of input while prompting
    #[error("interrotto")]
    Interrupted,

    /// The external fallback downloader failed or is not configured
    #[error("downloader esterno: {0}")]
    Runner(String),

    /// Local filesystem failure
    #[error("errore di I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl AnimeDlError {
    /// How the caller is expected to handle this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedTitle(_) | Self::Runner(_) => ErrorKind::SkipTitle,
            Self::EpisodeDownload { .. } => ErrorKind::SkipEpisode,
            Self::EmptyInput | Self::EmptyResults(_) | Self::InvalidSelection(_) => {
                ErrorKind::Reprompt
            }
            Self::Interrupted => ErrorKind::Interrupted,
            Self::Transport(_)
            | Self::Protocol { .. }
            | Self::ParseError(_)
            | Self::ElementNotFound(_)
            | Self::InvalidUrl(_)
            | Self::Io(_) => ErrorKind::Fatal,
        }
    }

    /// Wrap any error raised while handling one episode.
    pub fn episode(episode: u32, source: AnimeDlError) -> Self {
        Self::EpisodeDownload {
            episode,
            reason: source.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnimeDlError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Protocol {
                status,
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => Self::Transport(err),
        }
    }
}

/// Result type alias for animedl operations
pub type Result<T> = std::result::Result<T, AnimeDlError>;
