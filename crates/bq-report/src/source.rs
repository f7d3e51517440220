//! Template sources.
//!
//! Retrieval is the only blocking step of a render. Both documents are
//! loaded concurrently by [`fetch_pair`] before any composition work starts;
//! a failure of either aborts the render. There is no timeout policy here;
//! sources apply their own.

use crate::error::{QuoteError, Result};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::debug;

/// Something that can produce a template document.
pub trait TemplateSource: Send + Sync {
    /// Load the full document text.
    fn load(&self) -> Result<String>;

    /// Human-readable location for diagnostics.
    fn describe(&self) -> String;
}

/// Template stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateSource for FileSource {
    fn load(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|err| QuoteError::TemplateFetch {
            source_name: self.describe(),
            reason: err.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Template held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    text: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl TemplateSource for InlineSource {
    fn load(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Template fetched over HTTP(S). Any non-success status is an error.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    agent: ureq::Agent,
}

#[cfg(feature = "fetch")]
impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            agent: ureq::Agent::new(),
        }
    }

    /// Use a preconfigured agent (timeouts, proxies).
    pub fn with_agent(mut self, agent: ureq::Agent) -> Self {
        self.agent = agent;
        self
    }
}

#[cfg(feature = "fetch")]
impl TemplateSource for HttpSource {
    fn load(&self) -> Result<String> {
        let fetch_error = |reason: String| QuoteError::TemplateFetch {
            source_name: self.url.clone(),
            reason,
        };
        let response = self.agent.get(&self.url).call().map_err(|err| match err {
            ureq::Error::Status(code, _) => fetch_error(format!("HTTP {}", code)),
            ureq::Error::Transport(transport) => fetch_error(transport.to_string()),
        })?;
        response
            .into_string()
            .map_err(|err| fetch_error(err.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// HTTP(S) location configured while the `fetch` feature is off.
#[cfg(not(feature = "fetch"))]
#[derive(Debug, Clone)]
struct RemoteDisabledSource {
    url: String,
}

#[cfg(not(feature = "fetch"))]
impl TemplateSource for RemoteDisabledSource {
    fn load(&self) -> Result<String> {
        Err(QuoteError::TemplateFetch {
            source_name: self.url.clone(),
            reason: "HTTP template sources require the `fetch` feature".to_string(),
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Whether a configured template location is an HTTP(S) URL.
pub fn is_remote_location(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(feature = "fetch")]
fn remote_source(url: &str) -> Box<dyn TemplateSource> {
    Box::new(HttpSource::new(url))
}

#[cfg(not(feature = "fetch"))]
fn remote_source(url: &str) -> Box<dyn TemplateSource> {
    Box::new(RemoteDisabledSource {
        url: url.to_string(),
    })
}

/// Source for a configured template location.
///
/// `http://` and `https://` locations are fetched over the network; anything
/// else is read from the filesystem.
pub fn source_for(location: &Path) -> Box<dyn TemplateSource> {
    match location.to_str() {
        Some(url) if is_remote_location(url) => {
            debug!(url, "Using HTTP template source");
            remote_source(url.trim_start())
        }
        _ => Box::new(FileSource::new(location)),
    }
}

/// Load the quote and details templates concurrently.
///
/// Returns `(quote, details)`. The first error in that order is reported.
pub fn fetch_pair(
    quote: &dyn TemplateSource,
    details: &dyn TemplateSource,
) -> Result<(String, String)> {
    debug!(
        quote = %quote.describe(),
        details = %details.describe(),
        "Loading templates"
    );

    let (quote_result, details_result) = thread::scope(|scope| {
        let quote_handle = scope.spawn(|| quote.load());
        let details_handle = scope.spawn(|| details.load());
        (
            join_loader(quote_handle, quote),
            join_loader(details_handle, details),
        )
    });

    Ok((quote_result?, details_result?))
}

fn join_loader(
    handle: thread::ScopedJoinHandle<'_, Result<String>>,
    source: &dyn TemplateSource,
) -> Result<String> {
    handle.join().unwrap_or_else(|_| {
        Err(QuoteError::TemplateFetch {
            source_name: source.describe(),
            reason: "template loader panicked".to_string(),
        })
    })
}
