use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, instrument, warn};

use crate::error::{DocumentLoadError, LoadCause};
use crate::model::branding::BrandingDocument;
use crate::model::games::GamesDocument;
use crate::model::theme::ThemeDocument;

pub const BRANDING_DOCUMENT: &str = "branding.json";
pub const THEME_DOCUMENT: &str = "theme.json";
pub const GAMES_DOCUMENT: &str = "games.json";

/// What to do when one of the documents cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Treat the failed document as absent and carry on.
    #[default]
    Lenient,
    /// Fail the whole load.
    Strict,
}

/// Base location the site documents are resolved against: an `http(s)://`
/// URL or a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    base: String,
}

impl DocumentSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn is_remote(&self) -> bool {
        self.base.starts_with("http://") || self.base.starts_with("https://")
    }

    /// Location of a named document relative to the base.
    pub fn location(&self, name: &str) -> String {
        if self.is_remote() {
            format!("{}/{}", self.base.trim_end_matches('/'), name)
        } else {
            Path::new(&self.base).join(name).to_string_lossy().into_owned()
        }
    }

    /// Fetch and parse one document. Blocking; run it off the async workers.
    /// Failures are only traced at debug here; [`load_documents`] reports
    /// them at the level its policy implies.
    #[instrument(level = "info", skip(self))]
    pub fn fetch<T: DeserializeOwned>(&self, name: &str) -> Result<T, DocumentLoadError> {
        let location = self.location(name);
        let body = if self.is_remote() {
            Self::fetch_remote(&location)
        } else {
            std::fs::read_to_string(&location).map_err(LoadCause::from)
        };
        let body = body.map_err(|cause| DocumentLoadError::new(name, cause))?;

        serde_json::from_str::<T>(&body).map_err(|e| {
            debug!(error = %e, location = %location, "Document is not valid JSON for its schema");
            DocumentLoadError::new(name, e)
        })
    }

    fn fetch_remote(url: &str) -> Result<String, LoadCause> {
        let response = {
            let _span = info_span!("document_fetch", url = %url).entered();
            ureq::get(url).call()
        };
        match response {
            Ok(resp) => {
                let code = resp.status().as_u16();
                if !resp.status().is_success() {
                    debug!(status = code, url = %url, "Non-success status");
                    return Err(LoadCause::Status(code));
                }
                let mut body = resp.into_body();
                Ok(body.read_to_string()?)
            }
            Err(ureq::Error::StatusCode(code)) => {
                debug!(status = code, url = %url, "Non-success status");
                Err(LoadCause::Status(code))
            }
            Err(e) => {
                debug!(error = %e, url = %url, "Request failed");
                Err(LoadCause::Transport(e))
            }
        }
    }
}

/// Outcome of loading all three documents. Failed documents are `None` and
/// their errors are kept in `failures`.
#[derive(Debug, Default)]
pub struct LoadedDocuments {
    pub branding: Option<BrandingDocument>,
    pub theme: Option<ThemeDocument>,
    pub games: Option<GamesDocument>,
    pub failures: Vec<DocumentLoadError>,
}

impl LoadedDocuments {
    pub const DOCUMENT_COUNT: usize = 3;

    /// True when no document could be loaded at all.
    pub fn all_failed(&self) -> bool {
        self.failures.len() == Self::DOCUMENT_COUNT
    }
}

/// Fetch branding, theme and games concurrently and wait until every fetch
/// has settled before returning anything.
#[instrument(level = "info", skip(source), fields(base = %source.base()))]
pub async fn load_documents(source: &DocumentSource, policy: LoadPolicy) -> Result<LoadedDocuments, DocumentLoadError> {
    let branding = spawn_fetch::<BrandingDocument>(source, BRANDING_DOCUMENT);
    let theme = spawn_fetch::<ThemeDocument>(source, THEME_DOCUMENT);
    let games = spawn_fetch::<GamesDocument>(source, GAMES_DOCUMENT);

    let (branding, theme, games) = tokio::join!(
        settle(BRANDING_DOCUMENT, branding),
        settle(THEME_DOCUMENT, theme),
        settle(GAMES_DOCUMENT, games),
    );

    let mut failures = Vec::new();
    let mut loaded = LoadedDocuments {
        branding: keep(branding, &mut failures),
        theme: keep(theme, &mut failures),
        games: keep(games, &mut failures),
        failures,
    };

    if policy == LoadPolicy::Strict && !loaded.failures.is_empty() {
        let first = loaded.failures.remove(0);
        error!(error = %first, "Strict load policy: aborting");
        return Err(first);
    }
    for failure in &loaded.failures {
        warn!(error = %failure, "Document unavailable; rendering without it");
    }
    info!(failed = loaded.failures.len(), "Site documents settled");
    Ok(loaded)
}

fn spawn_fetch<T>(source: &DocumentSource, name: &'static str) -> JoinHandle<Result<T, DocumentLoadError>>
where
    T: DeserializeOwned + Send + 'static,
{
    // The blocking task must own its source.
    let source = source.clone();
    tokio::task::spawn_blocking(move || source.fetch::<T>(name))
}

async fn settle<T>(name: &str, handle: JoinHandle<Result<T, DocumentLoadError>>) -> Result<T, DocumentLoadError> {
    match handle.await {
        Ok(result) => result,
        Err(e) => Err(DocumentLoadError::new(name, LoadCause::Task(e.to_string()))),
    }
}

fn keep<T>(result: Result<T, DocumentLoadError>, failures: &mut Vec<DocumentLoadError>) -> Option<T> {
    match result {
        Ok(doc) => Some(doc),
        Err(e) => {
            failures.push(e);
            None
        }
    }
}
