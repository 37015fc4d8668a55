use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use crate::brand::apply_brand;
use crate::catalog::apply_catalog;
use crate::countdown::{Clock, CountdownEngine, CountdownHandle, CountdownState};
use crate::error::DocumentLoadError;
use crate::loader::{load_documents, DocumentSource, LoadPolicy};
use crate::model::branding::BrandingDocument;
use crate::model::games::GamesDocument;
use crate::model::theme::ThemeDocument;
use crate::render::{Notice, RenderTarget};
use crate::theme::apply_theme;

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load site data. Please refresh the page.";
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Everything loaded for one render. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteContent {
    pub branding: Option<BrandingDocument>,
    pub theme: Option<ThemeDocument>,
    pub games: Option<GamesDocument>,
}

/// Loaded site content plus what went wrong while loading it.
#[derive(Debug)]
pub struct Site {
    content: SiteContent,
    failures: Vec<DocumentLoadError>,
    all_failed: bool,
}

impl Site {
    pub fn new(content: SiteContent) -> Self {
        Self { content, failures: Vec::new(), all_failed: false }
    }

    /// Load all three documents concurrently under `policy`.
    pub async fn load(source: &DocumentSource, policy: LoadPolicy) -> Result<Self, DocumentLoadError> {
        let loaded = load_documents(source, policy).await?;
        let all_failed = loaded.all_failed();
        Ok(Self {
            content: SiteContent { branding: loaded.branding, theme: loaded.theme, games: loaded.games },
            failures: loaded.failures,
            all_failed,
        })
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn failures(&self) -> &[DocumentLoadError] {
        &self.failures
    }

    /// Apply theme, branding and catalog in that order, then build the
    /// countdown and render its first frame. Returns the engine so the caller
    /// can keep it ticking; `None` when there is no valid countdown target.
    #[instrument(level = "info", skip_all)]
    pub fn render<R: RenderTarget + ?Sized>(&self, surface: &mut R, now: DateTime<Utc>) -> Option<CountdownEngine> {
        if self.all_failed {
            warn!("No site document could be loaded");
            surface.show_notice(load_failure_notice());
        }

        apply_theme(self.content.theme.as_ref(), surface);
        if let Some(branding) = &self.content.branding {
            apply_brand(branding, surface, now);
        }

        let games = self.content.games.as_ref()?;
        apply_catalog(games, surface);

        let mut engine = CountdownEngine::from_target(games.countdown_target.as_deref())?;
        engine.tick(now, surface);
        Some(engine)
    }
}

pub fn load_failure_notice() -> Notice {
    Notice { message: LOAD_FAILURE_MESSAGE.to_string(), dismiss_after: NOTICE_DURATION }
}

/// Load, render and start the countdown timer if one is still running.
///
/// Under [`LoadPolicy::Strict`] a failed document shows the load-failure
/// notice and returns the error without rendering anything else.
#[instrument(level = "info", skip(source, surface, clock), fields(base = %source.base()))]
pub async fn sync<R, C>(
    source: &DocumentSource,
    policy: LoadPolicy,
    surface: Arc<Mutex<R>>,
    clock: C,
) -> Result<Option<CountdownHandle>, DocumentLoadError>
where
    R: RenderTarget + Send + 'static,
    C: Clock,
{
    let site = match Site::load(source, policy).await {
        Ok(site) => site,
        Err(e) => {
            error!(error = %e, "Site initialization failed");
            surface.lock().unwrap_or_else(PoisonError::into_inner).show_notice(load_failure_notice());
            return Err(e);
        }
    };

    let engine = {
        let mut guard = surface.lock().unwrap_or_else(PoisonError::into_inner);
        site.render(&mut *guard, clock.now())
    };

    match engine {
        Some(engine) if engine.state() == CountdownState::Running => {
            info!(target_instant = %engine.target(), "Starting countdown timer");
            Ok(Some(engine.start(surface, clock)))
        }
        _ => Ok(None),
    }
}
