use tracing::{debug, info, instrument};

use crate::model::games::{GameRecord, GamesDocument};
use crate::render::{Activation, Badge, GameCard, RenderTarget, Thumbnail};

pub const PLACEHOLDER_THUMBNAIL: &str = "assets/images/placeholder.png";

/// Opens game URLs outside the page.
pub trait Launcher {
    /// Open `url` in a new browsing context that cannot reach back to the opener.
    fn open_detached(&mut self, url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// DOM `KeyboardEvent.key` values that activate a card.
    pub const ACTIVATION_DOM_KEYS: [&'static str; 2] = ["Enter", " "];

    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " => Key::Space,
            _ => Key::Other,
        }
    }
}

/// One physical user input aimed at a focused card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardInput {
    Pointer,
    Key(Key),
}

impl CardInput {
    /// Keyboard activations swallow the browser default so the same key
    /// press cannot also arrive as a synthesized click.
    pub fn suppresses_default(self) -> bool {
        matches!(self, CardInput::Key(Key::Enter | Key::Space))
    }

    fn activates(self) -> bool {
        matches!(self, CardInput::Pointer | CardInput::Key(Key::Enter | Key::Space))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    Launched,
    /// The card has no URL; nothing happened.
    Inert,
    /// The input was not an activation gesture.
    Ignored,
}

impl GameCard {
    pub fn from_record(position: usize, record: &GameRecord) -> Self {
        let src = record
            .thumb
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER_THUMBNAIL);
        let badge = match record.difficulty.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(level) => Badge::Difficulty(level.to_string()),
            None => Badge::Play,
        };
        let activation = match record.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => Activation::Open(url.to_string()),
            None => Activation::Inert,
        };

        GameCard {
            position,
            tab_index: 0,
            title: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
            thumbnail: Thumbnail {
                src: src.to_string(),
                alt: format!("{} thumbnail", record.name),
                fallback: PLACEHOLDER_THUMBNAIL.to_string(),
            },
            badge,
            activation,
        }
    }

    /// Handle one input on this card. At most one launch happens per call.
    pub fn activate<L: Launcher + ?Sized>(&self, input: CardInput, launcher: &mut L) -> ActivationOutcome {
        if !input.activates() {
            return ActivationOutcome::Ignored;
        }
        match &self.activation {
            Activation::Open(url) => {
                launcher.open_detached(url);
                ActivationOutcome::Launched
            }
            Activation::Inert => {
                debug!(game = %self.title, "Card has no play URL");
                ActivationOutcome::Inert
            }
        }
    }
}

/// Apply the games document: title/tagline overrides, then the card grid.
#[instrument(level = "info", skip_all)]
pub fn apply_catalog<R: RenderTarget + ?Sized>(doc: &GamesDocument, surface: &mut R) {
    if let Some(title) = doc.site_title.as_deref().filter(|t| !t.trim().is_empty()) {
        surface.set_document_title(title);
        surface.set_hero_title(title);
    }
    if let Some(tagline) = doc.tagline.as_deref().filter(|t| !t.trim().is_empty()) {
        surface.set_hero_tagline(tagline);
    }
    let count = render_cards(&doc.games, surface);
    info!(cards = count, "Rendered game catalog");
}

/// Replace the card grid with one card per record, in record order.
pub fn render_cards<R: RenderTarget + ?Sized>(records: &[GameRecord], surface: &mut R) -> usize {
    surface.clear_cards();
    for (position, record) in records.iter().enumerate() {
        surface.append_card(GameCard::from_record(position, record));
    }
    records.len()
}
