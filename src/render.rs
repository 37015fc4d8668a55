use std::time::Duration;

use serde::Serialize;

/// Insertion points of the host page that the site content is written into.
///
/// Implementations decide what happens when the host page has no element for
/// a given point; the appliers call every method unconditionally and expect
/// absent points to be skipped silently.
pub trait RenderTarget {
    fn set_document_title(&mut self, title: &str);
    fn set_hero_title(&mut self, title: &str);
    fn set_hero_tagline(&mut self, tagline: &str);
    fn set_slogan(&mut self, slogan: &str);
    fn set_logo(&mut self, image: &Image);
    fn set_favicon(&mut self, href: &str);
    fn set_footer(&mut self, copyright: &str, year: &str);
    fn set_contact_email(&mut self, link: &ContactLink);
    fn set_contact_phone(&mut self, link: &ContactLink);
    fn clear_social_links(&mut self);
    fn append_social_link(&mut self, link: SocialLink);
    fn set_style_variable(&mut self, name: &str, value: &str);
    fn request_font(&mut self, request: FontRequest);
    fn clear_cards(&mut self);
    fn append_card(&mut self, card: GameCard);
    fn set_countdown(&mut self, display: &CountdownDisplay);
    fn show_countdown_expired(&mut self, message: &str);
    fn show_notice(&mut self, notice: Notice);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// A clickable contact entry, e.g. `mailto:` or `tel:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SocialIcon {
    /// Image supplied by the branding document.
    Avatar(String),
    /// Short per-platform text glyph.
    Glyph(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Platform key as used in the branding document, e.g. `github`.
    pub platform: String,
    pub href: String,
    pub title: String,
    pub aria_label: String,
    pub icon: SocialIcon,
}

/// Request to pull a font family from the external font service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontRequest {
    pub family: String,
    pub weights: Vec<u16>,
    pub stylesheet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub src: String,
    pub alt: String,
    pub fallback: String,
}

impl Thumbnail {
    /// Called when the current source failed to load. Switches to the
    /// fallback and returns true, or returns false if already on it.
    pub fn recover(&mut self) -> bool {
        if self.src == self.fallback {
            return false;
        }
        self.src = self.fallback.clone();
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Badge {
    Difficulty(String),
    Play,
}

impl Badge {
    pub fn label(&self) -> String {
        match self {
            Badge::Difficulty(level) => format!("Difficulty: {}", level),
            Badge::Play => "Play".to_string(),
        }
    }
}

/// What activating a card does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum Activation {
    /// Open the URL in a new browsing context with no reference back to this page.
    Open(String),
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameCard {
    /// Zero-based place in the catalog, which is also its focus order.
    pub position: usize,
    pub tab_index: i32,
    pub title: String,
    pub description: String,
    pub thumbnail: Thumbnail,
    pub badge: Badge,
    pub activation: Activation,
}

/// Countdown fields as shown: days unpadded, the rest two digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownDisplay {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub dismiss_after: Duration,
}
