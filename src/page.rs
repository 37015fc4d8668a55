use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::render::{
    ContactLink, CountdownDisplay, FontRequest, GameCard, Image, Notice, RenderTarget, SocialLink,
};

/// Named insertion points a host page may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Slot {
    DocumentTitle,
    HeroTitle,
    HeroTagline,
    Slogan,
    Logo,
    Favicon,
    Footer,
    ContactEmail,
    ContactPhone,
    SocialLinks,
    Styles,
    Fonts,
    GamesGrid,
    Countdown,
    Notices,
}

impl Slot {
    pub const ALL: [Slot; 15] = [
        Slot::DocumentTitle,
        Slot::HeroTitle,
        Slot::HeroTagline,
        Slot::Slogan,
        Slot::Logo,
        Slot::Favicon,
        Slot::Footer,
        Slot::ContactEmail,
        Slot::ContactPhone,
        Slot::SocialLinks,
        Slot::Styles,
        Slot::Fonts,
        Slot::GamesGrid,
        Slot::Countdown,
        Slot::Notices,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum CountdownView {
    #[default]
    Hidden,
    Running(CountdownDisplay),
    Expired(String),
}

/// In-memory page that records what has been rendered into it. Writes to
/// slots the page was not built with are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct PageState {
    #[serde(skip)]
    slots: HashSet<Slot>,
    pub document_title: Option<String>,
    pub hero_title: Option<String>,
    pub hero_tagline: Option<String>,
    pub slogan: Option<String>,
    pub logo: Option<Image>,
    pub favicon: Option<String>,
    pub copyright: Option<String>,
    pub year: Option<String>,
    pub contact_email: Option<ContactLink>,
    pub contact_phone: Option<ContactLink>,
    pub social_links: Vec<SocialLink>,
    pub style_variables: BTreeMap<String, String>,
    pub font_requests: Vec<FontRequest>,
    pub cards: Vec<GameCard>,
    pub countdown: CountdownView,
    pub notices: Vec<Notice>,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageState {
    /// A page offering every insertion point.
    pub fn new() -> Self {
        Self::with_slots(Slot::ALL)
    }

    pub fn with_slots<I: IntoIterator<Item = Slot>>(slots: I) -> Self {
        Self {
            slots: slots.into_iter().collect(),
            document_title: None,
            hero_title: None,
            hero_tagline: None,
            slogan: None,
            logo: None,
            favicon: None,
            copyright: None,
            year: None,
            contact_email: None,
            contact_phone: None,
            social_links: Vec::new(),
            style_variables: BTreeMap::new(),
            font_requests: Vec::new(),
            cards: Vec::new(),
            countdown: CountdownView::Hidden,
            notices: Vec::new(),
        }
    }

    pub fn has(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    /// Card at `position`, for recovering a thumbnail that failed to load.
    pub fn card_mut(&mut self, position: usize) -> Option<&mut GameCard> {
        self.cards.iter_mut().find(|c| c.position == position)
    }
}

impl RenderTarget for PageState {
    fn set_document_title(&mut self, title: &str) {
        if self.has(Slot::DocumentTitle) {
            self.document_title = Some(title.to_string());
        }
    }

    fn set_hero_title(&mut self, title: &str) {
        if self.has(Slot::HeroTitle) {
            self.hero_title = Some(title.to_string());
        }
    }

    fn set_hero_tagline(&mut self, tagline: &str) {
        if self.has(Slot::HeroTagline) {
            self.hero_tagline = Some(tagline.to_string());
        }
    }

    fn set_slogan(&mut self, slogan: &str) {
        if self.has(Slot::Slogan) {
            self.slogan = Some(slogan.to_string());
        }
    }

    fn set_logo(&mut self, image: &Image) {
        if self.has(Slot::Logo) {
            self.logo = Some(image.clone());
        }
    }

    fn set_favicon(&mut self, href: &str) {
        if self.has(Slot::Favicon) {
            self.favicon = Some(href.to_string());
        }
    }

    fn set_footer(&mut self, copyright: &str, year: &str) {
        if self.has(Slot::Footer) {
            self.copyright = Some(copyright.to_string());
            self.year = Some(year.to_string());
        }
    }

    fn set_contact_email(&mut self, link: &ContactLink) {
        if self.has(Slot::ContactEmail) {
            self.contact_email = Some(link.clone());
        }
    }

    fn set_contact_phone(&mut self, link: &ContactLink) {
        if self.has(Slot::ContactPhone) {
            self.contact_phone = Some(link.clone());
        }
    }

    fn clear_social_links(&mut self) {
        self.social_links.clear();
    }

    fn append_social_link(&mut self, link: SocialLink) {
        if self.has(Slot::SocialLinks) {
            self.social_links.push(link);
        }
    }

    fn set_style_variable(&mut self, name: &str, value: &str) {
        if self.has(Slot::Styles) {
            self.style_variables.insert(name.to_string(), value.to_string());
        }
    }

    fn request_font(&mut self, request: FontRequest) {
        if self.has(Slot::Fonts) && !self.font_requests.iter().any(|r| r.stylesheet == request.stylesheet) {
            self.font_requests.push(request);
        }
    }

    fn clear_cards(&mut self) {
        self.cards.clear();
    }

    fn append_card(&mut self, card: GameCard) {
        if self.has(Slot::GamesGrid) {
            self.cards.push(card);
        }
    }

    fn set_countdown(&mut self, display: &CountdownDisplay) {
        if self.has(Slot::Countdown) {
            self.countdown = CountdownView::Running(display.clone());
        }
    }

    fn show_countdown_expired(&mut self, message: &str) {
        if self.has(Slot::Countdown) {
            self.countdown = CountdownView::Expired(message.to_string());
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        if self.has(Slot::Notices) {
            self.notices.push(notice);
        }
    }
}
