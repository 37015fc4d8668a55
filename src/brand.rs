use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info, instrument};

use crate::model::branding::{BrandingDocument, Logo};
use crate::render::{ContactLink, Image, RenderTarget, SocialIcon, SocialLink};

pub const DEFAULT_ORGANIZATION: &str = "Your Organization";
pub const DEFAULT_SITE_TITLE: &str = "Kids Gaming Site";

/// Social platforms the page knows how to present, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    LinkedIn,
    Instagram,
    GitHub,
    X,
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::GitHub,
        Platform::X,
        Platform::YouTube,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
            Platform::GitHub => "github",
            Platform::X => "x",
            Platform::YouTube => "youtube",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::GitHub => "GitHub",
            Platform::X => "X (Twitter)",
            Platform::YouTube => "YouTube",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Platform::LinkedIn => "in",
            Platform::Instagram => "ig",
            Platform::GitHub => "gh",
            Platform::X => "x",
            Platform::YouTube => "yt",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// Branding with defaults applied and the legacy fields folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandProfile<'a> {
    pub organization: &'a str,
    pub site_title: &'a str,
    pub slogan: Option<&'a str>,
    pub logo: Option<&'a str>,
    pub favicon: Option<&'a str>,
    pub email: Option<&'a str>,
    pub mobile: Option<&'a str>,
    pub avatar: Option<&'a str>,
}

impl<'a> BrandProfile<'a> {
    pub fn from_document(doc: &'a BrandingDocument) -> Self {
        let (logo, logo_favicon) = match &doc.logo {
            Some(Logo::Url(url)) => (Some(url.as_str()), None),
            Some(Logo::Assets { title, favicon }) => (title.as_deref(), favicon.as_deref()),
            None => (None, None),
        };

        // Nested contact wins field by field; flat fields fill the gaps.
        let contact = doc.contact.as_ref();
        let email = contact
            .and_then(|c| non_empty(c.email.as_deref()))
            .or_else(|| non_empty(doc.email.as_deref()));
        let mobile = contact
            .and_then(|c| non_empty(c.mobile.as_deref()))
            .or_else(|| non_empty(doc.mobile.as_deref()));

        let avatar = doc
            .chatbot
            .as_ref()
            .and_then(|c| non_empty(c.avatar.as_deref()).or_else(|| non_empty(c.face.as_deref())));

        BrandProfile {
            organization: non_empty(doc.organization_name.as_deref()).unwrap_or(DEFAULT_ORGANIZATION),
            site_title: non_empty(doc.site_title.as_deref()).unwrap_or(DEFAULT_SITE_TITLE),
            slogan: non_empty(doc.slogan.as_deref()),
            logo: non_empty(logo),
            favicon: non_empty(logo_favicon).or_else(|| non_empty(doc.favicon.as_deref())),
            email,
            mobile,
            avatar,
        }
    }
}

/// Write identity, contact and social links for a branding document.
/// `now` supplies the copyright year.
#[instrument(level = "info", skip_all)]
pub fn apply_brand<R: RenderTarget + ?Sized>(doc: &BrandingDocument, surface: &mut R, now: DateTime<Utc>) {
    let profile = BrandProfile::from_document(doc);

    surface.set_document_title(profile.site_title);
    surface.set_hero_title(profile.site_title);
    if let Some(slogan) = profile.slogan {
        surface.set_slogan(slogan);
    }
    if let Some(logo) = profile.logo {
        surface.set_logo(&Image { src: logo.to_string(), alt: format!("{} Logo", profile.organization) });
    }
    if let Some(favicon) = profile.favicon {
        surface.set_favicon(favicon);
    }

    let year = now.year().to_string();
    surface.set_footer(&format!("© {} {}", year, profile.organization), &year);

    if let Some(email) = profile.email {
        surface.set_contact_email(&ContactLink { href: format!("mailto:{}", email), text: email.to_string() });
    }
    if let Some(mobile) = profile.mobile {
        surface.set_contact_phone(&ContactLink { href: tel_href(mobile), text: mobile.to_string() });
    }

    let links = social_links(doc, profile.avatar);
    let count = links.len();
    surface.clear_social_links();
    for link in links {
        surface.append_social_link(link);
    }

    info!(organization = %profile.organization, social_links = count, "Applied branding");
}

/// Social links in fixed platform order, skipping empty and unknown entries.
pub fn social_links(doc: &BrandingDocument, avatar: Option<&str>) -> Vec<SocialLink> {
    for key in doc.social_media.keys() {
        if Platform::from_key(key).is_none() {
            debug!(platform = %key, "Ignoring unknown social platform");
        }
    }

    Platform::ALL
        .into_iter()
        .filter_map(|platform| {
            let href = doc
                .social_media
                .get(platform.key())
                .and_then(|url| non_empty(url.as_deref()))?;
            let icon = match avatar {
                Some(src) => SocialIcon::Avatar(src.to_string()),
                None => SocialIcon::Glyph(platform.glyph().to_string()),
            };
            Some(SocialLink {
                platform: platform.key().to_string(),
                href: href.to_string(),
                title: format!("Visit our {}", platform.name()),
                aria_label: format!("Visit our {} page", platform.name()),
                icon,
            })
        })
        .collect()
}

/// `tel:` URI for a display phone number, whitespace removed.
pub fn tel_href(mobile: &str) -> String {
    let digits: String = mobile.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", digits)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
