use tracing::warn;

use crate::catalog::Key;
use crate::page::{CountdownView, PageState};
use crate::render::{Activation, GameCard, Notice, SocialIcon, SocialLink};

const OPEN_GAME_JS: &str = "window.open(this.dataset.playUrl, '_blank', 'noopener,noreferrer')";

/// Render the page snapshot as a standalone HTML document.
pub fn render_page(page: &PageState) -> String {
    let title = page.document_title.as_deref().unwrap_or("");
    let hero_title = page.hero_title.as_deref().unwrap_or("");

    let favicon_html = page
        .favicon
        .as_deref()
        .map(|href| format!(r#"<link id="favicon" rel="icon" href="{}">"#, html_escape(href)))
        .unwrap_or_default();

    let fonts_html = page
        .font_requests
        .iter()
        .map(|f| format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(&f.stylesheet)))
        .collect::<Vec<_>>()
        .join("\n    ");

    let css_vars = page
        .style_variables
        .iter()
        .filter(|(name, value)| {
            let safe = css_declaration_safe(name) && css_declaration_safe(value);
            if !safe {
                warn!(variable = %name, "Style variable would escape its declaration; not written");
            }
            safe
        })
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ");

    let logo_html = page
        .logo
        .as_ref()
        .map(|logo| {
            format!(
                r#"<img id="brand-logo" src="{}" alt="{}">"#,
                html_escape(&logo.src),
                html_escape(&logo.alt)
            )
        })
        .unwrap_or_default();

    let slogan_html = optional_text("p", "brand-slogan", page.slogan.as_deref());
    let tagline_html = optional_text("p", "hero-tagline", page.hero_tagline.as_deref());

    let notices_html = page
        .notices
        .iter()
        .enumerate()
        .map(|(i, n)| notice_html(i, n))
        .collect::<Vec<_>>()
        .join("\n");

    let cards_html = page.cards.iter().map(card_html).collect::<Vec<_>>().join("\n");
    let countdown_html = countdown_html(&page.countdown);
    let social_html = page.social_links.iter().map(social_html).collect::<Vec<_>>().join("\n");

    let email_html = page
        .contact_email
        .as_ref()
        .map(|c| format!(r#"<a id="contact-email" href="{}">{}</a>"#, html_escape(&c.href), html_escape(&c.text)))
        .unwrap_or_default();
    let phone_html = page
        .contact_phone
        .as_ref()
        .map(|c| format!(r#"<a id="contact-mobile" href="{}">{}</a>"#, html_escape(&c.href), html_escape(&c.text)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {favicon_html}
    {fonts_html}
    <style>:root {{ {css_vars} }}</style>
</head>
<body>
{notices_html}
<header class="hero">
    {logo_html}
    <h1 id="site-title">{hero_title}</h1>
    {tagline_html}
    {slogan_html}
</header>
<main>
    <section id="countdown-timer">
{countdown_html}
    </section>
    <section id="games-grid" role="list">
{cards_html}
    </section>
</main>
<footer>
    <ul id="social-links">
{social_html}
    </ul>
    <p class="contact">{email_html} {phone_html}</p>
    <p id="org-name">{copyright}</p>
</footer>
</body>
</html>
"#,
        title = html_escape(title),
        favicon_html = favicon_html,
        fonts_html = fonts_html,
        css_vars = css_vars,
        notices_html = notices_html,
        logo_html = logo_html,
        hero_title = html_escape(hero_title),
        tagline_html = tagline_html,
        slogan_html = slogan_html,
        countdown_html = countdown_html,
        cards_html = cards_html,
        social_html = social_html,
        email_html = email_html,
        phone_html = phone_html,
        copyright = html_escape(page.copyright.as_deref().unwrap_or("")),
    )
}

fn optional_text(tag: &str, id: &str, text: Option<&str>) -> String {
    text.map(|t| format!(r#"<{tag} id="{id}">{}</{tag}>"#, html_escape(t)))
        .unwrap_or_default()
}

/// The notice removes itself once its display time has passed.
fn notice_html(index: usize, notice: &Notice) -> String {
    format!(
        r#"<div class="notice" role="alert" id="notice-{index}">{message}</div>
<script>setTimeout(function () {{ var n = document.getElementById('notice-{index}'); if (n) n.remove(); }}, {ms});</script>"#,
        index = index,
        message = html_escape(&notice.message),
        ms = notice.dismiss_after.as_millis(),
    )
}

/// Cards are the only tab stop; pointer and Enter/Space open the game
/// detached from the page, and cards without a URL get no handlers at all.
fn card_html(card: &GameCard) -> String {
    let (handlers, action) = match &card.activation {
        Activation::Open(url) => {
            let keys = Key::ACTIVATION_DOM_KEYS
                .iter()
                .map(|k| format!("event.key === '{}'", k))
                .collect::<Vec<_>>()
                .join(" || ");
            let handlers = format!(
                r#" data-play-url="{url}" onclick="{open}" onkeydown="if ({keys}) {{ event.preventDefault(); {open}; }}""#,
                url = html_escape(url),
                open = OPEN_GAME_JS,
                keys = keys,
            );
            (handlers, r#"<span class="btn">Play Now</span>"#)
        }
        Activation::Inert => (String::new(), r#"<span class="btn" aria-disabled="true">Play Now</span>"#),
    };
    format!(
        r#"        <article class="card" role="listitem" tabindex="{tab}"{handlers}>
            <img src="{src}" alt="{alt}" onerror="if (this.src !== '{fallback}') this.src = '{fallback}';">
            <div class="card-body">
                <h3>{title}</h3>
                <p>{description}</p>
                <span class="pill">{badge}</span>
                {action}
            </div>
        </article>"#,
        tab = card.tab_index,
        handlers = handlers,
        src = html_escape(&card.thumbnail.src),
        alt = html_escape(&card.thumbnail.alt),
        fallback = html_escape(&card.thumbnail.fallback),
        title = html_escape(&card.title),
        description = html_escape(&card.description),
        badge = html_escape(&card.badge.label()),
        action = action,
    )
}

fn countdown_html(view: &CountdownView) -> String {
    match view {
        CountdownView::Hidden => String::new(),
        CountdownView::Running(d) => format!(
            r#"        <span id="cd-days">{}</span>d <span id="cd-hours">{}</span>h <span id="cd-mins">{}</span>m <span id="cd-secs">{}</span>s"#,
            d.days, d.hours, d.minutes, d.seconds
        ),
        CountdownView::Expired(message) => format!("        <h3>{}</h3>", html_escape(message)),
    }
}

fn social_html(link: &SocialLink) -> String {
    let icon = match &link.icon {
        SocialIcon::Avatar(src) => format!(
            r#"<img src="{}" alt="{} icon">"#,
            html_escape(src),
            html_escape(&link.platform)
        ),
        SocialIcon::Glyph(glyph) => html_escape(glyph),
    };
    format!(
        r#"        <li><a class="social-link" href="{}" target="_blank" rel="noopener noreferrer" title="{}" aria-label="{}">{}</a></li>"#,
        html_escape(&link.href),
        html_escape(&link.title),
        html_escape(&link.aria_label),
        icon
    )
}

/// A custom property name or value must not be able to end its declaration,
/// its rule or the surrounding `<style>` element.
fn css_declaration_safe(text: &str) -> bool {
    !text.chars().any(|c| matches!(c, '<' | '>' | '{' | '}' | ';' | '\\' | '\n' | '\r'))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
