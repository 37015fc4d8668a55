mod common;

use std::collections::BTreeMap;

use kids_gaming_site::catalog::{render_cards, Key};
use kids_gaming_site::html::render_page;
use kids_gaming_site::model::games::GameRecord;
use kids_gaming_site::model::theme::ThemeDocument;
use kids_gaming_site::page::PageState;
use kids_gaming_site::render::RenderTarget;
use kids_gaming_site::site::{load_failure_notice, LOAD_FAILURE_MESSAGE};
use kids_gaming_site::theme::apply_theme;

fn style_block(html: &str) -> &str {
    let start = html.find("<style>").expect("style block");
    let end = html.find("</style>").expect("style end");
    &html[start..end]
}

#[test]
fn hostile_theme_color_cannot_leave_the_style_block() {
    let mut colors = BTreeMap::new();
    colors.insert("primary".to_string(), "red; } </style><script>alert(1)</script><style>:root {".to_string());
    colors.insert("accent".to_string(), "#ffd93d".to_string());
    let theme = ThemeDocument { colors, font: None };

    let mut page = PageState::new();
    apply_theme(Some(&theme), &mut page);
    let html = render_page(&page);

    assert!(!html.contains("<script>alert(1)</script>"), "html was: {}", html);
    assert_eq!(html.matches("</style>").count(), 1);
    let style = style_block(&html);
    assert!(style.contains("--accent: #ffd93d;"), "style was: {}", style);
    assert!(!style.contains("--primary"));
}

#[test]
fn hostile_variable_name_is_dropped_too() {
    let mut page = PageState::new();
    page.set_style_variable("--x: 1; } body {", "red");
    page.set_style_variable("--ok", "blue");
    let html = render_page(&page);

    let style = style_block(&html);
    assert!(!style.contains("body"), "style was: {}", style);
    assert!(style.contains("--ok: blue;"));
}

#[test]
fn font_stack_survives_the_style_filter() {
    let theme = ThemeDocument { colors: BTreeMap::new(), font: Some("Baloo 2".to_string()) };
    let mut page = PageState::new();
    apply_theme(Some(&theme), &mut page);
    let html = render_page(&page);

    assert!(style_block(&html).contains("--font: 'Baloo 2', system-ui"), "html was: {}", html);
}

#[test]
fn failure_notice_removes_itself_after_five_seconds() {
    let mut page = PageState::new();
    page.show_notice(load_failure_notice());
    let html = render_page(&page);

    assert!(html.contains(&format!(r#"<div class="notice" role="alert" id="notice-0">{}</div>"#, LOAD_FAILURE_MESSAGE)));
    assert!(
        html.contains("setTimeout(function () { var n = document.getElementById('notice-0'); if (n) n.remove(); }, 5000);"),
        "html was: {}",
        html
    );
}

#[test]
fn playable_card_opens_on_click_and_activation_keys() {
    let record = GameRecord {
        name: "Math Blaster".to_string(),
        description: None,
        thumb: None,
        difficulty: None,
        url: Some("https://games.example/math".to_string()),
    };
    let mut page = PageState::new();
    render_cards(&[record], &mut page);
    let html = render_page(&page);

    assert!(html.contains(r#"<article class="card" role="listitem" tabindex="0" data-play-url="https://games.example/math""#), "html was: {}", html);
    assert!(html.contains(r#"onclick="window.open(this.dataset.playUrl, '_blank', 'noopener,noreferrer')""#));
    assert!(html.contains("onkeydown=\"if (event.key === 'Enter' || event.key === ' ') { event.preventDefault(); window.open("));
    // The card itself is the only focusable element.
    assert!(!html.contains("<a class=\"btn\""));
    assert_eq!(html.matches("tabindex=").count(), 1);
}

#[test]
fn card_without_url_gets_no_handlers() {
    let record = GameRecord { name: "Offline Puzzle".to_string(), description: None, thumb: None, difficulty: None, url: None };
    let mut page = PageState::new();
    render_cards(&[record], &mut page);
    let html = render_page(&page);

    assert!(html.contains(r#"<article class="card" role="listitem" tabindex="0">"#), "html was: {}", html);
    assert!(!html.contains("onclick"));
    assert!(!html.contains("onkeydown"));
    assert!(!html.contains("window.open"));
}

#[test]
fn dom_keys_map_onto_card_inputs() {
    for key in Key::ACTIVATION_DOM_KEYS {
        assert_ne!(Key::from_dom_key(key), Key::Other, "key {:?} should activate", key);
    }
    assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
    assert_eq!(Key::from_dom_key(" "), Key::Space);
    assert_eq!(Key::from_dom_key("Tab"), Key::Other);
}
