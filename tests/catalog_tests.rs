mod common;

use kids_gaming_site::catalog::{
    apply_catalog, render_cards, ActivationOutcome, CardInput, Key, PLACEHOLDER_THUMBNAIL,
};
use kids_gaming_site::model::games::{GameRecord, GamesDocument};
use kids_gaming_site::page::PageState;
use kids_gaming_site::render::{Activation, Badge, GameCard};

use common::{read_fixture, RecordingLauncher};

fn record(name: &str) -> GameRecord {
    GameRecord { name: name.to_string(), description: None, thumb: None, difficulty: None, url: None }
}

fn fixture_games() -> GamesDocument {
    serde_json::from_str(&read_fixture("site/games.json")).expect("games should deserialize")
}

#[test]
fn cards_keep_document_order_and_duplicates() {
    let records = vec![record("Zebra Dash"), record("Apple Catch"), record("Zebra Dash"), record("Mole Hunt")];
    let mut page = PageState::new();
    let count = render_cards(&records, &mut page);

    assert_eq!(count, 4);
    let titles: Vec<&str> = page.cards.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Zebra Dash", "Apple Catch", "Zebra Dash", "Mole Hunt"]);
    let positions: Vec<usize> = page.cards.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
    assert!(page.cards.iter().all(|c| c.tab_index == 0));
}

#[test]
fn rerendering_replaces_previous_cards() {
    let mut page = PageState::new();
    render_cards(&[record("One"), record("Two")], &mut page);
    render_cards(&[record("Three")], &mut page);
    assert_eq!(page.cards.len(), 1);
    assert_eq!(page.cards[0].title, "Three");
}

#[test]
fn fixture_cards_fill_defaults() {
    let mut page = PageState::new();
    apply_catalog(&fixture_games(), &mut page);

    assert_eq!(page.document_title.as_deref(), Some("Pixel Pals Game Zone"));
    assert_eq!(page.hero_title.as_deref(), Some("Pixel Pals Game Zone"));
    assert_eq!(page.hero_tagline.as_deref(), Some("Fun games for curious minds"));
    assert_eq!(page.cards.len(), 3);

    let math = &page.cards[0];
    assert_eq!(math.badge, Badge::Difficulty("Medium".to_string()));
    assert_eq!(math.badge.label(), "Difficulty: Medium");
    assert_eq!(math.activation, Activation::Open("https://games.example/math-blaster".to_string()));
    assert_eq!(math.thumbnail.alt, "Math Blaster thumbnail");

    let words = &page.cards[1];
    assert_eq!(words.description, "");
    assert_eq!(words.badge, Badge::Play);
    assert_eq!(words.activation, Activation::Inert);

    let colors = &page.cards[2];
    assert_eq!(colors.thumbnail.src, PLACEHOLDER_THUMBNAIL);
}

#[test]
fn legacy_title_key_is_accepted() {
    let doc: GamesDocument = serde_json::from_value(serde_json::json!({
        "title": "Old Title",
        "games": []
    }))
    .unwrap();
    assert_eq!(doc.site_title.as_deref(), Some("Old Title"));
}

#[test]
fn broken_thumbnail_recovers_to_placeholder_once() {
    let mut record = record("Rocket");
    record.thumb = Some("https://cdn.example/missing.png".to_string());
    let mut card = GameCard::from_record(0, &record);

    assert!(card.thumbnail.recover());
    assert_eq!(card.thumbnail.src, PLACEHOLDER_THUMBNAIL);
    assert!(!card.thumbnail.recover());
    assert_eq!(card.thumbnail.src, PLACEHOLDER_THUMBNAIL);
}

#[test]
fn card_without_url_never_launches() {
    let card = GameCard::from_record(0, &record("Offline Puzzle"));
    let mut launcher = RecordingLauncher::default();

    for input in [CardInput::Pointer, CardInput::Key(Key::Enter), CardInput::Key(Key::Space)] {
        assert_eq!(card.activate(input, &mut launcher), ActivationOutcome::Inert);
    }
    assert!(launcher.opened.is_empty());
}

#[test]
fn pointer_enter_and_space_each_launch_once() {
    let mut record = record("Math Blaster");
    record.url = Some("https://games.example/math".to_string());
    let card = GameCard::from_record(0, &record);
    let mut launcher = RecordingLauncher::default();

    assert_eq!(card.activate(CardInput::Pointer, &mut launcher), ActivationOutcome::Launched);
    assert_eq!(card.activate(CardInput::Key(Key::Enter), &mut launcher), ActivationOutcome::Launched);
    assert_eq!(card.activate(CardInput::Key(Key::Space), &mut launcher), ActivationOutcome::Launched);
    assert_eq!(launcher.opened.len(), 3);
    assert!(launcher.opened.iter().all(|u| u == "https://games.example/math"));
}

#[test]
fn other_keys_are_ignored() {
    let mut record = record("Math Blaster");
    record.url = Some("https://games.example/math".to_string());
    let card = GameCard::from_record(0, &record);
    let mut launcher = RecordingLauncher::default();

    assert_eq!(card.activate(CardInput::Key(Key::Other), &mut launcher), ActivationOutcome::Ignored);
    assert!(launcher.opened.is_empty());
}

#[test]
fn keyboard_activation_suppresses_default_action() {
    assert!(CardInput::Key(Key::Enter).suppresses_default());
    assert!(CardInput::Key(Key::Space).suppresses_default());
    assert!(!CardInput::Pointer.suppresses_default());
    assert!(!CardInput::Key(Key::Other).suppresses_default());
}

#[test]
fn card_lookup_allows_thumbnail_recovery_in_place() {
    let mut page = PageState::new();
    render_cards(&[record("One"), record("Two")], &mut page);
    let card = page.card_mut(1).expect("second card");
    assert!(!card.thumbnail.recover());
    assert!(page.card_mut(5).is_none());
}
