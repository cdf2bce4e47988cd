use kibon_cards::*;
use std::path::PathBuf;
use tempfile::TempDir;

const DECK: &str = "\
Forms:
  Basic:
    Vidéo: https://example.com/v
    Cartes:
      - Numéro: 1
        Mouvements:
          - Front Kick
          - Seugui Makgi
        Marqueur: 12
      - Numéro: 2
        Mouvements: [Arae Makgi…]
        Marqueur: 40
Kibon:
  Makgi:
    Vidéo: https://example.com/k
    Cartes:
      - Numéro: 3
        Mouvements: [Olgoul Makgi]
        Marqueur: 7
";

const STYLES: &str = "\
Forms:
  Basic:
    color: \"3366cc\"
    image: basic.svg
";

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_load_deck_and_styles_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let deck_path = write_fixture(&dir, "kibon.yaml", DECK);
    let styles_path = write_fixture(&dir, "config.yaml", STYLES);

    let deck = load_deck(&deck_path).await.unwrap();
    assert_eq!(deck.card_count(), 3);
    let order: Vec<u32> = deck.entries().map(|(_, _, card)| card.number).collect();
    assert_eq!(order, [1, 2, 3]);

    let styles = load_styles(&styles_path).await.unwrap();
    let entry = styles.lookup("Forms", "Basic");
    assert_eq!(hex_to_rgb(&entry.color).unwrap(), hex_to_rgb("#3366cc").unwrap());
    assert_eq!(entry.icon.as_deref(), Some("basic.svg"));
    assert_eq!(styles.lookup("Kibon", "Makgi"), StyleEntry::default());
}

#[tokio::test]
async fn test_missing_deck_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    match load_deck(dir.path().join("absent.yaml")).await {
        Err(CardError::Io(_)) => {}
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_malformed_yaml_is_rejected() {
    assert!(matches!(parse_deck("Forms: [unclosed"), Err(CardError::Yaml(_))));
    assert!(matches!(parse_deck("- just\n- a list\n"), Err(CardError::Source(_))));
}

#[tokio::test]
async fn test_save_and_load_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");

    let mut options = DeckOptions::default();
    options.policy.variant = StyleVariant::Embossed;
    options.policy.guides = GuidePlacement::Both;
    options.policy.footer = FooterPosition::Top;
    options.paper = PaperSize::Letter;
    options.images_dir = PathBuf::from("icons");

    options.save(&path).await.unwrap();
    let loaded = DeckOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_options_fill_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "options.json", r#"{ "policy": { "guides": "Back" } }"#);

    let loaded = DeckOptions::load(&path).await.unwrap();
    assert_eq!(loaded.policy.guides, GuidePlacement::Back);
    assert_eq!(loaded.policy.variant, StyleVariant::Plain);
    assert_eq!(loaded.cards_per_page(), 8);
}

#[tokio::test]
async fn test_generate_fails_without_fonts() {
    let dir = tempfile::tempdir().unwrap();
    let deck = parse_deck(DECK).unwrap();
    let mut options = DeckOptions::default();
    options.fonts = FontPaths::in_dir(dir.path().join("no-fonts"));
    let output = dir.path().join("out.pdf");

    let result = generate_pdf(&deck, &StyleTable::default(), &options, &output).await;
    assert!(matches!(result, Err(CardError::Font(_))));
    assert!(!output.exists());
}

#[test]
fn test_statistics_match_pagination() {
    let deck = parse_deck(DECK).unwrap();
    let stats = calculate_statistics(&deck, &DeckOptions::default());
    assert_eq!(stats.categories, 2);
    assert_eq!(stats.subcategories, 2);
    assert_eq!(stats.cards, 3);
    assert_eq!(stats.page_pairs, 1);
    assert_eq!(stats.last_batch, 3);
}
