use kibon_cards::*;

fn forms_deck(cards: u32) -> Deck {
    Deck {
        categories: vec![Category {
            name: "Forms".into(),
            subcategories: vec![Subcategory {
                name: "Basic".into(),
                video_url: "https://example.com/v".into(),
                cards: (1..=cards)
                    .map(|number| Card {
                        number,
                        moves: vec!["Front Kick".into(), "Seugui Makgi".into()],
                        marker: "12".into(),
                    })
                    .collect(),
            }],
        }],
    }
}

fn plan(deck: &Deck, styles: &StyleTable, options: &DeckOptions) -> Result<Vec<PagePlan>> {
    let mut pages = Vec::new();
    paginate(deck, styles, options, &FixedAdvance::default(), &NoIcons, &mut pages)?;
    Ok(pages)
}

fn links(page: &PagePlan) -> Vec<&str> {
    page.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::QrCode { data, .. } => Some(data.as_str()),
            _ => None,
        })
        .collect()
}

fn texts(page: &PagePlan) -> Vec<&str> {
    page.ops.iter().filter_map(DrawOp::text_str).collect()
}

#[test]
fn test_nine_cards_make_two_sheets() {
    let pages = plan(&forms_deck(9), &StyleTable::default(), &DeckOptions::default()).unwrap();

    assert_eq!(pages.len(), 4);
    let sides: Vec<_> = pages.iter().map(|p| (p.batch, p.side)).collect();
    assert_eq!(
        sides,
        [
            (0, Side::Front),
            (0, Side::Back),
            (1, Side::Front),
            (1, Side::Back)
        ]
    );
    assert_eq!(pages[0].cards, 8);
    assert_eq!(pages[2].cards, 1);
    assert_eq!(pages[3].cards, 1);

    // Card 9 is alone on the second sheet, in the top-left slot.
    let second_front = &pages[2];
    assert_eq!(texts(second_front).iter().filter(|t| t.starts_with("Card n°")).count(), 1);
    assert!(texts(second_front).contains(&"Card n°9"));

    let options = DeckOptions::default();
    let slot = Slot::for_index(0, &options);
    assert_eq!((slot.column, slot.row), (0, 0));
    let background = match &second_front.ops[0] {
        DrawOp::Rect { rect, .. } => *rect,
        other => panic!("expected background rect, got {other:?}"),
    };
    assert_eq!(background, slot.cell(&options));

    for page in pages.iter().filter(|p| p.side == Side::Front) {
        for link in links(page) {
            assert!(link.contains("t=12"), "{link}");
            assert!(link.contains("example.com/v"), "{link}");
        }
    }
    let total_links: usize = pages.iter().map(|p| links(p).len()).sum();
    assert_eq!(total_links, 9);
}

#[test]
fn test_every_card_appears_once_per_side() {
    let pages = plan(&forms_deck(20), &StyleTable::default(), &DeckOptions::default()).unwrap();
    assert_eq!(pages.len(), 6);

    let mut numbers: Vec<String> = pages
        .iter()
        .filter(|p| p.side == Side::Front)
        .flat_map(|p| {
            texts(p)
                .into_iter()
                .filter(|t| t.starts_with("Card n°"))
                .map(str::to_string)
        })
        .collect();
    numbers.sort_by_key(|t| t.trim_start_matches("Card n°").parse::<u32>().unwrap());
    let expected: Vec<String> = (1..=20).map(|n| format!("Card n°{n}")).collect();
    assert_eq!(numbers, expected);

    // Each back page carries one category banner (three stacked copies) per card.
    for pair in pages.chunks(2) {
        let (front, back) = (&pair[0], &pair[1]);
        let banners = texts(back).iter().filter(|t| **t == "Forms").count();
        assert_eq!(banners, 3 * front.cards);
    }
}

#[test]
fn test_empty_deck_emits_nothing() {
    let pages = plan(&Deck::default(), &StyleTable::default(), &DeckOptions::default()).unwrap();
    assert!(pages.is_empty());
}

#[test]
fn test_stance_moves_are_bold() {
    let pages = plan(&forms_deck(1), &StyleTable::default(), &DeckOptions::default()).unwrap();
    let face_of = |needle: &str| {
        pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, face, .. } if text == needle => Some(*face),
                _ => None,
            })
            .unwrap()
    };
    assert_eq!(face_of("Seugui Makgi"), FontFace::Bold);
    assert_eq!(face_of("Front Kick"), FontFace::Regular);
}

#[test]
fn test_style_colors_and_defaults() {
    let mut styles = StyleTable::default();
    styles.insert(
        "Forms",
        "Basic",
        StyleEntry {
            color: "#ff0000".into(),
            icon: None,
        },
    );
    let pages = plan(&forms_deck(1), &styles, &DeckOptions::default()).unwrap();
    match &pages[0].ops[0] {
        DrawOp::Rect { color, .. } => assert_eq!(*color, RgbColor::new(1.0, 0.0, 0.0)),
        other => panic!("expected background rect, got {other:?}"),
    }

    let pages = plan(&forms_deck(1), &StyleTable::default(), &DeckOptions::default()).unwrap();
    match &pages[1].ops[0] {
        DrawOp::Rect { color, .. } => assert_eq!(*color, RgbColor::WHITE),
        other => panic!("expected background rect, got {other:?}"),
    }
}

#[test]
fn test_invalid_color_aborts_the_run() {
    let mut styles = StyleTable::default();
    styles.insert(
        "Forms",
        "Basic",
        StyleEntry {
            color: "12".into(),
            icon: None,
        },
    );
    match plan(&forms_deck(3), &styles, &DeckOptions::default()) {
        Err(CardError::InvalidColorFormat(value)) => assert_eq!(value, "12"),
        other => panic!("Expected InvalidColorFormat, got {other:?}"),
    }
}

#[test]
fn test_guide_policy_selects_faces() {
    let guide_rects = |page: &PagePlan| {
        page.ops
            .iter()
            .filter(|op| {
                matches!(op, DrawOp::Rect { rect, .. } if rect.width < 0.5 || rect.height < 0.5)
            })
            .count()
    };

    for (placement, front, back) in [
        (GuidePlacement::None, 0, 0),
        (GuidePlacement::Front, 8, 0),
        (GuidePlacement::Back, 0, 8),
        (GuidePlacement::Both, 8, 8),
    ] {
        let mut options = DeckOptions::default();
        options.policy.guides = placement;
        let pages = plan(&forms_deck(1), &StyleTable::default(), &options).unwrap();
        assert_eq!(guide_rects(&pages[0]), front, "{placement:?} front");
        assert_eq!(guide_rects(&pages[1]), back, "{placement:?} back");
    }
}

#[test]
fn test_ampersand_delimiter() {
    let mut deck = forms_deck(1);
    deck.categories[0].subcategories[0].video_url = "https://youtube.com/watch?v=abc".into();
    let mut options = DeckOptions::default();
    options.policy.query_delimiter = QueryDelimiter::Ampersand;

    let pages = plan(&deck, &StyleTable::default(), &options).unwrap();
    assert_eq!(links(&pages[0]), ["https://youtube.com/watch?v=abc&t=12"]);
}

#[test]
fn test_mirrored_backs_swap_columns() {
    let mut options = DeckOptions::default();
    options.policy.back_mirroring = BackMirroring::LongEdge;
    let pages = plan(&forms_deck(1), &StyleTable::default(), &options).unwrap();

    let back_bg = match &pages[1].ops[0] {
        DrawOp::Rect { rect, .. } => *rect,
        other => panic!("expected background rect, got {other:?}"),
    };
    assert!((back_bg.x - 3.0 * 74.25).abs() < 1e-3);
    assert!((back_bg.y - 105.0).abs() < 1e-3);
}

#[test]
fn test_long_subcategory_wraps_to_two_lines() {
    let mut deck = forms_deck(1);
    deck.categories[0].subcategories[0].name =
        "Enchainement numero un deux trois quatre cinq six sept huit neuf dix".into();
    let pages = plan(&deck, &StyleTable::default(), &DeckOptions::default()).unwrap();

    let sub_lines = pages[0]
        .ops
        .iter()
        .filter(|op| {
            matches!(
                op,
                DrawOp::Text { face: FontFace::Bold, color, .. } if *color == RgbColor::gray(0x80)
            )
        })
        .count();
    assert_eq!(sub_lines, 2);
}
