//! End-to-end conversion tests.
//!
//! These tests run `create_decks` against an in-memory catalog and a
//! directory uploader and check the written scene document:
//! - Container layout and CardIDs
//! - Sheet geometry across page boundaries
//! - Token and double-faced containers
//! - Abort on upload failure or when no deck holds a card
//! - File-safe names

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::Value;
use tts_deck::cards::{Card, CardFace, Layout, PartComponent, RelatedPart};
use tts_deck::core::{CardSize, ConversionConfig, ManualClock};
use tts_deck::pipeline::{create_decks, ConversionOutcome};
use tts_deck::services::{DirectoryUploader, InMemoryCatalog, SheetUploader};
use tts_deck::Deck;

const SIZE: &str = "small";

fn png(color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(4, 6, Rgba(color));
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn config(dir: &Path) -> ConversionConfig {
    ConversionConfig::default()
        .with_card_size(CardSize::new(SIZE, 4, 6))
        .with_output_dir(dir.join("out"))
        .with_seed(7)
}

/// Register a single-faced card and its image.
fn simple_card(catalog: &mut InMemoryCatalog, name: &str) -> Card {
    let uri = format!("img:{name}");
    catalog.add_image(uri.clone(), png([200, 10, 10, 255]));
    let card = Card::new(format!("id-{name}"), name).with_image(SIZE, uri);
    catalog.add_card(card.clone());
    card
}

/// Register a transform card with two imaged faces.
fn transform_card(catalog: &mut InMemoryCatalog, name: &str) -> Card {
    let front = format!("img:{name}:front");
    let back = format!("img:{name}:back");
    catalog.add_image(front.clone(), png([10, 200, 10, 255]));
    catalog.add_image(back.clone(), png([10, 10, 200, 255]));
    Card::new(format!("id-{name}"), name)
        .with_layout(Layout::Transform)
        .with_face(CardFace::new(format!("{name} (front)")).with_image(SIZE, front))
        .with_face(CardFace::new(format!("{name} (back)")).with_image(SIZE, back))
}

/// Register a token and return a card that references it.
fn card_with_token(catalog: &mut InMemoryCatalog, name: &str, token: &str) -> Card {
    let token_uri = format!("card:{token}");
    let image = format!("img:{token}");
    catalog.add_image(image.clone(), png([90, 90, 90, 255]));
    catalog.add_card_at(
        token_uri.clone(),
        Card::new(format!("id-{token}"), token)
            .with_layout(Layout::Token)
            .with_image(SIZE, image),
    );
    simple_card(catalog, name).with_part(RelatedPart::new(
        format!("id-{token}"),
        PartComponent::Token,
        token,
        token_uri,
    ))
}

fn run(decks: &[Deck], catalog: &mut InMemoryCatalog, dir: &Path) -> (ConversionOutcome, Option<Value>) {
    let mut uploader = DirectoryUploader::new(dir.join("sheets")).with_base_url("http://sheets.test");
    let clock = ManualClock::new();
    let outcome = create_decks(decks, &config(dir), catalog, &mut uploader, &clock).unwrap();
    let doc = outcome
        .path()
        .map(|path| serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap());
    (outcome, doc)
}

fn deck_ids(object: &Value) -> Vec<u64> {
    object["DeckIDs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect()
}

/// Four copies of one card give one container with four instances of id 100.
#[test]
fn test_single_card_deck() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let elf = simple_card(&mut catalog, "Llanowar Elves");
    let deck = Deck::new("Elves").with_card(elf, 4);

    let (outcome, doc) = run(&[deck], &mut catalog, dir.path());
    let doc = doc.unwrap();

    assert_eq!(outcome.path().unwrap().file_name().unwrap(), "Elves.json");
    let objects = doc["ObjectStates"].as_array().unwrap();
    assert_eq!(objects.len(), 1);

    let main = &objects[0];
    assert_eq!(main["Name"], "DeckCustom");
    assert_eq!(main["Nickname"], "Elves");
    assert_eq!(deck_ids(main), vec![100, 100, 100, 100]);
    assert_eq!(main["ContainedObjects"].as_array().unwrap().len(), 4);
    assert_eq!(main["ContainedObjects"][0]["Nickname"], "Llanowar Elves");
    assert_eq!(main["CustomDeck"]["1"]["NumWidth"], 5);
    assert_eq!(main["CustomDeck"]["1"]["NumHeight"], 1);
    assert_eq!(
        main["CustomDeck"]["1"]["FaceURL"],
        "http://sheets.test/TTS_Elves_simple_0.png"
    );
    assert_eq!(main["Transform"]["rotZ"], 180.0);

    // One fetch, no throttle wait; one sheet on disk
    assert_eq!(catalog.image_requests(), 1);
    assert!(dir.path().join("sheets/TTS_Elves_simple_0.png").exists());
}

/// A lone transform card becomes a single-card object, not a deck of one.
#[test]
fn test_single_transform_card() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let elf = simple_card(&mut catalog, "Llanowar Elves");
    let delver = transform_card(&mut catalog, "Delver of Secrets");
    let deck = Deck::new("Blue").with_card(elf, 2).with_card(delver, 1);

    let (_, doc) = run(&[deck], &mut catalog, dir.path());
    let doc = doc.unwrap();
    let objects = doc["ObjectStates"].as_array().unwrap();
    assert_eq!(objects.len(), 2);

    // Main lists the simple card twice, then the dfc front shifted one page
    let main = &objects[0];
    assert_eq!(deck_ids(main), vec![100, 100, 200]);
    assert_eq!(
        main["CustomDeck"]["2"]["FaceURL"],
        "http://sheets.test/TTS_Blue_dfc_0.png"
    );

    let dfc = &objects[1];
    assert_eq!(dfc["Name"], "Card");
    assert_eq!(dfc["Nickname"], "Delver of Secrets");
    assert_eq!(dfc["CardID"], 100);
    assert_eq!(dfc["Transform"]["posZ"], 8.0);
    assert_eq!(dfc["CustomDeck"]["1"]["UniqueBack"], true);
    assert_eq!(
        dfc["CustomDeck"]["1"]["BackURL"],
        "http://sheets.test/TTS_Blue_dfc_1.png"
    );
    assert!(dfc.get("ContainedObjects").is_none());
}

/// Copies of one transform card still lie on the table as a single card.
#[test]
fn test_transform_copies_collapse() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let elf = simple_card(&mut catalog, "Llanowar Elves");
    let delver = transform_card(&mut catalog, "Delver of Secrets");
    let deck = Deck::new("Blue").with_card(elf, 1).with_card(delver, 2);

    let (_, doc) = run(&[deck], &mut catalog, dir.path());
    let doc = doc.unwrap();
    let objects = doc["ObjectStates"].as_array().unwrap();

    assert_eq!(deck_ids(&objects[0]), vec![100, 200, 200]);
    assert_eq!(objects[1]["Name"], "Card");
    assert_eq!(objects[1]["CardID"], 100);
}

/// A full page of transform cards fills a five-row front/back pair.
#[test]
fn test_full_double_faced_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let mut deck = Deck::new("Werewolves").with_card(simple_card(&mut catalog, "Forest"), 1);
    for i in 0..24 {
        deck.add(transform_card(&mut catalog, &format!("Wolf {i}")), 1);
    }

    let (_, doc) = run(&[deck], &mut catalog, dir.path());
    let doc = doc.unwrap();
    let objects = doc["ObjectStates"].as_array().unwrap();

    let main = &objects[0];
    let ids = deck_ids(main);
    assert_eq!(ids.len(), 25);
    assert_eq!(ids[1], 200);
    assert_eq!(ids[24], 223);
    assert_eq!(main["CustomDeck"]["2"]["NumHeight"], 5);

    let dfc = &objects[1];
    assert_eq!(dfc["Name"], "DeckCustom");
    assert_eq!(dfc["CustomDeck"].as_object().unwrap().len(), 1);
    assert_eq!(dfc["CustomDeck"]["1"]["NumHeight"], 5);

    let sheets = dir.path().join("sheets");
    assert!(sheets.join("TTS_Werewolves_dfc_0.png").exists());
    assert!(sheets.join("TTS_Werewolves_dfc_1.png").exists());
    assert!(!sheets.join("TTS_Werewolves_dfc_2.png").exists());
}

/// Four transform cards take two rows on both the main and dfc sheets.
#[test]
fn test_partial_double_faced_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let mut deck = Deck::new("Flip").with_card(simple_card(&mut catalog, "Island"), 1);
    for i in 0..4 {
        deck.add(transform_card(&mut catalog, &format!("Flip {i}")), 1);
    }

    let (_, doc) = run(&[deck], &mut catalog, dir.path());
    let doc = doc.unwrap();
    let objects = doc["ObjectStates"].as_array().unwrap();

    assert_eq!(objects[0]["CustomDeck"]["2"]["NumHeight"], 2);
    assert_eq!(objects[1]["CustomDeck"]["1"]["NumHeight"], 2);
    assert_eq!(objects[1]["CustomDeck"]["1"]["UniqueBack"], true);
}

/// Deck names are made safe before they become file names.
#[test]
fn test_deck_name_with_separator() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let elf = simple_card(&mut catalog, "Llanowar Elves");
    let deck = Deck::new("G/W Elves").with_card(elf, 1);

    let (outcome, doc) = run(&[deck], &mut catalog, dir.path());

    let path = outcome.path().unwrap();
    assert_eq!(path.file_name().unwrap(), "G_W Elves.json");
    assert_eq!(path.parent().unwrap(), dir.path().join("out").as_path());
    assert!(dir.path().join("sheets/TTS_G_W Elves_simple_0.png").exists());
    // Nickname keeps the real name
    assert_eq!(doc.unwrap()["ObjectStates"][0]["Nickname"], "G/W Elves");
}

/// 25 unique cards spill onto a second page holding one card.
#[test]
fn test_page_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let mut deck = Deck::new("Pile");
    for i in 0..25 {
        deck.add(simple_card(&mut catalog, &format!("Card {i}")), 1);
    }

    let (_, doc) = run(&[deck], &mut catalog, dir.path());
    let doc = doc.unwrap();
    let main = &doc["ObjectStates"][0];

    let ids = deck_ids(main);
    assert_eq!(ids.len(), 25);
    assert_eq!(ids[0], 100);
    assert_eq!(ids[23], 123);
    assert_eq!(ids[24], 200);

    assert_eq!(main["CustomDeck"]["1"]["NumHeight"], 5);
    assert_eq!(main["CustomDeck"]["2"]["NumHeight"], 1);
}

/// Tokens get their own container behind the main deck.
#[test]
fn test_token_container() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let maker = card_with_token(&mut catalog, "Elvish Warmaster", "Elf Warrior");
    let deck = Deck::new("Elves").with_card(maker, 3);

    let (_, doc) = run(&[deck], &mut catalog, dir.path());
    let doc = doc.unwrap();
    let objects = doc["ObjectStates"].as_array().unwrap();
    assert_eq!(objects.len(), 2);

    let tokens = &objects[1];
    assert_eq!(tokens["Nickname"], "Elves [tokens]");
    assert_eq!(tokens["Transform"]["posZ"], 4.0);
    assert_eq!(tokens["Transform"]["rotZ"], 0.0);
    // One token per deck, however many copies reference it
    assert_eq!(deck_ids(tokens), vec![101]);
    assert_eq!(tokens["ContainedObjects"][0]["Nickname"], "Elf Warrior");

    let back = tokens["CustomDeck"]["1"]["BackURL"].as_str().unwrap();
    assert!(back.contains("token_"));
}

/// Two decks share sheets and sit side by side.
#[test]
fn test_two_decks_share_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let elf = simple_card(&mut catalog, "Llanowar Elves");
    let bolt = simple_card(&mut catalog, "Lightning Bolt");
    let green = Deck::new("Green").with_card(elf.clone(), 2);
    let red = Deck::new("Red").with_card(bolt, 1).with_card(elf, 1);

    let (outcome, doc) = run(&[green, red], &mut catalog, dir.path());
    let doc = doc.unwrap();

    assert_eq!(outcome.path().unwrap().file_name().unwrap(), "Green.json");
    let objects = doc["ObjectStates"].as_array().unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(deck_ids(&objects[0]), vec![100, 100]);
    assert_eq!(deck_ids(&objects[1]), vec![101, 100]);
    assert_eq!(objects[0]["Transform"]["posX"], 0.0);
    assert_eq!(objects[1]["Transform"]["posX"], 3.0);
    assert_eq!(objects[0]["CustomDeck"], objects[1]["CustomDeck"]);

    // Shared cards are fetched once
    assert_eq!(catalog.image_requests(), 2);
}

/// Same seed, same document.
#[test]
fn test_deterministic_output() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let maker = card_with_token(&mut catalog, "Elvish Warmaster", "Elf Warrior");
    let deck = Deck::new("Elves").with_card(maker, 2);

    let mut uploader_a = DirectoryUploader::new(dir_a.path()).with_base_url("http://x");
    let mut uploader_b = DirectoryUploader::new(dir_b.path()).with_base_url("http://x");
    let clock = ManualClock::new();
    let a = create_decks(
        std::slice::from_ref(&deck),
        &config(dir_a.path()),
        &mut catalog,
        &mut uploader_a,
        &clock,
    )
    .unwrap();
    let b = create_decks(&[deck], &config(dir_b.path()), &mut catalog, &mut uploader_b, &clock).unwrap();

    let text_a = std::fs::read_to_string(a.path().unwrap()).unwrap();
    let text_b = std::fs::read_to_string(b.path().unwrap()).unwrap();
    assert_eq!(text_a, text_b);
}

/// Image fetches are spaced by the configured interval.
#[test]
fn test_fetches_are_throttled() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let elf = simple_card(&mut catalog, "Llanowar Elves");
    let delver = transform_card(&mut catalog, "Delver of Secrets");
    let deck = Deck::new("Mixed").with_card(elf, 1).with_card(delver, 1);

    let mut uploader = DirectoryUploader::new(dir.path().join("sheets"));
    let clock = ManualClock::new();
    let config = config(dir.path()).with_fetch_interval(Duration::from_millis(100));
    create_decks(&[deck], &config, &mut catalog, &mut uploader, &clock).unwrap();

    // Three fetches (one simple face, two dfc faces), two waits
    assert_eq!(catalog.image_requests(), 3);
    assert_eq!(clock.sleep_count(), 2);
    assert_eq!(clock.total_slept(), Duration::from_millis(200));
}

struct FailingUploader {
    calls: usize,
}

impl SheetUploader for FailingUploader {
    fn upload(&mut self, _bytes: &[u8], _filename: &str) -> Option<String> {
        self.calls += 1;
        None
    }
}

/// An upload failure aborts the run and writes nothing.
#[test]
fn test_upload_failure_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let elf = simple_card(&mut catalog, "Llanowar Elves");
    let delver = transform_card(&mut catalog, "Delver of Secrets");
    let deck = Deck::new("Doomed").with_card(elf, 1).with_card(delver, 1);

    let mut uploader = FailingUploader { calls: 0 };
    let clock = ManualClock::new();
    let outcome = create_decks(&[deck], &config(dir.path()), &mut catalog, &mut uploader, &clock).unwrap();

    assert_eq!(outcome, ConversionOutcome::Aborted);
    // The double-faced batch is never attempted
    assert_eq!(uploader.calls, 1);
    assert!(!dir.path().join("out").exists());
}

/// No decks, no document.
#[test]
fn test_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();

    let (outcome, doc) = run(&[], &mut catalog, dir.path());
    assert_eq!(outcome, ConversionOutcome::Aborted);
    assert!(doc.is_none());
}

/// Decks without cards produce no sheets and no document.
#[test]
fn test_all_decks_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();

    let (outcome, doc) = run(&[Deck::new("Empty"), Deck::new("Also Empty")], &mut catalog, dir.path());

    assert_eq!(outcome, ConversionOutcome::Aborted);
    assert!(doc.is_none());
    assert!(!dir.path().join("out").exists());
}

/// Missing face image propagates as an error.
#[test]
fn test_missing_image_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut catalog = InMemoryCatalog::new();
    let blank = Card::new("id-blank", "Blank");
    let deck = Deck::new("Broken").with_card(blank, 1);

    let mut uploader = DirectoryUploader::new(dir.path().join("sheets"));
    let clock = ManualClock::new();
    let result = create_decks(&[deck], &config(dir.path()), &mut catalog, &mut uploader, &clock);

    assert!(result.is_err());
    assert!(!dir.path().join("out").exists());
}
