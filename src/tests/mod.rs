use std::collections::HashSet;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::catalog::{entity_for_tests, Catalog, Entity};
use crate::output::{self, OutputFormat, PageSnapshot};
use crate::render::Background;
use crate::runner::{Options, Runner};
use crate::view::{self, CatalogView, ViewState, PAGE_SIZE};

const NAMES: &[(&str, &[&str])] = &[
    ("Bulbizarre", &["Plante", "Poison"]),
    ("Salamèche", &["Feu"]),
    ("Dracaufeu", &["Feu", "Vol"]),
    ("Carapuce", &["Eau"]),
    ("Chenipan", &["Insecte"]),
    ("Roucool", &["Normal", "Vol"]),
    ("Pikachu", &["Électrik"]),
    ("Abo", &["Poison"]),
    ("Tentacool", &["Eau", "Poison"]),
    ("Charmeleon", &["Feu"]),
    ("Squirtle", &["Eau"]),
    ("Charmander", &["Feu"]),
];

fn mixed_catalog() -> Catalog {
    NAMES
        .iter()
        .enumerate()
        .map(|(i, (name, types))| entity_for_tests(i as u32 + 1, name, types))
        .collect()
}

fn ids(entities: &[&Entity]) -> Vec<u32> {
    entities.iter().map(|e| e.id).collect()
}

#[test]
fn filtered_entities_match_both_predicates_and_nothing_else() {
    let catalog = mixed_catalog();
    let searches = ["", "char", "CHAR", "a", "zz", "è"];
    let selections: [&[&str]; 4] = [&[], &["Feu"], &["Eau", "Poison"], &["Vol", "Inconnu"]];
    for search in searches {
        for selection in selections {
            let state = ViewState {
                search_text: search.to_string(),
                selected_categories: selection.iter().map(|s| s.to_string()).collect(),
                current_page: 1,
            };
            let filtered = view::filter_entities(&catalog, &state);
            let kept: HashSet<u32> = filtered.iter().map(|e| e.id).collect();
            for e in catalog.entities() {
                let name_ok = e.name.to_lowercase().contains(&search.to_lowercase());
                let type_ok =
                    selection.is_empty() || selection.iter().any(|s| e.has_category(s));
                assert_eq!(kept.contains(&e.id), name_ok && type_ok, "{search:?} {selection:?} {}", e.name);
            }
            let mut sorted = ids(&filtered);
            sorted.sort_unstable();
            assert_eq!(ids(&filtered), sorted, "catalog order must be preserved");
        }
    }
}

#[test]
fn empty_selection_equals_search_only() {
    let catalog = mixed_catalog();
    let with_empty = ViewState {
        search_text: "a".to_string(),
        ..ViewState::default()
    };
    let search_only: Vec<u32> = catalog
        .entities()
        .iter()
        .filter(|e| view::matches_search(e, "a"))
        .map(|e| e.id)
        .collect();
    assert_eq!(ids(&view::filter_entities(&catalog, &with_empty)), search_only);
}

#[test]
fn char_matches_charmander_not_squirtle() {
    let mut v = CatalogView::new(mixed_catalog());
    v.set_search_text("char");
    let names: Vec<&str> = v.filtered_entities().iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"Charmander"));
    assert!(!names.contains(&"Squirtle"));
}

#[test]
fn visible_length_and_page_count_hold_for_every_size() {
    for n in 0..=45u32 {
        let catalog: Catalog = (1..=n)
            .map(|i| entity_for_tests(i, &format!("P{i}"), &["Normal"]))
            .collect();
        let mut v = CatalogView::new(catalog);
        let count = n as usize;
        let expected_pages = if count == 0 { 1 } else { count.div_ceil(PAGE_SIZE) };
        assert_eq!(v.total_pages(), expected_pages);
        for page in 1..=expected_pages + 1 {
            v.go_to_page(page);
            let current = v.state().current_page;
            assert!((1..=expected_pages).contains(&current));
            let remaining = count.saturating_sub((current - 1) * PAGE_SIZE);
            assert_eq!(v.visible_entities().len(), remaining.min(PAGE_SIZE));
        }
    }
}

#[test]
fn navigation_never_leaves_page_range() {
    let mut v = CatalogView::new(mixed_catalog());
    let steps: [fn(&mut CatalogView); 4] = [
        CatalogView::go_to_next_page,
        CatalogView::go_to_prev_page,
        CatalogView::go_to_last_page,
        CatalogView::go_to_first_page,
    ];
    for round in 0..20 {
        steps[round % 4](&mut v);
        steps[(round * 7 + 1) % 4](&mut v);
        let p = v.state().current_page;
        assert!(p >= 1 && p <= v.total_pages());
    }
}

#[test]
fn twenty_five_entities_scenario() {
    let catalog: Catalog = (1..=25)
        .map(|i| entity_for_tests(i, &format!("P{i}"), &["Normal"]))
        .collect();
    let mut v = CatalogView::new(catalog);
    assert_eq!(ids(&v.visible_entities()), (1..=10).collect::<Vec<_>>());
    assert_eq!(v.total_pages(), 3);
    v.go_to_page(3);
    assert_eq!(ids(&v.visible_entities()), (21..=25).collect::<Vec<_>>());
}

#[test]
fn eau_or_poison_scenario() {
    let mut v = CatalogView::new(mixed_catalog());
    v.toggle_category("Eau");
    v.toggle_category("Poison");
    let names: Vec<&str> = v.filtered_entities().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bulbizarre", "Carapuce", "Abo", "Tentacool", "Squirtle"]);
}

#[test]
fn feu_vol_card_background() {
    let e = entity_for_tests(6, "Dracaufeu", &["Feu", "Vol"]);
    let card = crate::render::entity_card(&e);
    assert_eq!(
        card.background,
        Background::LeftToRight {
            from: "#FF5733",
            to: "#78C7FF"
        }
    );
}

/// Serves one HTTP response with `body`, then closes.
async fn serve_catalog(body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/api/v1/pokemon")
}

#[tokio::test]
async fn runner_loads_catalog_and_clamps_requested_page() {
    let entities: Vec<Entity> = (1..=15)
        .map(|i| entity_for_tests(i, &format!("P{i}"), &["Normal"]))
        .collect();
    let body = serde_json::to_string(&entities).unwrap();
    let endpoint = serve_catalog(body).await;

    let runner = Runner::new(Options {
        endpoint,
        timeout_seconds: Some(5),
        initial_state: ViewState {
            current_page: 9,
            ..ViewState::default()
        },
    })
    .unwrap();
    let loaded = runner.run().await.unwrap();
    assert!(loaded.rejected.is_empty());
    assert_eq!(loaded.view.catalog().len(), 15);
    assert_eq!(loaded.view.state().current_page, 2);
    assert_eq!(loaded.view.visible_entities().len(), 5);

    let snapshot = PageSnapshot::capture(&loaded.view);
    let html = String::from_utf8(output::render(&snapshot, OutputFormat::Html).unwrap()).unwrap();
    assert!(html.contains("Page 2 / 2"));
    assert!(html.contains("#015"));
}

#[tokio::test]
async fn write_assets_creates_icon_files() {
    let dir = std::env::temp_dir().join(format!("pokedex_assets_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    output::write_assets(&dir).await.unwrap();
    for name in ["pokeball", "heart", "sword", "shield"] {
        let svg = std::fs::read_to_string(dir.join("svg").join(format!("{name}.svg"))).unwrap();
        assert!(svg.starts_with("<svg"));
    }
    let _ = std::fs::remove_dir_all(&dir);
}
