pub mod page;

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::render::{self, EntityCard};
use crate::view::{CatalogView, CategoryOption, Pagination};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// One rendered state of a [`CatalogView`].
#[derive(Clone, Debug, Serialize)]
pub struct PageSnapshot {
    pub total_count: usize,
    pub search_text: String,
    pub categories: Vec<CategoryOption>,
    pub cards: Vec<EntityCard>,
    pub pagination: Pagination,
    /// Every entity of the catalog, in source order. The HTML page filters
    /// and pages over these in the browser.
    #[serde(skip)]
    pub catalog: Vec<EntityCard>,
}

impl PageSnapshot {
    pub fn capture(view: &CatalogView) -> Self {
        let filtered = view.filtered_entities();
        let cards = view
            .visible_entities()
            .into_iter()
            .map(render::entity_card)
            .collect();
        Self {
            total_count: filtered.len(),
            search_text: view.state().search_text.clone(),
            categories: view.available_categories(),
            cards,
            pagination: view.pagination(),
            catalog: view
                .catalog()
                .entities()
                .iter()
                .map(render::entity_card)
                .collect(),
        }
    }

    pub fn selected_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.name.as_str())
            .collect()
    }
}

pub fn render_text(snapshot: &PageSnapshot) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&format!("{}\n", page::HEADING.bold()));
    out.push_str(&format!(
        "Nombre total de Pokémon : {}\n",
        snapshot.total_count.to_string().bold().cyan()
    ));
    if !snapshot.search_text.is_empty() {
        out.push_str(&format!(":: Recherche : {}\n", snapshot.search_text));
    }
    let selected = snapshot.selected_categories();
    if !selected.is_empty() {
        out.push_str(&format!(":: Types     : {}\n", selected.join(", ")));
    }
    out.push('\n');
    for card in &snapshot.cards {
        out.push_str(&render::render_card_text(card));
        out.push('\n');
    }
    out.push_str(&format!("{}\n", pagination_line(&snapshot.pagination)));
    out.into_bytes()
}

fn control(glyph: &str, enabled: bool) -> String {
    if enabled {
        glyph.bold().to_string()
    } else {
        glyph.dimmed().to_string()
    }
}

pub fn pagination_line(p: &Pagination) -> String {
    format!(
        "{} {} {} {} {}",
        control("«", p.first_enabled),
        control("‹", p.prev_enabled),
        p.label().bold(),
        control("›", p.next_enabled),
        control("»", p.last_enabled),
    )
}

pub fn render_json(snapshot: &PageSnapshot) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = serde_json::to_vec_pretty(snapshot)?;
    out.push(b'\n');
    Ok(out)
}

pub fn render_html(snapshot: &PageSnapshot) -> Result<Vec<u8>, serde_json::Error> {
    page::render_html(snapshot)
}

pub fn render(snapshot: &PageSnapshot, format: OutputFormat) -> Result<Vec<u8>, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => render_json(snapshot),
        OutputFormat::Html => render_html(snapshot),
    }
}

const ASSETS: &[(&str, &str)] = &[
    ("svg/pokeball.svg", include_str!("../../static/svg/pokeball.svg")),
    ("svg/heart.svg", include_str!("../../static/svg/heart.svg")),
    ("svg/sword.svg", include_str!("../../static/svg/sword.svg")),
    ("svg/shield.svg", include_str!("../../static/svg/shield.svg")),
];

/// Writes the icons referenced by the HTML page under `dir`.
pub async fn write_assets(dir: &Path) -> std::io::Result<()> {
    for (relative, contents) in ASSETS {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, contents).await?;
    }
    Ok(())
}
