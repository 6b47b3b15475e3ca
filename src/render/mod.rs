use colored::Colorize;
use serde::Serialize;

use crate::catalog::{Category, Entity};

pub const FALLBACK_COLOR: &str = "#ccc";

const CARD_WIDTH: usize = 36;

const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Feu", "#FF5733"),
    ("Eau", "#3498db"),
    ("Plante", "#4CAF50"),
    ("Poison", "#9C27B0"),
    ("Vol", "#78C7FF"),
    ("Électrik", "#FFD700"),
    ("Roche", "#8B4513"),
    ("Sol", "#D2691E"),
    ("Glace", "#00FFFF"),
    ("Combat", "#FF4500"),
    ("Spectre", "#800080"),
    ("Psy", "#FF69B4"),
    ("Dragon", "#6A5ACD"),
    ("Insecte", "#ADFF2F"),
    ("Acier", "#708090"),
    ("Fée", "#FFB6C1"),
    ("Ténèbres", "#2F4F4F"),
    ("Normal", "#A9A9A9"),
];

pub fn category_color(name: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Card background derived from the entity's types. Only the first three
/// types contribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    Solid { color: &'static str },
    LeftToRight { from: &'static str, to: &'static str },
    TopToBottom { stops: [&'static str; 3] },
}

impl Background {
    pub fn for_categories<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let colors: Vec<&'static str> = names.into_iter().map(category_color).collect();
        match colors.as_slice() {
            [] => Background::Solid {
                color: FALLBACK_COLOR,
            },
            [only] => Background::Solid { color: *only },
            [from, to] => Background::LeftToRight {
                from: *from,
                to: *to,
            },
            [a, b, c, ..] => Background::TopToBottom {
                stops: [*a, *b, *c],
            },
        }
    }

    /// CSS `background` value.
    pub fn to_css(&self) -> String {
        match self {
            Background::Solid { color } => color.to_string(),
            Background::LeftToRight { from, to } => {
                format!("linear-gradient(to right, {from}, {to})")
            }
            Background::TopToBottom { stops: [a, b, c] } => {
                format!("linear-gradient(to bottom, {a}, {b}, {c})")
            }
        }
    }
}

/// Parses `#rgb` or `#rrggbb`.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&format!("{c}{c}")));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 => Some((
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        )),
        _ => None,
    }
}

pub fn ordinal(display_index: u32) -> String {
    format!("#{display_index:03}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatIcon {
    Heart,
    Sword,
    Shield,
}

impl StatIcon {
    pub fn asset_path(self) -> &'static str {
        match self {
            StatIcon::Heart => "svg/heart.svg",
            StatIcon::Sword => "svg/sword.svg",
            StatIcon::Shield => "svg/shield.svg",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            StatIcon::Heart => "♥",
            StatIcon::Sword => "⚔",
            StatIcon::Shield => "⛨",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub label: &'static str,
    pub value: u32,
    pub icon: StatIcon,
}

/// Everything needed to draw one entity, independent of the output medium.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityCard {
    pub id: u32,
    pub ordinal: String,
    pub name: String,
    pub image: String,
    pub categories: Vec<Category>,
    pub stats: [StatLine; 3],
    pub background: Background,
    pub background_css: String,
}

pub fn entity_card(entity: &Entity) -> EntityCard {
    let background = Background::for_categories(entity.category_names());
    EntityCard {
        id: entity.id,
        ordinal: ordinal(entity.display_index),
        name: entity.name.clone(),
        image: entity.image.clone(),
        categories: entity.categories.clone(),
        stats: [
            StatLine {
                label: "HP",
                value: entity.stats.hp,
                icon: StatIcon::Heart,
            },
            StatLine {
                label: "ATK",
                value: entity.stats.attack,
                icon: StatIcon::Sword,
            },
            StatLine {
                label: "DEF",
                value: entity.stats.defense,
                icon: StatIcon::Shield,
            },
        ],
        background_css: background.to_css(),
        background,
    }
}

fn band(color: &str, width: usize, text: &str) -> String {
    let padded = format!("{text:<width$}");
    match parse_hex_color(color) {
        Some((r, g, b)) => padded.white().bold().on_truecolor(r, g, b).to_string(),
        None => padded,
    }
}

fn header_bands(card: &EntityCard) -> Vec<String> {
    let title = format!(" {} {}", card.ordinal, card.name);
    match &card.background {
        Background::Solid { color } => vec![band(color, CARD_WIDTH, &title)],
        Background::LeftToRight { from, to } => {
            let left = CARD_WIDTH / 2;
            let split = title.chars().count().min(left);
            let (head, tail): (String, String) = (
                title.chars().take(split).collect(),
                title.chars().skip(split).collect(),
            );
            vec![format!(
                "{}{}",
                band(from, left, &head),
                band(to, CARD_WIDTH - left, &tail)
            )]
        }
        Background::TopToBottom { stops: [a, b, c] } => vec![
            band(a, CARD_WIDTH, ""),
            band(b, CARD_WIDTH, &title),
            band(c, CARD_WIDTH, ""),
        ],
    }
}

/// Terminal rendering of one card.
pub fn render_card_text(card: &EntityCard) -> String {
    let mut lines = header_bands(card);
    lines.push(format!("  {}", card.image.dimmed()));
    if !card.categories.is_empty() {
        let types = card
            .categories
            .iter()
            .map(|c| format!("[{}]", c.name))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("  {}", types.cyan()));
    }
    let stats = card
        .stats
        .iter()
        .map(|s| format!("{} {} {}", s.icon.glyph(), s.label, s.value.to_string().bold()))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("  {stats}"));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
