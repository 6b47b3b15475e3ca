use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{Catalog, Category, Entity};

pub const PAGE_SIZE: usize = 10;

/// The user-controlled part of the view. Everything else is derived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub search_text: String,
    pub selected_categories: HashSet<String>,
    pub current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_categories: HashSet::new(),
            current_page: 1,
        }
    }
}

pub fn matches_search(entity: &Entity, search_text: &str) -> bool {
    search_text.is_empty()
        || entity
            .name
            .to_lowercase()
            .contains(&search_text.to_lowercase())
}

/// Any selected category is enough (OR semantics). No selection matches all.
pub fn matches_categories(entity: &Entity, selected: &HashSet<String>) -> bool {
    selected.is_empty() || entity.category_names().any(|name| selected.contains(name))
}

pub fn filter_entities<'a>(catalog: &'a Catalog, state: &ViewState) -> Vec<&'a Entity> {
    catalog
        .entities()
        .iter()
        .filter(|e| matches_search(e, &state.search_text))
        .filter(|e| matches_categories(e, &state.selected_categories))
        .collect()
}

/// Number of pages for `count` results, never less than one.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Slice of `filtered` shown on the 1-based `page`; empty past the end.
pub fn page_slice<'a, T>(filtered: &'a [T], page: usize) -> &'a [T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= filtered.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub first_enabled: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
}

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        let at_start = current_page == 1;
        let at_end = current_page == total_pages;
        Self {
            current_page,
            total_pages,
            first_enabled: !at_start,
            prev_enabled: !at_start,
            next_enabled: !at_end,
            last_enabled: !at_end,
        }
    }

    pub fn label(&self) -> String {
        format!("Page {} / {}", self.current_page, self.total_pages)
    }
}

/// A category offered as a filter, with whether it is currently selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub name: String,
    pub image: String,
    pub selected: bool,
}

/// A catalog together with the interactive state of one view over it.
#[derive(Clone, Debug)]
pub struct CatalogView {
    catalog: Catalog,
    state: ViewState,
}

impl CatalogView {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_state(catalog, ViewState::default())
    }

    pub fn with_state(catalog: Catalog, state: ViewState) -> Self {
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Leaves the current page alone, so a narrower filter can leave it past
    /// the last page until the next navigation.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        tracing::debug!(search = %self.state.search_text, "search text changed");
    }

    pub fn toggle_category(&mut self, name: &str) {
        if !self.state.selected_categories.remove(name) {
            self.state.selected_categories.insert(name.to_string());
        }
        tracing::debug!(category = name, selected = ?self.state.selected_categories, "category toggled");
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.state.current_page = page.clamp(1, self.total_pages());
        tracing::debug!(page = self.state.current_page, "page changed");
    }

    pub fn go_to_first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn go_to_last_page(&mut self) {
        self.go_to_page(self.total_pages());
    }

    pub fn go_to_next_page(&mut self) {
        self.go_to_page(self.state.current_page.saturating_add(1));
    }

    pub fn go_to_prev_page(&mut self) {
        self.go_to_page(self.state.current_page.saturating_sub(1));
    }

    pub fn available_categories(&self) -> Vec<CategoryOption> {
        self.catalog
            .available_categories()
            .into_iter()
            .map(|Category { name, image }| CategoryOption {
                name: name.clone(),
                image: image.clone(),
                selected: self.state.selected_categories.contains(name),
            })
            .collect()
    }

    pub fn filtered_entities(&self) -> Vec<&Entity> {
        filter_entities(&self.catalog, &self.state)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_entities().len())
    }

    pub fn visible_entities(&self) -> Vec<&Entity> {
        let filtered = self.filtered_entities();
        page_slice(&filtered, self.state.current_page).to_vec()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.state.current_page, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entity_for_tests;

    fn numbered(n: u32) -> Catalog {
        (1..=n)
            .map(|i| entity_for_tests(i, &format!("Pokemon{i}"), &["Normal"]))
            .collect()
    }

    fn names(entities: &[&Entity]) -> Vec<String> {
        entities.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let e = entity_for_tests(4, "Charmander", &["Feu"]);
        assert!(matches_search(&e, "char"));
        assert!(matches_search(&e, "MANDER"));
        assert!(matches_search(&e, ""));
        assert!(!matches_search(&entity_for_tests(7, "Squirtle", &["Eau"]), "char"));
    }

    #[test]
    fn search_lowercases_non_ascii() {
        let e = entity_for_tests(4, "Salamèche", &["Feu"]);
        assert!(matches_search(&e, "SALAMÈ"));
    }

    #[test]
    fn category_selection_is_or() {
        let catalog: Catalog = vec![
            entity_for_tests(7, "Carapuce", &["Eau"]),
            entity_for_tests(23, "Abo", &["Poison"]),
            entity_for_tests(4, "Salamèche", &["Feu"]),
            entity_for_tests(72, "Tentacool", &["Eau", "Poison"]),
        ]
        .into_iter()
        .collect();
        let mut view = CatalogView::new(catalog);
        view.toggle_category("Eau");
        view.toggle_category("Poison");
        assert_eq!(
            names(&view.filtered_entities()),
            vec!["Carapuce", "Abo", "Tentacool"]
        );
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut view = CatalogView::new(numbered(3));
        view.toggle_category("Feu");
        assert!(view.state().selected_categories.contains("Feu"));
        assert!(view.filtered_entities().is_empty());
        view.toggle_category("Feu");
        assert!(view.state().selected_categories.is_empty());
        assert_eq!(view.filtered_entities().len(), 3);
    }

    #[test]
    fn twenty_five_entities_make_three_pages() {
        let catalog = numbered(25);
        let mut view = CatalogView::new(catalog.clone());
        assert_eq!(view.total_pages(), 3);
        let first: Vec<u32> = view.visible_entities().iter().map(|e| e.id).collect();
        assert_eq!(first, (1..=10).collect::<Vec<_>>());

        view.go_to_page(3);
        let last: Vec<u32> = view.visible_entities().iter().map(|e| e.id).collect();
        assert_eq!(last, (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn navigation_is_clamped() {
        let mut view = CatalogView::new(numbered(25));
        view.go_to_prev_page();
        assert_eq!(view.state().current_page, 1);
        view.go_to_last_page();
        assert_eq!(view.state().current_page, 3);
        view.go_to_next_page();
        assert_eq!(view.state().current_page, 3);
        view.go_to_page(99);
        assert_eq!(view.state().current_page, 3);
        view.go_to_page(0);
        assert_eq!(view.state().current_page, 1);
        view.go_to_next_page();
        view.go_to_first_page();
        assert_eq!(view.state().current_page, 1);
    }

    #[test]
    fn filtering_does_not_reset_page() {
        let mut view = CatalogView::new(numbered(25));
        view.go_to_page(3);
        view.set_search_text("Pokemon1");
        // Pokemon1, Pokemon10..19 -> 11 results, 2 pages, page 3 is past the end.
        assert_eq!(view.state().current_page, 3);
        assert_eq!(view.total_pages(), 2);
        assert!(view.visible_entities().is_empty());
        view.go_to_next_page();
        assert_eq!(view.state().current_page, 2);
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let mut view = CatalogView::new(numbered(5));
        view.set_search_text("missingno");
        assert_eq!(view.total_pages(), 1);
        let p = view.pagination();
        assert_eq!(p.label(), "Page 1 / 1");
        assert!(!p.first_enabled && !p.next_enabled);
    }

    #[test]
    fn pagination_controls_follow_position() {
        let mut view = CatalogView::new(numbered(25));
        let p = view.pagination();
        assert!(!p.first_enabled && !p.prev_enabled);
        assert!(p.next_enabled && p.last_enabled);

        view.go_to_next_page();
        let p = view.pagination();
        assert!(p.first_enabled && p.prev_enabled && p.next_enabled && p.last_enabled);

        view.go_to_last_page();
        let p = view.pagination();
        assert!(p.prev_enabled && !p.next_enabled && !p.last_enabled);
        assert_eq!(p.label(), "Page 3 / 3");
    }

    #[test]
    fn page_slice_bounds() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(page_slice(&items, 1).len(), 10);
        assert_eq!(page_slice(&items, 3), &[20, 21, 22, 23, 24]);
        assert!(page_slice(&items, 4).is_empty());
        assert_eq!(page_slice(&items, 0), page_slice(&items, 1));
    }

    #[test]
    fn available_categories_report_selection() {
        let catalog: Catalog = vec![
            entity_for_tests(6, "Dracaufeu", &["Feu", "Vol"]),
            entity_for_tests(7, "Carapuce", &["Eau"]),
        ]
        .into_iter()
        .collect();
        let mut view = CatalogView::new(catalog);
        view.toggle_category("Vol");
        let options = view.available_categories();
        let flags: Vec<(&str, bool)> = options
            .iter()
            .map(|o| (o.name.as_str(), o.selected))
            .collect();
        assert_eq!(flags, vec![("Feu", false), ("Vol", true), ("Eau", false)]);
    }
}
