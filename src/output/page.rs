use serde::Serialize;

use super::PageSnapshot;
use crate::render::EntityCard;
use crate::view::{CategoryOption, Pagination, PAGE_SIZE};

pub const TITLE: &str = "Pokedex";
pub const DESCRIPTION: &str = "Liste des Pokémon : recherche, filtres par type et pagination";
pub const HEADING: &str = "Liste des Pokémon";
pub const FAVICON: &str = "svg/pokeball.svg";

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn category_filter(option: &CategoryOption) -> String {
    let name = escape_html(&option.name);
    format!(
        r#"        <label class="flex items-center gap-2 border p-2 rounded cursor-pointer">
          <input type="checkbox" name="type" value="{name}"{checked}/>
          <img src="{image}" alt="{name}" width="20" height="20" class="rounded-full"/>
          {name}
        </label>
"#,
        checked = if option.selected { " checked" } else { "" },
        image = escape_html(&option.image),
    )
}

fn card(card: &EntityCard) -> String {
    let name = escape_html(&card.name);
    let types: String = card
        .categories
        .iter()
        .map(|c| {
            format!(
                r#"            <div class="flex items-center gap-1 bg-gray-100 p-1 rounded">
              <img src="{image}" alt="{label}" width="20" height="20"/>
              <span class="text-sm text-black">{label}</span>
            </div>
"#,
                image = escape_html(&c.image),
                label = escape_html(&c.name),
            )
        })
        .collect();
    let stats: String = card
        .stats
        .iter()
        .map(|s| {
            format!(
                r#"            <p class="flex items-center gap-1"><img src="{icon}" alt="{label}" width="20" height="20"/>{label} {value}</p>
"#,
                icon = s.icon.asset_path(),
                label = s.label,
                value = s.value,
            )
        })
        .collect();
    format!(
        r#"      <li class="border p-4 flex flex-col items-center text-white rounded" style="background: {background}">
        <div class="flex flex-col items-center">
          <span class="text-gray-100">{ordinal}</span>
          <h2 class="font-bold">{name}</h2>
        </div>
        <div class="flex flex-col items-center">
          <img src="{image}" alt="{name}" width="100" height="100" class="mb-2"/>
          <div class="flex gap-2 mb-2">
{types}          </div>
          <div class="flex items-center gap-2 bg-neutral-100 p-4 rounded text-black">
{stats}          </div>
        </div>
      </li>
"#,
        background = escape_html(&card.background_css),
        ordinal = escape_html(&card.ordinal),
        image = escape_html(&card.image),
    )
}

fn nav_button(rel: &str, glyph: &str, enabled: bool) -> String {
    let class = if enabled {
        "px-3 py-2 rounded border hover:bg-gray-200"
    } else {
        "px-3 py-2 rounded border opacity-50 cursor-not-allowed"
    };
    format!(
        r#"      <button type="button" data-page="{rel}" class="{class}"{disabled}>{glyph}</button>
"#,
        disabled = if enabled { "" } else { " disabled" },
    )
}

fn pagination(p: &Pagination) -> String {
    let mut out = String::new();
    out.push_str(&nav_button("first", "&laquo;", p.first_enabled));
    out.push_str(&nav_button("prev", "&lsaquo;", p.prev_enabled));
    out.push_str(&format!(
        "      <span id=\"page-label\" class=\"font-bold text-lg\">{}</span>\n",
        escape_html(&p.label())
    ));
    out.push_str(&nav_button("next", "&rsaquo;", p.next_enabled));
    out.push_str(&nav_button("last", "&raquo;", p.last_enabled));
    out
}

/// State the page script starts from, followed by every card of the catalog.
#[derive(Serialize)]
struct PageData<'a> {
    page_size: usize,
    search_text: &'a str,
    selected: Vec<&'a str>,
    page: usize,
    cards: &'a [EntityCard],
}

/// Re-renders the list, count and pagination in the browser. Filtering
/// keeps the current page; only the navigation buttons clamp it.
const SCRIPT: &str = r##"(function() {
      const data = JSON.parse(document.getElementById('catalog-data').textContent);
      const cards = data.cards;
      const pageSize = data.page_size;
      const state = {
        query: data.search_text,
        selected: new Set(data.selected),
        page: data.page
      };

      const countEl = document.getElementById('total-count');
      const searchEl = document.getElementById('search');
      const listEl = document.getElementById('cards');
      const labelEl = document.getElementById('page-label');
      const navButtons = document.querySelectorAll('button[data-page]');
      const typeBoxes = document.querySelectorAll('input[name="type"]');

      function escapeHtml(value) {
        return String(value)
          .replaceAll('&', '&amp;')
          .replaceAll('<', '&lt;')
          .replaceAll('>', '&gt;')
          .replaceAll('"', '&quot;')
          .replaceAll("'", '&#39;');
      }

      function matchesSearch(c) {
        return c.name.toLowerCase().includes(state.query.toLowerCase());
      }

      function matchesCategories(c) {
        if (state.selected.size === 0) return true;
        return c.categories.some(t => state.selected.has(t.name));
      }

      function filtered() {
        return cards.filter(c => matchesSearch(c) && matchesCategories(c));
      }

      function pageCount(total) {
        return Math.max(1, Math.ceil(total / pageSize));
      }

      function renderCard(c) {
        const types = c.categories.map(t =>
          `<div class="flex items-center gap-1 bg-gray-100 p-1 rounded"><img src="${escapeHtml(t.image)}" alt="${escapeHtml(t.name)}" width="20" height="20"/><span class="text-sm text-black">${escapeHtml(t.name)}</span></div>`
        ).join('');
        const stats = c.stats.map(s =>
          `<p class="flex items-center gap-1"><img src="svg/${s.icon}.svg" alt="${s.label}" width="20" height="20"/>${s.label} ${s.value}</p>`
        ).join('');
        return `<li class="border p-4 flex flex-col items-center text-white rounded" style="background: ${escapeHtml(c.background_css)}">`
          + `<div class="flex flex-col items-center"><span class="text-gray-100">${escapeHtml(c.ordinal)}</span><h2 class="font-bold">${escapeHtml(c.name)}</h2></div>`
          + `<div class="flex flex-col items-center"><img src="${escapeHtml(c.image)}" alt="${escapeHtml(c.name)}" width="100" height="100" class="mb-2"/>`
          + `<div class="flex gap-2 mb-2">${types}</div>`
          + `<div class="flex items-center gap-2 bg-neutral-100 p-4 rounded text-black">${stats}</div></div></li>`;
      }

      function render() {
        const items = filtered();
        const total = items.length;
        const pages = pageCount(total);
        const start = (state.page - 1) * pageSize;
        listEl.innerHTML = items.slice(start, start + pageSize).map(renderCard).join('');
        countEl.textContent = String(total);
        labelEl.textContent = `Page ${state.page} / ${pages}`;

        const atStart = state.page === 1;
        const atEnd = state.page === pages;
        for (const btn of navButtons) {
          const rel = btn.getAttribute('data-page');
          btn.disabled = (rel === 'first' || rel === 'prev') ? atStart : atEnd;
          btn.classList.toggle('opacity-50', btn.disabled);
          btn.classList.toggle('cursor-not-allowed', btn.disabled);
          btn.classList.toggle('hover:bg-gray-200', !btn.disabled);
        }
      }

      function goTo(page) {
        state.page = Math.min(Math.max(1, page), pageCount(filtered().length));
        render();
      }

      for (const btn of navButtons) {
        btn.addEventListener('click', function() {
          switch (btn.getAttribute('data-page')) {
            case 'first': goTo(1); break;
            case 'prev': goTo(state.page - 1); break;
            case 'next': goTo(state.page + 1); break;
            case 'last': goTo(pageCount(filtered().length)); break;
          }
        });
      }

      searchEl.addEventListener('input', function() {
        state.query = searchEl.value || '';
        render();
      });

      for (const box of typeBoxes) {
        box.addEventListener('change', function() {
          if (box.checked) {
            state.selected.add(box.value);
          } else {
            state.selected.delete(box.value);
          }
          render();
        });
      }

      render();
    })();"##;

/// HTML document for the catalog view. The first page is rendered in place
/// and the embedded script takes over search, type filters and paging.
pub fn render_html(snapshot: &PageSnapshot) -> Result<Vec<u8>, serde_json::Error> {
    let data = PageData {
        page_size: PAGE_SIZE,
        search_text: &snapshot.search_text,
        selected: snapshot.selected_categories(),
        page: snapshot.pagination.current_page,
        cards: &snapshot.catalog,
    };
    let json = json_for_script_tag(&serde_json::to_string(&data)?);

    let filters: String = snapshot.categories.iter().map(category_filter).collect();
    let cards: String = snapshot.cards.iter().map(card).collect();
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{TITLE}</title>
  <meta name="description" content="{description}"/>
  <link rel="shortcut icon" href="{FAVICON}" type="image/svg+xml"/>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body>
  <script type="application/json" id="catalog-data">{json}</script>
  <main class="p-4">
    <h1 class="text-2xl font-bold mb-4">{heading}</h1>
    <p class="mb-4 text-lg font-medium">Nombre total de Pokémon : <span id="total-count">{total}</span></p>
    <input type="text" id="search" name="search" placeholder="Rechercher un Pokémon..." value="{search}" class="border p-2 mb-4 w-full rounded"/>
    <div class="mb-4 flex flex-wrap gap-2">
{filters}    </div>
    <ul id="cards" class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-4">
{cards}    </ul>
    <div class="flex justify-center items-center gap-2 mt-6">
{pagination}    </div>
  </main>
  <script>
    {SCRIPT}
  </script>
</body>
</html>
"#,
        description = escape_html(DESCRIPTION),
        heading = escape_html(HEADING),
        total = snapshot.total_count,
        search = escape_html(&snapshot.search_text),
        pagination = pagination(&snapshot.pagination),
    );
    Ok(html.into_bytes())
}
