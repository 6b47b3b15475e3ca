use crate::view::CatalogView;

/// One line typed in an interactive session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    ToggleType(String),
    ListTypes,
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    Page(usize),
    Help,
    Quit,
}

pub const HELP: &str = "\
  /TEXT | search TEXT   filter by name (search alone clears)
  type NAME             select or deselect a type
  types                 list available types
  first | prev | next | last | page N
  help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(text) = line.strip_prefix('/') {
            return Ok(Command::Search(text.trim().to_string()));
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match (word.to_lowercase().as_str(), rest) {
            ("search" | "s", text) => Ok(Command::Search(text.to_string())),
            ("type" | "t", "") => Err("type needs a name, e.g. 'type Feu'".to_string()),
            ("type" | "t", name) => Ok(Command::ToggleType(name.to_string())),
            ("types", "") => Ok(Command::ListTypes),
            ("first", "") => Ok(Command::FirstPage),
            ("prev" | "p", "") => Ok(Command::PrevPage),
            ("next" | "n", "") => Ok(Command::NextPage),
            ("last", "") => Ok(Command::LastPage),
            ("page", n) => n
                .parse::<usize>()
                .map(Command::Page)
                .map_err(|_| format!("invalid page '{n}'")),
            ("help" | "?", "") => Ok(Command::Help),
            ("quit" | "exit" | "q", "") => Ok(Command::Quit),
            _ => Err(format!("unknown command '{line}', type 'help'")),
        }
    }

    /// Applies a state-changing command. Returns `false` when the view was
    /// left untouched.
    pub fn apply(&self, view: &mut CatalogView) -> bool {
        match self {
            Command::Search(text) => view.set_search_text(text.as_str()),
            Command::ToggleType(name) => view.toggle_category(name),
            Command::FirstPage => view.go_to_first_page(),
            Command::PrevPage => view.go_to_prev_page(),
            Command::NextPage => view.go_to_next_page(),
            Command::LastPage => view.go_to_last_page(),
            Command::Page(n) => view.go_to_page(*n),
            Command::ListTypes | Command::Help | Command::Quit => return false,
        }
        true
    }
}
