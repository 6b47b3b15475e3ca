use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pokedex",
    version,
    about = "browse the Pokémon catalog from the terminal",
    long_about = "Pokedex fetches the Pokémon catalog, then lets you search by name, filter by type and page through the results.\n\nExamples:\n  pokedex\n  pokedex -s sala -t Feu -t Vol\n  pokedex -i\n  pokedex -t Eau -o ./pokedex.html\n\nTip: Use --config to persist a default view and output settings."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "no-banner",
        help_heading = "Output",
        help = "Do not print the banner."
    )]
    pub no_banner: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the page to a file instead of the terminal."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html). Inferred from --output when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "View",
        help = "Only show Pokémon whose name contains TEXT (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 't',
        long = "type",
        value_name = "NAME",
        action = ArgAction::Append,
        help_heading = "View",
        help = "Only show Pokémon having any of these types (repeatable)."
    )]
    pub types: Vec<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        help_heading = "View",
        help = "Page to show (1-based, clamped to the last page)."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "View",
        help = "Start an interactive session (type 'help' for commands)."
    )]
    pub interactive: bool,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.pokedex/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'e',
        long = "endpoint",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Catalog endpoint (defaults to https://pokebuildapi.fr/api/v1/pokemon)."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds (no timeout by default)."
    )]
    pub timeout: Option<u64>,
}
