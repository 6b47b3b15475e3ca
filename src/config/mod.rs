use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub timeout: Option<u64>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
    pub no_banner: Option<bool>,
    pub search: Option<String>,
    #[serde(alias = "categories")]
    pub types: Option<Vec<String>>,
    pub page: Option<usize>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".pokedex").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
    // An empty or comment-only file deserializes to unit, not a map.
    if contents
        .lines()
        .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'))
    {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents)
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

fn default_config_yaml() -> String {
    r#"# Pokedex config
#
# Location (default):
#   ~/.pokedex/config.yml

# Data source
# endpoint: https://pokebuildapi.fr/api/v1/pokemon
# timeout: 30

# Initial view
# search: sala
# types:
#   - Feu
#   - Vol
# page: 1

# Output (optional)
# output: ./pokedex.html
# output_format: html

# Output styling
no_color: false
no_banner: false
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_yaml_parses_to_defaults() {
        let cfg = parse_config(&default_config_yaml()).unwrap();
        assert_eq!(cfg.no_color, Some(false));
        assert_eq!(cfg.endpoint, None);
        assert_eq!(cfg.types, None);
    }

    #[test]
    fn comment_only_file_is_empty_config() {
        assert_eq!(parse_config("# nothing\n\n").unwrap(), ConfigFile::default());
    }

    #[test]
    fn categories_alias_and_page() {
        let cfg = parse_config("categories: [Eau, Poison]\npage: 2\nsearch: ca\n").unwrap();
        assert_eq!(cfg.types, Some(vec!["Eau".to_string(), "Poison".to_string()]));
        assert_eq!(cfg.page, Some(2));
        assert_eq!(cfg.search.as_deref(), Some("ca"));
    }

    #[test]
    fn unknown_file_fails_unless_missing_allowed() {
        let path = std::env::temp_dir().join(format!(
            "pokedex_missing_{}/config.yml",
            std::process::id()
        ));
        assert!(load_config(&path, false).is_err());
        assert_eq!(load_config(&path, true).unwrap(), ConfigFile::default());
    }

    #[test]
    fn ensure_default_writes_once() {
        let dir = std::env::temp_dir().join(format!("pokedex_cfg_{}", std::process::id()));
        let path = dir.join("config.yml");
        let _ = std::fs::remove_dir_all(&dir);
        ensure_default_config_file(&path).unwrap();
        std::fs::write(&path, "page: 3\n").unwrap();
        ensure_default_config_file(&path).unwrap();
        assert_eq!(load_config(&path, false).unwrap().page, Some(3));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
