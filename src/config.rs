use crate::store::DEFAULT_STORE_FILE;
use crate::theme::Theme;
use log::warn;
use std::env;
use std::path::PathBuf;

pub const STORE_FILE_VAR: &str = "CARD_NOTES_FILE";
pub const THEME_VAR: &str = "CARD_NOTES_THEME";

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub theme: Theme,
    pub use_color: bool,
    pub editor: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store_path = lookup(STORE_FILE_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));

        let theme = match lookup(THEME_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!("{err}; using light");
                Theme::Light
            }),
            None => Theme::default(),
        };

        Self {
            store_path,
            theme,
            use_color: lookup("NO_COLOR").is_none(),
            editor: lookup("EDITOR")
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "vi".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.store_path, PathBuf::from("notes_data.json"));
        assert_eq!(cfg.theme, Theme::Light);
        assert!(cfg.use_color);
        assert_eq!(cfg.editor, "vi");
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("CARD_NOTES_FILE", "/tmp/n.json"),
            ("CARD_NOTES_THEME", "dark"),
            ("NO_COLOR", "1"),
            ("EDITOR", "nano"),
        ]);
        assert_eq!(cfg.store_path, PathBuf::from("/tmp/n.json"));
        assert_eq!(cfg.theme, Theme::Dark);
        assert!(!cfg.use_color);
        assert_eq!(cfg.editor, "nano");
    }

    #[test]
    fn test_unknown_theme_and_blank_path_fall_back() {
        let cfg = config(&[("CARD_NOTES_THEME", "neon"), ("CARD_NOTES_FILE", " ")]);
        assert_eq!(cfg.theme, Theme::Light);
        assert_eq!(cfg.store_path, PathBuf::from(DEFAULT_STORE_FILE));
    }
}
