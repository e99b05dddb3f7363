use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sweeper_core::{Difficulty, Preset};

/// Contents of the optional TOML settings file.
///
/// ```toml
/// [game]
/// preset = "intermediate"
/// seed = 1234
///
/// # takes precedence over `preset`
/// [game.custom]
/// rows = 20
/// cols = 24
/// mines = 80
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub game: GameSettings,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameSettings {
    pub preset: Option<Preset>,
    pub custom: Option<Difficulty>,
    pub seed: Option<u64>,
}

impl Settings {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Custom board first, then the preset.
    pub(crate) fn difficulty(&self) -> Option<Difficulty> {
        self.game
            .custom
            .or_else(|| self.game.preset.map(Difficulty::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
        assert_eq!(Settings::default().difficulty(), None);
    }

    #[test]
    fn custom_board_wins_over_preset() {
        let settings = Settings::parse(
            r#"
            [game]
            preset = "expert"
            seed = 7

            [game.custom]
            rows = 4
            cols = 5
            mines = 3
            "#,
        )
        .unwrap();

        assert_eq!(settings.game.seed, Some(7));
        assert_eq!(settings.difficulty(), Some(Difficulty::new(4, 5, 3).unwrap()));
    }

    #[test]
    fn preset_by_name() {
        let settings = Settings::parse("[game]\npreset = \"intermediate\"\n").unwrap();
        assert_eq!(settings.difficulty(), Some(Difficulty::INTERMEDIATE));
    }

    #[test]
    fn overfull_custom_board_is_rejected() {
        let result = Settings::parse("[game.custom]\nrows = 2\ncols = 2\nmines = 4\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("[game]\nlevel = 3\n").is_err());
    }
}
