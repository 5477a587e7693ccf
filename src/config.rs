use crate::life::{LifeError, validate_tick_interval};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_HEIGHT: usize = 10;
pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_TICK_INTERVAL: f64 = 0.5;
pub const DEFAULT_FPS: u32 = 30;
pub const DEFAULT_MAX_HEIGHT: usize = 100;
pub const DEFAULT_MAX_WIDTH: usize = 200;

/// User configuration loaded from config file.
/// All fields are optional. CLI flags override config, config overrides defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid rows
    pub height: Option<usize>,
    /// Grid columns
    pub width: Option<usize>,
    /// Seconds between generations while running
    pub tick_interval: Option<f64>,
    /// Colour theme
    pub theme: Option<Theme>,
    /// Redraw rate for the title screen and the board (1-120)
    pub fps: Option<u32>,
    /// Animate the title on the menu screen
    pub title_animation: Option<bool>,
    /// Largest grid the options screen accepts
    pub max_height: Option<usize>,
    pub max_width: Option<usize>,
    /// Seed for random fill (omit for a different board every time)
    pub seed: Option<u64>,
}

/// Colour theme for the board and menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Values taken from the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub height: Option<usize>,
    pub width: Option<usize>,
    pub tick_interval: Option<f64>,
    pub theme: Option<Theme>,
    pub fps: Option<u32>,
    pub seed: Option<u64>,
    pub no_title: bool,
}

/// Resolved, validated settings handed to the shell at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub height: usize,
    pub width: usize,
    pub tick_interval: f64,
    pub theme: Theme,
    pub fps: u32,
    pub title_animation: bool,
    pub max_height: usize,
    pub max_width: usize,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            tick_interval: DEFAULT_TICK_INTERVAL,
            theme: Theme::Dark,
            fps: DEFAULT_FPS,
            title_animation: true,
            max_height: DEFAULT_MAX_HEIGHT,
            max_width: DEFAULT_MAX_WIDTH,
            seed: None,
        }
    }
}

impl Settings {
    /// Merge CLI overrides over the config file over defaults, then validate.
    pub fn resolve(config: &Config, cli: &Overrides) -> Result<Self, LifeError> {
        let d = Settings::default();
        let settings = Settings {
            height: cli.height.or(config.height).unwrap_or(d.height),
            width: cli.width.or(config.width).unwrap_or(d.width),
            tick_interval: validate_tick_interval(
                cli.tick_interval
                    .or(config.tick_interval)
                    .unwrap_or(d.tick_interval),
            )?,
            theme: cli.theme.or(config.theme).unwrap_or(d.theme),
            fps: cli.fps.or(config.fps).unwrap_or(d.fps).clamp(1, 120),
            title_animation: !cli.no_title && config.title_animation.unwrap_or(d.title_animation),
            max_height: config.max_height.unwrap_or(d.max_height).max(1),
            max_width: config.max_width.unwrap_or(d.max_width).max(1),
            seed: cli.seed.or(config.seed),
        };
        settings.check_size(settings.height, settings.width)?;
        Ok(settings)
    }

    /// Accept a grid size only within `1..=max` on both axes.
    pub fn check_size(&self, height: usize, width: usize) -> Result<(usize, usize), LifeError> {
        if height == 0 || width == 0 {
            return Err(LifeError::InvalidSize { height, width });
        }
        if height > self.max_height || width > self.max_width {
            return Err(LifeError::SizeTooLarge {
                height,
                width,
                max_height: self.max_height,
                max_width: self.max_width,
            });
        }
        Ok((height, width))
    }
}

/// Get the config file path: ~/.config/termlife/config.toml
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("termlife").join("config.toml"))
}

/// Load config from file. Returns default config if file doesn't exist.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let Ok(contents) = std::fs::read_to_string(&path) else {
        return Config::default();
    };
    match parse_config(&contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("failed to parse {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

/// Generate a default config file with all options commented out
pub fn default_config_string() -> String {
    r#"# termlife configuration
# Use --show-config to see the active config file path.
# CLI flags override these settings.

# Grid rows and columns
# height = 10
# width = 10

# Seconds between generations while running
# tick_interval = 0.5

# Colour theme: dark, light
# theme = "dark"

# Redraw rate for the title screen and the board (1-120)
# fps = 30

# Animate the title on the menu screen
# title_animation = true

# Largest grid the options screen accepts
# max_height = 100
# max_width = 200

# Fixed seed for random fill
# seed = 1234
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_given() {
        let s = Settings::resolve(&Config::default(), &Overrides::default()).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = parse_config("height = 20\nwidth = 30\ntheme = \"light\"\nfps = 500").unwrap();
        let cli = Overrides {
            width: Some(40),
            no_title: true,
            ..Overrides::default()
        };
        let s = Settings::resolve(&config, &cli).unwrap();
        assert_eq!((s.height, s.width), (20, 40));
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.fps, 120);
        assert!(!s.title_animation);
    }

    #[test]
    fn test_default_config_string_parses() {
        let config = parse_config(&default_config_string()).unwrap();
        assert!(config.height.is_none());
        assert!(config.theme.is_none());
    }

    #[test]
    fn test_bad_values_rejected() {
        let config = parse_config("tick_interval = 0.0").unwrap();
        assert!(matches!(
            Settings::resolve(&config, &Overrides::default()),
            Err(LifeError::InvalidTickInterval(_))
        ));
        let cli = Overrides {
            height: Some(0),
            ..Overrides::default()
        };
        assert!(Settings::resolve(&Config::default(), &cli).is_err());
    }

    #[test]
    fn test_size_bounds() {
        let s = Settings::default();
        assert_eq!(s.check_size(100, 200), Ok((100, 200)));
        assert!(matches!(
            s.check_size(101, 5),
            Err(LifeError::SizeTooLarge { .. })
        ));
        assert!(matches!(
            s.check_size(5, 0),
            Err(LifeError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_unknown_theme_is_a_parse_error() {
        assert!(parse_config("theme = \"sepia\"").is_err());
    }
}
