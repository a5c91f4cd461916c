use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Merged configuration ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub applications: ApplicationsConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_max_substitution_depth")]
    pub max_substitution_depth: usize,
    #[serde(default)]
    pub unsafe_applications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            max_substitution_depth: default_max_substitution_depth(),
            unsafe_applications: false,
        }
    }
}

fn default_prompt() -> String {
    "{cwd}> ".into()
}

fn default_max_substitution_depth() -> usize {
    32
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".into()
}

/// Which built-in applications can be invoked by name.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ApplicationsConfig {
    #[serde(default)]
    pub enabled: Vec<String>,
}

// ── User overlay: every field optional ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
    #[serde(default)]
    applications: ApplicationsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    prompt: Option<String>,
    max_substitution_depth: Option<usize>,
    unsafe_applications: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ApplicationsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    enabled: Vec<String>,
    #[serde(default)]
    remove_enabled: Vec<String>,
}

/// Combine an overlay list with the defaults: `replace` swaps the list
/// wholesale; otherwise `remove` entries go first and new names are appended
/// once each.
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// The configuration compiled into the binary.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Embedded defaults with the user's overlay (if any) merged on top.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Read ~/.config/minish/config.toml. A parse error is reported and ignored.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/minish/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("minish: config parse error: {e}");
                None
            }
        }
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        let s = overlay.settings;
        if let Some(v) = s.prompt {
            self.settings.prompt = v;
        }
        if let Some(v) = s.max_substitution_depth {
            self.settings.max_substitution_depth = v;
        }
        if let Some(v) = s.unsafe_applications {
            self.settings.unsafe_applications = v;
        }

        if let Some(v) = overlay.logging.level {
            self.logging.level = v;
        }

        let a = overlay.applications;
        merge_list(
            &mut self.applications.enabled,
            a.enabled,
            &a.remove_enabled,
            a.replace,
        );
    }

    /// Render the merged configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The prompt with `{cwd}` filled in.
    pub fn prompt_for(&self, cwd: &std::path::Path) -> String {
        self.settings
            .prompt
            .replace("{cwd}", &cwd.display().to_string())
    }

    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert!(!config.applications.enabled.is_empty());
        assert_eq!(config.settings.max_substitution_depth, 32);
        assert!(config.settings.unsafe_applications);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn default_config_enables_every_builtin() {
        let config = Config::default_config();
        for name in ["cat", "grep", "sort", "cut", "paste", "tee", "uniq", "wc", "ls", "mv", "rm", "mkdir", "cd", "exit"] {
            assert!(
                config.applications.enabled.contains(&name.to_string()),
                "{name} missing"
            );
        }
    }

    // ── Merge semantics ──

    #[test]
    fn overlay_removes_application() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [applications]
            remove_enabled = ["rm", "mv"]
        "#,
        );
        assert!(!config.applications.enabled.contains(&"rm".to_string()));
        assert!(!config.applications.enabled.contains(&"mv".to_string()));
        assert!(config.applications.enabled.contains(&"cat".to_string()));
    }

    #[test]
    fn overlay_replace_applications() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [applications]
            replace = true
            enabled = ["echo", "cat"]
        "#,
        );
        assert_eq!(config.applications.enabled, vec!["echo", "cat"]);
    }

    #[test]
    fn overlay_no_duplicates() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [applications]
            enabled = ["cat"]
        "#,
        );
        let count = config
            .applications
            .enabled
            .iter()
            .filter(|s| *s == "cat")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn overlay_scalars_override() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            prompt = "$ "
            max_substitution_depth = 4
            unsafe_applications = false

            [logging]
            level = "debug"
        "#,
        );
        assert_eq!(config.settings.prompt, "$ ");
        assert_eq!(config.settings.max_substitution_depth, 4);
        assert!(!config.settings.unsafe_applications);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let original = Config::default_config();
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config.applications.enabled, original.applications.enabled);
        assert_eq!(config.settings.prompt, original.settings.prompt);
    }

    #[test]
    fn prompt_substitutes_cwd() {
        let config = Config::default_config();
        assert_eq!(config.prompt_for(std::path::Path::new("/tmp")), "/tmp> ");
    }

    #[test]
    fn dumps_as_toml() {
        let toml = Config::default_config().to_toml().unwrap();
        assert!(toml.contains("max_substitution_depth = 32"));
    }
}
