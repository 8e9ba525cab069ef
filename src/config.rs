//! User configuration — keybindings, scroll feel, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/parallax-folio/config.toml`
//! (default `~/.config/parallax-folio/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::dot_grid::DotPreset;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    GoHome,
    GoAbout,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::GoHome,
        Action::GoAbout,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::GoHome => "go_home",
            Action::GoAbout => "go_about",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Modifiers that take part in matching, with their config-file prefix.
static MODIFIERS: [(KeyModifiers, &str); 3] = [
    (KeyModifiers::CONTROL, "Ctrl"),
    (KeyModifiers::ALT, "Alt"),
    (KeyModifiers::SHIFT, "Shift"),
];

/// Named keys: config-file name, status-bar glyph, key code.
static NAMED_KEYS: [(&str, &str, KeyCode); 14] = [
    ("Up", "↑", KeyCode::Up),
    ("Down", "↓", KeyCode::Down),
    ("Left", "←", KeyCode::Left),
    ("Right", "→", KeyCode::Right),
    ("PageUp", "PgUp", KeyCode::PageUp),
    ("PageDown", "PgDn", KeyCode::PageDown),
    ("Home", "Home", KeyCode::Home),
    ("End", "End", KeyCode::End),
    ("Space", "Space", KeyCode::Char(' ')),
    ("Enter", "Enter", KeyCode::Enter),
    ("Esc", "Esc", KeyCode::Esc),
    ("Tab", "Tab", KeyCode::Tab),
    ("Backspace", "Bksp", KeyCode::Backspace),
    ("Delete", "Del", KeyCode::Delete),
];

/// Extra spellings accepted when reading the config file.
static KEY_ALIASES: [(&str, &str); 5] = [
    ("pgup", "pageup"),
    ("pgdn", "pagedown"),
    ("return", "enter"),
    ("escape", "esc"),
    ("del", "delete"),
];

/// One key plus the modifiers that must be held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Same key with the same Ctrl/Alt/Shift state.  Other modifiers (Super,
    /// Hyper, Meta) never affect a match.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let held = |m: KeyModifiers| MODIFIERS.iter().filter(move |(bit, _)| m.contains(*bit));
        self.code == event.code && held(self.modifiers).eq(held(event.modifiers))
    }

    fn with_prefix(&self, key: &str) -> String {
        let mut out: String = MODIFIERS
            .iter()
            .filter(|(bit, _)| self.modifiers.contains(*bit))
            .map(|(_, name)| format!("{name}+"))
            .collect();
        out.push_str(key);
        out
    }

    /// Compact form for the status bar, e.g. `Ctrl+c` or `PgDn`.
    pub fn display(&self) -> String {
        let glyph = NAMED_KEYS
            .iter()
            .find(|(_, _, code)| *code == self.code)
            .map(|(_, glyph, _)| (*glyph).to_string());
        self.with_prefix(&glyph.unwrap_or_else(|| key_name(self.code)))
    }

    fn to_config_string(&self) -> String {
        self.with_prefix(&key_name(self.code))
    }

    /// Read one entry such as `Ctrl+c`, `Shift+G`, `PageDown` or `F5`.
    /// Modifier and named-key spellings are case-insensitive; single
    /// characters keep their case.
    fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key = parts.pop().filter(|k| !k.is_empty())?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            let (bit, _) = MODIFIERS
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(part))?;
            modifiers |= *bit;
        }

        let lower = key.to_ascii_lowercase();
        let lower = KEY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == lower)
            .map_or(lower.as_str(), |(_, canonical)| *canonical);

        let mut chars = key.chars();
        let code = if let Some((_, _, code)) = NAMED_KEYS
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(lower))
        {
            *code
        } else if let (Some(c), None) = (chars.next(), chars.next()) {
            KeyCode::Char(c)
        } else {
            let n = lower.strip_prefix('f')?.parse::<u8>().ok()?;
            KeyCode::F(n)
        };

        Some(Self { code, modifiers })
    }
}

/// Config-file spelling of a key code.
fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => NAMED_KEYS
            .iter()
            .find(|(_, _, named)| *named == other)
            .map_or_else(|| format!("{other:?}"), |(name, _, _)| (*name).to_string()),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and scroll settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Rows moved per key press or wheel notch.
    pub scroll_step: u16,
    /// Smooth-scroll damping per frame (0.05–0.95).
    pub smooth_scroll_speed: f64,
    /// Virtual pixels per terminal row.
    pub row_px: f64,
    /// Virtual pixels per terminal column.
    pub col_px: f64,
    /// `None` disables the dot grid.
    pub dot_preset: Option<DotPreset>,
    pub name_interval_ms: u64,
    /// Re-measure block geometry when the terminal is resized.
    pub remeasure_on_resize: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            scroll_step: 3,
            smooth_scroll_speed: 0.35,
            row_px: 16.0,
            col_px: 8.0,
            dot_preset: Some(DotPreset::Medium),
            name_interval_ms: 2000,
            remeasure_on_resize: false,
        }
    }
}

impl AppConfig {
    /// Hard-coded default keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(
            Action::Bottom,
            vec![KeyBind::new(End, n), KeyBind::new(Char('G'), KeyModifiers::SHIFT)],
        );
        m.insert(Action::GoHome, vec![KeyBind::new(Char('h'), n)]);
        m.insert(Action::GoAbout, vec![KeyBind::new(Char('a'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: home | {}: about | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::GoHome),
            self.short_binding(Action::GoAbout),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(err) => {
                if path.exists() {
                    tracing::warn!("cannot read {}: {err}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Persist current config to disk, returning the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!("config line {}: expected `key = value`", lineno + 1);
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Scroll settings.
            let applied = match key {
                "scroll_step" => value
                    .parse::<u16>()
                    .map(|v| config.scroll_step = v.clamp(1, 50))
                    .is_ok(),
                "smooth_scroll_speed" => parse_finite(value)
                    .map(|v| config.smooth_scroll_speed = v.clamp(0.05, 0.95))
                    .is_ok(),
                "row_px" => parse_finite(value)
                    .map(|v| config.row_px = v.clamp(4.0, 64.0))
                    .is_ok(),
                "col_px" => parse_finite(value)
                    .map(|v| config.col_px = v.clamp(2.0, 32.0))
                    .is_ok(),
                "dot_preset" => match parse_dot_preset(value) {
                    Ok(preset) => {
                        config.dot_preset = preset;
                        true
                    }
                    Err(_) => false,
                },
                "name_interval_ms" => value
                    .parse::<u64>()
                    // Keep this bounded so the label stays readable.
                    .map(|v| config.name_interval_ms = v.clamp(500, 10_000))
                    .is_ok(),
                "remeasure_on_resize" => value
                    .parse::<bool>()
                    .map(|v| config.remeasure_on_resize = v)
                    .is_ok(),
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        tracing::warn!("config line {}: unknown key `{key}`", lineno + 1);
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(',')
                        .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                        .collect();
                    if !parsed.is_empty() {
                        config.bindings.insert(action, parsed);
                    }
                    true
                }
            };
            if !applied {
                tracing::warn!("config line {}: bad value `{value}` for `{key}`", lineno + 1);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let dots = self
            .dot_preset
            .map_or_else(|| "none".to_string(), |p| p.to_string());
        let mut lines = vec![
            "# parallax-folio configuration".to_string(),
            String::new(),
            "# Scroll settings".to_string(),
            format!("scroll_step = {}", self.scroll_step),
            format!("smooth_scroll_speed = {}", self.smooth_scroll_speed),
            format!("row_px = {}", self.row_px),
            format!("col_px = {}", self.col_px),
            format!("remeasure_on_resize = {}", self.remeasure_on_resize),
            String::new(),
            "# Decoration".to_string(),
            format!("dot_preset = {dots}"),
            format!("name_interval_ms = {}", self.name_interval_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// A finite number; `nan` and `inf` are refused before any clamping.
pub fn parse_finite(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("`{s}` is not a finite number")),
    }
}

/// `"none"` disables the grid; anything else must name a preset.
pub fn parse_dot_preset(
    s: &str,
) -> Result<Option<DotPreset>, crate::core::dot_grid::UnknownPreset> {
    if s.trim().eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/parallax-folio/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("parallax-folio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_bindings_resolve() {
        let c = AppConfig::default();
        assert_eq!(c.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::ScrollDown));
        assert_eq!(c.match_key(key(KeyCode::PageDown, KeyModifiers::NONE)), Some(Action::PageDown));
        assert_eq!(c.match_key(key(KeyCode::Char('a'), KeyModifiers::NONE)), Some(Action::GoAbout));
        assert_eq!(c.match_key(key(KeyCode::Char('G'), KeyModifiers::SHIFT)), Some(Action::Bottom));
        assert_eq!(c.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_settings_and_bindings() {
        let c = AppConfig::parse_config(
            "# comment\n\
             scroll_step = 5\n\
             row_px = 200\n\
             dot_preset = none\n\
             remeasure_on_resize = true\n\
             quit = Ctrl+x, F10\n",
        );
        assert_eq!(c.scroll_step, 5);
        assert_eq!(c.row_px, 64.0);
        assert_eq!(c.dot_preset, None);
        assert!(c.remeasure_on_resize);
        assert_eq!(
            c.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(10), KeyModifiers::NONE),
            ]
        );
        // Untouched entries keep their defaults.
        assert_eq!(c.bindings[&Action::ScrollUp], AppConfig::default_bindings()[&Action::ScrollUp]);
    }

    #[test]
    fn key_entries_parse_and_print() {
        let bind = KeyBind::parse("ctrl+PGDN").unwrap();
        assert_eq!(bind, KeyBind::new(KeyCode::PageDown, KeyModifiers::CONTROL));
        assert_eq!(bind.display(), "Ctrl+PgDn");
        assert_eq!(bind.to_config_string(), "Ctrl+PageDown");

        assert_eq!(KeyBind::parse("Shift+G"), Some(KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert_eq!(KeyBind::parse("f12"), Some(KeyBind::new(KeyCode::F(12), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("space").map(|b| b.code), Some(KeyCode::Char(' ')));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("Ctrl+"), None);
        assert_eq!(KeyBind::parse("banana"), None);
    }

    #[test]
    fn matching_ignores_super() {
        let bind = KeyBind::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(bind.matches(key(KeyCode::Char('q'), KeyModifiers::SUPER)));
        assert!(!bind.matches(key(KeyCode::Char('q'), KeyModifiers::ALT)));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let c = AppConfig::parse_config("row_px = nan\ncol_px = inf\nsmooth_scroll_speed = -inf\n");
        assert_eq!(c, AppConfig::default());
        assert!(parse_finite("NaN").is_err());
        assert_eq!(parse_finite(" 12.5 "), Ok(12.5));
    }

    #[test]
    fn bad_lines_keep_defaults() {
        let c = AppConfig::parse_config("scroll_step = lots\nmystery = 1\nno equals here\ndot_preset = loud\n");
        assert_eq!(c, AppConfig::default());
    }

    #[test]
    fn saved_file_loads_back_identically() {
        let mut c = AppConfig::default();
        c.scroll_step = 7;
        c.dot_preset = Some(DotPreset::Animated);
        c.bindings.insert(Action::GoAbout, vec![KeyBind::new(KeyCode::Char('A'), KeyModifiers::SHIFT)]);

        let dir = std::env::temp_dir().join(format!("parallax-folio-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        c.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path);
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded, c);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let loaded = AppConfig::load_from(Path::new("/nonexistent/parallax-folio/config.toml"));
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn dot_preset_values() {
        assert_eq!(parse_dot_preset("NONE"), Ok(None));
        assert_eq!(parse_dot_preset("bold"), Ok(Some(DotPreset::Bold)));
        assert!(parse_dot_preset("sparkly").is_err());
    }
}
