use std::cell::RefCell;

pub const THEME_KEY: &str = "portfolio-theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    /// Icon class for the toggle button. It shows the theme a click leads to.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "fa-solid fa-moon",
            Self::Dark => "fa-solid fa-sun",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Dark
    }
}

/// Durable storage for the theme flag. Writes are best-effort.
pub trait ThemeStore {
    fn read(&self) -> Option<String>;
    fn write(&self, value: &str);
}

#[derive(Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: RefCell::new(Some(value.to_string())),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl ThemeStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.value()
    }

    fn write(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }
}

pub fn load_theme(store: &impl ThemeStore) -> Theme {
    store
        .read()
        .and_then(|value| Theme::from_str(&value))
        .unwrap_or_default()
}

pub fn persist_theme(store: &impl ThemeStore, theme: Theme) {
    store.write(theme.as_str());
}

pub fn toggle_theme(current: Theme, store: &impl ThemeStore) -> Theme {
    let next = current.toggled();
    persist_theme(store, next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_the_theme() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn missing_value_loads_dark() {
        let store = MemoryStore::default();
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn unknown_value_loads_dark() {
        let store = MemoryStore::with_value("sepia");
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn stored_light_theme_is_restored() {
        let store = MemoryStore::with_value("light");
        assert_eq!(load_theme(&store), Theme::Light);
    }

    #[test]
    fn toggle_persists_the_next_theme() {
        let store = MemoryStore::default();

        let next = toggle_theme(Theme::Dark, &store);
        assert_eq!(next, Theme::Light);
        assert_eq!(store.value().as_deref(), Some("light"));

        let back = toggle_theme(next, &store);
        assert_eq!(back, Theme::Dark);
        assert_eq!(store.value().as_deref(), Some("dark"));
    }

    #[test]
    fn icon_points_at_the_other_theme() {
        assert_eq!(Theme::Dark.icon(), "fa-solid fa-sun");
        assert_eq!(Theme::Light.icon(), "fa-solid fa-moon");
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light theme");
    }
}
