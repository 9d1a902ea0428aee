use std::{fmt, str::FromStr};

use thiserror::Error;

/// Storage key holding the theme name.
pub const THEME_STORAGE_KEY: &str = "theme";
/// Attribute on the document root that stylesheets select on.
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThemeError {
    #[error("unrecognized theme name `{0}`")]
    Unrecognized(String),
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }

    /// Top and bottom color stops of the page background gradient.
    pub fn backdrop_gradient(self) -> [(f64, &'static str); 2] {
        match self {
            Self::Dark => [(0.0, "rgba(255,255,255,0.02)"), (1.0, "rgba(0,0,0,0.18)")],
            Self::Light => [(0.0, "rgba(0,0,0,0.03)"), (1.0, "rgba(255,255,255,0.04)")],
        }
    }

    /// Profile mask image that contrasts with this theme's background.
    pub fn profile_image(self) -> &'static str {
        match self {
            Self::Dark => "/mask-white.png",
            Self::Light => "/mask-black.png",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ThemeError::Unrecognized(other.to_string())),
        }
    }
}

/// Persisted key/value slot for the theme name.
pub trait ThemeStorage {
    fn load(&self) -> Option<String>;
    fn store(&mut self, name: &str);
}

/// Document-level attribute carrying the theme name.
pub trait ThemeAttribute {
    fn apply(&mut self, name: &str);
}

/// The page's light/dark preference.
///
/// Every change is committed to the attribute and to storage before the
/// mutating call returns, so readers never see them disagree.
pub struct ThemePreference<S, A> {
    theme: Theme,
    storage: S,
    attribute: A,
}

impl<S: ThemeStorage, A: ThemeAttribute> ThemePreference<S, A> {
    /// Restore the stored theme, or the default when nothing usable is stored,
    /// and commit it right away.
    pub fn initialize(storage: S, attribute: A) -> Self {
        let theme = match storage.load().filter(|raw| !raw.is_empty()) {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err: ThemeError| {
                log::warn!("{err}, falling back to {}", Theme::default());
                Theme::default()
            }),
        };
        let mut preference = Self {
            theme,
            storage,
            attribute,
        };
        preference.commit();
        preference
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.theme = theme;
        self.commit();
        log::debug!("theme set to {theme}");
        theme
    }

    fn commit(&mut self) {
        let name = self.theme.as_str();
        self.attribute.apply(name);
        self.storage.store(name);
    }
}
