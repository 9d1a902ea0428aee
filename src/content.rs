use std::{collections::HashSet, sync::LazyLock};

use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

pub const PORTFOLIO_FILE: &str = "portfolio.json";

pub static GLOBAL_PORTFOLIO: LazyLock<Result<Portfolio, ContentError>> =
    LazyLock::new(load_portfolio);

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Portfolio {
    pub owner: Owner,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub education: Vec<TimelineEntry>,
    pub experience: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Owner {
    pub name: String,
    /// Hero title, one entry per line; the first is highlighted.
    pub headline: Vec<String>,
    pub tagline: String,
    pub about: String,
    pub email: String,
    /// Link that opens a pre-addressed mail composer.
    pub compose_url: String,
    pub socials: Vec<SocialLink>,
    /// Scene file rendered by the decorative 3D embed.
    pub scene_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    LinkedIn,
    GitHub,
    LeetCode,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
    /// Proficiency in percent.
    pub level: u8,
}

impl Skill {
    pub fn bar_style(&self) -> String {
        format!("width: {}%", self.level.min(100))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub image: String,
}

impl Project {
    pub fn image_style(&self) -> String {
        format!("background-image: url({})", self.image)
    }
}

/// An education or experience entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineEntry {
    pub title: String,
    pub organization: String,
    pub period: String,
    #[serde(default)]
    pub location: Option<String>,
    pub description: String,
}

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content file `{0}` not found")]
    Missing(String),
    #[error("content file `{0}` is not valid UTF-8")]
    Encoding(String),
    #[error("couldn't parse `{name}`: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid portfolio content: {0}")]
    Invalid(String),
}

impl Portfolio {
    pub fn from_json(name: &str, raw: &str) -> Result<Self, ContentError> {
        let portfolio: Self = serde_json::from_str(raw).map_err(|source| ContentError::Parse {
            name: name.to_string(),
            source,
        })?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.owner.name.trim().is_empty() {
            return Err(ContentError::Invalid("owner name is empty".to_string()));
        }
        let mut seen = HashSet::new();
        for skill in &self.skills {
            if skill.level > 100 {
                return Err(ContentError::Invalid(format!(
                    "skill `{}` has level {} above 100",
                    skill.name, skill.level
                )));
            }
            if !seen.insert(skill.name.as_str()) {
                return Err(ContentError::Invalid(format!(
                    "skill `{}` is listed twice",
                    skill.name
                )));
            }
        }
        Ok(())
    }
}

pub fn load_portfolio() -> Result<Portfolio, ContentError> {
    let file = ContentAssets::get(PORTFOLIO_FILE)
        .ok_or_else(|| ContentError::Missing(PORTFOLIO_FILE.to_string()))?;
    let raw = std::str::from_utf8(&file.data)
        .map_err(|_| ContentError::Encoding(PORTFOLIO_FILE.to_string()))?;
    Portfolio::from_json(PORTFOLIO_FILE, raw)
}

/// The embedded portfolio, parsed once per process.
pub fn portfolio() -> Result<&'static Portfolio, &'static ContentError> {
    GLOBAL_PORTFOLIO.as_ref()
}
