/// Addressable views: the landing page, the full list, and one detail view
/// per tutorial.
use std::fmt;

use regex::Regex;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Learn,
    Watch(String),
}

impl Route {
    /// Parse a view address. Hash-router prefixes ("#/learn") and trailing
    /// slashes are tolerated.
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let watch_re = Regex::new(r"^/watch/([^/?#]+)$").expect("valid regex");

        let trimmed = path.trim();
        let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let normalized = trimmed.trim_end_matches('/');

        match normalized {
            "" => Ok(Self::Home),
            "/learn" => Ok(Self::Learn),
            other => watch_re
                .captures(other)
                .map(|caps| Self::Watch(caps[1].to_string()))
                .ok_or_else(|| AppError::UnknownRoute(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Learn => "/learn".to_string(),
            Self::Watch(id) => format!("/watch/{id}"),
        }
    }

    /// Short view name used in tool responses.
    pub fn view_name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Learn => "learn",
            Self::Watch(_) => "watch",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
