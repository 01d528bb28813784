//! Drive host set used to build strategy URLs.

use serde::{Deserialize, Serialize};

/// Base URLs (no trailing slash needed) for every host the resolver talks to.
/// Overridable from `[endpoints]` in config.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveEndpoints {
    /// Unauthenticated thumbnail host (`/d/{id}`).
    pub thumbnail: String,
    /// Main Drive host (`/uc?export=download`).
    pub drive: String,
    /// Secondary download host.
    pub usercontent: String,
    /// Drive REST API v3 root.
    pub api: String,
}

impl Default for DriveEndpoints {
    fn default() -> Self {
        Self {
            thumbnail: "https://lh3.googleusercontent.com".to_string(),
            drive: "https://drive.google.com".to_string(),
            usercontent: "https://drive.usercontent.google.com".to_string(),
            api: "https://www.googleapis.com/drive/v3".to_string(),
        }
    }
}

fn base(url: &str) -> &str {
    url.trim_end_matches('/')
}

impl DriveEndpoints {
    /// All four hosts rooted at one base URL (test servers, mirrors).
    pub fn rooted_at(root: &str) -> Self {
        let root = base(root);
        Self {
            thumbnail: format!("{root}/thumb"),
            drive: format!("{root}/drive"),
            usercontent: format!("{root}/usercontent"),
            api: format!("{root}/api"),
        }
    }

    pub fn thumbnail_url(&self, id: &str) -> String {
        format!("{}/d/{}", base(&self.thumbnail), id)
    }

    pub fn export_url(&self, id: &str) -> String {
        format!("{}/uc?export=download&id={}", base(&self.drive), id)
    }

    pub fn export_confirm_url(&self, id: &str, token: &str) -> String {
        format!(
            "{}/uc?export=download&confirm={}&id={}",
            base(&self.drive),
            token,
            id
        )
    }

    pub fn usercontent_url(&self, id: &str) -> String {
        format!(
            "{}/download?id={}&export=download&confirm=t",
            base(&self.usercontent),
            id
        )
    }

    /// Last resort, sent without cookies.
    pub fn fallback_url(&self, id: &str) -> String {
        format!(
            "{}/download?id={}&export=download&authuser=0&confirm=t",
            base(&self.usercontent),
            id
        )
    }

    /// Absolute URL for a site-relative link scraped from a Drive page.
    pub fn drive_relative(&self, path: &str) -> String {
        format!("{}{}", base(&self.drive), path)
    }

    pub fn api_root(&self) -> &str {
        base(&self.api)
    }
}
