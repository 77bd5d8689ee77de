//! Resolving which page the popup is attached to.

use serde::Serialize;
use thiserror::Error;

pub const UNTITLED: &str = "Untitled";

/// What the host reports about the active tab. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabInfo {
    pub url: Option<String>,
    pub title: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Unable to access current tab information. Please refresh the page and try again.")]
    NoActiveTab,

    #[error("Cannot access this page. The extension may not have permission for this URL.")]
    NoUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub url: String,
    pub title: String,
}

impl PageContext {
    /// Builds the page context from the active tab, defaulting the title.
    pub fn resolve(tab: Option<TabInfo>) -> Result<Self, PageError> {
        let tab = tab.ok_or(PageError::NoActiveTab)?;
        let url = tab
            .url
            .filter(|u| !u.is_empty())
            .ok_or(PageError::NoUrl)?;
        let title = tab
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        Ok(Self { url, title })
    }
}
