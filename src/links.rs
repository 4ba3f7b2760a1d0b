use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Ordered list of harvested hrefs.
///
/// A harvest keeps first-seen order without duplicates; a loaded file is kept
/// exactly as written. Positions are the indices screenshots are named by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkSet {
    links: Vec<String>,
}

impl LinkSet {
    /// Build a link set, keeping only the first occurrence of each href
    pub fn from_hrefs<I>(hrefs: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let links = hrefs
            .into_iter()
            .filter(|href| seen.insert(href.clone()))
            .collect();
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.links
    }

    /// Iterate `(index, href)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.links.iter().map(String::as_str).enumerate()
    }

    /// Write the set as a JSON array, replacing any previous file
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuditError::io(parent, e))?;
        }

        let json = serde_json::to_string(self)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| AuditError::io(path, e))?;

        ::log::info!("Saved {} links to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a set previously written by [`LinkSet::save`]
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuditError::io(path, e))?;
        let links: Vec<String> = serde_json::from_str(&contents)?;

        // Taken as written: positions in the file are the screenshot indices
        let set = Self { links };
        ::log::info!("Loaded {} links from {}", set.len(), path.display());
        Ok(set)
    }
}
