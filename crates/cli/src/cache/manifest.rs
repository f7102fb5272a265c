// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell manifest and request classification.

use std::collections::BTreeSet;

/// How a GET request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    /// Application shell: cache-first.
    Shell,
    /// Everything else: network-first.
    Dynamic,
}

/// The fixed set of shell routes known at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellManifest {
    routes: BTreeSet<String>,
}

impl ShellManifest {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ShellManifest {
            routes: routes
                .into_iter()
                .map(|r| normalize_path(r.as_ref()))
                .collect(),
        }
    }

    pub fn classify(&self, url: &str) -> ResourceClass {
        if self.contains(url) {
            ResourceClass::Shell
        } else {
            ResourceClass::Dynamic
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.routes.contains(&normalize_path(url))
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Path component of a URL, absolute or relative, without query or fragment.
fn url_path(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) if !parsed.cannot_be_a_base() => parsed.path().to_string(),
        _ => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}

/// Path used for shell classification: origin, query and fragment removed,
/// trailing slash collapsed except for the root.
pub fn normalize_path(url: &str) -> String {
    let path = url_path(url);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Cache identity of a dynamic request: normalized path plus query.
pub fn request_identity(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) if !query.is_empty() => format!("{}?{query}", normalize_path(path)),
        Some((path, _)) => normalize_path(path),
        None => normalize_path(without_fragment),
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
