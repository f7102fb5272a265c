// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Current cache generations and stale-generation selection.

pub const SHELL_PREFIX: &str = "app-shell";
pub const DYNAMIC_PREFIX: &str = "dynamic";

/// Names of the live generation for each role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generations {
    pub shell: String,
    pub dynamic: String,
}

impl Generations {
    pub fn for_version(version: &str) -> Self {
        Generations {
            shell: format!("{SHELL_PREFIX}-{version}"),
            dynamic: format!("{DYNAMIC_PREFIX}-{version}"),
        }
    }

    pub fn is_current(&self, name: &str) -> bool {
        name == self.shell || name == self.dynamic
    }

    /// Every name that is not a current generation, in input order.
    pub fn stale<'a, I>(&self, names: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names.into_iter().filter(|n| !self.is_current(n)).collect()
    }
}
