// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::info;

/// Receives a summary whenever a pass delivered at least one mutation.
pub trait Notifier: Send + Sync {
    fn notify(&self, synced: usize, errors: usize);
}

/// Reports sync summaries through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, synced: usize, errors: usize) {
        info!(synced, errors, "{}", sync_message(synced, errors));
    }
}

/// Human-readable summary of a pass.
pub fn sync_message(synced: usize, errors: usize) -> String {
    let noun = if synced == 1 { "change" } else { "changes" };
    match errors {
        0 => format!("{synced} {noun} synced"),
        1 => format!("{synced} {noun} synced, 1 error"),
        n => format!("{synced} {noun} synced, {n} errors"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        one = { 1, 0, "1 change synced" },
        many = { 3, 0, "3 changes synced" },
        one_error = { 2, 1, "2 changes synced, 1 error" },
        errors = { 1, 4, "1 change synced, 4 errors" },
    )]
    fn message(synced: usize, errors: usize, expected: &str) {
        assert_eq!(sync_message(synced, errors), expected);
    }
}
