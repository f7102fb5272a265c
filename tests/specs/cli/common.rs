// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Nothing listens on the discard port, so every request fails fast.
pub const UNREACHABLE_ORIGIN: &str = "http://127.0.0.1:9";

pub fn outbox() -> Command {
    cargo_bin_cmd!("outbox")
}

/// A state directory whose config points at an unreachable API.
pub struct OfflineEnv {
    pub temp: TempDir,
}

impl OfflineEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config = format!(
            "base_url = \"{UNREACHABLE_ORIGIN}/api\"\n\
             request_timeout_secs = 2\n\
             \n\
             [cache]\n\
             origin = \"{UNREACHABLE_ORIGIN}\"\n"
        );
        std::fs::write(temp.path().join("outbox.toml"), config).unwrap();
        OfflineEnv { temp }
    }

    /// An `outbox` command bound to this state directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = outbox();
        cmd.env("OUTBOX_STATE_DIR", self.temp.path())
            .env_remove("OUTBOX_CONFIG")
            .env_remove("OUTBOX_DAEMON_BINARY")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn submit(&self, endpoint: &str, data: &str) {
        self.cmd()
            .args(["submit", endpoint, "-d", data])
            .assert()
            .success();
    }
}
