// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use outbox::Cli;

fn main() {
    let cli = Cli::parse();
    outbox::init_logging(cli.verbose);
    if let Err(e) = outbox::run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
