// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline write queue synchronization.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  queue on failure  ┌───────────────┐
//! │   Outbox    │───────────────────►│ MutationStore │
//! │ (write path)│                    │   (SQLite)    │
//! └─────────────┘                    └───────────────┘
//!        │ wake                              ▲
//!        ▼                                   │ drain
//! ┌─────────────┐  run_pass(trigger) ┌───────────────┐     ┌──────────┐
//! │  Triggers   │───────────────────►│  SyncContext  │────►│ Endpoint │
//! └─────────────┘                    └───────────────┘     └──────────┘
//! ```
//!
//! Every trigger goes through [`SyncContext::run_pass`], which allows a
//! single pass at a time and delegates to [`run_sync_pass`].

mod coordinator;
mod notify;
mod outbox;
mod pass;
mod trigger;
mod wake;

pub use coordinator::{SyncContext, SyncStatus};
pub use notify::{sync_message, LogNotifier, Notifier};
pub use outbox::{Delivery, Outbox};
pub use pass::{run_sync_pass, SyncOutcome};
pub use trigger::{ConnectivityMonitor, Trigger};
pub use wake::{DaemonWake, NoWake, WakeRegistrar};

#[cfg(test)]
pub(crate) mod test_helpers;
