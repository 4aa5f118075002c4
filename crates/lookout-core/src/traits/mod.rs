// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod assistant;
pub mod chat;
pub mod index;

pub use adapter::PluginAdapter;
pub use assistant::{AssistantAdapter, RunEventStream};
pub use chat::ChatAdapter;
pub use index::IndexAdapter;
