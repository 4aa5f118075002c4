// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slack Events API gateway for Lookout.
//!
//! Receives signed webhook deliveries, answers URL verification, and forwards
//! event callbacks to the intake loop over a bounded channel.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::{SigningConfig, compute_signature, verify_signature};
pub use server::{GatewayState, ServerConfig, build_router, start_server};
