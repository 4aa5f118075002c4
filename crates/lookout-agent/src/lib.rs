// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-facing side of Lookout.
//!
//! [`EventIntake`] turns inbound chat events into buffer writes or
//! [`QueryRelay`] turns; [`shutdown`] wires process signals to a
//! cancellation token.

pub mod intake;
pub mod relay;
pub mod shutdown;

pub use intake::{EventIntake, IntakeError, IntakeOutcome};
pub use relay::{ConversationThread, QueryRelay, RelayError};
