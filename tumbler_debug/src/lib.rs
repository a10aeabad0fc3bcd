// Copyright 2026 the Tumbler Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for tumbler
//! diagnostics.
//!
//! Three [`TraceSink`](tumbler_core::trace::TraceSink) consumers:
//!
//! - **[`recorder`]** — [`RecorderSink`](recorder::RecorderSink) encodes
//!   events into a compact binary buffer; [`decode`](recorder::decode) reads
//!   them back.
//! - **[`pretty`]** — [`PrettyPrintSink`](pretty::PrettyPrintSink) writes one
//!   human-readable line per event.
//! - **[`chrome`]** — [`export`](chrome::export) converts recorded bytes to
//!   Chrome Trace Event Format JSON for `chrome://tracing` or Perfetto.

pub mod chrome;
pub mod pretty;
pub mod recorder;
