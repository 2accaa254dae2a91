// Copyright 2026 Magpie Contributors
// SPDX-License-Identifier: Apache-2.0

//! Magpie library: pick any element on a live web page and copy a chosen
//! representation of it (text, markup, an attribute, or a TSV table).
//!
//! The interaction core is a DOM-free state machine in [`picker`]; the
//! browser binding in [`browser`] drives a real page via chromiumoxide.

pub mod browser;
pub mod cli;
pub mod clipboard;
pub mod dom;
pub mod events;
pub mod extract;
pub mod i18n;
pub mod picker;
pub mod relay;
pub mod session;
