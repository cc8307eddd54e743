// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query functions over the SQLite schema.

pub mod contacts;
pub mod entries;
pub mod users;
