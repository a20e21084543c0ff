/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Dynamic selection of a code.
//!
//! The functions in [`codes`](crate::codes) commit to a specific code at
//! compile time. The [`Codes`] enum instead names a code and its parameter
//! at run time, and it is the way codes are specified in a
//! [`TableConfig`](crate::tables::TableConfig).

pub mod codes;
pub use codes::{CodeError, Codes};
