/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::TableError;
use crate::codes::zeta::MAX_K;
use crate::dispatch::Codes;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The parameters of a set of tables for a code.
///
/// With the `serde` feature, configurations can be stored, e.g., as
/// ```json
/// { "code": "Zeta(3)", "read_bits": 12, "write_max_val": 256 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConfig {
    /// The code, including its parameter.
    pub code: Codes,
    /// The width in bits of the decoding window.
    pub read_bits: usize,
    /// The largest value in the encoding and length tables.
    pub write_max_val: u64,
    /// The largest value whose length the length table must be able to
    /// represent; if `None`, `write_max_val`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub len_max_val: Option<u64>,
}

impl TableConfig {
    /// The widest supported decoding window.
    pub const MAX_READ_BITS: usize = 24;

    pub fn new(code: Codes, read_bits: usize, write_max_val: u64) -> Self {
        Self {
            code,
            read_bits,
            write_max_val,
            len_max_val: None,
        }
    }

    pub fn with_len_max_val(mut self, len_max_val: u64) -> Self {
        self.len_max_val = Some(len_max_val);
        self
    }

    /// Return the largest value whose length the length table must be able
    /// to represent.
    pub fn len_max_val(&self) -> u64 {
        self.len_max_val.unwrap_or(self.write_max_val)
    }

    /// The name of the code in lowercase, as used in the names of table
    /// modules (e.g., `zeta_tables.rs`).
    pub fn name(&self) -> &'static str {
        match self.code {
            Codes::Unary => "unary",
            Codes::Gamma => "gamma",
            Codes::Delta => "delta",
            Codes::Zeta { .. } => "zeta",
            Codes::MinimalBinary { .. } => "minimal_binary",
        }
    }

    /// Check that the configuration describes a non-degenerate set of
    /// tables.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.read_bits > Self::MAX_READ_BITS {
            return Err(TableError::ReadBitsTooLarge {
                read_bits: self.read_bits,
                max: Self::MAX_READ_BITS,
            });
        }
        match self.code {
            Codes::Zeta { k } if !(1..=MAX_K).contains(&k) => Err(TableError::DegenerateParameter {
                code: self.code,
                reason: "k must be between 1 and 64",
            }),
            Codes::MinimalBinary { max } if max < 2 => Err(TableError::DegenerateParameter {
                code: self.code,
                reason: "max must be at least 2",
            }),
            _ => Ok(()),
        }
    }

    /// Return the configurations of the stock tables.
    ///
    /// Unary codes get no decoding table, as counting zeros is faster than a
    /// lookup.
    pub fn default_tables() -> [TableConfig; 4] {
        [
            TableConfig::new(Codes::Unary, 0, 63),
            TableConfig::new(Codes::Gamma, 11, 256),
            TableConfig::new(Codes::Delta, 11, 256),
            TableConfig::new(Codes::Zeta { k: 3 }, 12, 256),
        ]
    }
}
