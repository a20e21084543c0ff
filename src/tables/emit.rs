/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{compile, CodeTables, TableConfig, TableError};
use crate::traits::BitOrder;
use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Display, Formatter};

/// A destination for compiled tables.
pub trait Emitter {
    type Error: Error + Send + Sync + 'static;

    /// Persist a set of tables.
    fn emit(&mut self, tables: &CodeTables) -> Result<(), Self::Error>;
}

/// Collect tables in memory.
impl Emitter for Vec<CodeTables> {
    type Error = core::convert::Infallible;

    fn emit(&mut self, tables: &CodeTables) -> Result<(), Self::Error> {
        self.push(tables.clone());
        Ok(())
    }
}

/// The error returned by [`compile_and_emit`].
///
/// It can be a compilation or an emission error, depending on which phase
/// generated the error.
#[derive(Debug, Clone)]
pub enum EmitError<EE: Error + Send + Sync + 'static> {
    TableError(TableError),
    EmitterError(EE),
}

impl<EE: Error + Send + Sync + 'static> Display for EmitError<EE> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            EmitError::TableError(e) => write!(f, "Error while compiling tables: {}", e),
            EmitError::EmitterError(e) => write!(f, "Error while emitting tables: {}", e),
        }
    }
}

impl<EE: Error + Send + Sync + 'static> Error for EmitError<EE> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EmitError::TableError(e) => Some(e),
            EmitError::EmitterError(e) => Some(e),
        }
    }
}

/// Compile each configuration and pass the resulting tables to `emitter`.
///
/// Configurations are processed in order; the first error stops the
/// process, so tables for a configuration are emitted only if they were
/// completely built.
pub fn compile_and_emit<E: Emitter>(
    configs: &[TableConfig],
    emitter: &mut E,
) -> Result<(), EmitError<E::Error>> {
    for config in configs {
        let tables = compile(config).map_err(EmitError::TableError)?;
        emitter.emit(&tables).map_err(EmitError::EmitterError)?;
    }
    Ok(())
}

/// Write tables as Rust source code.
///
/// The generated module contains the constants `READ_BITS`,
/// `MISSING_VALUE_LEN`, the decoding tables `READ_M2L` and `READ_L2M` (pairs
/// of value and length), the encoding tables `WRITE_M2L` and `WRITE_L2M`
/// (pairs of codeword and length), the length table `LEN`, and, for ζ codes,
/// the parameter `K`. Every array uses the narrowest integer types chosen
/// by the compiler.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct RustSourceEmitter<W: std::io::Write> {
    writer: W,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> RustSourceEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_read_table(&mut self, tables: &CodeTables, order: BitOrder) -> std::io::Result<()> {
        let name = tables.config().name();
        writeln!(self.writer, "/// Table used to speed up the reading of {} codes", name)?;
        write!(
            self.writer,
            "pub const READ_{}: &[({}, {})] = &[",
            order.suffix(),
            tables.read_value_width(),
            tables.read_len_width()
        )?;
        for entry in tables.read_table(order) {
            write!(self.writer, "({}, {}),", entry.value, entry.len)?;
        }
        writeln!(self.writer, "];")
    }

    fn write_write_table(&mut self, tables: &CodeTables, order: BitOrder) -> std::io::Result<()> {
        let name = tables.config().name();
        writeln!(self.writer, "/// Table used to speed up the writing of {} codes", name)?;
        write!(
            self.writer,
            "pub const WRITE_{}: &[({}, u8)] = &[",
            order.suffix(),
            tables.write_bits_width()
        )?;
        for entry in tables.write_table(order) {
            write!(self.writer, "({}, {}),", entry.bits, entry.len)?;
        }
        writeln!(self.writer, "];")
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> Emitter for RustSourceEmitter<W> {
    type Error = std::io::Error;

    fn emit(&mut self, tables: &CodeTables) -> Result<(), Self::Error> {
        let name = tables.config().name();
        log::debug!("Emitting {} tables for {}", name, tables.code());
        writeln!(self.writer, "//! THIS FILE HAS BEEN GENERATED BY {}", env!("CARGO_PKG_NAME"))?;
        writeln!(self.writer, "//! ~~~~~~~~~~~~~~~~~~~ DO NOT MODIFY ~~~~~~~~~~~~~~~~~~~~~~")?;
        writeln!(
            self.writer,
            "//! Pre-computed constants used to speedup the reading and writing of {} codes",
            name
        )?;

        writeln!(self.writer, "/// How many bits are needed to read the tables in this")?;
        writeln!(self.writer, "pub const READ_BITS: u8 = {};", tables.read_bits())?;
        writeln!(
            self.writer,
            "/// The len we assign to a code that cannot be decoded through the table"
        )?;
        writeln!(
            self.writer,
            "pub const MISSING_VALUE_LEN: {} = {};",
            tables.read_len_width(),
            tables.missing_value_len()
        )?;

        for order in BitOrder::ALL {
            self.write_read_table(tables, order)?;
        }
        for order in BitOrder::ALL {
            self.write_write_table(tables, order)?;
        }

        writeln!(self.writer, "/// Table used to speed up the skipping of {} codes", name)?;
        write!(self.writer, "pub const LEN: &[{}] = &[", tables.len_width())?;
        for len in tables.len_table() {
            write!(self.writer, "{}, ", len)?;
        }
        writeln!(self.writer, "];")?;

        if let Some(k) = tables.k() {
            writeln!(self.writer, "/// The K of the zeta codes for these tables")?;
            writeln!(self.writer, "pub const K: u64 = {};", k)?;
        }
        self.writer.flush()
    }
}
