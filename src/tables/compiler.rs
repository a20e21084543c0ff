/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::width::ceil_log2;
use super::{TableConfig, TableError, UintWidth};
use crate::codes::{DecodeError, Decoded};
use crate::dispatch::Codes;
use crate::impls::BitBuf;
use crate::traits::BitOrder;
use alloc::vec::Vec;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An entry of a decoding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct ReadEntry {
    /// The decoded value, or zero if the window does not contain a
    /// complete codeword.
    pub value: u64,
    /// The length of the codeword, or the sentinel.
    pub len: u64,
}

/// An entry of an encoding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub struct WriteEntry {
    /// The codeword as an integer whose most significant bit is the head
    /// of the codeword.
    pub bits: u128,
    /// The length of the codeword.
    pub len: u8,
}

/// The decoding, encoding and length tables of a code.
///
/// Instances are built by [`compile`] and are immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct CodeTables {
    config: TableConfig,
    missing_value_len: u64,
    read_value_width: UintWidth,
    read_len_width: UintWidth,
    write_bits_width: UintWidth,
    len_width: UintWidth,
    read_m2l: Vec<ReadEntry>,
    read_l2m: Vec<ReadEntry>,
    write_m2l: Vec<WriteEntry>,
    write_l2m: Vec<WriteEntry>,
    len: Vec<usize>,
}

/// Decode a window of `read_bits` bits, mapping incomplete codewords to the
/// sentinel.
fn read_entry(
    code: &Codes,
    window: u64,
    read_bits: usize,
    order: BitOrder,
    missing_value_len: u64,
) -> Result<ReadEntry, TableError> {
    let mut buf = BitBuf::from_bits(window as u128, read_bits);
    match code.decode(&mut buf, order) {
        Ok(Decoded {
            value,
            bits_consumed,
        }) => {
            debug_assert!((bits_consumed as u64) < missing_value_len);
            Ok(ReadEntry {
                value,
                len: bits_consumed as u64,
            })
        }
        Err(DecodeError::Incomplete) => Ok(ReadEntry {
            value: 0,
            len: missing_value_len,
        }),
        Err(error) => Err(TableError::Decode { window, error }),
    }
}

fn read_table(
    code: &Codes,
    read_bits: usize,
    order: BitOrder,
    missing_value_len: u64,
) -> Result<Vec<ReadEntry>, TableError> {
    (0..1_u64 << read_bits)
        .map(|window| read_entry(code, window, read_bits, order, missing_value_len))
        .collect()
}

fn write_table(code: &Codes, write_max_val: u64, order: BitOrder) -> Result<Vec<WriteEntry>, TableError> {
    (0..=write_max_val)
        .map(|value| {
            code.encode(value, order)
                .map(|buf| WriteEntry {
                    bits: buf.bits(),
                    len: buf.len() as u8,
                })
                .map_err(|error| TableError::Encode { value, error })
        })
        .collect()
}

/// Build the tables described by `config`.
///
/// The sentinel for missing values is derived from the length of the code
/// of the largest value fitting in the window: it is the largest value of
/// the narrowest type that can hold that length plus one.
pub fn compile(config: &TableConfig) -> Result<CodeTables, TableError> {
    config.validate()?;
    let code = &config.code;
    let read_bits = config.read_bits;

    let missing_value_len = code.len((1 << read_bits) - 1) as u128 + 1;
    let read_len_width = UintWidth::for_bits(ceil_log2(missing_value_len))?;
    // widths past 64 bits are impossible with windows of at most MAX_READ_BITS bits
    let missing_value_len = read_len_width.max_value().min(u64::MAX as u128) as u64;
    let read_value_width = UintWidth::for_bits(read_bits)?;
    log::debug!(
        "{}: read_bits = {}, missing_value_len = {}: {}, values: {}",
        code,
        read_bits,
        missing_value_len,
        read_len_width,
        read_value_width
    );

    let read_m2l = read_table(code, read_bits, BitOrder::M2L, missing_value_len)?;
    let read_l2m = read_table(code, read_bits, BitOrder::L2M, missing_value_len)?;

    let write_m2l = write_table(code, config.write_max_val, BitOrder::M2L)?;
    let write_l2m = write_table(code, config.write_max_val, BitOrder::L2M)?;
    let write_bits_width = UintWidth::for_bits(code.len(config.write_max_val))?;

    let len: Vec<usize> = (0..=config.write_max_val).map(|value| code.len(value)).collect();
    let max_len = len
        .iter()
        .copied()
        .chain([code.len(config.len_max_val())])
        .max()
        .unwrap_or(0);
    let len_width = UintWidth::for_value(max_len as u128);
    log::debug!(
        "{}: write_max_val = {}, codewords: {}, lengths: {}",
        code,
        config.write_max_val,
        write_bits_width,
        len_width
    );

    log::info!(
        "Compiled tables for {}: {} decoding entries, {} encoding entries",
        code,
        read_m2l.len(),
        write_m2l.len()
    );

    Ok(CodeTables {
        config: *config,
        missing_value_len,
        read_value_width,
        read_len_width,
        write_bits_width,
        len_width,
        read_m2l,
        read_l2m,
        write_m2l,
        write_l2m,
        len,
    })
}

/// Return the tables for [`TableConfig::default_tables`], compiling them at
/// the first call.
#[cfg(feature = "std")]
pub fn default_code_tables() -> Result<&'static [CodeTables], TableError> {
    static TABLES: std::sync::OnceLock<Result<Vec<CodeTables>, TableError>> =
        std::sync::OnceLock::new();
    TABLES
        .get_or_init(|| TableConfig::default_tables().iter().map(compile).collect())
        .as_deref()
        .map_err(Clone::clone)
}

impl CodeTables {
    /// The configuration the tables were built from.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn code(&self) -> Codes {
        self.config.code
    }

    /// The width in bits of the decoding window.
    pub fn read_bits(&self) -> usize {
        self.config.read_bits
    }

    /// The parameter of ζ codes, which is necessary to decode.
    pub fn k(&self) -> Option<usize> {
        match self.config.code {
            Codes::Zeta { k } => Some(k),
            _ => None,
        }
    }

    /// The length stored in decoding tables for windows that do not contain
    /// a complete codeword.
    pub fn missing_value_len(&self) -> u64 {
        self.missing_value_len
    }

    /// The type of the values of decoding tables.
    pub fn read_value_width(&self) -> UintWidth {
        self.read_value_width
    }

    /// The type of the lengths of decoding tables, and of the sentinel.
    pub fn read_len_width(&self) -> UintWidth {
        self.read_len_width
    }

    /// The type of the codewords of encoding tables.
    pub fn write_bits_width(&self) -> UintWidth {
        self.write_bits_width
    }

    /// The type of the entries of the length table.
    pub fn len_width(&self) -> UintWidth {
        self.len_width
    }

    /// The decoding table for `order`, indexed by windows.
    pub fn read_table(&self, order: BitOrder) -> &[ReadEntry] {
        match order {
            BitOrder::M2L => &self.read_m2l,
            BitOrder::L2M => &self.read_l2m,
        }
    }

    /// The encoding table for `order`, indexed by values.
    pub fn write_table(&self, order: BitOrder) -> &[WriteEntry] {
        match order {
            BitOrder::M2L => &self.write_m2l,
            BitOrder::L2M => &self.write_l2m,
        }
    }

    /// The length table, indexed by values.
    pub fn len_table(&self) -> &[usize] {
        &self.len
    }

    /// Look up a window of [`read_bits`](Self::read_bits) bits.
    ///
    /// Return `None` if the window does not contain a complete codeword.
    ///
    /// # Panics
    ///
    /// If `window` has more than [`read_bits`](Self::read_bits) bits.
    #[inline]
    pub fn read(&self, order: BitOrder, window: u64) -> Option<Decoded> {
        let entry = self.read_table(order)[window as usize];
        (entry.len != self.missing_value_len).then_some(Decoded {
            value: entry.value,
            bits_consumed: entry.len as usize,
        })
    }

    /// Decode a codeword from the start of `buf` with a single lookup.
    ///
    /// Return `None`, leaving `buf` untouched, if `buf` has fewer than
    /// [`read_bits`](Self::read_bits) bits or if the next
    /// [`read_bits`](Self::read_bits) bits do not contain a complete codeword:
    /// in that case, the codeword must be decoded with the functions in
    /// [`codes`](crate::codes).
    #[inline]
    pub fn decode(&self, buf: &mut BitBuf, order: BitOrder) -> Option<Decoded> {
        let read_bits = self.read_bits();
        if buf.len() < read_bits {
            return None;
        }
        let window = match order {
            BitOrder::M2L => buf
                .bits()
                .checked_shr((buf.len() - read_bits) as u32)
                .unwrap_or(0),
            BitOrder::L2M => buf.bits() & ((1 << read_bits) - 1),
        };
        let decoded = self.read(order, window as u64)?;
        buf.read_fixed(decoded.bits_consumed, order).ok()?;
        Some(decoded)
    }

    /// Return the table entry for `value`, if it is in the table.
    #[inline]
    pub fn write(&self, order: BitOrder, value: u64) -> Option<WriteEntry> {
        self.write_table(order).get(value as usize).copied()
    }

    /// Append the codeword of `value` to `buf` using the encoding table.
    ///
    /// Return the length of the codeword, or `None` if `value` is not in the
    /// table.
    ///
    /// # Panics
    ///
    /// If the codeword does not fit in the buffer.
    #[inline]
    pub fn encode(&self, buf: &mut BitBuf, value: u64, order: BitOrder) -> Option<usize> {
        let entry = self.write(order, value)?;
        buf.write_fixed(entry.bits, entry.len as usize, order);
        Some(entry.len as usize)
    }

    /// Return the length of the codeword of `value`, if it is in the table.
    #[inline]
    pub fn len(&self, value: u64) -> Option<usize> {
        self.len.get(value as usize).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_gamma_window() {
        let tables = compile(&TableConfig::new(Codes::Gamma, 11, 256)).unwrap();
        assert_eq!(tables.missing_value_len(), u8::MAX as u64);
        assert_eq!(tables.read_len_width(), UintWidth::U8);
        assert_eq!(tables.read_value_width(), UintWidth::U16);
        // 00000000001 is the prefix of a γ codeword of 21 bits
        assert_eq!(
            tables.read_table(BitOrder::M2L)[0b00000000001],
            ReadEntry {
                value: 0,
                len: 255
            }
        );
        // read from the tail, it is the γ codeword of 0
        assert_eq!(
            tables.read(BitOrder::L2M, 0b00000000001),
            Some(Decoded {
                value: 0,
                bits_consumed: 1
            })
        );
        assert_eq!(
            tables.read(BitOrder::M2L, 0b00101_000000),
            Some(Decoded {
                value: 4,
                bits_consumed: 5
            })
        );
    }

    #[test]
    fn test_unary_empty_window() {
        let tables = compile(&TableConfig::new(Codes::Unary, 0, 63)).unwrap();
        assert_eq!(tables.read_table(BitOrder::M2L).len(), 1);
        assert_eq!(tables.read(BitOrder::M2L, 0), None);
        assert_eq!(tables.missing_value_len(), 255);
        assert_eq!(tables.len_table().len(), 64);
        assert_eq!(tables.len(63), Some(64));
        assert_eq!(tables.len(64), None);
        assert_eq!(
            tables.write(BitOrder::L2M, 2),
            Some(WriteEntry {
                bits: 0b100,
                len: 3
            })
        );
    }

    #[test]
    fn test_zeta_k() {
        let tables = compile(&TableConfig::new(Codes::Zeta { k: 3 }, 12, 256)).unwrap();
        assert_eq!(tables.k(), Some(3));
        assert_eq!(
            tables.write(BitOrder::M2L, 7),
            Some(WriteEntry {
                bits: 0b0100000,
                len: 7
            })
        );
        assert_eq!(tables.write(BitOrder::M2L, 257), None);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            compile(&TableConfig::new(Codes::MinimalBinary { max: 10 }, 4, 10)),
            Err(TableError::Encode {
                value: 10,
                error: crate::codes::EncodeError::ValueOutOfRange { value: 10, max: 10 }
            })
        );
        assert_eq!(
            compile(&TableConfig::new(Codes::Unary, 4, 200)),
            Err(TableError::Encode {
                value: 128,
                error: crate::codes::EncodeError::CodewordTooLong {
                    len: 129,
                    capacity: 128
                }
            })
        );
        assert!(compile(&TableConfig::new(Codes::MinimalBinary { max: 1 }, 4, 0)).is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_default_code_tables() {
        let tables = default_code_tables().unwrap();
        assert_eq!(tables.len(), 4);
        assert!(core::ptr::eq(tables, default_code_tables().unwrap()));
        assert_eq!(tables[1].code(), Codes::Gamma);
        assert_eq!(tables[1].read_table(BitOrder::L2M).len(), 1 << 11);
    }

    #[test]
    fn test_len_width() {
        let tables = compile(&TableConfig::new(Codes::Unary, 4, 100).with_len_max_val(1000)).unwrap();
        assert_eq!(tables.len_width(), UintWidth::U16);
        let tables = compile(&TableConfig::new(Codes::Unary, 4, 100)).unwrap();
        assert_eq!(tables.len_width(), UintWidth::U8);
        assert_eq!(tables.write_bits_width(), UintWidth::U128);
    }
}
