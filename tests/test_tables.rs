/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};
use std::error::Error;
use univ_code_tables::prelude::*;

fn init_logger() {
    // several tests may try to install the logger
    let _ = stderrlog::new()
        .verbosity(3)
        .timestamp(stderrlog::Timestamp::Second)
        .init();
}

#[test]
fn test_read_tables_agree() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    init_logger();
    let mut configs = TableConfig::default_tables().to_vec();
    configs.push(TableConfig::new(Codes::MinimalBinary { max: 10 }, 6, 9));
    configs.push(TableConfig::new(Codes::Zeta { k: 5 }, 9, 100));
    for config in configs {
        let tables = compile(&config)?;
        let read_bits = config.read_bits;
        for order in BitOrder::ALL {
            assert_eq!(tables.read_table(order).len(), 1 << read_bits);
            for window in 0..1_u64 << read_bits {
                let mut buf = BitBuf::from_bits(window as u128, read_bits);
                let expected = match config.code.decode(&mut buf, order) {
                    Ok(decoded) => Some(decoded),
                    Err(DecodeError::Incomplete) => None,
                    Err(e) => return Err(e.into()),
                };
                assert_eq!(
                    tables.read(order, window),
                    expected,
                    "{} window {:0width$b} ({})",
                    config.code,
                    window,
                    order,
                    width = read_bits
                );
                let entry = tables.read_table(order)[window as usize];
                if expected.is_none() {
                    assert_eq!(entry.value, 0);
                    assert_eq!(entry.len, tables.missing_value_len());
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_write_tables_agree() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    init_logger();
    for config in TableConfig::default_tables() {
        let tables = compile(&config)?;
        assert_eq!(tables.len_table().len() as u64, config.write_max_val + 1);
        for value in 0..=config.write_max_val {
            assert_eq!(tables.len(value), Some(config.code.len(value)));
            for order in BitOrder::ALL {
                let codeword = config.code.encode(value, order)?;
                assert_eq!(
                    tables.write(order, value),
                    Some(WriteEntry {
                        bits: codeword.bits(),
                        len: codeword.len() as u8
                    })
                );
                assert!(codeword.bits() <= tables.write_bits_width().max_value());
            }
        }
        assert_eq!(tables.write(BitOrder::M2L, config.write_max_val + 1), None);
    }
    Ok(())
}

#[test]
fn test_gamma_sentinel() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let tables = compile(&TableConfig::new(Codes::Gamma, 11, 256))?;
    // the longest codeword of the window is 23 bits long, so lengths fit in a u8
    assert_eq!(tables.read_len_width(), UintWidth::U8);
    assert_eq!(tables.missing_value_len(), 255);
    assert_eq!(
        tables.read_table(BitOrder::M2L)[0b00000000001],
        ReadEntry {
            value: 0,
            len: 255
        }
    );
    assert_eq!(tables.read(BitOrder::M2L, 0), None);
    assert_eq!(tables.read(BitOrder::L2M, 0), None);
    Ok(())
}

#[test]
fn test_table_decode() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    init_logger();
    let mut r = SmallRng::seed_from_u64(0);
    for tables in default_code_tables()? {
        let code = tables.code();
        for order in BitOrder::ALL {
            let mut buf = BitBuf::new();
            let mut values = vec![];
            loop {
                let value = match r.random_range(0..4) {
                    0 => r.random_range(0..1000),
                    _ => r.random_range(0..8),
                };
                if buf.len() + code.len(value) > BitBuf::CAPACITY {
                    break;
                }
                code.write(&mut buf, value, order);
                values.push(value);
            }

            let mut hits = 0;
            for value in values {
                let decoded = match tables.decode(&mut buf, order) {
                    Some(decoded) => {
                        hits += 1;
                        decoded
                    }
                    None => code.decode(&mut buf, order)?,
                };
                assert_eq!(decoded.value, value, "{} ({})", code, order);
                assert_eq!(decoded.bits_consumed, code.len(value));
            }
            assert!(buf.is_empty());
            if tables.read_bits() > 0 {
                assert!(hits > 0);
            }
        }
    }
    Ok(())
}

#[test]
fn test_table_encode() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let tables = &default_code_tables()?[2];
    assert_eq!(tables.code(), Codes::Delta);
    for order in BitOrder::ALL {
        let mut with_tables = BitBuf::new();
        let mut without_tables = BitBuf::new();
        for value in [0, 1, 17, 256, 3] {
            assert_eq!(tables.encode(&mut with_tables, value, order), Some(len_delta(value)));
            write_delta(&mut without_tables, value, order);
        }
        assert_eq!(with_tables, without_tables);
        assert_eq!(tables.encode(&mut with_tables, 257, order), None);
    }
    Ok(())
}

#[test]
fn test_degenerate_configs() {
    assert!(matches!(
        compile(&TableConfig::new(Codes::Gamma, 25, 10)),
        Err(TableError::ReadBitsTooLarge { .. })
    ));
    assert!(matches!(
        compile(&TableConfig::new(Codes::Zeta { k: 65 }, 8, 10)),
        Err(TableError::DegenerateParameter { .. })
    ));
    assert!(matches!(
        compile(&TableConfig::new(Codes::MinimalBinary { max: 0 }, 8, 0)),
        Err(TableError::DegenerateParameter { .. })
    ));
}

#[test]
fn test_serde_config() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let config: TableConfig =
        serde_json::from_str(r#"{ "code": "Zeta(3)", "read_bits": 12, "write_max_val": 256 }"#)?;
    assert_eq!(config, TableConfig::default_tables()[3]);
    assert_eq!(config.len_max_val(), 256);

    let config = TableConfig::new(Codes::MinimalBinary { max: 100 }, 7, 99).with_len_max_val(99);
    let json = serde_json::to_string(&config)?;
    assert!(json.contains(r#""code":"MinimalBinary(100)""#));
    assert_eq!(serde_json::from_str::<TableConfig>(&json)?, config);

    assert!(serde_json::from_str::<TableConfig>(r#"{ "code": "Omega", "read_bits": 8, "write_max_val": 8 }"#).is_err());
    Ok(())
}

#[test]
fn test_emit_default_tables() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    init_logger();
    let mut emitter = RustSourceEmitter::new(Vec::new());
    compile_and_emit(&TableConfig::default_tables(), &mut emitter)?;
    let source = String::from_utf8(emitter.into_inner())?;
    assert_eq!(source.matches("~~~ DO NOT MODIFY ~~~").count(), 4);
    assert!(source.contains("pub const READ_BITS: u8 = 0;\n"));
    assert!(source.contains("pub const READ_BITS: u8 = 11;\n"));
    assert!(source.contains("pub const READ_BITS: u8 = 12;\n"));
    assert!(source.contains("pub const READ_M2L: &[(u16, u8)] = &[(0, 255),"));
    assert!(source.contains("pub const WRITE_L2M: &[(u32, u8)] = &["));
    assert_eq!(source.matches("pub const K: u64").count(), 1);
    assert!(source.ends_with("pub const K: u64 = 3;\n"));
    Ok(())
}
