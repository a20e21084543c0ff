/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::codes::{
    write_delta, write_gamma, write_minimal_binary, write_unary, write_zeta, zeta, DecodeError,
    Decoded,
};
use crate::dispatch::Codes;
use crate::impls::BitBuf;
use crate::tables::default_code_tables;
use crate::traits::BitOrder;
use arbitrary::Arbitrary;

const DEBUG: bool = false;

macro_rules! debugln {
    ($($arg:tt)*) => {
        if DEBUG {
            println!($($arg)*);
        }
    };
}

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    order: BitOrder,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Bits(u64, usize),
    MinimalBinary(u64, u64),
    Unary(u64),
    Gamma(u64),
    Delta(u64),
    Zeta(u64, usize),
    /// A window checked against the default tables.
    Window(u32),
}

impl RandomCommand {
    /// Clamp parameters to the domain of the code.
    fn normalize(&mut self) {
        match self {
            RandomCommand::Bits(value, n_bits) => {
                *n_bits %= 65;
                *value &= u64::MAX.checked_shr(64 - *n_bits as u32).unwrap_or(0);
            }
            RandomCommand::MinimalBinary(value, max) => {
                *max = (*max).max(1);
                *value %= *max;
            }
            RandomCommand::Unary(value) => {
                *value = (*value).min(BitBuf::CAPACITY as u64 - 1);
            }
            RandomCommand::Zeta(_, k) => {
                *k = 1 + *k % zeta::MAX_K;
            }
            RandomCommand::Gamma(_) | RandomCommand::Delta(_) | RandomCommand::Window(_) => {}
        }
    }

    /// Return the value and the code of a codeword command.
    fn codeword(&self) -> Option<(u64, Codes)> {
        match *self {
            RandomCommand::MinimalBinary(value, max) => Some((value, Codes::MinimalBinary { max })),
            RandomCommand::Unary(value) => Some((value, Codes::Unary)),
            RandomCommand::Gamma(value) => Some((value, Codes::Gamma)),
            RandomCommand::Delta(value) => Some((value, Codes::Delta)),
            RandomCommand::Zeta(value, k) => Some((value, Codes::Zeta { k })),
            RandomCommand::Bits(..) | RandomCommand::Window(_) => None,
        }
    }
}

/// Check that the default tables agree with the codes on `window`.
fn check_window(order: BitOrder, window: u32) {
    let Ok(all_tables) = default_code_tables() else {
        panic!("the default tables do not compile");
    };
    for tables in all_tables {
        let read_bits = tables.read_bits();
        let window = window as u64 & ((1 << read_bits) - 1);
        let mut buf = BitBuf::from_bits(window as u128, read_bits);
        match tables.code().decode(&mut buf, order) {
            Ok(decoded) => assert_eq!(tables.read(order, window), Some(decoded)),
            Err(DecodeError::Incomplete) => assert_eq!(tables.read(order, window), None),
            Err(DecodeError::Overflow) => panic!("overflow in a window of {} bits", read_bits),
        }
    }
}

pub fn harness(data: FuzzCase) {
    let mut data = data;
    for command in &mut data.commands {
        command.normalize();
    }

    debugln!("{:#4?}", data);

    let order = data.order;
    let mut buf = BitBuf::new();
    let mut written = vec![];
    for command in data.commands {
        if let RandomCommand::Window(window) = command {
            check_window(order, window);
            continue;
        }
        let len = match command.codeword() {
            Some((value, code)) => {
                let len = code.len(value);
                match code.encode(value, order) {
                    Ok(codeword) => assert_eq!(codeword.len(), len, "{}", code),
                    Err(error) => {
                        assert!(len > BitBuf::CAPACITY, "{}: {}", code, error);
                        continue;
                    }
                }
                len
            }
            None => match command {
                RandomCommand::Bits(_, n_bits) => n_bits,
                _ => unreachable!(),
            },
        };
        // stop at the first codeword that does not fit
        if buf.len() + len > BitBuf::CAPACITY {
            break;
        }
        match command {
            RandomCommand::Bits(value, n_bits) => buf.write_fixed(value as u128, n_bits, order),
            RandomCommand::MinimalBinary(value, max) => {
                write_minimal_binary(&mut buf, value, max, order)
            }
            RandomCommand::Unary(value) => write_unary(&mut buf, value, order),
            RandomCommand::Gamma(value) => write_gamma(&mut buf, value, order),
            RandomCommand::Delta(value) => write_delta(&mut buf, value, order),
            RandomCommand::Zeta(value, k) => write_zeta(&mut buf, value, k, order),
            RandomCommand::Window(_) => unreachable!(),
        }
        written.push(command);
    }

    debugln!("{}", buf);

    for command in written {
        match command.codeword() {
            Some((value, code)) => {
                let before = buf;
                assert_eq!(
                    code.decode(&mut buf, order),
                    Ok(Decoded {
                        value,
                        bits_consumed: code.len(value),
                    }),
                    "{} in {}",
                    code,
                    before
                );
            }
            None => {
                let RandomCommand::Bits(value, n_bits) = command else {
                    unreachable!()
                };
                assert_eq!(buf.read_fixed(n_bits, order), Ok(value as u128));
            }
        }
    }
    assert!(buf.is_empty());
}
