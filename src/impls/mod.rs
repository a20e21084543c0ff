/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Bit cursors.

Codes are written to and read from a [`BitBuf`], a fixed-capacity buffer of
bits with order-aware fixed-width fields. Its capacity bounds the length of
the codewords that can be materialized, and it is used by the table compiler
to represent decoding windows.

*/

mod bit_buf;
pub use bit_buf::*;
