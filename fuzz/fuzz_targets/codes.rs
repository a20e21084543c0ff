#![no_main]

use libfuzzer_sys::fuzz_target;
use univ_code_tables::fuzz::codes::*;

fuzz_target!(|data: FuzzCase| harness(data));
