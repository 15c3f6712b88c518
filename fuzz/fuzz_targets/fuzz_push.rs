#![no_main]

use jsonpush::{NullSink, Parser, ParserConfig, StaticStack};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = ParserConfig::new().with_bignum(true);
    let mut parser = Parser::new(StaticStack::<64>::new(), NullSink, config);

    // Split the input in half to also exercise the chunked push path; a
    // parser must never panic regardless of how its input is fragmented.
    let mid = data.len() / 2;
    if parser.push(&data[..mid]).is_ok() {
        if parser.push(&data[mid..]).is_ok() {
            let _ = parser.finalize();
        }
    }
});
