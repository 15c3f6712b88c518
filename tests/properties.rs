//! Property-based tests: chunk-boundary independence over randomly
//! generated well-formed documents, and a hand-picked corpus in the style
//! of JSONTestSuite's `y_*` (must parse)/`n_*` (must error) naming.

mod common;

use common::{parse_events, parse_events_chunked};
use jsonpush::{Parser, ParserConfig, StaticStack, Stop};
use proptest::prelude::*;

fn json_value() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("null".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        any::<i16>().prop_map(|n| n.to_string()),
        (-100i32..100, 0u32..5).prop_map(|(n, frac)| format!("{n}.{frac}")),
        "[a-zA-Z0-9 _]{0,12}".prop_map(|s| format!("\"{s}\"")),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(|items| format!("[{}]", items.join(","))),
            prop::collection::vec(("[a-zA-Z][a-zA-Z0-9]{0,5}", inner), 0..6).prop_map(|pairs| {
                let body = pairs
                    .iter()
                    .map(|(k, v)| format!("\"{k}\":{v}"))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{{{body}}}")
            }),
        ]
    })
}

proptest! {
    /// For any well-formed document and any fixed chunk size, feeding it one
    /// chunk at a time produces the same event sequence (modulo string-chunk
    /// splits) as feeding it whole. This is the specification's central
    /// invariant: the parser's output must not depend on how the caller
    /// chooses to fragment its input.
    #[test]
    fn chunk_boundary_independence(doc in json_value(), chunk_size in 1usize..9) {
        let bytes = doc.into_bytes();
        let whole = parse_events(&bytes);
        let chunked = parse_events_chunked(&bytes, chunk_size);
        prop_assert_eq!(chunked, whole);
    }

    /// A well-formed document always parses to exactly one top-level value
    /// (a primitive, or a balanced container pair) and never aborts.
    #[test]
    fn well_formed_documents_always_parse(doc in json_value()) {
        let bytes = doc.into_bytes();
        let mut parser = Parser::new(StaticStack::<32>::new(), jsonpush::NullSink, ParserConfig::new());
        prop_assert!(parser.push(&bytes).is_ok());
        prop_assert!(parser.finalize().is_ok());
    }
}

fn assert_parses_cleanly(source: &[u8]) {
    let mut parser = Parser::new(StaticStack::<16>::new(), jsonpush::NullSink, ParserConfig::new());
    parser.push(source).unwrap_or_else(|e| panic!("expected {source:?} to parse, got {e:?}"));
    parser
        .finalize()
        .unwrap_or_else(|e| panic!("expected {source:?} to finalize, got {e:?}"));
}

fn assert_rejected(source: &[u8]) {
    let mut parser = Parser::new(StaticStack::<16>::new(), jsonpush::NullSink, ParserConfig::new());
    let result = parser.push(source).and_then(|()| match parser.finalize() {
        Ok(()) => Ok(()),
        Err(e) => Err(e),
    });
    assert!(
        matches!(result, Err(Stop::Malformed(_))),
        "expected {source:?} to be rejected, got {result:?}"
    );
}

#[test]
fn y_corpus_parses_cleanly() {
    for doc in [
        &b"{}"[..],
        b"[]",
        b"null",
        b"true",
        b"false",
        b"0",
        b"-0",
        b"1e10",
        b"1E-10",
        b"1.5e+10",
        b"-0.0",
        b"\"\"",
        b"\"simple string\"",
        b"\"\\u0041\"",
        b"\"\\\"\\\\\\/\\b\\f\\n\\r\\t\"",
        b"[1,2,3]",
        b"{\"a\":1,\"b\":[true,false,null]}",
        b"[[[[[]]]]]",
        b"{\"a\":{\"b\":{\"c\":{}}}}",
        b"  \t\n [ 1 , 2 ]\r\n ",
    ] {
        assert_parses_cleanly(doc);
    }
}

#[test]
fn n_corpus_is_rejected() {
    for doc in [
        &b"{"[..],
        b"[",
        b"[1,]",
        b"{\"a\":1,}",
        b"{,}",
        b"[,]",
        b"01",
        b"+1",
        b"1.",
        b"1.e1",
        b".1",
        b"1e",
        b"1e+",
        b"[1 2]",
        b"{\"a\" 1}",
        b"{\"a\":}",
        b"{1:2}",
        b"\"unterminated",
        b"\"bad\\x escape\"",
        b"nul",
        b"truth",
        b"falsey",
        b"[1]x",
        b"{}{}",
    ] {
        assert_rejected(doc);
    }
}
