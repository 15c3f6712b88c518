//! Shared event-recording sink for integration tests.

use jsonpush::Sink;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    StringBegin,
    StringChunk(Vec<u8>),
    StringEnd,
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    BigIntBegin(i64, bool),
    BigIntChunk(Vec<u8>),
    BigIntEnd,
}

/// A [`Sink`] that records every event it receives, for asserting against an
/// expected sequence in tests. Never fails on its own; a test that wants to
/// exercise cooperative cancellation should implement its own `Sink`.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl Sink for RecordingSink {
    type Error = std::convert::Infallible;

    fn null(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::Null);
        Ok(())
    }

    fn bool(&mut self, value: bool) -> Result<(), Self::Error> {
        self.events.push(Event::Bool(value));
        Ok(())
    }

    fn int(&mut self, value: i64) -> Result<(), Self::Error> {
        self.events.push(Event::Int(value));
        Ok(())
    }

    fn double(&mut self, value: f64) -> Result<(), Self::Error> {
        self.events.push(Event::Double(value));
        Ok(())
    }

    fn string_begin(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::StringBegin);
        Ok(())
    }

    fn string_chunk(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.events.push(Event::StringChunk(data.to_vec()));
        Ok(())
    }

    fn string_end(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::StringEnd);
        Ok(())
    }

    fn object_begin(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::ObjectBegin);
        Ok(())
    }

    fn object_end(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::ObjectEnd);
        Ok(())
    }

    fn array_begin(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::ArrayBegin);
        Ok(())
    }

    fn array_end(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::ArrayEnd);
        Ok(())
    }

    fn big_int_begin(&mut self, initial_magnitude: i64, negative: bool) -> Result<(), Self::Error> {
        self.events.push(Event::BigIntBegin(initial_magnitude, negative));
        Ok(())
    }

    fn big_int_chunk(&mut self, digits: &[u8]) -> Result<(), Self::Error> {
        self.events.push(Event::BigIntChunk(digits.to_vec()));
        Ok(())
    }

    fn big_int_end(&mut self) -> Result<(), Self::Error> {
        self.events.push(Event::BigIntEnd);
        Ok(())
    }
}

impl RecordingSink {
    /// Collapses every run of adjacent `StringChunk` events into one, so
    /// assertions don't need to know exactly how a chunk boundary landed.
    pub fn merged_string_chunks(&self) -> Vec<Event> {
        let mut merged: Vec<Event> = Vec::new();
        for event in &self.events {
            if let (Event::StringChunk(data), Some(Event::StringChunk(prev))) = (event, merged.last_mut()) {
                prev.extend_from_slice(data);
            } else {
                merged.push(event.clone());
            }
        }
        merged
    }
}

/// Runs `source` through a fresh parser in one shot, returning the recorded
/// event sequence with adjacent string chunks merged.
pub fn parse_events(source: &[u8]) -> Vec<Event> {
    use jsonpush::{Parser, ParserConfig, StaticStack};

    let mut parser = Parser::new(StaticStack::<16>::new(), RecordingSink::default(), ParserConfig::new());
    parser.push(source).expect("push failed");
    parser.finalize().expect("finalize failed");
    parser.into_sink().merged_string_chunks()
}

/// Runs `source` through a fresh parser split into `chunk_size`-byte pushes
/// (the last chunk may be shorter), returning the recorded event sequence
/// with adjacent string chunks merged.
pub fn parse_events_chunked(source: &[u8], chunk_size: usize) -> Vec<Event> {
    use jsonpush::{Parser, ParserConfig, StaticStack};

    let mut parser = Parser::new(StaticStack::<16>::new(), RecordingSink::default(), ParserConfig::new());
    for chunk in source.chunks(chunk_size.max(1)) {
        parser.push(chunk).expect("push failed");
    }
    parser.finalize().expect("finalize failed");
    parser.into_sink().merged_string_chunks()
}
