//! The callback surface an embedder implements to receive parse events.

/// Receives parse events as they are recognized.
///
/// Every method has a no-op default, so an embedder only overrides the
/// handful it cares about. All methods return `Result<(), Self::Error>`;
/// an `Err` aborts the in-progress `push`/`finalize` call with
/// [`Stop::Aborted`](crate::Stop::Aborted), leaving parser state exactly as
/// it was before that call (the same guarantee a malformed-input error
/// gives).
///
/// String values arrive as zero or more [`string_chunk`](Sink::string_chunk)
/// calls bracketed by [`string_begin`](Sink::string_begin)/
/// [`string_end`](Sink::string_end); each chunk borrows a slice either of
/// the caller's own input buffer or of a small stack-local scratch buffer
/// (for decoded escapes), never an owned allocation made by this crate.
pub trait Sink {
    type Error;

    fn null(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn bool(&mut self, _value: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn int(&mut self, _value: i64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn double(&mut self, _value: f64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn string_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `data` is a borrow, valid only for the duration of this call; copy it
    /// out if it needs to outlive the call.
    fn string_chunk(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn string_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn object_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn object_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn array_begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn array_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// An integer literal's magnitude overflowed `i64`. Called only when
    /// [`ParserConfig::bignum`](crate::parser::ParserConfig::bignum) is
    /// enabled; otherwise the overflow is reported as
    /// [`ErrorCode::IntOverflow`](crate::ErrorCode::IntOverflow) instead.
    ///
    /// `initial_magnitude` is the value accumulated before the overflowing
    /// digit, `negative` reflects a leading `-`. Zero or more
    /// [`big_int_chunk`](Sink::big_int_chunk) calls follow, each carrying
    /// raw ASCII digit bytes, terminated by
    /// [`big_int_end`](Sink::big_int_end).
    fn big_int_begin(&mut self, _initial_magnitude: i64, _negative: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn big_int_chunk(&mut self, _digits: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn big_int_end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A [`Sink`] that records nothing and never fails, for tests that only
/// care whether `push`/`finalize` themselves succeeded.
#[derive(Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    type Error = std::convert::Infallible;
}
