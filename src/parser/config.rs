//! Runtime configuration, replacing the reference library's compile-time
//! preprocessor options with ordinary fields set once at construction.

/// Toggles that used to be `#define`s in the reference C library.
///
/// `STATIC_STACK_SIZE`/`DYNAMIC_STACK` became the
/// [`ContainerStack`](crate::stack::ContainerStack) type parameter instead
/// of a field here, since they change the parser's shape rather than its
/// behavior.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    /// Validate UTF-8 shortest-form encoding inside string literals.
    /// Disabling this trades correctness for a few percent of throughput on
    /// input already known to be valid UTF-8; defaults to `true`.
    pub validate_utf8: bool,
    /// Route integer literals that overflow `i64` to
    /// [`Sink::big_int_begin`](crate::event::Sink::big_int_begin)/
    /// `big_int_chunk`/`big_int_end` instead of failing with
    /// [`ErrorCode::IntOverflow`](crate::ErrorCode::IntOverflow). Defaults
    /// to `false`.
    pub bignum: bool,
}

impl ParserConfig {
    pub const fn new() -> Self {
        ParserConfig {
            validate_utf8: true,
            bignum: false,
        }
    }

    pub const fn with_validate_utf8(mut self, validate_utf8: bool) -> Self {
        self.validate_utf8 = validate_utf8;
        self
    }

    pub const fn with_bignum(mut self, bignum: bool) -> Self {
        self.bignum = bignum;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
