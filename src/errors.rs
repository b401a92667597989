use thiserror::Error;

/// Errors reported while decoding record data.
///
/// All of these are recoverable by the caller; the decoders never panic on
/// resolver-supplied bytes. A failed decode leaves the [`QueryResult`]
/// untouched, so the caller may re-query and try again.
///
/// [`QueryResult`]: crate::QueryResult
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The numeric type code has no entry in the type registry.
    #[error("unsupported record type ({0})")]
    UnknownType(u16),

    /// The RDATA sequence was empty, but the decoder needs at least one record.
    #[error("no records to decode")]
    NoData,

    /// A field extended past the end of its record, or the record used an
    /// encoding (such as a compressed name) that cannot appear in RDATA.
    #[error("malformed record: {0}")]
    Malformed(String),
}

#[macro_export]
macro_rules! malformed {
    ($($arg:tt)*) => {
        Err($crate::DecodeError::Malformed(format!($($arg)*)))
    };
}
