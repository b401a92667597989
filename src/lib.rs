//! Decoding of DNS resource record data (RDATA) into typed records.
//!
//! An external validating resolver hands over, per lookup, the query
//! name/type/class, its response flags, and the raw RDATA bytes of every
//! answered record. This crate resolves the numeric query type through the
//! type registry, decodes each RDATA payload per the RFC 1035/3596/4034/
//! 6672/8659 wire formats, and attaches the structured records back onto
//! the result. Full DNS messages (headers, sections, compression pointers)
//! are out of scope.
//!
//! # Examples
//!
//! ```rust
//! use rrdata::{QueryResult, RData, Type};
//!
//! // An A lookup answered with one record, as handed over by the resolver.
//! let mut result = QueryResult::new("example.com.", 1, 1);
//! result.havedata = true;
//! result.data.push(vec![91, 154, 209, 1]);
//!
//! result.decode().expect("valid A record");
//!
//! assert_eq!(result.rtype, Some(Type::A));
//! assert_eq!(result.rdata, Some(RData::A(vec!["91.154.209.1".to_string()])));
//! ```

mod display;
mod errors;
mod io;
mod keytag;
pub mod resource;
pub mod types;

#[macro_use]
extern crate num_derive;

pub use crate::errors::DecodeError;
pub use crate::keytag::key_tag;
pub use crate::resource::decode;

// Pull up the various types that should be on the front page of the docs.
#[doc(inline)]
pub use crate::resource::RData;
#[doc(inline)]
pub use crate::types::QueryResult;
#[doc(inline)]
pub use crate::types::Type;
#[doc(inline)]
pub use crate::types::TypeKey;
