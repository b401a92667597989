use crate::resource::RData;
use num_traits::FromPrimitive;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// Resource Record Type, for example A, MX or DNSKEY.
///
/// This doubles as the type registry: the numeric discriminant is the wire
/// code, the variant name is the canonical mnemonic, and the derived
/// `Display`/`FromStr`/`FromPrimitive` impls provide both lookup directions.
//
// When adding a Type, a decoder must be added in resource.rs.
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u16)]
pub enum Type {
    /// IPv4 Address.
    A = 1,
    NS = 2,
    CNAME = 5,
    SOA = 6,

    /// Domain name pointer.
    PTR = 12,

    /// Mail exchange.
    MX = 15,

    /// Text strings.
    TXT = 16,

    /// IPv6 Address.
    AAAA = 28,

    /// Non-terminal name redirection. See [rfc6672].
    ///
    /// [rfc6672]: https://datatracker.ietf.org/doc/html/rfc6672
    DNAME = 39,

    /// Delegation Signer. See [rfc4034].
    ///
    /// [rfc4034]: https://datatracker.ietf.org/doc/html/rfc4034
    DS = 43,
    RRSIG = 46,
    DNSKEY = 48,

    /// See [rfc5155].
    ///
    /// [rfc5155]: https://datatracker.ietf.org/doc/html/rfc5155
    NSEC3PARAM = 51,

    /// Certification Authority Authorization. See [rfc8659].
    ///
    /// [rfc8659]: https://datatracker.ietf.org/doc/html/rfc8659
    CAA = 257,
}

/// A registry lookup key: a numeric type code, or a mnemonic in any case.
///
/// Numeric strings such as `"28"` are accepted wherever a code is.
#[derive(Copy, Clone, Debug)]
pub enum TypeKey<'a> {
    Code(u16),
    Name(&'a str),
}

impl From<u16> for TypeKey<'static> {
    fn from(code: u16) -> Self {
        TypeKey::Code(code)
    }
}

impl<'a> From<&'a str> for TypeKey<'a> {
    fn from(name: &'a str) -> Self {
        TypeKey::Name(name)
    }
}

impl From<Type> for TypeKey<'static> {
    fn from(r#type: Type) -> Self {
        TypeKey::Code(r#type as u16)
    }
}

impl Type {
    /// Normalises `key` and looks it up in the registry.
    fn lookup(key: TypeKey) -> Option<Type> {
        match key {
            TypeKey::Code(code) => FromPrimitive::from_u16(code),
            TypeKey::Name(name) => {
                // A numeric string is treated as a code, not a mnemonic.
                if let Ok(code) = name.parse::<u16>() {
                    return FromPrimitive::from_u16(code);
                }
                Type::from_str(&name.to_ascii_uppercase()).ok()
            }
        }
    }

    /// Returns the canonical numeric code for `key`, or `None` when the
    /// registry has no matching entry.
    ///
    /// ```rust
    /// use rrdata::Type;
    ///
    /// assert_eq!(Type::to_code("aaaa"), Some(28));
    /// assert_eq!(Type::to_code(28), Some(28));
    /// assert_eq!(Type::to_code("bogus"), None);
    /// ```
    pub fn to_code<'a>(key: impl Into<TypeKey<'a>>) -> Option<u16> {
        Type::lookup(key.into()).map(|t| t as u16)
    }

    /// Returns the registry entry for `key`, or `None` when there is none.
    /// The `Display` of the returned type is the canonical uppercase mnemonic.
    pub fn to_name<'a>(key: impl Into<TypeKey<'a>>) -> Option<Type> {
        Type::lookup(key.into())
    }
}

/// One lookup's answer, as handed over by the external validating resolver.
///
/// Everything except `rtype` and `rdata` is resolver output and is treated as
/// read-only here; [`decode`](QueryResult::decode) fills in those two fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    /// The fully-qualified name that was queried.
    pub qname: String,
    pub qtype: u16,
    pub qclass: u16,

    /// Response code from the resolver.
    pub rcode: u16,

    /// The answer validated as signed (DNSSEC).
    pub secure: bool,

    /// Validation was attempted and failed.
    pub bogus: bool,
    pub nxdomain: bool,

    /// The answer carries records of the queried type.
    pub havedata: bool,

    /// Raw RDATA payloads, one per returned resource record, in answer order.
    pub data: Vec<Vec<u8>>,

    /// Resolved type mnemonic, set by [`decode`](QueryResult::decode).
    pub rtype: Option<Type>,

    /// Decoded records, set by [`decode`](QueryResult::decode).
    pub rdata: Option<RData>,
}

impl QueryResult {
    pub fn new(qname: &str, qtype: u16, qclass: u16) -> QueryResult {
        QueryResult {
            qname: qname.to_string(),
            qtype,
            qclass,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: &[(&str, u16)] = &[
        ("A", 1),
        ("NS", 2),
        ("CNAME", 5),
        ("SOA", 6),
        ("PTR", 12),
        ("MX", 15),
        ("TXT", 16),
        ("AAAA", 28),
        ("DNAME", 39),
        ("DS", 43),
        ("RRSIG", 46),
        ("DNSKEY", 48),
        ("NSEC3PARAM", 51),
        ("CAA", 257),
    ];

    #[test]
    fn registry_is_a_bijection() {
        for (name, code) in SUPPORTED {
            let t = Type::to_name(*code).unwrap();
            assert_eq!(t.to_string(), *name);
            assert_eq!(Type::to_code(*name), Some(*code));
            assert_eq!(Type::to_code(t), Some(*code));
        }
    }

    #[test]
    fn lookup_normalises_case_and_numbers() {
        assert_eq!(Type::to_code("a"), Some(1));
        assert_eq!(Type::to_code("A"), Some(1));
        assert_eq!(Type::to_code(1), Some(1));
        assert_eq!(Type::to_code("1"), Some(1));
        assert_eq!(Type::to_name("rrsig"), Some(Type::RRSIG));
        assert_eq!(Type::to_name("46"), Some(Type::RRSIG));
    }

    #[test]
    fn unknown_keys_are_not_an_error() {
        assert_eq!(Type::to_code("bogus"), None);
        assert_eq!(Type::to_code(""), None);
        assert_eq!(Type::to_code(255), None);
        assert_eq!(Type::to_code("65535"), None);
        assert_eq!(Type::to_name(0), None);
    }
}
