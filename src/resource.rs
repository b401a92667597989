//! Typed resource records and the decoders that build them from raw RDATA.
//!
//! Each decoder consumes the ordered RDATA sequence of a [`QueryResult`] and
//! produces one structured value per record (or a single value for the
//! first-record-only types DNAME, DS and SOA), preserving answer order.

use crate::io::{RDataRead, SeekExt};
use crate::keytag::key_tag;
use crate::malformed;
use crate::types::{QueryResult, Type};
use crate::DecodeError;
use chrono::{TimeZone, Utc};
use log::debug;
use num_traits::FromPrimitive;
use std::io::Cursor;
use strum_macros::Display;

/// CAA property, [rfc8659](https://datatracker.ietf.org/doc/html/rfc8659).
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct CAA {
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

/// DNSKEY, [rfc4034](https://datatracker.ietf.org/doc/html/rfc4034) section 2.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct DNSKEY {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,

    /// Public key, base64.
    pub public_key: String,

    /// "ZSK" for flags 256, "KSK" for flags 257, "other" otherwise.
    pub key_type: &'static str,

    /// Key tag over the full RDATA, per rfc4034 Appendix B.
    pub key_tag: u16,

    /// Mnemonic for `algorithm`, "unknown" when unassigned.
    pub algorithm_name: String,
}

/// Delegation Signer, [rfc4034](https://datatracker.ietf.org/doc/html/rfc4034) section 5.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct DS {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,

    /// Digest, uppercase hex.
    pub digest: String,
}

/// Mail exchange, [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035).
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct MX {
    pub preference: u16,
    pub exchange: String,
}

/// NSEC3 parameters, [rfc5155](https://datatracker.ietf.org/doc/html/rfc5155) section 4.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct NSEC3PARAM {
    pub algorithm: u8,
    pub flags: u8,
    pub iterations: u16,

    /// Salt, uppercase hex, or `-` when empty.
    pub salt: String,
}

/// RRSIG, [rfc4034](https://datatracker.ietf.org/doc/html/rfc4034) section 3.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct RRSIG {
    pub type_covered: u16,

    /// Mnemonic for `type_covered`, or the numeric code when unknown.
    pub type_name: String,
    pub algorithm: u8,
    pub labels: u8,

    /// Signature expiration, UTC, `YYYYMMDDHHMMSS`.
    pub expiration: String,

    /// Signature inception, UTC, `YYYYMMDDHHMMSS`.
    pub inception: String,
    pub key_tag: u16,
    pub signer: String,

    /// Signature, base64.
    pub signature: String,
}

/// Start of authority, [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035).
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub struct SOA {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
}

/// Decoded record data: one variant per supported record type, holding the
/// structured values for every record in the answer, in answer order.
// This should be kept in sync with Type.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum RData {
    A(Vec<String>),
    AAAA(Vec<String>),
    CAA(Vec<CAA>),
    CNAME(Vec<String>),
    DNAME(String),
    DNSKEY(Vec<DNSKEY>),
    DS(DS),
    MX(Vec<MX>),
    NS(Vec<String>),
    NSEC3PARAM(Vec<NSEC3PARAM>),
    PTR(Vec<String>),
    RRSIG(Vec<RRSIG>),
    SOA(SOA),
    TXT(Vec<String>),
}

/// DNSSEC algorithm numbers, [rfc4034] Appendix A.1 and later assignments.
///
/// [rfc4034]: https://datatracker.ietf.org/doc/html/rfc4034
#[derive(Copy, Clone, Debug, Display, FromPrimitive, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
pub enum Algorithm {
    RSAMD5 = 1,
    DH = 2,
    DSA = 3,
    RSASHA1 = 5,
    #[strum(serialize = "DSA-NSEC3-SHA1")]
    DSANSEC3SHA1 = 6,
    #[strum(serialize = "RSASHA1-NSEC3-SHA1")]
    RSASHA1NSEC3SHA1 = 7,
    RSASHA256 = 8,
    RSASHA512 = 10,
    #[strum(serialize = "ECC-GOST")]
    ECCGOST = 12,
    ECDSAP256SHA256 = 13,
    ECDSAP384SHA384 = 14,
    ED25519 = 15,
    ED448 = 16,
}

fn algorithm_name(algorithm: u8) -> String {
    match Algorithm::from_u8(algorithm) {
        Some(a) => a.to_string(),
        None => "unknown".to_string(),
    }
}

// RRSIG times are unsigned 32-bit seconds since the epoch (rfc4034 section 3.1.5),
// so every value renders; the fallback keeps the function total anyway.
fn sig_time(secs: u32) -> String {
    match Utc.timestamp_opt(i64::from(secs), 0).single() {
        Some(t) => t.format("%Y%m%d%H%M%S").to_string(),
        None => secs.to_string(),
    }
}

fn decode_a(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut addrs = Vec::with_capacity(data.len());
    for raw in data {
        if raw.len() != 4 {
            return malformed!("invalid A record length ({}) expected 4", raw.len());
        }
        let mut cur = Cursor::new(raw.as_slice());
        addrs.push(cur.read_ipv4()?);
    }
    Ok(RData::A(addrs))
}

fn decode_aaaa(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut addrs = Vec::with_capacity(data.len());
    for raw in data {
        if raw.len() != 16 {
            return malformed!("invalid AAAA record length ({}) expected 16", raw.len());
        }
        let mut cur = Cursor::new(raw.as_slice());
        addrs.push(cur.read_ipv6()?);
    }
    Ok(RData::AAAA(addrs))
}

/// Decodes one domain name per record (NS, PTR, CNAME).
fn decode_names(data: &[Vec<u8>]) -> Result<Vec<String>, DecodeError> {
    let mut names = Vec::with_capacity(data.len());
    for raw in data {
        let mut cur = Cursor::new(raw.as_slice());
        let name = cur.read_qname()?;
        if cur.remaining().unwrap_or(0) != 0 {
            return malformed!("trailing bytes after domain name '{}'", name);
        }
        names.push(name);
    }
    Ok(names)
}

fn decode_caa(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut records = Vec::with_capacity(data.len());
    for raw in data {
        let mut cur = Cursor::new(raw.as_slice());
        let flags = cur.read_u8_field("CAA flags")?;
        let tag = cur.read_charstring()?;
        let value = cur.read_rest()?;

        records.push(CAA {
            flags,
            tag: String::from_utf8_lossy(&tag).into_owned(),
            value: String::from_utf8_lossy(&value).into_owned(),
        });
    }
    Ok(RData::CAA(records))
}

fn decode_dname(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let raw = data.first().ok_or(DecodeError::NoData)?;
    let mut cur = Cursor::new(raw.as_slice());
    Ok(RData::DNAME(cur.read_qname()?))
}

fn decode_dnskey(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut records = Vec::with_capacity(data.len());
    for raw in data {
        let mut cur = Cursor::new(raw.as_slice());
        let flags = cur.read_u16_field("DNSKEY flags")?;
        let protocol = cur.read_u8_field("DNSKEY protocol")?;
        let algorithm = cur.read_u8_field("DNSKEY algorithm")?;
        let public_key = cur.read_rest()?;

        // rfc4034 section 2.1.1: bit 7 is the Zone Key flag, bit 15 the
        // Secure Entry Point. The two common combinations get a label.
        let key_type = match flags {
            256 => "ZSK",
            257 => "KSK",
            _ => "other",
        };

        records.push(DNSKEY {
            flags,
            protocol,
            algorithm,
            public_key: base64::encode(&public_key),
            key_type,
            key_tag: key_tag(raw, algorithm)?,
            algorithm_name: algorithm_name(algorithm),
        });
    }
    Ok(RData::DNSKEY(records))
}

fn decode_ds(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let raw = data.first().ok_or(DecodeError::NoData)?;
    let mut cur = Cursor::new(raw.as_slice());

    let ds = DS {
        key_tag: cur.read_u16_field("DS key tag")?,
        algorithm: cur.read_u8_field("DS algorithm")?,
        digest_type: cur.read_u8_field("DS digest type")?,
        digest: hex::encode_upper(cur.read_rest()?),
    };
    Ok(RData::DS(ds))
}

fn decode_mx(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut records = Vec::with_capacity(data.len());
    for raw in data {
        let mut cur = Cursor::new(raw.as_slice());
        let preference = cur.read_u16_field("MX preference")?;
        let exchange = cur.read_qname()?;
        if cur.remaining().unwrap_or(0) != 0 {
            return malformed!("trailing bytes after MX exchange '{}'", exchange);
        }
        records.push(MX {
            preference,
            exchange,
        });
    }
    Ok(RData::MX(records))
}

fn decode_nsec3param(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut records = Vec::with_capacity(data.len());
    for raw in data {
        let mut cur = Cursor::new(raw.as_slice());
        let algorithm = cur.read_u8_field("NSEC3PARAM algorithm")?;
        let flags = cur.read_u8_field("NSEC3PARAM flags")?;
        let iterations = cur.read_u16_field("NSEC3PARAM iterations")?;
        let salt_len = cur.read_u8_field("NSEC3PARAM salt length")?;
        let salt = cur.read_field(salt_len.into(), "NSEC3PARAM salt")?;

        records.push(NSEC3PARAM {
            algorithm,
            flags,
            iterations,
            salt: if salt.is_empty() {
                "-".to_string()
            } else {
                hex::encode_upper(salt)
            },
        });
    }
    Ok(RData::NSEC3PARAM(records))
}

fn decode_rrsig(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut records = Vec::with_capacity(data.len());
    for raw in data {
        let mut cur = Cursor::new(raw.as_slice());
        let type_covered = cur.read_u16_field("RRSIG type covered")?;
        let algorithm = cur.read_u8_field("RRSIG algorithm")?;
        let labels = cur.read_u8_field("RRSIG labels")?;
        let expiration = cur.read_u32_field("RRSIG expiration")?;
        let inception = cur.read_u32_field("RRSIG inception")?;
        let tag = cur.read_u16_field("RRSIG key tag")?;
        let signer = cur.read_qname()?;
        let signature = cur.read_rest()?;

        let type_name = match Type::to_name(type_covered) {
            Some(t) => t.to_string(),
            None => type_covered.to_string(),
        };

        records.push(RRSIG {
            type_covered,
            type_name,
            algorithm,
            labels,
            expiration: sig_time(expiration),
            inception: sig_time(inception),
            key_tag: tag,
            signer,
            signature: base64::encode(&signature),
        });
    }
    Ok(RData::RRSIG(records))
}

fn decode_soa(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let raw = data.first().ok_or(DecodeError::NoData)?;
    let mut cur = Cursor::new(raw.as_slice());

    // The 32-bit minimum TTL that follows expire is not part of this
    // record's decoded shape and is left unread.
    let soa = SOA {
        mname: cur.read_qname()?,
        rname: cur.read_qname()?,
        serial: cur.read_u32_field("SOA serial")?,
        refresh: cur.read_u32_field("SOA refresh")?,
        retry: cur.read_u32_field("SOA retry")?,
        expire: cur.read_u32_field("SOA expire")?,
    };
    Ok(RData::SOA(soa))
}

fn decode_txt(data: &[Vec<u8>]) -> Result<RData, DecodeError> {
    let mut txts = Vec::with_capacity(data.len());
    for raw in data {
        let mut cur = Cursor::new(raw.as_slice());
        let txt = cur.read_charstring()?;
        txts.push(String::from_utf8_lossy(&txt).into_owned());
    }
    Ok(RData::TXT(txts))
}

impl RData {
    /// Resolves the result's query type and decodes its raw RDATA sequence.
    fn from_result(result: &QueryResult) -> Result<(Type, RData), DecodeError> {
        let rtype = match Type::to_name(result.qtype) {
            Some(t) => t,
            None => return Err(DecodeError::UnknownType(result.qtype)),
        };

        if !result.havedata || result.data.is_empty() {
            return Err(DecodeError::NoData);
        }

        debug!(
            "decoding {} {} record(s) for {}",
            result.data.len(),
            rtype,
            result.qname
        );

        let rdata = match rtype {
            Type::A => decode_a(&result.data)?,
            Type::NS => RData::NS(decode_names(&result.data)?),
            Type::CNAME => RData::CNAME(decode_names(&result.data)?),
            Type::SOA => decode_soa(&result.data)?,
            Type::PTR => RData::PTR(decode_names(&result.data)?),
            Type::MX => decode_mx(&result.data)?,
            Type::TXT => decode_txt(&result.data)?,
            Type::AAAA => decode_aaaa(&result.data)?,
            Type::DNAME => decode_dname(&result.data)?,
            Type::DS => decode_ds(&result.data)?,
            Type::RRSIG => decode_rrsig(&result.data)?,
            Type::DNSKEY => decode_dnskey(&result.data)?,
            Type::NSEC3PARAM => decode_nsec3param(&result.data)?,
            Type::CAA => decode_caa(&result.data)?,
        };

        Ok((rtype, rdata))
    }
}

impl QueryResult {
    /// Decodes this result's raw RDATA and attaches the typed records.
    ///
    /// On success `rtype` and `rdata` are set, replacing any previous value.
    /// On failure the result is left untouched and the error describes the
    /// first problem found; records are never partially decoded.
    pub fn decode(&mut self) -> Result<(), DecodeError> {
        let (rtype, rdata) = RData::from_result(self)?;
        self.rtype = Some(rtype);
        self.rdata = Some(rdata);
        Ok(())
    }
}

/// Decodes `result` in place. Convenience wrapper around
/// [`QueryResult::decode`].
pub fn decode(result: &mut QueryResult) -> Result<(), DecodeError> {
    result.decode()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(qtype: u16, data: Vec<Vec<u8>>) -> QueryResult {
        let mut result = QueryResult::new("example.com.", qtype, 1);
        result.havedata = !data.is_empty();
        result.data = data;
        result
    }

    #[test]
    fn a_records_preserve_answer_order() {
        let mut result = result_with(1, vec![vec![91, 154, 209, 1], vec![10, 0, 0, 2]]);
        result.decode().unwrap();

        assert_eq!(result.rtype, Some(Type::A));
        assert_eq!(
            result.rdata,
            Some(RData::A(vec![
                "91.154.209.1".to_string(),
                "10.0.0.2".to_string()
            ]))
        );
    }

    #[test]
    fn short_a_record_is_malformed() {
        let mut result = result_with(1, vec![vec![91, 154, 209]]);
        assert!(matches!(
            result.decode(),
            Err(DecodeError::Malformed(_))
        ));
        assert_eq!(result.rtype, None);
        assert_eq!(result.rdata, None);
    }

    #[test]
    fn unknown_type_names_the_code() {
        let mut result = result_with(255, vec![vec![0]]);
        let err = result.decode().unwrap_err();

        assert_eq!(err, DecodeError::UnknownType(255));
        assert_eq!(err.to_string(), "unsupported record type (255)");
    }

    #[test]
    fn no_data_when_resolver_answered_empty() {
        let mut result = result_with(6, vec![]);
        assert_eq!(result.decode(), Err(DecodeError::NoData));

        // havedata false wins even when bytes are present.
        let mut result = result_with(1, vec![vec![10, 0, 0, 1]]);
        result.havedata = false;
        assert_eq!(result.decode(), Err(DecodeError::NoData));
    }

    #[test]
    fn caa() {
        let mut raw = vec![0u8, 5];
        raw.extend(b"issue");
        raw.extend(b"letsencrypt.org");

        let mut result = result_with(257, vec![raw]);
        result.decode().unwrap();

        assert_eq!(
            result.rdata,
            Some(RData::CAA(vec![CAA {
                flags: 0,
                tag: "issue".to_string(),
                value: "letsencrypt.org".to_string(),
            }]))
        );
    }

    #[test]
    fn ds_uses_the_first_record_only() {
        let mut raw = 60485u16.to_be_bytes().to_vec();
        raw.push(5); // RSASHA1
        raw.push(1); // SHA-1
        raw.extend(hex::decode("2bb183af5f22588179a53b0a98631fad1a292118").unwrap());

        let mut result = result_with(43, vec![raw, vec![0, 0, 0, 0]]);
        result.decode().unwrap();

        assert_eq!(
            result.rdata,
            Some(RData::DS(DS {
                key_tag: 60485,
                algorithm: 5,
                digest_type: 1,
                digest: "2BB183AF5F22588179A53B0A98631FAD1A292118".to_string(),
            }))
        );
    }

    #[test]
    fn nsec3param() {
        let raw = vec![1, 0, 0, 10, 4, 0xAB, 0xCD, 0xEF, 0x01];
        let mut result = result_with(51, vec![raw]);
        result.decode().unwrap();

        assert_eq!(
            result.rdata,
            Some(RData::NSEC3PARAM(vec![NSEC3PARAM {
                algorithm: 1,
                flags: 0,
                iterations: 10,
                salt: "ABCDEF01".to_string(),
            }]))
        );
    }

    #[test]
    fn nsec3param_empty_salt_renders_as_dash() {
        let raw = vec![1, 0, 0, 0, 0];
        let mut result = result_with(51, vec![raw]);
        result.decode().unwrap();

        match result.rdata {
            Some(RData::NSEC3PARAM(ref records)) => assert_eq!(records[0].salt, "-"),
            ref other => panic!("expected NSEC3PARAM, got {:?}", other),
        }
    }

    #[test]
    fn mx_rejects_trailing_bytes() {
        let mut raw = 10u16.to_be_bytes().to_vec();
        raw.extend(b"\x04mail\x07example\x03com\x00");
        raw.push(0xFF);

        let mut result = result_with(15, vec![raw]);
        assert!(matches!(result.decode(), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn algorithm_names_fall_back_to_unknown() {
        assert_eq!(algorithm_name(8), "RSASHA256");
        assert_eq!(algorithm_name(6), "DSA-NSEC3-SHA1");
        assert_eq!(algorithm_name(15), "ED25519");
        assert_eq!(algorithm_name(0), "unknown");
        assert_eq!(algorithm_name(200), "unknown");
    }

    #[test]
    fn sig_time_renders_utc() {
        assert_eq!(sig_time(0), "19700101000000");
        assert_eq!(sig_time(1704067200), "20240101000000");
    }
}
