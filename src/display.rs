//! Implements the Display trait for the various types, so they output
//! in `dig` style.

use crate::resource::RData;
use crate::resource::CAA;
use crate::resource::DNSKEY;
use crate::resource::DS;
use crate::resource::MX;
use crate::resource::NSEC3PARAM;
use crate::resource::RRSIG;
use crate::resource::SOA;
use crate::types::QueryResult;
use std::fmt;

fn fmt_each<T: fmt::Display>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RData::A(addrs) => fmt_each(f, addrs),
            RData::AAAA(addrs) => fmt_each(f, addrs),
            RData::CAA(records) => fmt_each(f, records),
            RData::CNAME(names) => fmt_each(f, names),
            RData::DNAME(name) => name.fmt(f),
            RData::DNSKEY(records) => fmt_each(f, records),
            RData::DS(ds) => ds.fmt(f),
            RData::MX(records) => fmt_each(f, records),
            RData::NS(names) => fmt_each(f, names),
            RData::NSEC3PARAM(records) => fmt_each(f, records),
            RData::PTR(names) => fmt_each(f, names),
            RData::RRSIG(records) => fmt_each(f, records),
            RData::SOA(soa) => soa.fmt(f),
            RData::TXT(txts) => {
                for (i, txt) in txts.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "\"{}\"", txt)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for CAA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.flags, self.tag, self.value)
    }
}

impl fmt::Display for DNSKEY {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{flags} {protocol} {algorithm} {key} ; {key_type} {algorithm_name}, key id = {key_tag}",
            flags = self.flags,
            protocol = self.protocol,
            algorithm = self.algorithm,
            key = self.public_key,
            key_type = self.key_type,
            algorithm_name = self.algorithm_name,
            key_tag = self.key_tag,
        )
    }
}

impl fmt::Display for DS {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key_tag, self.algorithm, self.digest_type, self.digest
        )
    }
}

impl fmt::Display for MX {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

impl fmt::Display for NSEC3PARAM {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.algorithm, self.flags, self.iterations, self.salt
        )
    }
}

impl fmt::Display for RRSIG {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{type_name} {algorithm} {labels} {expiration} {inception} {key_tag} {signer} {signature}",
            type_name = self.type_name,
            algorithm = self.algorithm,
            labels = self.labels,
            expiration = self.expiration,
            inception = self.inception,
            key_tag = self.key_tag,
            signer = self.signer,
            signature = self.signature,
        )
    }
}

impl fmt::Display for SOA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{mname} {rname} {serial} {refresh} {retry} {expire}",
            mname = self.mname,
            rname = self.rname,
            serial = self.serial,
            refresh = self.refresh,
            retry = self.retry,
            expire = self.expire,
        )
    }
}

/// Displays this result in a format resembling `dig` output.
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut flags = String::new();

        if self.secure {
            flags.push_str(" secure")
        }
        if self.bogus {
            flags.push_str(" bogus")
        }
        if self.nxdomain {
            flags.push_str(" nxdomain")
        }
        if self.havedata {
            flags.push_str(" havedata")
        }

        let rtype = match self.rtype {
            Some(t) => t.to_string(),
            None => format!("TYPE{}", self.qtype),
        };

        writeln!(
            f,
            ";; {name} {rtype} rcode: {rcode}, flags:{flags}",
            name = self.qname,
            rtype = rtype,
            rcode = self.rcode,
            flags = flags,
        )?;

        if let Some(rdata) = &self.rdata {
            writeln!(f, "{}", rdata)?;
        }

        Ok(())
    }
}
