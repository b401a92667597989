//! Cursor extensions for the primitive field encodings found inside RDATA.

use crate::malformed;
use crate::DecodeError;
use byteorder::{ReadBytesExt, BE};
use std::convert::TryInto;
use std::io;
use std::io::Cursor;
use std::io::SeekFrom;
use std::net::Ipv4Addr;

pub trait SeekExt: io::Seek {
    /// Returns the number of bytes remaining to be consumed.
    /// This is used as a way to check for malformed input.
    fn remaining(&mut self) -> io::Result<u64> {
        let pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;

        // reset position
        self.seek(SeekFrom::Start(pos))?;

        Ok(len - pos)
    }
}

impl<'a> SeekExt for Cursor<&'a [u8]> {
    fn remaining(self: &mut std::io::Cursor<&'a [u8]>) -> io::Result<u64> {
        let pos = self.position() as usize;
        let len = self.get_ref().len() as usize;

        Ok(len.saturating_sub(pos).try_into().unwrap())
    }
}

/// All types that implement `Read` and `Seek` get methods defined
/// in `RDataRead` for free.
impl<R: io::Read + ?Sized + io::Seek> RDataRead for R {}

/// Extensions to io::Read for the field encodings used in record data.
///
/// Every method checks bounds before consuming and fails with
/// [`DecodeError::Malformed`] when the record is too short, so malformed
/// resolver output can never abort the process.
pub trait RDataRead: io::Read + io::Seek {
    /// Reads exactly `len` bytes of the named field.
    fn read_field(&mut self, len: usize, what: &str) -> Result<Vec<u8>, DecodeError> {
        let mut buf = vec![0; len];
        if self.read_exact(&mut buf).is_err() {
            return malformed!("truncated {} ({} bytes needed)", what, len);
        }
        Ok(buf)
    }

    fn read_u8_field(&mut self, what: &str) -> Result<u8, DecodeError> {
        match self.read_u8() {
            Ok(v) => Ok(v),
            Err(_) => malformed!("truncated {} (1 byte needed)", what),
        }
    }

    fn read_u16_field(&mut self, what: &str) -> Result<u16, DecodeError> {
        match self.read_u16::<BE>() {
            Ok(v) => Ok(v),
            Err(_) => malformed!("truncated {} (2 bytes needed)", what),
        }
    }

    fn read_u32_field(&mut self, what: &str) -> Result<u32, DecodeError> {
        match self.read_u32::<BE>() {
            Ok(v) => Ok(v),
            Err(_) => malformed!("truncated {} (4 bytes needed)", what),
        }
    }

    /// Reads everything left in the record.
    fn read_rest(&mut self) -> Result<Vec<u8>, DecodeError> {
        let mut buf = Vec::new();
        match self.read_to_end(&mut buf) {
            Ok(_) => Ok(buf),
            Err(e) => malformed!("unreadable record tail: {}", e),
        }
    }

    /// Reads a length-prefixed `<character-string>` as defined by
    /// [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035) section 3.3.
    fn read_charstring(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_u8_field("charstring length")?;
        self.read_field(len.into(), "charstring")
    }

    /// Reads an uncompressed `<domain-name>`: a run of labels terminated by
    /// the zero-length label, joined with `.` and ending in a trailing `.`.
    /// A lone zero-length label is the root name `.`.
    ///
    /// RDATA here comes from single, already-extracted records, so a
    /// compression pointer back into the enclosing message cannot be
    /// resolved and is rejected as malformed rather than mis-decoded.
    fn read_qname(&mut self) -> Result<String, DecodeError> {
        let mut qname = String::new();

        // Read each label one at a time, to build up the full domain name.
        loop {
            // Length of the next label
            let len = self.read_u8_field("label length")?;
            if len == 0 {
                if qname.is_empty() {
                    qname.push('.') // Root domain
                }
                break;
            }

            match len & 0xC0 {
                // No compression
                0x00 => {
                    let label = self.read_field(len.into(), "label")?;

                    let label = match std::str::from_utf8(&label) {
                        Err(e) => return malformed!("invalid label: {}", e),
                        Ok(s) => s,
                    };

                    if !label.is_ascii() {
                        return malformed!("invalid label '{}': not valid ascii", label);
                    }

                    qname.push_str(label);
                    qname.push('.');
                }

                // A compressed name needs the full message to resolve.
                0xC0 => return malformed!("compressed name in record data"),

                // Unknown
                _ => return malformed!("unsupported label type {0:b}", len & 0xC0),
            }
        }

        Ok(qname)
    }

    /// Reads a 4-octet IPv4 address, rendered dotted-decimal.
    fn read_ipv4(&mut self) -> Result<String, DecodeError> {
        let mut octets = [0u8; 4];
        if self.read_exact(&mut octets).is_err() {
            return malformed!("truncated address (4 bytes needed)");
        }
        Ok(Ipv4Addr::from(octets).to_string())
    }

    /// Reads a 16-octet IPv6 address, rendered as eight colon-separated hex
    /// groups. Zero runs are not compressed.
    fn read_ipv6(&mut self) -> Result<String, DecodeError> {
        let mut groups = [0u16; 8];
        for group in groups.iter_mut() {
            *group = self.read_u16_field("address group")?;
        }

        let groups: Vec<String> = groups.iter().map(|g| format!("{:x}", g)).collect();
        Ok(groups.join(":"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;

    fn cursor(buf: &[u8]) -> Cursor<&[u8]> {
        Cursor::new(buf)
    }

    #[test]
    fn charstring() {
        let buf = b"\x05hello\x05world";
        let mut cur = cursor(buf);

        assert_eq!(cur.read_charstring().unwrap(), b"hello");
        assert_eq!(cur.read_charstring().unwrap(), b"world");
        assert_eq!(cur.remaining().unwrap(), 0);
    }

    #[test]
    fn charstring_overrun() {
        let mut cur = cursor(b"\x0ahi");
        assert!(matches!(
            cur.read_charstring(),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn qname() {
        let buf = b"\x01a\x07example\x00";
        let mut cur = cursor(buf);

        assert_eq!(cur.read_qname().unwrap(), "a.example.");
        assert_eq!(cur.remaining().unwrap(), 0);
    }

    #[test]
    fn qname_root() {
        let mut cur = cursor(b"\x00");
        assert_eq!(cur.read_qname().unwrap(), ".");
    }

    #[test]
    fn qname_truncated() {
        // Label claims seven bytes, three follow.
        let mut cur = cursor(b"\x07exa");
        assert!(matches!(cur.read_qname(), Err(DecodeError::Malformed(_))));

        // Missing the terminating zero-length label.
        let mut cur = cursor(b"\x01a");
        assert!(matches!(cur.read_qname(), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn qname_rejects_compression_pointer() {
        let mut cur = cursor(b"\xc0\x0c");
        assert!(matches!(cur.read_qname(), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn ipv4() {
        let mut cur = cursor(&[91, 154, 209, 1]);
        assert_eq!(cur.read_ipv4().unwrap(), "91.154.209.1");

        let mut short = cursor(&[91, 154, 209]);
        assert!(matches!(short.read_ipv4(), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn ipv6_is_not_zero_compressed() {
        let buf = [
            0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
        ];
        let mut cur = cursor(&buf);
        assert_eq!(cur.read_ipv6().unwrap(), "2001:db8:0:0:0:0:0:1");
    }
}
