//! DNSSEC key tag calculation, as defined by [rfc4034] Appendix B.
//!
//! [rfc4034]: https://datatracker.ietf.org/doc/html/rfc4034

use crate::malformed;
use crate::DecodeError;

/// Computes the key tag over a DNSKEY's full RDATA.
///
/// Algorithm 1 (RSA/MD5) keys keep the legacy form from Appendix B.1: the
/// big-endian 16-bit value held in the two octets just before the final
/// octet of the RDATA. Every other algorithm uses the checksum over the
/// whole RDATA, folding the carry back into the low 16 bits.
pub fn key_tag(rdata: &[u8], algorithm: u8) -> Result<u16, DecodeError> {
    if algorithm == 1 {
        if rdata.len() < 4 {
            return malformed!(
                "DNSKEY rdata too short ({} bytes) for an RSA/MD5 key tag",
                rdata.len()
            );
        }
        let hi = rdata[rdata.len() - 3];
        let lo = rdata[rdata.len() - 2];
        return Ok(u16::from(hi) << 8 | u16::from(lo));
    }

    // Sum big-endian 16-bit words; an odd trailing byte is the high byte of
    // a final word.
    let mut ac: u32 = 0;
    for (i, b) in rdata.iter().enumerate() {
        ac += u32::from(*b) << if i & 1 == 0 { 8 } else { 0 };
    }
    ac += ac >> 16;
    Ok((ac & 0xFFFF) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The DNSKEY from rfc4034 section 5.4 / Appendix B, key id 60485.
    const RFC4034_KEY: &str = "AQOeiiR0GOMYkDshWoSKz9Xz\
                               fwJr1AYtsmx3TGkJaNXVbfi/\
                               2pHm822aJ5iI9BMzNXxeYCmZ\
                               DRD99WYwYqUSdjMmmAphXdvx\
                               egXd/M5+X7OrzKBaMbCVdFLU\
                               Uh6DhweJBjEVv5f2wwjM9Xzc\
                               nOf+EPbtG9DMBmADjFDc2w/r\
                               ljwvFw==";

    fn rfc4034_rdata() -> Vec<u8> {
        // flags 256, protocol 3, algorithm 5 (RSASHA1)
        let mut rdata = vec![0x01, 0x00, 0x03, 0x05];
        rdata.extend(base64::decode(RFC4034_KEY).unwrap());
        rdata
    }

    #[test]
    fn rfc4034_appendix_b_example() {
        assert_eq!(key_tag(&rfc4034_rdata(), 5).unwrap(), 60485);
    }

    #[test]
    fn rsamd5_uses_the_modulus_octets() {
        let rdata = [0x01, 0x00, 0x03, 0x01, 0xAB, 0xCD, 0xEF];
        assert_eq!(key_tag(&rdata, 1).unwrap(), 0xABCD);
    }

    #[test]
    fn rsamd5_needs_four_bytes() {
        assert!(matches!(
            key_tag(&[0x01, 0x00, 0x03], 1),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn odd_length_is_padded_as_high_byte() {
        // 0x01FF + 0x0200 = 0x03FF, no carry to fold.
        assert_eq!(key_tag(&[0x01, 0xFF, 0x02], 8).unwrap(), 0x03FF);
    }

    #[test]
    fn carry_folds_back_into_the_low_word() {
        // 256 * 0xFFFF = 0xFFFF00, fold: 0xFF00 + 0xFF = 0xFFFF.
        let rdata = vec![0xFF; 512];
        assert_eq!(key_tag(&rdata, 8).unwrap(), 0xFFFF);
    }
}
