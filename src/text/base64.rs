use crate::{Error, ErrorKind};

const URL_SAFE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

#[inline]
fn sextet(byte: u8) -> Option<u32> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'-' | b'+' => 62,
        b'_' | b'/' => 63,
        _ => return None,
    };
    Some(u32::from(value))
}

/// Encode with the URL safe alphabet and padding
///
/// ```
/// use robtop::text::encode_base64;
/// assert_eq!(encode_base64(b"Hello?"), "SGVsbG8_");
/// assert_eq!(encode_base64(b"ab"), "YWI=");
/// ```
pub fn encode_base64(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() + 2) / 3 * 4);
    for chunk in data.chunks(3) {
        let b = [
            chunk[0],
            chunk.get(1).copied().unwrap_or(0),
            chunk.get(2).copied().unwrap_or(0),
        ];
        let n = (u32::from(b[0]) << 16) | (u32::from(b[1]) << 8) | u32::from(b[2]);
        let symbols = chunk.len() + 1;
        for i in 0..4 {
            if i < symbols {
                let idx = (n >> (18 - 6 * i)) & 0x3f;
                out.push(char::from(URL_SAFE[idx as usize]));
            } else {
                out.push('=');
            }
        }
    }
    out
}

/// Decode base64 in either alphabet where the padding may be missing or
/// incomplete, as is common in level descriptions
///
/// ```
/// use robtop::text::decode_base64;
/// assert_eq!(decode_base64("SGVsbG8_").unwrap(), b"Hello?");
/// assert_eq!(decode_base64("YWI").unwrap(), b"ab");
/// assert_eq!(decode_base64("YWI=").unwrap(), b"ab");
/// ```
pub fn decode_base64(text: &str) -> Result<Vec<u8>, Error> {
    let data = text.trim_end_matches('=').as_bytes();
    let mut out = Vec::with_capacity(data.len() * 3 / 4);
    let mut acc = 0u32;
    let mut bits = 0u32;
    for (position, &byte) in data.iter().enumerate() {
        let value = sextet(byte).ok_or(Error::new(ErrorKind::Base64 { position }))?;
        acc = (acc << 6) | value;
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            out.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }

    // a single dangling symbol can't encode a byte
    if data.len() % 4 == 1 {
        return Err(Error::new(ErrorKind::Base64 {
            position: data.len() - 1,
        }));
    }

    Ok(out)
}

/// Decode base64 text that holds a UTF-8 string
pub fn decode_base64_str(text: &str) -> Result<String, Error> {
    let data = decode_base64(text)?;
    String::from_utf8(data).map_err(|e| Error::new(ErrorKind::Utf8 { offset: e.utf8_error().valid_up_to() }))
}
