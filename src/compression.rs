//! The transform that sits between a save file on disk and its property list
//!
//! The game stores saves as gzip compressed, URL safe base64 text that may
//! additionally be xored with a single byte key. Level data inside a save
//! uses the same framing without the xor.
use crate::Error;

/// A reversible transform applied to save data before parsing and after
/// writing
pub trait SaveCodec {
    fn decode(&self, data: &[u8], apply_xor: bool) -> Result<Vec<u8>, Error>;
    fn encode(&self, data: &[u8], apply_xor: bool) -> Result<Vec<u8>, Error>;
}

/// Passes data through untouched, for saves that were already decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl SaveCodec for Identity {
    fn decode(&self, data: &[u8], _apply_xor: bool) -> Result<Vec<u8>, Error> {
        Ok(data.to_vec())
    }

    fn encode(&self, data: &[u8], _apply_xor: bool) -> Result<Vec<u8>, Error> {
        Ok(data.to_vec())
    }
}

#[cfg(feature = "compression")]
pub use self::game::GameCodec;

#[cfg(feature = "compression")]
mod game {
    use super::SaveCodec;
    use crate::text::{decode_base64, encode_base64};
    use crate::{Error, ErrorKind};
    use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Read, Write};

    const SAVE_KEY: u8 = 11;

    fn xor(data: &mut [u8]) {
        for byte in data {
            *byte ^= SAVE_KEY;
        }
    }

    fn compression_error(e: impl std::fmt::Display) -> Error {
        Error::new(ErrorKind::Compression(e.to_string()))
    }

    fn read_all(mut reader: impl Read) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::new();
        reader.read_to_end(&mut out)?;
        Ok(out)
    }

    /// Data written by the game is gzip, but older saves and level strings
    /// can be zlib or raw deflate streams
    fn decompress(data: &[u8]) -> Result<Vec<u8>, Error> {
        if let Ok(out) = read_all(GzDecoder::new(data)) {
            return Ok(out);
        }

        if let Ok(out) = read_all(ZlibDecoder::new(data)) {
            return Ok(out);
        }

        read_all(DeflateDecoder::new(data)).map_err(compression_error)
    }

    fn compress(data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).map_err(compression_error)?;
        encoder.finish().map_err(compression_error)
    }

    /// The framing the game uses on disk: optional xor with key 11, URL safe
    /// base64, then gzip
    ///
    /// ```
    /// use robtop::compression::{GameCodec, SaveCodec};
    ///
    /// let data = b"<?xml version=\"1.0\"?><plist version=\"1.0\" gjver=\"2.0\"><dict /></plist>";
    /// let encoded = GameCodec.encode(data, true).unwrap();
    /// assert_eq!(GameCodec.decode(&encoded, true).unwrap(), &data[..]);
    /// ```
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct GameCodec;

    impl SaveCodec for GameCodec {
        fn decode(&self, data: &[u8], apply_xor: bool) -> Result<Vec<u8>, Error> {
            let mut data = data.to_vec();
            if apply_xor {
                xor(&mut data);
            }

            // saves can end in padding nulls or a newline
            let end = data
                .iter()
                .rposition(|&x| x != 0 && !x.is_ascii_whitespace())
                .map_or(0, |x| x + 1);
            let text = std::str::from_utf8(&data[..end]).map_err(|e| {
                Error::new(ErrorKind::Utf8 {
                    offset: e.valid_up_to(),
                })
            })?;

            log::trace!("decoding {} bytes of save data", text.len());
            decompress(&decode_base64(text)?)
        }

        fn encode(&self, data: &[u8], apply_xor: bool) -> Result<Vec<u8>, Error> {
            let mut out = encode_base64(&compress(data)?).into_bytes();
            if apply_xor {
                xor(&mut out);
            }
            Ok(out)
        }
    }

}
