/*
    This file is part of jcpool.

    jcpool is free software: you can redistribute it and/or modify
    it under the terms of the GNU Lesser General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    jcpool is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU Lesser General Public License
    along with jcpool. (LICENSE.md)  If not, see <https://www.gnu.org/licenses/>.
*/

//! Conversion between Java's Modified UTF-8 and Rust strings.
//!
//! Class files store text as modified UTF-8: NUL is written as the two-byte sequence `C0 80`
//! and supplementary characters are written as a pair of three-byte surrogates instead of a
//! single four-byte sequence. Everything else matches standard UTF-8.
//!
//! Refer to the [JVM Spec](https://docs.oracle.com/javase/specs/jvms/se11/html/jvms-4.html#jvms-4.4.7) for more info.

use thiserror::Error;

/// An error encountered during conversion.
#[derive(Debug, Error)]
pub enum MUTFError {
    /// A multi-byte sequence was cut off by the end of the buffer.
    #[error("Malformed Input: Partial character at end")]
    PartialCharacterAtEnd,

    /// The byte at this position cannot start or continue a sequence.
    #[error("Malformed Input around byte: {0}")]
    AroundByte(usize),

    /// A surrogate code unit without its other half.
    #[error(transparent)]
    UnpairedSurrogate(#[from] std::char::DecodeUtf16Error),
}

/// Decodes the payload of a Utf8 constant.
///
/// Standard UTF-8 is accepted as is. Payloads that are not valid UTF-8 are decoded as modified
/// UTF-8, which covers the encoded NUL and surrogate pairs written by javac.
pub fn decode_text(buf: &[u8]) -> Result<String, MUTFError> {
    match std::str::from_utf8(buf) {
        Ok(s) => Ok(s.to_owned()),
        Err(_) => modified_utf8_to_string(buf),
    }
}

/// Converts a modified utf-8 sequence to an owned rust string.
pub fn modified_utf8_to_string(buf: &[u8]) -> Result<String, MUTFError> {
    // decode to UTF-16 code units first, surrogate pairs are joined afterwards
    let mut units: Vec<u16> = Vec::with_capacity(buf.len());
    let mut pos = 0;
    while pos < buf.len() {
        let b = buf[pos];
        let (unit, width) = match b >> 4 {
            0..=7 => (b as u16, 1),
            12 | 13 => {
                let b2 = continuation(buf, pos + 1)?;
                ((((b & 0x1F) as u16) << 6) | b2, 2)
            }
            14 => {
                let b2 = continuation(buf, pos + 1)?;
                let b3 = continuation(buf, pos + 2)?;
                ((((b & 0x0F) as u16) << 12) | (b2 << 6) | b3, 3)
            }
            _ => return Err(MUTFError::AroundByte(pos)),
        };
        units.push(unit);
        pos += width;
    }
    Ok(std::char::decode_utf16(units).collect::<Result<String, _>>()?)
}

#[inline]
fn continuation(buf: &[u8], pos: usize) -> Result<u16, MUTFError> {
    match buf.get(pos) {
        None => Err(MUTFError::PartialCharacterAtEnd),
        Some(&b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        Some(_) => Err(MUTFError::AroundByte(pos)),
    }
}

/// Converts a string to modified UTF-8.
///
/// This never fails: every `&str` can be represented.
pub fn string_to_modified_utf8(str: &str) -> Vec<u8> {
    let mut vec = Vec::with_capacity(str.len());
    for unit in str.encode_utf16() {
        #[allow(clippy::unusual_byte_groupings)]
        match unit {
            0x0001..=0x007F => vec.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                // 110xxxxx 10xxxxxx
                vec.push(((unit >> 6) as u8 & 0b011111) | 0b110_00000);
                vec.push((unit as u8 & 0b111111) | 0b10_000000);
            }
            _ => {
                // 1110xxxx 10xxxxxx 10xxxxxx, surrogates are written one by one
                vec.push(((unit >> 12) as u8 & 0b001111) | 0b1110_0000);
                vec.push(((unit >> 6) as u8 & 0b111111) | 0b10_000000);
                vec.push((unit as u8 & 0b111111) | 0b10_000000);
            }
        }
    }
    vec
}
