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
use crate::mod_utf8::{decode_text, modified_utf8_to_string, string_to_modified_utf8, MUTFError};

#[test]
fn supplementary_as_surrogate_pair() {
    // U+1F600 is D83D DE00 in UTF-16
    let bytes = [0b11101101, 0b10100000, 0b10111101, 0b11101101, 0b10111000, 0b10000000];
    assert_eq!(string_to_modified_utf8("\u{1F600}"), bytes);
    assert_eq!(modified_utf8_to_string(&bytes).unwrap(), "\u{1F600}");
}

#[test]
fn three_and_two_bytes() {
    assert_eq!(string_to_modified_utf8("Ｔ"), vec![0b11101111, 0b10111100, 0b10110100]);
    assert_eq!(modified_utf8_to_string(&[0b11001110, 0b10101001]).unwrap(), "Ω");
}

#[test]
fn nul_is_two_bytes() {
    assert_eq!(string_to_modified_utf8("a\0"), vec![b'a', 0b11000000, 0b10000000]);
    assert_eq!(decode_text(&[b'a', 0b11000000, 0b10000000]).unwrap(), "a\0");
}

#[test]
fn ascii_unchanged() {
    assert_eq!(string_to_modified_utf8("abcde"), b"abcde".to_vec());
    assert_eq!(decode_text(b"").unwrap(), "");
}

#[test]
fn decode_text_prefers_standard_utf8() {
    assert_eq!(decode_text("\u{1F600}".as_bytes()).unwrap(), "\u{1F600}");
}

#[test]
fn malformed() {
    assert!(matches!(
        modified_utf8_to_string(&[b'a', 0b11100010, 0b10000000]),
        Err(MUTFError::PartialCharacterAtEnd)
    ));
    assert!(matches!(
        modified_utf8_to_string(&[0b11001110, b'a']),
        Err(MUTFError::AroundByte(1))
    ));
    assert!(matches!(
        modified_utf8_to_string(&[0xF0, 0x9F, 0x98, 0x80]),
        Err(MUTFError::AroundByte(0))
    ));
    // high surrogate alone
    assert!(matches!(
        decode_text(&[0b11101101, 0b10100000, 0b10111101]),
        Err(MUTFError::UnpairedSurrogate(_))
    ));
}
