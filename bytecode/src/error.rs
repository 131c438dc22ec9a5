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
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    /// A tag byte outside of the recognized set. `offset` is the absolute position of the tag byte.
    #[error("Unrecognized constant pool tag {tag} at offset {offset:#X}")]
    UnrecognizedTag { tag: u8, offset: usize },
    /// The buffer ended inside the constant pool count or inside entry `index`.
    #[error("Unexpected end of buffer in constant pool entry #{index} starting at offset {offset:#X}")]
    Truncated { index: u16, offset: usize },
    #[error("Malformed text in constant pool entry #{index} at offset {offset:#X}: {source}")]
    Utf8 {
        index: u16,
        offset: usize,
        #[source]
        source: crate::mod_utf8::MUTFError,
    },
    /// A constant pool being built needs more index slots than a class file can declare.
    #[error("Constant pool needs {0} slots, at most 65534 fit")]
    TooManySlots(u32),
    #[error("Invalid magic number {0:#010X}, expected 0xCAFEBABE")]
    BadMagic(u32),
    #[error("Unsupported class file version {major}.{minor} ({name})")]
    UnsupportedVersion {
        major: u16,
        minor: u16,
        name: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
