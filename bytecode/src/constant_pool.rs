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
//! This module contains the constant pool table, its entries and the decoder producing them.

use crate::error::{Error, Result};
use crate::{mod_utf8, ReadWrite};
use indexmap::IndexMap;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::io::{Cursor, ErrorKind, Read, Write};

/// Tag bytes of the recognized constant pool entries.
///
/// `11` (InterfaceMethodref) and the tags introduced for invokedynamic and modules are not
/// decoded; they are rejected as [`Error::UnrecognizedTag`].
pub mod tag {
    pub const UTF8: u8 = 1;
    pub const INTEGER: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const LONG: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const CLASS: u8 = 7;
    pub const STRING: u8 = 8;
    pub const FIELD_REF: u8 = 9;
    pub const METHOD_REF: u8 = 10;
    pub const NAME_AND_TYPE: u8 = 12;
}

/// A constant pool entry. Indices into the pool are kept as read and are not resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantPoolEntry {
    Utf8(String),
    Integer(i32),
    Float(f32),
    Long(i64),
    Double(f64),
    ClassRef {
        /// Index of a Utf8 entry holding the binary name of the class or interface.
        name_index: u16,
    },
    StringRef {
        /// Index of a Utf8 entry holding the value of the string.
        string_index: u16,
    },
    FieldRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    MethodRef {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
}

impl ConstantPoolEntry {
    #[inline]
    pub const fn tag(&self) -> u8 {
        match self {
            ConstantPoolEntry::Utf8(_) => tag::UTF8,
            ConstantPoolEntry::Integer(_) => tag::INTEGER,
            ConstantPoolEntry::Float(_) => tag::FLOAT,
            ConstantPoolEntry::Long(_) => tag::LONG,
            ConstantPoolEntry::Double(_) => tag::DOUBLE,
            ConstantPoolEntry::ClassRef { .. } => tag::CLASS,
            ConstantPoolEntry::StringRef { .. } => tag::STRING,
            ConstantPoolEntry::FieldRef { .. } => tag::FIELD_REF,
            ConstantPoolEntry::MethodRef { .. } => tag::METHOD_REF,
            ConstantPoolEntry::NameAndType { .. } => tag::NAME_AND_TYPE,
        }
    }

    /// returns the number of index slots that this entry takes.
    #[inline]
    pub const fn size(&self) -> u16 {
        if self.is_wide() {
            2
        } else {
            1
        }
    }

    /// Returns `true` if this entry is a Long/Double constant, which takes 2 indices.
    #[inline]
    pub const fn is_wide(&self) -> bool {
        matches!(
            self,
            ConstantPoolEntry::Long(_) | ConstantPoolEntry::Double(_)
        )
    }

    /// The number of bytes this entry occupies in a class file, tag included.
    pub fn encoded_len(&self) -> usize {
        match self {
            ConstantPoolEntry::Utf8(s) => 3 + mod_utf8::string_to_modified_utf8(s).len(),
            ConstantPoolEntry::Integer(_) | ConstantPoolEntry::Float(_) => 5,
            ConstantPoolEntry::Long(_) | ConstantPoolEntry::Double(_) => 9,
            ConstantPoolEntry::ClassRef { .. } | ConstantPoolEntry::StringRef { .. } => 3,
            ConstantPoolEntry::FieldRef { .. }
            | ConstantPoolEntry::MethodRef { .. }
            | ConstantPoolEntry::NameAndType { .. } => 5,
        }
    }

    /// Writes this entry in class file layout.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.tag().write_to(writer)?;
        match self {
            ConstantPoolEntry::Utf8(s) => {
                let bytes = mod_utf8::string_to_modified_utf8(s);
                let len = u16::try_from(bytes.len()).map_err(|_| {
                    std::io::Error::new(
                        ErrorKind::InvalidData,
                        format!("Utf8 constant of {} bytes exceeds 65535 bytes", bytes.len()),
                    )
                })?;
                len.write_to(writer)?;
                writer.write_all(&bytes)?;
            }
            ConstantPoolEntry::Integer(i) => i.write_to(writer)?,
            ConstantPoolEntry::Float(f) => f.write_to(writer)?,
            ConstantPoolEntry::Long(l) => l.write_to(writer)?,
            ConstantPoolEntry::Double(d) => {
                let bits = d.to_bits();
                ((bits >> 32) as u32).write_to(writer)?;
                (bits as u32).write_to(writer)?;
            }
            ConstantPoolEntry::ClassRef { name_index: idx }
            | ConstantPoolEntry::StringRef { string_index: idx } => idx.write_to(writer)?,
            ConstantPoolEntry::FieldRef {
                class_index: a,
                name_and_type_index: b,
            }
            | ConstantPoolEntry::MethodRef {
                class_index: a,
                name_and_type_index: b,
            }
            | ConstantPoolEntry::NameAndType {
                name_index: a,
                descriptor_index: b,
            } => {
                a.write_to(writer)?;
                b.write_to(writer)?;
            }
        }
        Ok(())
    }
}

impl Display for ConstantPoolEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConstantPoolEntry::Utf8(s) => write!(f, "Utf8 {:?}", s),
            ConstantPoolEntry::Integer(i) => write!(f, "Integer {}", i),
            ConstantPoolEntry::Float(v) => write!(f, "Float {}f", v),
            ConstantPoolEntry::Long(l) => write!(f, "Long {}l", l),
            ConstantPoolEntry::Double(d) => write!(f, "Double {}d", d),
            ConstantPoolEntry::ClassRef { name_index } => write!(f, "Class #{}", name_index),
            ConstantPoolEntry::StringRef { string_index } => write!(f, "String #{}", string_index),
            ConstantPoolEntry::FieldRef {
                class_index,
                name_and_type_index,
            } => write!(f, "Fieldref #{}.#{}", class_index, name_and_type_index),
            ConstantPoolEntry::MethodRef {
                class_index,
                name_and_type_index,
            } => write!(f, "Methodref #{}.#{}", class_index, name_and_type_index),
            ConstantPoolEntry::NameAndType {
                name_index,
                descriptor_index,
            } => write!(f, "NameAndType #{}:#{}", name_index, descriptor_index),
        }
    }
}

/// A decoded constant pool.
///
/// Indices start at 1. Entries are absent at index 0, at indices `>= count`, and at the slot
/// following a Long/Double entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstantPool {
    count: u16,
    /// keyed by index, in ascending order
    entries: IndexMap<u16, ConstantPoolEntry>,
    end_offset: usize,
}

impl ConstantPool {
    /// Builds a pool from entries, assigning indices the way a decoder would.
    ///
    /// The end offset of the result is its encoded length, as if it was decoded from offset 0.
    /// Fails with [`Error::TooManySlots`] when the entries need more than 65534 slots, as the
    /// count would no longer fit in 16 bits.
    pub fn from_entries<I: IntoIterator<Item = ConstantPoolEntry>>(entries: I) -> Result<Self> {
        let mut map = IndexMap::new();
        let mut index: u32 = 1;
        let mut end_offset = 2;
        for entry in entries {
            end_offset += entry.encoded_len();
            let size = entry.size();
            let slot = u16::try_from(index)
                .ok()
                .filter(|&i| i as u32 + size as u32 <= u16::MAX as u32)
                .ok_or(Error::TooManySlots(index + size as u32 - 1))?;
            map.insert(slot, entry);
            index += size as u32;
        }
        Ok(Self {
            count: index as u16,
            entries: map,
            end_offset,
        })
    }

    /// The declared count: the number of slots in use plus one.
    #[inline]
    pub fn count(&self) -> u16 {
        self.count
    }

    /// The number of entries, not counting the unusable slots after Long/Double entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of index slots taken up by the entries.
    pub fn slots_used(&self) -> u32 {
        self.entries.values().map(|e| e.size() as u32).sum()
    }

    /// Offset of the first byte after the last entry.
    #[inline]
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    pub fn get(&self, index: u16) -> Option<&ConstantPoolEntry> {
        self.entries.get(&index)
    }

    /// Returns the text of the Utf8 entry at `index`.
    pub fn get_utf8(&self, index: u16) -> Option<&str> {
        match self.get(index) {
            Some(ConstantPoolEntry::Utf8(s)) => Some(s),
            _ => None,
        }
    }

    /// Iterates over `(index, entry)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &ConstantPoolEntry)> + '_ {
        self.entries.iter().map(|(&idx, e)| (idx, e))
    }

    /// Writes the count followed by every entry.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.count.write_to(writer)?;
        for e in self.entries.values() {
            e.write_to(writer)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ConstantPool {
    type Item = (&'a u16, &'a ConstantPoolEntry);
    type IntoIter = indexmap::map::Iter<'a, u16, ConstantPoolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Decodes the constant pool starting at `start_offset`, which must point at the count.
///
/// The buffer is only read. Decoding is all or nothing: the first malformed entry aborts it.
pub fn decode_constant_pool(buffer: &[u8], start_offset: usize) -> Result<ConstantPool> {
    let mut cursor = Cursor::new(buffer);
    cursor.set_position(start_offset as u64);
    let count = u16::read_from(&mut cursor).map_err(|e| truncated(e, 0, start_offset))?;

    let mut entries = IndexMap::with_capacity(count.saturating_sub(1) as usize);
    // wider than the count so that a Long in the last slot cannot overflow
    let mut index: u32 = 1;
    while index < count as u32 {
        let offset = cursor.position() as usize;
        let entry = read_entry(&mut cursor, index as u16)?;
        trace!("#{} at {:#X}: {}", index, offset, entry);
        let size = entry.size();
        entries.insert(index as u16, entry);
        index += size as u32;
    }

    let end_offset = cursor.position() as usize;
    debug!(
        "decoded {} constant pool entries ({} slots), bytes {:#X}..{:#X}",
        entries.len(),
        count.saturating_sub(1),
        start_offset,
        end_offset
    );
    Ok(ConstantPool {
        count,
        entries,
        end_offset,
    })
}

fn read_entry(cursor: &mut Cursor<&[u8]>, index: u16) -> Result<ConstantPoolEntry> {
    let offset = cursor.position() as usize;
    let eof = move |e: Error| truncated(e, index, offset);
    let tag = u8::read_from(cursor).map_err(eof)?;
    Ok(match tag {
        tag::UTF8 => {
            let len = u16::read_from(cursor).map_err(eof)?;
            let mut buf = vec![0u8; len as usize];
            cursor.read_exact(&mut buf).map_err(|e| eof(e.into()))?;
            let text = mod_utf8::decode_text(&buf).map_err(|source| Error::Utf8 {
                index,
                offset,
                source,
            })?;
            ConstantPoolEntry::Utf8(text)
        }
        tag::INTEGER => ConstantPoolEntry::Integer(i32::read_from(cursor).map_err(eof)?),
        tag::FLOAT => ConstantPoolEntry::Float(f32::read_from(cursor).map_err(eof)?),
        tag::LONG => ConstantPoolEntry::Long(i64::read_from(cursor).map_err(eof)?),
        tag::DOUBLE => {
            let high = u32::read_from(cursor).map_err(eof)?;
            let low = u32::read_from(cursor).map_err(eof)?;
            ConstantPoolEntry::Double(f64::from_bits(((high as u64) << 32) | low as u64))
        }
        tag::CLASS => ConstantPoolEntry::ClassRef {
            name_index: u16::read_from(cursor).map_err(eof)?,
        },
        tag::STRING => ConstantPoolEntry::StringRef {
            string_index: u16::read_from(cursor).map_err(eof)?,
        },
        tag::FIELD_REF => ConstantPoolEntry::FieldRef {
            class_index: u16::read_from(cursor).map_err(eof)?,
            name_and_type_index: u16::read_from(cursor).map_err(eof)?,
        },
        tag::METHOD_REF => ConstantPoolEntry::MethodRef {
            class_index: u16::read_from(cursor).map_err(eof)?,
            name_and_type_index: u16::read_from(cursor).map_err(eof)?,
        },
        tag::NAME_AND_TYPE => ConstantPoolEntry::NameAndType {
            name_index: u16::read_from(cursor).map_err(eof)?,
            descriptor_index: u16::read_from(cursor).map_err(eof)?,
        },
        _ => return Err(Error::UnrecognizedTag { tag, offset }),
    })
}

fn truncated(e: Error, index: u16, offset: usize) -> Error {
    match e {
        Error::IO(ref io) if io.kind() == ErrorKind::UnexpectedEof => {
            Error::Truncated { index, offset }
        }
        e => e,
    }
}
