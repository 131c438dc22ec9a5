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
//! Decoder for the constant pool of Java class files.
//!
//! [`decode_constant_pool`] is the core: a single forward pass over a byte buffer producing an
//! immutable, 1-indexed [`ConstantPool`]. [`ClassFile`] wraps it with header validation and
//! version gating.

#[macro_use]
extern crate log;

pub mod class;
pub mod constant_pool;
pub mod error;
pub mod mod_utf8;
pub mod version;

#[cfg(test)]
mod tests;

use std::io::{Read, Write};

pub use crate::class::{ClassFile, ReaderOptions};
pub use crate::constant_pool::{decode_constant_pool, ConstantPool, ConstantPoolEntry};
pub use crate::error::{Error, Result};
pub use crate::version::{JavaVersion, MajorVersion};

/// The generic read and write trait for big endian values.
///
/// Integer and floating point types implement `ReadWrite`.
pub trait ReadWrite
where
    Self: Sized,
{
    fn read_from<T: Read>(reader: &mut T) -> Result<Self>;
    fn write_to<T: Write>(&self, writer: &mut T) -> Result<()>;
}

macro_rules! impl_readwrite_nums {
    ($($i:ty, $s:literal)*) => {
        $(
            impl ReadWrite for $i {
                fn read_from<T: Read>(reader: &mut T) -> Result<Self> {
                    let mut bytes = [0u8; $s];
                    reader.read_exact(&mut bytes)?;
                    Ok(<$i>::from_be_bytes(bytes))
                }
                fn write_to<T: Write>(&self, writer: &mut T) -> Result<()> {
                    writer.write_all(&self.to_be_bytes())?;
                    Ok(())
                }
            }
        )*
    };
}
impl_readwrite_nums! { u8, 1  u16, 2  i32, 4  u32, 4  f32, 4  i64, 8 }
