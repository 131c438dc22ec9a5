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
//! Class file header validation and loading.

use crate::constant_pool::{decode_constant_pool, ConstantPool};
use crate::error::{Error, Result};
use crate::version::{resolve, JavaVersion, MajorVersion};
use nom::number::complete::{be_u16, be_u32};
use nom::sequence::tuple;
use md5::{Digest, Md5};
use nom::IResult;
use std::path::Path;
use std::time::UNIX_EPOCH;

/// The magic header file that exists on top of every class file with java version > 1.0.2.
pub const JVM_MAGIC: u32 = 0xCAFEBABE;

/// Length of magic, minor and major version. The constant pool starts right after it.
pub const HEADER_LEN: usize = 8;

/// Options for reading a class file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Log where the class file came from and its checksum when opening it. On by default.
    pub debug: bool,
    /// Major versions that are decoded. Class files of any other version are rejected.
    pub supported_majors: Vec<u16>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            debug: true,
            supported_majors: vec![MajorVersion::SUPPORTED.as_u16()],
        }
    }
}

impl ReaderOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Accepts `major` in addition to the versions already supported.
    pub fn allow_major(mut self, major: u16) -> Self {
        if !self.supported_majors.contains(&major) {
            self.supported_majors.push(major);
        }
        self
    }

    #[inline]
    pub fn supports(&self, major: u16) -> bool {
        self.supported_majors.contains(&major)
    }
}

/// A class file of which only the version and the constant pool are decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
    pub version: JavaVersion,
    pub constant_pool: ConstantPool,
}

/// Lowercase hex MD5 digest of `bytes`, as logged when opening a file.
pub fn md5_checksum(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

fn header(input: &[u8]) -> IResult<&[u8], (u32, u16, u16)> {
    tuple((be_u32, be_u16, be_u16))(input)
}

impl ClassFile {
    /// Validates the header of `bytes` and decodes the constant pool following it.
    pub fn parse(bytes: &[u8], options: &ReaderOptions) -> Result<ClassFile> {
        let (_, (magic, minor, major)) =
            header(bytes).map_err(|_| Error::Truncated {
                index: 0,
                offset: bytes.len(),
            })?;
        if magic != JVM_MAGIC {
            return Err(Error::BadMagic(magic));
        }
        let version = JavaVersion { minor, major };
        debug!("class file version: {}", version);
        if !options.supports(major) {
            let (name, _) = resolve(major);
            warn!(
                "rejecting class file version {}, supported majors are {:?}",
                version, options.supported_majors
            );
            return Err(Error::UnsupportedVersion { major, minor, name });
        }
        let constant_pool = decode_constant_pool(bytes, HEADER_LEN)?;
        Ok(ClassFile {
            version,
            constant_pool,
        })
    }

    /// Reads the file at `path` and parses it.
    ///
    /// With `options.debug` set, the path, size, modification time and MD5 checksum are logged
    /// before anything is decoded.
    pub fn open<P: AsRef<Path>>(path: P, options: &ReaderOptions) -> Result<ClassFile> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        if options.debug {
            let meta = std::fs::metadata(path)?;
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map_or_else(|| "unknown".to_owned(), |d| format!("{}s since epoch", d.as_secs()));
            let display = path.canonicalize().unwrap_or_else(|_| path.to_owned());
            info!("Classfile {}", display.display());
            info!("Last modified {}; size {} bytes", modified, meta.len());
            info!("MD5 checksum {}", md5_checksum(&bytes));
        }
        Self::parse(&bytes, options)
    }
}
