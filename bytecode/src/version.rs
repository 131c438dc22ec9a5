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
//! this module defines structures and enum for java version.

use std::fmt::{Display, Formatter, Result};

/// the version of a java class.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct JavaVersion {
    /// The minor version.
    pub minor: u16,
    /// The major version, as read from the class file.
    pub major: u16,
}

impl JavaVersion {
    pub const J11: JavaVersion = JavaVersion {
        minor: 0,
        major: MajorVersion::J11.as_u16(),
    };

    /// The display name of the major version, `"Unknown"` if it is not a known release.
    pub fn name(&self) -> &'static str {
        resolve(self.major).0
    }

    /// Whether the decoder targets this version.
    pub fn is_supported(&self) -> bool {
        resolve(self.major).1
    }
}

/// Major version of a java class.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u16)]
pub enum MajorVersion {
    /// Java version 1.0.2/1.1
    J1 = 45,
    /// Java version 1.2
    J1_2,
    /// Java version 1.3
    J1_3,
    /// Java version 1.4
    J1_4,
    /// Java SE 5
    J5,
    /// Java SE 6
    J6,
    /// Java SE 7
    J7,
    /// Java SE 8
    J8,
    /// Java SE 9
    J9,
    /// Java SE 10
    J10,
    /// Java SE 11
    J11,
    /// Java SE 12
    J12,
    /// Java SE 13
    J13,
    /// Java SE 14
    J14,
    /// Java SE 15
    J15,
    /// Java SE 16
    J16,
    /// Java SE 17
    J17,
    /// Java SE 18
    J18,
    /// Java SE 19
    J19,
    /// Java SE 20
    J20,
    /// Java SE 21
    J21,
}

impl MajorVersion {
    /// The only release this decoder targets.
    pub const SUPPORTED: MajorVersion = MajorVersion::J11;

    /// Every known release, ordered by major version.
    pub const ALL: [MajorVersion; 21] = [
        MajorVersion::J1,
        MajorVersion::J1_2,
        MajorVersion::J1_3,
        MajorVersion::J1_4,
        MajorVersion::J5,
        MajorVersion::J6,
        MajorVersion::J7,
        MajorVersion::J8,
        MajorVersion::J9,
        MajorVersion::J10,
        MajorVersion::J11,
        MajorVersion::J12,
        MajorVersion::J13,
        MajorVersion::J14,
        MajorVersion::J15,
        MajorVersion::J16,
        MajorVersion::J17,
        MajorVersion::J18,
        MajorVersion::J19,
        MajorVersion::J20,
        MajorVersion::J21,
    ];

    pub fn from_u16(major: u16) -> Option<MajorVersion> {
        let first = MajorVersion::J1.as_u16();
        if major < first {
            return None;
        }
        Self::ALL.get((major - first) as usize).copied()
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            MajorVersion::J1 => "Java SE 1.0",
            MajorVersion::J1_2 => "Java SE1.2",
            MajorVersion::J1_3 => "Java SE1.3",
            MajorVersion::J1_4 => "Java SE1.4",
            MajorVersion::J5 => "Java SE5.0",
            MajorVersion::J6 => "Java SE6.0",
            MajorVersion::J7 => "Java SE7",
            MajorVersion::J8 => "Java SE8",
            MajorVersion::J9 => "Java SE9",
            MajorVersion::J10 => "Java SE10",
            MajorVersion::J11 => "Java SE11",
            MajorVersion::J12 => "Java SE12",
            MajorVersion::J13 => "Java SE13",
            MajorVersion::J14 => "Java SE14",
            MajorVersion::J15 => "Java SE15",
            MajorVersion::J16 => "Java SE16",
            MajorVersion::J17 => "Java SE17",
            MajorVersion::J18 => "Java SE18",
            MajorVersion::J19 => "Java SE19",
            MajorVersion::J20 => "Java SE20",
            MajorVersion::J21 => "Java SE21",
        }
    }

    #[inline]
    pub fn is_supported(self) -> bool {
        self == Self::SUPPORTED
    }
}

/// Maps a major version to its display name and whether the decoder supports it.
///
/// Total over `u16`: anything that is not a known release resolves to `("Unknown", false)`.
///
/// ```
/// # use jcpool::version::resolve;
/// assert_eq!(resolve(55), ("Java SE11", true));
/// assert_eq!(resolve(52), ("Java SE8", false));
/// assert_eq!(resolve(7), ("Unknown", false));
/// ```
pub fn resolve(major: u16) -> (&'static str, bool) {
    match MajorVersion::from_u16(major) {
        Some(v) => (v.name(), v.is_supported()),
        None => ("Unknown", false),
    }
}

impl Display for JavaVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} (major {}, minor {})", self.name(), self.major, self.minor)
    }
}
