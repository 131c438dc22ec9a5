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

mod mutf8;

use lazy_static::lazy_static;

// Raw record builders. They write standard UTF-8 and do not go through the encoder.

fn utf8(s: &str) -> Vec<u8> {
    let mut v = vec![1];
    v.extend_from_slice(&(s.len() as u16).to_be_bytes());
    v.extend_from_slice(s.as_bytes());
    v
}

fn int(i: i32) -> Vec<u8> {
    [&[3u8][..], &i.to_be_bytes()].concat()
}

fn float(f: f32) -> Vec<u8> {
    [&[4u8][..], &f.to_be_bytes()].concat()
}

fn long(l: i64) -> Vec<u8> {
    [&[5u8][..], &l.to_be_bytes()].concat()
}

fn double(high: u32, low: u32) -> Vec<u8> {
    [&[6u8][..], &high.to_be_bytes(), &low.to_be_bytes()].concat()
}

fn ref1(tag: u8, idx: u16) -> Vec<u8> {
    [&[tag][..], &idx.to_be_bytes()].concat()
}

fn ref2(tag: u8, a: u16, b: u16) -> Vec<u8> {
    [&[tag][..], &a.to_be_bytes(), &b.to_be_bytes()].concat()
}

fn pool(count: u16, records: &[Vec<u8>]) -> Vec<u8> {
    let mut v = count.to_be_bytes().to_vec();
    for r in records {
        v.extend_from_slice(r);
    }
    v
}

/// access flags, this class, super class, interface count
const TRAILER: [u8; 8] = [0x00, 0x21, 0x00, 0x0E, 0x00, 0x02, 0x00, 0x00];

fn class_file(major: u16, pool: &[u8]) -> Vec<u8> {
    let mut v = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00];
    v.extend_from_slice(&major.to_be_bytes());
    v.extend_from_slice(pool);
    v.extend_from_slice(&TRAILER);
    v
}

lazy_static! {
    static ref SAMPLE_POOL: Vec<u8> = pool(
        21,
        &[
            ref2(10, 2, 3),              // #1 Methodref
            ref1(7, 4),                  // #2 Class
            ref2(12, 5, 6),              // #3 NameAndType
            utf8("java/lang/Object"),    // #4
            utf8("<init>"),              // #5
            utf8("()V"),                 // #6
            long(1_234_567_890_123),     // #7, #8
            double(0x40091EB8, 0x51EB851F), // #9, #10
            ref1(8, 12),                 // #11 String
            utf8("héllo ☕"),            // #12
            ref2(9, 14, 15),             // #13 Fieldref
            ref1(7, 16),                 // #14 Class
            ref2(12, 17, 18),            // #15 NameAndType
            utf8("TestClass"),           // #16
            utf8("count"),               // #17
            utf8("I"),                   // #18
            int(-7),                     // #19
            float(1.5),                  // #20
        ]
    );
    static ref SAMPLE_CLASS: Vec<u8> = class_file(55, &SAMPLE_POOL);
}
