use alloc::vec::Vec;

use crate::err::DecodeErr;

/// Decodes the first `len` UTF-16 code units into UTF-8 bytes.
///
/// Zero units are not terminators, each one becomes a zero byte. A unit in
/// 0xD800..=0xDFFF always starts a pair and the unit after it is taken as the
/// low half without checking its range, so garbage in gives garbage out
/// rather than an error. The only rejected shape is a pair cut off by `len`.
pub fn utf16_to_utf8(units: &[u16], len: usize) -> Result<Vec<u8>, DecodeErr> {
    if len > units.len() {
        return Err(DecodeErr::TruncatedInput {
            needed: len,
            available: units.len(),
        });
    }

    let units = &units[..len];
    let mut out = Vec::with_capacity(len);

    let mut i = 0;
    while i < len {
        let unit = units[i];
        let code = if unit <= 0xD7FF || unit >= 0xE000 {
            unit as u32
        } else {
            let Some(&low) = units.get(i + 1) else {
                return Err(DecodeErr::MalformedInput { index: i, unit });
            };
            i += 1;

            // never negative: the smallest result is 0x2400
            (((unit as i32 - 0xD800) << 10) + (low as i32 - 0xDC00) + 0x10000) as u32
        };
        i += 1;

        push_code_point(code, &mut out);
    }

    Ok(out)
}

fn push_code_point(code: u32, out: &mut Vec<u8>) {
    match code {
        0..=0x7F => out.push(code as u8),
        0x80..=0x7FF => out.extend([0xC0 | (code >> 6) as u8, 0x80 | (code & 0x3F) as u8]),
        0x800..=0xFFFF => out.extend([
            0xE0 | (code >> 12) as u8,
            0x80 | ((code >> 6) & 0x3F) as u8,
            0x80 | (code & 0x3F) as u8,
        ]),
        0x10000..=0x10FFFF => out.extend([
            0xF0 | (code >> 18) as u8,
            0x80 | ((code >> 12) & 0x3F) as u8,
            0x80 | ((code >> 6) & 0x3F) as u8,
            0x80 | (code & 0x3F) as u8,
        ]),
        // past the last code point, only a malformed pair gets here
        _ => {}
    }
}
