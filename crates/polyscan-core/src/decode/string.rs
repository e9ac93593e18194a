use crate::memory::ReadMemory;
use crate::memory::layout::string;

/// Decode the managed string whose pointer lives at `handle`.
///
/// Code units are fetched one at a time; decoding stops at the first NUL or
/// unreadable unit and keeps what was read so far.
pub fn read_string<R: ReadMemory>(reader: &R, handle: u64) -> String {
    let length = match reader.read_u16(reader.resolve(handle, string::LENGTH)) {
        Ok(length) if length > 0 => length,
        _ => return String::new(),
    };

    let chars = reader.resolve(handle, string::CHARS);
    if chars == 0 {
        return String::new();
    }

    let mut units = Vec::with_capacity(length as usize);
    for i in 0..length as u64 {
        match reader.read_u16(chars + i * 2) {
            Ok(0) | Err(_) => break,
            Ok(unit) => units.push(unit),
        }
    }

    decode_utf16_units(&units)
}

/// Map each UTF-16 code unit to one character.
///
/// Surrogate pairs are not combined; a lone surrogate becomes U+FFFD.
/// Decoding stops at the first NUL.
pub fn decode_utf16_units(units: &[u16]) -> String {
    units
        .iter()
        .take_while(|&&unit| unit != 0)
        .map(|&unit| char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
