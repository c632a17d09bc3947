use super::error::BencodeError;
use super::value::Value;
use bytes::Bytes;
use std::collections::BTreeMap;

const MAX_DEPTH: usize = 64;

/// Decodes a single bencode value that must span the whole input.
///
/// # Errors
///
/// Returns [`BencodeError::TrailingData`] if bytes remain after the value, or
/// any syntax error raised while decoding it.
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let (value, consumed) = decode_prefix(data)?;

    if consumed != data.len() {
        return Err(BencodeError::TrailingData { offset: consumed });
    }

    Ok(value)
}

/// Decodes the first bencode value in `data` and returns it together with the
/// number of bytes it occupied. Anything after the value is left untouched.
///
/// ```
/// use torrent_repack::bencode::{decode_prefix, Value};
///
/// let (value, used) = decode_prefix(b"i42etrailing").unwrap();
/// assert_eq!(value, Value::Integer(42));
/// assert_eq!(used, 4);
/// ```
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;
    Ok((value, pos))
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    if depth > MAX_DEPTH {
        return Err(BencodeError::NestingTooDeep { offset: *pos });
    }

    let Some(&c) = data.get(*pos) else {
        return Err(BencodeError::UnexpectedEof {
            offset: *pos,
            expected: "value",
        });
    };

    match c {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_bytes(data, pos),
        c => Err(BencodeError::UnexpectedChar {
            offset: *pos,
            found: c as char,
        }),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    let offset = *pos;
    *pos += 1;

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof {
            offset: *pos,
            expected: "'e'",
        });
    }

    let raw = &data[start..*pos];
    let malformed = |reason| BencodeError::MalformedInteger { offset, reason };

    let digits = raw.strip_prefix(b"-").unwrap_or(raw);
    if digits.is_empty() {
        return Err(malformed("no digits"));
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(malformed("non-digit character"));
    }
    if digits[0] == b'0' && (digits.len() > 1 || digits.len() != raw.len()) {
        return Err(malformed("leading zero or negative zero"));
    }

    let value = std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| malformed("out of range"))?;

    *pos += 1;
    Ok(Value::Integer(value))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    let offset = *pos;
    while *pos < data.len() && data[*pos].is_ascii_digit() {
        *pos += 1;
    }

    match data.get(*pos) {
        None => {
            return Err(BencodeError::UnexpectedEof {
                offset: *pos,
                expected: "':'",
            })
        }
        Some(b':') => {}
        Some(_) => return Err(BencodeError::MalformedLength { offset }),
    }

    let len_digits = &data[offset..*pos];
    if len_digits.len() > 1 && len_digits[0] == b'0' {
        return Err(BencodeError::MalformedLength { offset });
    }

    let len: usize = std::str::from_utf8(len_digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(BencodeError::MalformedLength { offset })?;

    *pos += 1;

    if len > data.len() - *pos {
        return Err(BencodeError::MalformedLength { offset });
    }

    let bytes = Bytes::copy_from_slice(&data[*pos..*pos + len]);
    *pos += len;

    Ok(Value::Bytes(bytes))
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth + 1)?);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof {
            offset: *pos,
            expected: "list item or 'e'",
        });
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut dict = BTreeMap::new();
    let mut previous: Option<Bytes> = None;

    while *pos < data.len() && data[*pos] != b'e' {
        let key_offset = *pos;
        if !data[*pos].is_ascii_digit() {
            return Err(BencodeError::MalformedKey { offset: key_offset });
        }

        let key = match decode_bytes(data, pos)? {
            Value::Bytes(b) => b,
            _ => return Err(BencodeError::MalformedKey { offset: key_offset }),
        };

        // Unsorted keys are accepted; the encoder re-sorts them.
        if previous.as_ref().is_some_and(|prev| *prev > key) {
            tracing::trace!(offset = key_offset, "dictionary keys out of order");
        }

        let value = decode_value(data, pos, depth + 1)?;
        if dict.insert(key.clone(), value).is_some() {
            return Err(BencodeError::DuplicateKey { offset: key_offset });
        }
        previous = Some(key);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof {
            offset: *pos,
            expected: "dictionary key or 'e'",
        });
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}
