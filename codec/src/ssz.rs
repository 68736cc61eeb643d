//! SSZ serialization of schema-shaped values.

use num_bigint::{BigInt, Sign};
use schema::{Schema, Value, OFFSET_SIZE, UINT_BITS};

use crate::error::{CodecError, CodecResult};
use crate::Codec;

/// Reference SSZ encoder.
///
/// Basic types are fixed-width little-endian. Composites lay out a fixed part
/// (inline fixed-size items, 4-byte offsets for variable-size items) followed
/// by the variable-size items in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SszCodec;

impl SszCodec {
    /// Creates the encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Codec for SszCodec {
    fn encode(&self, value: &Value, schema: &Schema) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        write_value(schema, value, &mut out)?;
        Ok(out)
    }
}

fn write_value(schema: &Schema, value: &Value, out: &mut Vec<u8>) -> CodecResult<()> {
    match (schema, value) {
        (Schema::Boolean, Value::Bool(v)) => out.push(u8::from(*v)),
        (Schema::UInt { bits }, Value::Integer(v)) => write_uint(*bits, v, out)?,
        (Schema::Vector { element, length }, Value::Sequence(items)) => {
            if items.len() != *length {
                return Err(CodecError::LengthMismatch {
                    expected: *length,
                    actual: items.len(),
                });
            }
            write_parts(items.iter().map(|item| (element.as_ref(), item)), out)?;
        }
        (Schema::List { element }, Value::Sequence(items)) => {
            write_parts(items.iter().map(|item| (element.as_ref(), item)), out)?;
        }
        (Schema::Container { fields }, Value::Sequence(items)) => {
            if items.len() != fields.len() {
                return Err(CodecError::FieldCountMismatch {
                    expected: fields.len(),
                    actual: items.len(),
                });
            }
            write_parts(fields.iter().zip(items), out)?;
        }
        (Schema::Vector { element, length }, Value::Bytes(bytes)) if is_byte(element) => {
            if bytes.len() != *length {
                return Err(CodecError::LengthMismatch {
                    expected: *length,
                    actual: bytes.len(),
                });
            }
            out.extend_from_slice(bytes);
        }
        (Schema::List { element }, Value::Bytes(bytes)) if is_byte(element) => {
            out.extend_from_slice(bytes);
        }
        _ => {
            return Err(CodecError::KindMismatch {
                expected: schema.kind(),
                found: value.kind_name(),
            });
        }
    }
    Ok(())
}

fn is_byte(schema: &Schema) -> bool {
    matches!(schema, Schema::UInt { bits: 8 })
}

fn write_uint(bits: u16, value: &BigInt, out: &mut Vec<u8>) -> CodecResult<()> {
    if !UINT_BITS.contains(&bits) {
        return Err(CodecError::UnsupportedWidth { bits });
    }
    let width = usize::from(bits) / 8;
    let (sign, magnitude) = value.to_bytes_le();
    let in_range = sign != Sign::Minus && value.bits() <= u64::from(bits);
    if !in_range {
        return Err(CodecError::IntegerOutOfRange {
            bits,
            value: value.to_string(),
        });
    }

    // Zero serializes to an empty magnitude.
    let start = out.len();
    if sign != Sign::NoSign {
        out.extend_from_slice(&magnitude);
    }
    out.resize(start + width, 0);
    Ok(())
}

fn write_parts<'a, I>(parts: I, out: &mut Vec<u8>) -> CodecResult<()>
where
    I: Iterator<Item = (&'a Schema, &'a Value)>,
{
    let mut fixed: Vec<Option<Vec<u8>>> = Vec::new();
    let mut variable: Vec<Vec<u8>> = Vec::new();

    for (schema, value) in parts {
        let mut encoded = Vec::new();
        write_value(schema, value, &mut encoded)?;
        if schema.is_fixed_size() {
            fixed.push(Some(encoded));
        } else {
            fixed.push(None);
            variable.push(encoded);
        }
    }

    let fixed_len: usize = fixed
        .iter()
        .map(|part| part.as_ref().map_or(OFFSET_SIZE, Vec::len))
        .sum();

    let mut offset = fixed_len;
    let mut variable_lens = variable.iter().map(Vec::len);
    for part in &fixed {
        match part {
            Some(bytes) => out.extend_from_slice(bytes),
            None => {
                let raw = u32::try_from(offset).map_err(|_| CodecError::OffsetOverflow { offset })?;
                out.extend_from_slice(&raw.to_le_bytes());
                offset += variable_lens.next().unwrap_or(0);
            }
        }
    }
    for bytes in variable {
        out.extend_from_slice(&bytes);
    }
    Ok(())
}
