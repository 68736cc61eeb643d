//! Deterministic structural schema hashing.

use blake3::Hasher;

use crate::Schema;

/// Computes a deterministic hash of a schema's structure.
///
/// Field and element order affect the result.
#[must_use]
pub fn schema_hash(schema: &Schema) -> u64 {
    let mut hasher = Hasher::new();
    write_schema(&mut hasher, schema);

    let hash = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

fn write_schema(hasher: &mut Hasher, schema: &Schema) {
    match schema {
        Schema::Boolean => {
            write_u8(hasher, 0);
        }
        Schema::UInt { bits } => {
            write_u8(hasher, 1);
            write_u16(hasher, *bits);
        }
        Schema::List { element } => {
            write_u8(hasher, 2);
            write_schema(hasher, element);
        }
        Schema::Vector { element, length } => {
            write_u8(hasher, 3);
            write_u64(hasher, *length as u64);
            write_schema(hasher, element);
        }
        Schema::Container { fields } => {
            write_u8(hasher, 4);
            write_u64(hasher, fields.len() as u64);
            for field in fields {
                write_schema(hasher, field);
            }
        }
    }
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u16(hasher: &mut Hasher, value: u16) {
    hasher.update(&value.to_le_bytes());
}

fn write_u64(hasher: &mut Hasher, value: u64) {
    hasher.update(&value.to_le_bytes());
}
