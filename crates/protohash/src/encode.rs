//! Canonical encoding of scalar values.
//!
//! Each function writes exactly one value to the sink using a stack buffer;
//! nothing is accumulated across calls. The primitives are public so that
//! precompiled per-type routines produce the same bytes as the reflective
//! traversal.

use protohash_schema::{Kind, Value};

use crate::error::HashError;
use crate::sink::DigestSink;

/// Longest possible varint encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Encodes `value` as a varint into `buf`, returning the encoded length.
pub fn encode_varint(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8 & 0x7f) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Zig-zag transform: `0, -1, 1, -2, ...` map to `0, 1, 2, 3, ...`.
pub fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Writes a varint.
pub fn write_varint<S: DigestSink + ?Sized>(sink: &mut S, value: u64) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode_varint(value, &mut buf);
    sink.write(&buf[..len]);
}

/// `bool`: varint 0 or 1.
pub fn write_bool<S: DigestSink + ?Sized>(sink: &mut S, value: bool) {
    write_varint(sink, value as u64);
}

/// Enum number, sign-extended to 64 bits.
pub fn write_enum<S: DigestSink + ?Sized>(sink: &mut S, value: i32) {
    write_varint(sink, value as i64 as u64);
}

/// `int32`, sign-extended to 64 bits.
pub fn write_int32<S: DigestSink + ?Sized>(sink: &mut S, value: i32) {
    write_varint(sink, value as i64 as u64);
}

/// `int64`.
pub fn write_int64<S: DigestSink + ?Sized>(sink: &mut S, value: i64) {
    write_varint(sink, value as u64);
}

/// `uint32`.
pub fn write_uint32<S: DigestSink + ?Sized>(sink: &mut S, value: u32) {
    write_varint(sink, u64::from(value));
}

/// `uint64`.
pub fn write_uint64<S: DigestSink + ?Sized>(sink: &mut S, value: u64) {
    write_varint(sink, value);
}

/// `sint32`: zig-zag of the value widened to 64 bits.
pub fn write_sint32<S: DigestSink + ?Sized>(sink: &mut S, value: i32) {
    write_varint(sink, zigzag(i64::from(value)));
}

/// `sint64`: zig-zag.
pub fn write_sint64<S: DigestSink + ?Sized>(sink: &mut S, value: i64) {
    write_varint(sink, zigzag(value));
}

/// `fixed32`: 4 bytes little-endian.
pub fn write_fixed32<S: DigestSink + ?Sized>(sink: &mut S, value: u32) {
    sink.write(&value.to_le_bytes());
}

/// `sfixed32`: 4 bytes little-endian of the two's complement bits.
pub fn write_sfixed32<S: DigestSink + ?Sized>(sink: &mut S, value: i32) {
    write_fixed32(sink, value as u32);
}

/// `fixed64`: 8 bytes little-endian.
pub fn write_fixed64<S: DigestSink + ?Sized>(sink: &mut S, value: u64) {
    sink.write(&value.to_le_bytes());
}

/// `sfixed64`: 8 bytes little-endian of the two's complement bits.
pub fn write_sfixed64<S: DigestSink + ?Sized>(sink: &mut S, value: i64) {
    write_fixed64(sink, value as u64);
}

/// `float`: IEEE-754 bits, 4 bytes little-endian. NaN payloads are kept as is.
pub fn write_float<S: DigestSink + ?Sized>(sink: &mut S, value: f32) {
    write_fixed32(sink, value.to_bits());
}

/// `double`: IEEE-754 bits, 8 bytes little-endian.
pub fn write_double<S: DigestSink + ?Sized>(sink: &mut S, value: f64) {
    write_fixed64(sink, value.to_bits());
}

/// `string`: varint byte length, then UTF-8 bytes.
pub fn write_string<S: DigestSink + ?Sized>(sink: &mut S, value: &str) {
    write_bytes(sink, value.as_bytes());
}

/// `bytes`: varint length, then the raw bytes.
pub fn write_bytes<S: DigestSink + ?Sized>(sink: &mut S, value: &[u8]) {
    write_varint(sink, value.len() as u64);
    sink.write(value);
}

/// Writes one scalar element of `kind`.
///
/// Message kinds are not scalars; the traversal recurses into them before
/// reaching this point, so a message value here is a mismatch. Groups have no
/// encoding rule and always fail.
pub fn write_scalar<S: DigestSink + ?Sized>(
    sink: &mut S,
    field: &str,
    kind: &Kind,
    value: &Value,
) -> Result<(), HashError> {
    match (kind, value) {
        (Kind::Group(_), _) => {
            return Err(HashError::UnsupportedKind {
                field: field.to_string(),
                kind: kind.to_string(),
            })
        }
        (Kind::Bool, Value::Bool(v)) => write_bool(sink, *v),
        (Kind::Enum(_), Value::EnumNumber(v)) => write_enum(sink, *v),
        (Kind::Int32, Value::I32(v)) => write_int32(sink, *v),
        (Kind::Sint32, Value::I32(v)) => write_sint32(sink, *v),
        (Kind::Uint32, Value::U32(v)) => write_uint32(sink, *v),
        (Kind::Int64, Value::I64(v)) => write_int64(sink, *v),
        (Kind::Sint64, Value::I64(v)) => write_sint64(sink, *v),
        (Kind::Uint64, Value::U64(v)) => write_uint64(sink, *v),
        (Kind::Sfixed32, Value::I32(v)) => write_sfixed32(sink, *v),
        (Kind::Fixed32, Value::U32(v)) => write_fixed32(sink, *v),
        (Kind::Float, Value::F32(v)) => write_float(sink, *v),
        (Kind::Sfixed64, Value::I64(v)) => write_sfixed64(sink, *v),
        (Kind::Fixed64, Value::U64(v)) => write_fixed64(sink, *v),
        (Kind::Double, Value::F64(v)) => write_double(sink, *v),
        (Kind::String, Value::String(v)) => write_string(sink, v),
        (Kind::Bytes, Value::Bytes(v)) => write_bytes(sink, v),
        _ => {
            return Err(HashError::ValueMismatch {
                field: field.to_string(),
                kind: kind.to_string(),
            })
        }
    }
    Ok(())
}
