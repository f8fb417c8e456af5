use crate::error::{Error, Result};
use crate::field::{FieldDescriptor, FieldKind};
use crate::format_compiler::CompiledFormat;
use crate::sink::ByteSink;
use crate::value::Value;

/// The record encoder: applies argument values against a compiled layout
/// and writes one byte record to a sink in two passes.

/// Zero bytes used to pad fixed string buffers, written in chunks so that
/// padding never allocates.
const ZERO_PADDING: [u8; 256] = [0u8; 256];

/// Serialize one record.
///
/// The record layout is: literal text (with its trailing NUL), then every
/// field's fixed contribution in declared order, then the raw payload of
/// every variable-size field in the same order. The split lets a consumer
/// walk the fixed section without buffering string content it has not seen
/// the length of yet, and it is part of the wire contract: both passes must
/// stay separate.
///
/// All argument validation happens before the first byte is written, so a
/// count or type mismatch never produces a torn record. Integer bytes are
/// written in native order at the field's exact width; there is no
/// endianness tag, so readers must share the writer's platform assumptions.
///
/// # Examples
///
/// ```
/// use format_logger::{encode_record, CompiledFormat, TerminatorRegistry, Value};
///
/// let registry = TerminatorRegistry::builtin();
/// let format = CompiledFormat::compile("answer=%d", &registry).unwrap();
///
/// let mut record: Vec<u8> = Vec::new();
/// encode_record(&format, &[Value::from(42)], &mut record).unwrap();
///
/// assert_eq!(&record[..10], b"answer=%d\0");
/// assert_eq!(&record[10..], 42i32.to_ne_bytes());
/// ```
pub fn encode_record<S>(format: &CompiledFormat, args: &[Value<'_>], sink: &mut S) -> Result<()>
where
    S: ByteSink + ?Sized,
{
    validate_arguments(format, args)?;

    sink.write(format.literal_text())?;

    for (field, value) in format.fields().iter().zip(args) {
        write_fixed(field, value, sink)?;
    }

    if format.variable_field_count() > 0 {
        for (field, value) in format.fields().iter().zip(args) {
            if field.fixed_size {
                continue;
            }
            if let Value::Str(text) = value {
                sink.write(text.as_bytes())?;
            }
        }
    }
    Ok(())
}

/// Check count and per-position convertibility before any write happens.
fn validate_arguments(format: &CompiledFormat, args: &[Value<'_>]) -> Result<()> {
    if format.fields().len() != args.len() {
        return Err(Error::ArgumentCountMismatch {
            expected: format.fields().len(),
            supplied: args.len(),
        });
    }
    for (index, (field, value)) in format.fields().iter().zip(args).enumerate() {
        let convertible = match field.kind {
            FieldKind::SignedInt | FieldKind::UnsignedInt => value
                .natural_width()
                .is_some_and(|width| width <= field.byte_size),
            FieldKind::FixedString | FieldKind::VariableString => {
                matches!(value, Value::Str(_))
            }
            FieldKind::Literal => true,
        };
        if !convertible {
            return Err(Error::ArgumentTypeMismatch {
                index,
                expected: field.expected_value(),
                found: value.type_name(),
            });
        }
    }
    Ok(())
}

fn write_fixed<S>(field: &FieldDescriptor, value: &Value<'_>, sink: &mut S) -> Result<()>
where
    S: ByteSink + ?Sized,
{
    match field.kind {
        FieldKind::SignedInt | FieldKind::UnsignedInt => {
            if let Some(bits) = value.integer_bits() {
                write_integer(bits, field.byte_size, sink)?;
            }
        }
        FieldKind::FixedString => {
            if let Value::Str(text) = value {
                write_fixed_string(text.as_bytes(), field.byte_size, sink)?;
            }
        }
        FieldKind::VariableString => {
            if let Value::Str(text) = value {
                let length = text.len() as u32;
                sink.write(&length.to_ne_bytes())?;
            }
        }
        // Literal markers never reach the field list, but the kind table
        // stays total: a literal contributes no bytes of its own.
        FieldKind::Literal => {}
    }
    Ok(())
}

/// Write the low `byte_size` bytes of `bits` in native order. The extension
/// to 64 bits already happened in [`Value::integer_bits`], so truncation
/// here is exact for any width up to 8.
fn write_integer<S>(bits: u64, byte_size: usize, sink: &mut S) -> Result<()>
where
    S: ByteSink + ?Sized,
{
    let bytes = bits.to_ne_bytes();
    let slice = if cfg!(target_endian = "little") {
        &bytes[..byte_size]
    } else {
        &bytes[bytes.len() - byte_size..]
    };
    sink.write(slice)?;
    Ok(())
}

fn write_fixed_string<S>(text: &[u8], byte_size: usize, sink: &mut S) -> Result<()>
where
    S: ByteSink + ?Sized,
{
    if text.len() >= byte_size {
        sink.write(&text[..byte_size])?;
        return Ok(());
    }
    sink.write(text)?;
    let mut remaining = byte_size - text.len();
    while remaining > 0 {
        let chunk = remaining.min(ZERO_PADDING.len());
        sink.write(&ZERO_PADDING[..chunk])?;
        remaining -= chunk;
    }
    Ok(())
}
