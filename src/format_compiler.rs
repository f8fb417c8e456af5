use crate::error::{Error, Result};
use crate::field::{FieldDescriptor, FieldKind};
use crate::record_encoder::encode_record;
use crate::sink::ByteSink;
use crate::terminators::{TerminatorRegistry, ESCAPE_CHAR};
use crate::value::Value;

/// The format compiler: a single left-to-right scan that turns printf-style
/// format text into an ordered field layout, so that encoding a record
/// never has to parse text again.

/// A compiled format: the literal text plus the binary layout of every
/// argument field, in left-to-right order.
///
/// Compilation is a pure function of the format text and the registry.
/// Compiling the same text twice yields structurally equal values, which is
/// what makes the global [`format_cache`](crate::format_cache) safe to
/// populate with idempotent recomputation.
///
/// # Examples
///
/// ```
/// use format_logger::{CompiledFormat, FieldKind, TerminatorRegistry};
///
/// let registry = TerminatorRegistry::builtin();
/// let format = CompiledFormat::compile("user=%8s id=%lld", &registry).unwrap();
///
/// assert_eq!(format.fields().len(), 2);
/// assert_eq!(format.fields()[0].kind, FieldKind::FixedString);
/// assert_eq!(format.fields()[1].byte_size, 8);
/// assert_eq!(format.fixed_payload_size(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFormat {
    literal: Vec<u8>,
    fields: Vec<FieldDescriptor>,
    fixed_payload_size: usize,
    variable_field_count: usize,
}

impl CompiledFormat {
    /// Scan `text` against `registry` and build the field layout.
    ///
    /// The scan keeps two pieces of cursor state: whether it is inside an
    /// escape sequence, and where that sequence started. A registered
    /// terminator seen while escaped emits a field and closes the escape;
    /// any other character seen while escaped extends the modifier text.
    /// Unknown specifier characters are therefore not rejected here; a
    /// format with a typo'd specifier fails at end of text with
    /// [`Error::UnterminatedEscape`] instead.
    pub fn compile(text: &str, registry: &TerminatorRegistry) -> Result<Self> {
        let bytes = text.as_bytes();
        let mut fields = Vec::new();
        let mut literal = Vec::with_capacity(bytes.len() + 1);
        let mut is_escaped = false;
        let mut escape_start = 0usize;

        for (idx, &byte) in bytes.iter().enumerate() {
            let is_escape_char = byte == ESCAPE_CHAR;
            let rule = registry.resolve(byte);
            let mut emit_byte = true;

            if is_escaped {
                if let Some(rule) = rule {
                    let descriptor = rule.describe(&bytes[escape_start + 1..idx], escape_start, idx)?;
                    if descriptor.consumes_argument() {
                        fields.push(descriptor);
                    }
                    // A literal-percent escape collapses to a single '%' in
                    // the record text: the escape start was already emitted,
                    // the terminator is not.
                    if descriptor.kind == FieldKind::Literal {
                        emit_byte = false;
                    }
                }
            } else if is_escape_char {
                escape_start = idx;
            }

            is_escaped = (is_escaped && rule.is_none()) || (!is_escaped && is_escape_char);
            if emit_byte {
                literal.push(byte);
            }
        }

        if is_escaped {
            return Err(Error::UnterminatedEscape { escape_start });
        }
        literal.push(0);

        let fixed_payload_size = fields.iter().map(|field| field.byte_size).sum();
        let variable_field_count = fields.iter().filter(|field| !field.fixed_size).count();
        Ok(Self {
            literal,
            fields,
            fixed_payload_size,
            variable_field_count,
        })
    }

    /// The argument fields, in the order their escapes appear in the text.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Bytes every record contributes in the fixed pass: the sum of all
    /// field widths, counting a variable string as its length prefix.
    pub fn fixed_payload_size(&self) -> usize {
        self.fixed_payload_size
    }

    /// Number of fields whose payload is deferred to the variable pass.
    pub fn variable_field_count(&self) -> usize {
        self.variable_field_count
    }

    /// The record's leading text, including the trailing NUL terminator.
    pub fn literal_text(&self) -> &[u8] {
        &self.literal
    }

    /// Size of the literal text including its terminator byte.
    pub fn literal_size(&self) -> usize {
        self.literal.len()
    }

    /// Total record size through the fixed pass. Variable payloads come on
    /// top of this at encode time.
    pub fn size(&self) -> usize {
        self.literal.len() + self.fixed_payload_size
    }

    /// Encode one record against this layout. See
    /// [`encode_record`](crate::record_encoder::encode_record).
    pub fn encode<S>(&self, args: &[Value<'_>], sink: &mut S) -> Result<()>
    where
        S: ByteSink + ?Sized,
    {
        encode_record(self, args, sink)
    }
}
