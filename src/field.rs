/// Field descriptors: the binary contract of one argument slot in a
/// compiled format.
///
/// Terminator rules produce one [`FieldDescriptor`] per escape sequence;
/// the record encoder consumes them in declared order.

/// Byte width of the length prefix written for variable-size strings.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// The kind tag that selects a field's write behavior at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A literal byte in the format text. Consumes no argument and writes
    /// nothing beyond the literal text itself.
    Literal,
    /// Sign-extended native-endian integer of the descriptor's width.
    SignedInt,
    /// Zero-extended native-endian integer of the descriptor's width.
    UnsignedInt,
    /// Character buffer of fixed width, zero-padded or truncated.
    FixedString,
    /// Length-prefixed string; the prefix is written in the fixed pass and
    /// the payload bytes in the variable pass.
    VariableString,
}

/// The compiled layout of a single field.
///
/// `byte_size` is the number of bytes the field contributes to the fixed
/// (first) encoding pass. For a [`FieldKind::VariableString`] this is the
/// width of its length prefix, not the eventual payload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: FieldKind,
    pub byte_size: usize,
    pub fixed_size: bool,
}

impl FieldDescriptor {
    /// Signed integer field. Integer fields are at most 8 bytes wide.
    pub const fn signed_int(byte_size: usize) -> Self {
        assert!(byte_size > 0 && byte_size <= 8);
        Self {
            kind: FieldKind::SignedInt,
            byte_size,
            fixed_size: true,
        }
    }

    /// Unsigned integer field. Integer fields are at most 8 bytes wide.
    pub const fn unsigned_int(byte_size: usize) -> Self {
        assert!(byte_size > 0 && byte_size <= 8);
        Self {
            kind: FieldKind::UnsignedInt,
            byte_size,
            fixed_size: true,
        }
    }

    /// Fixed-width character buffer of `byte_size` bytes.
    pub const fn fixed_string(byte_size: usize) -> Self {
        Self {
            kind: FieldKind::FixedString,
            byte_size,
            fixed_size: true,
        }
    }

    /// Variable-size string, written as a length prefix plus deferred
    /// payload.
    pub const fn variable_string() -> Self {
        Self {
            kind: FieldKind::VariableString,
            byte_size: LENGTH_PREFIX_SIZE,
            fixed_size: false,
        }
    }

    /// Zero-size literal marker, produced by the `%%` escape.
    pub const fn literal() -> Self {
        Self {
            kind: FieldKind::Literal,
            byte_size: 0,
            fixed_size: true,
        }
    }

    /// Whether this field occupies an argument slot. Zero-size descriptors
    /// (the literal percent, a `%0s` buffer) take no argument and are
    /// dropped from the compiled field sequence.
    pub const fn consumes_argument(&self) -> bool {
        self.byte_size > 0
    }

    /// Human-readable description of the expected value, for type-mismatch
    /// reporting.
    pub(crate) fn expected_value(&self) -> String {
        match self.kind {
            FieldKind::Literal => "no value".to_string(),
            FieldKind::SignedInt => format!("a signed integer of at most {} bytes", self.byte_size),
            FieldKind::UnsignedInt => {
                format!("an unsigned integer of at most {} bytes", self.byte_size)
            }
            FieldKind::FixedString => format!("a string (fixed {}-byte buffer)", self.byte_size),
            FieldKind::VariableString => "a string".to_string(),
        }
    }
}
