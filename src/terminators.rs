use crate::error::{Error, Result};
use crate::field::FieldDescriptor;

/// Terminator rules and the registry that resolves them during a format
/// scan.
///
/// A terminator is a character that ends an escape sequence and determines
/// the binary layout of the corresponding field. The built-in set covers
/// `d`, `u`, `x`, `s` and the literal `%%`; callers may register additional
/// rules without touching the scan algorithm itself.

/// Byte that opens an escape sequence in format text.
pub const ESCAPE_CHAR: u8 = b'%';

/// The only modifier character accepted by the integer terminators.
const LENGTH_MODIFIER: u8 = b'l';
/// Maximum number of length modifiers before an integer terminator.
const MAX_LENGTH_MODIFIERS: usize = 2;
/// Integer width with no length modifiers, and the per-modifier step.
const BASE_INT_SIZE: usize = 4;
/// Maximum number of width digits accepted before `s`.
const MAX_WIDTH_DIGITS: usize = 9;

/// A rule that turns one terminated escape sequence into a field layout.
///
/// `describe` receives the modifier slice (the bytes strictly between the
/// escape start and the terminator) along with both byte positions, and
/// either produces a [`FieldDescriptor`] or rejects the escape sequence
/// with a grammar error.
///
/// Implementations must be `Send + Sync`; registries are commonly shared
/// behind a global.
pub trait TerminatorRule: Send + Sync {
    /// The character that triggers this rule.
    fn trigger(&self) -> u8;

    /// Derive the field layout from the escape sequence's modifier text.
    fn describe(
        &self,
        modifier: &[u8],
        escape_start: usize,
        terminator_idx: usize,
    ) -> Result<FieldDescriptor>;
}

/// Shared size rule for the integer terminators: zero to two `l` modifiers,
/// 4 bytes with none, otherwise 4 bytes per modifier. Note that a single
/// `l` therefore still yields a 4-byte field; this quirk is part of the
/// wire contract and is reproduced deliberately.
fn integer_descriptor(modifier: &[u8], trigger: u8, signed: bool) -> Result<FieldDescriptor> {
    if let Some(&found) = modifier.iter().find(|&&b| b != LENGTH_MODIFIER) {
        return Err(Error::InvalidModifier {
            found: found as char,
            terminator: trigger as char,
        });
    }
    let count = modifier.len();
    if count > MAX_LENGTH_MODIFIERS {
        return Err(Error::InvalidModifierCount {
            count,
            max: MAX_LENGTH_MODIFIERS,
        });
    }
    let byte_size = if count == 0 {
        BASE_INT_SIZE
    } else {
        BASE_INT_SIZE * count
    };
    Ok(if signed {
        FieldDescriptor::signed_int(byte_size)
    } else {
        FieldDescriptor::unsigned_int(byte_size)
    })
}

/// `%d`: signed integer.
pub struct SignedIntRule;

impl TerminatorRule for SignedIntRule {
    fn trigger(&self) -> u8 {
        b'd'
    }

    fn describe(&self, modifier: &[u8], _: usize, _: usize) -> Result<FieldDescriptor> {
        integer_descriptor(modifier, self.trigger(), true)
    }
}

/// `%u`: unsigned integer, same size rule as `%d`.
pub struct UnsignedIntRule;

impl TerminatorRule for UnsignedIntRule {
    fn trigger(&self) -> u8 {
        b'u'
    }

    fn describe(&self, modifier: &[u8], _: usize, _: usize) -> Result<FieldDescriptor> {
        integer_descriptor(modifier, self.trigger(), false)
    }
}

/// `%x`: identical binary layout to `%d`. Hexadecimal display is a concern
/// of whatever renders the record later, not of the encoder.
pub struct HexIntRule;

impl TerminatorRule for HexIntRule {
    fn trigger(&self) -> u8 {
        b'x'
    }

    fn describe(&self, modifier: &[u8], _: usize, _: usize) -> Result<FieldDescriptor> {
        integer_descriptor(modifier, self.trigger(), true)
    }
}

/// `%s`: a fixed character buffer when a decimal width is given (`%8s`),
/// otherwise a variable-size string written as length prefix plus deferred
/// payload.
pub struct StringRule;

impl TerminatorRule for StringRule {
    fn trigger(&self) -> u8 {
        b's'
    }

    fn describe(&self, modifier: &[u8], _: usize, _: usize) -> Result<FieldDescriptor> {
        if modifier.is_empty() {
            return Ok(FieldDescriptor::variable_string());
        }
        if modifier.len() > MAX_WIDTH_DIGITS {
            return Err(Error::InvalidModifierCount {
                count: modifier.len(),
                max: MAX_WIDTH_DIGITS,
            });
        }
        let mut width = 0usize;
        for &byte in modifier {
            if !byte.is_ascii_digit() {
                return Err(Error::InvalidModifier {
                    found: byte as char,
                    terminator: self.trigger() as char,
                });
            }
            width = width * 10 + usize::from(byte - b'0');
        }
        Ok(FieldDescriptor::fixed_string(width))
    }
}

/// `%%`: a literal percent sign. Valid only with nothing between the two
/// percent characters.
pub struct PercentRule;

impl TerminatorRule for PercentRule {
    fn trigger(&self) -> u8 {
        ESCAPE_CHAR
    }

    fn describe(
        &self,
        _modifier: &[u8],
        escape_start: usize,
        terminator_idx: usize,
    ) -> Result<FieldDescriptor> {
        if escape_start + 1 != terminator_idx {
            return Err(Error::InvalidEscapeGrouping {
                escape_start,
                terminator: terminator_idx,
            });
        }
        Ok(FieldDescriptor::literal())
    }
}

/// An ordered set of terminator rules, resolved by trigger character.
///
/// No two rules may share a trigger; [`TerminatorRegistry::register`]
/// enforces this at construction time. Characters with no rule are not
/// errors during a scan; they extend the surrounding escape sequence as
/// modifier text.
///
/// # Examples
///
/// ```
/// use format_logger::{FieldDescriptor, Result, TerminatorRegistry, TerminatorRule};
///
/// /// `%b`: a single raw byte, spelled as a 1-byte buffer.
/// struct ByteRule;
///
/// impl TerminatorRule for ByteRule {
///     fn trigger(&self) -> u8 {
///         b'b'
///     }
///     fn describe(&self, _: &[u8], _: usize, _: usize) -> Result<FieldDescriptor> {
///         Ok(FieldDescriptor::fixed_string(1))
///     }
/// }
///
/// let mut registry = TerminatorRegistry::builtin();
/// registry.register(Box::new(ByteRule)).unwrap();
/// assert!(registry.resolve(b'b').is_some());
/// ```
pub struct TerminatorRegistry {
    rules: Vec<Box<dyn TerminatorRule>>,
}

impl TerminatorRegistry {
    /// A registry with no rules at all, for callers composing their own
    /// specifier set from scratch.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in rule set: `d`, `u`, `x`, `s` and the literal `%%`.
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                Box::new(SignedIntRule),
                Box::new(UnsignedIntRule),
                Box::new(HexIntRule),
                Box::new(StringRule),
                Box::new(PercentRule),
            ],
        }
    }

    /// Add a rule, rejecting trigger characters that are already taken.
    pub fn register(&mut self, rule: Box<dyn TerminatorRule>) -> Result<()> {
        if self.resolve(rule.trigger()).is_some() {
            return Err(Error::DuplicateTerminator(rule.trigger() as char));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Look up the rule for a character, if one is registered.
    pub fn resolve(&self, trigger: u8) -> Option<&dyn TerminatorRule> {
        self.rules
            .iter()
            .find(|rule| rule.trigger() == trigger)
            .map(|rule| rule.as_ref())
    }
}

impl Default for TerminatorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
