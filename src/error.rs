use std::io;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by format compilation and record encoding.
///
/// Everything in this taxonomy is detected either while compiling a format
/// string or while validating arguments before a record write begins. The
/// encoder never fails partway through a record for any of these reasons;
/// only sink I/O can interrupt a write, and that surfaces as [`Error::Io`]
/// without further interpretation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Format text ended while an escape sequence was still open.
    ///
    /// A typo'd specifier character is absorbed as modifier text rather than
    /// rejected on the spot, so a format like `"%z"` fails here instead of
    /// at the unknown character.
    #[error("format text ended inside the escape sequence starting at byte {escape_start}")]
    UnterminatedEscape { escape_start: usize },

    /// A literal-percent escape had modifier text between the two percent
    /// signs. Only `%%` is a valid literal-percent escape.
    #[error(
        "literal '%' terminator at byte {terminator} does not immediately \
         follow its escape start at byte {escape_start}"
    )]
    InvalidEscapeGrouping { escape_start: usize, terminator: usize },

    /// A modifier byte the terminator's grammar does not accept, such as a
    /// digit before an integer terminator.
    #[error("modifier character {found:?} is not valid before terminator {terminator:?}")]
    InvalidModifier { found: char, terminator: char },

    /// More modifier characters than the terminator's grammar supports.
    #[error("{count} modifier characters given where at most {max} are supported")]
    InvalidModifierCount { count: usize, max: usize },

    /// Two rules with the same trigger character were registered.
    #[error("a terminator rule for {0:?} is already registered")]
    DuplicateTerminator(char),

    /// The number of supplied values differs from the number of compiled
    /// fields.
    #[error("format has {expected} argument fields but {supplied} values were supplied")]
    ArgumentCountMismatch { expected: usize, supplied: usize },

    /// A supplied value cannot be converted to its field's expected type.
    #[error("argument {index} is {found} but its field expects {expected}")]
    ArgumentTypeMismatch {
        index: usize,
        expected: String,
        found: &'static str,
    },

    /// The sink reported a write failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
