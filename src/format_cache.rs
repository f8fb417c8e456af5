use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use crate::error::Result;
use crate::format_compiler::CompiledFormat;
use crate::terminators::TerminatorRegistry;

/// The definition-time binder: a process-wide cache of compiled formats
/// keyed by their exact literal text.
///
/// Each distinct format string is compiled once, on first use, and every
/// later encode call for that string reuses the cached layout. Because
/// compilation is a pure function of the text and the built-in registry,
/// the cache tolerates concurrent first use by recomputing: two racing
/// threads both compile, produce value-identical formats, and the first
/// insert wins. No lock is ever held while compiling, so distinct texts
/// never serialize each other.

lazy_static! {
    static ref BUILTIN_REGISTRY: TerminatorRegistry = TerminatorRegistry::builtin();
    static ref FORMAT_CACHE: RwLock<HashMap<&'static str, Arc<CompiledFormat>>> =
        RwLock::new(HashMap::new());
}

/// The shared registry backing the cache: the built-in `d`/`u`/`x`/`s`/`%%`
/// rules. Formats needing custom terminators compile against their own
/// [`TerminatorRegistry`] and bypass the cache.
pub fn builtin_registry() -> &'static TerminatorRegistry {
    &BUILTIN_REGISTRY
}

/// Fetch the compiled layout for `text`, compiling and caching it on first
/// use.
///
/// Compilation errors are returned but not cached; a faulty literal fails
/// the same way on every call.
///
/// # Examples
///
/// ```
/// use format_logger::format_cache;
///
/// let first = format_cache::compiled("rx=%u tx=%u").unwrap();
/// let second = format_cache::compiled("rx=%u tx=%u").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub fn compiled(text: &'static str) -> Result<Arc<CompiledFormat>> {
    if let Some(format) = FORMAT_CACHE.read().get(text) {
        return Ok(format.clone());
    }

    // Not cached yet: compile outside any lock, then race to insert.
    let fresh = Arc::new(CompiledFormat::compile(text, &BUILTIN_REGISTRY)?);
    let mut cache = FORMAT_CACHE.write();
    Ok(cache.entry(text).or_insert(fresh).clone())
}

/// Number of distinct format strings compiled so far.
pub fn cached_format_count() -> usize {
    FORMAT_CACHE.read().len()
}
