//! Pointer diagnostics that exist only in builds with the `to-cout` feature.
//!
//! Two implementations share the [`Diagnostics`] interface. [`Emitting`]
//! formats pointers and writes lines; [`Silent`] returns empty strings and
//! writes nothing. [`Selected`] is whichever one the build picked, and the
//! free functions [`ptr_to_string`] and [`to_cout`] forward to it.

use std::io::{self, Write};

/// Prefix of every formatted pointer.
pub const PTR_TAG: &str = "PTR";

/// Hex digits in a formatted address.
pub const ADDRESS_WIDTH: usize = 16;

/// `true` when the crate was built with the `to-cout` feature.
pub const ENABLED: bool = cfg!(feature = "to-cout");

/// Formatting and output of pointer diagnostics.
pub trait Diagnostics {
    /// Encodes the address and pointee type of `ptr`.
    fn ptr_to_string<T: ?Sized>(ptr: *const T) -> String;

    /// Writes one diagnostic line to `out`.
    fn emit<W: Write>(out: &mut W, msg: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Emitting;

impl Diagnostics for Emitting {
    fn ptr_to_string<T: ?Sized>(ptr: *const T) -> String {
        let address = ptr.cast::<()>() as usize;
        format!(
            "{}{:0width$x} {}",
            PTR_TAG,
            address,
            std::any::type_name::<*const T>(),
            width = ADDRESS_WIDTH
        )
    }

    fn emit<W: Write>(out: &mut W, msg: &str) -> io::Result<()> {
        writeln!(out, "{}", msg)?;
        out.flush()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn ptr_to_string<T: ?Sized>(_ptr: *const T) -> String {
        String::new()
    }

    fn emit<W: Write>(_out: &mut W, _msg: &str) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "to-cout")]
pub type Selected = Emitting;

#[cfg(not(feature = "to-cout"))]
pub type Selected = Silent;

pub fn ptr_to_string<T: ?Sized>(ptr: *const T) -> String {
    Selected::ptr_to_string(ptr)
}

/// Writes `msg` to stdout. Write failures are ignored.
pub fn to_cout(msg: &str) {
    if ENABLED {
        let stdout = io::stdout();
        let _ = Selected::emit(&mut stdout.lock(), msg);
    }
}

/// Reports the current source location through [`to_cout`].
#[macro_export]
macro_rules! trace_location {
    () => {
        if $crate::diagnostics::ENABLED {
            $crate::diagnostics::to_cout(&format!("HERE {} {}", line!(), file!()));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitting_starts_with_tag() {
        let value = 42u32;
        let s = Emitting::ptr_to_string(&value as *const u32);
        assert!(s.starts_with(PTR_TAG));
    }

    #[test]
    fn test_emitting_encodes_address() {
        let value = 7i64;
        let ptr = &value as *const i64;
        let s = Emitting::ptr_to_string(ptr);

        let hex = &s[PTR_TAG.len()..PTR_TAG.len() + ADDRESS_WIDTH];
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(usize::from_str_radix(hex, 16).unwrap(), ptr as usize);
        assert_eq!(&s[PTR_TAG.len() + ADDRESS_WIDTH..], " *const i64");
    }

    #[test]
    fn test_emitting_null_is_zero_padded() {
        let s = Emitting::ptr_to_string(std::ptr::null::<u8>());
        assert_eq!(s, "PTR0000000000000000 *const u8");
    }

    #[test]
    fn test_emitting_unsized_pointee() {
        let text = "abc";
        let s = Emitting::ptr_to_string(text as *const str);
        assert!(s.starts_with(PTR_TAG));
        assert!(s.ends_with("*const str"));
    }

    #[test]
    fn test_emitting_writes_line() {
        let mut out = Vec::new();
        Emitting::emit(&mut out, "hello").unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[test]
    fn test_silent_is_empty() {
        let value = 1u8;
        assert_eq!(Silent::ptr_to_string(&value as *const u8), "");

        let mut out = Vec::new();
        Silent::emit(&mut out, "hello").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_selected_matches_feature() {
        let value = 3u16;
        let s = ptr_to_string(&value as *const u16);
        if ENABLED {
            assert!(s.starts_with(PTR_TAG));
        } else {
            assert!(s.is_empty());
        }
    }

    #[test]
    fn test_free_functions_do_not_panic() {
        to_cout("diagnostics smoke test");
        crate::trace_location!();
    }
}
