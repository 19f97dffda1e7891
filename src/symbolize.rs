//! Rewrites raw pointer addresses in diagnostic output into stable symbols.
//!
//! Addresses differ on every run, which makes two traces impossible to diff.
//! Each distinct address is replaced by a symbol assigned in order of first
//! appearance (`AAA`, `BBB`, ...), so equal traces produce equal text.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::diagnostics::{ADDRESS_WIDTH, PTR_TAG};
use crate::error::SymbolizeError;

lazy_static! {
    // Either the fixed-width hex form written by `ptr_to_string`, or the
    // legacy `PTR=<decimal>=` form. Longer hex runs are not addresses.
    static ref POINTER_TOKEN: Regex = Regex::new(&format!(
        r"{tag}(?:(?P<hex>[0-9a-f]{{{width}}})\b|=(?P<dec>[0-9]+)=)",
        tag = PTR_TAG,
        width = ADDRESS_WIDTH
    ))
    .expect("pointer token pattern is valid");
}

/// Symbol for the `index`-th distinct pointer (0-based).
pub fn symbol_for(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    let round = index / 26;
    let mut symbol: String = std::iter::repeat(letter).take(3).collect();
    if round > 0 {
        symbol.push_str(&round.to_string());
    }
    symbol
}

#[derive(Debug, Default)]
pub struct PointerSymbolizer {
    symbols: HashMap<String, String>,
}

impl PointerSymbolizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct pointers seen so far.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol already assigned to `token`, if any.
    pub fn symbol_of(&self, token: &str) -> Option<&str> {
        self.symbols.get(token).map(String::as_str)
    }

    pub fn symbolize(&mut self, text: &str) -> String {
        POINTER_TOKEN
            .replace_all(text, |caps: &Captures| {
                let token = &caps[0];
                let next = self.symbols.len();
                let symbol = self
                    .symbols
                    .entry(token.to_string())
                    .or_insert_with(|| symbol_for(next));

                if caps.name("hex").is_some() {
                    format!("{}{}", PTR_TAG, symbol)
                } else {
                    format!("{}={}=", PTR_TAG, symbol)
                }
            })
            .into_owned()
    }
}

/// Reads `source`, where `"-"` means stdin, and symbolizes its contents.
pub fn symbolize_source(source: &str) -> Result<String, SymbolizeError> {
    let text = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| SymbolizeError::io(None, e))?;
        buf
    } else {
        read_file(Path::new(source))?
    };
    Ok(PointerSymbolizer::new().symbolize(&text))
}

/// Command-line entry: `args` excludes the program name and must be a single
/// `<file|->`. The returned text is printed as-is.
pub fn run(args: &[String]) -> Result<String, SymbolizeError> {
    match args {
        [source] => symbolize_source(source),
        _ => Err(SymbolizeError::Usage(args.len())),
    }
}

fn read_file(path: &Path) -> Result<String, SymbolizeError> {
    fs::read_to_string(path).map_err(|e| SymbolizeError::io(Some(PathBuf::from(path)), e))
}
