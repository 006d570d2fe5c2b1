//! Source-literal rendering of a [`Colormap`].
//!
//! C:
//!
//! ```text
//! uint8_t colormap[256][3] = {
//!     {127, 0, 0},
//!     ...
//!     {0, 0, 127}
//! };
//! ```
//!
//! Rust:
//!
//! ```text
//! pub const COLORMAP: [[u8; 3]; 256] = [
//!     [127, 0, 0],
//!     ...
//! ];
//! ```

use {
    crate::*,
    std::{
        fmt::{self, Write},
        str::FromStr,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    C,
    Rust,
}

impl Language {
    pub fn default_name(&self) -> &'static str {
        match self {
            Language::C => "colormap",
            Language::Rust => "COLORMAP",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::C => f.write_str("c"),
            Language::Rust => f.write_str("rust"),
        }
    }
}

impl FromStr for Language {
    type Err = ColormapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Language::C),
            "rust" | "rs" => Ok(Language::Rust),
            other => Err(ColormapError::UnknownLanguage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub language: Language,
    pub order: ChannelOrder,
    /// Array identifier; [`Language::default_name`] when `None`.
    pub name: Option<String>,
}

impl RenderOptions {
    pub fn new(language: Language, order: ChannelOrder) -> Self {
        Self {
            language,
            order,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.language.default_name())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Render every entry as a source literal in the requested language and order.
pub fn render(colormap: &Colormap, options: &RenderOptions) -> Result<String, ColormapError> {
    let name = options.name();
    if !is_identifier(name) {
        return Err(ColormapError::InvalidName(name.to_string()));
    }
    let entries = colormap.entries(options.order);
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = match options.language {
        Language::C => write_c(&mut out, name, &entries),
        Language::Rust => write_rust(&mut out, name, &entries),
    };
    Ok(out)
}

fn write_c(out: &mut String, name: &str, entries: &[[u8; 3]]) -> fmt::Result {
    writeln!(out, "uint8_t {}[{}][3] = {{", name, entries.len())?;
    let last = entries.len().saturating_sub(1);
    for (i, [a, b, c]) in entries.iter().enumerate() {
        let separator = if i < last { "," } else { "" };
        writeln!(out, "\t{{{}, {}, {}}}{}", a, b, c, separator)?;
    }
    writeln!(out, "}};")
}

fn write_rust(out: &mut String, name: &str, entries: &[[u8; 3]]) -> fmt::Result {
    writeln!(out, "pub const {}: [[u8; 3]; {}] = [", name, entries.len())?;
    for [a, b, c] in entries {
        writeln!(out, "    [{}, {}, {}],", a, b, c)?;
    }
    writeln!(out, "];")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("colormap"));
        assert!(is_identifier("_jet2"));
        assert!(!is_identifier("2jet"));
        assert!(!is_identifier("jet-map"));
        assert!(!is_identifier(""));
    }
}
