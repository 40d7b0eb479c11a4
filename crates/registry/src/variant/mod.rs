//! Variant ids
//!
//! Catalog ids follow `<base>-<quant>-MLC[-<ctx>]`, for example
//! `Phi-3-mini-4k-instruct-q4f16_1-MLC-1k`. The base may itself contain
//! dashes and size tokens, so parsing anchors on the quantization tag
//! directly followed by the `MLC` marker.

use crate::Error;
use compact_str::CompactString;
use std::{fmt::Display, str::FromStr};
pub use quant::{Precision, Quantization};

mod quant;

/// Build marker that follows the quantization tag.
const MARKER: &str = "MLC";

/// A reduced context window encoded as an id suffix (`-1k`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextWindow(pub u32);

impl ContextWindow {
    /// Window size in tokens.
    pub fn tokens(&self) -> u32 {
        self.0
    }
}

impl Display for ContextWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 1024 == 0 {
            write!(f, "{}k", self.0 / 1024)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for ContextWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidId(s.into());
        let tokens = match s.strip_suffix('k') {
            Some(kilo) => kilo
                .parse::<u32>()
                .ok()
                .and_then(|k| k.checked_mul(1024))
                .ok_or_else(invalid)?,
            None => s.parse::<u32>().map_err(|_| invalid())?,
        };
        // Only the canonical spelling is accepted so ids round-trip.
        let window = Self(tokens);
        if tokens == 0 || window.to_string() != s {
            return Err(invalid());
        }
        Ok(window)
    }
}

/// A parsed variant id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId {
    /// Model name and size, e.g. `Llama-3-8B-Instruct`.
    pub base: CompactString,

    /// The quantization tag.
    pub quantization: Quantization,

    /// Reduced context window, `None` for the build's default.
    pub context: Option<ContextWindow>,
}

impl ModelId {
    /// Parse an id.
    pub fn parse(id: &str) -> Result<Self, Error> {
        id.parse()
    }

    /// Whether this is a reduced-context build.
    pub fn is_reduced_context(&self) -> bool {
        self.context.is_some()
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{MARKER}", self.base, self.quantization)?;
        if let Some(ctx) = self.context {
            write!(f, "-{ctx}")?;
        }
        Ok(())
    }
}

impl FromStr for ModelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidId(s.into());
        let parts: Vec<&str> = s.split('-').collect();

        // The quant tag is the last part followed directly by the marker.
        let quant_at = parts
            .windows(2)
            .rposition(|w| w[1] == MARKER && w[0].parse::<Quantization>().is_ok())
            .ok_or_else(invalid)?;
        if quant_at == 0 {
            return Err(invalid());
        }

        let context = match &parts[quant_at + 2..] {
            [] => None,
            [ctx] => Some(ctx.parse::<ContextWindow>().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };

        Ok(Self {
            base: CompactString::from(parts[..quant_at].join("-")),
            quantization: parts[quant_at].parse()?,
            context,
        })
    }
}
