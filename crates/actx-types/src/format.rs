use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A wire format this crate knows how to normalize from or convert to.
///
/// `Canonical` is not a provider at all — it is the identity format used
/// when callers already hold (or want back) the internal message shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Canonical,
    OpenAI,
    Anthropic,
    Gemini,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Canonical => "canonical",
            Format::OpenAI => "openai",
            Format::Anthropic => "anthropic",
            Format::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "canonical" => Ok(Format::Canonical),
            "openai" => Ok(Format::OpenAI),
            "anthropic" => Ok(Format::Anthropic),
            "gemini" => Ok(Format::Gemini),
            other => Err(Error::unsupported_format(other)),
        }
    }
}
