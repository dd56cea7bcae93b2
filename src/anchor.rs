//! # Anchor parser (L4)
//!
//! Parses the `"<line>#<hash>"` anchor strings an edit batch cites, and
//! normalizes the backward-compatible `{line, hash}` object form (spec
//! §4.4, §6) into the same internal [`Anchor`]. The dual-shape decoder
//! mirrors the tagged-union `Deserialize` impl the teacher uses for
//! `PatchOperation` in `file_state.rs`.

use crate::error::EngineError;
use crate::hash::DELETED_HASH;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated `(line, hash)` pair. `line` is 1-indexed; `hash` is always
/// exactly 2 characters drawn from the anchor alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub line: usize,
    pub hash: String,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.line, self.hash)
    }
}

impl Anchor {
    /// Parses the canonical string form, `"<positive-int>#<2-char-hash>"`.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        let Some((line_part, hash_part)) = s.split_once('#') else {
            return Err(EngineError::InvalidAnchorSyntax(s.to_string()));
        };

        let line: usize = line_part
            .parse()
            .map_err(|_| EngineError::InvalidAnchorSyntax(s.to_string()))?;
        if line == 0 {
            return Err(EngineError::InvalidAnchorSyntax(s.to_string()));
        }

        if hash_part.chars().count() != 2 {
            return Err(EngineError::InvalidAnchorSyntax(s.to_string()));
        }
        if hash_part == DELETED_HASH
            || !hash_part
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        {
            return Err(EngineError::InvalidAnchorSyntax(s.to_string()));
        }

        Ok(Anchor {
            line,
            hash: hash_part.to_string(),
        })
    }
}

/// Deserializes either the canonical `"8#RT"` string or the legacy
/// `{"line": 8, "hash": "RT"}` object, normalizing both to [`Anchor`].
impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AnchorVisitor;

        impl<'de> Visitor<'de> for AnchorVisitor {
            type Value = Anchor;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an anchor string \"<line>#<hash>\" or a {line, hash} object")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Anchor::parse(v).map_err(de::Error::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut line: Option<usize> = None;
                let mut hash: Option<String> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "line" => line = Some(map.next_value()?),
                        "hash" => hash = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                let line = line.ok_or_else(|| de::Error::missing_field("line"))?;
                let hash = hash.ok_or_else(|| de::Error::missing_field("hash"))?;
                Anchor::parse(&format!("{line}#{hash}")).map_err(de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                Err(de::Error::invalid_type(
                    de::Unexpected::Seq,
                    &"an anchor string or {line, hash} object",
                ))
            }
        }

        deserializer.deserialize_any(AnchorVisitor)
    }
}
