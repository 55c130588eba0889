//! Domain value objects: strategy, structure mode, artifact kind, entity name.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. This
//! file's only job is to define the types, their string representations, and
//! their `FromStr` parsers. Path rules live in `entities::path_plan`.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. For an artifact kind, add its gate in `GenerationFlags::is_enabled`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── BehaviorStrategy ─────────────────────────────────────────────────────────

/// How behavior capabilities are materialised in the generated repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorStrategy {
    /// Generated repositories extend a shared base class.
    #[default]
    BaseClass,
    /// Behavior methods are emitted inline in every repository.
    Inline,
}

impl BehaviorStrategy {
    pub const ALL: [Self; 2] = [Self::BaseClass, Self::Inline];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BaseClass => "base_class",
            Self::Inline => "inline",
        }
    }
}

impl fmt::Display for BehaviorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match only: entity overrides that are not a valid value must fall
/// through to the global setting rather than being coerced.
impl FromStr for BehaviorStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base_class" => Ok(Self::BaseClass),
            "inline" => Ok(Self::Inline),
            other => Err(DomainError::InvalidStrategy(other.to_string())),
        }
    }
}

// ── OutputStructureMode ──────────────────────────────────────────────────────

/// Mutually exclusive output layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputStructureMode {
    /// `<entity>/<kind>.ts`, plus an optional barrel `index.ts`.
    #[default]
    EntityFirst,
    /// `<kind>/<entity>.ts`.
    ConcernFirst,
    /// A single `<entity>.ts` holding every enabled concern.
    Monolithic,
}

impl OutputStructureMode {
    pub const ALL: [Self; 3] = [Self::EntityFirst, Self::ConcernFirst, Self::Monolithic];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EntityFirst => "entity-first",
            Self::ConcernFirst => "concern-first",
            Self::Monolithic => "monolithic",
        }
    }
}

impl fmt::Display for OutputStructureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputStructureMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Same spellings the `generate.structure` key accepts.
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStructureMode(s.to_string()))
    }
}

// ── ArtifactKind ─────────────────────────────────────────────────────────────

/// A logical category of generated output.
///
/// Declaration order is the canonical plan order (and the barrel's export
/// order), so `Ord` is derived rather than implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Types,
    Collection,
    Hooks,
    Mutations,
    Fields,
    Index,
    Combined,
}

impl ArtifactKind {
    /// Kinds that carry generated code of their own (everything except the
    /// barrel and the monolithic file, which only aggregate).
    pub const CONTENT: [Self; 5] = [
        Self::Types,
        Self::Collection,
        Self::Hooks,
        Self::Mutations,
        Self::Fields,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Types => "types",
            Self::Collection => "collection",
            Self::Hooks => "hooks",
            Self::Mutations => "mutations",
            Self::Fields => "fields",
            Self::Index => "index",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Importance ───────────────────────────────────────────────────────────────

/// UI prominence of a generated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Primary,
    Secondary,
    Tertiary,
}

// ── EntityName ───────────────────────────────────────────────────────────────

/// A validated entity name, safe to use as a directory or file stem.
///
/// Invariant: non-empty, no path separators, not `.`-prefixed. Enforced at
/// construction so the path planner never has to fail.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityName(String);

impl EntityName {
    pub fn try_new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let reason = if name.trim().is_empty() {
            Some("name cannot be empty")
        } else if name.starts_with('.') {
            Some("name cannot start with '.'")
        } else if name.contains('/') || name.contains('\\') {
            Some("name cannot contain path separators")
        } else if name.chars().any(char::is_whitespace) {
            Some("name cannot contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidEntityName {
                name,
                reason: reason.into(),
            }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s)
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
