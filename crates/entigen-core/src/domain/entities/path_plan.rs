//! Output-structure path planning.
//!
//! [`plan_paths`] is pure: it decides which artifacts exist for one entity and
//! where they go relative to an output root. Structure mode decides *where*;
//! the generation flags decide *whether*. Each kind's path depends only on
//! the entity and the kind, never on which neighbours are enabled.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::common::RelativePath;
use crate::domain::value_objects::{ArtifactKind, EntityName, OutputStructureMode};

const EXT: &str = "ts";

// ── Generation flags ─────────────────────────────────────────────────────────

/// Per-artifact switches from an entity's `generate:` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationFlags {
    pub types: bool,
    pub collections: bool,
    pub hooks: bool,
    pub mutations: bool,
    pub field_metadata: bool,
    /// Entity-first barrel `index.ts`.
    pub barrel: bool,
}

impl Default for GenerationFlags {
    fn default() -> Self {
        Self {
            types: true,
            collections: true,
            hooks: true,
            mutations: true,
            field_metadata: true,
            barrel: true,
        }
    }
}

impl GenerationFlags {
    /// Everything off; enable kinds with [`GenerationFlags::enable`].
    pub fn none() -> Self {
        Self {
            types: false,
            collections: false,
            hooks: false,
            mutations: false,
            field_metadata: false,
            barrel: false,
        }
    }

    pub fn enable(mut self, kind: ArtifactKind) -> Self {
        self.set(kind, true);
        self
    }

    pub fn disable(mut self, kind: ArtifactKind) -> Self {
        self.set(kind, false);
        self
    }

    fn set(&mut self, kind: ArtifactKind, on: bool) {
        match kind {
            ArtifactKind::Types => self.types = on,
            ArtifactKind::Collection => self.collections = on,
            ArtifactKind::Hooks => self.hooks = on,
            ArtifactKind::Mutations => self.mutations = on,
            ArtifactKind::Fields => self.field_metadata = on,
            ArtifactKind::Index => self.barrel = on,
            // The combined file has no flag of its own.
            ArtifactKind::Combined => {}
        }
    }

    /// The flag gating `kind`. For `Combined` this is "any content enabled".
    pub fn is_enabled(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Types => self.types,
            ArtifactKind::Collection => self.collections,
            ArtifactKind::Hooks => self.hooks,
            ArtifactKind::Mutations => self.mutations,
            ArtifactKind::Fields => self.field_metadata,
            ArtifactKind::Index => self.barrel,
            ArtifactKind::Combined => self.any_content(),
        }
    }

    pub fn any_content(&self) -> bool {
        ArtifactKind::CONTENT.iter().any(|&k| self.is_enabled(k))
    }
}

/// The whole `generate:` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub structure: OutputStructureMode,
    #[serde(flatten)]
    pub flags: GenerationFlags,
}

// ── PathPlan ─────────────────────────────────────────────────────────────────

/// The artifacts planned for one entity, keyed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPlan {
    entity: EntityName,
    mode: OutputStructureMode,
    artifacts: BTreeMap<ArtifactKind, RelativePath>,
}

impl PathPlan {
    pub fn entity(&self) -> &EntityName {
        &self.entity
    }

    pub fn mode(&self) -> OutputStructureMode {
        self.mode
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<&RelativePath> {
        self.artifacts.get(&kind)
    }

    pub fn contains(&self, kind: ArtifactKind) -> bool {
        self.artifacts.contains_key(&kind)
    }

    /// Artifacts in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, &RelativePath)> {
        self.artifacts.iter().map(|(k, p)| (*k, p))
    }

    pub fn kinds(&self) -> Vec<ArtifactKind> {
        self.artifacts.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Module specifiers the barrel re-exports (`./types`, ...). Empty when
    /// no barrel is planned.
    pub fn barrel_exports(&self) -> Vec<String> {
        if !self.contains(ArtifactKind::Index) {
            return Vec::new();
        }
        self.artifacts
            .keys()
            .filter(|k| ArtifactKind::CONTENT.contains(*k))
            .map(|k| format!("./{}", k.as_str()))
            .collect()
    }

    /// Join every path onto `root`. No filesystem access.
    pub fn resolve(&self, root: impl AsRef<Path>) -> BTreeMap<ArtifactKind, PathBuf> {
        let root = root.as_ref();
        self.artifacts
            .iter()
            .map(|(k, p)| (*k, root.join(p.as_path())))
            .collect()
    }
}

fn file_name(stem: &str) -> String {
    format!("{stem}.{EXT}")
}

/// Plan the output files for `entity` under `mode`.
pub fn plan_paths(
    entity: &EntityName,
    mode: OutputStructureMode,
    flags: &GenerationFlags,
) -> PathPlan {
    let enabled = ArtifactKind::CONTENT
        .into_iter()
        .filter(|&k| flags.is_enabled(k));

    let mut artifacts = BTreeMap::new();
    match mode {
        OutputStructureMode::EntityFirst => {
            let dir = PathBuf::from(entity.as_str());
            for kind in enabled {
                artifacts.insert(kind, dir.join(file_name(kind.as_str())));
            }
            if flags.barrel && !artifacts.is_empty() {
                artifacts.insert(ArtifactKind::Index, dir.join(file_name("index")));
            }
        }
        OutputStructureMode::ConcernFirst => {
            for kind in enabled {
                artifacts.insert(
                    kind,
                    PathBuf::from(kind.as_str()).join(file_name(entity.as_str())),
                );
            }
        }
        OutputStructureMode::Monolithic => {
            if flags.is_enabled(ArtifactKind::Combined) {
                artifacts.insert(ArtifactKind::Combined, PathBuf::from(file_name(entity.as_str())));
            }
        }
    }

    PathPlan {
        entity: entity.clone(),
        mode,
        artifacts: artifacts
            .into_iter()
            .map(|(k, p)| (k, RelativePath::from_trusted(p)))
            .collect(),
    }
}
