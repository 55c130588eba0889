//! Directory snapshots and their comparison.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::common::RelativePath;

/// Relative path → exact bytes for every file under the captured roots.
///
/// Paths are prefixed with their output root, so `src/generated/a/types.ts`
/// in the working tree is `src/generated/a/types.ts` in the snapshot too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    files: BTreeMap<RelativePath, Vec<u8>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: RelativePath, contents: Vec<u8>) {
        self.files.insert(path, contents);
    }

    pub fn with_file(mut self, path: RelativePath, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents.into());
        self
    }

    pub fn get(&self, path: &RelativePath) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.files.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelativePath, &[u8])> {
        self.files.iter().map(|(p, c)| (p, c.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOutcome {
    Match,
    /// In the baseline, not generated.
    Missing,
    /// Generated, not in the baseline.
    Extra,
    ContentDiffers,
}

impl CompareOutcome {
    pub fn is_failure(self) -> bool {
        !matches!(self, Self::Match)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareEntry {
    pub path: RelativePath,
    pub outcome: CompareOutcome,
}

impl fmt::Display for CompareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            CompareOutcome::Match => write!(f, "✓ {}", self.path),
            CompareOutcome::Missing => write!(f, "✗ {} (missing)", self.path),
            CompareOutcome::Extra => write!(f, "✗ {} (extra)", self.path),
            CompareOutcome::ContentDiffers => write!(f, "✗ {} (content differs)", self.path),
        }
    }
}

/// Every compared path with its outcome, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompareReport {
    entries: Vec<CompareEntry>,
}

impl CompareReport {
    pub fn entries(&self) -> &[CompareEntry] {
        &self.entries
    }

    pub fn failures(&self) -> impl Iterator<Item = &CompareEntry> {
        self.entries.iter().filter(|e| e.outcome.is_failure())
    }

    pub fn count(&self, outcome: CompareOutcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    pub fn passed(&self) -> bool {
        self.failures().next().is_none()
    }

    /// 0 when every file matches, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }

    pub fn summary(&self) -> String {
        let matched = self.count(CompareOutcome::Match);
        if self.passed() {
            return format!("{matched} file(s) match the baseline");
        }
        format!(
            "{} failure(s): {} missing, {} extra, {} differing ({} matching)",
            self.failures().count(),
            self.count(CompareOutcome::Missing),
            self.count(CompareOutcome::Extra),
            self.count(CompareOutcome::ContentDiffers),
            matched,
        )
    }
}

/// Byte-exact comparison of two snapshots over the union of their paths.
pub fn compare_snapshots(baseline: &Snapshot, generated: &Snapshot) -> CompareReport {
    let mut entries: Vec<CompareEntry> = baseline
        .iter()
        .map(|(path, expected)| {
            let outcome = match generated.get(path) {
                None => CompareOutcome::Missing,
                Some(actual) if actual == expected => CompareOutcome::Match,
                Some(_) => CompareOutcome::ContentDiffers,
            };
            CompareEntry {
                path: path.clone(),
                outcome,
            }
        })
        .collect();

    entries.extend(
        generated
            .paths()
            .filter(|p| baseline.get(p).is_none())
            .map(|p| CompareEntry {
                path: p.clone(),
                outcome: CompareOutcome::Extra,
            }),
    );
    entries.sort_by(|a, b| a.path.cmp(&b.path));

    CompareReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rp(s: &str) -> RelativePath {
        RelativePath::try_new(s).unwrap()
    }

    #[test]
    fn identical_snapshots_pass() {
        let snap = Snapshot::new()
            .with_file(rp("gen/a.ts"), "a")
            .with_file(rp("gen/b.ts"), "b");
        let report = compare_snapshots(&snap, &snap.clone());

        assert!(report.passed());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.count(CompareOutcome::Match), 2);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn every_mismatch_is_reported() {
        let baseline = Snapshot::new()
            .with_file(rp("gen/same.ts"), "x")
            .with_file(rp("gen/gone.ts"), "x")
            .with_file(rp("gen/changed.ts"), "old");
        let generated = Snapshot::new()
            .with_file(rp("gen/same.ts"), "x")
            .with_file(rp("gen/changed.ts"), "new")
            .with_file(rp("gen/added.ts"), "x");

        let report = compare_snapshots(&baseline, &generated);
        let lines: Vec<String> = report.entries().iter().map(ToString::to_string).collect();

        assert_eq!(
            lines,
            [
                "✗ gen/added.ts (extra)",
                "✗ gen/changed.ts (content differs)",
                "✗ gen/gone.ts (missing)",
                "✓ gen/same.ts",
            ]
        );
        assert!(!report.passed());
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.failures().count(), 3);
        assert!(report.summary().starts_with("3 failure(s)"));
    }

    #[test]
    fn comparison_is_byte_exact() {
        let baseline = Snapshot::new().with_file(rp("a.ts"), "x\n");
        let generated = Snapshot::new().with_file(rp("a.ts"), "x\r\n");
        assert_eq!(
            compare_snapshots(&baseline, &generated).entries()[0].outcome,
            CompareOutcome::ContentDiffers
        );
    }

    #[test]
    fn empty_vs_empty_passes() {
        let report = compare_snapshots(&Snapshot::new(), &Snapshot::new());
        assert!(report.passed());
        assert!(report.entries().is_empty());
    }
}
