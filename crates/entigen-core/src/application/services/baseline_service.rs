//! Baseline regression harness.
//!
//! Workflow, all paths relative to the working directory:
//! 1. `baseline`: copy every output root into `baseline_dir`
//! 2. `generate`: clear the output roots, run the generator per fixture,
//!    format, copy the output roots into `scratch_dir`
//! 3. `compare`: diff `baseline_dir` against `scratch_dir`
//!
//! Snapshot directories mirror the output roots, so `src/generated/a.ts`
//! is stored as `<baseline_dir>/src/generated/a.ts`. Runs are sequential and
//! assume exclusive ownership of both snapshot directories and of the output
//! roots, which `generate` empties before the first fixture runs.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, FixtureGenerator, OutputFormatter},
    },
    domain::{CompareReport, DomainValidator, RelativePath, Snapshot, compare_snapshots},
    error::{EntigenError, EntigenResult},
};

pub const DEFAULT_OUTPUT_ROOT: &str = "src/generated";
pub const DEFAULT_BASELINE_DIR: &str = ".baseline/baseline";
pub const DEFAULT_SCRATCH_DIR: &str = ".baseline/gen";
pub const DEFAULT_FIXTURES_DIR: &str = "fixtures";
pub const DEFAULT_FIXTURE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Where the harness reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessLayout {
    working_dir: PathBuf,
    output_roots: Vec<RelativePath>,
    baseline_dir: RelativePath,
    scratch_dir: RelativePath,
    fixtures_dir: RelativePath,
    fixture_extensions: Vec<String>,
}

impl HarnessLayout {
    /// Layout with the default directories under `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            output_roots: vec![RelativePath::from_trusted(DEFAULT_OUTPUT_ROOT.into())],
            baseline_dir: RelativePath::from_trusted(DEFAULT_BASELINE_DIR.into()),
            scratch_dir: RelativePath::from_trusted(DEFAULT_SCRATCH_DIR.into()),
            fixtures_dir: RelativePath::from_trusted(DEFAULT_FIXTURES_DIR.into()),
            fixture_extensions: DEFAULT_FIXTURE_EXTENSIONS.map(String::from).to_vec(),
        }
    }

    pub fn with_output_roots<S: AsRef<str>>(mut self, roots: &[S]) -> EntigenResult<Self> {
        self.output_roots = DomainValidator::validate_output_roots(roots)?;
        Ok(self)
    }

    pub fn with_baseline_dir(mut self, dir: &str) -> EntigenResult<Self> {
        self.baseline_dir = RelativePath::try_new(dir)?;
        Ok(self)
    }

    pub fn with_scratch_dir(mut self, dir: &str) -> EntigenResult<Self> {
        self.scratch_dir = RelativePath::try_new(dir)?;
        Ok(self)
    }

    pub fn with_fixtures_dir(mut self, dir: &str) -> EntigenResult<Self> {
        self.fixtures_dir = RelativePath::try_new(dir)?;
        Ok(self)
    }

    /// Extensions without the leading dot.
    pub fn with_fixture_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.fixture_extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn output_roots(&self) -> &[RelativePath] {
        &self.output_roots
    }

    pub fn baseline_dir(&self) -> &RelativePath {
        &self.baseline_dir
    }

    pub fn scratch_dir(&self) -> &RelativePath {
        &self.scratch_dir
    }

    pub fn fixtures_dir(&self) -> &RelativePath {
        &self.fixtures_dir
    }

    fn abs(&self, rel: &RelativePath) -> PathBuf {
        self.working_dir.join(rel.as_path())
    }

    /// Snapshot, fixture and output directories must not contain one
    /// another, or a capture would copy itself and clearing the output roots
    /// would take fixtures or snapshots with it.
    pub fn validate(&self) -> EntigenResult<()> {
        let mut dirs: Vec<(&str, &RelativePath)> = vec![
            ("baseline_dir", &self.baseline_dir),
            ("scratch_dir", &self.scratch_dir),
            ("fixtures_dir", &self.fixtures_dir),
        ];
        dirs.extend(self.output_roots.iter().map(|r| ("output root", r)));

        for (i, (a_name, a)) in dirs.iter().enumerate() {
            for (b_name, b) in dirs.iter().skip(i + 1) {
                if a.as_path().starts_with(b.as_path()) || b.as_path().starts_with(a.as_path()) {
                    return Err(ApplicationError::InvalidLayout {
                        reason: format!("{a_name} '{a}' overlaps {b_name} '{b}'"),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Result of capturing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSummary {
    pub roots: usize,
    pub files: usize,
}

/// Result of a successful `generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub fixtures: usize,
    pub files: usize,
    /// False when the formatter was skipped or failed.
    pub formatted: bool,
}

pub struct BaselineHarness {
    layout: HarnessLayout,
    filesystem: Box<dyn Filesystem>,
    generator: Box<dyn FixtureGenerator>,
    formatter: Option<Box<dyn OutputFormatter>>,
}

impl BaselineHarness {
    pub fn new(
        layout: HarnessLayout,
        filesystem: Box<dyn Filesystem>,
        generator: Box<dyn FixtureGenerator>,
    ) -> Self {
        Self {
            layout,
            filesystem,
            generator,
            formatter: None,
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn OutputFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn layout(&self) -> &HarnessLayout {
        &self.layout
    }

    pub fn has_baseline(&self) -> bool {
        self.filesystem.exists(&self.layout.abs(&self.layout.baseline_dir))
    }

    /// Replace the baseline with the current contents of the output roots.
    #[instrument(skip_all, fields(dir = %self.layout.baseline_dir))]
    pub fn baseline(&self) -> EntigenResult<CaptureSummary> {
        self.layout.validate()?;
        let summary = self.capture_into(&self.layout.baseline_dir)?;
        info!(files = summary.files, "baseline captured");
        Ok(summary)
    }

    pub fn generate(&self) -> EntigenResult<GenerateSummary> {
        self.generate_with_progress(|_, _, _| {})
    }

    /// Regenerate every fixture from empty output roots, then snapshot into
    /// the scratch directory.
    ///
    /// Files the generator no longer produces are gone from the snapshot, so
    /// they show up as missing. `on_fixture(index, total, fixture)` runs
    /// before each fixture. The first generator failure aborts the run.
    #[instrument(skip_all, fields(dir = %self.layout.scratch_dir))]
    pub fn generate_with_progress(
        &self,
        mut on_fixture: impl FnMut(usize, usize, &Path),
    ) -> EntigenResult<GenerateSummary> {
        self.layout.validate()?;
        self.filesystem
            .remove_dir_all(&self.layout.abs(&self.layout.scratch_dir))?;

        let fixtures = self.discover_fixtures()?;
        if fixtures.is_empty() {
            warn!(dir = %self.layout.fixtures_dir, "no fixtures found");
        }

        for root in &self.layout.output_roots {
            debug!(root = %root, "clearing output root");
            self.filesystem.remove_dir_all(&self.layout.abs(root))?;
        }

        for (i, fixture) in fixtures.iter().enumerate() {
            on_fixture(i, fixtures.len(), fixture);
            info!(fixture = %fixture.display(), "generating");
            self.generator
                .generate(fixture)
                .map_err(|e| match e {
                    EntigenError::Application(ApplicationError::FixtureFailed { .. }) => e,
                    other => ApplicationError::FixtureFailed {
                        fixture: fixture.clone(),
                        reason: other.to_string(),
                    }
                    .into(),
                })?;
        }

        let formatted = self.run_formatter();
        let capture = self.capture_into(&self.layout.scratch_dir)?;
        info!(
            fixtures = fixtures.len(),
            files = capture.files,
            "generation snapshot captured"
        );

        Ok(GenerateSummary {
            fixtures: fixtures.len(),
            files: capture.files,
            formatted,
        })
    }

    /// Diff the scratch snapshot against the baseline.
    #[instrument(skip_all)]
    pub fn compare(&self) -> EntigenResult<CompareReport> {
        let baseline_dir = self.layout.abs(&self.layout.baseline_dir);
        if !self.filesystem.exists(&baseline_dir) {
            return Err(ApplicationError::BaselineMissing { path: baseline_dir }.into());
        }

        let baseline = self.load_snapshot(&baseline_dir)?;
        let generated = self.load_snapshot(&self.layout.abs(&self.layout.scratch_dir))?;
        let report = compare_snapshots(&baseline, &generated);

        info!(
            passed = report.passed(),
            compared = report.entries().len(),
            "comparison finished"
        );
        Ok(report)
    }

    /// `generate` then `compare`.
    pub fn full(&self) -> EntigenResult<CompareReport> {
        self.generate()?;
        self.compare()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Regular files directly under the fixtures directory with a known
    /// extension, as paths relative to the working directory, sorted.
    fn discover_fixtures(&self) -> EntigenResult<Vec<PathBuf>> {
        let dir = self.layout.abs(&self.layout.fixtures_dir);
        if !self.filesystem.exists(&dir) {
            return Err(ApplicationError::FixturesNotFound { path: dir }.into());
        }

        let fixtures = self
            .filesystem
            .list_files(&dir)?
            .into_iter()
            .filter(|rel| rel.components().count() == 1)
            .filter(|rel| {
                rel.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| self.layout.fixture_extensions.iter().any(|x| x == e))
            })
            .map(|rel| self.layout.fixtures_dir.as_path().join(rel))
            .collect();
        Ok(fixtures)
    }

    fn run_formatter(&self) -> bool {
        let Some(formatter) = &self.formatter else {
            debug!("no formatter configured");
            return false;
        };
        let roots: Vec<PathBuf> = self
            .layout
            .output_roots
            .iter()
            .map(|r| r.as_path().to_path_buf())
            .collect();

        match formatter.format(&roots) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "formatting failed; keeping unformatted output");
                false
            }
        }
    }

    /// Wipe `target` and copy every output root into it.
    fn capture_into(&self, target: &RelativePath) -> EntigenResult<CaptureSummary> {
        let target = self.layout.abs(target);
        self.filesystem.remove_dir_all(&target)?;
        self.filesystem.create_dir_all(&target)?;

        let mut summary = CaptureSummary { roots: 0, files: 0 };
        for root in &self.layout.output_roots {
            let source = self.layout.abs(root);
            if !self.filesystem.exists(&source) {
                warn!(root = %root, "output root does not exist; skipping");
                continue;
            }
            summary.roots += 1;

            for rel in self.filesystem.list_files(&source)? {
                let bytes = self.filesystem.read_bytes(&source.join(&rel))?;
                self.filesystem
                    .write_bytes(&target.join(root.as_path()).join(&rel), &bytes)?;
                summary.files += 1;
            }
        }
        Ok(summary)
    }

    fn load_snapshot(&self, dir: &Path) -> EntigenResult<Snapshot> {
        let mut snapshot = Snapshot::new();
        for rel in self.filesystem.list_files(dir)? {
            let bytes = self.filesystem.read_bytes(&dir.join(&rel))?;
            snapshot.insert(RelativePath::try_new(rel)?, bytes);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFixtureGenerator, MockOutputFormatter};
    use crate::domain::CompareOutcome;
    use crate::error::EntigenError;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    // ── In-test filesystem ───────────────────────────────────────────────────

    /// Files only; directories exist implicitly or via `create_dir_all`.
    #[derive(Clone, Default)]
    struct FakeFs {
        files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
        dirs: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl FakeFs {
        fn put(&self, path: &str, content: &str) {
            self.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.as_bytes().to_vec());
        }
    }

    impl Filesystem for FakeFs {
        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().keys().any(|p| p.starts_with(path))
                || self.dirs.lock().unwrap().iter().any(|d| d.starts_with(path))
        }

        fn read_bytes(&self, path: &Path) -> EntigenResult<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| ApplicationError::filesystem(path, "not found").into())
        }

        fn write_bytes(&self, path: &Path, content: &[u8]) -> EntigenResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_vec());
            Ok(())
        }

        fn create_dir_all(&self, path: &Path) -> EntigenResult<()> {
            self.dirs.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> EntigenResult<()> {
            self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
            self.dirs.lock().unwrap().retain(|d| !d.starts_with(path));
            Ok(())
        }

        fn list_files(&self, root: &Path) -> EntigenResult<Vec<PathBuf>> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .keys()
                .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
                .collect())
        }
    }

    fn workspace() -> FakeFs {
        let fs = FakeFs::default();
        fs.put("/w/fixtures/lead.yaml", "name: lead");
        fs.put("/w/fixtures/account.yml", "name: account");
        fs.put("/w/fixtures/README.md", "docs");
        fs.put("/w/fixtures/nested/skip.yaml", "name: skip");
        fs.put("/w/src/generated/lead/types.ts", "export type Lead = {};");
        fs
    }

    /// Generator that (re)writes `src/generated/lead/types.ts` with `content`.
    fn writing_generator(fs: &FakeFs, content: &'static str) -> MockFixtureGenerator {
        let fs = fs.clone();
        let mut generator = MockFixtureGenerator::new();
        generator.expect_generate().returning(move |_| {
            fs.put("/w/src/generated/lead/types.ts", content);
            Ok(())
        });
        generator
    }

    fn harness(fs: &FakeFs, generator: MockFixtureGenerator) -> BaselineHarness {
        BaselineHarness::new(
            HarnessLayout::new("/w"),
            Box::new(fs.clone()),
            Box::new(generator),
        )
    }

    // ── Layout ───────────────────────────────────────────────────────────────

    #[test]
    fn default_layout_is_valid() {
        assert!(HarnessLayout::new("/w").validate().is_ok());
    }

    #[test]
    fn overlapping_directories_are_rejected() {
        let layout = HarnessLayout::new("/w")
            .with_baseline_dir("src/generated/.baseline")
            .unwrap();
        assert!(layout.validate().is_err());
    }

    #[test]
    fn fixtures_inside_an_output_root_are_rejected() {
        let layout = HarnessLayout::new("/w")
            .with_fixtures_dir("src/generated/fixtures")
            .unwrap();
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("fixtures_dir"), "{err}");
    }

    #[test]
    fn absolute_directories_are_rejected() {
        assert!(HarnessLayout::new("/w").with_scratch_dir("/tmp/gen").is_err());
        assert!(HarnessLayout::new("/w").with_output_roots(&["../out"]).is_err());
    }

    // ── baseline ─────────────────────────────────────────────────────────────

    #[test]
    fn baseline_mirrors_output_roots() {
        let fs = workspace();
        fs.put("/w/.baseline/baseline/stale.ts", "old");
        let summary = harness(&fs, MockFixtureGenerator::new()).baseline().unwrap();

        assert_eq!(summary, CaptureSummary { roots: 1, files: 1 });
        assert!(fs.exists(Path::new("/w/.baseline/baseline/src/generated/lead/types.ts")));
        assert!(!fs.exists(Path::new("/w/.baseline/baseline/stale.ts")));
    }

    #[test]
    fn missing_root_is_skipped() {
        let fs = workspace();
        let h = BaselineHarness::new(
            HarnessLayout::new("/w")
                .with_output_roots(&["src/generated", "src/absent"])
                .unwrap(),
            Box::new(fs.clone()),
            Box::new(MockFixtureGenerator::new()),
        );
        assert_eq!(h.baseline().unwrap().roots, 1);
    }

    // ── generate ─────────────────────────────────────────────────────────────

    #[test]
    fn generate_runs_each_top_level_fixture_in_order() {
        let fs = workspace();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut generator = MockFixtureGenerator::new();
        let record = seen.clone();
        generator.expect_generate().times(2).returning(move |p| {
            record.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });

        let summary = harness(&fs, generator).generate().unwrap();
        assert_eq!(summary.fixtures, 2);
        assert_eq!(summary.files, 0);
        assert!(!summary.formatted);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                PathBuf::from("fixtures/account.yml"),
                PathBuf::from("fixtures/lead.yaml")
            ]
        );
    }

    #[test]
    fn generate_fails_fast() {
        let fs = workspace();
        let mut generator = MockFixtureGenerator::new();
        generator.expect_generate().times(1).returning(|_| {
            Err(ApplicationError::FilesystemError {
                path: "x".into(),
                reason: "renderer crashed".into(),
            }
            .into())
        });

        let err = harness(&fs, generator).generate().unwrap_err();
        match err {
            EntigenError::Application(ApplicationError::FixtureFailed { fixture, reason }) => {
                assert_eq!(fixture, PathBuf::from("fixtures/account.yml"));
                assert!(reason.contains("renderer crashed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!fs.exists(Path::new("/w/.baseline/gen")));
    }

    #[test]
    fn formatter_failure_is_not_fatal() {
        let fs = workspace();
        let mut formatter = MockOutputFormatter::new();
        formatter
            .expect_format()
            .withf(|roots| roots == [PathBuf::from("src/generated")])
            .times(1)
            .returning(|_| {
                Err(ApplicationError::FormatterFailed {
                    reason: "prettier missing".into(),
                }
                .into())
            });

        let summary = harness(&fs, writing_generator(&fs, "x"))
            .with_formatter(Box::new(formatter))
            .generate()
            .unwrap();
        assert!(!summary.formatted);
        assert_eq!(summary.files, 1);
    }

    #[test]
    fn generate_clears_stale_output_before_running() {
        let fs = workspace();
        fs.put("/w/src/generated/lead/mutations.ts", "export {};");

        let summary = harness(&fs, writing_generator(&fs, "x")).generate().unwrap();
        assert_eq!(summary.files, 1);
        assert!(!fs.exists(Path::new("/w/src/generated/lead/mutations.ts")));
        assert!(!fs.exists(Path::new("/w/.baseline/gen/src/generated/lead/mutations.ts")));
        assert!(fs.exists(Path::new("/w/fixtures/lead.yaml")));
    }

    #[test]
    fn missing_fixtures_dir_is_an_error() {
        let fs = FakeFs::default();
        fs.put("/w/src/generated/lead/types.ts", "kept");
        let err = harness(&fs, MockFixtureGenerator::new()).generate().unwrap_err();
        assert!(matches!(
            err,
            EntigenError::Application(ApplicationError::FixturesNotFound { .. })
        ));
        // Output is only cleared once there is something to regenerate it from.
        assert!(fs.exists(Path::new("/w/src/generated/lead/types.ts")));
    }

    // ── compare / full ───────────────────────────────────────────────────────

    #[test]
    fn compare_without_baseline_is_an_error() {
        let fs = workspace();
        let err = harness(&fs, MockFixtureGenerator::new()).compare().unwrap_err();
        assert!(matches!(
            err,
            EntigenError::Application(ApplicationError::BaselineMissing { .. })
        ));
    }

    #[test]
    fn compare_without_scratch_reports_everything_missing() {
        let fs = workspace();
        let h = harness(&fs, MockFixtureGenerator::new());
        h.baseline().unwrap();

        let report = h.compare().unwrap();
        assert!(!report.passed());
        assert_eq!(report.count(CompareOutcome::Missing), 1);
    }

    #[test]
    fn round_trip_without_changes_passes() {
        let fs = workspace();
        let h = harness(&fs, writing_generator(&fs, "export type Lead = {};"));
        h.baseline().unwrap();

        let report = h.full().unwrap();
        assert!(report.passed(), "{}", report.summary());
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn file_no_longer_generated_is_reported_missing() {
        let fs = workspace();
        fs.put("/w/src/generated/lead/mutations.ts", "export const useUpdateLead = 1;");
        let h = harness(&fs, writing_generator(&fs, "export type Lead = {};"));
        h.baseline().unwrap();

        let report = h.full().unwrap();
        assert!(!report.passed());
        assert_eq!(report.count(CompareOutcome::Missing), 1);
        assert_eq!(report.count(CompareOutcome::Match), 1);
        let lines: Vec<String> = report.failures().map(ToString::to_string).collect();
        assert_eq!(lines, ["✗ src/generated/lead/mutations.ts (missing)"]);
    }

    #[test]
    fn drift_is_detected() {
        let fs = workspace();
        let h = harness(&fs, writing_generator(&fs, "export type Lead = { id: string };"));
        h.baseline().unwrap();

        let report = h.full().unwrap();
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.count(CompareOutcome::ContentDiffers), 1);
        assert_eq!(
            report.entries()[0].to_string(),
            "✗ src/generated/lead/types.ts (content differs)"
        );
    }
}
