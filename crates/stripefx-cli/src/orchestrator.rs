//! Running jobs: load, transform, save.

use std::fmt;
use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use stripefx_io::IoError;
use stripefx_ops::{Executor, ImageSession};
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};

use crate::ingest::{self, Ingested, JobReader};
use crate::job::{Job, JobError};

/// How jobs are read and executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One reader; each job runs to completion as soon as it is decoded.
    Sequential,
    /// `readers` concurrent readers fill the queue, then every job runs
    /// concurrently with `workers + 1` stripes per effect.
    Parallel { workers: usize, readers: usize },
}

impl Mode {
    /// Parallel mode with the default reader count, `ceil(workers / 5)`.
    pub fn parallel(workers: usize) -> Self {
        Mode::Parallel {
            workers,
            readers: workers.div_ceil(5).max(1),
        }
    }
}

/// Per-run outcome counts and the failures in the order they were recorded.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failures: Vec<JobError>,
}

impl RunSummary {
    fn record(&mut self, outcome: Result<(), JobError>) {
        match outcome {
            Ok(()) => self.succeeded += 1,
            Err(err) => {
                warn!(path = %err.path().display(), error = %err, "job failed");
                self.failures.push(err);
            }
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Processed: {} success, {} failed", self.succeeded, self.failed())
    }
}

/// Reads every job from `reader` and runs it according to `mode`.
///
/// Returns once every job has finished; individual failures are collected
/// in the summary and never stop other jobs.
pub fn run<R: Read + Send>(reader: R, mode: Mode) -> RunSummary {
    trace!(?mode, "orchestrator::run");
    let summary = match mode {
        Mode::Sequential => run_sequential(reader),
        Mode::Parallel { workers, readers } => run_parallel(reader, workers, readers),
    };
    info!(succeeded = summary.succeeded, failed = summary.failed(), "run complete");
    summary
}

fn run_sequential<R: Read>(reader: R) -> RunSummary {
    let mut summary = RunSummary::default();
    for item in JobReader::new(reader) {
        summary.record(item.and_then(|job| process_job(&job, Executor::Sequential)));
    }
    summary
}

fn run_parallel<R: Read + Send>(reader: R, workers: usize, readers: usize) -> RunSummary {
    let queue = ingest::read_parallel(reader, readers);
    info!(jobs = queue.len(), workers, readers, "dispatching jobs");

    let executor = Executor::Parallel { workers };
    let outcomes: Vec<Result<(), JobError>> = queue
        .into_par_iter()
        .map(|item: Ingested| item.and_then(|job| process_job(&job, executor)))
        .collect();

    let mut summary = RunSummary::default();
    for outcome in outcomes {
        summary.record(outcome);
    }
    summary
}

/// Loads `job.source`, applies its effects and writes `job.dest`.
pub fn process_job(job: &Job, executor: Executor) -> Result<(), JobError> {
    debug!(source = %job.source.display(), dest = %job.dest.display(), effects = job.effects.len(), "job start");

    let raster = stripefx_io::read(&job.source).map_err(|source| JobError::Load {
        path: job.source.clone(),
        source,
    })?;

    let mut session = ImageSession::initialize(raster);
    executor
        .run(&mut session, &job.effects)
        .map_err(|source| JobError::Transform {
            path: job.source.clone(),
            source,
        })?;

    let save_err = |source: IoError| JobError::Save {
        path: job.dest.clone(),
        source,
    };
    ensure_parent_dir(&job.dest).map_err(|e| save_err(e.into()))?;
    stripefx_io::write(&job.dest, &session.into_output()).map_err(save_err)?;

    info!(source = %job.source.display(), dest = %job.dest.display(), "job done");
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stripefx_core::Raster;
    use stripefx_ops::Effect;
    use tempfile::TempDir;

    fn checker(w: u32, h: u32) -> Raster {
        let mut r = Raster::new(w, h);
        for x in 0..w {
            for y in 0..h {
                let v = if (x + y) % 2 == 0 { 60000 } else { 5000 };
                r.set_pixel(x, y, [v, v / 2, 65535 - v, 65535]);
            }
        }
        r
    }

    fn setup(dir: &TempDir) -> PathBuf {
        let src = dir.path().join("src.png");
        stripefx_io::write(&src, &checker(9, 7)).unwrap();
        src
    }

    fn stream(src: &Path, dests: &[PathBuf], effects: &str) -> String {
        dests
            .iter()
            .map(|d| {
                format!(
                    r#"{{"inPath":{:?},"outPath":{:?},"effects":{effects}}}"#,
                    src.to_str().unwrap(),
                    d.to_str().unwrap()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn default_reader_count() {
        assert_eq!(Mode::parallel(1), Mode::Parallel { workers: 1, readers: 1 });
        assert_eq!(Mode::parallel(5), Mode::Parallel { workers: 5, readers: 1 });
        assert_eq!(Mode::parallel(6), Mode::Parallel { workers: 6, readers: 2 });
        assert_eq!(Mode::parallel(23), Mode::Parallel { workers: 23, readers: 5 });
    }

    #[test]
    fn process_job_writes_transformed_output() {
        let dir = TempDir::new().unwrap();
        let src = setup(&dir);
        let job = Job {
            source: src.clone(),
            dest: dir.path().join("nested/deeper/out.png"),
            effects: vec![Effect::Blur, Effect::Grayscale],
        };
        process_job(&job, Executor::Parallel { workers: 2 }).unwrap();

        let mut expected = ImageSession::initialize(checker(9, 7));
        Executor::Sequential.run(&mut expected, &job.effects).unwrap();
        assert_eq!(stripefx_io::read(&job.dest).unwrap(), expected.into_output());
    }

    #[test]
    fn empty_effect_list_copies_image() {
        let dir = TempDir::new().unwrap();
        let src = setup(&dir);
        let job = Job {
            source: src,
            dest: dir.path().join("copy.png"),
            effects: Vec::new(),
        };
        process_job(&job, Executor::Sequential).unwrap();
        assert_eq!(stripefx_io::read(&job.dest).unwrap(), checker(9, 7));
    }

    #[test]
    fn missing_source_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let job = Job {
            source: dir.path().join("absent.png"),
            dest: dir.path().join("out.png"),
            effects: vec![Effect::Sharpen],
        };
        let err = process_job(&job, Executor::Sequential).unwrap_err();
        assert!(matches!(err, JobError::Load { .. }));
        assert!(!job.dest.exists());
    }

    #[test]
    fn unsupported_destination_is_a_save_error() {
        let dir = TempDir::new().unwrap();
        let job = Job {
            source: setup(&dir),
            dest: dir.path().join("out.tiff"),
            effects: vec![Effect::Grayscale],
        };
        let err = process_job(&job, Executor::Sequential).unwrap_err();
        assert!(matches!(err, JobError::Save { .. }));
    }

    #[test]
    fn modes_produce_identical_files() {
        let dir = TempDir::new().unwrap();
        let src = setup(&dir);
        let effects = r#"["S","E","B","G"]"#;

        let seq_dest = vec![dir.path().join("seq/out.png")];
        let seq = run(stream(&src, &seq_dest, effects).as_bytes(), Mode::Sequential);
        assert!(seq.is_success());

        let par_dest: Vec<PathBuf> = (0..6).map(|i| dir.path().join(format!("par/{i}.png"))).collect();
        let par = run(stream(&src, &par_dest, effects).as_bytes(), Mode::parallel(3));
        assert_eq!(par.succeeded, 6);

        let expected = stripefx_io::read(&seq_dest[0]).unwrap();
        for dest in &par_dest {
            assert_eq!(stripefx_io::read(dest).unwrap(), expected);
        }
    }

    #[test]
    fn failures_do_not_stop_siblings() {
        let dir = TempDir::new().unwrap();
        let src = setup(&dir);
        let good = dir.path().join("good.png");
        let input = format!(
            "{}\n{}\n{}",
            stream(&src, &[good.clone()], r#"["B"]"#),
            stream(&dir.path().join("missing.png"), &[dir.path().join("x.png")], "[]"),
            stream(&src, &[dir.path().join("y.png")], r#"["Z"]"#),
        );

        for mode in [Mode::Sequential, Mode::parallel(7)] {
            let summary = run(input.as_bytes(), mode);
            assert_eq!(summary.succeeded, 1, "{mode:?}");
            assert_eq!(summary.failed(), 2, "{mode:?}");
            assert_eq!(summary.total(), 3);
            assert!(good.exists());
            assert_eq!(summary.to_string(), "Processed: 1 success, 2 failed");
        }
    }
}
