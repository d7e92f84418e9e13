//! Reading job records off a stream of concatenated JSON objects.
//!
//! Sequential mode pulls one job at a time with [`JobReader`]. Parallel mode
//! runs several readers on scoped threads that share one decoder behind a
//! mutex ([`read_parallel`]); each reader keeps its own batch and the batches
//! are merged once every reader has been joined.
//!
//! A malformed record stops the reader that hit it. The decoder refuses to
//! continue after an error, so the remaining readers see end-of-stream on
//! their next pull.

use std::io::Read;
use std::sync::{Mutex, PoisonError};

use serde_json::de::IoRead;
use serde_json::StreamDeserializer;
#[allow(unused_imports)]
use tracing::{debug, trace, warn};

use crate::job::{Job, JobError, JobRecord};

type JobStream<R> = StreamDeserializer<'static, IoRead<R>, JobRecord>;

/// A decoded job, or a record that failed validation.
pub type Ingested = Result<Job, JobError>;

fn open<R: Read>(reader: R) -> JobStream<R> {
    serde_json::Deserializer::from_reader(reader).into_iter::<JobRecord>()
}

/// Pulls the next record; `None` at end-of-stream or on a malformed record.
fn next_record<R: Read>(stream: &mut JobStream<R>, reader: usize) -> Option<Ingested> {
    match stream.next()? {
        Ok(record) => Some(Job::try_from(record)),
        Err(err) => {
            warn!(reader, error = %err, "malformed job record, reader stopped");
            None
        }
    }
}

/// Iterator over the jobs of a stream, in stream order.
pub struct JobReader<R: Read> {
    stream: JobStream<R>,
    done: bool,
}

impl<R: Read> JobReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            stream: open(reader),
            done: false,
        }
    }
}

impl<R: Read> Iterator for JobReader<R> {
    type Item = Ingested;

    fn next(&mut self) -> Option<Ingested> {
        if self.done {
            return None;
        }
        let next = next_record(&mut self.stream, 0);
        self.done = next.is_none();
        next
    }
}

/// Drains `reader` with `readers` concurrent readers.
///
/// Job order in the returned list follows reader order, not stream order.
pub fn read_parallel<R: Read + Send>(reader: R, readers: usize) -> Vec<Ingested> {
    let readers = readers.max(1);
    trace!(readers, "read_parallel");
    let stream = Mutex::new(open(reader));

    let batches: Vec<Vec<Ingested>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..readers)
            .map(|id| {
                let stream = &stream;
                scope.spawn(move || read_batch(stream, id))
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .filter_map(|(id, handle)| match handle.join() {
                Ok(batch) => Some(batch),
                Err(_) => {
                    warn!(reader = id, "job reader panicked, its batch is lost");
                    None
                }
            })
            .collect()
    });

    let jobs: Vec<Ingested> = batches.into_iter().flatten().collect();
    debug!(jobs = jobs.len(), readers, "ingestion complete");
    jobs
}

fn read_batch<R: Read>(stream: &Mutex<JobStream<R>>, id: usize) -> Vec<Ingested> {
    let mut batch = Vec::new();
    loop {
        let next = {
            let mut guard = stream.lock().unwrap_or_else(PoisonError::into_inner);
            next_record(&mut guard, id)
        };
        match next {
            Some(item) => batch.push(item),
            None => break,
        }
    }
    debug!(reader = id, jobs = batch.len(), "reader finished");
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stripefx_ops::Effect;

    fn records(n: usize) -> String {
        (0..n)
            .map(|i| format!(r#"{{"inPath":"in/{i}.png","outPath":"out/{i}.png","effects":["G"]}}"#))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sources(items: Vec<Ingested>) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = items.into_iter().map(|r| r.unwrap().source).collect();
        paths.sort();
        paths
    }

    #[test]
    fn sequential_reader_keeps_stream_order() {
        let input = records(4);
        let jobs: Vec<Job> = JobReader::new(input.as_bytes()).map(|r| r.unwrap()).collect();
        assert_eq!(jobs.len(), 4);
        for (i, job) in jobs.iter().enumerate() {
            assert_eq!(job.source, PathBuf::from(format!("in/{i}.png")));
            assert_eq!(job.effects, vec![Effect::Grayscale]);
        }
    }

    #[test]
    fn concatenated_objects_without_separators() {
        let input = r#"{"inPath":"a","outPath":"b"}{"inPath":"c","outPath":"d","effects":[]}"#;
        assert_eq!(JobReader::new(input.as_bytes()).count(), 2);
    }

    #[test]
    fn malformed_record_stops_reading() {
        let input = format!("{}\n{{\"inPath\": 3}}\n{}", records(2), records(2));
        let items: Vec<_> = JobReader::new(input.as_bytes()).collect();
        assert_eq!(items.len(), 2);

        let mut truncated = records(3);
        truncated.truncate(truncated.len() - 5);
        assert_eq!(JobReader::new(truncated.as_bytes()).count(), 2);
    }

    #[test]
    fn rejected_record_does_not_stop_reading() {
        let input = r#"
            {"inPath":"a.png","outPath":"b.png","effects":["Q"]}
            {"inPath":"c.png","outPath":"d.png","effects":["S","B"]}
        "#;
        let items: Vec<_> = JobReader::new(input.as_bytes()).collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(JobError::Rejected { .. })));
        assert_eq!(items[1].as_ref().unwrap().effects, vec![Effect::Sharpen, Effect::Blur]);
    }

    #[test]
    fn empty_stream() {
        assert_eq!(JobReader::new(&b""[..]).count(), 0);
        assert!(read_parallel(&b"  \n"[..], 3).is_empty());
    }

    #[test]
    fn parallel_readers_collect_every_job_once() {
        let input = records(37);
        for readers in [1, 2, 4, 8] {
            let paths = sources(read_parallel(input.as_bytes(), readers));
            let mut expected: Vec<PathBuf> = (0..37).map(|i| PathBuf::from(format!("in/{i}.png"))).collect();
            expected.sort();
            assert_eq!(paths, expected, "readers = {readers}");
        }
    }

    #[test]
    fn parallel_readers_stop_at_malformed_record() {
        let input = format!("{}\nnot json\n{}", records(5), records(5));
        let jobs = read_parallel(input.as_bytes(), 3);
        assert_eq!(jobs.len(), 5);
    }
}
