//! Fan-out sink: spreads rows over a fixed pool of downstream sinks.
//!
//! One bounded work queue feeds one worker thread per downstream sink, and
//! each downstream is owned by exactly one worker, so a downstream's
//! methods are never invoked concurrently with themselves. `write_row`
//! blocks once the queue is full (backpressure). `flush`/`close` drain the
//! queue, then fan the call out to every downstream concurrently and
//! return the first error; which of several simultaneous failures is
//! reported is unspecified.
//!
//! A failed queued write is surfaced by a *later* `write_row` call,
//! deliberately uncorrelated with the row that caused it: the queue drains
//! asynchronously and only one error is parked at a time. Callers abort
//! the run on any sink error, so tightening this would buy nothing.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use crate::log_debug;

use super::{Sink, SinkError, Value};

enum Ctrl {
    Flush,
    Close,
}

struct Worker {
    ctrl_tx: Sender<Ctrl>,
    done_rx: Receiver<Result<(), SinkError>>,
    handle: Option<JoinHandle<()>>,
}

/// Writes queued but not yet applied by a worker. `flush`/`close` wait for
/// this to reach zero before touching the downstream sinks.
struct Pending {
    count: Mutex<usize>,
    zero: Condvar,
}

impl Pending {
    fn new() -> Self {
        Pending {
            count: Mutex::new(0),
            zero: Condvar::new(),
        }
    }

    fn inc(&self) {
        *self.count.lock().unwrap() += 1;
    }

    fn dec(&self) {
        let mut n = self.count.lock().unwrap();
        *n -= 1;
        if *n == 0 {
            self.zero.notify_all();
        }
    }

    fn wait_zero(&self) {
        let mut n = self.count.lock().unwrap();
        while *n > 0 {
            n = self.zero.wait(n).unwrap();
        }
    }
}

pub struct ConcurrentSink {
    write_tx: Option<Sender<Vec<Value>>>,
    err_rx: Receiver<SinkError>,
    pending: Arc<Pending>,
    workers: Vec<Worker>,
    closed: bool,
}

impl ConcurrentSink {
    /// Builds `concurrency` downstream sinks and binds each to its own
    /// worker thread. The work queue is bounded at `concurrency` entries.
    pub fn with_sinks<S, F>(mut build: F, concurrency: usize) -> Self
    where
        S: Sink + 'static,
        F: FnMut(usize) -> S,
    {
        assert!(concurrency > 0, "fan-out needs at least one downstream");
        let (write_tx, write_rx) = bounded::<Vec<Value>>(concurrency);
        let (err_tx, err_rx) = bounded::<SinkError>(1);
        let pending = Arc::new(Pending::new());

        let workers = (0..concurrency)
            .map(|idx| {
                let sink = build(idx);
                let write_rx = write_rx.clone();
                let err_tx = err_tx.clone();
                let pending = Arc::clone(&pending);
                let (ctrl_tx, ctrl_rx) = unbounded::<Ctrl>();
                let (done_tx, done_rx) = unbounded::<Result<(), SinkError>>();
                let handle = std::thread::Builder::new()
                    .name(format!("sink-worker-{}", idx))
                    .spawn(move || worker_loop(sink, write_rx, ctrl_rx, done_tx, err_tx, pending))
                    .expect("failed to spawn sink worker");
                Worker {
                    ctrl_tx,
                    done_rx,
                    handle: Some(handle),
                }
            })
            .collect();

        log_debug!("fan-out sink started with {} workers", concurrency);
        ConcurrentSink {
            write_tx: Some(write_tx),
            err_rx,
            pending,
            workers,
            closed: false,
        }
    }

    // Drains queued writes, then runs `ctrl` on every worker concurrently
    // and collects one response per worker. Every downstream is invoked
    // even when another has already failed.
    fn fan_out(&mut self, make_ctrl: fn() -> Ctrl) -> Result<(), SinkError> {
        self.pending.wait_zero();
        let mut first_err = None;
        for worker in &self.workers {
            if worker.ctrl_tx.send(make_ctrl()).is_err() {
                first_err.get_or_insert(SinkError::WorkerGone);
            }
        }
        for worker in &self.workers {
            match worker.done_rx.recv() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    first_err.get_or_insert(e);
                }
                Err(_) => {
                    first_err.get_or_insert(SinkError::WorkerGone);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Sink for ConcurrentSink {
    /// Queues the row for some downstream sink. Blocks while the queue is
    /// full. An error return reports a *previously* queued write that
    /// failed, not necessarily this one.
    fn write_row(&mut self, values: Vec<Value>) -> Result<(), SinkError> {
        let Some(write_tx) = &self.write_tx else {
            return Err(SinkError::Closed);
        };
        self.pending.inc();
        if write_tx.send(values).is_err() {
            self.pending.dec();
            return Err(SinkError::WorkerGone);
        }
        match self.err_rx.try_recv() {
            Ok(e) => Err(e),
            Err(_) => Ok(()),
        }
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        self.fan_out(|| Ctrl::Flush)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        let result = self.fan_out(|| Ctrl::Close);
        self.closed = true;
        self.write_tx = None;
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                let _ = handle.join();
            }
        }
        result
    }
}

impl Drop for ConcurrentSink {
    fn drop(&mut self) {
        // Disconnecting both channels stops the workers after they drain
        // the queue. Downstream buffers are only flushed by `close`.
        self.write_tx = None;
        let workers = std::mem::take(&mut self.workers);
        let mut handles = Vec::new();
        for mut worker in workers {
            if let Some(handle) = worker.handle.take() {
                handles.push(handle);
            }
        }
        for handle in handles {
            let _ = handle.join();
        }
    }
}

fn worker_loop<S: Sink>(
    mut sink: S,
    write_rx: Receiver<Vec<Value>>,
    ctrl_rx: Receiver<Ctrl>,
    done_tx: Sender<Result<(), SinkError>>,
    err_tx: Sender<SinkError>,
    pending: Arc<Pending>,
) {
    loop {
        crossbeam_channel::select! {
            recv(write_rx) -> msg => match msg {
                Ok(values) => {
                    let res = sink.write_row(values);
                    pending.dec();
                    if let Err(e) = res {
                        // Park the first unreported failure; drop the rest.
                        let _ = err_tx.try_send(e);
                    }
                }
                Err(_) => break,
            },
            recv(ctrl_rx) -> msg => match msg {
                Ok(Ctrl::Flush) => {
                    let _ = done_tx.send(sink.flush());
                }
                Ok(Ctrl::Close) => {
                    let _ = done_tx.send(sink.close());
                    break;
                }
                Err(_) => break,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::io;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Write { group: i64, seq: i64 },
        Flush,
        Close,
    }

    // Forwards every received call to a shared event channel, tagged with
    // the downstream index.
    struct RecordingSink {
        idx: usize,
        events: Sender<(usize, Event)>,
        fail_writes: bool,
        fail_flush: bool,
    }

    impl Sink for RecordingSink {
        fn write_row(&mut self, values: Vec<Value>) -> Result<(), SinkError> {
            let Value::Int(group) = values[0] else { panic!("bad payload") };
            let Value::Int(seq) = values[1] else { panic!("bad payload") };
            self.events.send((self.idx, Event::Write { group, seq })).unwrap();
            if self.fail_writes {
                return Err(SinkError::Io(io::Error::other("write rejected")));
            }
            Ok(())
        }

        fn flush(&mut self) -> Result<(), SinkError> {
            self.events.send((self.idx, Event::Flush)).unwrap();
            if self.fail_flush {
                return Err(SinkError::Io(io::Error::other("flush rejected")));
            }
            Ok(())
        }

        fn close(&mut self) -> Result<(), SinkError> {
            self.events.send((self.idx, Event::Close)).unwrap();
            Ok(())
        }
    }

    fn recording_fanout(
        concurrency: usize,
        fail_writes: bool,
        fail_flush: bool,
    ) -> (ConcurrentSink, Receiver<(usize, Event)>) {
        let (events_tx, events_rx) = unbounded();
        let sink = ConcurrentSink::with_sinks(
            move |idx| RecordingSink {
                idx,
                events: events_tx.clone(),
                fail_writes,
                fail_flush,
            },
            concurrency,
        );
        (sink, events_rx)
    }

    fn run_workload(
        concurrency: usize,
        num_writes: usize,
        flush_every: usize,
    ) -> (Vec<(usize, Event)>, usize) {
        let (mut sink, events_rx) = recording_fanout(concurrency, false, false);
        let mut group = 0i64;
        for seq in 0..num_writes as i64 {
            sink.write_row(vec![Value::Int(group), Value::Int(seq)]).unwrap();
            if flush_every > 0 && (seq + 1) % flush_every as i64 == 0 {
                sink.flush().unwrap();
                group += 1;
            }
        }
        sink.close().unwrap();
        (events_rx.try_iter().collect(), group as usize)
    }

    #[test]
    fn every_write_reaches_exactly_one_downstream() {
        let (events, _) = run_workload(4, 200, 17);
        let mut seqs: Vec<i64> = events
            .iter()
            .filter_map(|(_, e)| match e {
                Event::Write { seq, .. } => Some(*seq),
                _ => None,
            })
            .collect();
        seqs.sort_unstable();
        assert_eq!(seqs, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn every_downstream_sees_every_flush_and_the_close() {
        let concurrency = 4;
        let (events, flushes) = run_workload(concurrency, 200, 17);
        for idx in 0..concurrency {
            let flush_count = events
                .iter()
                .filter(|(i, e)| *i == idx && matches!(e, Event::Flush))
                .count();
            let close_count = events
                .iter()
                .filter(|(i, e)| *i == idx && matches!(e, Event::Close))
                .count();
            assert_eq!(flush_count, flushes, "sink {}", idx);
            assert_eq!(close_count, 1, "sink {}", idx);
        }
    }

    #[test]
    fn writes_land_before_their_flush_boundary() {
        let concurrency = 4;
        let (events, _) = run_workload(concurrency, 300, 23);
        for idx in 0..concurrency {
            let mut flushed_groups = 0i64;
            for (i, event) in &events {
                if *i != idx {
                    continue;
                }
                match event {
                    Event::Write { group, .. } => {
                        // A write surfacing after its group's flush would
                        // break the drain-before-flush contract.
                        assert!(
                            *group >= flushed_groups,
                            "sink {} saw a group-{} write after {} flushes",
                            idx,
                            group,
                            flushed_groups,
                        );
                    }
                    Event::Flush | Event::Close => flushed_groups += 1,
                }
            }
        }
    }

    #[test]
    fn randomized_interleavings_stay_complete() {
        let mut rng = SmallRng::seed_from_u64(42);
        for concurrency in [1usize, 3, 8] {
            let (mut sink, events_rx) = recording_fanout(concurrency, false, false);
            let mut group = 0i64;
            let mut submitted = Vec::new();
            for seq in 0..500i64 {
                sink.write_row(vec![Value::Int(group), Value::Int(seq)]).unwrap();
                submitted.push(seq);
                if rng.random_range(0..10) == 0 {
                    sink.flush().unwrap();
                    group += 1;
                }
            }
            sink.close().unwrap();
            let mut seen: Vec<i64> = events_rx
                .try_iter()
                .filter_map(|(_, e)| match e {
                    Event::Write { seq, .. } => Some(seq),
                    _ => None,
                })
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, submitted);
        }
    }

    #[test]
    fn failed_write_surfaces_on_a_later_write() {
        let (mut sink, _events) = recording_fanout(2, true, false);
        let mut surfaced = false;
        for seq in 0..100i64 {
            if sink.write_row(vec![Value::Int(0), Value::Int(seq)]).is_err() {
                surfaced = true;
                break;
            }
        }
        assert!(surfaced, "queued write failure never surfaced");
        let _ = sink.close();
    }

    #[test]
    fn flush_reports_downstream_flush_failure() {
        let (mut sink, events_rx) = recording_fanout(3, false, true);
        sink.write_row(vec![Value::Int(0), Value::Int(1)]).unwrap();
        assert!(sink.flush().is_err());
        // All three downstreams are still flushed despite the failures.
        let flushes = events_rx
            .try_iter()
            .filter(|(_, e)| *e == Event::Flush)
            .count();
        assert_eq!(flushes, 3);
        let _ = sink.close();
    }

    #[test]
    fn calls_after_close_are_rejected() {
        let (mut sink, _events) = recording_fanout(2, false, false);
        sink.close().unwrap();
        assert!(matches!(
            sink.write_row(vec![Value::Int(0), Value::Int(0)]),
            Err(SinkError::Closed)
        ));
        assert!(matches!(sink.flush(), Err(SinkError::Closed)));
        assert!(matches!(sink.close(), Err(SinkError::Closed)));
    }
}
