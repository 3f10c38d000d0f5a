//! Dedicated rendering-thread executor.
//!
//! GPU resource creation and destruction in the surrounding system is only
//! legal from one designated thread. This crate owns that thread and exposes
//! a single contract: submit a no-argument unit of work, optionally blocking
//! the caller until it has run.
//!
//! Jobs are executed strictly in submission order. There is no cancellation
//! and no timeout; a submitted job either runs or is dropped during shutdown.

#![forbid(unsafe_code)]

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use log::warn;
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Handle to the rendering thread.
///
/// Dropping the handle shuts the thread down after draining already-queued
/// jobs.
pub struct RenderThread {
    sender: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Spawn the rendering thread.
    pub fn spawn() -> std::io::Result<Self> {
        let (sender, receiver): (Sender<Job>, Receiver<Job>) = unbounded();
        let worker = thread::Builder::new()
            .name("terra-render".to_string())
            .spawn(move || {
                for job in receiver {
                    job();
                }
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Queue a unit of work on the rendering thread.
    ///
    /// With `wait` set, blocks until the job has completed. Submitting a
    /// waiting job from the rendering thread itself would deadlock; callers
    /// on that thread should run the work directly instead.
    pub fn submit<F>(&self, job: F, wait: bool)
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(sender) = self.sender.as_ref() else {
            return;
        };

        if wait {
            let (done_tx, done_rx) = bounded::<()>(1);
            let wrapped: Job = Box::new(move || {
                job();
                let _ = done_tx.send(());
            });
            if sender.send(wrapped).is_err() {
                warn!("render thread is gone, dropping submitted job");
                return;
            }
            let _ = done_rx.recv();
        } else if sender.send(Box::new(job)).is_err() {
            warn!("render thread is gone, dropping submitted job");
        }
    }

    /// True while the rendering thread is accepting work.
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once queued jobs drain.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
