use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::domain::errors::DispatchError;

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[derive(Debug)]
enum JobSender {
    Unbounded(mpsc::UnboundedSender<Job>),
    Bounded(mpsc::Sender<Job>),
}

#[derive(Debug)]
enum JobReceiver {
    Unbounded(mpsc::UnboundedReceiver<Job>),
    Bounded(mpsc::Receiver<Job>),
}

impl JobReceiver {
    async fn recv(&mut self) -> Option<Job> {
        match self {
            Self::Unbounded(rx) => rx.recv().await,
            Self::Bounded(rx) => rx.recv().await,
        }
    }
}

/// Fixed set of worker tasks pulling jobs off one shared queue.
///
/// Each worker runs a single job to completion before taking the next one, so
/// at most `size` jobs are in flight and the rest wait in the queue.
#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
    sender: JobSender,
}

impl WorkerPool {
    /// `queue_bound` of `None` queues without limit. With `Some(n)`,
    /// [`WorkerPool::execute`] waits while `n` jobs are already queued.
    pub fn new(size: usize, queue_bound: Option<usize>) -> Result<WorkerPool, DispatchError> {
        if size == 0 {
            return Err(DispatchError::EmptyPool);
        }

        let (sender, receiver) = match queue_bound {
            None => {
                let (tx, rx) = mpsc::unbounded_channel();
                (JobSender::Unbounded(tx), JobReceiver::Unbounded(rx))
            }
            Some(0) => return Err(DispatchError::InvalidQueueBound),
            Some(bound) => {
                let (tx, rx) = mpsc::channel(bound);
                (JobSender::Bounded(tx), JobReceiver::Bounded(rx))
            }
        };
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| Worker::new(id, Arc::clone(&receiver)))
            .collect();

        Ok(WorkerPool { workers, sender })
    }

    #[cfg(test)]
    fn size(&self) -> usize {
        self.workers.len()
    }

    pub async fn execute<F>(&self, f: F) -> Result<(), DispatchError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let job: Job = Box::pin(f);

        let sent = match &self.sender {
            JobSender::Unbounded(tx) => tx.send(job).is_ok(),
            JobSender::Bounded(tx) => tx.send(job).await.is_ok(),
        };
        if sent {
            Ok(())
        } else {
            Err(DispatchError::PoolClosed)
        }
    }

    /// Stops taking jobs and waits for the queued ones to finish.
    #[cfg(test)]
    async fn join(self) {
        let WorkerPool { workers, sender } = self;
        drop(sender);

        for worker in workers {
            debug!(worker = worker.id, "shutting down worker");
            if let Err(e) = worker.task.await {
                error!(worker = worker.id, "worker stopped abnormally: {e}");
            }
        }
    }
}

// only read when joining, which tests do
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug)]
struct Worker {
    id: usize,
    task: JoinHandle<()>,
}

impl Worker {
    fn new(id: usize, receiver: Arc<Mutex<JobReceiver>>) -> Worker {
        let task = tokio::spawn(async move {
            loop {
                let message = receiver.lock().await.recv().await;

                match message {
                    Some(job) => {
                        debug!(worker = id, "worker got a job; executing");

                        // run on its own task so a panicking job leaves the worker alive
                        if let Err(e) = tokio::spawn(job).await {
                            error!(worker = id, "job failed: {e}");
                        }
                    }
                    None => {
                        debug!(worker = id, "worker disconnected; shutting down");
                        break;
                    }
                }
            }
        });

        Worker { id, task }
    }
}
