use anyhow::Result;
use std::future::Future;
use uuid::Uuid;

/// value written into every placeholder row
pub const PAYLOAD: &str = "cassandradd";

/// one unit of work handed to a [`Sink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteTask {
    pub id: Uuid,
    pub payload: &'static str,
}

impl WriteTask {
    /// a task with a fresh random id and the fixed payload
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            payload: PAYLOAD,
        }
    }
}

impl Default for WriteTask {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination of the generated rows.
///
/// A single sink is shared by every in-flight write, so `write` must be safe to call
/// concurrently. Connection state belongs to the sink, not to the caller.
pub trait Sink: Send + Sync + 'static {
    fn write(&self, task: WriteTask) -> impl Future<Output = Result<()>> + Send;
}
