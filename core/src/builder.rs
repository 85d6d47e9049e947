use crate::sink::Sink;
use crate::writer::{BatchWriter, WriterOptions};
use anyhow::Result;
use std::sync::Arc;

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_BATCHES: u64 = 1;
pub const DEFAULT_SIZE: u64 = 1;

pub struct BatchWriterBuilder {
    batches: u64,
    size: u64,
    concurrency: usize,
}

impl Default for BatchWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchWriterBuilder {
    pub fn new() -> Self {
        Self {
            batches: DEFAULT_BATCHES,
            size: DEFAULT_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_batches(mut self, n: u64) -> Self {
        self.batches = n;
        self
    }

    pub fn with_size(mut self, n: u64) -> Self {
        self.size = n;
        self
    }

    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    pub fn build<S: Sink>(self, sink: Arc<S>) -> Result<BatchWriter<S>> {
        BatchWriter::new(
            sink,
            WriterOptions {
                batches: self.batches,
                size: self.size,
                concurrency: self.concurrency,
            },
        )
    }
}
