//! Batch accumulation and flush discipline for index uploads.

use tracing::{error, info};

use crate::models::Point;
use crate::services::VectorStoreClient;

/// What happened in one flush.
#[derive(Debug, Clone, Copy)]
pub struct FlushReport {
    pub size: usize,
    pub ok: bool,
}

/// Counters over the lifetime of one batcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStats {
    pub points_upserted: u64,
    pub points_dropped: u64,
    pub batches_flushed: u64,
    pub batches_failed: u64,
}

/// Accumulates points across documents and feeds, submitting one upsert
/// call each time the buffer reaches capacity. A failed flush drops that
/// batch; the buffer is cleared either way and the batcher stays usable.
pub struct UploadBatcher {
    store: VectorStoreClient,
    buffer: Vec<Point>,
    capacity: usize,
    stats: BatchStats,
}

impl UploadBatcher {
    /// `capacity` must be at least 1 (enforced by config validation).
    pub fn new(store: VectorStoreClient, capacity: usize) -> Self {
        Self {
            store,
            buffer: Vec::with_capacity(capacity),
            capacity,
            stats: BatchStats::default(),
        }
    }

    /// Append a point, flushing when the buffer reaches capacity. Returns
    /// the flush report if a flush happened. The buffer never exceeds
    /// capacity: the flush is awaited before `push` returns.
    pub async fn push(&mut self, point: Point) -> Option<FlushReport> {
        self.buffer.push(point);
        if self.buffer.len() == self.capacity {
            Some(self.flush().await)
        } else {
            None
        }
    }

    /// Flush whatever remains at the end of a run.
    pub async fn finish(&mut self) -> Option<FlushReport> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.flush().await)
        }
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn store(&self) -> &VectorStoreClient {
        &self.store
    }

    async fn flush(&mut self) -> FlushReport {
        let batch = std::mem::take(&mut self.buffer);
        let size = batch.len();

        match self.store.upsert(batch).await {
            Ok(()) => {
                info!(points = size, "upserted batch");
                self.stats.points_upserted += size as u64;
                self.stats.batches_flushed += 1;
                FlushReport { size, ok: true }
            }
            Err(e) => {
                error!(points = size, error = %e, "upsert failed, dropping batch");
                self.stats.points_dropped += size as u64;
                self.stats.batches_failed += 1;
                FlushReport { size, ok: false }
            }
        }
    }
}
