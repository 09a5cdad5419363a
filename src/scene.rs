//! Scene model: the accumulated stamps and the flattened vertex buffer.
//!
//! The scene is a mapping from shape kind to the ordered list of vertex
//! arrays recorded by clicks. Its one invariant: the GPU buffer contents
//! always equal [`Scene::flatten`] as of the last stamp — flattening walks
//! kinds in [`ALL_KINDS`] order and stamps in insertion order, which is
//! exactly the order the renderer advances its byte offset in.
//!
//! Snapshots exist so a host can persist the pad and rehydrate it later;
//! they carry the same data as the live scene in a flat record list.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};

use crate::consts::FLOATS_PER_VERTEX;
use crate::error::Error;
use crate::shape::{ALL_KINDS, KIND_COUNT, ShapeKind};

/// One stamped shape as stored in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampRecord {
    /// Which shape was stamped.
    pub kind: ShapeKind,
    /// Clip-space vertex array recorded at click time.
    pub vertices: Vec<f32>,
}

/// All stamps on the pad, grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    stamps: [Vec<Vec<f32>>; KIND_COUNT],
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stamp to the list for `kind`.
    pub fn stamp(&mut self, kind: ShapeKind, vertices: Vec<f32>) {
        self.stamps[kind.index()].push(vertices);
    }

    /// Remove every stamp.
    pub fn clear(&mut self) {
        for list in &mut self.stamps {
            list.clear();
        }
    }

    /// The stamps recorded for `kind`, in insertion order.
    #[must_use]
    pub fn stamps_for(&self, kind: ShapeKind) -> &[Vec<f32>] {
        &self.stamps[kind.index()]
    }

    /// Total number of stamps across all kinds.
    #[must_use]
    pub fn stamp_count(&self) -> usize {
        self.stamps.iter().map(Vec::len).sum()
    }

    /// Returns `true` if nothing has been stamped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stamps.iter().all(Vec::is_empty)
    }

    /// Concatenate every stamp's vertices into one buffer, kinds in
    /// canonical order, stamps in insertion order.
    #[must_use]
    pub fn flatten(&self) -> Vec<f32> {
        let total: usize = self.stamps.iter().flatten().map(Vec::len).sum();
        let mut out = Vec::with_capacity(total);
        for kind in ALL_KINDS {
            for stamp in &self.stamps[kind.index()] {
                out.extend_from_slice(stamp);
            }
        }
        out
    }

    /// Export the scene as a flat record list for the host to persist.
    #[must_use]
    pub fn snapshot(&self) -> Vec<StampRecord> {
        let mut records = Vec::with_capacity(self.stamp_count());
        for kind in ALL_KINDS {
            for stamp in &self.stamps[kind.index()] {
                records.push(StampRecord { kind, vertices: stamp.clone() });
            }
        }
        records
    }

    /// Replace the scene contents with a previously exported snapshot.
    ///
    /// Every record's vertex array must match its kind's draw call; an
    /// undersized or oversized stamp would shift the renderer's byte
    /// offsets against the flattened buffer for every stamp after it.
    /// On error the scene is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SnapshotGeometry`] for the first record whose
    /// vertex count does not match its kind.
    pub fn load_snapshot(&mut self, records: Vec<StampRecord>) -> Result<(), Error> {
        for record in &records {
            let expected = record.kind.draw_call().vertex_count * FLOATS_PER_VERTEX;
            if record.vertices.len() != expected {
                return Err(Error::SnapshotGeometry {
                    kind: record.kind,
                    got: record.vertices.len(),
                    expected,
                });
            }
        }
        self.clear();
        for record in records {
            self.stamp(record.kind, record.vertices);
        }
        Ok(())
    }
}
