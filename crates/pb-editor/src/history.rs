//! Linear undo/redo history over whole-state snapshots.
//!
//! The store keeps a list of snapshots and a cursor. `push` after an `undo`
//! drops every snapshot past the cursor, so history never branches.
//!
//! Drag and resize gestures use **batching**: while a batch is open, pushes
//! only replace a pending preview, and closing the batch commits that preview
//! as a single snapshot. One gesture is one undo step.

/// Default number of snapshots kept before the oldest is evicted.
pub const DEFAULT_LIMIT: usize = 50;

/// Snapshot history with a cursor. Never empty: it is seeded with the
/// initial state at construction.
#[derive(Debug, Clone)]
pub struct History<S> {
    snapshots: Vec<S>,
    cursor: usize,
    /// Maximum number of snapshots kept.
    limit: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    /// Latest state pushed during the open batch.
    pending: Option<S>,
}

impl<S: Clone + PartialEq> History<S> {
    pub fn new(initial: S) -> Self {
        Self::with_limit(initial, DEFAULT_LIMIT)
    }

    /// A history capped at `limit` snapshots (at least 1).
    pub fn with_limit(initial: S, limit: usize) -> Self {
        let limit = limit.max(1);
        let mut snapshots = Vec::with_capacity(limit.min(64));
        snapshots.push(initial);
        Self {
            snapshots,
            cursor: 0,
            limit,
            batch_depth: 0,
            pending: None,
        }
    }

    /// The state the editor should show: the batch preview if one is open,
    /// otherwise the snapshot under the cursor.
    pub fn current(&self) -> &S {
        self.pending
            .as_ref()
            .unwrap_or(&self.snapshots[self.cursor])
    }

    /// Record a new state.
    ///
    /// Outside a batch this truncates everything after the cursor, appends,
    /// and evicts the oldest snapshot when over the limit. Inside a batch it
    /// only replaces the pending preview.
    pub fn push(&mut self, state: S) {
        if self.batch_depth > 0 {
            self.pending = Some(state);
            return;
        }
        self.commit(state);
    }

    fn commit(&mut self, state: S) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        if self.snapshots.len() > self.limit {
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns `false` if already at the oldest.
    pub fn undo(&mut self) -> bool {
        self.close_batch();
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot. Returns `false` if already at the newest.
    pub fn redo(&mut self) -> bool {
        self.close_batch();
        if self.cursor + 1 >= self.snapshots.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`; the history is seeded at construction.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Forget everything and start over from `state`.
    pub fn reset(&mut self, state: S) {
        self.snapshots.clear();
        self.snapshots.push(state);
        self.cursor = 0;
        self.batch_depth = 0;
        self.pending = None;
    }

    // ─── Batching ────────────────────────────────────────────────────────

    /// Open a batch. Nested calls only bump the depth; the outermost
    /// `end_batch` commits.
    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Close a batch. When the outermost batch closes, the pending preview
    /// (if any, and if it differs from the snapshot under the cursor) is
    /// committed as one snapshot. Returns `true` if a snapshot was added.
    pub fn end_batch(&mut self) -> bool {
        if self.batch_depth == 0 {
            return false;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return false;
        }
        match self.pending.take() {
            Some(state) if state != self.snapshots[self.cursor] => {
                self.commit(state);
                true
            }
            _ => false,
        }
    }

    /// Drop the open batch and its preview without committing anything.
    pub fn cancel_batch(&mut self) {
        self.batch_depth = 0;
        self.pending = None;
    }

    pub fn is_batching(&self) -> bool {
        self.batch_depth > 0
    }

    /// Commit any open batch regardless of nesting.
    fn close_batch(&mut self) {
        if self.batch_depth > 0 {
            self.batch_depth = 1;
            self.end_batch();
        }
    }
}
