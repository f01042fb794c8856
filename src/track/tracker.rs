use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::{Affine, OpIndex, SurfaceSize};
use crate::foundation::error::{OpweaveError, OpweaveResult};
use crate::spatial::bounds::{Bounds, NormBox};
use crate::state::attrs::{Attr, AttrKind};
use crate::state::store::AttrStore;

/// Decisions the original integration made differently across its
/// evolution; both behaviors are observable, so each is explicit
/// configuration rather than a silently chosen default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackerPolicy {
    /// Fold a save/restore bracket's own operation indices into the
    /// dependencies of everything recorded inside it. With this set,
    /// replaying a suffix of operations without the matching state bracket
    /// is detectable as incomplete.
    pub bracket_deps: bool,
    /// On group close, propagate the child group's dependency set (not
    /// just its bounds) into the parent group.
    pub fold_group_deps: bool,
}

impl Default for TrackerPolicy {
    fn default() -> Self {
        Self {
            bracket_deps: true,
            fold_group_deps: false,
        }
    }
}

/// Finalized per-operation record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OpRecord {
    /// The operation this record describes.
    pub index: OpIndex,
    /// Normalized bounding box; the full unit box when none was staged.
    pub bbox: NormBox,
    /// Ascending, unique indices of prior operations this operation's
    /// appearance depends on. Never contains `index` itself.
    pub dependencies: Vec<OpIndex>,
}

/// Finalized record for one closed group.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupRecord<D> {
    /// Caller-supplied tag, matched on close.
    pub tag: String,
    /// Normalized bounding box of everything drawn while the group was
    /// open.
    pub bbox: NormBox,
    /// Ascending, unique operation indices the group depends on.
    pub dependencies: Vec<OpIndex>,
    /// Opaque caller payload attached at open.
    pub payload: D,
}

/// Everything one recording pass produced, returned by [`Tracker::take`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Recording<D> {
    /// Per-operation records in ascending index order.
    pub operations: Vec<OpRecord>,
    /// Group records in close order.
    pub groups: Vec<GroupRecord<D>>,
}

/// A save/restore pair. `restore` stays unset while the bracket is open;
/// a balanced pass sets every one before export.
#[derive(Clone, Copy, Debug)]
struct Bracket {
    save: OpIndex,
    restore: Option<OpIndex>,
}

/// Snapshot taken by `record_operation`.
#[derive(Debug)]
struct RecordedOp {
    bbox: Option<Bounds>,
    dependencies: BTreeSet<OpIndex>,
    brackets: Vec<usize>,
}

/// One open group frame.
#[derive(Debug)]
struct GroupFrame<D> {
    tag: String,
    // The implicit root frame carries no payload and is never emitted.
    payload: Option<D>,
    bounds: Bounds,
    dependencies: BTreeSet<OpIndex>,
    brackets: Vec<usize>,
}

impl<D> GroupFrame<D> {
    fn root() -> Self {
        Self {
            tag: String::new(),
            payload: None,
            bounds: Bounds::EMPTY,
            dependencies: BTreeSet::new(),
            brackets: Vec::new(),
        }
    }
}

/// Online dependency and spatial tracker over one surface's operation
/// stream.
///
/// A caller forwards every state-mutating and drawing call it issues on the
/// underlying surface. State mutations land in the scoped attribute store;
/// drawing calls stage transform-aware bounds and pull dependencies from
/// the store. One tracker owns one linear operation stream from
/// construction to the single terminal [`Tracker::take`].
#[derive(Debug)]
pub struct Tracker<D> {
    size: SurfaceSize,
    policy: TrackerPolicy,
    next: u64,
    store: AttrStore,
    brackets: Vec<Bracket>,
    open_brackets: Vec<usize>,
    pending_deps: BTreeSet<OpIndex>,
    pending_bbox: Option<(OpIndex, Bounds)>,
    ops: BTreeMap<OpIndex, RecordedOp>,
    groups: Vec<GroupFrame<D>>,
    closed: Vec<GroupRecord<D>>,
    taken: bool,
}

impl<D: Clone> Tracker<D> {
    /// Start a recording pass over a surface of the given fixed size.
    ///
    /// An implicit root group is opened so registration before the first
    /// explicit group is well-defined; the root is never emitted.
    pub fn new(size: SurfaceSize, policy: TrackerPolicy) -> Self {
        Self {
            size,
            policy,
            next: 0,
            store: AttrStore::new(),
            brackets: Vec::new(),
            open_brackets: Vec::new(),
            pending_deps: BTreeSet::new(),
            pending_bbox: None,
            ops: BTreeMap::new(),
            groups: vec![GroupFrame::root()],
            closed: Vec::new(),
            taken: false,
        }
    }

    /// The normalization dimensions captured at construction.
    pub fn surface_size(&self) -> SurfaceSize {
        self.size
    }

    /// The policy this tracker was built with.
    pub fn policy(&self) -> TrackerPolicy {
        self.policy
    }

    /// Assign the next operation index. Monotone, owned by this instance.
    pub fn next_index(&mut self) -> OpweaveResult<OpIndex> {
        self.ensure_open()?;
        let idx = OpIndex(self.next);
        self.next += 1;
        Ok(idx)
    }

    /// Open a group with the given tag and opaque payload.
    pub fn start_group(&mut self, tag: impl Into<String>, payload: D) -> OpweaveResult<()> {
        self.ensure_open()?;
        self.groups.push(GroupFrame {
            tag: tag.into(),
            payload: Some(payload),
            bounds: Bounds::EMPTY,
            dependencies: BTreeSet::new(),
            brackets: Vec::new(),
        });
        Ok(())
    }

    /// Close the innermost group and emit its finalized record.
    ///
    /// When `expected_tag` is given and does not match the open frame's
    /// tag, the close is a soft failure: the frame stays open, no record
    /// is emitted, and `Ok(None)` is returned. Unrelated call sites may
    /// legitimately race to close groups, so this must not corrupt the
    /// stack. Closing with only the implicit root open is a usage error.
    pub fn end_group(&mut self, expected_tag: Option<&str>) -> OpweaveResult<Option<GroupRecord<D>>> {
        self.ensure_open()?;
        if self.groups.len() == 1 {
            return Err(OpweaveError::usage("end_group with no open group"));
        }
        if let Some(expected) = expected_tag {
            // Frames stay on the stack through the tag check.
            let open = &self.groups[self.groups.len() - 1];
            if open.tag != expected {
                tracing::warn!(expected, found = %open.tag, "mismatched group close ignored");
                return Ok(None);
            }
        }

        // Length checked above; the root frame below us always exists.
        let frame = match self.groups.pop() {
            Some(frame) => frame,
            None => return Err(OpweaveError::usage("group stack underflow")),
        };
        let payload = match frame.payload {
            Some(payload) => payload,
            None => return Err(OpweaveError::usage("root group cannot be closed")),
        };
        let parent = match self.groups.last_mut() {
            Some(parent) => parent,
            None => return Err(OpweaveError::usage("group stack lost its root frame")),
        };
        parent.bounds.union(frame.bounds);
        if self.policy.fold_group_deps {
            parent.dependencies.extend(frame.dependencies.iter().copied());
        }

        let mut dependencies = frame.dependencies;
        if self.policy.bracket_deps {
            for &id in &frame.brackets {
                let bracket = self.brackets[id];
                dependencies.insert(bracket.save);
                if let Some(restore) = bracket.restore {
                    dependencies.insert(restore);
                }
            }
        }
        let record = GroupRecord {
            tag: frame.tag,
            bbox: frame.bounds.normalized(self.size),
            dependencies: dependencies.into_iter().collect(),
            payload,
        };
        self.closed.push(record.clone());
        Ok(Some(record))
    }

    /// Enter a save/restore bracket: push a store scope and open a bracket
    /// attributed to the currently open group.
    pub fn save(&mut self, idx: OpIndex) -> OpweaveResult<()> {
        self.ensure_open()?;
        self.store.push_scope();
        let id = self.brackets.len();
        self.brackets.push(Bracket {
            save: idx,
            restore: None,
        });
        self.open_brackets.push(id);
        if let Some(group) = self.groups.last_mut() {
            group.brackets.push(id);
        }
        Ok(())
    }

    /// Leave the innermost save/restore bracket.
    ///
    /// More restores than saves is a fatal usage error: the caller's
    /// operation stream is corrupt and must not be silently repaired.
    pub fn restore(&mut self, idx: OpIndex) -> OpweaveResult<()> {
        self.ensure_open()?;
        let id = self
            .open_brackets
            .pop()
            .ok_or_else(|| OpweaveError::usage("restore without matching save"))?;
        self.store.pop_scope()?;
        self.brackets[id].restore = Some(idx);
        Ok(())
    }

    /// Record that operation `idx` set a scalar attribute.
    pub fn record_scalar(&mut self, attr: Attr, idx: OpIndex) -> OpweaveResult<()> {
        self.ensure_open()?;
        self.store.record_scalar(attr, idx);
        Ok(())
    }

    /// Record that operation `idx` contributed to an incremental attribute.
    pub fn record_incremental(&mut self, attr: Attr, idx: OpIndex) -> OpweaveResult<()> {
        self.ensure_open()?;
        self.store.record_incremental(attr, idx);
        Ok(())
    }

    /// Bind a caller-chosen key to operation `idx`, outside scalar scoping.
    pub fn record_named(&mut self, name: impl Into<String>, idx: OpIndex) -> OpweaveResult<()> {
        self.ensure_open()?;
        self.store.record_named(name, idx);
        Ok(())
    }

    /// Pull the operations currently bound to `names` into the pending set
    /// and the open group. Attributes with no visible binding are skipped;
    /// call sites pass a superset of possibly-relevant names.
    pub fn resolve_by_names(&mut self, _idx: OpIndex, names: &[Attr]) -> OpweaveResult<()> {
        self.ensure_open()?;
        for &attr in names {
            match attr.kind() {
                AttrKind::Scalar => {
                    if let Some(dep) = self.store.lookup_scalar(attr) {
                        self.add_dependency(dep);
                    }
                }
                AttrKind::Incremental => {
                    for dep in self.store.lookup_incremental(attr) {
                        self.add_dependency(dep);
                    }
                }
            }
        }
        Ok(())
    }

    /// Pull the operation bound to a caller-chosen key, if any.
    pub fn resolve_by_key(&mut self, _idx: OpIndex, key: &str) -> OpweaveResult<()> {
        self.ensure_open()?;
        if let Some(dep) = self.store.lookup_named(key) {
            self.add_dependency(dep);
        }
        Ok(())
    }

    /// Stage a local-space box for operation `idx` under the surface's live
    /// transform, expanding the open group's bounds as well.
    pub fn register_box(
        &mut self,
        idx: OpIndex,
        transform: Affine,
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
    ) -> OpweaveResult<()> {
        let device = Bounds::transformed_box(transform, x0, x1, y0, y1);
        self.stage_bounds(idx, device)
    }

    /// Stage a local-space point for operation `idx`.
    pub fn register_point(&mut self, idx: OpIndex, transform: Affine, x: f64, y: f64) -> OpweaveResult<()> {
        let device = Bounds::transformed_point(transform, x, y);
        self.stage_bounds(idx, device)
    }

    /// Conservative fallback for operations whose visual footprint cannot
    /// be bounded: stage the maximal extent.
    pub fn mark_unbounded(&mut self, idx: OpIndex) -> OpweaveResult<()> {
        tracing::debug!(idx = idx.0, "unbounded operation footprint");
        self.stage_bounds(idx, Bounds::UNBOUNDED)
    }

    /// Snapshot the pending dependency set, the staged bbox (only if it was
    /// staged for exactly `idx`), and the active brackets into the
    /// per-operation table, then clear the pending state.
    pub fn record_operation(&mut self, idx: OpIndex) -> OpweaveResult<()> {
        self.ensure_open()?;
        let bbox = match self.pending_bbox.take() {
            Some((staged_idx, bounds)) if staged_idx == idx => Some(bounds),
            _ => None,
        };
        let dependencies = std::mem::take(&mut self.pending_deps);
        self.ops.insert(
            idx,
            RecordedOp {
                bbox,
                dependencies,
                brackets: self.open_brackets.clone(),
            },
        );
        Ok(())
    }

    /// Export the recording. Terminal: the tracker accepts nothing after
    /// this, and a second call fails with [`OpweaveError::Closed`].
    ///
    /// Scope imbalance at export is fatal. Explicit groups left open are
    /// skipped with a warning; mismatched closes are legal, so a dangling
    /// frame is not proof of caller corruption the way a dangling save is.
    #[tracing::instrument(skip(self))]
    pub fn take(&mut self) -> OpweaveResult<Recording<D>> {
        self.ensure_open()?;
        if self.store.depth() != 0 {
            return Err(OpweaveError::usage(format!(
                "export with {} unbalanced save(s)",
                self.store.depth()
            )));
        }
        if self.groups.len() > 1 {
            tracing::warn!(open = self.groups.len() - 1, "groups left open at export");
        }
        self.taken = true;

        let ops = std::mem::take(&mut self.ops);
        let operations = ops
            .into_iter()
            .map(|(idx, op)| {
                let mut dependencies = op.dependencies;
                if self.policy.bracket_deps {
                    for &id in &op.brackets {
                        let bracket = self.brackets[id];
                        dependencies.insert(bracket.save);
                        if let Some(restore) = bracket.restore {
                            dependencies.insert(restore);
                        }
                    }
                }
                // An operation never depends on itself.
                dependencies.remove(&idx);
                OpRecord {
                    index: idx,
                    bbox: op
                        .bbox
                        .map(|b| b.normalized(self.size))
                        .unwrap_or(NormBox::UNIT),
                    dependencies: dependencies.into_iter().collect(),
                }
            })
            .collect();

        Ok(Recording {
            operations,
            groups: std::mem::take(&mut self.closed),
        })
    }

    fn ensure_open(&self) -> OpweaveResult<()> {
        if self.taken {
            return Err(OpweaveError::closed("recording was already exported"));
        }
        Ok(())
    }

    fn add_dependency(&mut self, dep: OpIndex) {
        self.pending_deps.insert(dep);
        if let Some(group) = self.groups.last_mut() {
            group.dependencies.insert(dep);
        }
    }

    fn stage_bounds(&mut self, idx: OpIndex, device: Bounds) -> OpweaveResult<()> {
        self.ensure_open()?;
        match self.pending_bbox {
            Some((staged_idx, ref mut bounds)) if staged_idx == idx => bounds.union(device),
            _ => {
                let mut bounds = Bounds::EMPTY;
                bounds.union(device);
                self.pending_bbox = Some((idx, bounds));
            }
        }
        if let Some(group) = self.groups.last_mut() {
            group.bounds.union(device);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/track/tracker.rs"]
mod tests;
