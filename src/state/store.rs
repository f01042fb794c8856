use std::collections::HashMap;

use crate::foundation::core::OpIndex;
use crate::foundation::error::{OpweaveError, OpweaveResult};
use crate::state::attrs::Attr;

/// One save/restore scope's own writes. Parent layers stay untouched, so a
/// pop discards exactly this layer and nothing else.
#[derive(Debug, Default)]
struct Layer {
    scalars: HashMap<Attr, OpIndex>,
    incrementals: HashMap<Attr, Vec<OpIndex>>,
}

/// Save/restore-scoped map from attributes to the last operation that wrote
/// them.
///
/// Scopes are an explicit stack of overlay layers: scalar lookups walk from
/// the innermost layer outward until a binding is found, incremental lookups
/// concatenate every layer's append-list (ancestor entries first). Restore
/// cost is O(1) per scope and never copies unrelated bindings.
///
/// Named bindings are caller-chosen string keys and deliberately live
/// outside the scope stack; they survive save/restore.
#[derive(Debug)]
pub struct AttrStore {
    layers: Vec<Layer>,
    named: HashMap<String, OpIndex>,
}

impl Default for AttrStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttrStore {
    /// Create a store with only the root scope open.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::default()],
            named: HashMap::new(),
        }
    }

    /// Number of scopes open above the root.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Open a nested scope. Reads still see everything visible before the
    /// push; writes land in the new layer only.
    pub fn push_scope(&mut self) {
        self.layers.push(Layer::default());
    }

    /// Close the innermost scope, discarding all of its writes.
    ///
    /// Popping the root scope signals a save/restore imbalance in the
    /// caller and is a fatal usage error.
    pub fn pop_scope(&mut self) -> OpweaveResult<()> {
        if self.layers.len() == 1 {
            return Err(OpweaveError::usage("restore without matching save"));
        }
        self.layers.pop();
        Ok(())
    }

    /// Bind a scalar attribute to `idx` in the current scope, shadowing any
    /// ancestor binding until this scope is popped.
    pub fn record_scalar(&mut self, attr: Attr, idx: OpIndex) {
        self.current_mut().scalars.insert(attr, idx);
    }

    /// Append `idx` to an incremental attribute's list in the current scope.
    pub fn record_incremental(&mut self, attr: Attr, idx: OpIndex) {
        self.current_mut()
            .incrementals
            .entry(attr)
            .or_default()
            .push(idx);
    }

    /// Bind a caller-chosen key to `idx`, globally and unscoped.
    pub fn record_named(&mut self, name: impl Into<String>, idx: OpIndex) {
        self.named.insert(name.into(), idx);
    }

    /// Innermost visible binding for a scalar attribute.
    pub fn lookup_scalar(&self, attr: Attr) -> Option<OpIndex> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.scalars.get(&attr).copied())
    }

    /// Every visible contribution to an incremental attribute, ancestor
    /// entries before child entries, each layer in append order.
    pub fn lookup_incremental(&self, attr: Attr) -> Vec<OpIndex> {
        self.layers
            .iter()
            .flat_map(|layer| layer.incrementals.get(&attr).into_iter().flatten())
            .copied()
            .collect()
    }

    /// Current binding for a caller-chosen key.
    pub fn lookup_named(&self, name: &str) -> Option<OpIndex> {
        self.named.get(name).copied()
    }

    fn current_mut(&mut self) -> &mut Layer {
        // The root layer is created in new() and pop_scope refuses to drop
        // it, so the stack is never empty.
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/store.rs"]
mod tests;
