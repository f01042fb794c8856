/// The fixed vocabulary of tracked graphics-state attributes.
///
/// Call sites pass a superset of the attributes possibly relevant to an
/// operation kind; attributes with no visible binding resolve to nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Attr {
    /// Stroke width.
    LineWidth,
    /// Stroke cap style.
    LineCap,
    /// Stroke join style.
    LineJoin,
    /// Miter limit for miter joins.
    MiterLimit,
    /// Dash pattern and offset.
    Dash,
    /// Stroke alpha.
    StrokeAlpha,
    /// Fill color or paint.
    FillColor,
    /// Fill alpha.
    FillAlpha,
    /// Global composite operation.
    CompositeOp,
    /// The currently staged path.
    Path,
    /// Transform history. Writes compose, so every contributing operation
    /// in the scope chain is a dependency.
    Transform,
    /// Text positioning history; composed like [`Attr::Transform`].
    MoveText,
}

/// Whether writes to an attribute overwrite or accumulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrKind {
    /// Overwrite-on-write; one binding at a time per scope chain.
    Scalar,
    /// Append-on-write; the visible binding is the whole scope chain's list.
    Incremental,
}

impl Attr {
    /// Classify this attribute's write semantics.
    pub fn kind(self) -> AttrKind {
        match self {
            Self::Transform | Self::MoveText => AttrKind::Incremental,
            _ => AttrKind::Scalar,
        }
    }

    /// Attributes a filled shape's appearance depends on.
    pub const FILL: &'static [Attr] = &[
        Attr::FillColor,
        Attr::FillAlpha,
        Attr::CompositeOp,
        Attr::Transform,
    ];

    /// Attributes a stroked shape's appearance depends on.
    pub const STROKE: &'static [Attr] = &[
        Attr::LineWidth,
        Attr::LineCap,
        Attr::LineJoin,
        Attr::MiterLimit,
        Attr::Dash,
        Attr::StrokeAlpha,
        Attr::CompositeOp,
        Attr::Transform,
    ];

    /// Attributes drawn text depends on.
    pub const TEXT: &'static [Attr] = &[
        Attr::FillColor,
        Attr::FillAlpha,
        Attr::CompositeOp,
        Attr::Transform,
        Attr::MoveText,
    ];
}

#[cfg(test)]
#[path = "../../tests/unit/state/attrs.rs"]
mod tests;
