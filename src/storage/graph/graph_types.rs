use crate::types::NodeId;

/// Default weight given to links created without an explicit one.
pub const DEFAULT_LINK_WEIGHT: f64 = 1.0;

/// Directed edge owned by a [`super::Graph`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    /// Source endpoint.
    pub from: NodeId,
    /// Target endpoint.
    pub to: NodeId,
    /// Stored traversal weight, finite and non-negative.
    pub weight: f64,
}

/// Direction selector for neighbor queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dir {
    /// Targets of links leaving the node.
    Out,
    /// Sources of links entering the node.
    In,
    /// Both of the above.
    Both,
}

impl Dir {
    /// Returns `true` for `Out` and `Both`.
    pub fn includes_out(self) -> bool {
        matches!(self, Dir::Out | Dir::Both)
    }

    /// Returns `true` for `In` and `Both`.
    pub fn includes_in(self) -> bool {
        matches!(self, Dir::In | Dir::Both)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct LinkSlot {
    pub(crate) generation: u32,
    pub(crate) link: Option<Link>,
}

pub(crate) fn check_weight(weight: f64) -> crate::types::Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(crate::types::GraphError::InvalidWeight(weight))
    }
}
