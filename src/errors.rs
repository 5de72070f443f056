use std::error;
use std::fmt;

use crate::base::NodeId;

/// Errors raised while validating simulation parameters.
///
/// These fail fast, before the event loop starts, and are fully recoverable:
/// the caller can retry with corrected parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    /// Fewer than two samples: no coalescence event is possible.
    SampleSizeTooSmall(usize),
    /// Effective population size must be strictly positive.
    NonPositivePopulationSize(f64),
    /// Genome length must be strictly positive.
    NonPositiveLength(f64),
    /// Recombination rate must be non-negative.
    NegativeRecombinationRate(f64),
    /// Mutation rate must be non-negative.
    NegativeMutationRate(f64),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SampleSizeTooSmall(n) => {
                write!(f, "Sample size {n} too small (must be at least 2)")
            }
            Self::NonPositivePopulationSize(ne) => {
                write!(f, "Effective population size {ne} must be positive")
            }
            Self::NonPositiveLength(len) => {
                write!(f, "Sequence length {len} must be positive")
            }
            Self::NegativeRecombinationRate(r) => {
                write!(f, "Recombination rate {r} must be non-negative")
            }
            Self::NegativeMutationRate(mu) => {
                write!(f, "Mutation rate {mu} must be non-negative")
            }
        }
    }
}

impl error::Error for ConfigurationError {}

/// An internally generated record violated a structural invariant.
///
/// Not recoverable: the run is aborted rather than producing a silently
/// corrupt tree sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvariantViolation {
    /// An edge's parent is not strictly older than its child.
    EdgeTimeOrder {
        parent: NodeId,
        child: NodeId,
        parent_time: f64,
        child_time: f64,
    },
    /// An append was attempted on a finalized edge store.
    AppendAfterFinalize,
    /// A tree sequence was built over an edge store that was never
    /// finalized, so the simulate-fully-then-query ordering is broken.
    UnfinalizedEdges,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeTimeOrder {
                parent,
                child,
                parent_time,
                child_time,
            } => write!(
                f,
                "Edge time order violated: parent {parent} at {parent_time} \
                 is not older than child {child} at {child_time}"
            ),
            Self::AppendAfterFinalize => {
                write!(f, "Cannot append to a finalized edge store")
            }
            Self::UnfinalizedEdges => {
                write!(f, "Edge store must be finalized before queries")
            }
        }
    }
}

impl error::Error for InvariantViolation {}

/// A query addressed a node, position, or interval outside the valid range.
///
/// Recoverable: signals a caller error and does not corrupt state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutOfRangeError {
    /// Node id is not a valid id for this table or tree.
    NodeId { id: NodeId, node_count: usize },
    /// Interval does not lie within `[0, length)`.
    Interval { left: f64, right: f64, length: f64 },
    /// Position does not lie within `[0, length)`.
    Position { position: f64, length: f64 },
    /// The node is a root and has no parent edge to address.
    NoParent { id: NodeId },
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeId { id, node_count } => {
                write!(f, "Node id {id} out of range (node count = {node_count})")
            }
            Self::Interval {
                left,
                right,
                length,
            } => write!(
                f,
                "Interval [{left}, {right}) outside sequence range [0, {length})"
            ),
            Self::Position { position, length } => {
                write!(f, "Position {position} outside sequence range [0, {length})")
            }
            Self::NoParent { id } => {
                write!(f, "Node {id} is a root and has no parent")
            }
        }
    }
}

impl error::Error for OutOfRangeError {}

/// Guards that should never trigger given correct rate math.
///
/// A trigger indicates a bug in the event loop, not a caller error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InternalError {
    /// The event loop exceeded its maximum iteration bound.
    EventLoopExceeded { events: usize },
    /// A single lineage remained with uncoalesced ancestry.
    ResidualLineage { node: NodeId },
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopExceeded { events } => {
                write!(f, "Event loop exceeded its bound of {events} events")
            }
            Self::ResidualLineage { node } => {
                write!(f, "Lineage {node} survived with uncoalesced ancestry")
            }
        }
    }
}

impl error::Error for InternalError {}

/// Umbrella error returned by `simulate` and the simulation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Configuration(ConfigurationError),
    Invariant(InvariantViolation),
    OutOfRange(OutOfRangeError),
    Internal(InternalError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "Configuration error: {e}"),
            Self::Invariant(e) => write!(f, "Invariant violation: {e}"),
            Self::OutOfRange(e) => write!(f, "Out of range: {e}"),
            Self::Internal(e) => write!(f, "Internal error: {e}"),
        }
    }
}

impl error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Invariant(e) => Some(e),
            Self::OutOfRange(e) => Some(e),
            Self::Internal(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for SimulationError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<InvariantViolation> for SimulationError {
    fn from(e: InvariantViolation) -> Self {
        Self::Invariant(e)
    }
}

impl From<OutOfRangeError> for SimulationError {
    fn from(e: OutOfRangeError) -> Self {
        Self::OutOfRange(e)
    }
}

impl From<InternalError> for SimulationError {
    fn from(e: InternalError) -> Self {
        Self::Internal(e)
    }
}
