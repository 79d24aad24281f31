/// Checkpoints and the decision stack used to recover from contradictions
pub mod backtrack;
/// Compact tile-set representation for cell domains
pub mod bitset;
/// Cooperative cancellation and deadlines
pub mod cancellation;
/// Committing a cell to a single tile
pub mod collapse;
/// Solver state machine and the public generation entry points
pub mod executor;
/// Parallel independent attempts
pub mod parallel;
/// Arc-consistency propagation between neighbouring cells
pub mod propagation;
/// Adjacency rules between tile types
pub mod rules;
/// Lowest-entropy cell selection and seeded random choices
pub mod selection;
