/// Pipeline domain layer
///
/// Value objects and the run state machine. Nothing in here performs I/O
/// except the workspace, which owns a temporary directory.
pub mod domain;
