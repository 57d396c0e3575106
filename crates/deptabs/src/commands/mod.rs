//! CLI command implementations.

pub(crate) mod transform;

pub(crate) use transform::TransformArgs;
