//! Mdcanon Core
//!
//! This crate provides the document tree, configuration options, and error
//! definitions shared by the mdcanon workspace.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Tree`], [`NodeId`], [`Node`] - The arena-backed document tree
//! - [`NodeKind`], [`Alignment`] - Node kinds and their payloads
//! - [`walk`], [`Walk`] - Depth-first traversal with a skip-children signal
//! - [`Options`] - Render configuration
//! - [`Error`] - Error types

pub mod error;
pub mod node;
pub mod options;

pub use error::{Error, Result};
pub use node::{
    walk, Alignment, CellData, CodeBlockData, LinkData, ListData, Node, NodeId, NodeKind, Tree,
    Walk,
};
pub use options::Options;
