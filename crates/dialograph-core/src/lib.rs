//! Dialograph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the dialograph
//! crates. It includes:
//!
//! - **Identifiers**: Typed plot ids and references ([`identifier`] module)
//! - **Plot**: The parsed dialog-flow description ([`plot::Plot`])
//! - **Graph**: The derived display graph ([`graph::Graph`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])

pub mod color;
pub mod geometry;
pub mod graph;
pub mod identifier;
pub mod plot;
