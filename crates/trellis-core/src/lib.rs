//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Efficient string-interned cell identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Orientation**: Mapping of the native layout frame onto the screen ([`orientation`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod orientation;
