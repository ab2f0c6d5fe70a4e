//! Caliper Core Types and Document Model
//!
//! This crate provides the foundational types for the Caliper selection
//! engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned object names ([`identifier::Id`])
//! - **Placements**: Rigid transforms and their composition ([`placement`] module)
//! - **Classification**: The closed enumeration of object kinds ([`classification::Classification`])
//! - **Document**: The in-process object store the engine resolves against ([`document`] module)

pub mod classification;
pub mod document;
pub mod identifier;
pub mod placement;
