//! Static entity metadata.
//!
//! Entities, their properties, and the index declarations attached to them
//! are plain `&'static` data built with `const fn` constructors, so a model
//! can be declared next to the type it describes and registered at startup.
//!
//! - `entity`: collection roots and embedded types
//! - `field`: persistent properties and their types
//! - `index`: single-field, geospatial, and compound index declarations
pub mod entity;
pub mod field;
pub mod index;
