//! Venue layout scaling and multi-tab layout document engine.
//!
//! This crate converts the real-world, metric dimensions of floor-plan objects
//! (tables, stages, dance floors, markers) into on-screen pixel geometry, and
//! owns the document model that holds one or more independent canvas tabs per
//! event. It is pure computation: the host UI feeds it elements and a canvas
//! size, paints the resulting [`render::RenderData`], and hands immutable
//! document snapshots to a [`persistence::PersistenceGateway`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`dimension`] | Fixed and parametric size specs and their resolution |
//! | [`scale`] | Space bounds, pixels-per-meter, and the letterboxed viewport |
//! | [`render`] | Pixel-space render geometry for a single element |
//! | [`element`] | Layout elements, the element catalogue, sparse updates |
//! | [`canvas`] | Per-tab canvas collections (elements, walls, doors, ...) |
//! | [`doc`] | The multi-tab layout document and its validated mutations |
//! | [`engine`] | Editing session: active-tab rendering, dirty tracking, saves |
//! | [`ids`] | Identifier and clock capabilities supplied to the document |
//! | [`persistence`] | Snapshot boundary and the persistence gateway seam |
//! | [`config`] | Environment-driven defaults |
//! | [`fixtures`] | Canonical fixtures for proportion and tab-invariant checks |
//! | [`error`] | Error taxonomy and grepable error codes |
//! | [`consts`] | Shared constants (default names, catalogue sizes) |

pub mod canvas;
pub mod config;
pub mod consts;
pub mod dimension;
pub mod doc;
pub mod element;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod ids;
pub mod persistence;
pub mod render;
pub mod scale;

pub use error::{ErrorCode, LayoutError};
