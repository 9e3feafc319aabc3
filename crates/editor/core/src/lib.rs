//! Front-end agnostic tile-world map editor.
//!
//! The editor borrows a host world through [`world_core::WorldAccess`] and
//! never owns it. Layering, bottom up:
//!
//! - [`transform`]: viewport mapping between world and screen cells
//! - [`region`] and [`selector`]: selection shapes and the interactive session
//!   that moves or resizes them
//! - [`palette`], [`broadcast`] and [`inspector`]: picking values, writing
//!   them to every selected cell, and describing a cell
//! - [`pipeline`]: scratch-map regeneration with preview, apply and abort
//! - [`overlay`]: glyph surfaces, region blink and highlight overlays
//! - [`editor`]: the mode machine tying the above together into frames
//! - [`driver`]: the await-next-input loop front ends run
pub mod broadcast;
pub mod driver;
pub mod editor;
pub mod input;
pub mod inspector;
pub mod overlay;
pub mod palette;
pub mod pipeline;
pub mod region;
pub mod selector;
pub mod transform;

pub use driver::{Canvas, ChannelInput, DriverError, InputSource, SessionSummary, run_editor};
pub use editor::{EditorContext, EditorFrame, Flow, Hint, MapEditor, Panel};
pub use input::{EditCategory, EditorInput, InputContext};
pub use pipeline::{ApplyReport, PipelineError, RegenPipeline};
pub use region::{Region, SelectionRules, Shape};
