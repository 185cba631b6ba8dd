//! # DropCanvas Core
//!
//! Element model, breakpoint style resolution and pointer interaction for an
//! absolute-positioned layout canvas. Compiles to WASM with the `wasm`
//! feature.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Workspace                   │
//! ├─────────────────────────────────────────────┤
//! │  Interaction       │  Persistence           │
//! │  - Drop / select   │  - Local snapshot      │
//! │  - Drag + snapping │  - Remote projects     │
//! │  - Resize handles  │  - Templates           │
//! ├─────────────────────────────────────────────┤
//! │  Element Store     │  Style Resolver        │
//! │  - Base records    │  - Override patches    │
//! │  - Id counter      │  - Effective styles    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All geometry is in logical pixels of the desktop (base) coordinate space.
//! Views read effective styles; only the workspace writes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod element;
pub mod error;
pub mod event;
pub mod interaction;
pub mod remote;
pub mod snap;
pub mod snapshot;
pub mod store;
pub mod style;
pub mod templates;
pub mod workspace;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use canvas::{parse_dimension, CanvasConfig, MAX_ZOOM, MIN_ZOOM};
pub use element::{
    normalize_rotation, ButtonVariant, Element, ElementId, ElementKind, Point, Rect, Style,
    MIN_ELEMENT_SIZE,
};
pub use error::{CanvasError, CanvasResult};
pub use event::{InputEvent, PointerTarget, ResizeHandle};
pub use interaction::{resize_rect, DragSession, PropertyEdit, ResizeSession, Session};
pub use remote::{ProjectId, ProjectMetadata, ProjectRemote, RemoteError};
pub use snap::{snap, Guide, GuideOrientation, SnapResult, SNAP_THRESHOLD};
pub use snapshot::{PersistenceError, SnapshotStore, WorkspaceSnapshot, WORKSPACE_KEY};
pub use store::ElementStore;
pub use style::{effective_style, Breakpoint, Overrides, StylePatch};
pub use templates::{builtin_templates, find_template, Template};
pub use workspace::Workspace;

/// Canvas core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
