//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `Header`: view title, model name and status
//! - `Sidebar`: navigation and system status
//! - `MessageView`: one chat message, segment by segment
//! - `SchematicView`: strokes drawn on a braille canvas
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent `...State` lives in `TuiState` and implements `EventHandler`;
//! a transient wrapper borrows it each frame to render:
//! - `InputBox`: text field used by the prompt, search and schema editor
//! - `MessageList`: scrollable conversation with layout caching
//! - `Dashboard`, `ComponentViewer`, `SymbolGallery`, `ValidatorView`
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, not by reaching into `App`.
//! This keeps dependencies explicit and lets every component be rendered
//! against a `TestBackend` in isolation.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── header.rs            (Title row)
//! ├── sidebar.rs           (Navigation column)
//! ├── dashboard.rs         (Quick-action cards)
//! ├── component_viewer.rs  (Search, list and detail)
//! ├── symbol_gallery.rs    (Symbol card grid)
//! ├── validator_view.rs    (Schema editor and result)
//! ├── message.rs           (Single message renderer)
//! ├── message_list.rs      (Scrollable message container)
//! ├── schematic.rs         (Braille schematic widget)
//! └── input_box/           (Editable text field)
//! ```

pub mod component_viewer;
pub mod dashboard;
pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod schematic;
pub mod sidebar;
pub mod symbol_gallery;
pub mod validator_view;

pub use component_viewer::{ComponentViewer, ComponentViewerState};
pub use dashboard::Dashboard;
pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use sidebar::{SIDEBAR_WIDTH, Sidebar};
pub use symbol_gallery::{SymbolGallery, SymbolGalleryState};
pub use validator_view::ValidatorView;
