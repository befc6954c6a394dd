//! Editing surface contract and a rope-backed in-memory text area.
//!
//! The history manager in `core-state` never touches a concrete widget. It
//! reads and writes through [`Surface`], which any host (terminal editor,
//! GUI text box, test double) implements. [`TextArea`] is the implementation
//! shipped here; it is what the session runner and the tests drive.
//!
//! Offsets exchanged through [`Surface`] are character indices, not bytes.

pub mod grapheme;
mod surface;
mod textarea;

pub use surface::Surface;
pub use textarea::{PAGE_LINES, TextArea};
