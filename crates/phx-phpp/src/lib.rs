//! Writing PHX projects into a PHPP design workbook.
//!
//! The workbook is reached through the [`Workbook`] trait, so any host
//! application able to read and write cells can be plugged in;
//! [`InMemoryWorkbook`] is a sparse reference implementation.
//!
//! Input blocks (surfaces, windows, ventilation, ...) are found at run
//! time by an anchor string and an entry marker, as described by a
//! [`PhppShape`]. A [`PhppConnection`] locates each block once, then fills
//! it row by row: a row whose description already matches is overwritten,
//! otherwise the next empty row is used.
//!
//! ```
//! use phx_phpp::{GlazingRow, InMemoryWorkbook, PhppConnection, PhppShape};
//!
//! let shape = PhppShape::english_10()?;
//! let mut wb = InMemoryWorkbook::new(["Components"]);
//! wb.set("Components", "ID", 10, "Glazing");
//! wb.set("Components", "ID", 12, 1.0);
//!
//! let mut phpp = PhppConnection::new(wb, shape);
//! phpp.write_glazings(&[GlazingRow {
//!     description: "Triple low-e".into(),
//!     g_value: 0.5,
//!     u_value: 0.6,
//! }])?;
//! assert_eq!(
//!     phpp.get_glazing_phpp_id_by_name("Triple low-e")?.as_deref(),
//!     Some("1-Triple low-e")
//! );
//! # Ok::<(), phx_phpp::PhppError>(())
//! ```

pub mod column;
pub mod connection;
pub mod error;
pub mod locator;
pub mod rows;
pub mod shape;
pub mod xl;

pub use column::{CellRef, col_index, col_letters, col_offset};
pub use connection::PhppConnection;
pub use error::{PhppError, Result};
pub use locator::{BlockRows, ShapeLocator};
pub use rows::{
    DuctRow, FrameRow, GlazingRow, PhppRow, SurfaceGroup, SurfaceRow, UValueConstructor,
    UValueLayer, VentRoomRow, VentUnitRow, VentilatorRow, WindowRow,
};
pub use shape::{BlockLocator, BlockShape, EntryMarker, PhppShape, UValueShape};
pub use xl::{CellValue, InMemoryWorkbook, SilentMode, Workbook, XlItem};
