//! sheetbind-core - CSV table model, reference resolution, and
//! data-attribute dispatch.

pub mod affix;
pub mod cell_ref;
pub mod directive;
pub mod dispatcher;
pub mod error;
pub mod fetch;
pub mod format;
pub mod table;
pub mod target;

pub use affix::apply_affixes;
pub use cell_ref::CellRef;
pub use directive::{Address, Directive};
pub use dispatcher::{InitOptions, SheetDispatcher};
pub use error::{Result, SheetBindError};
pub use fetch::{CacheMode, FileFetcher, HttpFetcher, SheetFetcher, StaticFetcher};
pub use format::{FormatKind, NOT_AVAILABLE, NumberOptions, SymbolPosition, format_value};
pub use table::Table;
pub use target::{BindTarget, PageElement};
