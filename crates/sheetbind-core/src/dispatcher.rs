//! The sheet dispatcher: fetch, resolve, format, write.

use crate::affix::apply_affixes;
use crate::cell_ref::CellRef;
use crate::directive::{Address, Directive};
use crate::error::SheetBindError;
use crate::fetch::{CacheMode, HttpFetcher, SheetFetcher};
use crate::format::format_value;
use crate::table::Table;
use crate::target::BindTarget;
use tracing::{debug, error};

/// Configuration for one `init` call.
#[derive(Clone, Debug)]
pub struct InitOptions {
    pub url: String,
    pub cache: CacheMode,
    /// Run a dispatch pass immediately after a successful load.
    pub auto_dispatch: bool,
}

impl InitOptions {
    pub fn new(url: impl Into<String>) -> InitOptions {
        InitOptions {
            url: url.into(),
            cache: CacheMode::default(),
            auto_dispatch: true,
        }
    }
}

enum State {
    Uninitialized,
    Loading,
    Ready(Table),
    Failed(SheetBindError),
}

/// Binds sheet data to page elements.
///
/// Holds at most one table; `init` replaces all prior state wholesale.
/// Failures are absorbed rather than propagated: a failed load leaves
/// the dispatcher in a failed state with the error queryable and every
/// accessor answering `None`/empty, and a bad directive never blocks
/// the rest of a dispatch pass.
pub struct SheetDispatcher<F = HttpFetcher> {
    fetcher: F,
    state: State,
}

impl SheetDispatcher<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new())
    }
}

impl Default for SheetDispatcher<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: SheetFetcher> SheetDispatcher<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        SheetDispatcher {
            fetcher,
            state: State::Uninitialized,
        }
    }

    /// Fetch and parse the source, then (unless disabled) run one
    /// dispatch pass over `page`.
    ///
    /// Never fails loudly: transport errors and non-success statuses
    /// are logged and recorded, and leave `page` untouched.
    pub async fn init<T: BindTarget>(&mut self, opts: &InitOptions, page: &mut [T]) {
        self.load(opts).await;
        if opts.auto_dispatch && self.is_ready() {
            self.dispatch(page);
        }
    }

    /// Fetch and parse the source without dispatching.
    pub async fn load(&mut self, opts: &InitOptions) {
        self.state = State::Loading;
        match self.fetcher.fetch_text(&opts.url, opts.cache).await {
            Ok(text) => {
                let table = Table::parse(&text);
                debug!(url = %opts.url, rows = table.row_count(), "sheet loaded");
                self.state = State::Ready(table);
            }
            Err(err) => {
                error!(url = %opts.url, %err, "sheet fetch failed");
                self.state = State::Failed(err);
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// The error that put the dispatcher in its failed state, if any.
    pub fn last_error(&self) -> Option<&SheetBindError> {
        match &self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn table(&self) -> Option<&Table> {
        match &self.state {
            State::Ready(table) => Some(table),
            _ => None,
        }
    }

    /// Cell by A1 reference. `None` until ready and on any resolution
    /// failure, including malformed references.
    pub fn get_cell(&self, a1: &str) -> Option<&str> {
        let table = self.table()?;
        let cell_ref = CellRef::from_str(a1)?;
        table.cell(cell_ref.row, cell_ref.col)
    }

    /// Whole column by letters, one entry per table row. Empty until
    /// ready or when the letters do not decode.
    pub fn get_column(&self, letters: &str) -> Vec<Option<&str>> {
        let Some(table) = self.table() else {
            return Vec::new();
        };
        let Some(col) = CellRef::column_index(letters) else {
            return Vec::new();
        };
        table.column(col)
    }

    /// One value from a column by 0-based index.
    pub fn get_from_column(&self, letters: &str, index: usize) -> Option<&str> {
        self.get_column(letters).get(index).copied().flatten()
    }

    /// One dispatch pass: resolve, format, affix and write every
    /// directive-bearing target. Targets without a directive are left
    /// untouched. Returns the number of targets written. Does nothing
    /// until the dispatcher is ready.
    pub fn dispatch<T: BindTarget>(&self, page: &mut [T]) -> usize {
        if !self.is_ready() {
            debug!("dispatch skipped; no table loaded");
            return 0;
        }

        let mut written = 0;
        for target in page.iter_mut() {
            let Some(directive) = Directive::from_target(target) else {
                continue;
            };
            let value = self.resolve(&directive.address);
            let display = format_value(value, directive.format, &directive.number);
            let display = apply_affixes(
                &display,
                directive.prefix.as_deref(),
                directive.suffix.as_deref(),
            );
            if target.is_editable() {
                target.set_value(&display);
            } else {
                target.set_text(&display);
            }
            written += 1;
        }
        debug!(written, "dispatch pass complete");
        written
    }

    fn resolve(&self, address: &Address) -> Option<&str> {
        match address {
            Address::A1(a1) => self.get_cell(a1),
            Address::ColumnRow { col, row } => {
                let row = usize::try_from(*row).ok()?.checked_sub(1)?;
                let col = CellRef::column_index(col)?;
                self.table()?.cell(row, col)
            }
            Address::ColumnIndex { col, index } => {
                let index = usize::try_from(*index).ok()?;
                self.get_from_column(col, index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;

    async fn ready_dispatcher(csv: &str) -> SheetDispatcher<StaticFetcher> {
        let mut dispatcher = SheetDispatcher::with_fetcher(StaticFetcher::new(csv));
        dispatcher.load(&InitOptions::new("static://sheet")).await;
        dispatcher
    }

    #[tokio::test]
    async fn test_get_cell_by_a1() {
        let dispatcher = ready_dispatcher("a,b\nc,d").await;
        assert_eq!(dispatcher.get_cell("A1"), Some("a"));
        assert_eq!(dispatcher.get_cell("B2"), Some("d"));
        assert_eq!(dispatcher.get_cell("C9"), None);
        assert_eq!(dispatcher.get_cell("not-a-ref"), None);
    }

    #[tokio::test]
    async fn test_get_column_and_index() {
        let dispatcher = ready_dispatcher("a,b\nc\nd,e").await;
        assert_eq!(
            dispatcher.get_column("B"),
            vec![Some("b"), None, Some("e")]
        );
        assert_eq!(dispatcher.get_from_column("B", 2), Some("e"));
        assert_eq!(dispatcher.get_from_column("B", 1), None);
        assert_eq!(dispatcher.get_from_column("B", 99), None);
        assert!(dispatcher.get_column("2B").is_empty());
    }

    #[test]
    fn test_accessors_before_init() {
        let dispatcher = SheetDispatcher::with_fetcher(StaticFetcher::new("a"));
        assert!(!dispatcher.is_ready());
        assert_eq!(dispatcher.get_cell("A1"), None);
        assert!(dispatcher.get_column("A").is_empty());
        assert!(dispatcher.last_error().is_none());
    }
}
