//! Binding directives parsed from element attributes.

use crate::format::{FormatKind, NumberOptions, SymbolPosition};
use crate::target::BindTarget;

/// Attribute names of the declarative binding contract.
pub mod attr {
    pub const SHEET: &str = "data-sheet";
    pub const COL: &str = "data-sheet-col";
    pub const ROW: &str = "data-sheet-row";
    pub const INDEX: &str = "data-sheet-index";
    pub const FORMAT: &str = "data-sheet-format";
    pub const PREFIX: &str = "data-sheet-prefix";
    pub const SUFFIX: &str = "data-sheet-suffix";
    pub const CURRENCY: &str = "data-sheet-currency";
    pub const CURRENCY_POS: &str = "data-sheet-currency-pos";
    pub const LOCALE: &str = "data-sheet-locale";
    pub const DECIMALS: &str = "data-sheet-decimals";
}

/// How a directive addresses the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    /// A1 notation, resolved (and possibly rejected) at dispatch time.
    A1(String),
    /// Column letters plus a 1-based row number.
    ColumnRow { col: String, row: i64 },
    /// Column letters plus a 0-based index within the column.
    ColumnIndex { col: String, index: i64 },
}

/// One element's declared binding, read once per dispatch pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub address: Address,
    pub format: Option<FormatKind>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub number: NumberOptions,
}

impl Directive {
    /// Read a target's binding attributes into a directive.
    ///
    /// Returns `None` for elements with no usable addressing
    /// attributes; those are left untouched by dispatch. A col+row or
    /// col+index pair whose number does not parse does not address
    /// anything either. When an element carries several schemes the
    /// effective one is column+index, then column+row, then A1, which
    /// matches the last-write-wins order of the selector sweep this
    /// replaces.
    pub fn from_target<T: BindTarget + ?Sized>(target: &T) -> Option<Directive> {
        let address = address_of(target)?;

        let mut number = NumberOptions::default();
        if let Some(symbol) = target.attr(attr::CURRENCY).filter(|s| !s.is_empty()) {
            number.symbol = symbol.to_string();
        }
        if let Some(pos) = target.attr(attr::CURRENCY_POS) {
            number.position = SymbolPosition::from_attr(pos);
        }
        if let Some(locale) = target.attr(attr::LOCALE).filter(|l| !l.is_empty()) {
            number.locale = locale.to_string();
        }
        if let Some(decimals) = target.attr(attr::DECIMALS) {
            number.decimals = decimals.trim().parse().unwrap_or(0);
        }

        Some(Directive {
            address,
            format: target.attr(attr::FORMAT).and_then(FormatKind::from_attr),
            prefix: owned_attr(target, attr::PREFIX),
            suffix: owned_attr(target, attr::SUFFIX),
            number,
        })
    }
}

fn address_of<T: BindTarget + ?Sized>(target: &T) -> Option<Address> {
    let col = target
        .attr(attr::COL)
        .map(str::trim)
        .filter(|c| !c.is_empty());
    if let Some(col) = col {
        if let Some(index) = int_attr(target, attr::INDEX) {
            return Some(Address::ColumnIndex {
                col: col.to_string(),
                index,
            });
        }
        if let Some(row) = int_attr(target, attr::ROW) {
            return Some(Address::ColumnRow {
                col: col.to_string(),
                row,
            });
        }
    }
    target
        .attr(attr::SHEET)
        .map(|a1| Address::A1(a1.trim().to_string()))
}

fn int_attr<T: BindTarget + ?Sized>(target: &T, name: &str) -> Option<i64> {
    target.attr(name)?.trim().parse().ok()
}

fn owned_attr<T: BindTarget + ?Sized>(target: &T, name: &str) -> Option<String> {
    target
        .attr(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
