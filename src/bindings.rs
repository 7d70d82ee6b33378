//! TOML bindings files: declarative directives for the CLI.
//!
//! A bindings file stands in for the attribute-annotated page the
//! library normally dispatches over. Each entry carries a label, one
//! addressing scheme and the optional formatting keys:
//!
//! ```toml
//! [[bindings]]
//! label = "growth"
//! cell = "B2"
//! format = "percent"
//!
//! [[bindings]]
//! label = "budget"
//! col = "B"
//! row = 3
//! format = "currency"
//! decimals = 2
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use sheetbind_core::PageElement;
use sheetbind_core::directive::attr;
use std::path::Path;

const MAX_BINDINGS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BindingsFile {
    #[serde(default)]
    bindings: Vec<BindingEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BindingEntry {
    label: Option<String>,
    cell: Option<String>,
    col: Option<String>,
    row: Option<i64>,
    index: Option<i64>,
    format: Option<String>,
    prefix: Option<String>,
    suffix: Option<String>,
    currency: Option<String>,
    #[serde(rename = "currency-pos")]
    currency_pos: Option<String>,
    locale: Option<String>,
    decimals: Option<u32>,
}

#[derive(Debug)]
pub struct LoadedBindings {
    /// Display label per element, same order as `elements`.
    pub labels: Vec<String>,
    pub elements: Vec<PageElement>,
    /// Per-entry problems; the rest of the file still loads.
    pub warnings: Vec<String>,
}

pub fn load_bindings(path: &Path) -> Result<LoadedBindings> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
    if meta.len() > MAX_BINDINGS_FILE_BYTES {
        bail!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_BINDINGS_FILE_BYTES
        );
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file: BindingsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let mut labels = Vec::new();
    let mut elements = Vec::new();
    let mut warnings = Vec::new();

    for (i, entry) in file.bindings.iter().enumerate() {
        let Some((label, element)) = build_element(entry) else {
            warnings.push(format!(
                "binding {} has no address (need `cell`, or `col` with `row`/`index`)",
                i + 1
            ));
            continue;
        };
        labels.push(entry.label.clone().unwrap_or(label));
        elements.push(element);
    }

    Ok(LoadedBindings {
        labels,
        elements,
        warnings,
    })
}

/// Turn one entry into an attribute-annotated element, plus a fallback
/// label derived from its address. `None` when no address is present.
fn build_element(entry: &BindingEntry) -> Option<(String, PageElement)> {
    let mut element = PageElement::new("span");
    let fallback_label;

    if let Some(cell) = entry.cell.as_deref() {
        element = element.with_attr(attr::SHEET, cell);
        fallback_label = cell.trim().to_string();
    } else {
        let col = entry.col.as_deref()?;
        element = element.with_attr(attr::COL, col);
        if let Some(index) = entry.index {
            element = element.with_attr(attr::INDEX, &index.to_string());
            fallback_label = format!("{}[{}]", col.trim(), index);
        } else {
            let row = entry.row?;
            element = element.with_attr(attr::ROW, &row.to_string());
            fallback_label = format!("{}{}", col.trim(), row);
        }
    }

    if let Some(format) = entry.format.as_deref() {
        element = element.with_attr(attr::FORMAT, format);
    }
    if let Some(prefix) = entry.prefix.as_deref() {
        element = element.with_attr(attr::PREFIX, prefix);
    }
    if let Some(suffix) = entry.suffix.as_deref() {
        element = element.with_attr(attr::SUFFIX, suffix);
    }
    if let Some(currency) = entry.currency.as_deref() {
        element = element.with_attr(attr::CURRENCY, currency);
    }
    if let Some(pos) = entry.currency_pos.as_deref() {
        element = element.with_attr(attr::CURRENCY_POS, pos);
    }
    if let Some(locale) = entry.locale.as_deref() {
        element = element.with_attr(attr::LOCALE, locale);
    }
    if let Some(decimals) = entry.decimals {
        element = element.with_attr(attr::DECIMALS, &decimals.to_string());
    }

    Some((fallback_label, element))
}
