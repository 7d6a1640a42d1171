//! URL building and HTML-to-view parsing for the two per-entity pages.
//!
//! Extractors never see raw HTML; they work on the small ordered views built
//! here, which tests can construct directly.

use scraper::{ElementRef, Html, Selector};

use crate::error::AppError;

const BIO_FIELD: &str = ".fl";
const BIO_HIGHLIGHT: &str = ".tenky-modry";
const VALUATION_PANEL: &str = ".panel-body.center";
const VALUATION_ALERT: &str = "[role=\"alert\"]";

/// Slug used by the valuation site: whitespace runs become single hyphens.
pub fn valuation_slug(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Slug used by the biography site: periods dropped, apostrophes hyphenated.
pub fn biography_slug(name: &str) -> String {
    name.replace('.', "")
        .replace('\'', "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn valuation_url(base: &str, id: &str, name: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), id, valuation_slug(name))
}

pub fn biography_url(base: &str, name: &str) -> String {
    format!("{}/{}-horoscope", base.trim_end_matches('/'), biography_slug(name))
}

/// One labelled field on the biography page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BioField {
    pub text: String,
    /// Text of the first highlighted sub-element, if any.
    pub highlight: Option<String>,
}

impl BioField {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlight: None,
        }
    }
}

/// Ordered field view of a biography page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiographyPage {
    pub fields: Vec<BioField>,
}

impl BiographyPage {
    pub fn from_html(html: &str) -> Result<Self, AppError> {
        let field_sel = selector(BIO_FIELD)?;
        let highlight_sel = selector(BIO_HIGHLIGHT)?;
        let doc = Html::parse_document(html);

        let fields = doc
            .select(&field_sel)
            .map(|el| BioField {
                text: element_text(el),
                highlight: el.select(&highlight_sel).next().map(element_text),
            })
            .collect();

        Ok(Self { fields })
    }

    pub fn field(&self, idx: usize) -> Option<&BioField> {
        self.fields.get(idx)
    }

    /// `from_end = 1` is the last field.
    pub fn field_from_end(&self, from_end: usize) -> Option<&BioField> {
        let idx = self.fields.len().checked_sub(from_end)?;
        self.fields.get(idx)
    }
}

/// Price panels and alert boxes of a valuation page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuationPage {
    pub panels: Vec<String>,
    pub alerts: Vec<String>,
}

impl ValuationPage {
    pub fn from_html(html: &str) -> Result<Self, AppError> {
        let panel_sel = selector(VALUATION_PANEL)?;
        let alert_sel = selector(VALUATION_ALERT)?;
        let doc = Html::parse_document(html);

        Ok(Self {
            panels: doc.select(&panel_sel).map(element_text).collect(),
            alerts: doc.select(&alert_sel).map(element_text).collect(),
        })
    }

    pub fn panel(&self, idx: usize) -> Option<&str> {
        self.panels.get(idx).map(String::as_str)
    }

    pub fn panel_from_end(&self, from_end: usize) -> Option<&str> {
        let idx = self.panels.len().checked_sub(from_end)?;
        self.panel(idx)
    }
}

fn selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css).map_err(|e| AppError::config(format!("Invalid selector '{css}': {e}")))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
