//! Visual configuration documents.
//!
//! A [`Configuration`] is a named template for what a screen renders: a
//! head bar (logo, title text, clock), a bottom ticker bar, and a body
//! with background styling and content panels. Identity is immutable,
//! fields are mutable, and deletion is a tombstone — rows are never
//! physically removed, only hidden from normal queries.
//!
//! Block fields serialize with the camelCase names the display renderer
//! consumes (`bgColor`, `fontSize`, `fixedContent`, ...).

use serde::{Deserialize, Serialize};

/// Configuration identifier.
pub type ConfigId = u64;

/// A stored visual configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    /// Unique configuration identifier.
    pub id: ConfigId,

    /// Descriptive text for fleet operators.
    pub description: String,

    /// The style/content document served to screens.
    pub document: StyleDocument,

    /// Tombstone flag; hidden from normal queries when set.
    pub deleted: bool,
}

impl Configuration {
    /// Create a new live configuration.
    pub fn new(id: ConfigId, description: impl Into<String>, document: StyleDocument) -> Self {
        Self {
            id,
            description: description.into(),
            document,
            deleted: false,
        }
    }

    /// Check if this configuration is a tombstone.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Tombstone this configuration.
    pub fn tombstone(&mut self) {
        self.deleted = true;
    }
}

/// The full style/content document of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Head bar styling and widgets.
    pub head: HeadBlock,

    /// Bottom ticker bar.
    pub bottom: BottomBlock,

    /// Body background and content panels.
    pub body: BodyBlock,
}

impl StyleDocument {
    /// The stock document new fleets start from.
    pub fn standard() -> Self {
        Self::default()
    }
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self {
            head: HeadBlock::default(),
            bottom: BottomBlock::default(),
            body: BodyBlock::default(),
        }
    }
}

/// Head bar block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadBlock {
    pub active: bool,
    pub height: String,
    pub font_size: String,
    pub bg_color: String,
    pub text_color: String,
    pub border_color: String,
    pub logo: LogoWidget,
    pub content: HeadContent,
    pub clock: ClockWidget,
}

impl Default for HeadBlock {
    fn default() -> Self {
        Self {
            active: true,
            height: "70px".to_string(),
            font_size: "3em".to_string(),
            bg_color: "#003459".to_string(),
            text_color: "#fff".to_string(),
            border_color: "#fff".to_string(),
            logo: LogoWidget::default(),
            content: HeadContent::default(),
            clock: ClockWidget::default(),
        }
    }
}

/// Logo widget in the head bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoWidget {
    pub active: bool,
    pub url: String,
}

impl Default for LogoWidget {
    fn default() -> Self {
        Self {
            active: true,
            url: "logo.png".to_string(),
        }
    }
}

/// Title text in the head bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadContent {
    pub active: bool,
    pub text: String,
}

impl Default for HeadContent {
    fn default() -> Self {
        Self {
            active: false,
            text: "Digital Signage".to_string(),
        }
    }
}

/// Clock widget in the head bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockWidget {
    pub active: bool,
    pub text_color: String,
    pub bg_color: String,
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self {
            active: true,
            text_color: "#fff".to_string(),
            bg_color: "#003459".to_string(),
        }
    }
}

/// Bottom ticker bar block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottomBlock {
    pub active: bool,
    pub content: String,
    pub marquee: bool,
    pub height: String,
    pub font_size: String,
    pub bg_color: String,
    pub text_color: String,
}

impl Default for BottomBlock {
    fn default() -> Self {
        Self {
            active: true,
            content: String::new(),
            marquee: true,
            height: "70px".to_string(),
            font_size: "2em".to_string(),
            bg_color: "#003459".to_string(),
            text_color: "#fff".to_string(),
        }
    }
}

/// Body block: background plus content panels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyBlock {
    pub background: BodyBackground,
    pub content: BodyContent,
}

/// Body background styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyBackground {
    pub bg_color: String,
    pub bg_image: Option<String>,
}

impl Default for BodyBackground {
    fn default() -> Self {
        Self {
            bg_color: "#00A8E8".to_string(),
            bg_image: None,
        }
    }
}

/// Body content: full-width announcement panels plus free-form columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyContent {
    pub fixed_content: Vec<FixedPanel>,
    pub columns: Vec<ColumnPanel>,
}

/// A full-width announcement panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedPanel {
    pub active: bool,
    pub bg_color: String,
    pub text_color: String,
    pub border_color: String,
    pub font_size: String,
    pub marquee: bool,
    pub content: String,
}

impl FixedPanel {
    /// An announcement panel with the stock palette.
    pub fn announcement(content: impl Into<String>) -> Self {
        Self {
            active: true,
            bg_color: "#007EA7".to_string(),
            text_color: "#fff".to_string(),
            border_color: "#fff".to_string(),
            font_size: "3em".to_string(),
            marquee: false,
            content: content.into(),
        }
    }
}

/// A free-form HTML column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPanel {
    pub border_color: String,
    pub text_color: String,
    pub html: String,
}

impl ColumnPanel {
    /// A column with the stock palette.
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            border_color: "#fff".to_string(),
            text_color: "#fff".to_string(),
            html: html.into(),
        }
    }
}
