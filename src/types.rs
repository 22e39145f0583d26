//! Shared types for the batch table and the compositing pipeline.
//!
//! These types are deserialized from the `[[images]]` table in
//! `shotframe.toml` and passed unchanged into [`crate::imaging`].

use serde::{Deserialize, Serialize};

/// Text overlay drawn next to (or under) a screenshot.
///
/// Accepts either form in TOML:
///
/// ```toml
/// caption = "Dark Theme"
/// caption = { title = "Dark Theme", subtitle = "Manage search engines" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Caption {
    Plain(String),
    Titled {
        title: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        subtitle: String,
    },
}

impl Caption {
    pub fn titled(title: &str, subtitle: &str) -> Self {
        Caption::Titled {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Caption::Plain(text) => text,
            Caption::Titled { title, .. } => title,
        }
    }

    /// Subtitle text; empty for plain captions.
    pub fn subtitle(&self) -> &str {
        match self {
            Caption::Plain(_) => "",
            Caption::Titled { subtitle, .. } => subtitle,
        }
    }

    /// True when neither title nor subtitle has any visible text.
    pub fn is_blank(&self) -> bool {
        self.title().trim().is_empty() && self.subtitle().trim().is_empty()
    }
}

/// Where the caption column sits relative to the screenshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionSide {
    Left,
    #[default]
    Right,
    Below,
}

/// One row of the batch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchEntry {
    /// Screenshot file name, relative to the input directory.
    pub source: String,
    /// PNG file name, relative to the output directory.
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Caption>,
    #[serde(default)]
    pub side: CaptionSide,
}

impl BatchEntry {
    /// The caption to render, or `None` if absent or blank.
    pub fn visible_caption(&self) -> Option<&Caption> {
        self.caption.as_ref().filter(|c| !c.is_blank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        images: Vec<BatchEntry>,
    }

    #[test]
    fn plain_caption_has_no_subtitle() {
        let caption = Caption::Plain("Quick Search".into());
        assert_eq!(caption.title(), "Quick Search");
        assert_eq!(caption.subtitle(), "");
    }

    #[test]
    fn blank_caption_is_not_visible() {
        let entry = BatchEntry {
            source: "a.png".into(),
            output: "b.png".into(),
            caption: Some(Caption::titled("  ", "")),
            side: CaptionSide::Right,
        };
        assert!(entry.visible_caption().is_none());
    }

    #[test]
    fn parse_both_caption_forms() {
        let toml = r#"
[[images]]
source = "one.png"
output = "1.png"
caption = "Plain"

[[images]]
source = "two.png"
output = "2.png"
caption = { title = "Title", subtitle = "Sub" }
side = "left"

[[images]]
source = "three.png"
output = "3.png"
"#;
        let parsed: Wrapper = toml::from_str(toml).unwrap();
        assert_eq!(parsed.images[0].caption, Some(Caption::Plain("Plain".into())));
        assert_eq!(parsed.images[0].side, CaptionSide::Right);
        assert_eq!(
            parsed.images[1].caption,
            Some(Caption::titled("Title", "Sub"))
        );
        assert_eq!(parsed.images[1].side, CaptionSide::Left);
        assert!(parsed.images[2].caption.is_none());
    }

    #[test]
    fn titled_caption_without_subtitle_parses() {
        let toml = r#"
[[images]]
source = "one.png"
output = "1.png"
caption = { title = "Only title" }
side = "below"
"#;
        let parsed: Wrapper = toml::from_str(toml).unwrap();
        let caption = parsed.images[0].caption.as_ref().unwrap();
        assert_eq!(caption.title(), "Only title");
        assert_eq!(caption.subtitle(), "");
        assert_eq!(parsed.images[0].side, CaptionSide::Below);
    }

    #[test]
    fn unknown_side_is_rejected() {
        let toml = r#"
[[images]]
source = "one.png"
output = "1.png"
side = "above"
"#;
        assert!(toml::from_str::<Wrapper>(toml).is_err());
    }
}
