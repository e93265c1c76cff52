use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::core::wrap_index,
    foundation::error::{ChapterflowError, ChapterflowResult},
};

/// Vertical alignment of a chapter logo inside its column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoAlign {
    /// Vertically centred.
    #[default]
    Center,
    /// Pinned to the top.
    Top,
    /// Pinned to the bottom.
    Bottom,
}

/// Chapter logo.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Logo {
    /// Image reference (path or URL).
    pub image: String,
    /// Alignment hint.
    #[serde(default)]
    pub align: LogoAlign,
}

impl Logo {
    /// Vector logos are rendered as plain images rather than through the raster pipeline.
    pub fn is_vector(&self) -> bool {
        self.image.to_ascii_lowercase().ends_with(".svg")
    }
}

/// Focal point of a media image inside its frame.
///
/// Unknown hints read as [`MediaPosition::Center`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(missing_docs)]
pub enum MediaPosition {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    CenterLeft,
    CenterRight,
}

impl MediaPosition {
    /// Parse a kebab-case hint, falling back to [`MediaPosition::Center`].
    pub fn parse(hint: &str) -> Self {
        match hint.trim().to_ascii_lowercase().as_str() {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            "top-left" => Self::TopLeft,
            "top-right" => Self::TopRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-right" => Self::BottomRight,
            "center-left" => Self::CenterLeft,
            "center-right" => Self::CenterRight,
            _ => Self::Center,
        }
    }

    /// Kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::CenterLeft => "center-left",
            Self::CenterRight => "center-right",
        }
    }
}

impl From<String> for MediaPosition {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<MediaPosition> for String {
    fn from(value: MediaPosition) -> Self {
        value.as_str().to_owned()
    }
}

/// One image of a chapter's media grid.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MediaItem {
    /// Image reference.
    pub image: String,
    /// Focal point hint.
    #[serde(default)]
    pub position: MediaPosition,
}

/// Grid used for a chapter's media.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaLayout {
    /// No media block is rendered.
    None,
    /// One or two images side by side.
    TwoColumn,
    /// Three or more images.
    ThreeColumn,
}

/// Static, authored content of one full-viewport chapter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Chapter {
    /// Position in the deck; assigned on load.
    #[serde(default)]
    pub index: usize,
    /// Year label, also shown on the ruler indicator.
    pub year: String,
    /// Title, split per character for the reveal.
    pub title: String,
    /// Subtitle line; blank hides it.
    #[serde(default)]
    pub subtitle: String,
    /// Description paragraph; blank hides it.
    #[serde(default)]
    pub description: String,
    /// Background colour/class identifier.
    pub background_style: String,
    /// Foreground colour/class identifier.
    pub text_style: String,
    /// Logo shown beside the text column.
    pub logo: Logo,
    /// Media grid images, possibly empty.
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl Chapter {
    /// Grid the media block uses.
    pub fn media_layout(&self) -> MediaLayout {
        match self.media.len() {
            0 => MediaLayout::None,
            1 | 2 => MediaLayout::TwoColumn,
            _ => MediaLayout::ThreeColumn,
        }
    }

    /// Whether the background is a dark tone (`...-800` / `...-900`).
    pub fn has_dark_background(&self) -> bool {
        is_dark_style(&self.background_style)
    }
}

/// Dark-tone predicate on a background style identifier.
pub fn is_dark_style(style: &str) -> bool {
    style.contains("900") || style.contains("800")
}

/// Ordered, validated sequence of at least two chapters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "DeckFile", into = "DeckFile")]
pub struct ChapterDeck {
    chapters: Vec<Chapter>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct DeckFile {
    chapters: Vec<Chapter>,
}

impl TryFrom<DeckFile> for ChapterDeck {
    type Error = ChapterflowError;

    fn try_from(file: DeckFile) -> ChapterflowResult<Self> {
        Self::new(file.chapters)
    }
}

impl From<ChapterDeck> for DeckFile {
    fn from(deck: ChapterDeck) -> Self {
        Self {
            chapters: deck.chapters,
        }
    }
}

impl ChapterDeck {
    /// Validate `chapters` and assign contiguous indices.
    pub fn new(mut chapters: Vec<Chapter>) -> ChapterflowResult<Self> {
        if chapters.len() < 2 {
            return Err(ChapterflowError::validation(format!(
                "a deck needs at least 2 chapters (got {})",
                chapters.len()
            )));
        }
        for (index, chapter) in chapters.iter_mut().enumerate() {
            if chapter.title.trim().is_empty() {
                return Err(ChapterflowError::validation(format!(
                    "chapter {index} has an empty title"
                )));
            }
            if chapter.logo.image.trim().is_empty() {
                return Err(ChapterflowError::validation(format!(
                    "chapter {index} has an empty logo reference"
                )));
            }
            chapter.index = index;
        }
        Ok(Self { chapters })
    }

    /// Parse a deck from JSON (`{"chapters": [...]}`).
    pub fn from_json_str(json: &str) -> ChapterflowResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a deck file.
    pub fn from_path(path: &Path) -> ChapterflowResult<Self> {
        let f = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    /// The family heritage deck shipped with the crate.
    pub fn heritage() -> ChapterflowResult<Self> {
        Self::from_json_str(include_str!("../../data/heritage.json"))
    }

    /// Number of chapters (always >= 2).
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    /// Chapter at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    /// Chapter at `index` after cyclic wraparound.
    pub fn wrapped(&self, index: isize) -> &Chapter {
        &self.chapters[wrap_index(index, self.chapters.len())]
    }

    /// All chapters in order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Iterate chapters in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chapters/model.rs"]
mod tests;
