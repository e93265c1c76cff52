//! Title segmentation for the per-character reveal.

use crate::stage::Target;

/// One renderable character of a split title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CharUnit {
    /// Position among the non-whitespace characters.
    pub index: usize,
    /// The character.
    pub ch: char,
    /// Index of the word containing the character.
    pub word: usize,
}

/// A title split into characters and words.
///
/// Whitespace separates words and produces no character unit. Once [`TextSplit::revert`] has
/// been called the split holds no handles.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TextSplit {
    source: String,
    chars: Vec<CharUnit>,
    words: Vec<String>,
    reverted: bool,
}

impl TextSplit {
    /// Split `text` into characters and words.
    pub fn new(text: &str) -> Self {
        let words: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
        let chars = words
            .iter()
            .enumerate()
            .flat_map(|(word, w)| w.chars().map(move |ch| (word, ch)))
            .enumerate()
            .map(|(index, (word, ch))| CharUnit { index, ch, word })
            .collect();

        Self {
            source: text.to_owned(),
            chars,
            words,
            reverted: false,
        }
    }

    /// Character units in reading order (empty after revert).
    pub fn chars(&self) -> &[CharUnit] {
        &self.chars
    }

    /// Words in reading order (empty after revert).
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Stage targets of the characters of chapter `chapter`.
    pub fn char_targets(&self, chapter: usize) -> Vec<Target> {
        self.chars
            .iter()
            .map(|unit| Target::TitleChar {
                chapter,
                char_index: unit.index,
            })
            .collect()
    }

    /// Original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Release all handles. Safe to call repeatedly.
    pub fn revert(&mut self) {
        self.chars.clear();
        self.words.clear();
        self.reverted = true;
    }

    /// Whether [`TextSplit::revert`] has run.
    pub fn is_reverted(&self) -> bool {
        self.reverted
    }
}
