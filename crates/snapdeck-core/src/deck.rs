//! Deck files.
//!
//! A deck is a TOML document with one `[[section]]` table per screen. Items
//! inside a section are either static text, a single element that fades up,
//! or a stagger group whose children animate one after another:
//!
//! ```toml
//! more_target = "about"
//!
//! [[section]]
//! title = "Hello"
//! [[section.item]]
//! kind = "fade-up"
//! text = "Welcome"
//! delay = 0.2
//!
//! [[section]]
//! id = "about"
//! [[section.item]]
//! kind = "stagger"
//! children = ["one", "two", "three"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::section::{ElementId, FadeTarget, Section, StaggerGroup};
use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
struct DeckFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    more_target: Option<SectionRef>,
    #[serde(default, rename = "section")]
    sections: Vec<SectionSpec>,
}

/// A section named by position or by id
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SectionRef {
    Index(usize),
    Id(String),
}

#[derive(Debug, Clone, Deserialize)]
struct SectionSpec {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "item")]
    items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum ItemSpec {
    Text {
        text: String,
    },
    FadeUp {
        text: String,
        #[serde(default)]
        delay: f64,
    },
    Stagger {
        #[serde(default)]
        children: Vec<String>,
    },
}

/// Renderable block of a section
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Never animated
    Text(String),
    Fade {
        element: ElementId,
        text: String,
        delay: f64,
    },
    Stagger {
        children: Vec<(ElementId, String)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionContent {
    pub id: Option<String>,
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl SectionContent {
    /// Typed animation descriptor for this section
    pub fn descriptor(&self, index: usize) -> Section {
        let mut singles = Vec::new();
        let mut groups = Vec::new();

        for block in &self.blocks {
            match block {
                Block::Text(_) => {}
                Block::Fade { element, delay, .. } => {
                    singles.push(FadeTarget::new(*element).with_delay(*delay));
                }
                Block::Stagger { children } => {
                    groups.push(StaggerGroup::new(children.iter().map(|(id, _)| *id).collect()));
                }
            }
        }

        Section::new(index, singles, groups)
    }

    /// Number of animated elements
    pub fn animated_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| match b {
                Block::Text(_) => 0,
                Block::Fade { .. } => 1,
                Block::Stagger { children } => children.len(),
            })
            .sum()
    }
}

/// A loaded, validated deck
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub title: Option<String>,
    /// Section the "more" affordance jumps to
    pub more_target: usize,
    pub sections: Vec<SectionContent>,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: DeckFile = toml::from_str(content)?;
        Self::build(file)
    }

    fn build(file: DeckFile) -> Result<Self> {
        if file.sections.is_empty() {
            return Err(Error::EmptyDeck);
        }

        let mut next_id = 0u32;
        let mut alloc = || {
            let id = ElementId(next_id);
            next_id += 1;
            id
        };

        let mut sections = Vec::with_capacity(file.sections.len());
        for (index, spec) in file.sections.into_iter().enumerate() {
            let mut blocks = Vec::with_capacity(spec.items.len());
            for item in spec.items {
                let block = match item {
                    ItemSpec::Text { text } => Block::Text(text),
                    ItemSpec::FadeUp { text, delay } => {
                        if !delay.is_finite() || delay < 0.0 {
                            return Err(Error::Deck(format!(
                                "section {}: delay must be a non-negative number, got {}",
                                index, delay
                            )));
                        }
                        Block::Fade {
                            element: alloc(),
                            text,
                            delay,
                        }
                    }
                    ItemSpec::Stagger { children } => Block::Stagger {
                        children: children.into_iter().map(|text| (alloc(), text)).collect(),
                    },
                };
                blocks.push(block);
            }
            sections.push(SectionContent {
                id: spec.id,
                title: spec.title,
                blocks,
            });
        }

        let more_target = match file.more_target {
            None => 1.min(sections.len() - 1),
            Some(SectionRef::Index(i)) if i < sections.len() => i,
            Some(SectionRef::Index(i)) => {
                return Err(Error::Deck(format!(
                    "more_target {} is out of range (deck has {} sections)",
                    i,
                    sections.len()
                )))
            }
            Some(SectionRef::Id(id)) => sections
                .iter()
                .position(|s| s.id.as_deref() == Some(id.as_str()))
                .ok_or_else(|| Error::Deck(format!("more_target '{}' names no section", id)))?,
        };

        Ok(Self {
            title: file.title,
            more_target,
            sections,
        })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Animation descriptors for every section, in order
    pub fn descriptors(&self) -> Vec<Section> {
        self.sections
            .iter()
            .enumerate()
            .map(|(i, s)| s.descriptor(i))
            .collect()
    }

    /// Position of the section with the given id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id.as_deref() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        title = "Sample"
        more_target = "about"

        [[section]]
        title = "Hello"
        [[section.item]]
        kind = "fade-up"
        text = "Welcome"
        [[section.item]]
        kind = "fade-up"
        text = "Later"
        delay = 0.3

        [[section]]
        id = "about"
        [[section.item]]
        kind = "text"
        text = "static"
        [[section.item]]
        kind = "stagger"
        children = ["a", "b", "c"]
    "#;

    #[test]
    fn test_load_sample() {
        let deck = Deck::from_toml(SAMPLE).unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.title.as_deref(), Some("Sample"));
        assert_eq!(deck.more_target, 1);
        assert_eq!(deck.index_of("about"), Some(1));
        assert_eq!(deck.sections[0].animated_count(), 2);
        assert_eq!(deck.sections[1].animated_count(), 3);
    }

    #[test]
    fn test_descriptors_use_unique_ids() {
        let deck = Deck::from_toml(SAMPLE).unwrap();
        let sections = deck.descriptors();

        assert_eq!(sections[0].singles()[1].delay, 0.3);
        assert_eq!(
            sections[1].stagger_groups()[0].children,
            vec![ElementId(2), ElementId(3), ElementId(4)]
        );
        assert_eq!(sections[1].index(), 1);
        assert!(sections[1].singles().is_empty());
    }

    #[test]
    fn test_empty_deck() {
        assert!(matches!(Deck::from_toml("title = \"x\""), Err(Error::EmptyDeck)));
    }

    #[test]
    fn test_more_target_defaults() {
        let single = Deck::from_toml("[[section]]\ntitle = \"only\"").unwrap();
        assert_eq!(single.more_target, 0);

        let two = Deck::from_toml("[[section]]\n[[section]]\n").unwrap();
        assert_eq!(two.more_target, 1);
    }

    #[test]
    fn test_bad_more_target() {
        let err = Deck::from_toml("more_target = 4\n[[section]]\n").unwrap_err();
        assert!(matches!(err, Error::Deck(_)));

        let err = Deck::from_toml("more_target = \"nope\"\n[[section]]\n").unwrap_err();
        assert!(matches!(err, Error::Deck(_)));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let err = Deck::from_toml(
            "[[section]]\n[[section.item]]\nkind = \"fade-up\"\ntext = \"x\"\ndelay = -1.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Deck(_)));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = Deck::from_toml("[[section]]\n[[section.item]]\nkind = \"spin\"\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }
}
