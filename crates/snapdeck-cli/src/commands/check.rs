use std::path::Path;

use anyhow::{Context, Result};

use snapdeck_core::{AnimationSequencer, AppConfig, Deck};

/// Validate a deck and print what each section will animate
pub fn run(config: &AppConfig, path: &Path) -> Result<()> {
    let deck = Deck::load(path).with_context(|| format!("invalid deck {}", path.display()))?;
    let reduced = config.motion.resolve();
    let sequencer = AnimationSequencer::new(config.animation.clone(), reduced);

    println!(
        "{} ({} sections)",
        deck.title.as_deref().unwrap_or("(untitled)"),
        deck.len()
    );
    if reduced.is_reduced() {
        println!("Reduced motion is on: sections will appear without animation.");
    }
    println!();

    for (index, section) in deck.descriptors().iter().enumerate() {
        let content = &deck.sections[index];
        let title = content.title.as_deref().unwrap_or("(no title)");
        let id = content
            .id
            .as_deref()
            .map(|id| format!(" #{}", id))
            .unwrap_or_default();
        let more = if index == deck.more_target { "  <- more" } else { "" };

        println!("  {:>2}. {}{}{}", index + 1, title, id, more);
        if section.has_animations() {
            let timeline = sequencer.plan(section);
            println!(
                "      {} animated elements, entrance {:.2}s",
                section.animated_elements().len(),
                timeline.duration()
            );
        } else {
            println!("      static");
        }
    }

    Ok(())
}
