//! The `musiterm init` command.

use std::path::Path;

use anyhow::{Context, Result};
use musiterm_core::{Category, TermSet};
use musiterm_store::config::CONFIG_FILE_NAME;

const RESOURCE_DIR: &str = "resources";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE_NAME).exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(CONFIG_FILE_NAME, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    std::fs::create_dir_all(RESOURCE_DIR)
        .with_context(|| format!("failed to create {RESOURCE_DIR}/"))?;
    for category in Category::ALL {
        let path = Path::new(RESOURCE_DIR).join(category.resource_name());
        if path.exists() {
            println!("{} already exists, skipping.", path.display());
            continue;
        }
        let json = serde_json::to_string_pretty(&sample_terms(category))?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }

    println!("\nNext steps:");
    println!("  1. Replace the sample dictionaries in {RESOURCE_DIR}/ with your own");
    println!("  2. Run: musiterm dictionary --category tempo");
    println!("  3. Run: musiterm quiz --category tempo");

    Ok(())
}

/// Starter terms for `category`. The complete dictionary holds every part.
fn sample_terms(category: Category) -> TermSet {
    match category {
        Category::Complete => Category::PARTS
            .into_iter()
            .flat_map(|part| part_terms(part).iter().copied())
            .collect(),
        part => part_terms(part).iter().copied().collect(),
    }
}

fn part_terms(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Complete => &[],
        Category::Tempo => &[
            ("adagio", "slow"),
            ("allegro", "fast"),
            ("andante", "at a walking pace"),
            ("largo", "very slow and broad"),
            ("presto", "very fast"),
        ],
        Category::Expression => &[
            ("cantabile", "in a singing style"),
            ("dolce", "sweetly"),
            ("espressivo", "expressively"),
            ("maestoso", "majestically"),
        ],
        Category::Dynamics => &[
            ("crescendo", "gradually louder"),
            ("diminuendo", "gradually softer"),
            ("forte", "loud"),
            ("piano", "soft"),
        ],
        Category::General => &[
            ("a tempo", "return to the original speed"),
            ("da capo", "from the beginning"),
            ("fine", "the end"),
            ("tutti", "all together"),
        ],
        Category::Articulation => &[
            ("legato", "smoothly"),
            ("marcato", "marked, accented"),
            ("staccato", "short and detached"),
            ("tenuto", "held"),
        ],
        Category::Signs => &[
            ("fermata", "pause on a note or rest"),
            ("segno", "sign marking a repeat point"),
            ("coda", "closing section"),
        ],
    }
}

const SAMPLE_CONFIG: &str = r#"# musiterm configuration

# Directory holding the dictionary resources (dictionary.enc, tempo.enc, ...)
resource_dir = "./resources"

# Where app_config.enc and test_history.enc are written
data_dir = "."

# Category used when --category is not given
default_category = "complete"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses_as_defaults() {
        let config = load_sample(SAMPLE_CONFIG);
        assert_eq!(config, musiterm_store::AppConfig::default());
    }

    fn load_sample(content: &str) -> musiterm_store::AppConfig {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        musiterm_store::load_config_from(Some(&path)).unwrap()
    }

    #[test]
    fn complete_sample_contains_every_part() {
        let complete = sample_terms(Category::Complete);
        let parts: usize = Category::PARTS
            .into_iter()
            .map(|part| sample_terms(part).len())
            .sum();
        assert_eq!(complete.len(), parts);
        assert_eq!(complete.get("allegro"), Some("fast"));
        assert_eq!(complete.get("fermata"), Some("pause on a note or rest"));
    }
}
