//! The `musiterm settings` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use musiterm_core::{Settings, SoundChannel};

/// Volume flags given on the command line; `None` leaves a channel alone.
#[derive(Debug, Default)]
pub struct VolumeChanges {
    pub master: Option<f64>,
    pub click: Option<f64>,
    pub correct: Option<f64>,
    pub incorrect: Option<f64>,
    pub typing: Option<f64>,
}

impl VolumeChanges {
    fn iter(&self) -> impl Iterator<Item = (SoundChannel, f64)> + '_ {
        [
            (SoundChannel::Master, self.master),
            (SoundChannel::Click, self.click),
            (SoundChannel::Correct, self.correct),
            (SoundChannel::Incorrect, self.incorrect),
            (SoundChannel::Typing, self.typing),
        ]
        .into_iter()
        .filter_map(|(channel, value)| value.map(|v| (channel, v)))
    }
}

pub fn show(config_path: Option<PathBuf>) -> Result<()> {
    let state = super::open_state(config_path)?;
    println!("{}", settings_table(state.settings()));
    Ok(())
}

pub fn set(config_path: Option<PathBuf>, changes: VolumeChanges) -> Result<()> {
    if changes.iter().next().is_none() {
        anyhow::bail!("nothing to change; pass at least one of --master, --click, --correct, --incorrect, --typing");
    }

    let mut state = super::open_state(config_path)?;
    state.update_settings(|settings| {
        for (channel, value) in changes.iter() {
            settings.set_volume(channel, value);
        }
    });

    println!("{}", settings_table(state.settings()));
    Ok(())
}

fn settings_table(settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![Cell::new("Theme"), Cell::new(settings.theme)]);
    for channel in SoundChannel::ALL {
        table.add_row(vec![
            Cell::new(channel.display_name()),
            Cell::new(format!("{:.2}", settings.volume(channel))),
        ]);
    }
    table
}
