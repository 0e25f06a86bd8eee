/// config
///
use egui::{Color32, FontId, Stroke};
use log::debug;
use serde::{Deserialize, Serialize};

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

/// Drawing configuration for the scope window.
pub struct Config {
    /// Background fill.
    pub background: Color32,

    /// Waveform points.
    pub point_color: Color32,

    /// Stroke for the scale line.
    pub stroke_axis: Stroke,

    /// Label color
    pub label_color: Color32,

    /// Label font
    pub label_font: FontId,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            background: Color32::BLACK,
            point_color: Color32::WHITE,
            stroke_axis: Stroke::new(1.0, Color32::WHITE),
            label_color: Color32::WHITE,
            label_font: FontId::proportional(14.0),
        }
    }
}

/// Tone and window settings, optionally read from a json file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// samples per second
    pub sample_rate: u32,

    /// length of the tone
    pub seconds: u32,

    /// window width in pixels
    pub width: u32,

    /// window height in pixels
    pub height: u32,

    /// where the tone is written
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            sample_rate: 48_000,
            seconds: 2,
            width: 600,
            height: 300,
            output: PathBuf::from("out.wav"),
        }
    }
}

impl Settings {
    /// load
    pub fn load(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file))?;
        debug!("settings {:?} from {}", settings, path.display());
        Ok(settings)
    }
}
