// mapping between sample index, screen position and time
use crate::tone::Tone;
use log::debug;

/// Height reserved below the waveform for the scale labels.
pub const LABEL_HEIGHT: u32 = 40;

/// Keyboard driven changes to the time scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// `+`, scale down by a tenth of a pixel step
    ZoomInFine,
    /// `-`, scale up by a tenth of a pixel step
    ZoomOutFine,
    /// `r`
    Reset,
    /// `q`, scale down by a pixel step
    ZoomInCoarse,
    /// `a`, scale up by a pixel step
    ZoomOutCoarse,
}

#[derive(Clone, Debug)]
pub struct TimeAxis {
    tone: Tone,

    /// width in pixels
    width: u32,

    /// height in pixels, labels included
    height: u32,

    /// pixels per sample
    dx: f64,

    /// time scale, 1.0 shows the whole tone
    scale: f32,
}

impl TimeAxis {
    pub fn new(tone: Tone, width: u32, height: u32) -> Self {
        let dx = width as f64 / tone.sample_count() as f64;
        debug!("dx {}", dx);
        TimeAxis {
            tone,
            width,
            height,
            dx,
            scale: 1.0,
        }
    }

    pub fn tone(&self) -> &Tone {
        &self.tone
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn apply(&mut self, action: KeyAction) {
        let step = self.dx as f32;
        match action {
            KeyAction::ZoomInFine => self.scale -= step / 10.0,
            KeyAction::ZoomOutFine => self.scale += step / 10.0,
            KeyAction::Reset => self.scale = 1.0,
            KeyAction::ZoomInCoarse => self.scale -= step,
            KeyAction::ZoomOutCoarse => self.scale += step,
        }
        debug!("{:?} -> scale {}", action, self.scale);
    }

    /// Sample 0 sits at the right edge, later samples move left.
    pub fn screen_x(&self, i: usize) -> i32 {
        (self.width as f64 - i as f64 * self.dx) as i32
    }

    pub fn screen_y(&self, s: f64) -> i32 {
        let mid = self.height as f64 / 2.0;
        let amplitude = self.height as f64 / 3.0;
        (s * amplitude + mid) as i32
    }

    /// y of the horizontal scale line
    pub fn axis_y(&self) -> u32 {
        self.height.saturating_sub(LABEL_HEIGHT)
    }

    /// Pixels covered by the tone at the current scale, sorted, no duplicates.
    pub fn points(&self) -> Vec<(i32, i32)> {
        let scale = self.scale as f64;
        let mut points: Vec<(i32, i32)> = (0..self.tone.sample_count())
            .map(|i| (self.screen_x(i), self.screen_y(self.tone.sample(i, scale))))
            .collect();
        points.sort_unstable();
        points.dedup();
        points
    }

    /// label at the far end of the scale line
    pub fn end_label(&self) -> String {
        format!("{:.6}", self.tone.seconds() as f64 * self.scale as f64)
    }
}
