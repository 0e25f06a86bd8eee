// sine tone synthesis
use std::f64::consts::PI;

/// Full scale for 16 bit samples.
pub const AMPLITUDE: f64 = i16::MAX as f64;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tone {
    /// Frequency in Hz.
    frequency: f64,

    /// Samples per second.
    sample_rate: u32,

    /// Length in seconds.
    seconds: u32,
}

impl Tone {
    pub fn new(frequency: f64, sample_rate: u32, seconds: u32) -> Self {
        Tone {
            frequency,
            sample_rate,
            seconds,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// number of samples in the whole tone
    pub fn sample_count(&self) -> usize {
        self.sample_rate as usize * self.seconds as usize
    }

    /// Sample `i` with the time axis stretched by `scale`.
    ///
    /// A scale of 1.0 is the signal that goes to the file.
    #[inline(always)]
    pub fn sample(&self, i: usize, scale: f64) -> f64 {
        (2.0 * PI * self.frequency * scale * i as f64 / self.sample_rate as f64).sin()
    }

    /// All samples at scale 1.0, quantized to 16 bit.
    pub fn pcm_samples(self) -> impl Iterator<Item = i16> {
        (0..self.sample_count()).map(move |i| quantize(self.sample(i, 1.0)))
    }
}

/// Truncates toward zero, `as` saturates anything outside the i16 range.
#[inline(always)]
pub fn quantize(s: f64) -> i16 {
    (s * AMPLITUDE) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count() {
        let tone = Tone::new(440.0, 48_000, 2);
        assert_eq!(tone.sample_count(), 96_000);
        assert_eq!(tone.pcm_samples().count(), 96_000);
    }

    #[test]
    fn quarter_period_peaks() {
        // a quarter of a period per sample
        let tone = Tone::new(12_000.0, 48_000, 1);
        let s: Vec<i16> = tone.pcm_samples().take(4).collect();
        assert_eq!(s[0], 0);
        assert_eq!(s[1], i16::MAX);
        assert_eq!(s[2], 0);
        assert_eq!(s[3], -i16::MAX);
    }

    #[test]
    fn samples_in_range() {
        for freq in [1.0, 440.0, 1234.5, 23_999.0] {
            let tone = Tone::new(freq, 48_000, 1);
            assert!(tone
                .pcm_samples()
                .all(|s| (-i16::MAX..=i16::MAX).contains(&s)));
        }
    }

    #[test]
    fn quantize_truncates_and_saturates() {
        assert_eq!(quantize(0.5), 16_383);
        assert_eq!(quantize(-0.5), -16_383);
        assert_eq!(quantize(2.0), i16::MAX);
        assert_eq!(quantize(-2.0), i16::MIN);
    }

    #[test]
    fn scale_stretches_time() {
        let tone = Tone::new(440.0, 48_000, 2);
        assert_eq!(tone.sample(100, 0.5), tone.sample(50, 1.0));
    }
}
