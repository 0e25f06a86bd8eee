//! PCM container writer.
//!
//! Layout (little endian):
//! `RIFF`, riff size, `WAVE`, `fmt `, 16, format, channels, sample rate,
//! byte rate, block align, bits per sample, `data`, data size, samples.
use log::debug;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Size of the header preceding the sample data.
pub const HEADER_LEN: usize = 44;

/// Format code for linear PCM.
pub const FORMAT_PCM: u16 = 1;

/// Size of the format block following `fmt `.
const FMT_LEN: u32 = 16;

/// Bytes counted by the riff size field that are not sample data.
const RIFF_OVERHEAD: u32 = HEADER_LEN as u32 - 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PcmSpec {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl PcmSpec {
    /// single channel, 16 bit signed
    pub fn mono_16(sample_rate: u32) -> Self {
        PcmSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// bytes per frame (one sample for every channel), `None` on overflow
    pub fn block_align(&self) -> Option<u16> {
        self.channels.checked_mul(self.bits_per_sample / 8)
    }

    /// bytes per second, `None` on overflow
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate
            .checked_mul(self.block_align()? as u32)
    }

    /// Only 16 bit samples with at least one channel can be written.
    pub fn validate(&self) -> io::Result<()> {
        if self.bits_per_sample != 16 {
            return Err(invalid(format!(
                "{} bit samples are not supported",
                self.bits_per_sample
            )));
        }
        if self.channels == 0 {
            return Err(invalid("no channels".to_owned()));
        }
        if self.byte_rate().is_none() {
            return Err(invalid(format!(
                "byte rate of {:?} does not fit 32 bits",
                self
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    spec: PcmSpec,
    block_align: u16,
    byte_rate: u32,
    /// sample data in bytes
    data_len: u32,
}

impl Header {
    /// Header for `frames` frames of `spec`.
    ///
    /// Fails for anything but 16 bit samples, or if the sizes do not fit the
    /// 32 bit size fields.
    pub fn new(spec: PcmSpec, frames: usize) -> io::Result<Self> {
        spec.validate()?;
        let block_align = spec.block_align().unwrap_or_default();
        let byte_rate = spec.byte_rate().unwrap_or_default();

        let data_len = (frames as u64).checked_mul(block_align as u64);
        match data_len {
            Some(data_len) if data_len <= (u32::MAX - RIFF_OVERHEAD) as u64 => Ok(Header {
                spec,
                block_align,
                byte_rate,
                data_len: data_len as u32,
            }),
            _ => Err(invalid(format!(
                "{} frames do not fit a riff container",
                frames
            ))),
        }
    }

    pub fn data_len(&self) -> u32 {
        self.data_len
    }

    /// Value of the riff size field, everything after it.
    pub fn riff_len(&self) -> u32 {
        RIFF_OVERHEAD + self.data_len
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        let mut at = 0;
        let mut put = |field: &[u8]| {
            bytes[at..at + field.len()].copy_from_slice(field);
            at += field.len();
        };

        put(b"RIFF");
        put(&self.riff_len().to_le_bytes());
        put(b"WAVE");

        put(b"fmt ");
        put(&FMT_LEN.to_le_bytes());
        put(&FORMAT_PCM.to_le_bytes());
        put(&self.spec.channels.to_le_bytes());
        put(&self.spec.sample_rate.to_le_bytes());
        put(&self.byte_rate.to_le_bytes());
        put(&self.block_align.to_le_bytes());
        put(&self.spec.bits_per_sample.to_le_bytes());

        put(b"data");
        put(&self.data_len.to_le_bytes());

        bytes
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }
}

/// Write header and samples, `samples` holds interleaved 16 bit frames.
pub fn write_pcm<W: Write>(w: &mut W, spec: PcmSpec, samples: &[i16]) -> io::Result<Header> {
    spec.validate()?;
    let channels = spec.channels as usize;
    if samples.len() % channels != 0 {
        return Err(invalid(format!(
            "{} samples are not whole frames of {} channels",
            samples.len(),
            channels
        )));
    }
    let frames = samples.len() / channels;
    let header = Header::new(spec, frames)?;
    debug!("header {:?}", header);

    header.write_to(w)?;
    for s in samples {
        w.write_all(&s.to_le_bytes())?;
    }
    Ok(header)
}

/// Create (or truncate) `path` and write the container to it.
pub fn write_file(path: &Path, spec: PcmSpec, samples: &[i16]) -> io::Result<Header> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = write_pcm(&mut w, spec, samples)?;
    w.flush()?;
    debug!("wrote {} bytes to {}", header.riff_len() + 8, path.display());
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_derived_fields() {
        let spec = PcmSpec::mono_16(48_000);
        assert_eq!(spec.block_align(), Some(2));
        assert_eq!(spec.byte_rate(), Some(96_000));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn byte_rate_overflow() {
        let spec = PcmSpec::mono_16(3_000_000_000);
        assert_eq!(spec.byte_rate(), None);
        let err = Header::new(spec, 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn only_16_bit_samples() {
        for bits in [8, 24, 32] {
            let spec = PcmSpec {
                bits_per_sample: bits,
                ..PcmSpec::mono_16(8_000)
            };
            let mut out: Vec<u8> = vec![];
            let err = write_pcm(&mut out, spec, &[1, 2, 3, 4]).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn zero_channels_rejected() {
        let spec = PcmSpec {
            channels: 0,
            ..PcmSpec::mono_16(8_000)
        };
        let mut out: Vec<u8> = vec![];
        let err = write_pcm(&mut out, spec, &[1, 2]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }

    #[test]
    fn partial_frames_rejected() {
        let spec = PcmSpec {
            channels: 2,
            ..PcmSpec::mono_16(8_000)
        };
        let mut out: Vec<u8> = vec![];
        let err = write_pcm(&mut out, spec, &[1, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());

        let header = write_pcm(&mut out, spec, &[1, 2, 3, 4]).unwrap();
        assert_eq!(header.data_len(), 8);
        assert_eq!(out.len(), HEADER_LEN + 8);
        assert_eq!(&out[28..34], &[0x00, 0x7d, 0x00, 0x00, 4, 0]);
    }

    #[test]
    fn header_bytes() {
        let header = Header::new(PcmSpec::mono_16(48_000), 96_000).unwrap();
        let b = header.to_bytes();

        assert_eq!(&b[0..4], b"RIFF");
        assert_eq!(&b[4..8], &(36u32 + 192_000).to_le_bytes());
        assert_eq!(&b[8..12], b"WAVE");
        assert_eq!(&b[12..16], b"fmt ");
        assert_eq!(&b[16..20], &[16, 0, 0, 0]);
        assert_eq!(&b[20..22], &[1, 0]);
        assert_eq!(&b[22..24], &[1, 0]);
        assert_eq!(&b[24..28], &48_000u32.to_le_bytes());
        assert_eq!(&b[28..32], &96_000u32.to_le_bytes());
        assert_eq!(&b[32..34], &[2, 0]);
        assert_eq!(&b[34..36], &[16, 0]);
        assert_eq!(&b[36..40], b"data");
        assert_eq!(&b[40..44], &192_000u32.to_le_bytes());
    }

    #[test]
    fn declared_sizes_match_written_bytes() {
        let samples: Vec<i16> = (0..1000).map(|i| (i * 31) as i16).collect();
        let mut out: Vec<u8> = vec![];
        let header = write_pcm(&mut out, PcmSpec::mono_16(8_000), &samples).unwrap();

        assert_eq!(out.len(), HEADER_LEN + 2 * samples.len());
        let riff = u32::from_le_bytes(out[4..8].try_into().unwrap());
        let data = u32::from_le_bytes(out[40..44].try_into().unwrap());
        assert_eq!(riff as usize + 8, out.len());
        assert_eq!(data as usize, out.len() - HEADER_LEN);
        assert_eq!(header.data_len(), data);
    }

    #[test]
    fn samples_little_endian() {
        let mut out: Vec<u8> = vec![];
        write_pcm(&mut out, PcmSpec::mono_16(8_000), &[0x1234, -2]).unwrap();
        assert_eq!(&out[HEADER_LEN..], &[0x34, 0x12, 0xfe, 0xff]);
    }

    #[test]
    fn empty_data() {
        let mut out: Vec<u8> = vec![];
        let header = write_pcm(&mut out, PcmSpec::mono_16(8_000), &[]).unwrap();
        assert_eq!(out.len(), HEADER_LEN);
        assert_eq!(header.riff_len(), 36);
    }

    #[test]
    fn oversized_data_rejected() {
        let err = Header::new(PcmSpec::mono_16(48_000), u32::MAX as usize).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
