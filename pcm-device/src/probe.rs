use crate::{Backend, Format, Pcm, Result, Stream};
use std::fmt;

/// An inclusive range of a numeric device capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range<T> {
    /// The smallest supported value.
    pub min: T,
    /// The largest supported value.
    pub max: T,
}

impl<T> Range<T>
where
    T: PartialOrd,
{
    /// Test if the value is inside the range.
    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value <= self.max
    }
}

impl<T> fmt::Display for Range<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

/// The capabilities of a playback device, as collected by [probe].
///
/// The display implementation prints one supported format per line followed
/// by the ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityReport {
    /// The name of the probed device.
    pub device: String,
    /// Supported sample formats, in ascending order of their native identifier.
    pub formats: Vec<Format>,
    /// Supported channel counts.
    pub channels: Range<u32>,
    /// Supported sample rates in Hz.
    pub rate: Range<u32>,
    /// Supported period sizes in frames.
    pub period_size: Range<u64>,
    /// Supported buffer sizes in frames.
    pub buffer_size: Range<u64>,
}

impl fmt::Display for CapabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for format in &self.formats {
            writeln!(f, "{}", format)?;
        }

        writeln!(f, "Channel range: {} channels", self.channels)?;
        writeln!(
            f,
            "Sample rate range: {} Hz to {} Hz",
            self.rate.min, self.rate.max
        )?;
        writeln!(f, "Period size range: {} frames", self.period_size)?;
        write!(f, "Buffer size range: {} frames", self.buffer_size)
    }
}

/// Open `device` for playback and collect its capabilities.
///
/// The device configuration is not altered. The parameter set is released and
/// the device closed before this returns, on success as well as on error.
pub fn probe<B>(backend: &B, device: &str) -> Result<CapabilityReport>
where
    B: ?Sized + Backend,
{
    let mut pcm = Pcm::open(backend, device, Stream::Playback)?;
    let hw = pcm.hardware_parameters_any()?;

    let formats = backend
        .formats()
        .iter()
        .copied()
        .filter(|&format| hw.test_format(format))
        .collect();

    let channels = Range {
        min: hw.channels_min()?,
        max: hw.channels_max()?,
    };

    let rate = Range {
        min: hw.rate_min()?,
        max: hw.rate_max()?,
    };

    let period_size = Range {
        min: hw.period_size_min()?,
        max: hw.period_size_max()?,
    };

    let buffer_size = Range {
        min: hw.buffer_size_min()?,
        max: hw.buffer_size_max()?,
    };

    Ok(CapabilityReport {
        device: device.to_owned(),
        formats,
        channels,
        rate,
        period_size,
        buffer_size,
    })
}
