use crate::{Access, Backend, Constraint, Direction, Errno, Error, Format, Pcm, Query, Result};
use std::fmt;

/// The outcome of a nearest-match request.
///
/// The device is free to substitute the closest value it supports for the one
/// requested, so both are kept for the caller to inspect.
///
/// # Examples
///
/// ```rust
/// use pcm_device::{Direction, Near};
///
/// let rate = Near::new(48000, 44100, Direction::Nearest);
/// assert!(rate.deviates());
/// assert_eq!(rate.to_string(), "44100 (requested 48000)");
///
/// let periods = Near::new(3, 3, Direction::Nearest);
/// assert!(!periods.deviates());
/// assert_eq!(periods.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Near<T> {
    /// The requested value.
    pub requested: T,
    /// The value accepted by the device.
    pub actual: T,
    /// The sub-unit direction of the accepted value.
    pub direction: Direction,
}

impl<T> Near<T>
where
    T: PartialEq,
{
    /// Construct a new nearest-match outcome.
    pub fn new(requested: T, actual: T, direction: Direction) -> Self {
        Self {
            requested,
            actual,
            direction,
        }
    }

    /// Test if the accepted value differs from the requested one.
    pub fn deviates(&self) -> bool {
        self.requested != self.actual
    }
}

impl<T> fmt::Display for Near<T>
where
    T: PartialEq + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deviates() {
            write!(f, "{} (requested {})", self.actual, self.requested)
        } else {
            fmt::Display::fmt(&self.actual, f)
        }
    }
}

/// Hardware parameters being configured for a [Pcm] handle.
///
/// The parameter set is freed when dropped. It mutably borrows its device, so
/// it can never be used after the device is closed.
///
/// See [Pcm::hardware_parameters_any].
pub struct HardwareParameters<'p, 'a, B>
where
    B: ?Sized + Backend,
{
    pcm: &'p mut Pcm<'a, B>,
    handle: B::HardwareParameters,
}

impl<'p, 'a, B> HardwareParameters<'p, 'a, B>
where
    B: ?Sized + Backend,
{
    /// Allocate hardware parameters and fill them with the full capability
    /// range of the device.
    pub(crate) fn any(pcm: &'p mut Pcm<'a, B>) -> Result<Self> {
        let backend = pcm.backend;
        let handle = backend.hw_params_malloc().map_err(Error::Allocate)?;
        let mut hw = Self { pcm, handle };

        backend
            .hw_params_any(&mut hw.pcm.handle, &mut hw.handle)
            .map_err(Error::Initialize)?;

        Ok(hw)
    }

    /// Verify if a format is available inside the configuration space. This
    /// doesn't restrict it.
    pub fn test_format(&self, format: Format) -> bool {
        self.pcm
            .backend
            .test_format(&self.pcm.handle, &self.handle, format)
    }

    /// Extract minimum channels count from the configuration space.
    pub fn channels_min(&self) -> Result<u32> {
        self.query(Query::ChannelsMin, B::channels_min)
    }

    /// Extract maximum channels count from the configuration space.
    pub fn channels_max(&self) -> Result<u32> {
        self.query(Query::ChannelsMax, B::channels_max)
    }

    /// Extract minimum rate from the configuration space.
    pub fn rate_min(&self) -> Result<u32> {
        self.query(Query::RateMin, B::rate_min)
    }

    /// Extract maximum rate from the configuration space.
    pub fn rate_max(&self) -> Result<u32> {
        self.query(Query::RateMax, B::rate_max)
    }

    /// Extract minimum period size in frames from the configuration space.
    pub fn period_size_min(&self) -> Result<u64> {
        self.query(Query::PeriodSizeMin, B::period_size_min)
    }

    /// Extract maximum period size in frames from the configuration space.
    pub fn period_size_max(&self) -> Result<u64> {
        self.query(Query::PeriodSizeMax, B::period_size_max)
    }

    /// Extract minimum buffer size in frames from the configuration space.
    pub fn buffer_size_min(&self) -> Result<u64> {
        self.query(Query::BufferSizeMin, B::buffer_size_min)
    }

    /// Extract maximum buffer size in frames from the configuration space.
    pub fn buffer_size_max(&self) -> Result<u64> {
        self.query(Query::BufferSizeMax, B::buffer_size_max)
    }

    /// Restrict the configuration space to contain only one channels count.
    pub fn set_channels(&mut self, channels: u32) -> Result<()> {
        let backend = self.pcm.backend;
        backend
            .set_channels(&mut self.pcm.handle, &mut self.handle, channels)
            .map_err(rejected(Constraint::Channels(channels)))
    }

    /// Restrict the configuration space to contain only one access type.
    pub fn set_access(&mut self, access: Access) -> Result<()> {
        let backend = self.pcm.backend;
        backend
            .set_access(&mut self.pcm.handle, &mut self.handle, access)
            .map_err(rejected(Constraint::Access(access)))
    }

    /// Restrict the configuration space to have the rate nearest to a target.
    ///
    /// A substituted rate is not an error, inspect the returned [Near].
    pub fn set_rate_near(&mut self, rate: u32) -> Result<Near<u32>> {
        let backend = self.pcm.backend;
        let (actual, dir) = backend
            .set_rate_near(&mut self.pcm.handle, &mut self.handle, rate)
            .map_err(rejected(Constraint::Rate(rate)))?;
        Ok(Near::new(rate, actual, dir))
    }

    /// Restrict the configuration space to contain only one format.
    pub fn set_format(&mut self, format: Format) -> Result<()> {
        let backend = self.pcm.backend;
        backend
            .set_format(&mut self.pcm.handle, &mut self.handle, format)
            .map_err(rejected(Constraint::Format(format)))
    }

    /// Restrict the configuration space to the first format out of
    /// `candidates` which the device accepts.
    ///
    /// Candidates are tried once each, in order. If every one is rejected
    /// this fails with [Error::NoSupportedFormat] carrying the native error
    /// of the last attempt.
    pub fn set_format_preferred(&mut self, candidates: &[Format]) -> Result<Format> {
        let backend = self.pcm.backend;
        let mut last = Errno::EINVAL;

        for &format in candidates {
            match backend.set_format(&mut self.pcm.handle, &mut self.handle, format) {
                Ok(()) => return Ok(format),
                Err(errno) => {
                    tracing::debug!(
                        "format {} rejected by {}: {}",
                        format,
                        self.pcm.name(),
                        errno
                    );
                    last = errno;
                }
            }
        }

        Err(Error::NoSupportedFormat {
            candidates: candidates.into(),
            source: last,
        })
    }

    /// Restrict the configuration space to have the period size nearest to a
    /// target.
    ///
    /// A substituted period size is not an error, inspect the returned [Near].
    pub fn set_period_size_near(&mut self, frames: u64) -> Result<Near<u64>> {
        let backend = self.pcm.backend;
        let (actual, dir) = backend
            .set_period_size_near(&mut self.pcm.handle, &mut self.handle, frames)
            .map_err(rejected(Constraint::PeriodSize(frames)))?;
        Ok(Near::new(frames, actual, dir))
    }

    /// Restrict the configuration space to have the periods count nearest to a
    /// target.
    pub fn set_periods_near(&mut self, periods: u32) -> Result<Near<u32>> {
        let backend = self.pcm.backend;
        let (actual, dir) = backend
            .set_periods_near(&mut self.pcm.handle, &mut self.handle, periods)
            .map_err(rejected(Constraint::Periods(periods)))?;
        Ok(Near::new(periods, actual, dir))
    }

    /// Install the configuration space on the device.
    ///
    /// This is all or nothing. The parameter set is freed afterwards
    /// regardless of the outcome.
    pub fn install(mut self) -> Result<()> {
        let backend = self.pcm.backend;
        backend
            .hw_params(&mut self.pcm.handle, &mut self.handle)
            .map_err(Error::Commit)
    }

    fn query<T>(
        &self,
        query: Query,
        f: impl FnOnce(&B, &B::HardwareParameters) -> std::result::Result<T, Errno>,
    ) -> Result<T> {
        f(self.pcm.backend, &self.handle).map_err(|source| Error::Query { query, source })
    }
}

impl<B> Drop for HardwareParameters<'_, '_, B>
where
    B: ?Sized + Backend,
{
    fn drop(&mut self) {
        self.pcm.backend.hw_params_free(&mut self.handle);
        tracing::debug!("released hardware parameters of {}", self.pcm.name());
    }
}

fn rejected(constraint: Constraint) -> impl FnOnce(Errno) -> Error {
    move |source| Error::Rejected { constraint, source }
}
