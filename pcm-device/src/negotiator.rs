use crate::{Access, Backend, Format, Near, Pcm, Result, Stream};
use std::fmt;

/// Default number of channels to use is 1.
pub const DEFAULT_CHANNELS: u32 = 1;
/// Default access to configure.
pub const DEFAULT_ACCESS: Access = Access::ReadWriteNoninterleaved;
/// Default sample rate to request.
pub const DEFAULT_RATE: u32 = 48000;
/// Default period size in frames to request.
pub const DEFAULT_PERIOD_SIZE: u64 = 256;
/// Default number of periods to request.
pub const DEFAULT_PERIODS: u32 = 3;
/// Sample formats tried during negotiation, in order of preference.
pub const FORMAT_CANDIDATES: &[Format] = &[Format::FloatLE, Format::S32LE];

/// The hardware configuration accepted by a device during negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The number of channels being used.
    pub channels: u32,
    /// The access type being used.
    pub access: Access,
    /// The sample format being used.
    pub format: Format,
    /// The sample rate in Hz.
    pub rate: Near<u32>,
    /// The period size in frames.
    pub period_size: Near<u64>,
    /// The number of periods.
    pub periods: Near<u32>,
}

impl Config {
    /// Every parameter where the device accepted something other than what was
    /// requested.
    ///
    /// These are informational. The device is fully usable with the accepted
    /// values.
    pub fn deviations(&self) -> Vec<Deviation> {
        let mut out = Vec::new();

        if self.rate.deviates() {
            out.push(Deviation::new(Parameter::Rate, self.rate));
        }

        if self.period_size.deviates() {
            out.push(Deviation::new(Parameter::PeriodSize, self.period_size));
        }

        if self.periods.deviates() {
            out.push(Deviation::new(Parameter::Periods, self.periods));
        }

        out
    }
}

/// A parameter negotiated with nearest-match semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// The sample rate in Hz.
    Rate,
    /// The period size in frames.
    PeriodSize,
    /// The number of periods.
    Periods,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rate => f.write_str("sample rate"),
            Self::PeriodSize => f.write_str("period size"),
            Self::Periods => f.write_str("periods"),
        }
    }
}

/// A nearest-match substitution made by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deviation {
    /// The parameter which was substituted.
    pub parameter: Parameter,
    /// The requested value.
    pub requested: u64,
    /// The accepted value.
    pub actual: u64,
}

impl Deviation {
    fn new<T>(parameter: Parameter, near: Near<T>) -> Self
    where
        T: Into<u64>,
    {
        Self {
            parameter,
            requested: near.requested.into(),
            actual: near.actual.into(),
        }
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is not supported, using {}",
            self.parameter, self.requested, self.actual
        )
    }
}

/// An open device which has been configured and prepared.
///
/// Dropping it closes the device.
pub struct Negotiated<'a, B>
where
    B: ?Sized + Backend,
{
    pcm: Pcm<'a, B>,
    config: Config,
}

impl<'a, B> Negotiated<'a, B>
where
    B: ?Sized + Backend,
{
    /// The configuration accepted by the device.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the prepared device.
    pub fn pcm(&self) -> &Pcm<'a, B> {
        &self.pcm
    }

    /// Access the prepared device mutably.
    pub fn pcm_mut(&mut self) -> &mut Pcm<'a, B> {
        &mut self.pcm
    }

    /// Take ownership of the prepared device and its configuration.
    pub fn into_parts(self) -> (Pcm<'a, B>, Config) {
        (self.pcm, self.config)
    }
}

/// Negotiate hardware parameters for a playback device.
///
/// Every request is applied to a fresh parameter set in a fixed order:
/// channels, access, rate, format, period size and period count. Rate, period
/// size and periods use nearest-match semantics where substitutions are
/// reported through [Config::deviations] rather than treated as errors. The
/// format is the first of [FORMAT_CANDIDATES] the device accepts.
///
/// Any failure releases the parameter set and closes the device before the
/// error is returned.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "alsa")]
/// # fn main() -> anyhow::Result<()> {
/// use pcm_device::{alsa, Negotiator};
///
/// let negotiated = Negotiator::new(&alsa::Alsa)
///     .rate(44100)
///     .period_size(512)
///     .open("default")?;
///
/// dbg!(negotiated.config());
/// # Ok(()) }
/// # #[cfg(not(feature = "alsa"))]
/// # fn main() {}
/// ```
pub struct Negotiator<'a, B>
where
    B: ?Sized + Backend,
{
    backend: &'a B,
    channels: u32,
    access: Access,
    rate: u32,
    period_size: u64,
    periods: u32,
}

impl<'a, B> Negotiator<'a, B>
where
    B: ?Sized + Backend,
{
    /// Construct a negotiator with the default parameters.
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            channels: DEFAULT_CHANNELS,
            access: DEFAULT_ACCESS,
            rate: DEFAULT_RATE,
            period_size: DEFAULT_PERIOD_SIZE,
            periods: DEFAULT_PERIODS,
        }
    }

    /// Configure the exact number of channels to use.
    pub fn channels(self, channels: u32) -> Self {
        Self { channels, ..self }
    }

    /// Configure the stream access to use.
    pub fn access(self, access: Access) -> Self {
        Self { access, ..self }
    }

    /// Configure the sample rate to request.
    pub fn rate(self, rate: u32) -> Self {
        Self { rate, ..self }
    }

    /// Configure the period size in frames to request.
    pub fn period_size(self, period_size: u64) -> Self {
        Self {
            period_size,
            ..self
        }
    }

    /// Configure the number of periods to request.
    pub fn periods(self, periods: u32) -> Self {
        Self { periods, ..self }
    }

    /// Open `device` for playback, install the negotiated configuration and
    /// prepare it for use.
    pub fn open(&self, device: &str) -> Result<Negotiated<'a, B>> {
        let mut pcm = Pcm::open(self.backend, device, Stream::Playback)?;
        let config = self.install(&mut pcm)?;
        pcm.prepare()?;
        Ok(Negotiated { pcm, config })
    }

    fn install(&self, pcm: &mut Pcm<'a, B>) -> Result<Config> {
        let mut hw = pcm.hardware_parameters_any()?;
        hw.set_channels(self.channels)?;
        hw.set_access(self.access)?;

        let rate = hw.set_rate_near(self.rate)?;

        if rate.deviates() {
            tracing::info!(
                "rate {} Hz is not supported, using {} Hz",
                rate.requested,
                rate.actual
            );
        }

        let format = hw.set_format_preferred(FORMAT_CANDIDATES)?;
        let period_size = hw.set_period_size_near(self.period_size)?;
        tracing::info!("period size set to {} frames", period_size);

        let periods = hw.set_periods_near(self.periods)?;

        if periods.deviates() {
            tracing::info!(
                "{} periods are not supported, using {}",
                periods.requested,
                periods.actual
            );
        }

        hw.install()?;

        Ok(Config {
            channels: self.channels,
            access: self.access,
            format,
            rate,
            period_size,
            periods,
        })
    }
}

/// Negotiate the default configuration for `device`.
///
/// See [Negotiator].
pub fn negotiate<'a, B>(backend: &'a B, device: &str) -> Result<Negotiated<'a, B>>
where
    B: ?Sized + Backend,
{
    Negotiator::new(backend).open(device)
}
