use crate::{Access, Category, Direction, Errno, Format, HintField, Stream};

/// The native audio subsystem which owns device handles, hardware parameter
/// sets and device hints.
///
/// This is a thin, unsafe-free view of the native primitives. Resources are
/// handed out as associated handle types and must be released exactly once
/// through the matching release method, after which they must not be used
/// again. The safe wrappers [Pcm][crate::Pcm],
/// [HardwareParameters][crate::HardwareParameters] and
/// [Hints][crate::Hints] uphold this for you and are how this trait is
/// intended to be consumed.
///
/// All methods are blocking.
pub trait Backend {
    /// A handle to an open PCM device.
    type Pcm;
    /// A hardware parameter set.
    type HardwareParameters;
    /// A batch of device hints.
    type Hints;

    /// The sample formats known to the subsystem, in ascending order of their
    /// native identifier.
    fn formats(&self) -> &[Format] {
        Format::ALL
    }

    /// Open the PCM device identified by `name`.
    fn open(&self, name: &str, stream: Stream) -> Result<Self::Pcm, Errno>;

    /// Close a PCM device.
    fn close(&self, pcm: &mut Self::Pcm);

    /// Allocate an uninitialized hardware parameter set.
    fn hw_params_malloc(&self) -> Result<Self::HardwareParameters, Errno>;

    /// Free a hardware parameter set.
    fn hw_params_free(&self, hw: &mut Self::HardwareParameters);

    /// Fill a hardware parameter set with the full capability range of the
    /// device.
    fn hw_params_any(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
    ) -> Result<(), Errno>;

    /// Test if the format is available in the hardware parameter set without
    /// restricting it.
    fn test_format(
        &self,
        pcm: &Self::Pcm,
        hw: &Self::HardwareParameters,
        format: Format,
    ) -> bool;

    /// Minimum channel count of the hardware parameter set.
    fn channels_min(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno>;

    /// Maximum channel count of the hardware parameter set.
    fn channels_max(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno>;

    /// Minimum sample rate of the hardware parameter set.
    fn rate_min(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno>;

    /// Maximum sample rate of the hardware parameter set.
    fn rate_max(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno>;

    /// Minimum period size in frames of the hardware parameter set.
    fn period_size_min(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno>;

    /// Maximum period size in frames of the hardware parameter set.
    fn period_size_max(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno>;

    /// Minimum buffer size in frames of the hardware parameter set.
    fn buffer_size_min(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno>;

    /// Maximum buffer size in frames of the hardware parameter set.
    fn buffer_size_max(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno>;

    /// Restrict the hardware parameter set to exactly `channels`.
    fn set_channels(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        channels: u32,
    ) -> Result<(), Errno>;

    /// Restrict the hardware parameter set to the given access type.
    fn set_access(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        access: Access,
    ) -> Result<(), Errno>;

    /// Restrict the hardware parameter set to the supported rate nearest to
    /// `rate`, returning the accepted rate.
    fn set_rate_near(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        rate: u32,
    ) -> Result<(u32, Direction), Errno>;

    /// Restrict the hardware parameter set to exactly `format`.
    fn set_format(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        format: Format,
    ) -> Result<(), Errno>;

    /// Restrict the hardware parameter set to the supported period size
    /// nearest to `frames`, returning the accepted period size.
    fn set_period_size_near(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        frames: u64,
    ) -> Result<(u64, Direction), Errno>;

    /// Restrict the hardware parameter set to the supported period count
    /// nearest to `periods`, returning the accepted period count.
    fn set_periods_near(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        periods: u32,
    ) -> Result<(u32, Direction), Errno>;

    /// Install the hardware parameter set on the device. This is all or
    /// nothing.
    fn hw_params(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
    ) -> Result<(), Errno>;

    /// Prepare the device for use.
    fn prepare(&self, pcm: &mut Self::Pcm) -> Result<(), Errno>;

    /// Enumerate device hints for the given category.
    fn name_hint(&self, category: Category) -> Result<Self::Hints, Errno>;

    /// The number of hints in a batch.
    fn hints_len(&self, hints: &Self::Hints) -> usize;

    /// Read a field of the hint at `index`. Absent fields are `None`.
    fn hint_field(&self, hints: &Self::Hints, index: usize, field: HintField) -> Option<String>;

    /// Free a batch of device hints.
    fn free_hints(&self, hints: &mut Self::Hints);
}
