use crate::{Access, Category, Errno, Format};
use std::fmt;
use thiserror::Error;

/// Errors raised while probing, negotiating or enumerating devices.
///
/// Every variant carries the native [Errno] which caused it, see
/// [Error::errno].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The device could not be opened.
    #[error("cannot open audio device {device}: {source}")]
    Open {
        /// The name of the device that was being opened.
        device: Box<str>,
        /// The native error.
        #[source]
        source: Errno,
    },
    /// The hardware parameter set could not be allocated.
    #[error("cannot allocate hardware parameter structure: {0}")]
    Allocate(#[source] Errno),
    /// The hardware parameter set could not be initialized to the full
    /// capability range of the device.
    #[error("cannot initialize hardware parameter structure: {0}")]
    Initialize(#[source] Errno),
    /// Reading a capability from the hardware parameter set failed.
    #[error("error getting {query}: {source}")]
    Query {
        /// The capability being read.
        query: Query,
        /// The native error.
        #[source]
        source: Errno,
    },
    /// The device rejected a hardware parameter constraint.
    #[error("cannot set {constraint}: {source}")]
    Rejected {
        /// The constraint that was requested.
        constraint: Constraint,
        /// The native error.
        #[source]
        source: Errno,
    },
    /// None of the candidate sample formats were accepted.
    #[error("cannot set sample format, tried {}: {source}", FormatList(.candidates))]
    NoSupportedFormat {
        /// The candidates which were tried, in order.
        candidates: Box<[Format]>,
        /// The native error of the last rejected candidate.
        #[source]
        source: Errno,
    },
    /// The hardware parameter set could not be committed to the device.
    #[error("cannot set hardware parameters: {0}")]
    Commit(#[source] Errno),
    /// The device could not be prepared for use.
    #[error("cannot prepare audio interface for use: {0}")]
    Prepare(#[source] Errno),
    /// Device hints could not be enumerated.
    #[error("cannot get {category} device hints: {source}")]
    Hints {
        /// The category being enumerated.
        category: Category,
        /// The native error.
        #[source]
        source: Errno,
    },
}

impl Error {
    /// Get the native error number that caused this error.
    pub fn errno(&self) -> Errno {
        match *self {
            Self::Open { source, .. } => source,
            Self::Allocate(source) => source,
            Self::Initialize(source) => source,
            Self::Query { source, .. } => source,
            Self::Rejected { source, .. } => source,
            Self::NoSupportedFormat { source, .. } => source,
            Self::Commit(source) => source,
            Self::Prepare(source) => source,
            Self::Hints { source, .. } => source,
        }
    }

    /// The process exit status to report this error with.
    ///
    /// This is the negative return code of the failing native call, which is
    /// what a program returning that code from `main` exits with.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pcm_device::{Errno, Error};
    ///
    /// let error = Error::Prepare(Errno::EIO);
    /// assert_eq!(error.exit_code(), -Errno::EIO.get());
    /// ```
    pub fn exit_code(&self) -> i32 {
        -self.errno().get()
    }
}

/// Helper result wrapper.
pub type Result<T, E = Error> = ::std::result::Result<T, E>;

/// A capability read from a hardware parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Query {
    /// Minimum channel count.
    ChannelsMin,
    /// Maximum channel count.
    ChannelsMax,
    /// Minimum sample rate.
    RateMin,
    /// Maximum sample rate.
    RateMax,
    /// Minimum period size.
    PeriodSizeMin,
    /// Maximum period size.
    PeriodSizeMax,
    /// Minimum buffer size.
    BufferSizeMin,
    /// Maximum buffer size.
    BufferSizeMax,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::ChannelsMin => "minimum channels",
            Self::ChannelsMax => "maximum channels",
            Self::RateMin => "minimum rate",
            Self::RateMax => "maximum rate",
            Self::PeriodSizeMin => "minimum period size",
            Self::PeriodSizeMax => "maximum period size",
            Self::BufferSizeMin => "minimum buffer size",
            Self::BufferSizeMax => "maximum buffer size",
        };

        f.write_str(what)
    }
}

/// A hardware parameter constraint together with the requested value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Constraint {
    /// An exact channel count.
    Channels(u32),
    /// An access type.
    Access(Access),
    /// A sample rate in Hz, nearest match.
    Rate(u32),
    /// An exact sample format.
    Format(Format),
    /// A period size in frames, nearest match.
    PeriodSize(u64),
    /// A period count, nearest match.
    Periods(u32),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channels(channels) => write!(f, "channel count to {}", channels),
            Self::Access(access) => write!(f, "access type to {}", access),
            Self::Rate(rate) => write!(f, "sample rate to {} Hz", rate),
            Self::Format(format) => write!(f, "sample format to {}", format),
            Self::PeriodSize(frames) => write!(f, "period size to {} frames", frames),
            Self::Periods(periods) => write!(f, "period count to {}", periods),
        }
    }
}

struct FormatList<'a>(&'a [Format]);

impl fmt::Display for FormatList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut it = self.0.iter();

        if let Some(first) = it.next() {
            write!(f, "{}", first)?;
        }

        for format in it {
            write!(f, ", {}", format)?;
        }

        Ok(())
    }
}
