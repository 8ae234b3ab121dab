//! [<img alt="crates.io" src="https://img.shields.io/crates/v/pcm-device.svg?style=for-the-badge&color=fc8d62&logo=rust" height="20">](https://crates.io/crates/pcm-device)
//! [<img alt="docs.rs" src="https://img.shields.io/badge/docs.rs-pcm--device-66c2a5?style=for-the-badge&logoColor=white" height="20">](https://docs.rs/pcm-device)
//!
//! Probe and configure PCM playback devices.
//!
//! This crate does three things with a native audio subsystem:
//!
//! * [probe] opens a playback device, reports the sample formats it supports
//!   together with its channel, rate, period size and buffer size ranges, and
//!   closes it again without altering its configuration.
//! * [Negotiator] opens a playback device and installs a working hardware
//!   configuration. Sample rate, period size and period count are requested
//!   with nearest-match semantics, so the device may substitute a nearby value
//!   which is reported through [Config::deviations] rather than as an error.
//!   The sample format is the first of [FORMAT_CANDIDATES] that the device
//!   accepts.
//! * [hints] enumerates devices of a [Category] without opening them.
//!
//! Every native resource is owned by a guard which releases it exactly once,
//! on success as well as on every error path.
//!
//! <br>
//!
//! ## Backends
//!
//! The native subsystem is abstracted through the [Backend] trait. ALSA is
//! supported through the `alsa` feature, which provides [alsa::Alsa].
//!
//! ```no_run
//! # #[cfg(feature = "alsa")]
//! # fn main() -> anyhow::Result<()> {
//! use pcm_device::{alsa, Category};
//!
//! let report = pcm_device::probe(&alsa::Alsa, "default")?;
//! println!("{}", report);
//!
//! let negotiated = pcm_device::negotiate(&alsa::Alsa, "default")?;
//!
//! for deviation in negotiated.config().deviations() {
//!     println!("{}", deviation);
//! }
//!
//! for hint in pcm_device::hints(&alsa::Alsa, Category::Pcm)? {
//!     println!("{:?}", hint.name);
//! }
//! # Ok(()) }
//! # #[cfg(not(feature = "alsa"))]
//! # fn main() {}
//! ```
//!
//! <br>
//!
//! ## Examples
//!
//! * `alsa-probe [device]` prints the capability report of a device.
//! * `alsa-negotiate [device]` negotiates the default configuration.
//! * `alsa-hints [category]` lists device hints.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
#[doc(hidden)]
mod macros;

mod errno;
pub use self::errno::Errno;

mod enums;
pub use self::enums::{
    Access, Category, Direction, Format, HintField, IoDirection, ParseCategoryError, Stream,
};

mod error;
pub use self::error::{Constraint, Error, Query, Result};

mod backend;
pub use self::backend::Backend;

mod pcm;
pub use self::pcm::Pcm;

mod hardware_parameters;
pub use self::hardware_parameters::{HardwareParameters, Near};

mod probe;
pub use self::probe::{probe, CapabilityReport, Range};

mod negotiator;
pub use self::negotiator::{
    negotiate, Config, Deviation, Negotiated, Negotiator, Parameter, DEFAULT_ACCESS,
    DEFAULT_CHANNELS, DEFAULT_PERIODS, DEFAULT_PERIOD_SIZE, DEFAULT_RATE, FORMAT_CANDIDATES,
};

mod hint;
pub use self::hint::{hints, Hint, Hints};

cfg_alsa! {
    pub mod alsa;
}
