use std::fmt;
use std::str;

macro_rules! decl_enum {
    (
        $(#[doc = $doc:literal])*
        #[repr($ty:ident)]
        $vis:vis enum $name:ident {
            $(
                $(#[$m:meta])*
                $a:ident = $b:literal => $id:literal
            ),* $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[non_exhaustive]
        #[repr($ty)]
        $vis enum $name {
            $(
                $(#[$m])*
                #[allow(missing_docs)]
                $a = $b,
            )*
        }

        impl $name {
            /// Every known value, in ascending order of its native identifier.
            $vis const ALL: &'static [Self] = &[$(Self::$a,)*];

            /// Parse the given enum from a native identifier.
            $vis fn from_value(value: $ty) -> Option<Self> {
                Some(match value {
                    $($b => Self::$a,)*
                    _ => return None,
                })
            }

            /// The native identifier of the value.
            $vis fn value(self) -> $ty {
                self as $ty
            }

            /// The name the native subsystem uses for the value.
            $vis fn name(self) -> &'static str {
                match self {
                    $(Self::$a => $id,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    }
}

/// The direction in which a nearest-match request was resolved when the exact
/// value was not available.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Direction {
    /// The accepted value is smaller than the exact one.
    Smaller = -1,
    /// The accepted value is exact.
    Nearest = 0,
    /// The accepted value is greater than the exact one.
    Greater = 1,
}

impl Direction {
    /// Parse a direction from the sub-unit direction reported by the native
    /// subsystem.
    pub fn from_value(value: i32) -> Self {
        match value {
            i32::MIN..=-1 => Self::Smaller,
            0 => Self::Nearest,
            _ => Self::Greater,
        }
    }
}

decl_enum! {
    /// Defines the sample format of a stream.
    ///
    /// Identifiers and names are the ones used by ALSA.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pcm_device::Format;
    ///
    /// assert_eq!(Format::from_value(14), Some(Format::FloatLE));
    /// assert_eq!(Format::FloatLE.name(), "FLOAT_LE");
    /// assert_eq!(Format::S32LE.to_string(), "S32_LE");
    /// assert_eq!(Format::from_value(29), None);
    /// ```
    #[repr(i32)]
    pub enum Format {
        S8 = 0 => "S8",
        U8 = 1 => "U8",
        S16LE = 2 => "S16_LE",
        S16BE = 3 => "S16_BE",
        U16LE = 4 => "U16_LE",
        U16BE = 5 => "U16_BE",
        S24LE = 6 => "S24_LE",
        S24BE = 7 => "S24_BE",
        U24LE = 8 => "U24_LE",
        U24BE = 9 => "U24_BE",
        S32LE = 10 => "S32_LE",
        S32BE = 11 => "S32_BE",
        U32LE = 12 => "U32_LE",
        U32BE = 13 => "U32_BE",
        FloatLE = 14 => "FLOAT_LE",
        FloatBE = 15 => "FLOAT_BE",
        Float64LE = 16 => "FLOAT64_LE",
        Float64BE = 17 => "FLOAT64_BE",
        IEC958SubframeLE = 18 => "IEC958_SUBFRAME_LE",
        IEC958SubframeBE = 19 => "IEC958_SUBFRAME_BE",
        MuLaw = 20 => "MU_LAW",
        ALaw = 21 => "A_LAW",
        ImaAdPCM = 22 => "IMA_ADPCM",
        MPEG = 23 => "MPEG",
        GSM = 24 => "GSM",
        S20LE = 25 => "S20_LE",
        S20BE = 26 => "S20_BE",
        U20LE = 27 => "U20_LE",
        U20BE = 28 => "U20_BE",
        Special = 31 => "SPECIAL",
        S243LE = 32 => "S24_3LE",
        S243BE = 33 => "S24_3BE",
        U243LE = 34 => "U24_3LE",
        U243BE = 35 => "U24_3BE",
        S203LE = 36 => "S20_3LE",
        S203BE = 37 => "S20_3BE",
        U203LE = 38 => "U20_3LE",
        U203BE = 39 => "U20_3BE",
        S183LE = 40 => "S18_3LE",
        S183BE = 41 => "S18_3BE",
        U183LE = 42 => "U18_3LE",
        U183BE = 43 => "U18_3BE",
        G72324 = 44 => "G723_24",
        G723241B = 45 => "G723_24_1B",
        G72340 = 46 => "G723_40",
        G723401B = 47 => "G723_40_1B",
        DSDU8 = 48 => "DSD_U8",
        DSDU16LE = 49 => "DSD_U16_LE",
        DSDU32LE = 50 => "DSD_U32_LE",
        DSDU16BE = 51 => "DSD_U16_BE",
        DSDU32BE = 52 => "DSD_U32_BE",
    }
}

decl_enum! {
    /// Defines the direction of a stream.
    ///
    /// See [Pcm::open][crate::Pcm::open].
    #[repr(u32)]
    pub enum Stream {
        /// A playback stream. Corresponds to `SND_PCM_STREAM_PLAYBACK`.
        Playback = 0 => "PLAYBACK",
        /// A capture stream. Corresponds to `SND_PCM_STREAM_CAPTURE`.
        Capture = 1 => "CAPTURE",
    }
}

decl_enum! {
    /// Defines how the underlying device is accessed.
    #[repr(u32)]
    pub enum Access {
        /// MMAP access with simple interleaved channels
        MmapInterleaved = 0 => "MMAP_INTERLEAVED",
        /// MMAP access with simple non interleaved channels
        MmapNoninterleaved = 1 => "MMAP_NONINTERLEAVED",
        /// MMAP access with complex placement
        MmapComplex = 2 => "MMAP_COMPLEX",
        /// Interleaved read/write access
        ReadWriteInterleaved = 3 => "RW_INTERLEAVED",
        /// Sequential read/write access
        ReadWriteNoninterleaved = 4 => "RW_NONINTERLEAVED",
    }
}

/// A category of devices which can be enumerated for hints.
///
/// # Examples
///
/// ```rust
/// use pcm_device::Category;
///
/// let category: Category = "rawmidi".parse()?;
/// assert_eq!(category, Category::RawMidi);
/// assert_eq!(category.to_string(), "rawmidi");
/// assert!("midi".parse::<Category>().is_err());
/// # Ok::<_, pcm_device::ParseCategoryError>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Category {
    /// PCM devices.
    Pcm,
    /// Control devices.
    Ctl,
    /// Raw MIDI devices.
    RawMidi,
    /// Hardware dependent devices.
    Hwdep,
    /// Sequencer devices.
    Seq,
    /// Timer devices.
    Timer,
}

impl Category {
    /// Every category, in the order they are enumerated.
    pub const ALL: &'static [Self] = &[
        Self::Pcm,
        Self::Ctl,
        Self::RawMidi,
        Self::Hwdep,
        Self::Seq,
        Self::Timer,
    ];

    /// The interface name the native subsystem uses for the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pcm => "pcm",
            Self::Ctl => "ctl",
            Self::RawMidi => "rawmidi",
            Self::Hwdep => "hwdep",
            Self::Seq => "seq",
            Self::Timer => "timer",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown [Category].
#[derive(Debug, thiserror::Error)]
#[error("unknown device category `{0}`")]
pub struct ParseCategoryError(Box<str>);

impl str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.into()))
    }
}

/// A field of a device hint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HintField {
    /// The device name, usable to open the device.
    Name,
    /// A human readable description.
    Description,
    /// The I/O direction the device supports.
    IoDirection,
}

impl HintField {
    /// The field identifier the native subsystem uses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "NAME",
            Self::Description => "DESC",
            Self::IoDirection => "IOID",
        }
    }
}

/// The I/O direction a device hint is restricted to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IoDirection {
    /// The device only supports input.
    Input,
    /// The device only supports output.
    Output,
}

impl IoDirection {
    /// Parse the direction from the value of a hint field.
    pub fn from_hint(value: &str) -> Option<Self> {
        match value {
            "Input" => Some(Self::Input),
            "Output" => Some(Self::Output),
            _ => None,
        }
    }
}

impl fmt::Display for IoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("Input"),
            Self::Output => f.write_str("Output"),
        }
    }
}
