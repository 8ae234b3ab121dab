//! The ALSA implementation of [Backend].
// Documentation: https://www.alsa-project.org/alsa-doc/alsa-lib/

use crate::{Access, Backend, Category, Direction, Errno, Format, HintField, Stream};
use alsa_sys as alsa;
use libc as c;
use std::ffi::CStr;
use std::mem;
use std::ops;
use std::ptr;

/// A string allocated through libc.
#[repr(transparent)]
struct CString {
    ptr: ptr::NonNull<c::c_char>,
}

impl CString {
    /// Construct a new string that was allocated through libc.
    ///
    /// This differs from [std::ffi::CString] in that it requires the underlying
    /// string to have been allocated using libc allocators, and will free the
    /// underlying string using those as well.
    unsafe fn from_raw(ptr: *mut c::c_char) -> Option<Self> {
        Some(Self {
            ptr: ptr::NonNull::new(ptr)?,
        })
    }
}

impl Drop for CString {
    fn drop(&mut self) {
        unsafe {
            c::free(self.ptr.as_ptr() as *mut _);
        }
    }
}

impl ops::Deref for CString {
    type Target = CStr;

    fn deref(&self) -> &Self::Target {
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }
}

/// The ALSA audio subsystem.
///
/// # Examples
///
/// ```rust,no_run
/// use pcm_device::alsa;
///
/// # fn main() -> anyhow::Result<()> {
/// let report = pcm_device::probe(&alsa::Alsa, "default")?;
/// println!("{}", report);
/// # Ok(()) }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Alsa;

/// An opened ALSA PCM handle.
///
/// See [Pcm][crate::Pcm].
pub struct PcmHandle {
    handle: ptr::NonNull<alsa::snd_pcm_t>,
}

/// An ALSA hardware parameter set.
///
/// See [HardwareParameters][crate::HardwareParameters].
pub struct HardwareParametersHandle {
    handle: ptr::NonNull<alsa::snd_pcm_hw_params_t>,
}

/// A null-terminated batch of ALSA device hints.
///
/// See [Hints][crate::Hints].
pub struct HintsHandle {
    hints: *mut *mut std::ffi::c_void,
    len: usize,
}

impl Backend for Alsa {
    type Pcm = PcmHandle;
    type HardwareParameters = HardwareParametersHandle;
    type Hints = HintsHandle;

    fn open(&self, name: &str, stream: Stream) -> Result<Self::Pcm, Errno> {
        let name = std::ffi::CString::new(name).map_err(|_| Errno::EINVAL)?;

        unsafe {
            let mut handle = mem::MaybeUninit::uninit();

            errno!(alsa::snd_pcm_open(
                handle.as_mut_ptr(),
                name.as_ptr(),
                stream as c::c_uint,
                0
            ))?;

            Ok(PcmHandle {
                handle: ptr::NonNull::new_unchecked(handle.assume_init()),
            })
        }
    }

    fn close(&self, pcm: &mut Self::Pcm) {
        unsafe {
            let _ = alsa::snd_pcm_close(pcm.handle.as_ptr());
        }
    }

    fn hw_params_malloc(&self) -> Result<Self::HardwareParameters, Errno> {
        unsafe {
            let mut handle = mem::MaybeUninit::uninit();
            errno!(alsa::snd_pcm_hw_params_malloc(handle.as_mut_ptr()))?;

            Ok(HardwareParametersHandle {
                handle: ptr::NonNull::new_unchecked(handle.assume_init()),
            })
        }
    }

    fn hw_params_free(&self, hw: &mut Self::HardwareParameters) {
        unsafe {
            alsa::snd_pcm_hw_params_free(hw.handle.as_ptr());
        }
    }

    fn hw_params_any(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
    ) -> Result<(), Errno> {
        unsafe {
            errno!(alsa::snd_pcm_hw_params_any(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr()
            ))?;
            Ok(())
        }
    }

    fn test_format(
        &self,
        pcm: &Self::Pcm,
        hw: &Self::HardwareParameters,
        format: Format,
    ) -> bool {
        unsafe {
            let result = alsa::snd_pcm_hw_params_test_format(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr(),
                format as c::c_int,
            );

            result == 0
        }
    }

    fn channels_min(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno> {
        unsafe {
            let mut channels = mem::MaybeUninit::uninit();

            errno!(alsa::snd_pcm_hw_params_get_channels_min(
                hw.handle.as_ptr(),
                channels.as_mut_ptr()
            ))?;

            Ok(channels.assume_init())
        }
    }

    fn channels_max(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno> {
        unsafe {
            let mut channels = mem::MaybeUninit::uninit();

            errno!(alsa::snd_pcm_hw_params_get_channels_max(
                hw.handle.as_ptr(),
                channels.as_mut_ptr()
            ))?;

            Ok(channels.assume_init())
        }
    }

    fn rate_min(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno> {
        unsafe {
            let mut rate = mem::MaybeUninit::uninit();
            let mut dir = 0;

            errno!(alsa::snd_pcm_hw_params_get_rate_min(
                hw.handle.as_ptr(),
                rate.as_mut_ptr(),
                &mut dir
            ))?;

            Ok(rate.assume_init())
        }
    }

    fn rate_max(&self, hw: &Self::HardwareParameters) -> Result<u32, Errno> {
        unsafe {
            let mut rate = mem::MaybeUninit::uninit();
            let mut dir = 0;

            errno!(alsa::snd_pcm_hw_params_get_rate_max(
                hw.handle.as_ptr(),
                rate.as_mut_ptr(),
                &mut dir
            ))?;

            Ok(rate.assume_init())
        }
    }

    fn period_size_min(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno> {
        unsafe {
            let mut frames = mem::MaybeUninit::uninit();
            let mut dir = 0;

            errno!(alsa::snd_pcm_hw_params_get_period_size_min(
                hw.handle.as_ptr(),
                frames.as_mut_ptr(),
                &mut dir
            ))?;

            Ok(frames.assume_init() as u64)
        }
    }

    fn period_size_max(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno> {
        unsafe {
            let mut frames = mem::MaybeUninit::uninit();
            let mut dir = 0;

            errno!(alsa::snd_pcm_hw_params_get_period_size_max(
                hw.handle.as_ptr(),
                frames.as_mut_ptr(),
                &mut dir
            ))?;

            Ok(frames.assume_init() as u64)
        }
    }

    fn buffer_size_min(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno> {
        unsafe {
            let mut buffer_size = mem::MaybeUninit::uninit();

            errno!(alsa::snd_pcm_hw_params_get_buffer_size_min(
                hw.handle.as_ptr(),
                buffer_size.as_mut_ptr()
            ))?;

            Ok(buffer_size.assume_init() as u64)
        }
    }

    fn buffer_size_max(&self, hw: &Self::HardwareParameters) -> Result<u64, Errno> {
        unsafe {
            let mut buffer_size = mem::MaybeUninit::uninit();

            errno!(alsa::snd_pcm_hw_params_get_buffer_size_max(
                hw.handle.as_ptr(),
                buffer_size.as_mut_ptr()
            ))?;

            Ok(buffer_size.assume_init() as u64)
        }
    }

    fn set_channels(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        channels: u32,
    ) -> Result<(), Errno> {
        unsafe {
            errno!(alsa::snd_pcm_hw_params_set_channels(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr(),
                channels
            ))?;

            Ok(())
        }
    }

    fn set_access(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        access: Access,
    ) -> Result<(), Errno> {
        unsafe {
            errno!(alsa::snd_pcm_hw_params_set_access(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr(),
                access as c::c_uint
            ))?;

            Ok(())
        }
    }

    fn set_rate_near(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        mut rate: u32,
    ) -> Result<(u32, Direction), Errno> {
        unsafe {
            let mut dir = Direction::Nearest as c::c_int;

            errno!(alsa::snd_pcm_hw_params_set_rate_near(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr(),
                &mut rate,
                &mut dir,
            ))?;

            Ok((rate, Direction::from_value(dir)))
        }
    }

    fn set_format(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        format: Format,
    ) -> Result<(), Errno> {
        unsafe {
            errno!(alsa::snd_pcm_hw_params_set_format(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr(),
                format as c::c_int
            ))?;

            Ok(())
        }
    }

    fn set_period_size_near(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        frames: u64,
    ) -> Result<(u64, Direction), Errno> {
        unsafe {
            let mut frames = c::c_ulong::try_from(frames).map_err(|_| Errno::EINVAL)?;
            let mut dir = Direction::Nearest as c::c_int;

            errno!(alsa::snd_pcm_hw_params_set_period_size_near(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr(),
                &mut frames,
                &mut dir,
            ))?;

            Ok((frames as u64, Direction::from_value(dir)))
        }
    }

    fn set_periods_near(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
        mut periods: u32,
    ) -> Result<(u32, Direction), Errno> {
        unsafe {
            let mut dir = Direction::Nearest as c::c_int;

            errno!(alsa::snd_pcm_hw_params_set_periods_near(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr(),
                &mut periods,
                &mut dir,
            ))?;

            Ok((periods, Direction::from_value(dir)))
        }
    }

    fn hw_params(
        &self,
        pcm: &mut Self::Pcm,
        hw: &mut Self::HardwareParameters,
    ) -> Result<(), Errno> {
        unsafe {
            errno!(alsa::snd_pcm_hw_params(
                pcm.handle.as_ptr(),
                hw.handle.as_ptr()
            ))?;

            Ok(())
        }
    }

    fn prepare(&self, pcm: &mut Self::Pcm) -> Result<(), Errno> {
        unsafe {
            errno!(alsa::snd_pcm_prepare(pcm.handle.as_ptr()))?;
            Ok(())
        }
    }

    fn name_hint(&self, category: Category) -> Result<Self::Hints, Errno> {
        unsafe {
            let mut hints = mem::MaybeUninit::uninit();

            // -1 enumerates every card.
            errno!(alsa::snd_device_name_hint(
                -1,
                interface(category).as_ptr(),
                hints.as_mut_ptr()
            ))?;

            let hints = hints.assume_init();
            let mut len = 0;

            while !(*hints.add(len)).is_null() {
                len += 1;
            }

            Ok(HintsHandle { hints, len })
        }
    }

    fn hints_len(&self, hints: &Self::Hints) -> usize {
        hints.len
    }

    fn hint_field(&self, hints: &Self::Hints, index: usize, field: HintField) -> Option<String> {
        if index >= hints.len {
            return None;
        }

        unsafe {
            let hint = *hints.hints.add(index);
            let value = alsa::snd_device_name_get_hint(hint, hint_id(field).as_ptr());
            let value = CString::from_raw(value)?;
            Some(value.to_string_lossy().into_owned())
        }
    }

    fn free_hints(&self, hints: &mut Self::Hints) {
        unsafe {
            let _ = alsa::snd_device_name_free_hint(hints.hints);
        }
    }
}

fn interface(category: Category) -> &'static CStr {
    let bytes: &'static [u8] = match category {
        Category::Pcm => b"pcm\0",
        Category::Ctl => b"ctl\0",
        Category::RawMidi => b"rawmidi\0",
        Category::Hwdep => b"hwdep\0",
        Category::Seq => b"seq\0",
        Category::Timer => b"timer\0",
    };

    unsafe { CStr::from_bytes_with_nul_unchecked(bytes) }
}

fn hint_id(field: HintField) -> &'static CStr {
    let bytes: &'static [u8] = match field {
        HintField::Name => b"NAME\0",
        HintField::Description => b"DESC\0",
        HintField::IoDirection => b"IOID\0",
    };

    unsafe { CStr::from_bytes_with_nul_unchecked(bytes) }
}

#[cfg(test)]
mod tests {
    use super::{alsa, hint_id, interface};
    use crate::{Access, Category, Format, HintField, Stream};

    const FORMATS: &[(Format, i32)] = &[
        (Format::S8, alsa::SND_PCM_FORMAT_S8),
        (Format::U8, alsa::SND_PCM_FORMAT_U8),
        (Format::S16LE, alsa::SND_PCM_FORMAT_S16_LE),
        (Format::S16BE, alsa::SND_PCM_FORMAT_S16_BE),
        (Format::U16LE, alsa::SND_PCM_FORMAT_U16_LE),
        (Format::U16BE, alsa::SND_PCM_FORMAT_U16_BE),
        (Format::S24LE, alsa::SND_PCM_FORMAT_S24_LE),
        (Format::S24BE, alsa::SND_PCM_FORMAT_S24_BE),
        (Format::U24LE, alsa::SND_PCM_FORMAT_U24_LE),
        (Format::U24BE, alsa::SND_PCM_FORMAT_U24_BE),
        (Format::S32LE, alsa::SND_PCM_FORMAT_S32_LE),
        (Format::S32BE, alsa::SND_PCM_FORMAT_S32_BE),
        (Format::U32LE, alsa::SND_PCM_FORMAT_U32_LE),
        (Format::U32BE, alsa::SND_PCM_FORMAT_U32_BE),
        (Format::FloatLE, alsa::SND_PCM_FORMAT_FLOAT_LE),
        (Format::FloatBE, alsa::SND_PCM_FORMAT_FLOAT_BE),
        (Format::Float64LE, alsa::SND_PCM_FORMAT_FLOAT64_LE),
        (Format::Float64BE, alsa::SND_PCM_FORMAT_FLOAT64_BE),
        (Format::IEC958SubframeLE, alsa::SND_PCM_FORMAT_IEC958_SUBFRAME_LE),
        (Format::IEC958SubframeBE, alsa::SND_PCM_FORMAT_IEC958_SUBFRAME_BE),
        (Format::MuLaw, alsa::SND_PCM_FORMAT_MU_LAW),
        (Format::ALaw, alsa::SND_PCM_FORMAT_A_LAW),
        (Format::ImaAdPCM, alsa::SND_PCM_FORMAT_IMA_ADPCM),
        (Format::MPEG, alsa::SND_PCM_FORMAT_MPEG),
        (Format::GSM, alsa::SND_PCM_FORMAT_GSM),
        (Format::S20LE, alsa::SND_PCM_FORMAT_S20_LE),
        (Format::S20BE, alsa::SND_PCM_FORMAT_S20_BE),
        (Format::U20LE, alsa::SND_PCM_FORMAT_U20_LE),
        (Format::U20BE, alsa::SND_PCM_FORMAT_U20_BE),
        (Format::Special, alsa::SND_PCM_FORMAT_SPECIAL),
        (Format::S243LE, alsa::SND_PCM_FORMAT_S24_3LE),
        (Format::S243BE, alsa::SND_PCM_FORMAT_S24_3BE),
        (Format::U243LE, alsa::SND_PCM_FORMAT_U24_3LE),
        (Format::U243BE, alsa::SND_PCM_FORMAT_U24_3BE),
        (Format::S203LE, alsa::SND_PCM_FORMAT_S20_3LE),
        (Format::S203BE, alsa::SND_PCM_FORMAT_S20_3BE),
        (Format::U203LE, alsa::SND_PCM_FORMAT_U20_3LE),
        (Format::U203BE, alsa::SND_PCM_FORMAT_U20_3BE),
        (Format::S183LE, alsa::SND_PCM_FORMAT_S18_3LE),
        (Format::S183BE, alsa::SND_PCM_FORMAT_S18_3BE),
        (Format::U183LE, alsa::SND_PCM_FORMAT_U18_3LE),
        (Format::U183BE, alsa::SND_PCM_FORMAT_U18_3BE),
        (Format::G72324, alsa::SND_PCM_FORMAT_G723_24),
        (Format::G723241B, alsa::SND_PCM_FORMAT_G723_24_1B),
        (Format::G72340, alsa::SND_PCM_FORMAT_G723_40),
        (Format::G723401B, alsa::SND_PCM_FORMAT_G723_40_1B),
        (Format::DSDU8, alsa::SND_PCM_FORMAT_DSD_U8),
        (Format::DSDU16LE, alsa::SND_PCM_FORMAT_DSD_U16_LE),
        (Format::DSDU32LE, alsa::SND_PCM_FORMAT_DSD_U32_LE),
        (Format::DSDU16BE, alsa::SND_PCM_FORMAT_DSD_U16_BE),
        (Format::DSDU32BE, alsa::SND_PCM_FORMAT_DSD_U32_BE),
    ];

    #[test]
    fn test_format_identifiers() {
        assert_eq!(FORMATS.len(), Format::ALL.len());

        for (&(format, id), &known) in FORMATS.iter().zip(Format::ALL) {
            assert_eq!(format, known);
            assert_eq!(format.value(), id, "{}", format);
            assert_eq!(Format::from_value(id), Some(format));
        }
    }

    #[test]
    fn test_access_and_stream_identifiers() {
        assert_eq!(
            Access::ReadWriteNoninterleaved.value(),
            alsa::SND_PCM_ACCESS_RW_NONINTERLEAVED
        );
        assert_eq!(
            Access::ReadWriteInterleaved.value(),
            alsa::SND_PCM_ACCESS_RW_INTERLEAVED
        );
        assert_eq!(Stream::Playback.value(), alsa::SND_PCM_STREAM_PLAYBACK);
        assert_eq!(Stream::Capture.value(), alsa::SND_PCM_STREAM_CAPTURE);
    }

    #[test]
    fn test_native_names() {
        for &category in Category::ALL {
            assert_eq!(interface(category).to_str().unwrap(), category.as_str());
        }

        for &field in &[HintField::Name, HintField::Description, HintField::IoDirection] {
            assert_eq!(hint_id(field).to_str().unwrap(), field.as_str());
        }
    }
}
