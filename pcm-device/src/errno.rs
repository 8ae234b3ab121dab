use std::error;
use std::fmt;
use std::io;

/// A native error number as reported by the audio subsystem.
///
/// The display implementation renders the system reason for the code.
///
/// # Examples
///
/// ```rust
/// use pcm_device::Errno;
///
/// let errno = Errno::new(22);
/// assert_eq!(errno, Errno::EINVAL);
/// assert_eq!(errno.get(), 22);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Errno(i32);

impl Errno {
    /// No such file or directory.
    pub const ENOENT: Self = Self(libc::ENOENT);
    /// I/O error.
    pub const EIO: Self = Self(libc::EIO);
    /// Device or resource busy.
    pub const EBUSY: Self = Self(libc::EBUSY);
    /// Invalid argument.
    pub const EINVAL: Self = Self(libc::EINVAL);

    /// Construct an error number from its positive value.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the positive value of the error number.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&io::Error::from_raw_os_error(self.0), f)
    }
}

impl error::Error for Errno {}
