use crate::{Backend, Error, HardwareParameters, Result, Stream};

/// An opened PCM device.
///
/// The device is exclusively owned and is closed exactly once when the value
/// is dropped, see [Pcm::close].
pub struct Pcm<'a, B>
where
    B: ?Sized + Backend,
{
    pub(crate) backend: &'a B,
    pub(crate) handle: B::Pcm,
    name: Box<str>,
}

impl<'a, B> Pcm<'a, B>
where
    B: ?Sized + Backend,
{
    /// Open the given pcm device identified by name.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # #[cfg(feature = "alsa")]
    /// # fn main() -> anyhow::Result<()> {
    /// use pcm_device::{alsa, Pcm, Stream};
    ///
    /// let pcm = Pcm::open(&alsa::Alsa, "hw:0,0", Stream::Playback)?;
    /// assert_eq!(pcm.name(), "hw:0,0");
    /// # Ok(()) }
    /// # #[cfg(not(feature = "alsa"))]
    /// # fn main() {}
    /// ```
    pub fn open(backend: &'a B, name: &str, stream: Stream) -> Result<Self> {
        let handle = backend.open(name, stream).map_err(|source| Error::Open {
            device: name.into(),
            source,
        })?;

        tracing::debug!("opened device {} for {}", name, stream);

        Ok(Self {
            backend,
            handle,
            name: name.into(),
        })
    }

    /// The name the device was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the backend this device was opened through.
    pub fn backend(&self) -> &'a B {
        self.backend
    }

    /// Access the underlying native handle.
    pub fn as_raw(&self) -> &B::Pcm {
        &self.handle
    }

    /// Allocate a hardware parameter set holding the full capability range of
    /// the device.
    ///
    /// The parameter set borrows the device, so it can't outlive it.
    pub fn hardware_parameters_any(&mut self) -> Result<HardwareParameters<'_, 'a, B>> {
        HardwareParameters::any(self)
    }

    /// Transition the device to the prepared state, ready for I/O.
    pub fn prepare(&mut self) -> Result<()> {
        self.backend
            .prepare(&mut self.handle)
            .map_err(Error::Prepare)?;
        tracing::debug!("prepared device {}", self.name);
        Ok(())
    }

    /// Close the device.
    ///
    /// This is the same as dropping it.
    pub fn close(self) {}
}

impl<B> Drop for Pcm<'_, B>
where
    B: ?Sized + Backend,
{
    fn drop(&mut self) {
        self.backend.close(&mut self.handle);
        tracing::debug!("closed device {}", self.name);
    }
}
