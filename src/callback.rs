use core::{fmt, marker::PhantomData};
use embedded_hal::blocking::spi::Transfer;

/// Turns a plain function and a context value into a transport.
///
/// `function` receives the context and a buffer holding the outgoing
/// bytes. It must overwrite the buffer with the bytes received during
/// the same exchange. The context is handed to every call unchanged.
///
/// # Examples
///
/// ```
/// use embedded_hal::blocking::spi::Transfer;
/// use xpt2046_sampler::Callback;
///
/// let mut loopback = Callback::new(
///     |calls: &mut u32, _buffer: &mut [u8]| -> Result<(), ()> {
///         *calls += 1;
///         Ok(())
///     },
///     0,
/// );
///
/// assert_eq!(loopback.transfer(&mut [0xB1, 0x00]), Ok(&[0xB1, 0x00][..]));
/// assert_eq!(loopback.free(), 1);
/// ```
pub struct Callback<F, C, E> {
    function: F,
    context: C,
    _error: PhantomData<fn() -> E>,
}

impl<F, C, E> Callback<F, C, E>
where
    F: FnMut(&mut C, &mut [u8]) -> Result<(), E>,
{
    pub fn new(function: F, context: C) -> Self {
        Self {
            function,
            context,
            _error: PhantomData,
        }
    }
}

impl<F, C, E> Callback<F, C, E> {
    /// Returns the context passed to every call.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Destroys the adapter and returns the context.
    pub fn free(self) -> C {
        self.context
    }
}

impl<F, C, E> Transfer<u8> for Callback<F, C, E>
where
    F: FnMut(&mut C, &mut [u8]) -> Result<(), E>,
{
    type Error = E;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], E> {
        (self.function)(&mut self.context, words)?;
        Ok(words)
    }
}

impl<F, C: fmt::Debug, E> fmt::Debug for Callback<F, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
