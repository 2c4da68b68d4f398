//! A platform agnostic sampling driver for the XPT2046 resistive touch
//! controller, built on the [`embedded-hal`](https://docs.rs/embedded-hal)
//! blocking SPI `Transfer` trait.
//!
//! Each [`read`](TouchSensor::read) exchanges one fixed frame with the
//! chip, rejects the outlier among three samples per axis and maps the
//! result onto the configured display resolution.

#![cfg_attr(not(test), no_std)]

mod callback;
pub mod command;
mod config;
mod error;
pub mod filter;
mod point;

pub use callback::Callback;
pub use command::Frame;
pub use config::Config;
pub use error::Error;
pub use point::Point;

use embedded_hal::blocking::spi::Transfer;
use log::{debug, trace, warn};

/// Largest value a pressure tap can report.
const MAX_SAMPLE: i16 = 0xFFF;

/// Resolution of a sensor that has not been configured.
const NO_DIMENSION: i16 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Ready,
}

#[derive(Debug)]
pub struct TouchSensor<SPI> {
    transport: Option<SPI>,
    width: i16,
    height: i16,
    config: Config,
    state: Lifecycle,
}

impl<SPI> TouchSensor<SPI> {
    /// Returns an uninitialized sensor with no transport, no resolution
    /// and the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Returns an uninitialized sensor using `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            transport: None,
            width: NO_DIMENSION,
            height: NO_DIMENSION,
            config,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Clears the transport, the resolution and the initialized state.
    /// The configuration is kept.
    ///
    /// Returns the transport that was attached, if any.
    pub fn reset(&mut self) -> Option<SPI> {
        if self.state == Lifecycle::Ready {
            debug!("touch sensor reset");
        }

        self.width = NO_DIMENSION;
        self.height = NO_DIMENSION;
        self.state = Lifecycle::Uninitialized;
        self.transport.take()
    }

    /// Attaches the transport used for every exchange with the chip,
    /// returning the one it replaces.
    pub fn attach(&mut self, transport: SPI) -> Option<SPI> {
        self.transport.replace(transport)
    }

    /// Returns the calibration constants in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns `(width, height)` in pixels.
    pub fn resolution(&self) -> (i16, i16) {
        (self.width, self.height)
    }

    /// Returns `true` once [`init`](TouchSensor::init) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state == Lifecycle::Ready
    }

    /// Destroys the sensor and returns the transport.
    pub fn free(self) -> Option<SPI> {
        self.transport
    }
}

impl<SPI> Default for TouchSensor<SPI> {
    fn default() -> Self {
        Self::new()
    }
}

impl<SPI, E> TouchSensor<SPI>
where
    SPI: Transfer<u8, Error = E>,
{
    /// Sets the display resolution in pixels. The resolution is fixed
    /// once the sensor is initialized.
    pub fn set_resolution(&mut self, width: i16, height: i16) -> Result<(), Error<E>> {
        if self.state == Lifecycle::Ready {
            return Err(Error::AlreadyInitialized);
        }

        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Replaces the calibration constants. Takes effect on the next
    /// [`read`](TouchSensor::read).
    ///
    /// Gains that are not finite and positive are rejected and the
    /// current constants are kept.
    pub fn set_config(&mut self, config: Config) -> Result<(), Error<E>> {
        if !config.is_valid() {
            return Err(Error::InvalidConfiguration);
        }

        self.config = config;
        Ok(())
    }

    /// Validates the setup and checks that the chip answers a pressure
    /// probe with two different readings.
    ///
    /// Nothing is sent to the chip unless the sensor is uninitialized,
    /// has a transport, a positive resolution and valid gains.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpt2046_sampler::{command, TouchSensor};
    /// # use embedded_hal_mock::spi::{Mock, Transaction};
    /// #
    /// # let expectations = [Transaction::transfer(
    /// #     command::PROBE.to_vec(),
    /// #     vec![0x00, 0x10, 0x00, 0x60, 0x00],
    /// # )];
    /// # let spi = Mock::new(&expectations);
    ///
    /// let mut sensor = TouchSensor::new();
    /// sensor.attach(spi);
    /// sensor.set_resolution(240, 320).unwrap();
    ///
    /// assert_eq!(sensor.init(), Ok(()));
    /// assert!(sensor.is_initialized());
    /// ```
    pub fn init(&mut self) -> Result<(), Error<E>> {
        if self.state == Lifecycle::Ready {
            return Err(Error::AlreadyInitialized);
        }
        if self.transport.is_none() {
            return Err(Error::MissingDependency);
        }
        if self.width <= 0 || self.height <= 0 || !self.config.is_valid() {
            return Err(Error::InvalidConfiguration);
        }

        let mut probe = command::PROBE;
        self.exchange(&mut probe)?;

        let (z1, z2) = command::decode_probe(&probe);
        debug!("touch handshake: z1={} z2={}", z1, z2);

        if z1 == z2 {
            warn!("touch controller returned identical pressure readings ({})", z1);
            return Err(Error::HandshakeFailure);
        }

        self.state = Lifecycle::Ready;
        debug!("touch sensor ready ({}x{})", self.width, self.height);
        Ok(())
    }

    /// Reads the panel. Returns [`Point::NONE`] if nothing touches it.
    ///
    /// # Examples
    ///
    /// ```
    /// use xpt2046_sampler::{command, Point, TouchSensor};
    /// # use embedded_hal_mock::spi::{Mock, Transaction};
    /// #
    /// # let expectations = [
    /// #     Transaction::transfer(command::PROBE.to_vec(), vec![0x00, 0x10, 0x00, 0x60, 0x00]),
    /// #     Transaction::transfer(
    /// #         command::FRAME.to_vec(),
    /// #         vec![
    /// #             0x00, 0x10, 0x00, 0x30, 0x00, 0x20, 0x00, 0x40, 0x00, 0x20, 0x00, 0x40,
    /// #             0x00, 0x20, 0x00, 0x40, 0x00,
    /// #         ],
    /// #     ),
    /// # ];
    /// # let spi = Mock::new(&expectations);
    ///
    /// let mut sensor = TouchSensor::new();
    /// sensor.attach(spi);
    /// sensor.set_resolution(240, 320).unwrap();
    /// sensor.init().unwrap();
    ///
    /// assert_eq!(sensor.read(), Ok(Point { x: 120, y: 68, z: 3071 }));
    /// ```
    pub fn read(&mut self) -> Result<Point, Error<E>> {
        let frame = self.read_raw()?;

        Ok(self.condition(&frame))
    }

    /// Exchanges one acquisition frame and returns the decoded samples
    /// without filtering or scaling.
    pub fn read_raw(&mut self) -> Result<Frame, Error<E>> {
        if self.state != Lifecycle::Ready {
            return Err(Error::NotInitialized);
        }

        let mut frame = command::FRAME;
        self.exchange(&mut frame)?;

        Ok(Frame::decode(&frame))
    }

    fn condition(&self, frame: &Frame) -> Point {
        let delta = frame.pressure_delta();
        if delta >= self.config.pressure_threshold {
            return Point::NONE;
        }

        let [x1, x2, x3] = frame.x;
        let [y1, y2, y3] = frame.y;
        let x = filter::best_pair_average(x1, x2, x3);
        let y = filter::best_pair_average(y1, y2, y3);

        Point {
            x: filter::to_pixel(filter::scale_coord(x.into(), self.config.x_gain), self.width),
            y: filter::to_pixel(filter::scale_coord(y.into(), self.config.y_gain), self.height),
            z: MAX_SAMPLE - delta,
        }
    }

    fn exchange(&mut self, buffer: &mut [u8]) -> Result<(), Error<E>> {
        let transport = self.transport.as_mut().ok_or(Error::MissingDependency)?;

        trace!("touch tx {:02x?}", buffer);
        transport.transfer(buffer).map_err(Error::Communication)?;
        trace!("touch rx {:02x?}", buffer);

        Ok(())
    }
}
