use crate::error::Error;
use crate::registers::{Field, Register, Status, Strobe};
use crate::Cc1101;
use core::mem::ManuallyDrop;
use embedded_hal as hal;
use hal::blocking::delay::DelayUs;
use hal::blocking::spi::{Transfer, Write};
use hal::digital::v2::{InputPin, OutputPin};

const READ_MODE: u8 = 1 << 7;
const BURST_MODE: u8 = 1 << 6;

#[derive(Debug, PartialEq, Clone, Copy)]
enum AccessMode {
    Write,
    Read,
    BurstWrite,
    BurstRead,
}

fn header(addr: u8, mode: AccessMode) -> u8 {
    addr | match mode {
        AccessMode::Write => 0,
        AccessMode::Read => READ_MODE,
        AccessMode::BurstWrite => BURST_MODE,
        AccessMode::BurstRead => READ_MODE | BURST_MODE,
    }
}

/// Mask covering bits `lsb..=msb`, bounds must already be checked
fn field_mask(msb: u8, lsb: u8) -> u8 {
    (((1u16 << (msb - lsb + 1)) - 1) as u8) << lsb
}

/// Holds chip select low until released. Dropping it without `release` deasserts
/// on a best-effort basis, for early returns on an error that is already being reported.
struct Selected<'a, CS: OutputPin> {
    cs: &'a mut CS,
}

impl<'a, CS: OutputPin> Selected<'a, CS> {
    fn new(cs: &'a mut CS) -> Result<Self, CS::Error> {
        cs.set_low()?;
        Ok(Selected { cs })
    }

    fn release(self) -> Result<(), CS::Error> {
        let mut this = ManuallyDrop::new(self);
        this.cs.set_high()
    }
}

impl<CS: OutputPin> Drop for Selected<'_, CS> {
    fn drop(&mut self) {
        let _ = self.cs.set_high();
    }
}

/// The chip pulls SO low once its crystal is running and it can accept a header byte.
/// There is deliberately no timeout.
fn wait_ready<RDY: InputPin>(ready: &RDY) -> Result<(), RDY::Error> {
    while ready.is_high()? {}
    Ok(())
}

impl<SPI, CS, RDY, SpiE, PinE> Cc1101<SPI, CS, RDY>
where
    SPI: Transfer<u8, Error = SpiE> + Write<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
    RDY: InputPin<Error = PinE>,
{
    /// Runs `op` with the chip selected and ready, releasing chip select on every path
    fn transaction<T>(
        &mut self,
        op: impl FnOnce(&mut SPI) -> Result<T, SpiE>,
    ) -> Result<T, Error<SpiE, PinE>> {
        let selected = Selected::new(&mut self.cs).map_err(Error::Pin)?;
        wait_ready(&self.ready).map_err(Error::Pin)?;
        let result = op(&mut self.spi).map_err(Error::Spi)?;
        selected.release().map_err(Error::Pin)?;
        Ok(result)
    }

    /// Manual power-up sequence, for when the power-on reset did not work because the
    /// supply did not ramp as specified
    pub fn reset<D: DelayUs<u32>>(&mut self, delay: &mut D) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("reset()");

        self.cs.set_high().map_err(Error::Pin)?;
        delay.delay_us(5);
        let pulse = Selected::new(&mut self.cs).map_err(Error::Pin)?;
        delay.delay_us(10);
        pulse.release().map_err(Error::Pin)?;
        delay.delay_us(41);

        let selected = Selected::new(&mut self.cs).map_err(Error::Pin)?;
        wait_ready(&self.ready).map_err(Error::Pin)?;
        self.spi
            .transfer(&mut [Strobe::Reset as u8])
            .map_err(Error::Spi)?;
        wait_ready(&self.ready).map_err(Error::Pin)?;
        selected.release().map_err(Error::Pin)
    }

    /// Sends a command strobe, returning the chip status byte
    pub(crate) fn strobe(&mut self, strobe: Strobe) -> Result<u8, Error<SpiE, PinE>> {
        self.transaction(|spi| {
            let mut buf = [strobe as u8];
            spi.transfer(&mut buf)?;
            Ok(buf[0])
        })
    }

    pub fn read_register(&mut self, reg: Register) -> Result<u8, Error<SpiE, PinE>> {
        self.transaction(|spi| {
            let mut buf = [header(reg as u8, AccessMode::Read), 0];
            spi.transfer(&mut buf)?;
            Ok(buf[1])
        })
    }

    /// Status registers only answer in burst read mode
    pub fn read_status(&mut self, reg: Status) -> Result<u8, Error<SpiE, PinE>> {
        self.transaction(|spi| {
            let mut buf = [header(reg as u8, AccessMode::BurstRead), 0];
            spi.transfer(&mut buf)?;
            Ok(buf[1])
        })
    }

    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<SpiE, PinE>> {
        self.transaction(|spi| spi.write(&[header(reg as u8, AccessMode::Write), value]))
    }

    /// Reads `buf.len()` consecutive registers starting at `reg`
    pub fn burst_read_register(
        &mut self,
        reg: Register,
        buf: &mut [u8],
    ) -> Result<(), Error<SpiE, PinE>> {
        self.transaction(|spi| {
            spi.write(&[header(reg as u8, AccessMode::BurstRead)])?;
            buf.iter_mut().for_each(|b| *b = 0);
            spi.transfer(buf)?;
            Ok(())
        })
    }

    /// Writes `values` to consecutive registers starting at `reg`
    pub fn burst_write_register(
        &mut self,
        reg: Register,
        values: &[u8],
    ) -> Result<(), Error<SpiE, PinE>> {
        self.transaction(|spi| {
            spi.write(&[header(reg as u8, AccessMode::BurstWrite)])?;
            spi.write(values)
        })
    }

    /// Replaces bits `lsb..=msb` of `reg` with the same bits of `value`, leaving the
    /// rest of the register untouched. `value` is taken in place, not shifted.
    ///
    /// This is a read followed by a write, so it is not atomic.
    pub fn write_partial_register(
        &mut self,
        reg: Register,
        value: u8,
        msb: u8,
        lsb: u8,
    ) -> Result<(), Error<SpiE, PinE>> {
        if msb > 7 || lsb > 7 || lsb > msb {
            return Err(Error::BitField);
        }
        let mask = field_mask(msb, lsb);
        let current = self.read_register(reg)?;
        self.write_register(reg, (current & !mask) | (value & mask))
    }

    pub(crate) fn write_field(&mut self, field: Field, value: u8) -> Result<(), Error<SpiE, PinE>> {
        self.write_partial_register(field.reg, value, field.msb, field.lsb)
    }
}

// Tests
