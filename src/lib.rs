#![cfg_attr(not(test), no_std)]

//! This is an `embedded-hal` crate for the [CC1101](https://www.ti.com/product/CC1101) sub-GHz transceiver.
//!
//! The driver owns the SPI bus, the chip select line and the SO pin sampled as a GPIO, which the chip
//! holds high until it is ready for a transfer. Configuration is done in physical units and the driver
//! packs the register fields itself.
//!
//! # Not yet implemented
//! * Packet TX/RX through the FIFOs
//! * GDOx interrupt configuration
mod api;
mod convert;
mod error;
#[cfg(test)]
mod mock;
mod registers;
mod settings;
mod spi;

pub use api::Config;
pub use convert::{
    exp_mant, frequency_word, in_ism_band, rx_bandwidth_setting, ExpMant, CRYSTAL_FREQ_MHZ,
};
pub use error::Error;
pub use registers::{Register, Status, Strobe};
pub use settings::{
    pa_value, ChipStatus, FrequencyBand, Modulation, OutputPower, PacketLengthMode, Preamble,
    State, SyncMode, PA_TABLE,
};

/// Largest packet the FIFO-based packet handler accepts
pub const MAX_PACKET_LENGTH: u8 = 255;

pub struct Cc1101<SPI, CS, RDY> {
    spi: SPI,
    cs: CS,
    ready: RDY,
    modulation: Modulation,
    frequency: f32,
    power: OutputPower,
    bit_rate: f32,
    packet_length: u8,
    packet_length_mode: PacketLengthMode,
}

impl<SPI, CS, RDY> Cc1101<SPI, CS, RDY> {
    /// Wraps the bus, chip select and ready line. Nothing is sent to the chip until
    /// `configure` or one of the setters is called.
    pub fn new(spi: SPI, cs: CS, ready: RDY) -> Self {
        Cc1101 {
            spi,
            cs,
            ready,
            modulation: Modulation::Fsk2,
            frequency: 0.0,
            power: OutputPower::Zero,
            bit_rate: 0.0,
            packet_length: MAX_PACKET_LENGTH,
            packet_length_mode: PacketLengthMode::Variable,
        }
    }

    /// Gives back the peripherals
    pub fn release(self) -> (SPI, CS, RDY) {
        (self.spi, self.cs, self.ready)
    }

    /// Last modulation written to the chip
    pub fn modulation(&self) -> Modulation {
        self.modulation
    }

    /// Last carrier frequency written to the chip, in MHz
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Last output power written to the PA table
    pub fn output_power(&self) -> OutputPower {
        self.power
    }

    /// Last bit rate written to the chip, in kBaud
    pub fn bit_rate(&self) -> f32 {
        self.bit_rate
    }

    pub fn packet_length(&self) -> u8 {
        self.packet_length
    }

    pub fn packet_length_mode(&self) -> PacketLengthMode {
        self.packet_length_mode
    }
}
