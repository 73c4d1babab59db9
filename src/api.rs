use crate::convert::{exp_mant, frequency_word, in_ism_band, rx_bandwidth_setting, ExpMant};
use crate::error::Error;
use crate::registers::{self as regs, Register, Status, Strobe};
use crate::settings::{
    pa_value, ChipStatus, FrequencyBand, Modulation, OutputPower, PacketLengthMode, Preamble,
    SyncMode, MANCHESTER_OFF, MANCHESTER_ON, WHITE_DATA_OFF, WHITE_DATA_ON,
};
use crate::{Cc1101, MAX_PACKET_LENGTH};

use embedded_hal as hal;
use hal::blocking::delay::DelayUs;
use hal::blocking::spi::{Transfer, Write};
use hal::digital::v2::{InputPin, OutputPin};

/// Smallest deviation the modem can produce, in kHz
const MIN_DEVIATION: f32 = 1.587;
const DEFAULT_SYNC_WORD: [u8; 2] = [0x12, 0xAD];

/// Parameters applied by `configure`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Carrier frequency in MHz
    pub frequency: f32,
    /// Bit rate in kBaud
    pub bit_rate: f32,
    /// Frequency deviation in kHz, negative selects the minimum
    pub frequency_deviation: f32,
    /// Receive channel filter bandwidth in kHz
    pub rx_bandwidth: f32,
    /// Output power in dBm, one of the PA table steps
    pub output_power: i8,
    /// Preamble length in bits
    pub preamble_length: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            frequency: 868.0,
            bit_rate: 48.0,
            frequency_deviation: 48.0,
            rx_bandwidth: 135.0,
            output_power: 10,
            preamble_length: 16,
        }
    }
}

impl<SPI, CS, RDY, SpiE, PinE> Cc1101<SPI, CS, RDY>
where
    SPI: Transfer<u8, Error = SpiE> + Write<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
    RDY: InputPin<Error = PinE>,
{
    /// Resets the chip and applies `config`, followed by variable length packets of up
    /// to 255 bytes, 2-FSK, no Manchester or whitening, sync word 0x12AD and empty FIFOs.
    ///
    /// Stops at the first failing step. Steps already applied are not rolled back.
    pub fn configure<D: DelayUs<u32>>(
        &mut self,
        delay: &mut D,
        config: &Config,
    ) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "configure({=f32} MHz, {=f32} kBaud, {=f32} kHz dev, {=f32} kHz bw, {=i8} dBm, {=u8} bits)",
            config.frequency,
            config.bit_rate,
            config.frequency_deviation,
            config.rx_bandwidth,
            config.output_power,
            config.preamble_length
        );

        self.reset(delay)?;
        self.set_frequency(config.frequency)?;
        self.set_bit_rate(config.bit_rate)?;
        self.set_rx_bandwidth(config.rx_bandwidth)?;
        self.set_frequency_deviation(config.frequency_deviation)?;
        self.set_output_power(config.output_power)?;
        self.set_variable_packet_length_mode(MAX_PACKET_LENGTH)?;
        self.set_preamble_length(config.preamble_length)?;
        self.set_modulation(Modulation::Fsk2)?;
        self.set_encoding(false, false)?;
        self.set_sync_word(DEFAULT_SYNC_WORD, 0, false)?;
        self.strobe(Strobe::FlushRx)?;
        self.strobe(Strobe::FlushTx)?;
        Ok(())
    }

    /// Sends a command strobe
    pub fn command(&mut self, strobe: Strobe) -> Result<ChipStatus, Error<SpiE, PinE>> {
        self.strobe(strobe).map(ChipStatus)
    }

    fn idle(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.strobe(Strobe::Idle)?;
        Ok(())
    }

    /// Chip part number, 0x00 for the CC1101
    pub fn part_number(&mut self) -> Result<u8, Error<SpiE, PinE>> {
        self.read_status(Status::PartNum)
    }

    /// Chip version, 0x14 for current silicon
    pub fn version(&mut self) -> Result<u8, Error<SpiE, PinE>> {
        self.read_status(Status::Version)
    }

    /// Main radio control state machine state
    pub fn marc_state(&mut self) -> Result<u8, Error<SpiE, PinE>> {
        Ok(self.read_status(Status::MarcState)? & 0x1F)
    }

    /// Reads back the first `buf.len()` PA table entries
    pub fn read_pa_table(&mut self, buf: &mut [u8]) -> Result<(), Error<SpiE, PinE>> {
        self.burst_read_register(Register::PaTable, buf)
    }

    /// Sets the carrier frequency in MHz. It must lie inside 300-348, 387-464 or
    /// 779-928 MHz, exclusive. The PA table is rewritten since its values depend on the band.
    pub fn set_frequency(&mut self, freq: f32) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_frequency({=f32})", freq);

        if !in_ism_band(freq) {
            return Err(Error::Frequency);
        }
        self.idle()?;

        let frf = frequency_word(freq);
        self.write_register(Register::Freq2, (frf >> 16) as u8)?;
        self.write_register(Register::Freq1, (frf >> 8) as u8)?;
        self.write_register(Register::Freq0, frf as u8)?;

        self.write_pa_table(freq, self.modulation, self.power)?;
        self.frequency = freq;
        Ok(())
    }

    /// Sets the output power in dBm: -30, -20, -15, -10, 0, 5, 7 or 10
    pub fn set_output_power(&mut self, dbm: i8) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_output_power({=i8})", dbm);

        let power = OutputPower::from_dbm(dbm).ok_or(Error::Power)?;
        self.write_pa_table(self.frequency, self.modulation, power)?;
        self.power = power;
        Ok(())
    }

    /// ASK/OOK switches between PA table entries 0 (off) and 1 (on), everything
    /// else transmits from entry 0
    fn write_pa_table(
        &mut self,
        freq: f32,
        modulation: Modulation,
        power: OutputPower,
    ) -> Result<(), Error<SpiE, PinE>> {
        let value = pa_value(power, FrequencyBand::from_frequency(freq));
        if modulation == Modulation::AskOok {
            self.burst_write_register(Register::PaTable, &[0x00, value])
        } else {
            self.write_register(Register::PaTable, value)
        }
    }

    /// Sets the data rate in kBaud, between 0.025 and 600
    pub fn set_bit_rate(&mut self, bit_rate: f32) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_bit_rate({=f32})", bit_rate);

        if !(0.025..=600.0).contains(&bit_rate) {
            return Err(Error::Range);
        }
        self.idle()?;

        let ExpMant { exponent, mantissa } =
            exp_mant(bit_rate * 1000.0, 256, 28, 14).ok_or(Error::Range)?;
        self.write_field(regs::DRATE_E, exponent)?;
        self.write_register(Register::MdmCfg3, mantissa)?;

        self.bit_rate = bit_rate;
        Ok(())
    }

    /// Sets the receive channel filter bandwidth in kHz, between 58 and 812.
    /// The narrowest filter not more than 1 kHz below the request is used.
    pub fn set_rx_bandwidth(&mut self, bw: f32) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_rx_bandwidth({=f32})", bw);

        if !(58.0..=812.0).contains(&bw) {
            return Err(Error::Range);
        }
        self.idle()?;

        let ExpMant { exponent, mantissa } =
            rx_bandwidth_setting(bw).ok_or(Error::BandwidthUnresolved)?;
        self.write_field(regs::CHANBW, (exponent << 6) | (mantissa << 4))
    }

    /// Sets the frequency deviation in kHz, between 1.587 and 380.8.
    /// A negative value selects the minimum.
    pub fn set_frequency_deviation(&mut self, deviation: f32) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_frequency_deviation({=f32})", deviation);

        let deviation = if deviation < 0.0 {
            MIN_DEVIATION
        } else {
            deviation
        };
        if !(MIN_DEVIATION..=380.8).contains(&deviation) {
            return Err(Error::Range);
        }
        self.idle()?;

        let ExpMant { exponent, mantissa } =
            exp_mant(deviation * 1000.0, 8, 17, 7).ok_or(Error::Range)?;
        self.write_field(regs::DEVIATION_E, exponent << 4)?;
        self.write_field(regs::DEVIATION_M, mantissa)
    }

    /// Sets the packet length mode and the fixed or maximum length
    pub fn set_packet_length(
        &mut self,
        mode: PacketLengthMode,
        len: u16,
    ) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_packet_length({}, {=u16})", mode, len);

        if len > u16::from(MAX_PACKET_LENGTH) {
            return Err(Error::PacketTooLong);
        }
        let len = len as u8;

        self.write_field(regs::LENGTH_CONFIG, mode as u8)?;
        self.write_register(Register::PktLen, len)?;

        self.packet_length = len;
        self.packet_length_mode = mode;
        Ok(())
    }

    pub fn set_fixed_packet_length_mode(&mut self, len: u8) -> Result<(), Error<SpiE, PinE>> {
        self.set_packet_length(PacketLengthMode::Fixed, len.into())
    }

    pub fn set_variable_packet_length_mode(
        &mut self,
        max_len: u8,
    ) -> Result<(), Error<SpiE, PinE>> {
        self.set_packet_length(PacketLengthMode::Variable, max_len.into())
    }

    /// Sets the number of preamble bits: 16, 24, 32, 48, 64, 96, 128 or 192
    pub fn set_preamble_length(&mut self, bits: u8) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_preamble_length({=u8})", bits);

        let preamble = Preamble::from_bits(bits).ok_or(Error::PreambleLength)?;
        self.write_field(regs::NUM_PREAMBLE, preamble as u8)
    }

    /// Sets the modulation format and rewrites the PA table for it
    pub fn set_modulation(&mut self, modulation: Modulation) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_modulation({})", modulation);

        self.idle()?;

        // PA_POWER selects how many PA table entries are ramped through
        if modulation == Modulation::AskOok {
            self.write_field(regs::PA_POWER, 1)?;
        } else if self.modulation == Modulation::AskOok {
            self.write_field(regs::PA_POWER, 0)?;
        }

        self.write_field(regs::MOD_FORMAT, modulation as u8)?;
        self.write_pa_table(self.frequency, modulation, self.power)?;
        self.modulation = modulation;
        Ok(())
    }

    /// Enables or disables Manchester encoding and data whitening
    pub fn set_encoding(
        &mut self,
        manchester: bool,
        whitening: bool,
    ) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("set_encoding({=bool}, {=bool})", manchester, whitening);

        self.idle()?;

        let manchester = if manchester {
            MANCHESTER_ON
        } else {
            MANCHESTER_OFF
        };
        let whitening = if whitening {
            WHITE_DATA_ON
        } else {
            WHITE_DATA_OFF
        };
        self.write_field(regs::MANCHESTER_EN, manchester)?;
        self.write_field(regs::WHITE_DATA, whitening)
    }

    /// Sets the 16 bit sync word. Neither byte may be zero and at most one bit error
    /// can be tolerated.
    pub fn set_sync_word(
        &mut self,
        sync_word: [u8; 2],
        max_error_bits: u8,
        carrier_sense: bool,
    ) -> Result<(), Error<SpiE, PinE>> {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "set_sync_word({:#04x}, {=u8}, {=bool})",
            sync_word,
            max_error_bits,
            carrier_sense
        );

        if max_error_bits > 1 || sync_word.contains(&0x00) {
            return Err(Error::SyncWord);
        }
        self.enable_sync_word_filtering(max_error_bits, carrier_sense)?;
        self.write_register(Register::Sync1, sync_word[0])?;
        self.write_register(Register::Sync0, sync_word[1])
    }

    /// Selects the sync word qualifier mode
    pub fn enable_sync_word_filtering(
        &mut self,
        max_error_bits: u8,
        carrier_sense: bool,
    ) -> Result<(), Error<SpiE, PinE>> {
        let mode = SyncMode::select(max_error_bits, carrier_sense).ok_or(Error::SyncWord)?;
        self.write_field(regs::SYNC_MODE, mode as u8)
    }
}

// Tests
