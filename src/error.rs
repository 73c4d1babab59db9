use core::fmt;

/// Error type throwable by radio operations
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, PinE> {
    /// Error during SPI transfer
    Spi(SpiE),
    /// Error driving chip select or sampling the ready line
    Pin(PinE),
    /// Carrier frequency outside the supported ISM sub-bands
    Frequency,
    /// Output power is not one of the PA table steps
    Power,
    /// Bit rate, bandwidth or deviation outside the supported range
    Range,
    /// Packet length above 255
    PacketTooLong,
    /// Preamble length is not one of the supported bit counts
    PreambleLength,
    /// Sync word contains a zero byte or tolerates more than one bit error
    SyncWord,
    /// Bit field bounds outside `0 <= lsb <= msb <= 7`
    BitField,
    /// No channel filter matched a validated bandwidth. This is a bug, not a
    /// recoverable condition.
    BandwidthUnresolved,
}

impl<SpiE, PinE> fmt::Debug for Error<SpiE, PinE>
where
    SpiE: fmt::Debug,
    PinE: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Spi(error) => write!(f, "Spi({:?})", error),
            Error::Pin(error) => write!(f, "Pin({:?})", error),
            Error::Frequency => write!(f, "Frequency"),
            Error::Power => write!(f, "Power"),
            Error::Range => write!(f, "Range"),
            Error::PacketTooLong => write!(f, "PacketTooLong"),
            Error::PreambleLength => write!(f, "PreambleLength"),
            Error::SyncWord => write!(f, "SyncWord"),
            Error::BitField => write!(f, "BitField"),
            Error::BandwidthUnresolved => write!(f, "BandwidthUnresolved"),
        }
    }
}
