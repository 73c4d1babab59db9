/// Modulation format, as placed in MDMCFG2.MOD_FORMAT
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modulation {
    /// 2-FSK (default)
    Fsk2 = 0b0000_0000,
    /// GFSK
    Gfsk = 0b0001_0000,
    /// ASK/OOK
    AskOok = 0b0011_0000,
    /// 4-FSK
    Fsk4 = 0b0100_0000,
    /// MSK, only for data rates above 26 kBaud
    Msk = 0b0111_0000,
}

/// Packet length configuration, PKTCTRL0.LENGTH_CONFIG
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketLengthMode {
    /// Length configured in PKTLEN
    Fixed = 0b00,
    /// Length given by the first byte after the sync word, PKTLEN is the maximum
    Variable = 0b01,
    /// Infinite packet length
    Infinite = 0b10,
}

/// Minimum number of preamble bits to transmit, MDMCFG1.NUM_PREAMBLE
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Preamble {
    Bits16 = 0b0000_0000,
    Bits24 = 0b0001_0000,
    Bits32 = 0b0010_0000,
    Bits48 = 0b0011_0000,
    Bits64 = 0b0100_0000,
    Bits96 = 0b0101_0000,
    Bits128 = 0b0110_0000,
    Bits192 = 0b0111_0000,
}

impl Preamble {
    pub fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            16 => Preamble::Bits16,
            24 => Preamble::Bits24,
            32 => Preamble::Bits32,
            48 => Preamble::Bits48,
            64 => Preamble::Bits64,
            96 => Preamble::Bits96,
            128 => Preamble::Bits128,
            192 => Preamble::Bits192,
            _ => return None,
        })
    }
}

/// Sync word qualifier mode, MDMCFG2.SYNC_MODE
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncMode {
    /// 15 of 16 sync word bits must match
    Match15of16 = 0b001,
    /// All 16 sync word bits must match
    Match16of16 = 0b010,
    /// 15 of 16 bits plus carrier sense above threshold
    Match15of16CarrierSense = 0b101,
    /// 16 of 16 bits plus carrier sense above threshold
    Match16of16CarrierSense = 0b110,
}

impl SyncMode {
    /// Picks the mode tolerating `max_error_bits` bit errors, `None` beyond one
    pub fn select(max_error_bits: u8, carrier_sense: bool) -> Option<Self> {
        match (max_error_bits, carrier_sense) {
            (0, false) => Some(SyncMode::Match16of16),
            (0, true) => Some(SyncMode::Match16of16CarrierSense),
            (1, false) => Some(SyncMode::Match15of16),
            (1, true) => Some(SyncMode::Match15of16CarrierSense),
            _ => None,
        }
    }
}

pub(crate) const MANCHESTER_ON: u8 = 0b0000_1000;
pub(crate) const MANCHESTER_OFF: u8 = 0b0000_0000;
pub(crate) const WHITE_DATA_ON: u8 = 0b0100_0000;
pub(crate) const WHITE_DATA_OFF: u8 = 0b0000_0000;

/// Discrete output power steps supported by the PA table
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputPower {
    Minus30,
    Minus20,
    Minus15,
    Minus10,
    Zero,
    Plus5,
    Plus7,
    Plus10,
}

impl OutputPower {
    pub fn from_dbm(dbm: i8) -> Option<Self> {
        Some(match dbm {
            -30 => OutputPower::Minus30,
            -20 => OutputPower::Minus20,
            -15 => OutputPower::Minus15,
            -10 => OutputPower::Minus10,
            0 => OutputPower::Zero,
            5 => OutputPower::Plus5,
            7 => OutputPower::Plus7,
            10 => OutputPower::Plus10,
            _ => return None,
        })
    }

    pub fn dbm(self) -> i8 {
        match self {
            OutputPower::Minus30 => -30,
            OutputPower::Minus20 => -20,
            OutputPower::Minus15 => -15,
            OutputPower::Minus10 => -10,
            OutputPower::Zero => 0,
            OutputPower::Plus5 => 5,
            OutputPower::Plus7 => 7,
            OutputPower::Plus10 => 10,
        }
    }
}

/// PA table column, chosen from the carrier frequency
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrequencyBand {
    Mhz315,
    Mhz433,
    Mhz868,
    Mhz915,
}

impl FrequencyBand {
    pub fn from_frequency(freq_mhz: f32) -> Self {
        if freq_mhz < 374.0 {
            FrequencyBand::Mhz315
        } else if freq_mhz < 650.5 {
            FrequencyBand::Mhz433
        } else if freq_mhz < 891.5 {
            FrequencyBand::Mhz868
        } else {
            FrequencyBand::Mhz915
        }
    }
}

/// PATABLE settings from table 39 of the datasheet.
/// Rows follow `OutputPower`, columns follow `FrequencyBand`.
pub const PA_TABLE: [[u8; 4]; 8] = [
    [0x12, 0x12, 0x03, 0x03],
    [0x0D, 0x0E, 0x0F, 0x0E],
    [0x1C, 0x1D, 0x1E, 0x1E],
    [0x34, 0x34, 0x27, 0x27],
    [0x51, 0x60, 0x50, 0x8E],
    [0x85, 0x84, 0x81, 0xCD],
    [0xCB, 0xC8, 0xCB, 0xC7],
    [0xC2, 0xC0, 0xC2, 0xC0],
];

pub fn pa_value(power: OutputPower, band: FrequencyBand) -> u8 {
    PA_TABLE[power as usize][band as usize]
}

/// Main radio state as reported in the chip status byte
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Idle,
    Rx,
    Tx,
    FsTxOn,
    Calibrate,
    Settling,
    RxFifoOverflow,
    TxFifoUnderflow,
}

/// The status byte clocked out during every header byte
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipStatus(pub u8);

impl ChipStatus {
    /// CHIP_RDYn is low once the crystal is running
    pub fn ready(&self) -> bool {
        self.0 & 0x80 == 0
    }

    pub fn state(&self) -> State {
        match (self.0 >> 4) & 0b111 {
            0 => State::Idle,
            1 => State::Rx,
            2 => State::Tx,
            3 => State::FsTxOn,
            4 => State::Calibrate,
            5 => State::Settling,
            6 => State::RxFifoOverflow,
            _ => State::TxFifoUnderflow,
        }
    }

    /// Free TX FIFO bytes or available RX FIFO bytes, saturating at 15
    pub fn fifo_bytes_available(&self) -> u8 {
        self.0 & 0x0F
    }
}

// Tests
