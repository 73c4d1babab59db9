/// Configuration register addresses, plus the PA table and FIFO access points
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    // GDO2 output pin configuration
    IoCfg2 = 0x00,
    // GDO1 output pin configuration
    IoCfg1 = 0x01,
    // GDO0 output pin configuration
    IoCfg0 = 0x02,
    // RX FIFO and TX FIFO thresholds
    FifoThr = 0x03,
    // Sync word, high byte
    Sync1 = 0x04,
    // Sync word, low byte
    Sync0 = 0x05,
    // Packet length
    PktLen = 0x06,
    // Packet automation control
    PktCtrl1 = 0x07,
    // Packet automation control, length config and whitening
    PktCtrl0 = 0x08,
    // Device address
    Addr = 0x09,
    // Channel number
    ChanNr = 0x0A,
    // Frequency synthesizer control
    FsCtrl1 = 0x0B,
    FsCtrl0 = 0x0C,
    // Frequency control word, high/mid/low byte
    Freq2 = 0x0D,
    Freq1 = 0x0E,
    Freq0 = 0x0F,
    // Channel bandwidth and data rate exponent
    MdmCfg4 = 0x10,
    // Data rate mantissa
    MdmCfg3 = 0x11,
    // Modulation format, Manchester, sync mode
    MdmCfg2 = 0x12,
    // Preamble length, channel spacing exponent
    MdmCfg1 = 0x13,
    // Channel spacing mantissa
    MdmCfg0 = 0x14,
    // Modem deviation setting
    Deviatn = 0x15,
    // Main radio control state machine configuration
    Mcsm2 = 0x16,
    Mcsm1 = 0x17,
    Mcsm0 = 0x18,
    // Frequency offset compensation configuration
    FocCfg = 0x19,
    // Bit synchronization configuration
    BsCfg = 0x1A,
    // AGC control
    AgcCtrl2 = 0x1B,
    AgcCtrl1 = 0x1C,
    AgcCtrl0 = 0x1D,
    // Event0 timeout, high/low byte
    WorEvt1 = 0x1E,
    WorEvt0 = 0x1F,
    // Wake on radio control
    WorCtrl = 0x20,
    // Front end RX configuration
    Frend1 = 0x21,
    // Front end TX configuration, PA power index
    Frend0 = 0x22,
    // Frequency synthesizer calibration
    FsCal3 = 0x23,
    FsCal2 = 0x24,
    FsCal1 = 0x25,
    FsCal0 = 0x26,
    // RC oscillator configuration
    RcCtrl1 = 0x27,
    RcCtrl0 = 0x28,
    // Test registers, not preserved in SLEEP
    FsTest = 0x29,
    PTest = 0x2A,
    AgcTest = 0x2B,
    Test2 = 0x2C,
    Test1 = 0x2D,
    Test0 = 0x2E,
    // Power amplifier table
    PaTable = 0x3E,
    // TX/RX FIFO
    Fifo = 0x3F,
}

/// Command strobes. A strobe is a single header byte with no data phase.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strobe {
    /// Reset chip
    Reset = 0x30,
    /// Enable and calibrate frequency synthesizer
    FsTxOn = 0x31,
    /// Turn off crystal oscillator
    XOff = 0x32,
    /// Calibrate frequency synthesizer and turn it off
    Calibrate = 0x33,
    /// Enable RX
    Rx = 0x34,
    /// Enable TX
    Tx = 0x35,
    /// Exit RX/TX, turn off frequency synthesizer
    Idle = 0x36,
    /// Start automatic RX polling sequence (Wake-on-Radio)
    WakeOnRadio = 0x38,
    /// Enter power down mode when CSn goes high
    PowerDown = 0x39,
    /// Flush the RX FIFO buffer
    FlushRx = 0x3A,
    /// Flush the TX FIFO buffer
    FlushTx = 0x3B,
    /// Reset real time clock to Event1 value
    WorReset = 0x3C,
    /// No operation, returns the chip status byte
    Nop = 0x3D,
}

/// Read-only status registers. These share addresses with the strobes and are
/// only reachable with both the read and burst bits set, which is already
/// folded into the discriminants.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    PartNum = 0xF0,
    Version = 0xF1,
    FreqEst = 0xF2,
    Lqi = 0xF3,
    Rssi = 0xF4,
    MarcState = 0xF5,
    WorTime1 = 0xF6,
    WorTime0 = 0xF7,
    PktStatus = 0xF8,
    VcoVcDac = 0xF9,
    TxBytes = 0xFA,
    RxBytes = 0xFB,
    RcCtrl1Status = 0xFC,
    RcCtrl0Status = 0xFD,
}

/// A `[lsb, msb]` sub-range of a configuration register
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Field {
    pub reg: Register,
    pub msb: u8,
    pub lsb: u8,
}

impl Field {
    const fn new(reg: Register, msb: u8, lsb: u8) -> Self {
        Field { reg, msb, lsb }
    }
}

// MDMCFG4
pub(crate) const CHANBW: Field = Field::new(Register::MdmCfg4, 7, 4);
pub(crate) const DRATE_E: Field = Field::new(Register::MdmCfg4, 3, 0);
// MDMCFG2
pub(crate) const MOD_FORMAT: Field = Field::new(Register::MdmCfg2, 6, 4);
pub(crate) const MANCHESTER_EN: Field = Field::new(Register::MdmCfg2, 3, 3);
pub(crate) const SYNC_MODE: Field = Field::new(Register::MdmCfg2, 2, 0);
// MDMCFG1
pub(crate) const NUM_PREAMBLE: Field = Field::new(Register::MdmCfg1, 6, 4);
// DEVIATN
pub(crate) const DEVIATION_E: Field = Field::new(Register::Deviatn, 6, 4);
pub(crate) const DEVIATION_M: Field = Field::new(Register::Deviatn, 2, 0);
// PKTCTRL0
pub(crate) const WHITE_DATA: Field = Field::new(Register::PktCtrl0, 6, 6);
pub(crate) const LENGTH_CONFIG: Field = Field::new(Register::PktCtrl0, 1, 0);
// FREND0
pub(crate) const PA_POWER: Field = Field::new(Register::Frend0, 2, 0);

// Tests
