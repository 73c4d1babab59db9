//! Provides a mock SPI bus and pins that behave like a CC1101
use crate::registers::{Register, Strobe};
use crate::Cc1101;
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use std::cell::RefCell;
use std::rc::Rc;

/// Ready, IDLE, 15 bytes free in the TX FIFO
const STATUS_BYTE: u8 = 0x0F;

const RESET_REGISTERS: [u8; 0x2F] = [
    0x29, 0x2E, 0x3F, 0x07, 0xD3, 0x91, 0xFF, 0x04, 0x45, 0x00, 0x00, 0x0F, 0x00, 0x1E, 0xC4, 0xEC,
    0x8C, 0x22, 0x02, 0x22, 0xF8, 0x47, 0x07, 0x30, 0x04, 0x36, 0x6C, 0x03, 0x40, 0x91, 0x87, 0x6B,
    0xF8, 0x56, 0x10, 0xA9, 0x0A, 0x20, 0x0D, 0x41, 0x00, 0x59, 0x7F, 0x3F, 0x88, 0x31, 0x0B,
];

const RESET_PA_TABLE: [u8; 8] = [0xC6, 0, 0, 0, 0, 0, 0, 0];

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MockError {
    Bus,
}

#[derive(Clone, Copy)]
enum Phase {
    Header,
    Data {
        addr: u8,
        read: bool,
        burst: bool,
        index: usize,
    },
}

pub struct Chip {
    pub registers: [u8; 0x2F],
    pub pa_table: [u8; 8],
    pub status: [u8; 14],
    /// Every strobe received, in order
    pub strobes: Vec<u8>,
    /// MOSI bytes of each completed chip select window
    pub frames: Vec<Vec<u8>>,
    pub selected: bool,
    /// Makes every ready line sample fail
    pub fail_ready: bool,
    frame: Vec<u8>,
    phase: Phase,
    calls: usize,
    fail_at: Option<usize>,
    releases: usize,
    fail_release_at: Option<usize>,
}

impl Default for Chip {
    fn default() -> Self {
        let mut status = [0u8; 14];
        // VERSION
        status[1] = 0x14;
        // MARCSTATE, IDLE
        status[5] = 0x01;
        Chip {
            registers: RESET_REGISTERS,
            pa_table: RESET_PA_TABLE,
            status,
            strobes: Vec::new(),
            frames: Vec::new(),
            selected: false,
            fail_ready: false,
            frame: Vec::new(),
            phase: Phase::Header,
            calls: 0,
            fail_at: None,
            releases: 0,
            fail_release_at: None,
        }
    }
}

impl Chip {
    pub fn register(&self, reg: Register) -> u8 {
        self.registers[reg as usize]
    }

    /// Makes the `n`th bus call from now fail
    pub fn fail_next(&mut self, n: usize) {
        self.fail_at = Some(self.calls + n);
    }

    /// Makes the `n`th chip select release from now fail, leaving the line low
    pub fn fail_release(&mut self, n: usize) {
        self.fail_release_at = Some(self.releases + n);
    }

    /// Last chip select window whose header byte is `header`
    pub fn last_frame(&self, header: u8) -> Option<&[u8]> {
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.first() == Some(&header))
            .map(Vec::as_slice)
    }

    fn bus_call(&mut self) -> Result<(), MockError> {
        assert!(self.selected, "bus used while chip select is released");
        self.calls += 1;
        if self.fail_at == Some(self.calls) {
            return Err(MockError::Bus);
        }
        Ok(())
    }

    fn clock(&mut self, mosi: u8) -> u8 {
        self.frame.push(mosi);
        match self.phase {
            Phase::Header => {
                let addr = mosi & 0x3F;
                let read = mosi & 0x80 != 0;
                let burst = mosi & 0x40 != 0;
                if (0x30..=0x3D).contains(&addr) && !burst {
                    self.strobe(addr);
                } else {
                    self.phase = Phase::Data {
                        addr,
                        read,
                        burst,
                        index: 0,
                    };
                }
                STATUS_BYTE
            }
            Phase::Data {
                addr,
                read,
                burst,
                index,
            } => {
                let miso = if read {
                    self.peek(addr, index)
                } else {
                    self.poke(addr, index, mosi);
                    STATUS_BYTE
                };
                self.phase = if burst {
                    Phase::Data {
                        addr,
                        read,
                        burst,
                        index: index + 1,
                    }
                } else {
                    Phase::Header
                };
                miso
            }
        }
    }

    fn strobe(&mut self, addr: u8) {
        self.strobes.push(addr);
        if addr == Strobe::Reset as u8 {
            self.registers = RESET_REGISTERS;
            self.pa_table = RESET_PA_TABLE;
        }
    }

    fn peek(&self, addr: u8, index: usize) -> u8 {
        match addr {
            0x30..=0x3D => self.status[(addr - 0x30) as usize],
            0x3E => self.pa_table[index % 8],
            0x3F => 0,
            _ => self.registers[addr as usize + index],
        }
    }

    fn poke(&mut self, addr: u8, index: usize, value: u8) {
        match addr {
            0x30..=0x3D | 0x3F => {}
            0x3E => self.pa_table[index % 8] = value,
            _ => self.registers[addr as usize + index] = value,
        }
    }
}

pub struct MockSpi(Rc<RefCell<Chip>>);
pub struct MockCs(Rc<RefCell<Chip>>);
pub struct MockReady(Rc<RefCell<Chip>>);

pub fn mock_chip() -> (Rc<RefCell<Chip>>, MockSpi, MockCs, MockReady) {
    let chip = Rc::new(RefCell::new(Chip::default()));
    (
        chip.clone(),
        MockSpi(chip.clone()),
        MockCs(chip.clone()),
        MockReady(chip),
    )
}

pub fn mock_tester() -> (Rc<RefCell<Chip>>, Cc1101<MockSpi, MockCs, MockReady>) {
    let (chip, spi, cs, ready) = mock_chip();
    (chip, Cc1101::new(spi, cs, ready))
}

impl Transfer<u8> for MockSpi {
    type Error = MockError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        let mut chip = self.0.borrow_mut();
        chip.bus_call()?;
        for word in words.iter_mut() {
            *word = chip.clock(*word);
        }
        Ok(words)
    }
}

impl Write<u8> for MockSpi {
    type Error = MockError;

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let mut chip = self.0.borrow_mut();
        chip.bus_call()?;
        for &word in words {
            chip.clock(word);
        }
        Ok(())
    }
}

impl OutputPin for MockCs {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut chip = self.0.borrow_mut();
        chip.selected = true;
        chip.frame.clear();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut chip = self.0.borrow_mut();
        chip.releases += 1;
        if chip.fail_release_at == Some(chip.releases) {
            return Err(MockError::Bus);
        }
        if chip.selected && !chip.frame.is_empty() {
            let frame = core::mem::take(&mut chip.frame);
            chip.frames.push(frame);
        }
        chip.selected = false;
        chip.phase = Phase::Header;
        Ok(())
    }
}

impl InputPin for MockReady {
    type Error = MockError;

    fn is_high(&self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        if self.0.borrow().fail_ready {
            return Err(MockError::Bus);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock() {
        let (chip, mut spi, mut cs, _) = mock_chip();
        cs.set_low().unwrap();
        spi.write(&[0x0D, 0x21]).unwrap();
        cs.set_high().unwrap();

        cs.set_low().unwrap();
        let mut read = [0x8D, 0x00];
        spi.transfer(&mut read).unwrap();
        cs.set_high().unwrap();
        assert_eq!(read, [STATUS_BYTE, 0x21]);

        cs.set_low().unwrap();
        spi.write(&[0x7E]).unwrap();
        spi.write(&[0x00, 0xC2]).unwrap();
        cs.set_high().unwrap();
        assert_eq!(chip.borrow().pa_table[..2], [0x00, 0xC2]);
        assert_eq!(chip.borrow().last_frame(0x7E), Some(&[0x7E, 0x00, 0xC2][..]));

        cs.set_low().unwrap();
        let mut version = [0xF1, 0x00];
        spi.transfer(&mut version).unwrap();
        cs.set_high().unwrap();
        assert_eq!(version[1], 0x14);
    }
}
