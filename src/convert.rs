//! Physical units to register encodings.
#[allow(unused_imports)]
use micromath::F32Ext;

/// Crystal oscillator frequency in MHz
pub const CRYSTAL_FREQ_MHZ: f32 = 26.0;

/// ISM sub-bands the synthesizer can tune to, both ends exclusive
const ISM_BANDS: [(f32, f32); 3] = [(300.0, 348.0), (387.0, 464.0), (779.0, 928.0)];

/// Exponent/mantissa pair of an exponentially stepped register setting
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ExpMant {
    pub exponent: u8,
    pub mantissa: u8,
}

pub fn in_ism_band(freq_mhz: f32) -> bool {
    ISM_BANDS
        .iter()
        .any(|&(low, high)| freq_mhz > low && freq_mhz < high)
}

/// 24 bit FREQ word for a carrier frequency in MHz
pub fn frequency_word(freq_mhz: f32) -> u32 {
    (freq_mhz * 65536.0 / CRYSTAL_FREQ_MHZ).round() as u32
}

/// Solves `target = origin(e) + m * origin(e) / mantissa_offset`, where
/// `origin(e) = mantissa_offset * f_xosc * 2^e / 2^divisor_exponent`.
///
/// The largest exponent whose origin does not exceed the target wins. Returns
/// `None` when the target sits below the origin of exponent zero, or when either
/// exponent parameter does not fit a 32 bit shift.
pub fn exp_mant(
    target: f32,
    mantissa_offset: u16,
    divisor_exponent: u8,
    max_exponent: u8,
) -> Option<ExpMant> {
    if max_exponent >= 32 {
        return None;
    }
    let divisor = 1u32.checked_shl(divisor_exponent.into())?;
    let offset = f32::from(mantissa_offset);
    let origin = offset * CRYSTAL_FREQ_MHZ * 1e6 / divisor as f32;
    (0..=max_exponent).rev().find_map(|e| {
        let interval_start = origin * (1u32 << e) as f32;
        if target < interval_start {
            return None;
        }
        let step = interval_start / offset;
        let mantissa = ((target - interval_start) / step).floor();
        Some(ExpMant {
            exponent: e,
            mantissa: mantissa as u8,
        })
    })
}

/// Channel filter setting for a receive bandwidth in kHz.
///
/// Candidates are visited from the narrowest filter upwards and the first one
/// no more than 1 kHz below the request is taken. Anything up to 812 kHz
/// resolves.
pub fn rx_bandwidth_setting(bw_khz: f32) -> Option<ExpMant> {
    let target = bw_khz * 1000.0;
    for e in (0..=3u8).rev() {
        for m in (0..=3u8).rev() {
            let point = CRYSTAL_FREQ_MHZ * 1e6 / (8 * (u32::from(m) + 4) * (1u32 << e)) as f32;
            if target - point <= 1000.0 {
                return Some(ExpMant {
                    exponent: e,
                    mantissa: m,
                });
            }
        }
    }
    None
}

// Tests
