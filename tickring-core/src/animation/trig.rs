//! Fixed-point sine and cosine
//!
//! Angles use a full turn of [`TRIG_MAX_ANGLE`] units and results are
//! scaled so that 1.0 == [`TRIG_MAX_RATIO`]. A quarter-wave table with
//! linear interpolation keeps the functions monotonic within each quadrant,
//! which the easing curves rely on.

/// One full turn in angle units
pub const TRIG_MAX_ANGLE: i32 = 0x10000;

/// Fixed-point representation of 1.0
pub const TRIG_MAX_RATIO: i32 = 0x10000;

const QUARTER_TURN: u32 = (TRIG_MAX_ANGLE / 4) as u32;

/// sin(i * 90° / 64) for i in 0..=64, scaled by TRIG_MAX_RATIO
const QUARTER_SINE: [i32; 65] = [
    0, 1608, 3216, 4821, 6424, 8022, 9616, 11204,
    12785, 14359, 15924, 17479, 19024, 20557, 22078, 23586,
    25080, 26558, 28020, 29466, 30893, 32303, 33692, 35062,
    36410, 37736, 39040, 40320, 41576, 42806, 44011, 45190,
    46341, 47464, 48559, 49624, 50660, 51665, 52639, 53581,
    54491, 55368, 56212, 57022, 57798, 58538, 59244, 59914,
    60547, 61145, 61705, 62228, 62714, 63162, 63572, 63944,
    64277, 64571, 64827, 65043, 65220, 65358, 65457, 65516,
    65536,
];

/// Sine for an angle inside the first quadrant (0..=QUARTER_TURN)
fn quarter_sine(angle: u32) -> i32 {
    let index = (angle >> 8) as usize;
    if index >= QUARTER_SINE.len() - 1 {
        return TRIG_MAX_RATIO;
    }
    let frac = (angle & 0xFF) as i32;
    let lo = QUARTER_SINE[index];
    let hi = QUARTER_SINE[index + 1];
    lo + (hi - lo) * frac / 256
}

/// Fixed-point sine
///
/// Any angle is accepted; it is wrapped into one turn first.
pub fn sin_lookup(angle: i32) -> i32 {
    let angle = (angle & (TRIG_MAX_ANGLE - 1)) as u32;
    let within = angle % QUARTER_TURN;
    match angle / QUARTER_TURN {
        0 => quarter_sine(within),
        1 => quarter_sine(QUARTER_TURN - within),
        2 => -quarter_sine(within),
        _ => -quarter_sine(QUARTER_TURN - within),
    }
}

/// Fixed-point cosine
pub fn cos_lookup(angle: i32) -> i32 {
    sin_lookup(angle.wrapping_add(QUARTER_TURN as i32))
}
