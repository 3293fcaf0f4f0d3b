//! Fixed pixel ↔ millimetre conversion.
//!
//! The virtual stage is calibrated once: a 400 px span on screen equals
//! 100 mm on the physical instrument. Magnification and the selected display
//! unit do not change this factor.

use crate::geometry::{MmPoint, PixelPoint};

/// Length of the virtual calibration span in pixels.
pub const VIRTUAL_CALIBRATION_SPAN_PX: i32 = 400;

/// Physical length of the calibration span in millimetres.
pub const REAL_CALIBRATION_SPAN_MM: f64 = 100.0;

/// Millimetres per virtual pixel.
pub const CORRECTION_FACTOR: f64 = REAL_CALIBRATION_SPAN_MM / VIRTUAL_CALIBRATION_SPAN_PX as f64;

/// Millimetre length of the pixel span `from -> to`.
///
/// Computed in floating point so that spans between extreme positions
/// cannot overflow.
pub fn span_mm(from: i32, to: i32) -> f64 {
    (f64::from(to) - f64::from(from)) * CORRECTION_FACTOR
}

/// DRO reading of `position` relative to `zero`, in millimetres.
///
/// The y component is negated so that "up" on screen reads positive.
pub fn relative_mm(position: PixelPoint, zero: PixelPoint) -> MmPoint {
    MmPoint::new(span_mm(zero.x, position.x), -span_mm(zero.y, position.y))
}

/// Format a millimetre value for the DRO (3 decimals, no unit).
pub fn format_dro(mm: f64) -> String {
    // Avoid "-0.000" on the display.
    let mm = if mm == 0.0 { 0.0 } else { mm };
    format!("{mm:.3}")
}

/// Format a measured length as `"<value> mm"` with 3 decimals.
pub fn format_mm(mm: f64) -> String {
    format!("{mm:.3} mm")
}

/// Format an angle as `"<value>°"` with 2 decimals.
pub fn format_degrees(degrees: f64) -> String {
    format!("{degrees:.2}°")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correction_factor_is_quarter_mm() {
        assert_eq!(CORRECTION_FACTOR, 0.25);
        assert_eq!(span_mm(0, VIRTUAL_CALIBRATION_SPAN_PX), REAL_CALIBRATION_SPAN_MM);
    }

    #[test]
    fn relative_reading_flips_y() {
        let reading = relative_mm(PixelPoint::new(52, 22), PixelPoint::ZERO);
        assert_eq!(reading, MmPoint::new(13.0, -5.5));

        let reading = relative_mm(PixelPoint::new(84, 84), PixelPoint::new(4, -86));
        assert_eq!(reading, MmPoint::new(20.0, -42.5));
    }

    #[test]
    fn formatting() {
        assert_eq!(format_mm(42.5), "42.500 mm");
        assert_eq!(format_degrees(57.220919), "57.22°");
        assert_eq!(format_dro(-0.0), "0.000");
        assert_eq!(format_dro(-5.5), "-5.500");
    }
}
