/// Projection centre on the X axis (detector units)
pub const PROJECTION_CENTER_X: f64 = 256.0;

/// Projection centre on the Y axis (detector units)
pub const PROJECTION_CENTER_Y: f64 = 296.0;

/// Offset re-added after rotation, centre of the projected range
pub const PROJECTED_ORIGIN: f64 = 256.0;

/// Number of rotated readout axes (A, B, C at 120° spacing)
pub const AXIS_COUNT: usize = 3;

/// Value of π used by the reference ROM images. Kept as is so projected
/// coordinates agree with them to the last float bit.
#[allow(clippy::approx_constant)]
pub const REFERENCE_PI: f64 = 3.1415926;

/// Projected units covered by one CCD segment
pub const SEGMENT_WIDTH: i32 = 256;

/// Segments per CCD
pub const SEGMENT_COUNT: usize = 2;

/// Projected units covered by one row
pub const ROW_PITCH: i32 = 4;

/// Rotation angle of an axis in radians.
pub fn axis_angle(axis: usize) -> f64 {
    axis as f64 * 2.0 * REFERENCE_PI / AXIS_COUNT as f64
}

/// Project a detector position onto a readout axis.
/// Evaluated in double precision and narrowed to single precision, like the
/// reference generator, so integer-boundary floors agree.
pub fn project_onto_axis(x: i32, y: i32, axis: usize) -> f32 {
    let angle = axis_angle(axis);
    let projected = (x as f64 - PROJECTION_CENTER_X) * angle.cos()
        + (y as f64 - PROJECTION_CENTER_Y) * angle.sin()
        + PROJECTED_ORIGIN;

    projected as f32
}

/// Exclusive upper bound of valid projected coordinates
pub const fn projected_range() -> i32 {
    SEGMENT_WIDTH * SEGMENT_COUNT as i32
}
