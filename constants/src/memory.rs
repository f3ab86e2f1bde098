/// ROM word width in bits (one lane per bit)
pub const WORD_WIDTH: usize = 12;

/// Frames stored back to back in the ROM
pub const FRAME_COUNT: usize = 2;

/// Rows belonging to one frame
pub const ROWS_PER_FRAME: usize = 64;

/// Total ROM depth in words
pub const DEPTH: usize = ROWS_PER_FRAME * FRAME_COUNT;

/// First address of frame 1, always written explicitly to the listing
pub const FRAME_BOUNDARY_ADDRESS: usize = ROWS_PER_FRAME;

/// First ROM row of `frame`
pub const fn frame_bias(frame: usize) -> usize {
    ROWS_PER_FRAME * frame
}
