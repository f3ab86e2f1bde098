use crate::encoder::Listing;
use crate::error::{Result, SimulatorError};
use constants::lane::get_lane_name;
use constants::memory::{DEPTH, WORD_WIDTH};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Write a listing as a Quartus memory initialization file.
pub fn write_mif<W: Write>(out: &mut W, listing: &Listing) -> io::Result<()> {
    writeln!(out, "-- Simulated CCD frames of Delta-Cam")?;
    writeln!(out, "-- Format for each word is (MSB to LSB):")?;
    for index in 0..WORD_WIDTH {
        writeln!(out, "--  * {}", get_lane_name(index))?;
    }
    writeln!(out)?;

    writeln!(out, "WIDTH={};", WORD_WIDTH)?;
    writeln!(out, "DEPTH={};", DEPTH)?;
    writeln!(out)?;
    writeln!(out, "ADDRESS_RADIX=UNS;")?;
    writeln!(out, "DATA_RADIX=BIN;")?;
    writeln!(out)?;

    writeln!(out, "CONTENT BEGIN")?;
    for entry in listing.entries() {
        writeln!(out, "{}", entry)?;
    }
    writeln!(out, "END;")?;
    Ok(())
}

/// Render the whole file in memory first so a failed run leaves nothing behind.
pub fn write_mif_file(path: &Path, listing: &Listing) -> Result<()> {
    let mut bytes = Vec::new();
    write_mif(&mut bytes, listing).map_err(|source| SimulatorError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, bytes).map_err(|source| SimulatorError::Write {
        path: path.to_path_buf(),
        source,
    })
}
