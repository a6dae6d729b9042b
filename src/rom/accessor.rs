//! Puzzle table accessor
//!
//! `PicrossRom` owns the raw bytes of a loaded ROM and exposes typed
//! get/set operations over the fixed puzzle table. Nothing outside this
//! type touches the buffer, and export returns it byte-identical except
//! for the cells and dimension bytes written through the setters.

use super::error::RomError;
use super::layout::{
    cell_mask, cell_offset, record_offset, HEIGHT_OFFSET, MAX_HEIGHT, MAX_WIDTH, RECORD_SIZE,
    ROW_PITCH, WIDTH_OFFSET,
};

/// An in-memory Picross ROM with bit-level puzzle access
#[derive(Debug, Clone)]
pub struct PicrossRom {
    bytes: Vec<u8>,
    name: String,
}

impl PicrossRom {
    /// Wrap a fully-read ROM image.
    ///
    /// No format validation is performed; the buffer is treated as opaque
    /// outside the puzzle table. `name` is the source file name, kept for
    /// round-trip save naming.
    pub fn from_bytes(bytes: Vec<u8>, name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!("ROM {:?}: {} bytes", name, bytes.len());
        Self { bytes, name }
    }

    /// Source file name, used to name the exported file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of puzzle records that fit inside the buffer.
    pub fn puzzle_count(&self) -> usize {
        self.bytes.len().saturating_sub(record_offset(0)) / RECORD_SIZE
    }

    /// Whether the given cell is filled.
    pub fn filled(&self, puzzle: usize, row: usize, col: usize) -> Result<bool, RomError> {
        let (offset, mask) = self.cell(puzzle, row, col)?;
        Ok(self.bytes[offset] & mask != 0)
    }

    /// Set or clear the given cell. Changes exactly one bit.
    pub fn set_filled(
        &mut self,
        puzzle: usize,
        row: usize,
        col: usize,
        filled: bool,
    ) -> Result<(), RomError> {
        let (offset, mask) = self.cell(puzzle, row, col)?;
        if filled {
            self.bytes[offset] |= mask;
        } else {
            self.bytes[offset] &= !mask;
        }
        Ok(())
    }

    /// Grid width of a puzzle.
    pub fn width(&self, puzzle: usize) -> Result<u8, RomError> {
        let base = self.record(puzzle)?;
        Ok(self.bytes[base + WIDTH_OFFSET])
    }

    /// Grid height of a puzzle.
    pub fn height(&self, puzzle: usize) -> Result<u8, RomError> {
        let base = self.record(puzzle)?;
        Ok(self.bytes[base + HEIGHT_OFFSET])
    }

    /// Write a puzzle's width byte.
    pub fn set_width(&mut self, puzzle: usize, value: u8) -> Result<(), RomError> {
        if value == 0 || value > MAX_WIDTH {
            return Err(RomError::InvalidWidth(value));
        }
        let base = self.record(puzzle)?;
        self.bytes[base + WIDTH_OFFSET] = value;
        Ok(())
    }

    /// Write a puzzle's height byte.
    pub fn set_height(&mut self, puzzle: usize, value: u8) -> Result<(), RomError> {
        if value == 0 || value > MAX_HEIGHT {
            return Err(RomError::InvalidHeight(value));
        }
        let base = self.record(puzzle)?;
        self.bytes[base + HEIGHT_OFFSET] = value;
        Ok(())
    }

    /// The packed 16-bit word for one row, MSB = column 0.
    pub fn row_bits(&self, puzzle: usize, row: usize) -> Result<u16, RomError> {
        let base = self.record(puzzle)?;
        let height = self.bytes[base + HEIGHT_OFFSET].min(MAX_HEIGHT);
        if row >= usize::from(height) {
            return Err(RomError::CellOutOfRange {
                puzzle,
                row,
                col: 0,
                width: self.bytes[base + WIDTH_OFFSET],
                height,
            });
        }
        let offset = base + row * ROW_PITCH;
        Ok(u16::from_be_bytes([
            self.bytes[offset],
            self.bytes[offset + 1],
        ]))
    }

    /// Current ROM image, byte-identical to the loaded file outside the
    /// edits applied through the setters.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the accessor and take the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Validated base offset of a puzzle record.
    fn record(&self, puzzle: usize) -> Result<usize, RomError> {
        let base = record_offset(puzzle);
        let end = base + RECORD_SIZE;
        if end > self.bytes.len() {
            return Err(RomError::PuzzleOutOfRange {
                puzzle,
                end,
                len: self.bytes.len(),
            });
        }
        Ok(base)
    }

    /// Validated byte offset and bit mask of a cell.
    ///
    /// A stored dimension byte beyond the encoding's capacity is clamped so
    /// cell access can never escape the row region of the record.
    fn cell(&self, puzzle: usize, row: usize, col: usize) -> Result<(usize, u8), RomError> {
        let base = self.record(puzzle)?;
        let width = self.bytes[base + WIDTH_OFFSET].min(MAX_WIDTH);
        let height = self.bytes[base + HEIGHT_OFFSET].min(MAX_HEIGHT);
        if row >= usize::from(height) || col >= usize::from(width) {
            return Err(RomError::CellOutOfRange {
                puzzle,
                row,
                col,
                width,
                height,
            });
        }
        Ok((cell_offset(puzzle, row, col), cell_mask(col)))
    }
}
