//! Editing session
//!
//! Owns the loaded ROM and the editor state the frontend manipulates:
//! the selected puzzle, the active tool, and the load/save file boundary.
//! Loading a new file replaces the previous ROM wholesale; edits are never
//! migrated between buffers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::rom::{PicrossRom, RomError};

/// Session and file-boundary errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to load ROM: {0}")]
    Load(#[source] std::io::Error),

    #[error("failed to save ROM: {0}")]
    Save(#[source] std::io::Error),

    #[error("no ROM is loaded")]
    NoRom,

    #[error("puzzle {0} is locked: editing it would break the game")]
    EditLocked(usize),

    #[error(transparent)]
    Rom(#[from] RomError),
}

impl From<SessionError> for String {
    fn from(e: SessionError) -> Self {
        e.to_string()
    }
}

/// Editing tool, mirroring the frontend's tool selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Paint,
    Erase,
}

impl Tool {
    /// Cell value this tool writes.
    pub fn fills(self) -> bool {
        matches!(self, Tool::Paint)
    }
}

/// Grid sizes the editor offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSize {
    Five,
    Ten,
    Fifteen,
}

impl GridSize {
    /// Side length in cells.
    pub fn cells(self) -> u8 {
        match self {
            GridSize::Five => 5,
            GridSize::Ten => 10,
            GridSize::Fifteen => 15,
        }
    }
}

/// One editing session over a single loaded ROM
#[derive(Debug, Default)]
pub struct EditorSession {
    rom: Option<PicrossRom>,
    tool: Tool,
    puzzle: usize,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a ROM file fully into memory and make it the session's buffer.
    ///
    /// Any previously loaded ROM is discarded. On failure nothing changes.
    pub async fn open(&mut self, path: &Path) -> Result<(), SessionError> {
        let bytes = tokio::fs::read(path).await.map_err(SessionError::Load)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "rom.gb".to_string());

        tracing::info!("Loaded ROM {:?} ({} bytes)", name, bytes.len());
        self.rom = Some(PicrossRom::from_bytes(bytes, name));
        // First real level, matching the selector's initial state
        self.puzzle = 1;
        Ok(())
    }

    /// Write the current buffer to `dir`, named after the source file.
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        let rom = self.rom()?;
        let path = dir.join(rom.name());
        tokio::fs::write(&path, rom.bytes())
            .await
            .map_err(SessionError::Save)?;
        tracing::info!("Saved ROM to {:?}", path);
        Ok(path)
    }

    /// The loaded ROM accessor.
    pub fn rom(&self) -> Result<&PicrossRom, SessionError> {
        self.rom.as_ref().ok_or(SessionError::NoRom)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        tracing::debug!("Tool: {:?}", tool);
        self.tool = tool;
    }

    /// Currently selected puzzle index.
    pub fn puzzle(&self) -> usize {
        self.puzzle
    }

    pub fn select_puzzle(&mut self, puzzle: usize) {
        tracing::debug!(
            "Selected puzzle {} ({})",
            puzzle,
            catalog::level(puzzle).map_or("?", |e| e.label.as_str())
        );
        self.puzzle = puzzle;
    }

    /// Apply the active tool to one cell of the selected puzzle.
    pub fn apply_tool(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        let puzzle = self.puzzle;
        if !catalog::is_editable(puzzle) {
            return Err(SessionError::EditLocked(puzzle));
        }
        let filled = self.tool.fills();
        self.rom_mut()?.set_filled(puzzle, row, col, filled)?;
        Ok(())
    }

    /// Resize the selected puzzle to a square grid.
    ///
    /// The game only ships square boards, so the size selector writes width
    /// and height together.
    pub fn resize(&mut self, size: GridSize) -> Result<(), SessionError> {
        let puzzle = self.puzzle;
        if !catalog::is_editable(puzzle) {
            return Err(SessionError::EditLocked(puzzle));
        }
        let cells = size.cells();
        let rom = self.rom_mut()?;
        rom.set_width(puzzle, cells)?;
        rom.set_height(puzzle, cells)?;
        tracing::debug!("Resized puzzle {} to {}x{}", puzzle, cells, cells);
        Ok(())
    }

    fn rom_mut(&mut self) -> Result<&mut PicrossRom, SessionError> {
        self.rom.as_mut().ok_or(SessionError::NoRom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::layout::{HEIGHT_OFFSET, PUZZLE_BASE, RECORD_SIZE, WIDTH_OFFSET};

    fn rom_image(puzzles: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; PUZZLE_BASE + puzzles * RECORD_SIZE];
        for p in 0..puzzles {
            let base = PUZZLE_BASE + p * RECORD_SIZE;
            bytes[base + WIDTH_OFFSET] = 15;
            bytes[base + HEIGHT_OFFSET] = 15;
        }
        bytes
    }

    fn session_with_rom(puzzles: usize) -> EditorSession {
        let mut session = EditorSession::new();
        session.rom = Some(PicrossRom::from_bytes(rom_image(puzzles), "fixture.gb"));
        session.puzzle = 1;
        session
    }

    #[test]
    fn test_paint_and_erase() {
        let mut session = session_with_rom(2);
        session.apply_tool(3, 4).unwrap();
        assert!(session.rom().unwrap().filled(1, 3, 4).unwrap());

        session.select_tool(Tool::Erase);
        session.apply_tool(3, 4).unwrap();
        assert!(!session.rom().unwrap().filled(1, 3, 4).unwrap());
    }

    #[test]
    fn test_demo_puzzle_is_locked() {
        let mut session = session_with_rom(2);
        session.select_puzzle(catalog::DEMO_PUZZLE);
        assert!(matches!(
            session.apply_tool(0, 0),
            Err(SessionError::EditLocked(0))
        ));
        assert!(matches!(
            session.resize(GridSize::Five),
            Err(SessionError::EditLocked(0))
        ));
        // The buffer stays untouched
        assert!(!session.rom().unwrap().filled(0, 0, 0).unwrap());
    }

    #[test]
    fn test_resize_writes_both_dimensions() {
        let mut session = session_with_rom(2);
        session.resize(GridSize::Ten).unwrap();
        let rom = session.rom().unwrap();
        assert_eq!(rom.width(1).unwrap(), 10);
        assert_eq!(rom.height(1).unwrap(), 10);
    }

    #[test]
    fn test_operations_require_a_rom() {
        let mut session = EditorSession::new();
        assert!(matches!(session.rom(), Err(SessionError::NoRom)));
        session.puzzle = 1;
        assert!(matches!(session.apply_tool(0, 0), Err(SessionError::NoRom)));
    }

    #[test]
    fn test_rom_errors_pass_through() {
        let mut session = session_with_rom(1);
        session.select_puzzle(5);
        assert!(matches!(
            session.apply_tool(0, 0),
            Err(SessionError::Rom(RomError::PuzzleOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_tool_serialization_matches_frontend() {
        assert_eq!(serde_json::to_string(&Tool::Paint).unwrap(), "\"paint\"");
        assert_eq!(
            serde_json::from_str::<Tool>("\"erase\"").unwrap(),
            Tool::Erase
        );
    }

    #[tokio::test]
    async fn test_open_save_round_trip() {
        let dir = std::env::temp_dir().join("picred_session_test");
        std::fs::create_dir_all(&dir).unwrap();
        let source = dir.join("roundtrip.gb");
        let image = rom_image(3);
        std::fs::write(&source, &image).unwrap();

        let mut session = EditorSession::new();
        session.open(&source).await.unwrap();
        assert_eq!(session.puzzle(), 1);
        assert_eq!(session.rom().unwrap().name(), "roundtrip.gb");

        // Untouched session exports the input bytes exactly
        let out_dir = dir.join("out");
        std::fs::create_dir_all(&out_dir).unwrap();
        let saved = session.save_to(&out_dir).await.unwrap();
        assert_eq!(saved, out_dir.join("roundtrip.gb"));
        assert_eq!(std::fs::read(&saved).unwrap(), image);

        // One edit, one changed byte on disk
        session.apply_tool(0, 0).unwrap();
        let saved = session.save_to(&out_dir).await.unwrap();
        let edited = std::fs::read(&saved).unwrap();
        let changed: Vec<usize> = (0..image.len()).filter(|&i| image[i] != edited[i]).collect();
        assert_eq!(changed, vec![PUZZLE_BASE + RECORD_SIZE]);
        assert_eq!(edited[PUZZLE_BASE + RECORD_SIZE], 0x80);
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let mut session = EditorSession::new();
        let result = session
            .open(Path::new("/nonexistent/picred/missing.gb"))
            .await;
        assert!(matches!(result, Err(SessionError::Load(_))));
        assert!(matches!(session.rom(), Err(SessionError::NoRom)));
    }

    #[tokio::test]
    async fn test_open_replaces_previous_rom() {
        let dir = std::env::temp_dir().join("picred_replace_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("second.gb");
        std::fs::write(&path, rom_image(2)).unwrap();

        let mut session = session_with_rom(2);
        session.apply_tool(0, 0).unwrap();
        session.select_puzzle(40);

        session.open(&path).await.unwrap();
        let rom = session.rom().unwrap();
        assert_eq!(rom.name(), "second.gb");
        // Prior edits are gone with the old buffer
        assert!(!rom.filled(1, 0, 0).unwrap());
        assert_eq!(session.puzzle(), 1);
    }
}
