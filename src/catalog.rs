//! Level catalog
//!
//! Maps puzzle indices to the names the game presents. The table never
//! changes during a session, so it is precomputed once and shared: index 0
//! is the demo board, 1-64 the Easy Picross stages, 65-128 the Picross
//! stages, each group running 1-A through 8-H.

use serde::Serialize;
use std::sync::OnceLock;

/// Puzzle index of the demo board shown on the title screen.
///
/// The game hard-codes assumptions about this board, so the editor refuses
/// to modify it.
pub const DEMO_PUZZLE: usize = 0;

/// Which part of the game a level belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelGroup {
    Demo,
    Easy,
    Picross,
}

/// One selectable level
#[derive(Debug, Clone, Serialize)]
pub struct LevelEntry {
    pub index: usize,
    pub group: LevelGroup,
    pub label: String,
    pub editable: bool,
}

static CATALOG: OnceLock<Vec<LevelEntry>> = OnceLock::new();

/// All levels in puzzle-index order.
pub fn levels() -> &'static [LevelEntry] {
    CATALOG.get_or_init(build).as_slice()
}

/// Look up a level by puzzle index.
pub fn level(index: usize) -> Option<&'static LevelEntry> {
    levels().get(index)
}

/// Whether the editor allows modifying this puzzle.
pub fn is_editable(index: usize) -> bool {
    index != DEMO_PUZZLE
}

/// Stage names "1-A".."8-H", digit-major.
fn stage_names() -> impl Iterator<Item = String> {
    "12345678".chars().flat_map(|num| {
        "ABCDEFGH"
            .chars()
            .map(move |letter| format!("{}-{}", num, letter))
    })
}

fn build() -> Vec<LevelEntry> {
    let mut entries = Vec::with_capacity(129);
    entries.push(LevelEntry {
        index: DEMO_PUZZLE,
        group: LevelGroup::Demo,
        label: "Demo".to_string(),
        editable: false,
    });
    for (i, name) in stage_names().enumerate() {
        entries.push(LevelEntry {
            index: i + 1,
            group: LevelGroup::Easy,
            label: format!("Easy Picross: {}", name),
            editable: true,
        });
    }
    for (i, name) in stage_names().enumerate() {
        entries.push(LevelEntry {
            index: i + 65,
            group: LevelGroup::Picross,
            label: format!("Picross: {}", name),
            editable: true,
        });
    }
    entries
}
