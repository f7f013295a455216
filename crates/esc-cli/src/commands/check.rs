use std::path::Path;

use esc_core::PuzzleKind;

pub fn run(rooms: &Path) -> Result<(), String> {
    let parsed = super::load_parsed(rooms)?;
    let level = &parsed.level;

    let puzzles = level
        .objects()
        .iter()
        .filter(|o| o.facet.kind != PuzzleKind::None)
        .count();

    if parsed.diagnostics.is_empty() {
        println!("  All checks passed for '{}'.", rooms.display());
    } else {
        println!("  '{}' loaded with warnings.", rooms.display());
    }
    println!(
        "  {} rooms, {} objects, {} puzzles, {} items",
        level.room_count(),
        level.object_count(),
        puzzles,
        level.item_granting_count()
    );

    Ok(())
}
