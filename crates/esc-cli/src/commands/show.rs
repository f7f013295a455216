use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(rooms: &Path, json: bool) -> Result<(), String> {
    let level = super::load_level(rooms)?;

    if json {
        let out = serde_json::to_string_pretty(&level).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    for (index, room) in level.rooms().iter().enumerate() {
        println!(
            "  {} {}",
            format!("Room {}:", index + 1).dimmed(),
            room.name.bold()
        );
        if !room.description.trim().is_empty() {
            println!("  {}", room.description);
        }

        let objects = level.objects_in(index).map_err(|e| e.to_string())?;
        if objects.is_empty() {
            println!("  (no objects)");
            println!();
            continue;
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["#", "Object", "Puzzle", "Item"]);
        for (n, object) in objects.iter().enumerate() {
            let item = if object.facet.grants_item() {
                object.facet.item_name.as_str()
            } else {
                "-"
            };
            table.add_row(vec![
                (n + 1).to_string(),
                object.name.clone(),
                object.facet.kind.to_string(),
                item.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    println!(
        "  {} rooms, {} objects",
        level.room_count(),
        level.object_count()
    );
    Ok(())
}
