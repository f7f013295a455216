use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use esc_engine::format_time;

pub fn run(scores: &Path, limit: usize) -> Result<(), String> {
    let records = esc_save::read_high_scores(scores).map_err(|e| e.to_string())?;

    if records.is_empty() {
        println!("  No high scores yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rank", "Name", "Score", "Time", "Difficulty", "Hints"]);

    for (rank, record) in records.iter().take(limit).enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            record.name.clone(),
            record.score.to_string(),
            format_time(record.elapsed_secs),
            record.difficulty.to_string(),
            record.hints_used.to_string(),
        ]);
    }

    println!("{table}");
    if records.len() > limit {
        println!();
        println!("  showing {} of {} scores", limit, records.len());
    }

    Ok(())
}
