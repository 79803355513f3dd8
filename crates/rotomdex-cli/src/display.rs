//! Text rendering for derived views and entity detail cards.

use std::sync::Arc;

use rotomdex_core::{EntityRecord, MoveRecord, View, generation_of};

const MAX_LIST_ITEMS: usize = 12;

/// Print a derived view: count line first, then one row per entry with its
/// annotation marker and generation label.
pub fn print_view<F>(view: &View, flags: F)
where
    F: Fn(u32) -> (bool, bool),
{
    println!("{}", view.count_label());
    if view.entries.is_empty() {
        if view.is_filtered() {
            println!("no entries match the active filters");
        }
        return;
    }

    for entry in &view.entries {
        let (seen, caught) = flags(entry.id);
        let marker = if caught {
            "C"
        } else if seen {
            "S"
        } else {
            " "
        };
        println!(
            "{marker} #{:03}  {:<24} {}",
            entry.id,
            entry.name,
            generation_label(entry.id)
        );
    }
}

/// Print a single entity as a vertical card grouped by section.
pub fn print_entity_card(
    record: &EntityRecord,
    moves: &[(String, Arc<MoveRecord>)],
    encounters: Option<&[String]>,
    evolution: Option<&[String]>,
) {
    println!("=== #{:03} {} ===", record.id, record.name);
    println!(
        "{} | {:.1} m | {:.1} kg | base xp {}",
        generation_label(record.id),
        record.height_m(),
        record.weight_kg(),
        record
            .base_experience
            .map(|xp| xp.to_string())
            .unwrap_or_else(|| "-".into()),
    );
    println!();

    print_name_list("Types", &record.types);
    print_name_list("Abilities", &record.abilities);

    let gallery = record.sprites.gallery();
    if !gallery.is_empty() {
        println!("Sprites");
        for url in gallery {
            println!("  {url}");
        }
        println!();
    }
    if let Some(cry) = &record.cry {
        println!("Cry");
        println!("  {cry}");
        println!();
    }

    if !moves.is_empty() {
        println!("Moves ({} of {})", moves.len(), record.moves.len());
        for (name, mv) in moves {
            print_move_line(name, mv);
        }
        println!();
    }

    if let Some(areas) = encounters {
        print_capped_list("Encounters", areas);
    }
    if let Some(chain) = evolution {
        if !chain.is_empty() {
            println!("Evolution");
            println!("  {}", chain.join(" -> "));
            println!();
        }
    }
}

/// Print per-generation `(seen, caught)` tallies.
pub fn print_tallies(tallies: &[(&'static str, usize, usize)]) {
    println!("{:<6} {:>6} {:>6}", "gen", "seen", "caught");
    for (name, seen, caught) in tallies {
        println!("{:<6} {:>6} {:>6}", name, seen, caught);
    }
}

fn generation_label(id: u32) -> String {
    match generation_of(id) {
        Some(generation) => format!("Gen {}", generation.name),
        None => "-".into(),
    }
}

fn print_name_list(header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{header}");
    println!("  {}", items.join(", "));
    println!();
}

fn print_capped_list(header: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{} ({})", header, items.len());
    for item in items.iter().take(MAX_LIST_ITEMS) {
        println!("  {item}");
    }
    if items.len() > MAX_LIST_ITEMS {
        println!("  ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
    println!();
}

fn print_move_line(fallback_name: &str, mv: &MoveRecord) {
    // A failed lookup yields the empty sentinel; fall back to the name the
    // entity record carries.
    let name = if mv.name.is_empty() { fallback_name } else { &mv.name };
    print!("  {:<18}", name);
    if !mv.type_name.is_empty() {
        print!("  {:<10}", mv.type_name);
    }
    print!(
        "  pow {:>3}  acc {:>3}  pp {:>2}",
        opt(mv.power),
        opt(mv.accuracy),
        opt(mv.pp)
    );
    println!();
    if !mv.effect_text.is_empty() {
        let effect = if mv.effect_text.len() > 80 {
            format!("{}...", &mv.effect_text[..77])
        } else {
            mv.effect_text.clone()
        };
        println!("      {effect}");
    }
}

fn opt(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
