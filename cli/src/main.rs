use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lineup_core::catalog::{
    AttackType, Catalog, CatalogData, Piece, QUALITY_DISPLAY_ORDER, Quality, RangeType, TagFilter,
    UtilityType, sort_for_display,
};
use lineup_core::planner::Planner;

#[derive(Parser)]
#[command(name = "lineup", version, about = "Formation planner for the lineup board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog pieces, optionally filtered by quality or tags.
    Pieces {
        #[arg(long, env = "LINEUP_DATA")]
        data: PathBuf,
        #[arg(long, value_parser = parse_quality)]
        quality: Option<Quality>,
        #[arg(long, value_parser = parse_attack)]
        attack: Option<AttackType>,
        #[arg(long, value_parser = parse_range)]
        range: Option<RangeType>,
        #[arg(long, value_parser = parse_utility)]
        utility: Option<UtilityType>,
    },
    /// Show the synergy panel for a layout code (empty board by default).
    Synergies {
        #[arg(long, env = "LINEUP_DATA")]
        data: PathBuf,
        #[arg(long)]
        layout: Option<String>,
    },
    /// Decode a layout code and render the board.
    Board {
        #[arg(long, env = "LINEUP_DATA")]
        data: PathBuf,
        #[arg(long)]
        layout: String,
    },
    /// Complete a synergy's missing pieces and print the new layout code.
    Fill {
        #[arg(long, env = "LINEUP_DATA")]
        data: PathBuf,
        #[arg(long)]
        layout: Option<String>,
        #[arg(long)]
        synergy: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pieces {
            data,
            quality,
            attack,
            range,
            utility,
        } => {
            let catalog = load_catalog(&data)?;
            let filter = TagFilter {
                attack,
                range,
                utility,
            };
            let qualities: Vec<Quality> = match quality {
                Some(quality) => vec![quality],
                None => QUALITY_DISPLAY_ORDER.to_vec(),
            };
            for quality in qualities {
                let mut group: Vec<&Piece> = catalog
                    .pieces_with_quality(quality)
                    .into_iter()
                    .filter(|piece| filter.matches(piece))
                    .collect();
                if group.is_empty() {
                    continue;
                }
                sort_for_display(&mut group);
                println!("{} ({})", quality, group.len());
                for piece in group {
                    println!("{:>3}  {:<24} {}", piece.id, piece.name, tag_summary(piece));
                }
            }
        }
        Commands::Synergies { data, layout } => {
            let planner = planner_with_layout(&data, layout.as_deref())?;
            print_panel(&planner);
        }
        Commands::Board { data, layout } => {
            let planner = planner_with_layout(&data, Some(&layout))?;
            print_board(&planner);
            println!();
            print_panel(&planner);
        }
        Commands::Fill {
            data,
            layout,
            synergy,
        } => {
            let mut planner = planner_with_layout(&data, layout.as_deref())?;
            let added = planner.auto_fill(&synergy)?;
            if added == 0 {
                eprintln!("synergy \"{synergy}\" is already complete");
            } else {
                eprintln!("added {added} pieces");
            }
            println!("{}", planner.export_layout());
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let catalog = Catalog::from_data(CatalogData::from_json(&raw)?);
    for warning in catalog.warnings() {
        eprintln!("catalog warning: {warning}");
    }
    Ok(catalog)
}

fn planner_with_layout(
    path: &Path,
    layout: Option<&str>,
) -> Result<Planner, Box<dyn std::error::Error>> {
    let catalog = load_catalog(path)?;
    let mut planner = Planner::new(catalog);
    if let Some(raw) = layout {
        let placed = planner.import_layout(raw)?;
        eprintln!(
            "imported {placed} pieces ({}/{} occupied)",
            planner.occupied_count(),
            planner.population_cap()
        );
    }
    Ok(planner)
}

fn print_panel(planner: &Planner) {
    for status in planner.synergy_panel() {
        let marker = if status.maxed {
            "**"
        } else if status.activated {
            " *"
        } else {
            "  "
        };
        println!(
            "{marker} {} ({}/{})",
            status.synergy.name, status.count, status.synergy.required_count
        );
    }
}

fn print_board(planner: &Planner) {
    let board = planner.board();
    let mut current_row = 0u8;
    let mut line = String::new();
    for (index, slot) in board.layout().slots().iter().enumerate() {
        if slot.row != current_row {
            if !line.is_empty() {
                println!("{}", line.trim_end());
            }
            line.clear();
            current_row = slot.row;
        }
        let cell = match board.occupant(index) {
            Some(piece) => format!("{:>3}", piece.id),
            None if slot.placeable => "  _".to_string(),
            None => "  .".to_string(),
        };
        line.push_str(&cell);
        line.push(' ');
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }

    println!();
    println!(
        "occupied: {}/{}",
        planner.occupied_count(),
        planner.population_cap()
    );
    let mut seen = BTreeSet::new();
    for occupant in board.occupants().iter().flatten() {
        if seen.insert(occupant.id) {
            println!("{:>3} = {}", occupant.id, occupant.name);
        }
    }
}

fn tag_summary(piece: &Piece) -> String {
    let mut tags: Vec<String> = Vec::new();
    if let Some(attack) = piece.attack {
        tags.push(attack.to_string());
    }
    if let Some(range) = piece.range {
        tags.push(range.to_string());
    }
    if let Some(utility) = piece.utility {
        tags.push(utility.to_string());
    }
    if !piece.synergies.is_empty() {
        tags.push(piece.synergies.join("/"));
    }
    tags.join(" ")
}

fn parse_quality(raw: &str) -> Result<Quality, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "gold" => Ok(Quality::Gold),
        "purple" => Ok(Quality::Purple),
        "blue" => Ok(Quality::Blue),
        other => Err(format!("unknown quality \"{other}\" (gold, purple, blue)")),
    }
}

fn parse_attack(raw: &str) -> Result<AttackType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "internal" => Ok(AttackType::Internal),
        "external" => Ok(AttackType::External),
        "no-attack" => Ok(AttackType::NoAttack),
        other => Err(format!(
            "unknown attack type \"{other}\" (internal, external, no-attack)"
        )),
    }
}

fn parse_range(raw: &str) -> Result<RangeType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "single" => Ok(RangeType::Single),
        "area" => Ok(RangeType::Area),
        other => Err(format!("unknown range type \"{other}\" (single, area)")),
    }
}

fn parse_utility(raw: &str) -> Result<UtilityType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "shield-break" => Ok(UtilityType::ShieldBreak),
        "control" => Ok(UtilityType::Control),
        "buff" => Ok(UtilityType::Buff),
        "dispel" => Ok(UtilityType::Dispel),
        "core" => Ok(UtilityType::Core),
        "coin" => Ok(UtilityType::Coin),
        other => Err(format!(
            "unknown utility type \"{other}\" (shield-break, control, buff, dispel, core, coin)"
        )),
    }
}
