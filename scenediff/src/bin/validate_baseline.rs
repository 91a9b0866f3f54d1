//! Quick baseline validation utility

use scenediff::assets::AssetDb;
use scenediff::store::BaselineStore;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (baseline_dir, scene_path) = match args.len() {
        3 => (args[1].as_str(), args[2].as_str()),
        _ => {
            eprintln!("usage: validate_baseline <baseline-dir> <scene-path>");
            std::process::exit(2);
        }
    };

    println!("Validating baseline for: {scene_path}");

    let assets = AssetDb::new();
    let store = BaselineStore::new(baseline_dir, &assets);

    match store.load(scene_path) {
        Some(record) => {
            println!("✓ Baseline record found");
            println!("  Scene GUID: {}", record.scene_guid);
            println!("  Scene path: {}", record.scene_path);
            println!("  Saved at:   {}", record.timestamp);

            match record.snapshot() {
                Ok(snapshot) => {
                    println!("✓ Snapshot payload parsed");
                    println!("  Node count: {}", snapshot.nodes.len());
                    let component_count: usize =
                        snapshot.nodes.iter().map(|n| n.components.len()).sum();
                    println!("  Component count: {component_count}");
                }
                Err(e) => {
                    eprintln!("✗ Snapshot payload unreadable: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            eprintln!("✗ No baseline recoverable for this scene");
            std::process::exit(1);
        }
    }
}
