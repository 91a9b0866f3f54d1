//! Command-line front end for the scene snapshot and diff toolkit
//!
//! Drives the core exactly the way the editor window of the original tool
//! did: save a baseline for a scene, compare the scene against it, export
//! the result. All user input validation lives here; the core never
//! prompts and never leaves partial state behind.

use clap::{Parser, Subcommand};
use scenediff::assets::AssetDb;
use scenediff::diff::{export, DiffFilter};
use scenediff::graph::{ComponentRegistry, SceneLibrary};
use scenediff::snapshot::SnapshotBuilder;
use scenediff::store::{BaselineStore, SaveOutcome};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "difftool", about = "Scene snapshot and diff tool")]
struct Cli {
    /// Project root containing scene files
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Baseline directory, relative to the project root
    #[arg(long, default_value = "SceneDiff/Baselines")]
    baseline_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save the current state of a scene as its baseline
    Save {
        /// Scene path relative to the project root
        scene: String,
        /// Replace an existing baseline without asking
        #[arg(long)]
        overwrite: bool,
    },
    /// Compare a scene against its saved baseline
    Compare {
        /// Scene path relative to the project root
        scene: String,
        /// Write the diff as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write the diff as Markdown to this file
        #[arg(long)]
        markdown: Option<PathBuf>,
        /// Case-insensitive search over paths, types, and properties
        #[arg(long)]
        filter: Option<String>,
        /// Only report changes under these tracked node paths
        #[arg(long)]
        track: Vec<String>,
        /// Match tracked paths exactly instead of including children
        #[arg(long)]
        exact: bool,
    },
    /// List all saved baselines
    List,
}

fn main() {
    scenediff::init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let assets = load_assets(&cli.project_root)?;
    let store = BaselineStore::new(cli.project_root.join(&cli.baseline_dir), &assets);
    let mut library = SceneLibrary::new(
        cli.project_root.clone(),
        ComponentRegistry::with_builtin_components(),
    );

    match cli.command {
        Command::Save { scene, overwrite } => {
            let builder = SnapshotBuilder::new(&assets);
            let snapshot = builder.build_for_scene_path(&mut library, &scene)?;

            match store.save(&scene, &snapshot, overwrite)? {
                SaveOutcome::Saved => println!("Baseline saved for {scene}"),
                SaveOutcome::AlreadyExists => {
                    return Err(format!(
                        "a baseline already exists for {scene}; pass --overwrite to replace it"
                    )
                    .into());
                }
            }
        }

        Command::Compare {
            scene,
            json,
            markdown,
            filter,
            track,
            exact,
        } => {
            // validate export targets before doing any work
            for target in [&json, &markdown].into_iter().flatten() {
                check_writable(target)?;
            }

            let Some(record) = store.load(&scene) else {
                return Err(format!(
                    "no baseline saved for {scene} yet; run `difftool save {scene}` first"
                )
                .into());
            };
            let baseline = record.snapshot()?;

            let builder = SnapshotBuilder::new(&assets);
            let current = builder.build_for_scene_path(&mut library, &scene)?;

            let result = scenediff::diff::diff(&baseline, &current);
            let diff_filter = DiffFilter {
                search: filter.unwrap_or_default(),
                tracked_paths: track,
                include_children: !exact,
            };
            let result = diff_filter.apply(&result);

            println!(
                "Added: {}   Removed: {}   Modified: {}",
                result.added.len(),
                result.removed.len(),
                result.modified.len()
            );

            let scene_name = scene_display_name(&scene);
            if json.is_none() && markdown.is_none() {
                print!("{}", export::to_markdown(&result, &scene_name));
            }
            if let Some(path) = json {
                fs::write(&path, export::to_json(&result)?)?;
                info!(path = ?path, "Wrote JSON export");
            }
            if let Some(path) = markdown {
                fs::write(&path, export::to_markdown(&result, &scene_name))?;
                info!(path = ?path, "Wrote Markdown export");
            }
        }

        Command::List => {
            let records = store.list();
            if records.is_empty() {
                println!("No baselines saved.");
            }
            for record in records {
                println!(
                    "{}  {}  (guid {})",
                    record.timestamp, record.scene_path, record.scene_guid
                );
            }
        }
    }

    Ok(())
}

fn load_assets(project_root: &Path) -> Result<AssetDb, Box<dyn Error>> {
    let manifest = project_root.join("asset_guids.json");
    if manifest.exists() {
        Ok(AssetDb::from_manifest(&manifest)?)
    } else {
        Ok(AssetDb::new())
    }
}

fn check_writable(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(format!("export directory does not exist: {}", parent.display()).into());
        }
    }
    Ok(())
}

fn scene_display_name(scene: &str) -> String {
    Path::new(scene)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| scene.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_display_name_strips_directory_and_extension() {
        assert_eq!(scene_display_name("scenes/demo.scene.json"), "demo.scene");
        assert_eq!(scene_display_name("demo"), "demo");
    }

    #[test]
    fn check_writable_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_writable(&dir.path().join("out.json")).is_ok());
        assert!(check_writable(Path::new("bare_name.json")).is_ok());
        assert!(check_writable(&dir.path().join("absent/out.json")).is_err());
    }

    #[test]
    fn missing_manifest_falls_back_to_empty_db() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_assets(dir.path()).is_ok());
    }
}
