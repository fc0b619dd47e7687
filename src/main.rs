use anyhow::{bail, Context, Result};
use idol_catalog::{
    catalog::{Catalog, CatalogPaths, SKILL_VIEW_TABLES, TEAM_VIEW_TABLES},
    cli::{Cli, Commands},
    config::{default_log_dir, Config},
    images::FsImageStore,
    logging, render,
    schema::{TableKind, ALL_TABLES},
    ui,
    writer::export_catalog,
    Selection,
};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    if matches!(cli.command, Commands::Browse) {
        logging::init_file(default_log_dir().as_deref());
    } else {
        logging::init_stderr();
    }

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let paths = config.paths()?;
    let images = FsImageStore::new(config.image_root());

    match cli.command {
        Commands::Skills {
            skill,
            category,
            duration,
            name,
            json,
        } => {
            let catalog = load(&paths, SKILL_VIEW_TABLES)?;
            let selection = Selection {
                skills: skill,
                categories: category,
                durations: duration,
                names: name,
            };
            let groups = catalog.skill_groups(&selection);
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                print!("{}", render::to_plain_text(&render::skill_view(&groups, &images)));
            }
        }

        Commands::Teams { song, json } => {
            let catalog = load(&paths, TEAM_VIEW_TABLES)?;
            let presets = catalog.ideal_teams(&song);
            if json {
                println!("{}", serde_json::to_string_pretty(&presets)?);
            } else {
                print!("{}", render::to_plain_text(&render::team_view(&presets, &images)));
            }
        }

        Commands::SkillInfo { skill } => {
            let catalog = load(&paths, &[TableKind::Skills])?;
            let detail = catalog.skill_detail(&skill);
            print!("{}", render::to_plain_text(&render::detail_view(&skill, detail.as_ref())));
        }

        Commands::Options { json } => {
            let catalog = load(&paths, &[])?;
            let options = catalog.options();
            let songs = catalog.song_options();
            if json {
                let value = serde_json::json!({
                    "skills": options.skills,
                    "categories": options.categories,
                    "durations": options.durations,
                    "names": options.names,
                    "songs": songs,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                let durations: Vec<String> = options.durations.iter().map(u32::to_string).collect();
                println!("Skills:     {}", options.skills.join(", "));
                println!("Categories: {}", options.categories.join(", "));
                println!("Durations:  {}", durations.join(", "));
                println!("Names:      {}", options.names.join(", "));
                println!("Songs:      {}", songs.join(", "));
            }
        }

        Commands::Browse => {
            let catalog = load(&paths, &[])?;
            ui::run(&catalog, &images)?;
        }

        Commands::Export { output_db } => {
            let start = Instant::now();
            let catalog = load(&paths, &[])?;

            println!("Exporting to SQLite...");
            let record_count = export_catalog(&catalog, &output_db)?;

            let elapsed = start.elapsed();
            println!(
                "\nCreated {:?} ({} records) in {:.1}s",
                output_db,
                record_count,
                elapsed.as_secs_f64()
            );
        }

        Commands::ListTables => {
            println!("Available tables:\n");
            for schema in ALL_TABLES {
                println!("  {:<12} {}", schema.name, paths.path(schema.kind).display());
            }
        }
    }

    Ok(())
}

/// Load the catalog, failing if any of `required` could not be read
fn load(paths: &CatalogPaths, required: &[TableKind]) -> Result<Catalog> {
    let catalog = Catalog::load(paths);
    if let Err(e) = catalog.require(required) {
        bail!("Cannot show this view: {}", e);
    }

    let skipped = catalog.skipped_rows().len();
    if skipped > 0 {
        tracing::warn!(skipped, "Some rows were malformed and skipped");
    }
    Ok(catalog)
}
