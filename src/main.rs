use anyhow::{bail, Context, Result};
use rowdump::{
    count_by_type, count_by_user_and_type, partition, render_type_counts, render_user_counts,
    DumpPlan, Exporter, MemorySource,
};
use std::env;
use std::path::Path;

const USAGE: &str = "usage:
  rowdump export <plan.json>
  rowdump count <dir>
  rowdump count-per-user <dir>
  rowdump partition <dir> <user_id>";

fn main() -> Result<()> {
    rowdump::init_tracing_once();
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("export") => {
            let plan_path = args.get(1).context(USAGE)?;
            let plan = DumpPlan::from_json_file(Path::new(plan_path))
                .with_context(|| format!("loading plan {}", plan_path))?;
            let source = MemorySource::from_json_file(&plan.tables)
                .with_context(|| format!("loading tables {}", plan.tables.display()))?;

            let summary = Exporter::new()
                .export_root(&plan.export_root)
                .clean(plan.clean)
                .policies(plan.policies.clone())
                .export(&source, &plan.configs)?;

            for (name, units) in &summary.completed {
                println!("{}: {} unit(s)", name, units);
            }
            if !summary.is_clean() {
                for (name, err) in &summary.failed {
                    eprintln!("{}: {}", name, err);
                }
                bail!("{} dump(s) failed", summary.failed.len());
            }
        }
        Some("count") => {
            let dir = args.get(1).context(USAGE)?;
            let counts = count_by_type(Path::new(dir))?;
            println!("Number of Records:");
            println!("{}", dir);
            print!("{}", render_type_counts(&counts));
        }
        Some("count-per-user") => {
            let dir = args.get(1).context(USAGE)?;
            let per_user = count_by_user_and_type(Path::new(dir), "user")?;
            println!("Number of Records Per User:");
            println!("{}", dir);
            print!("{}", render_user_counts(&per_user));
        }
        Some("partition") => {
            let dir = args.get(1).context(USAGE)?;
            let user_id: i64 = args
                .get(2)
                .context(USAGE)?
                .parse()
                .context("user_id must be an integer")?;
            let user_dir = partition(Path::new(dir), user_id)?;
            println!("Partitioned into {}", user_dir.display());
        }
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
