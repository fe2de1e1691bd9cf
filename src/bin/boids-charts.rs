use anyhow::{Context, Result};
use boids_charts::batch::{PlannedChart, render_planned, split_planned};
use boids_charts::storage::{self, Manifest};
use boids_charts::{ChartSpec, ImageFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "boids-charts",
    version,
    about = "Render boids benchmark timings and speedups as charts"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every chart of a manifest (or the built-in runs) into a directory.
    Render(RenderArgs),
    /// Print the file name each chart would be written to.
    List(SourceArgs),
    /// Print the built-in runs as a JSON manifest.
    Dump,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Png,
    Svg,
}

impl From<OutFormat> for ImageFormat {
    fn from(f: OutFormat) -> Self {
        match f {
            OutFormat::Png => ImageFormat::Png,
            OutFormat::Svg => ImageFormat::Svg,
        }
    }
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// JSON manifest to read instead of the built-in benchmark runs.
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Directory the images are written to (created if missing).
    #[arg(short, long, default_value = "py_out")]
    out_dir: PathBuf,
    /// Image format; overrides the format given in the manifest.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Also write each chart's data as CSV next to the image.
    #[arg(long, default_value_t = false)]
    tables: bool,
}

fn load_specs(source: &SourceArgs) -> Result<Vec<PlannedChart>> {
    let manifest = match source.manifest.as_ref() {
        Some(path) => storage::load_manifest(path)
            .with_context(|| format!("reading manifest {}", path.display()))?,
        None => Manifest::builtin(),
    };
    Ok(manifest.into_specs())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::List(args) => cmd_list(args),
        Command::Dump => cmd_dump(),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut planned = load_specs(&args.source)?;
    if let Some(fmt) = args.format {
        let format: ImageFormat = fmt.into();
        for chart in &mut planned {
            match chart {
                Ok(spec) => spec.format = format,
                Err(failure) => {
                    failure.file_name = Path::new(&failure.file_name)
                        .with_extension(format.extension())
                        .to_string_lossy()
                        .into_owned();
                }
            }
        }
    }
    let specs: Vec<ChartSpec> = planned
        .iter()
        .filter_map(|c| c.as_ref().ok())
        .cloned()
        .collect();

    let report = render_planned(planned, &args.out_dir);
    eprintln!(
        "Wrote {} chart(s) to {}",
        report.written.len(),
        args.out_dir.display()
    );

    if args.tables {
        for spec in &specs {
            let image = args.out_dir.join(spec.file_name());
            if report.written.contains(&image) {
                write_table(spec, &image)?;
            }
        }
    }

    if !report.is_success() {
        for f in &report.failures {
            eprintln!("failed: {} ({}): {}", f.title, f.file_name, f.error);
        }
        anyhow::bail!("{} chart(s) failed", report.failures.len());
    }
    Ok(())
}

fn write_table(spec: &ChartSpec, image: &Path) -> Result<()> {
    let table = image.with_extension("csv");
    storage::save_table_csv(spec, &table)
        .with_context(|| format!("writing table {}", table.display()))
}

fn cmd_list(args: SourceArgs) -> Result<()> {
    let (specs, failures) = split_planned(load_specs(&args)?);
    for spec in specs {
        println!("{}", spec.file_name());
    }
    for f in &failures {
        eprintln!("skipped: {} ({}): {}", f.title, f.file_name, f.error);
    }
    Ok(())
}

fn cmd_dump() -> Result<()> {
    let json = serde_json::to_string_pretty(&Manifest::builtin())?;
    println!("{json}");
    Ok(())
}
