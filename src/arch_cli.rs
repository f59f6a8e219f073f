//! diagram / scan subcommands

use arch::{aggregate_dependencies, build_tree, edge_count, PlantUmlGenerator};
use clap::{Args, Subcommand};
use source::{collect_records, ScanConfig, SourceRecord, SourceWalker};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ArchCommands {
    /// Generate a PlantUML package/class diagram
    Diagram {
        #[command(flatten)]
        scan: ScanArgs,
        /// Ignore imports starting with this prefix (repeatable)
        #[arg(short, long = "ignore")]
        ignore: Vec<String>,
        /// Include package dependency edges
        #[arg(short, long)]
        deps: bool,
        /// Diagram title
        #[arg(long)]
        title: Option<String>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List extracted records
    Scan {
        #[command(flatten)]
        scan: ScanArgs,
        /// JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// Source root
    path: String,
    /// File name pattern (default: *.java, or PLUME_PATTERN)
    #[arg(short, long)]
    pattern: Option<String>,
    /// Skip directories with this name (repeatable)
    #[arg(short, long = "exclude")]
    exclude: Vec<String>,
}

impl ScanArgs {
    /// CLI flags override the environment
    fn config(&self) -> ScanConfig {
        let mut config = ScanConfig::from_env();
        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
        }
        if !self.exclude.is_empty() {
            config.excludes = self.exclude.clone();
        }
        config
    }
}

pub fn run(cmd: ArchCommands) -> anyhow::Result<()> {
    match cmd {
        ArchCommands::Diagram { scan, ignore, deps, title, output } => {
            let mut config = scan.config();
            if !ignore.is_empty() {
                config.ignored_prefixes = ignore;
            }
            config.dependencies |= deps;
            cmd_diagram(&scan.path, &config, title.as_deref(), output.as_deref())
        }
        ArchCommands::Scan { scan, json } => {
            let config = scan.config();
            cmd_scan(&scan.path, &config, json)
        }
    }
}

fn scan_records(path: &str, config: &ScanConfig) -> anyhow::Result<Vec<SourceRecord>> {
    let project_path = PathBuf::from(path).canonicalize()?;
    eprintln!("Scanning: {}", project_path.display());

    let walker = SourceWalker::new(&project_path)
        .with_pattern(&config.pattern)
        .with_excludes(&config.excludes);
    let records = collect_records(&walker)?;

    eprintln!("Found {} files", records.len());
    Ok(records)
}

// ==================== Diagram ====================

fn cmd_diagram(path: &str, config: &ScanConfig, title: Option<&str>, output: Option<&str>) -> anyhow::Result<()> {
    let records = scan_records(path, config)?;

    let deps = if config.dependencies {
        let deps = aggregate_dependencies(&records, config.ignored_prefixes.as_slice());
        eprintln!("Aggregated {} package dependencies", edge_count(&deps));
        Some(deps)
    } else {
        None
    };

    let tree = build_tree(records);

    let mut generator = PlantUmlGenerator::new();
    if let Some(title) = title {
        generator = generator.with_title(title);
    }
    let body = generator.render(&tree, deps.as_ref());

    match output {
        Some(file) => {
            let mut out = BufWriter::new(File::create(file)?);
            generator.write_document(&mut out, &body)?;
            out.flush()?;
            eprintln!("Saved to: {}", file);
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            generator.write_document(&mut out, &body)?;
            out.flush()?;
        }
    }

    Ok(())
}

// ==================== Scan ====================

fn cmd_scan(path: &str, config: &ScanConfig, json: bool) -> anyhow::Result<()> {
    let records = scan_records(path, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}", record.qualified_name());
            for dependency in &record.dependencies {
                println!("    -> {}", dependency);
            }
        }
    }

    Ok(())
}
