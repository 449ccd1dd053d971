use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use campaign_matrix::Engine;

#[derive(Parser)]
#[command(name = "campaign-matrix")]
#[command(about = "Build campaign co-occurrence matrices or clean campaign names from tabular exports")]
#[command(version)]
struct Cli {
    /// Normalize campaign names instead of building the co-occurrence matrix
    #[arg(long)]
    clean_names: bool,

    /// Directory receiving the output artifacts
    #[arg(long, default_value = "outputs")]
    out_dir: PathBuf,

    /// Source files to process (csv, tsv, xlsx, xlsm)
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();

    let cli = Cli::parse();

    if let Err(err) = fs::create_dir_all(&cli.out_dir) {
        error!(error = %err, out_dir = %cli.out_dir.display(), "Failed to create output dir");
        process::exit(1);
    }

    let engine = Engine::default_config();
    let mut failures = 0usize;

    // One unit of work per file; a failure never aborts the rest of the batch.
    for path in &cli.files {
        match process_one(&engine, cli.clean_names, path, &cli.out_dir) {
            Ok(name) => info!(file = %path.display(), output = %name, "processed"),
            Err(err) => {
                error!(file = %path.display(), error = %err, "processing failed");
                failures += 1;
            }
        }
    }

    if failures == cli.files.len() {
        process::exit(1);
    }
}

fn process_one(
    engine: &Engine,
    clean_names: bool,
    path: &Path,
    out_dir: &Path,
) -> Result<String, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("invalid file name: {}", path.display()))?;

    let output = if clean_names {
        engine.process_campaign_names(&bytes, filename)?
    } else {
        engine.process_cooccurrence(&bytes, filename)?
    };

    fs::write(out_dir.join(&output.name), &output.bytes)?;
    Ok(output.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_matrix_operation() {
        let cli = Cli::try_parse_from(["campaign-matrix", "leads.csv"]).unwrap();
        assert!(!cli.clean_names);
        assert_eq!(cli.out_dir, PathBuf::from("outputs"));
        assert_eq!(cli.files, vec![PathBuf::from("leads.csv")]);
    }

    #[test]
    fn test_flags_and_multiple_files() {
        let cli = Cli::try_parse_from([
            "campaign-matrix",
            "--clean-names",
            "--out-dir",
            "cleaned",
            "a.csv",
            "b.xlsx",
        ])
        .unwrap();
        assert!(cli.clean_names);
        assert_eq!(cli.out_dir, PathBuf::from("cleaned"));
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_missing_files_is_a_usage_error() {
        assert!(Cli::try_parse_from(["campaign-matrix"]).is_err());
        assert!(Cli::try_parse_from(["campaign-matrix", "--out-dir"]).is_err());
    }
}
