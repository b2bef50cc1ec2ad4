use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use log::info;
use phx::AssemblyOptions;
use phx_wufi_xml::{WriteOptions, WriteReport};

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// HBJSON model to convert
    #[arg(value_name = "SOURCE", value_hint = clap::ValueHint::FilePath)]
    pub source: PathBuf,

    /// File name of the XML project, without extension
    #[arg(value_name = "BASE_NAME")]
    pub base_name: String,

    /// Directory to write into; created if missing
    #[arg(value_name = "TARGET_DIR", default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub target_dir: PathBuf,

    /// Skip the timestamped copy when the primary file could be written
    #[arg(long)]
    pub no_copy: bool,
}

impl ConvertArgs {
    pub fn target_path(&self) -> PathBuf {
        let base = self.base_name.strip_suffix(".xml").unwrap_or(&self.base_name);
        self.target_dir.join(format!("{base}.xml"))
    }
}

pub fn execute(args: &ConvertArgs) -> Result<()> {
    let report = convert(args)?;
    print_report(&report, &args.target_path());
    Ok(())
}

/// Read, assemble and write. Returns where the XML ended up.
pub fn convert(args: &ConvertArgs) -> Result<WriteReport> {
    println!(
        "{} {}",
        "Converting".cyan().bold(),
        args.source.display().to_string().bold()
    );

    let model = phx::read_hbjson_file(&args.source)
        .with_context(|| format!("Failed to read {}", args.source.display()))?;
    let project = phx::convert_hbjson_model(&model, &AssemblyOptions::default())
        .with_context(|| format!("Failed to convert {}", args.source.display()))?;
    info!("Assembled {} variant(s)", project.variants.len());

    let target = args.target_path();
    let options = WriteOptions {
        timestamped_copy: !args.no_copy,
    };
    phx_wufi_xml::write_project(&project, &target, &options)
        .with_context(|| format!("Failed to write {}", target.display()))
}

fn print_report(report: &WriteReport, target: &Path) {
    if report.target_was_locked() {
        eprintln!(
            "{} {} is locked by another program; wrote a copy instead.",
            "Warning:".yellow().bold(),
            target.display()
        );
    } else if let Some(primary) = &report.primary {
        println!("{} Wrote {}", "✓".green(), primary.display());
    }
    if let Some(copy) = &report.copy {
        println!("{} Wrote {}", "✓".green(), copy.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../phx/tests/data")
            .join(name)
    }

    fn args(source: PathBuf, target_dir: &Path, no_copy: bool) -> ConvertArgs {
        ConvertArgs {
            source,
            base_name: "house".into(),
            target_dir: target_dir.to_path_buf(),
            no_copy,
        }
    }

    #[test]
    fn base_name_gets_one_xml_extension() {
        let mut a = args(PathBuf::from("m.hbjson"), Path::new("out"), false);
        assert_eq!(a.target_path(), Path::new("out").join("house.xml"));
        a.base_name = "house.xml".into();
        assert_eq!(a.target_path(), Path::new("out").join("house.xml"));
    }

    #[test]
    fn converts_into_a_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target_dir = dir.path().join("nested");
        let report = convert(&args(fixture("single_zone.hbjson"), &target_dir, true)).unwrap();

        let primary = report.primary.unwrap();
        assert_eq!(primary, target_dir.join("house.xml"));
        assert!(report.copy.is_none());
        let xml = std::fs::read_to_string(primary).unwrap();
        assert!(xml.contains("<WUFIplusProject>"));
    }

    #[test]
    fn timestamped_copy_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let report = convert(&args(fixture("single_zone.hbjson"), dir.path(), false)).unwrap();
        let copy = report.copy.unwrap();
        assert!(copy.exists());
        assert_ne!(Some(copy), report.primary);
    }

    #[test]
    fn missing_source_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert(&args(dir.path().join("nope.hbjson"), dir.path(), true)).unwrap_err();
        assert!(err.to_string().contains("nope.hbjson"));
    }
}
