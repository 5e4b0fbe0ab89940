use std::path::{Path, PathBuf};

use strictabc_core::config::StrictConfig;
use strictabc_enforce::engine::ContractEngine;
use strictabc_output::OutputFormatter;
use strictabc_parsers::python::extract_files;
use strictabc_parsers::walker::FileWalker;

/// Run `strictabc check [PATHS..]`: exit 0 when clean, 1 on findings,
/// 2 on operational errors.
pub fn run(formatter: &dyn OutputFormatter, verbose: bool, paths: Vec<String>) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strictabc check: failed to get current directory: {}", e);
            return 2;
        }
    };

    let config = StrictConfig::load_from_root(&cwd);
    let files = match collect_files(&cwd, &paths, &config) {
        Ok(f) => f,
        Err(missing) => {
            eprintln!("strictabc check: path not found: {}", missing);
            return 2;
        }
    };
    tracing::info!(files = files.len(), "checking");

    let mut engine = ContractEngine::with_config(&config);
    for parsed in extract_files(&files, &cwd, &config) {
        match parsed {
            Ok(file) => engine.register_file(&file.path, file.classes),
            Err(e) => {
                eprintln!("strictabc check: {}", e);
                return 2;
            }
        }
    }

    let result = engine.check();
    let output = formatter.format_check(&result);
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }

    if verbose {
        eprintln!(
            "strictabc check: {} file(s), {} class(es) checked, {} finding(s)",
            result.files_analyzed.len(),
            result.classes_checked,
            result.finding_count(),
        );
    }

    if result.is_clean() {
        0
    } else {
        1
    }
}

/// Python files under each path (the project root when none are given),
/// sorted and deduplicated. Returns the first missing path as an error.
fn collect_files(
    root: &Path,
    paths: &[String],
    config: &StrictConfig,
) -> Result<Vec<PathBuf>, String> {
    let targets: Vec<PathBuf> = if paths.is_empty() {
        vec![root.to_path_buf()]
    } else {
        paths.iter().map(|p| root.join(p)).collect()
    };

    let mut files = Vec::new();
    for target in &targets {
        if !target.exists() {
            return Err(target.display().to_string());
        }
        files.extend(
            FileWalker::new(target)
                .relative_to(root)
                .with_excludes(&config.ignore_patterns)
                .walk(),
        );
    }
    files.sort();
    files.dedup();
    Ok(files)
}
