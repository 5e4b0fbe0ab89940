use std::fs;
use std::path::Path;

use strictabc_core::config::{StrictConfig, CONFIG_DIR, CONFIG_FILE};
use strictabc_parsers::walker::IGNORE_FILE;

const IGNORE_TEMPLATE: &str = "\
# Paths skipped by `strictabc check` (gitignore syntax)
.venv/
venv/
build/
dist/
";

/// Run `strictabc init`: write the default config and ignore file.
pub fn run(verbose: bool, force: bool) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strictabc init: failed to get current directory: {}", e);
            return 2;
        }
    };

    let config_dir = cwd.join(CONFIG_DIR);
    if config_dir.join(CONFIG_FILE).exists() && !force {
        eprintln!(
            "strictabc init: {}/{} already exists (use --force to overwrite)",
            CONFIG_DIR, CONFIG_FILE
        );
        return 2;
    }

    let path = match StrictConfig::default().save(&config_dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("strictabc init: {}", e);
            return 2;
        }
    };

    create_ignore_file(&cwd, verbose);

    if verbose {
        eprintln!("strictabc init: wrote {}", path.display());
    }
    0
}

/// Write `.strictabcignore` unless one already exists.
fn create_ignore_file(root: &Path, verbose: bool) {
    let path = root.join(IGNORE_FILE);
    if path.exists() {
        return;
    }
    match fs::write(&path, IGNORE_TEMPLATE) {
        Ok(()) if verbose => eprintln!("strictabc init: created {}", IGNORE_FILE),
        Ok(()) => {}
        Err(e) => tracing::warn!(error = %e, "failed to create {}", IGNORE_FILE),
    }
}
