//! PyInstaller invocation for the desktop bundle.

use super::DesktopSettings;
use crate::release::{
    pipeline::CommandSpec,
    toolchain::Tool,
};
use std::path::{Path, PathBuf};

/// Project directories bundled as data under the same relative name.
const DATA_DIRS: &[&str] = &["app", "config", "data", "services", "storage"];

/// Packages whose data files and submodules PyInstaller cannot discover.
const COLLECT_ALL: &[&str] = &[
    "streamlit", "pydeck", "altair", "plotly", "pandas", "numpy", "pyarrow",
];

/// Modules imported dynamically by the Streamlit pages.
const HIDDEN_IMPORTS: &[&str] = &[
    "streamlit.web.cli",
    "services.portfolio_service",
    "services.watchlist_service",
    "services.estimation_service",
    "services.intraday_service",
    "services.settlement_service",
    "services.snapshot_service",
    "services.history_service",
    "services.adjustment_service",
    "services.accuracy_service",
    "services.edit_bridge_service",
    "services.fund_service",
];

const COLLECT_SUBMODULES: &[&str] = &["services", "storage"];

/// Separator PyInstaller expects inside `--add-data`.
fn data_separator() -> char {
    if cfg!(windows) { ';' } else { ':' }
}

/// Entry script of the desktop launcher.
pub fn entry_script(project_dir: &Path) -> PathBuf {
    project_dir.join("scripts").join("run_desktop.py")
}

/// One-dir bundle produced by PyInstaller.
pub fn bundle_dir(project_dir: &Path, settings: &DesktopSettings) -> PathBuf {
    project_dir.join("dist").join(&settings.product_name)
}

/// Build the PyInstaller command line.
///
/// Data directories that do not exist are left out with a warning.
pub fn pyinstaller_command(project_dir: &Path, settings: &DesktopSettings) -> CommandSpec {
    let dist = project_dir.join("dist");
    let work = project_dir.join("build").join("pyinstaller");

    let mut cmd = CommandSpec::tool(Tool::Python, project_dir)
        .args(["-m", "PyInstaller", "--noconfirm", "--name"])
        .arg(settings.product_name.as_str())
        .args(["--windowed", "--log-level", "WARN", "--distpath"])
        .arg(dist.to_string_lossy())
        .arg("--workpath")
        .arg(work.to_string_lossy())
        .arg("--specpath")
        .arg(project_dir.to_string_lossy())
        .arg("--paths")
        .arg(project_dir.to_string_lossy())
        .arg("--onedir");

    if settings.clean {
        cmd = cmd.arg("--clean");
    }

    for dir in DATA_DIRS {
        let src = project_dir.join(dir);
        if !src.is_dir() {
            log::warn!("Skipping missing data directory: {}", src.display());
            continue;
        }
        cmd = cmd
            .arg("--add-data")
            .arg(format!("{}{}{}", src.display(), data_separator(), dir));
    }
    for pkg in COLLECT_ALL {
        cmd = cmd.arg("--collect-all").arg(*pkg);
    }
    for module in HIDDEN_IMPORTS {
        cmd = cmd.arg("--hidden-import").arg(*module);
    }
    for pkg in COLLECT_SUBMODULES {
        cmd = cmd.arg("--collect-submodules").arg(*pkg);
    }

    cmd.arg(entry_script(project_dir).to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_includes_existing_data_dirs_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("app")).unwrap();
        std::fs::create_dir_all(dir.path().join("services")).unwrap();

        let cmd = pyinstaller_command(dir.path(), &DesktopSettings::default());
        let add_data: Vec<_> = cmd
            .args
            .windows(2)
            .filter(|w| w[0] == "--add-data")
            .map(|w| w[1].clone())
            .collect();

        assert_eq!(add_data.len(), 2);
        assert!(add_data[0].ends_with(&format!("{}app", data_separator())));
        assert!(add_data[1].ends_with(&format!("{}services", data_separator())));
        assert!(cmd.args.contains(&"--onedir".to_string()));
        assert!(!cmd.args.contains(&"--clean".to_string()));
        assert!(cmd.args.last().unwrap().ends_with("run_desktop.py"));
    }
}
