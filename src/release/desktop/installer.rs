//! NSIS installer script generation and makensis invocation.
//!
//! Generates the NSI script from the Handlebars template and builds the
//! command that compiles it into a setup executable.

use super::{DesktopSettings, template::NSI_TEMPLATE, utils};
use crate::release::{
    error::{Context, Result},
    pipeline::CommandSpec,
    toolchain::Tool,
};
use handlebars::Handlebars;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Writable-data override honoured by the desktop app.
pub const DATA_HOME_ENV: &str = "FUND_ESTIMATOR_HOME";

/// Directory holding the generated script.
pub fn installer_dir(project_dir: &Path) -> PathBuf {
    project_dir.join("dist").join("installer")
}

/// Path of the compiled setup executable.
pub fn installer_path(project_dir: &Path, settings: &DesktopSettings) -> PathBuf {
    project_dir.join("dist").join(format!(
        "{}_{}-setup.exe",
        settings.product_name, settings.version
    ))
}

/// Render the NSI script for `bundle_dir`.
pub fn render_nsi_script(settings: &DesktopSettings, bundle_dir: &Path) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let mut data = BTreeMap::new();
    data.insert("product_name", settings.product_name.clone());
    data.insert("display_name", settings.display_name.clone());
    data.insert("version", settings.version.clone());
    data.insert("version_nsis", utils::format_version_for_nsis(&settings.version));
    data.insert("publisher", settings.publisher.clone());
    data.insert("main_exe", format!("{}.exe", settings.product_name));
    data.insert("bundle_dir", utils::nsis_path(bundle_dir));
    data.insert("compression", "lzma".to_string());
    data.insert(
        "data_dir_hint",
        format!("$LOCALAPPDATA\\{} unless {DATA_HOME_ENV} is set", settings.product_name),
    );
    if let Some(icon) = &settings.installer_icon {
        data.insert("installer_icon", utils::nsis_path(icon));
    }

    handlebars
        .register_template_string("installer.nsi", NSI_TEMPLATE)
        .context("failed to register NSI template")?;

    Ok(handlebars.render("installer.nsi", &data)?)
}

/// Write `installer.nsi` (UTF-8 with BOM) and return its path.
pub async fn generate_nsi_script(
    project_dir: &Path,
    settings: &DesktopSettings,
    bundle_dir: &Path,
) -> Result<PathBuf> {
    let content = render_nsi_script(settings, bundle_dir)?;
    let nsi_path = installer_dir(project_dir).join("installer.nsi");
    utils::write_utf8_bom(&nsi_path, &content).await?;
    log::info!("Generated installer script {}", nsi_path.display());
    Ok(nsi_path)
}

/// makensis command compiling `nsi_path` into `output_path`.
pub fn makensis_command(nsi_path: &Path, output_path: &Path, cwd: &Path) -> CommandSpec {
    CommandSpec::tool(Tool::Makensis, cwd)
        .args([
            "-V3", // Verbosity level 3
            "-INPUTCHARSET",
            "UTF8",
            "-OUTPUTCHARSET",
            "UTF8",
        ])
        .arg(format!("-DOUTPUT_FILE={}", output_path.display()))
        .arg(nsi_path.to_string_lossy())
}
