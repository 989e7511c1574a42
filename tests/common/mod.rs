//! Shared fixtures: a throwaway wrapper project and a recording runner.

#![allow(dead_code)]

use fund_release::release::{
    Result,
    config::{Secret, SigningCredentials},
    pipeline::{ArtifactSelection, CommandRunner, CommandSpec, PipelineRequest},
    toolchain::{CandidateSource, ToolchainCandidate},
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Minimal wrapper project with a keystore and a fake SDK directory.
pub struct Project {
    pub dir: TempDir,
    pub keystore: PathBuf,
    pub sdk: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name":"fund-estimator"}"#).unwrap();

        let keystore = dir.path().join("release.jks");
        std::fs::write(&keystore, b"not really a keystore").unwrap();

        let sdk = dir.path().join("sdk");
        std::fs::create_dir_all(&sdk).unwrap();

        Self { dir, keystore, sdk }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn android(&self) -> PathBuf {
        self.root().join("android")
    }

    pub fn credentials(&self) -> SigningCredentials {
        SigningCredentials {
            keystore_path: self.keystore.clone(),
            store_password: Secret::new("store-secret"),
            key_alias: "release".to_string(),
            key_password: Secret::new("key-secret"),
        }
    }

    pub fn sdk_candidates(&self) -> Vec<ToolchainCandidate> {
        vec![
            ToolchainCandidate {
                source: CandidateSource::EnvVar("ANDROID_HOME"),
                path: Some(self.sdk.clone()),
            },
            ToolchainCandidate {
                source: CandidateSource::EnvVar("ANDROID_SDK_ROOT"),
                path: None,
            },
        ]
    }

    pub fn request(&self, artifacts: ArtifactSelection) -> PipelineRequest {
        let mut request = PipelineRequest::new(self.root(), artifacts, self.credentials());
        request.sdk_candidates = self.sdk_candidates();
        request
    }
}

/// Records every command and imitates the side effects of the real tools.
#[derive(Default)]
pub struct FakeRunner {
    calls: Mutex<Vec<String>>,
    /// Exit with this code when a command line contains the needle
    fail_on: Option<(&'static str, i32)>,
    /// Skip writing outputs of commands containing the needle, though they "succeed"
    omit_outputs: Option<&'static str>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(needle: &'static str, code: i32) -> Self {
        Self {
            fail_on: Some((needle, code)),
            ..Self::default()
        }
    }

    pub fn without_outputs() -> Self {
        Self::without_outputs_for("")
    }

    pub fn without_outputs_for(needle: &'static str) -> Self {
        Self {
            omit_outputs: Some(needle),
            ..Self::default()
        }
    }

    /// Invocations as `"<args...>"`, without the platform-specific program name.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ran(&self, needle: &str) -> bool {
        self.calls().iter().any(|c| c.contains(needle))
    }

    fn simulate(&self, command: &CommandSpec) {
        let line = command.args.join(" ");
        let writes_outputs = self.omit_outputs.is_none_or(|needle| !line.contains(needle));
        let args: Vec<&str> = command.args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["install"] => std::fs::create_dir_all(command.cwd.join("node_modules")).unwrap(),
            ["cap", "add", "android"] => {
                let app = command.cwd.join("android/app");
                std::fs::create_dir_all(&app).unwrap();
                std::fs::write(
                    app.join("build.gradle"),
                    "apply plugin: 'com.android.application'\n\nandroid {\n}\n",
                )
                .unwrap();
            }
            ["assembleRelease"] if writes_outputs => {
                write_output(&command.cwd.join("app/build/outputs/apk/release/app-release.apk"))
            }
            ["bundleRelease"] if writes_outputs => {
                write_output(&command.cwd.join("app/build/outputs/bundle/release/app-release.aab"))
            }
            ["-m", "PyInstaller", ..] if writes_outputs => {
                let dist = value_after(&args, "--distpath");
                let name = value_after(&args, "--name");
                write_output(&Path::new(dist).join(name).join(format!("{name}.exe")));
            }
            ["-V3", ..] if writes_outputs => {
                let output = args
                    .iter()
                    .find_map(|a| a.strip_prefix("-DOUTPUT_FILE="))
                    .unwrap();
                write_output(Path::new(output));
            }
            _ => {}
        }
    }
}

fn value_after<'a>(args: &[&'a str], flag: &str) -> &'a str {
    let at = args.iter().position(|a| *a == flag).unwrap();
    args[at + 1]
}

fn write_output(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"PK\x03\x04 release").unwrap();
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &CommandSpec) -> Result<i32> {
        let line = command.args.join(" ");
        self.calls.lock().unwrap().push(line.clone());

        if let Some((needle, code)) = self.fail_on {
            if line.contains(needle) {
                return Ok(code);
            }
        }

        self.simulate(command);
        Ok(0)
    }
}
