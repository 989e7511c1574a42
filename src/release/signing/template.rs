//! Gradle signing hook template.

/// Applied from `app/build.gradle`. Reads credentials from the generated
/// properties file in the Android root and assigns the release signing config.
pub const HOOK_TEMPLATE: &str = r#"// Generated by fund_release. Do not edit; re-run the configure step instead.
def releaseSigningProps = new Properties()
def releaseSigningFile = rootProject.file('{{properties_file}}')
if (releaseSigningFile.exists()) {
    releaseSigningFile.withInputStream { releaseSigningProps.load(it) }
}

android {
    signingConfigs {
        release {
            if (releaseSigningFile.exists()) {
                storeFile file(releaseSigningProps['{{store_file_key}}'])
                storePassword releaseSigningProps['{{store_password_key}}']
                keyAlias releaseSigningProps['{{key_alias_key}}']
                keyPassword releaseSigningProps['{{key_password_key}}']
            }
        }
    }
    buildTypes {
        release {
            if (releaseSigningFile.exists()) {
                signingConfig signingConfigs.release
            }
        }
    }
}
"#;
