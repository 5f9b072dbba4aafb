//! Settings file lifecycle: `init` template, editing, loading, and the
//! effect of loaded settings on generation.

use crate::common::TestProject;
use anyhow::Result;
use godocgen::config::{CONFIG_DIR, CONFIG_FILE, DiscoveryMode, FormatterKind};
use godocgen::{Settings, SiteBuilder};

#[test]
fn test_init_then_load() -> Result<()> {
    println!("\n=== Test: Init Then Load ===");

    let project = TestProject::new();
    let path = Settings::init_config_file_in(&project.path(), false)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    assert_eq!(path, project.path().join(CONFIG_DIR).join(CONFIG_FILE));

    let settings = Settings::load_from(&path)?;
    assert_eq!(settings.discovery.mode, DiscoveryMode::Auto);
    assert_eq!(settings.parsing.formatter, FormatterKind::Builtin);
    println!("  ✓ template loads as defaults");

    let again = Settings::init_config_file_in(&project.path(), false);
    assert!(again.is_err(), "second init without force must fail");
    assert!(Settings::init_config_file_in(&project.path(), true).is_ok());
    Ok(())
}

#[test]
fn test_loaded_settings_drive_generation() -> Result<()> {
    let project = TestProject::from_fixture("geometry");
    let config = project.add_file(
        ".godocgen/settings.toml",
        r#"title = "From Settings"

[discovery]
mode = "walk"
ignore_dirs = ["vendor", "cmd"]

[render]
copy_assets = false
"#,
    );

    let mut settings = Settings::load_from(&config)?;
    settings.output_dir = project.output_dir();

    let builder = SiteBuilder::new(&settings, &project.path())?;
    let report = builder.build(&builder.discover()?, |_| {})?;

    assert_eq!(report.title, "From Settings");
    assert_eq!(report.stats.packages_documented, 2);
    assert!(!project.output_dir().join("cmd-geo.html").exists());
    assert!(!project.output_dir().join("static").exists());
    assert!(project.read_output("index.html").contains("From Settings"));
    Ok(())
}
