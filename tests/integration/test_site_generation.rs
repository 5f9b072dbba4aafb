//! End-to-end site generation over the geometry fixture
//!
//! - package discovery skips vendor/, _-prefixed and test-only directories
//! - one page per package plus index.html and static/style.css
//! - index groups packages by first path segment and renders the README
//! - a syntax error anywhere fails the run

use crate::common::TestProject;
use anyhow::Result;
use godocgen::{DocError, SiteBuilder};

#[test]
fn test_geometry_site() -> Result<()> {
    println!("\n=== Test: Geometry Site ===");

    let project = TestProject::from_fixture("geometry");
    let settings = project.settings();
    let builder = SiteBuilder::new(&settings, &project.path())?;
    assert_eq!(builder.title(), "project");

    let packages = builder.discover()?;
    let relative: Vec<String> = packages
        .iter()
        .map(|p| {
            p.strip_prefix(builder.project_root())
                .map(|r| r.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default()
        })
        .collect();
    assert_eq!(relative, vec!["cmd/geo", "shapes", "units"]);
    println!("  ✓ discovered {relative:?}");

    let mut seen = Vec::new();
    let report = builder.build(&packages, |summary| seen.push(summary.path.clone()))?;
    assert_eq!(seen, vec!["cmd/geo", "shapes", "units"]);
    assert_eq!(report.stats.packages_documented, 3);
    assert_eq!(report.stats.pages_written, 4);

    for page in ["cmd-geo.html", "shapes.html", "units.html", "index.html", "static/style.css"] {
        assert!(project.output_dir().join(page).exists(), "{page} missing");
    }
    println!("  ✓ pages written to {}", report.output_dir.display());

    let shapes = report
        .stats
        .packages
        .iter()
        .find(|p| p.path == "shapes")
        .expect("shapes summary");
    assert_eq!(
        (shapes.functions, shapes.structs, shapes.interfaces),
        (1, 3, 1)
    );

    Ok(())
}

#[test]
fn test_package_page_content() -> Result<()> {
    println!("\n=== Test: Package Page Content ===");

    let project = TestProject::from_fixture("geometry");
    let settings = project.settings();
    let builder = SiteBuilder::new(&settings, &project.path())?;
    builder.build(&builder.discover()?, |_| {})?;

    let shapes = project.read_output("shapes.html");
    assert!(shapes.contains(r#"id="Circle""#));
    assert!(shapes.contains(r#"id="Square""#));
    assert!(shapes.contains(r#"id="Shape""#));
    assert!(shapes.contains(r##"href="#Shape""##), "Circle should link its interface");
    assert!(shapes.contains(r##"href="shapes.html#Point""##), "Circle.Center references Point");
    assert!(shapes.contains("<p>Circle is a round Shape.</p>"));
    assert!(shapes.contains("c := Circle{Radius: 2}"));
    assert!(shapes.contains("example.com"), "imports are listed");
    assert!(!shapes.contains("TestArea"), "test files are skipped");
    assert!(
        !shapes.contains(r#"id="Square.Grow""#),
        "pointer methods hidden when value methods exist"
    );
    println!("  ✓ shapes.html has structs, interface links and references");

    let units = project.read_output("units.html");
    assert!(units.contains(r#"id="types""#));
    assert!(units.contains("Deprecated:"));
    assert!(units.contains("<p>Use Meters.</p>"));
    assert!(!units.contains(r#"id="structs""#));
    println!("  ✓ units.html has types and deprecation notes");

    Ok(())
}

#[test]
fn test_index_page() -> Result<()> {
    let project = TestProject::from_fixture("geometry");
    let mut settings = project.settings();
    settings.title = Some("Geometry Docs".to_string());
    let builder = SiteBuilder::new(&settings, &project.path())?;
    builder.build(&builder.discover()?, |_| {})?;

    let index = project.read_output("index.html");
    assert!(index.contains("<title>Geometry Docs</title>"));
    assert!(index.contains(r#"href="cmd-geo.html""#));
    assert!(index.contains(r#"href="shapes.html""#));
    assert!(index.contains("3 packages"));

    // README rendered with classes, relative image dropped
    assert!(index.contains(r#"<h1 class="md-h1">Geometry</h1>"#));
    assert!(index.contains("<strong>plane geometry</strong>"));
    assert!(!index.contains("docs/diagram.png"));
    assert!(index.contains(r#"target="_blank""#));

    let cmd = index.find(r#"href="cmd-geo.html""#).unwrap_or(usize::MAX);
    let shapes = index.find(r#"href="shapes.html""#).unwrap_or(0);
    assert!(cmd < shapes, "groups are sorted");
    Ok(())
}

#[test]
fn test_include_tests_documents_test_files() -> Result<()> {
    let project = TestProject::from_fixture("geometry");
    let mut settings = project.settings();
    settings.parsing.include_tests = true;
    let builder = SiteBuilder::new(&settings, &project.path())?;
    builder.build(&builder.discover()?, |_| {})?;

    assert!(project.read_output("shapes.html").contains("TestArea"));
    Ok(())
}

#[test]
fn test_default_readme_when_missing() -> Result<()> {
    let project = TestProject::new();
    project.add_file("lib/lib.go", "package lib\n\nfunc Hello() string { return \"hi\" }\n");

    let settings = project.settings();
    let builder = SiteBuilder::new(&settings, &project.path())?;
    builder.build(&builder.discover()?, |_| {})?;

    assert!(project.read_output("index.html").contains("Welcome to the Documentation"));
    Ok(())
}

#[test]
fn test_syntax_error_fails_run() -> Result<()> {
    println!("\n=== Test: Syntax Error Fails Run ===");

    let project = TestProject::new();
    project.add_file("a/a.go", "package a\n\nfunc A() {}\n");
    project.add_file("b/b.go", "package b\n\nfunc B( {\n");

    let settings = project.settings();
    let builder = SiteBuilder::new(&settings, &project.path())?;
    let packages = builder.discover()?;

    match builder.build(&packages, |_| {}) {
        Err(DocError::ParseError { package, path, .. }) => {
            assert_eq!(package, "b");
            assert!(path.ends_with("b.go"));
            println!("  ✓ run aborted in package {package}");
        }
        Err(other) => anyhow::bail!("expected parse error, got {other}"),
        Ok(_) => anyhow::bail!("run succeeded despite a syntax error"),
    }
    assert!(!project.output_dir().join("index.html").exists());
    Ok(())
}

#[test]
fn test_stale_output_removed() -> Result<()> {
    let project = TestProject::from_fixture("geometry");
    std::fs::create_dir_all(project.output_dir())?;
    std::fs::write(project.output_dir().join("old.html"), "stale")?;

    let settings = project.settings();
    let builder = SiteBuilder::new(&settings, &project.path())?;
    builder.build(&builder.discover()?, |_| {})?;

    assert!(!project.output_dir().join("old.html").exists());
    Ok(())
}
