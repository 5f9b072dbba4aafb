//! Package-level relationship resolution through the public pipeline
//!
//! - methods attach to their struct across files
//! - interface satisfaction and its ordering
//! - same-package references
//! - multi-file ordering and duplicate interfaces

use crate::common::TestProject;
use anyhow::Result;
use godocgen::{DocPipeline, EntityKind, PackageDocs, Settings};

fn parse(project: &TestProject, dir: &str) -> Result<PackageDocs> {
    let root = std::fs::canonicalize(project.path())?;
    let mut pipeline = DocPipeline::new(&Settings::default())?;
    Ok(pipeline.parse_package(&root, &root.join(dir))?)
}

#[test]
fn test_methods_attach_across_files() -> Result<()> {
    println!("\n=== Test: Methods Across Files ===");

    let project = TestProject::new();
    project.add_file(
        "geo/circle.go",
        "package geo\n\n// Circle is round.\ntype Circle struct{ R float64 }\n",
    );
    project.add_file(
        "geo/area.go",
        "package geo\n\n// Area of c.\nfunc (c Circle) Area() float64 { return c.R * c.R }\n",
    );
    project.add_file(
        "geo/shape.go",
        "package geo\n\ntype Shape interface{ Area() float64 }\n",
    );

    let docs = parse(&project, "geo")?;

    // files in name order: area.go, circle.go, shape.go
    let names: Vec<&str> = docs.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Circle", "Shape"]);

    let circle = docs.find("Circle").expect("Circle");
    assert_eq!(circle.methods.len(), 1);
    assert_eq!(circle.methods[0].name, "Area");
    assert_eq!(circle.implements.len(), 1);
    assert_eq!(circle.implements[0].interface_name, "Shape");
    assert_eq!(circle.implements[0].package, "geo");
    println!("  ✓ Circle.Area attached from area.go, Circle implements Shape");
    Ok(())
}

#[test]
fn test_implemented_interfaces_sorted() -> Result<()> {
    let project = TestProject::new();
    project.add_file(
        "io2/io.go",
        r#"package io2

type Writer interface{ Write(p []byte) (int, error) }
type Closer interface{ Close() error }
type Empty interface{}

type File struct{}

func (f File) Write(p []byte) (int, error) { return len(p), nil }
func (f File) Close() error { return nil }
"#,
    );

    let docs = parse(&project, "io2")?;
    let file = docs.find("File").expect("File");
    let names: Vec<&str> = file
        .implements
        .iter()
        .map(|i| i.interface_name.as_str())
        .collect();
    assert_eq!(names, vec!["Closer", "Empty", "Writer"]);
    Ok(())
}

#[test]
fn test_signature_change_breaks_satisfaction() -> Result<()> {
    let project = TestProject::new();
    project.add_file(
        "p/p.go",
        r#"package p

type Sizer interface{ Size(unit string) int64 }

type Blob struct{}

func (b Blob) Size(unit int) int64 { return 0 }
"#,
    );

    let docs = parse(&project, "p")?;
    assert!(docs.find("Blob").expect("Blob").implements.is_empty());
    Ok(())
}

#[test]
fn test_references_only_for_package_entities() -> Result<()> {
    println!("\n=== Test: References ===");

    let project = TestProject::new();
    project.add_file(
        "store/store.go",
        r#"package store

import "time"

type Key string

type Item struct {
	Key     Key
	Value   []byte
	Expires time.Time
}

type Store struct {
	items map[Key]Item
}

func (s Store) Get(k Key) (Item, bool) { return s.items[k], true }

func Open(path string) (*Store, error) { return nil, nil }
"#,
    );

    let docs = parse(&project, "store")?;

    let item = docs.find("Item").expect("Item");
    let refs: Vec<&str> = item.references.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(refs, vec!["Key"]);
    assert_eq!(item.references[0].package_path, "store");

    let store = docs.find("Store").expect("Store");
    assert!(store.references.is_empty(), "map types are not resolved");
    let get = &store.methods[0];
    let get_refs: Vec<&str> = get.references.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(get_refs, vec!["Key", "Item"]);

    let open = docs.find("Open").expect("Open");
    assert!(open.references.is_empty(), "pointer types are not resolved");
    println!("  ✓ Item -> Key, Store.Get -> Key, Item");
    Ok(())
}

#[test]
fn test_duplicate_interface_across_files() -> Result<()> {
    let project = TestProject::new();
    project.add_file("d/a.go", "package d\n\n// First.\ntype Runner interface{ Run() }\n");
    project.add_file("d/b.go", "package d\n\n// Second.\ntype Runner interface{ Run(); Stop() }\n");

    let docs = parse(&project, "d")?;
    let runners: Vec<_> = docs.entities_of(EntityKind::Interface).collect();
    assert_eq!(runners.len(), 1);
    assert_eq!(runners[0].description, "<p>First.</p>");
    Ok(())
}

#[test]
fn test_inspect_output_is_json() -> Result<()> {
    let project = TestProject::from_fixture("geometry");
    let docs = parse(&project, "shapes")?;
    let json = serde_json::to_value(&docs)?;

    assert_eq!(json["info"]["name"], "shapes");
    assert_eq!(json["info"]["url"], "shapes");
    let kinds: Vec<&str> = json["entities"]
        .as_array()
        .map(|a| a.iter().filter_map(|e| e["kind"].as_str()).collect())
        .unwrap_or_default();
    assert!(kinds.contains(&"interface"));
    assert!(kinds.contains(&"struct"));
    assert!(kinds.contains(&"function"));
    Ok(())
}
