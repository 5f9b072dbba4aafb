//! Per-package symbol table
//!
//! Built in one pass over a package's parsed files. Owns the maps the
//! relationship resolver reads; nothing here outlives the package.

use crate::parsing::go::extractors::{ExtractContext, classify, extractor_for, method_receiver_key};
use crate::parsing::go::{ParsedFile, SnippetFormatter};
use crate::parsing::Import;
use crate::symbol::Entity;
use crate::types::{EntityKind, PackageInfo};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Name index entry (`package.Name` -> provenance)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedEntity {
    pub name: String,
    pub kind: EntityKind,
    pub package: String,
    pub package_url: String,
    pub package_path: String,
}

impl IndexedEntity {
    fn from_entity(entity: &Entity) -> Self {
        Self {
            name: entity.name.clone(),
            kind: entity.kind,
            package: entity.package.clone(),
            package_url: entity.package_url.clone(),
            package_path: entity.package_path.clone(),
        }
    }
}

#[derive(Debug)]
pub struct SymbolTable {
    pub package: PackageInfo,
    /// Non-method entities in file order, then source order
    pub entities: Vec<Entity>,
    pub imports: Vec<Import>,
    /// First declaration per interface name
    pub interfaces: BTreeMap<String, Entity>,
    /// Methods keyed by receiver type (`Circle`, `*Circle`)
    pub methods_by_receiver: HashMap<String, Vec<Entity>>,
    /// `package.Name` for every non-method entity
    pub index: HashMap<String, IndexedEntity>,
}

impl SymbolTable {
    pub fn new(package: PackageInfo) -> Self {
        Self {
            package,
            entities: Vec::new(),
            imports: Vec::new(),
            interfaces: BTreeMap::new(),
            methods_by_receiver: HashMap::new(),
            index: HashMap::new(),
        }
    }

    /// Build the table from files already sorted by name.
    pub fn build(
        package: PackageInfo,
        files: &[ParsedFile],
        formatter: &dyn SnippetFormatter,
    ) -> Self {
        let mut table = SymbolTable::new(package);

        for file in files {
            table.imports.extend(file.imports());

            let package = table.package.clone();
            let ctx = ExtractContext {
                package: &package,
                source: file.source(),
                formatter,
            };

            for decl in file.declarations() {
                let kind = classify(&decl);
                let Some(entity) = extractor_for(kind).extract(&decl, &ctx) else {
                    debug!("skipping unnamed {kind} in {}", file.path.display());
                    continue;
                };

                if kind == EntityKind::Method {
                    match method_receiver_key(&decl, file.source()) {
                        Some(receiver) => table.add_method(receiver, entity),
                        None => debug!("method {} has no receiver type", entity.name),
                    }
                } else {
                    table.add_entity(entity);
                }
            }
        }

        debug!(
            "package {}: {} entities, {} interfaces, {} receiver types, {} imports",
            table.package.name,
            table.entities.len(),
            table.interfaces.len(),
            table.methods_by_receiver.len(),
            table.imports.len()
        );
        table
    }

    pub fn add_method(&mut self, receiver: String, method: Entity) {
        self.methods_by_receiver
            .entry(receiver)
            .or_default()
            .push(method);
    }

    /// Add a non-method entity. A repeated interface name is ignored; the
    /// first declaration wins.
    pub fn add_entity(&mut self, entity: Entity) {
        if entity.kind == EntityKind::Interface {
            if self.interfaces.contains_key(&entity.name) {
                debug!("duplicate interface {} ignored", entity.name);
                return;
            }
            self.interfaces.insert(entity.name.clone(), entity.clone());
        }

        self.index.insert(
            self.package.qualify(&entity.name),
            IndexedEntity::from_entity(&entity),
        );
        self.entities.push(entity);
    }

    /// Look up `package.token` in the name index.
    pub fn lookup(&self, package: &str, token: &str) -> Option<&IndexedEntity> {
        self.index.get(&format!("{package}.{token}"))
    }
}
