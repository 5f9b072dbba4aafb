//! Declaration classification and per-kind entity extraction.

use super::format::{SnippetFormatter, format_type, receiver_key};
use super::parser::{Declaration, doc_comment, node_text};
use crate::parsing::DocSections;
use crate::symbol::{Entity, FieldInfo};
use crate::types::{EntityKind, PackageInfo};
use tera::escape_html;
use tree_sitter::Node;

/// Everything an extractor needs besides the declaration itself
pub struct ExtractContext<'a> {
    pub package: &'a PackageInfo,
    pub source: &'a str,
    pub formatter: &'a dyn SnippetFormatter,
}

impl ExtractContext<'_> {
    fn docs(&self, raw: &str) -> DocSections {
        DocSections::parse(raw, self.formatter)
    }
}

/// Turns one classified declaration into an entity.
pub trait EntityExtractor: Sync {
    fn kind(&self) -> EntityKind;

    /// `None` when the declaration is too incomplete to document (no name).
    fn extract(&self, decl: &Declaration, ctx: &ExtractContext) -> Option<Entity>;
}

pub struct FunctionExtractor;
pub struct MethodExtractor;
pub struct StructExtractor;
pub struct InterfaceExtractor;
pub struct TypeAliasExtractor;

/// Look up the extractor for a kind.
pub fn extractor_for(kind: EntityKind) -> &'static dyn EntityExtractor {
    match kind {
        EntityKind::Function => &FunctionExtractor,
        EntityKind::Method => &MethodExtractor,
        EntityKind::Struct => &StructExtractor,
        EntityKind::Interface => &InterfaceExtractor,
        EntityKind::TypeAlias => &TypeAliasExtractor,
    }
}

/// Entity kind of a declaration.
///
/// Type declarations are classified by the node kind of their underlying
/// type, so `type A = struct{...}` is a struct.
pub fn classify(decl: &Declaration) -> EntityKind {
    match decl {
        Declaration::Function(_) => EntityKind::Function,
        Declaration::Method(_) => EntityKind::Method,
        Declaration::Type { .. } => match decl.type_node().map(|n| n.kind()) {
            Some("struct_type") => EntityKind::Struct,
            Some("interface_type") => EntityKind::Interface,
            _ => EntityKind::TypeAlias,
        },
    }
}

/// Receiver key of a method declaration: `Circle` or `*Circle`.
pub fn method_receiver_key(decl: &Declaration, source: &str) -> Option<String> {
    let Declaration::Method(node) = decl else {
        return None;
    };
    let receiver = node.child_by_field_name("receiver")?;
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;
    let ty = param.child_by_field_name("type")?;
    Some(receiver_key(ty, source))
}

fn callable_entity(
    node: Node,
    kind: EntityKind,
    decl: &Declaration,
    ctx: &ExtractContext,
) -> Option<Entity> {
    let name = decl.name(ctx.source)?;
    let parameters = node
        .child_by_field_name("parameters")
        .map(|list| extract_parameters(list, ctx.source))
        .unwrap_or_default();
    let returns = extract_results(node.child_by_field_name("result"), ctx.source);
    let body = node
        .child_by_field_name("body")
        .map(|body| escape_html(node_text(body, ctx.source)))
        .unwrap_or_default();

    Some(
        Entity::new(name, kind, ctx.package)
            .with_docs(ctx.docs(&decl.doc(ctx.source)))
            .with_parameters(parameters)
            .with_returns(returns)
            .with_body(body),
    )
}

impl EntityExtractor for FunctionExtractor {
    fn kind(&self) -> EntityKind {
        EntityKind::Function
    }

    fn extract(&self, decl: &Declaration, ctx: &ExtractContext) -> Option<Entity> {
        callable_entity(decl.node(), self.kind(), decl, ctx)
    }
}

impl EntityExtractor for MethodExtractor {
    fn kind(&self) -> EntityKind {
        EntityKind::Method
    }

    fn extract(&self, decl: &Declaration, ctx: &ExtractContext) -> Option<Entity> {
        callable_entity(decl.node(), self.kind(), decl, ctx)
    }
}

impl EntityExtractor for StructExtractor {
    fn kind(&self) -> EntityKind {
        EntityKind::Struct
    }

    fn extract(&self, decl: &Declaration, ctx: &ExtractContext) -> Option<Entity> {
        let name = decl.name(ctx.source)?;
        let fields = decl
            .type_node()
            .map(|ty| extract_fields(ty, ctx.source))
            .unwrap_or_default();

        Some(
            Entity::new(name, self.kind(), ctx.package)
                .with_docs(ctx.docs(&decl.doc(ctx.source)))
                .with_fields(fields),
        )
    }
}

impl EntityExtractor for InterfaceExtractor {
    fn kind(&self) -> EntityKind {
        EntityKind::Interface
    }

    fn extract(&self, decl: &Declaration, ctx: &ExtractContext) -> Option<Entity> {
        let name = decl.name(ctx.source)?;
        let methods = decl
            .type_node()
            .map(|ty| extract_interface_methods(ty, ctx))
            .unwrap_or_default();

        Some(
            Entity::new(name, self.kind(), ctx.package)
                .with_docs(ctx.docs(&decl.doc(ctx.source)))
                .with_methods(methods),
        )
    }
}

impl EntityExtractor for TypeAliasExtractor {
    fn kind(&self) -> EntityKind {
        EntityKind::TypeAlias
    }

    fn extract(&self, decl: &Declaration, ctx: &ExtractContext) -> Option<Entity> {
        let name = decl.name(ctx.source)?;
        let body = decl
            .type_node()
            .map(|ty| escape_html(&format_type(ty, ctx.source)))
            .unwrap_or_default();

        Some(
            Entity::new(name, self.kind(), ctx.package)
                .with_docs(ctx.docs(&decl.doc(ctx.source)))
                .with_body(body),
        )
    }
}

/// `"name type"` per named parameter, `"type"` per unnamed one.
pub fn extract_parameters(list: Node, source: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut cursor = list.walk();

    for param in list.named_children(&mut cursor) {
        let variadic = match param.kind() {
            "parameter_declaration" => false,
            "variadic_parameter_declaration" => true,
            _ => continue,
        };

        let mut type_str = param
            .child_by_field_name("type")
            .map(|ty| format_type(ty, source))
            .unwrap_or_default();
        if variadic {
            type_str.insert_str(0, "...");
        }

        let mut name_cursor = param.walk();
        let names: Vec<&str> = param
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| node_text(n, source))
            .collect();

        if names.is_empty() {
            params.push(type_str);
        } else {
            params.extend(names.into_iter().map(|name| format!("{name} {type_str}")));
        }
    }

    params
}

/// Results use the parameter rules; a bare result type is one unnamed entry.
pub fn extract_results(result: Option<Node>, source: &str) -> Vec<String> {
    match result {
        Some(node) if node.kind() == "parameter_list" => extract_parameters(node, source),
        Some(node) => vec![format_type(node, source)],
        None => Vec::new(),
    }
}

/// One entry per field name. Embedded fields have no name and are skipped.
pub fn extract_fields(struct_type: Node, source: &str) -> Vec<FieldInfo> {
    let mut fields = Vec::new();
    let mut cursor = struct_type.walk();
    let Some(list) = struct_type
        .named_children(&mut cursor)
        .find(|n| n.kind() == "field_declaration_list")
    else {
        return fields;
    };

    let mut list_cursor = list.walk();
    for field in list.named_children(&mut list_cursor) {
        if field.kind() != "field_declaration" {
            continue;
        }

        let type_name = field
            .child_by_field_name("type")
            .map(|ty| format_type(ty, source))
            .unwrap_or_default();
        let tag = field
            .child_by_field_name("tag")
            .map(|tag| strip_tag_quotes(node_text(tag, source)).to_string())
            .unwrap_or_default();

        let mut name_cursor = field.walk();
        for name in field.children_by_field_name("name", &mut name_cursor) {
            fields.push(FieldInfo {
                name: node_text(name, source).to_string(),
                type_name: type_name.clone(),
                tag: tag.clone(),
            });
        }
    }

    fields
}

fn strip_tag_quotes(tag: &str) -> &str {
    for delimiter in ['`', '"'] {
        if let Some(inner) = tag
            .strip_prefix(delimiter)
            .and_then(|t| t.strip_suffix(delimiter))
        {
            return inner;
        }
    }
    tag
}

/// Method signatures of an interface, with their own doc comments.
pub fn extract_interface_methods(interface_type: Node, ctx: &ExtractContext) -> Vec<Entity> {
    let mut methods = Vec::new();
    let mut cursor = interface_type.walk();

    for elem in interface_type.named_children(&mut cursor) {
        if !matches!(elem.kind(), "method_elem" | "method_spec") {
            continue;
        }
        let Some(name) = elem.child_by_field_name("name") else {
            continue;
        };

        let parameters = elem
            .child_by_field_name("parameters")
            .map(|list| extract_parameters(list, ctx.source))
            .unwrap_or_default();
        let returns = extract_results(elem.child_by_field_name("result"), ctx.source);

        methods.push(
            Entity::new(node_text(name, ctx.source), EntityKind::Method, ctx.package)
                .with_docs(ctx.docs(&doc_comment(elem, ctx.source)))
                .with_parameters(parameters)
                .with_returns(returns),
        );
    }

    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::go::GoParser;
    use crate::parsing::go::format::VerbatimFormatter;
    use std::path::Path;

    fn extract_all(source: &str) -> (Vec<(EntityKind, Entity)>, Vec<Option<String>>) {
        let mut parser = GoParser::new().unwrap();
        let file = parser
            .parse(Path::new("shapes.go"), source.to_string())
            .unwrap();
        let package = PackageInfo::new("shapes", Path::new("/p/shapes"), Path::new("/p"));
        let ctx = ExtractContext {
            package: &package,
            source: file.source(),
            formatter: &VerbatimFormatter,
        };

        let mut entities = Vec::new();
        let mut receivers = Vec::new();
        for decl in file.declarations() {
            let kind = classify(&decl);
            let extractor = extractor_for(kind);
            assert_eq!(extractor.kind(), kind);
            receivers.push(method_receiver_key(&decl, file.source()));
            entities.push((kind, extractor.extract(&decl, &ctx).unwrap()));
        }
        (entities, receivers)
    }

    #[test]
    fn test_classification() {
        let source = r#"package shapes

type Point struct{ X, Y int }
type Shape interface{ Area() float64 }
type Celsius float64
type Alias = Point
type Pair[T any] struct{ A, B T }
func New() *Point { return nil }
func (p *Point) Move(dx int) {}
"#;
        let (entities, _) = extract_all(source);
        let kinds: Vec<EntityKind> = entities.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Struct,
                EntityKind::Interface,
                EntityKind::TypeAlias,
                EntityKind::TypeAlias,
                EntityKind::Struct,
                EntityKind::Function,
                EntityKind::Method,
            ]
        );

        assert_eq!(entities[2].1.body, "float64");
        assert_eq!(entities[3].1.body, "Point");
    }

    #[test]
    fn test_parameters_and_results() {
        let source = r#"package shapes

func Scale(s Shape, x, y float64, opts ...Option) (Shape, error) { return s, nil }
func Anon(int, string) bool { return true }
"#;
        let (entities, _) = extract_all(source);

        let scale = &entities[0].1;
        assert_eq!(
            scale.parameters,
            vec!["s Shape", "x float64", "y float64", "opts ...Option"]
        );
        assert_eq!(scale.returns, vec!["Shape", "error"]);

        let anon = &entities[1].1;
        assert_eq!(anon.parameters, vec!["int", "string"]);
        assert_eq!(anon.returns, vec!["bool"]);
    }

    #[test]
    fn test_fields_skip_embedded_and_strip_tags() {
        let source = r#"package shapes

type Circle struct {
	Point
	*Style
	Radius, Scale float64 `json:"radius"`
	Label string
}
"#;
        let (entities, _) = extract_all(source);
        let circle = &entities[0].1;

        let fields: Vec<(&str, &str, &str)> = circle
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.type_name.as_str(), f.tag.as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("Radius", "float64", "json:\"radius\""),
                ("Scale", "float64", "json:\"radius\""),
                ("Label", "string", ""),
            ]
        );
    }

    #[test]
    fn test_method_body_and_receiver_keys() {
        let source = r#"package shapes

func (c Circle) Area() float64 {
	return c.R * c.R
}

func (l *List[T]) Push(v T) {}
"#;
        let (entities, receivers) = extract_all(source);

        assert_eq!(receivers, vec![Some("Circle".to_string()), Some("*List".to_string())]);
        let area = &entities[0].1;
        assert_eq!(area.kind, EntityKind::Method);
        assert_eq!(area.body, "{\n\treturn c.R * c.R\n}");
        assert_eq!(area.returns, vec!["float64"]);
    }

    #[test]
    fn test_interface_methods_with_docs() {
        let source = r#"package shapes

// Shape is a closed figure.
type Shape interface {
	// Area in square units.
	Area() float64
	Scale(f float64) Shape
}
"#;
        let (entities, _) = extract_all(source);
        let shape = &entities[0].1;

        assert_eq!(shape.description, "<p>Shape is a closed figure.</p>");
        assert_eq!(shape.methods.len(), 2);
        assert_eq!(shape.methods[0].name, "Area");
        assert_eq!(shape.methods[0].description, "<p>Area in square units.</p>");
        assert!(shape.methods[0].body.is_empty());
        assert_eq!(shape.methods[1].parameters, vec!["f float64"]);
        assert_eq!(shape.methods[1].returns, vec!["Shape"]);
    }

    #[test]
    fn test_grouped_type_docs() {
        let source = r#"package shapes

// Units of measure.
type (
	// Meters is a length.
	Meters float64
	Feet float64
)
"#;
        let (entities, _) = extract_all(source);
        assert_eq!(entities[0].1.description, "<p>Meters is a length.</p>");
        assert_eq!(entities[1].1.description, "<p>Units of measure.</p>");
    }
}
