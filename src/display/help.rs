//! Long help text shown after `godocgen --help`.

use crate::display::theme::Theme;
use console::style;

/// A styled section title followed by its lines, optionally indented.
pub fn format_help_section(title: &str, content: &str, indent: bool) -> String {
    let mut output = String::new();

    if Theme::should_disable_colors() {
        output.push_str(&format!("{title}\n"));
    } else {
        output.push_str(&format!("{}\n", style(title).cyan().bold()));
    }

    for line in content.lines() {
        if line.trim().is_empty() {
            output.push('\n');
        } else if indent && !line.starts_with("    ") {
            output.push_str(&format!("    {line}\n"));
        } else {
            output.push_str(&format!("{line}\n"));
        }
    }

    output
}

pub fn create_help_text() -> String {
    let mut help = String::new();

    let quick_start = r#"$ godocgen                   # Document the current module into ./dist
$ godocgen ./myproject --dest site
$ godocgen init              # Write .godocgen/settings.toml"#;
    help.push_str(&format_help_section("QUICK START", quick_start, true));
    help.push('\n');

    let examples = r#"# Custom title and README for the index page
$ godocgen --title "My API" --readme docs/INTRO.md

# Skip the go tool and walk the tree instead
$ godocgen --discovery walk

# Format examples with gofmt
$ godocgen --formatter gofmt

# Look at what one package yields
$ godocgen inspect pkg/shapes | jq '.data.entities[].name'

# Machine-readable run summary
$ godocgen --json --quiet"#;
    help.push_str(&format_help_section("EXAMPLES", examples, true));
    help.push('\n');

    let environment = r#"GODOCGEN_OUTPUT_DIR=site        Same as output_dir in settings.toml
GODOCGEN_PARSING__FORMATTER=none Nested keys use a double underscore
RUST_LOG=godocgen=debug          Log filter when --debug is not given"#;
    help.push_str(&format_help_section("ENVIRONMENT", environment, true));

    help
}
