//! End-to-end formatting scenarios.

use openscad_ast::span::CodeFile;
use openscad_format::{format_source, FormattingConfiguration};

const SAMPLE: &str = r#"// Header comment
include <lib/utils.scad>
use <lib/shapes.scad>;

$fn = 32;
size = [10, 20, 30]; // dims

module box(size = [1, 1, 1], center = false) {
    translate([0, 0, 0]) cube(size, center = center);
}

function area(w, h) = w * h;

/* a block
   comment */
union() {
    box(size);
    translate([10, 20, 30]) rotate([0, 0, 45]) scale([2, 2, 2]) sphere(5);
    for (i = [0:2:10]) translate([i, 0, 0]) cube(1);
}
points = [for (i = [0:3]) if (i % 2 == 0) i * 2 else -i];
"#;

const MESSY: &str = "x=1;y  =  [1,2,\n3];module m(a,b=2){if(a>b)cube(a);else{sphere(b);}}\nm(1,b=3);";

fn format(source: &str) -> String {
    format_source(source, &FormattingConfiguration::default()).unwrap()
}

/// Rebuild `source` with a `/*mN*/` marker in front of every token.
fn inject_markers(source: &str) -> (String, usize) {
    let file = CodeFile::new("<markers>", source);
    let tokens = openscad_parser::lex(&file).unwrap();
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        for extra in &token.extra_tokens {
            out.push_str(extra.text());
        }
        out.push_str(&format!("/*m{i}*/"));
        out.push_str(token.lexeme());
    }
    (out, tokens.len())
}

fn assert_markers_kept(source: &str) {
    let (injected, count) = inject_markers(source);
    let out = format(&injected);
    for i in 0..count {
        let marker = format!("/*m{i}*/");
        assert_eq!(out.matches(&marker).count(), 1, "marker {marker} in:\n{out}");
    }
}

#[test]
fn test_empty_module_body_has_no_space_before_semicolon() {
    let out = format("module asdf();");
    assert!(!out.contains(") ;"), "{out}");
}

#[test]
fn test_sample_is_idempotent() {
    let once = format(SAMPLE);
    assert_eq!(format(&once), once);
}

#[test]
fn test_messy_source_is_normalized_and_idempotent() {
    let once = format(MESSY);
    assert_eq!(
        once,
        "x = 1;\ny = [1, 2,\n    3];\nmodule m(a, b = 2) {\n    if (a > b) cube(a); else {\n        sphere(b);\n    }\n}\nm(1, b = 3);\n"
    );
    assert_eq!(format(&once), once);
}

#[test]
fn test_sample_keeps_comments() {
    let out = format(SAMPLE);
    assert!(out.starts_with("// Header comment\ninclude <lib/utils.scad>\n"));
    assert!(out.contains("size = [10, 20, 30]; // dims\n"));
    assert!(out.contains("/* a block\n   comment */\nunion() {"));
}

#[test]
fn test_sample_breaks_long_chains() {
    let out = format(SAMPLE);
    assert!(out.contains(
        "    translate([10, 20, 30])\n        rotate([0, 0, 45])\n            scale([2, 2, 2])\n                sphere(5);\n"
    ));
    assert!(out.contains("    translate([0, 0, 0])\n        cube(size, center = center);\n"));
    assert!(format("translate([1, 0, 0]) cube(2);").contains("translate([1, 0, 0]) cube(2);"));
}

#[test]
fn test_markers_survive_sample() {
    assert_markers_kept(SAMPLE);
}

#[test]
fn test_markers_survive_messy_source() {
    assert_markers_kept(MESSY);
}

#[test]
fn test_markers_survive_useless_commas() {
    assert_markers_kept("cube(,,10,,center=true,,);\nv = [1,,2,,];\nw = [,,];");
}

#[test]
fn test_markers_survive_expressions() {
    assert_markers_kept(
        "f = function (x) let (y = x * 2) assert(y > 0) echo(y) y;\n\
         v = [for (i = 0; i < 3; i = i + 1) each [i, -i]];\n\
         r = a.b[0](1) ? !c : [0:1:9];\n\
         module m() {}\n",
    );
}

#[test]
fn test_definitions_only_strips_bodies() {
    let config = FormattingConfiguration {
        definitions_only: true,
        ..FormattingConfiguration::default()
    };
    let out = format_source(SAMPLE, &config).unwrap();
    assert!(out.contains("module box(size = [1, 1, 1], center = false);\n"));
    assert!(out.contains("function area(w, h);\n"));
    assert!(!out.contains("cube(size"));
}

#[test]
fn test_debug_newlines_name_every_break() {
    let config = FormattingConfiguration {
        debug_newlines: true,
        ..FormattingConfiguration::default()
    };
    let out = format_source("module m(){cube();}", &config).unwrap();
    assert_eq!(out, "module m() {/*block*/\n    cube();/*block*/\n}\n");
}

#[test]
fn test_deeply_nested_expression_formats() {
    let depth = 2000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let out = format(&source);
    assert!(out.starts_with("x = (((("));
    assert!(out.ends_with("1))));\n"));
}

fn nested_chains(depth: usize) -> String {
    let mut source = "cube();".to_string();
    for _ in 0..depth {
        source = format!("translate([1, 2, 3]) rotate([0, 0, 45]) {{ {source} }}");
    }
    source
}

#[test]
fn test_nested_chains_format_in_one_pass() {
    let depth = 22;
    let started = std::time::Instant::now();
    let out = format(&nested_chains(depth));
    let elapsed = started.elapsed();

    assert_eq!(out.matches("translate([1, 2, 3])\n").count(), depth);
    assert_eq!(out.matches("rotate([0, 0, 45]) {\n").count(), depth);
    assert_eq!(out.matches("cube();").count(), 1);
    assert!(elapsed.as_secs() < 5, "formatting took {elapsed:?}");
    assert_eq!(format(&out), out);
}
