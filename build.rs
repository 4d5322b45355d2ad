/// Build script: generates individual `#[test]` functions from
/// tests/data/cases.json so each conformance case appears separately in
/// `cargo test` output.
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let cases_path = Path::new("tests/data/cases.json");
    println!("cargo:rerun-if-changed={}", cases_path.display());

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("conformance_tests.rs");
    let mut f = fs::File::create(&dest).unwrap();

    // The data file is excluded from the published package; nothing to generate then.
    let Ok(cases_str) = fs::read_to_string(cases_path) else {
        return;
    };
    let cases: serde_json::Value =
        serde_json::from_str(&cases_str).expect("invalid JSON in tests/data/cases.json");

    for (i, case) in iter_tests(&cases["valid"]).enumerate() {
        let name = test_name(case, i);
        emit_flat(&mut f, &format!("valid_{name}"), "run_valid", i);
    }

    for (i, case) in iter_tests(&cases["invalid"]).enumerate() {
        let name = test_name(case, i);
        emit_flat(&mut f, &format!("invalid_{name}"), "run_invalid", i);
    }
}

fn iter_tests(section: &serde_json::Value) -> impl Iterator<Item = &serde_json::Value> {
    section["tests"]
        .as_array()
        .expect("section missing 'tests' array")
        .iter()
}

fn test_name(case: &serde_json::Value, index: usize) -> String {
    let raw = case["name"]
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| format!("case_{index}"));
    sanitize(&raw)
}

fn sanitize(name: &str) -> String {
    let mut result = String::new();
    let mut prev_underscore = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            prev_underscore = false;
        } else if !prev_underscore {
            result.push('_');
            prev_underscore = true;
        }
    }
    result.trim_matches('_').to_string()
}

fn emit_flat(f: &mut fs::File, fn_name: &str, runner: &str, index: usize) {
    writeln!(f, "#[test]").unwrap();
    writeln!(f, "fn {fn_name}() {{ {runner}({index}); }}").unwrap();
}
