//! End-to-end runs from descriptors to rendered artifacts.

use hashstamp::{
    BodyContent, EMPTY_DIGEST, Generation, StampConfig, UnitDescriptor, digest, generate,
};

fn stmts(lines: &[&str]) -> Option<BodyContent> {
    Some(BodyContent::Statements(
        lines.iter().map(|line| line.to_string()).collect(),
    ))
}

fn run(units: &[UnitDescriptor]) -> Generation {
    generate(units, &StampConfig::default()).expect("generation succeeds")
}

/// `(namespace module, type module, const, value)` for every constant in a
/// rendered file.
fn rendered_constants(source: &str) -> Vec<(String, String, String, String)> {
    let file = syn::parse_file(source).expect("rendered source is valid rust");
    let mut out = Vec::new();
    for root in &file.items {
        let syn::Item::Mod(root) = root else { continue };
        let Some((_, items)) = &root.content else { continue };
        for ns in items {
            let syn::Item::Mod(ns) = ns else { continue };
            let Some((_, types)) = &ns.content else { continue };
            for ty in types {
                let syn::Item::Mod(ty) = ty else { continue };
                let Some((_, consts)) = &ty.content else { continue };
                for item in consts {
                    let syn::Item::Const(c) = item else { continue };
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(value),
                        ..
                    }) = c.expr.as_ref()
                    else {
                        panic!("constant {} is not a string literal", c.ident);
                    };
                    out.push((
                        ns.ident.to_string(),
                        ty.ident.to_string(),
                        c.ident.to_string(),
                        value.value(),
                    ));
                }
            }
        }
    }
    out
}

#[test]
fn simple_method_and_method_with_loops() {
    let units = vec![
        UnitDescriptor::new(
            "N",
            "T",
            "SimpleMethod",
            "SimpleMethod()",
            stmts(&["return \"Hello, World!\";"]),
        ),
        UnitDescriptor::new(
            "N",
            "T",
            "MethodWithLoops",
            "MethodWithLoops()",
            stmts(&[
                "var sum = 0;",
                "for (int i = 0; i < 10; i++) { sum += i; }",
                "return sum;",
            ]),
        ),
    ];
    let generation = run(&units);

    let simple = generation.registry.get("N", "T", "SimpleMethod").expect("SimpleMethod");
    let loops = generation
        .registry
        .get("N", "T", "MethodWithLoops")
        .expect("MethodWithLoops");
    assert_ne!(simple.digest, loops.digest);
    assert_eq!(simple.digest, digest("return \"Hello, World!\" ;"));

    let runtime = &generation.runtime_artifact;
    assert_eq!(runtime.get("N", "T", "SimpleMethod").map(|h| &h.digest), Some(&simple.digest));
    assert_eq!(
        runtime.get("N", "T", "MethodWithLoops").map(|h| &h.digest),
        Some(&loops.digest)
    );

    let statics = &generation.static_artifact;
    assert_eq!(statics.constant("N", "T", "SimpleMethod"), Some(&simple.digest));
    assert_eq!(statics.constant("N", "T", "MethodWithLoops"), Some(&loops.digest));
}

#[test]
fn overloads_are_qualified_only_within_their_type() {
    let units = vec![
        UnitDescriptor::new("N", "Worker", "Process", "Process(int)", stmts(&["return 1;"])),
        UnitDescriptor::new(
            "N",
            "Worker",
            "Process",
            "Process(int, string)",
            stmts(&["return 2;"]),
        ),
        UnitDescriptor::new("N", "Other", "Process", "Process(int)", stmts(&["return 3;"])),
    ];
    let generation = run(&units);
    let registry = &generation.registry;

    let worker = registry.namespace("N").and_then(|n| n.get("Worker")).expect("Worker");
    let keys: Vec<&str> = worker.iter().map(|(name, _)| name).collect();
    assert_eq!(keys, vec!["Process_int", "Process_int__string"]);

    let one = registry.get("N", "Worker", "Process_int").expect("first overload");
    let two = registry.get("N", "Worker", "Process_int__string").expect("second overload");
    assert_eq!(one.qualified_signature, "Process(int)");
    assert_eq!(two.qualified_signature, "Process(int, string)");
    assert_ne!(one.digest, two.digest);

    assert!(registry.get("N", "Other", "Process").is_some());
    assert!(registry.get("N", "Worker", "Process").is_none());
}

#[test]
fn rendered_constants_match_runtime_table() {
    let units = vec![
        UnitDescriptor::new(
            "HashStamp.Test",
            "TestClass1",
            "TestMethod1",
            "TestMethod1()",
            stmts(&["a();"]),
        ),
        UnitDescriptor::new("HashStamp.Test", "TestClass1", "TestMethod2", "TestMethod2()", None),
        UnitDescriptor::new(
            "HashStamp.Test",
            "TestClass2",
            "TestMethod3",
            "TestMethod3(string)",
            stmts(&["b();"]),
        ),
        UnitDescriptor::new(
            "HashStamp.Test",
            "TestClass2",
            "TestMethod3",
            "TestMethod3(int)",
            stmts(&["c();"]),
        ),
        UnitDescriptor::new(
            "HashStamp.Test.OtherNamespace",
            "TestClass2",
            "type",
            "type()",
            stmts(&["d();"]),
        ),
    ];
    let generation = run(&units);
    let source = generation
        .render_source(&StampConfig::default().emit)
        .expect("render");

    let constants = rendered_constants(&source);
    assert_eq!(constants.len(), generation.registry.len());

    for (namespace, type_name, resolved_name, entry) in generation.registry.iter() {
        let runtime = generation
            .runtime_artifact
            .get(namespace, type_name, resolved_name)
            .expect("runtime entry");
        assert_eq!(runtime.digest, entry.digest);

        let ns_ident = hashstamp::emit::flatten_namespace(namespace);
        let type_ident = hashstamp::emit::rust_ident(type_name)
            .expect("type ident")
            .to_string();
        let const_ident = hashstamp::emit::rust_ident(resolved_name)
            .expect("const ident")
            .to_string();
        let rendered = constants
            .iter()
            .find(|(n, t, c, _)| *n == ns_ident && *t == type_ident && *c == const_ident)
            .unwrap_or_else(|| panic!("{namespace}.{type_name}.{resolved_name} not rendered"));
        assert_eq!(rendered.3, entry.digest.as_str());
    }

    assert!(constants
        .iter()
        .any(|(n, _, c, _)| n == "HashStamp_Test_OtherNamespace" && c == "r#type"));
    assert!(source.contains("TestMethod3_string"));
    assert!(source.contains("TestMethod3_int"));
}

#[test]
fn bodiless_member_hashes_to_empty_digest() {
    let units = vec![
        UnitDescriptor::new("N", "Shape", "Area", "Area()", None),
        UnitDescriptor::new("N", "Shape", "Blank", "Blank()", stmts(&["", "   ", "// note"])),
    ];
    let generation = run(&units);
    for name in ["Area", "Blank"] {
        let entry = generation.registry.get("N", "Shape", name).expect("entry");
        assert_eq!(entry.digest.as_str(), EMPTY_DIGEST);
        assert!(entry.digest.is_empty_body());
    }
}

#[test]
fn runtime_json_round_trips_through_disk() {
    let units = vec![UnitDescriptor::new(
        "app::core",
        "Engine",
        "start",
        "start(u32)",
        stmts(&["self.run(n);"]),
    )];
    let generation = run(&units);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stamps.json");
    std::fs::write(&path, generation.runtime_artifact.to_json().expect("json")).expect("write");

    let json = std::fs::read_to_string(&path).expect("read");
    let loaded = hashstamp::RuntimeArtifact::from_json(&json).expect("parse");
    assert_eq!(loaded, generation.runtime_artifact);
    assert_eq!(
        loaded.get("app::core", "Engine", "start").map(|h| h.signature.as_str()),
        Some("start(u32)")
    );
}
