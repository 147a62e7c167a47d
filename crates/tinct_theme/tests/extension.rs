use tinct_theme::{
    BuiltinVocabulary, ExtendedVocabulary, ExtensionTable, TokenGroup, TokenOrigin, TokenValue,
    VariableContext,
};

fn project_table() -> ExtensionTable {
    let mut table = ExtensionTable::new();
    for (name, raw) in [
        ("primary", "var(--primary-color)"),
        ("secondary", "#6b7280"),
        ("danger", "#ef4444"),
        ("white", "#fafafa"),
    ] {
        table.insert(TokenGroup::Palette, name, TokenValue::classify(raw).unwrap());
    }
    table.insert(
        TokenGroup::Motion,
        "fade-in",
        TokenValue::classify("fadeIn 0.5s ease-in-out").unwrap(),
    );
    table
}

#[test]
fn table_only_adds_to_the_builtin_vocabulary() {
    let table = project_table();
    let vocab = ExtendedVocabulary::standard(&table);
    let builtin = BuiltinVocabulary::standard();

    for group in TokenGroup::all() {
        let names = vocab.names(*group);
        for name in builtin.all(*group).keys() {
            assert!(
                names.contains(&name.as_str()),
                "built-in {group}.{name} should still be reachable"
            );
        }
    }
}

#[test]
fn every_builtin_resolves_somewhere() {
    let table = project_table();
    let vocab = ExtendedVocabulary::standard(&table);

    for (name, value) in BuiltinVocabulary::standard().all(TokenGroup::Palette) {
        let entry = vocab.lookup(TokenGroup::Palette, name).unwrap();
        match table.resolve(TokenGroup::Palette, name) {
            Some(declared) => assert_eq!(entry.to_value(), *declared),
            None => {
                assert_eq!(entry.origin(), TokenOrigin::Builtin);
                assert_eq!(entry.to_string(), *value);
            }
        }
    }
}

#[test]
fn reference_marks_shadowed_names() {
    let table = project_table();
    let rows = ExtendedVocabulary::standard(&table).reference(TokenGroup::Palette);

    let white = rows.iter().find(|r| r.name == "white").unwrap();
    assert_eq!(white.origin, TokenOrigin::Extension);
    assert_eq!(white.value, "#fafafa");
    assert!(white.shadows_builtin);

    let primary = rows.iter().find(|r| r.name == "primary").unwrap();
    assert_eq!(primary.value, "var(--primary-color)");
    assert!(!primary.shadows_builtin);

    // Extension-only names come after every built-in.
    let first_added = rows.iter().position(|r| r.name == "primary").unwrap();
    assert!(rows[..first_added]
        .iter()
        .all(|r| r.origin == TokenOrigin::Builtin || r.shadows_builtin));
}

#[test]
fn light_and_dark_render_the_same_table_differently() {
    let table = project_table();
    let primary = table.resolve(TokenGroup::Palette, "primary").unwrap();

    let mut light = VariableContext::new("light");
    light.set_color("primary-color", "#3b82f6").unwrap();
    let mut dark = VariableContext::new("dark");
    dark.set_color("primary-color", "#60a5fa").unwrap();

    assert_eq!(light.render(primary).unwrap(), "#3b82f6");
    assert_eq!(dark.render(primary).unwrap(), "#60a5fa");
    assert_eq!(
        table.resolve(TokenGroup::Palette, "primary"),
        Some(&TokenValue::indirect("--primary-color"))
    );
}

#[test]
fn merge_keeps_groups_the_overlay_does_not_mention() {
    let mut base = project_table();
    let mut overlay = ExtensionTable::new();
    overlay.insert(TokenGroup::Palette, "secondary", TokenValue::literal("#3b82f6"));

    base.merge(&overlay);
    assert_eq!(
        base.resolve(TokenGroup::Palette, "secondary"),
        Some(&TokenValue::literal("#3b82f6"))
    );
    assert_eq!(base.all_tokens(TokenGroup::Motion).len(), 1);
    assert_eq!(base.all_tokens(TokenGroup::Palette).len(), 4);
}
