//! Basic tests for xot-adapter

use xcc_tree_traits::{MutableXmlTree, NamespaceDeclaration, QualifiedName, XmlTree};
use xot_adapter::XotTree;

#[test]
fn test_parse_and_document_element() {
    let tree = XotTree::parse("<root><item>test</item></root>").unwrap();

    let root = tree.document_element().unwrap();
    assert_eq!(tree.element_name(root).unwrap(), QualifiedName::local("root"));

    let children = tree.child_elements(root);
    assert_eq!(children.len(), 1);
    assert_eq!(
        tree.element_name(children[0]).unwrap(),
        QualifiedName::local("item")
    );
}

#[test]
fn test_parse_error_is_reported() {
    let result = XotTree::parse("<root><unclosed></root>");
    assert!(matches!(result, Err(xcc_tree_traits::Error::XmlParse(_))));
}

#[test]
fn test_serialize_preserves_whitespace() {
    let xml = "<root>\n  <item>test</item>\n\n</root>";
    let tree = XotTree::parse(xml).unwrap();
    assert_eq!(tree.serialize().unwrap(), xml);
}

#[test]
fn test_child_elements_skip_text() {
    let tree = XotTree::parse("<root> a <b/> c <d/><!-- e --></root>").unwrap();
    let root = tree.document_element().unwrap();
    let names: Vec<_> = tree
        .child_elements(root)
        .into_iter()
        .map(|child| tree.element_name(child).unwrap().local_name)
        .collect();
    assert_eq!(names, vec!["b", "d"]);
}

#[test]
fn test_namespace_declarations() {
    let tree = XotTree::parse(
        r#"<root xmlns="urn:default" xmlns:debug="condition:DEBUG"><debug:item/></root>"#,
    )
    .unwrap();
    let root = tree.document_element().unwrap();

    let declarations = tree.namespace_declarations(root);
    assert!(declarations.contains(&NamespaceDeclaration::new("", "urn:default")));
    assert!(declarations.contains(&NamespaceDeclaration::new("debug", "condition:DEBUG")));

    let item = tree.child_elements(root)[0];
    assert_eq!(
        tree.element_name(item).unwrap(),
        QualifiedName::new("condition:DEBUG", "item")
    );
    assert!(tree.namespace_declarations(item).is_empty());
}

#[test]
fn test_attributes_in_order() {
    let tree = XotTree::parse(r#"<root xmlns:w="condition:W" a="1" w:a="2" b="3"/>"#).unwrap();
    let root = tree.document_element().unwrap();

    let attributes = tree.attributes(root);
    assert_eq!(
        attributes,
        vec![
            (QualifiedName::local("a"), "1".to_string()),
            (QualifiedName::new("condition:W", "a"), "2".to_string()),
            (QualifiedName::local("b"), "3".to_string()),
        ]
    );
    assert_eq!(
        tree.attribute(root, &QualifiedName::new("condition:W", "a")),
        Some("2".to_string())
    );
    assert_eq!(tree.attribute(root, &QualifiedName::local("c")), None);
}

#[test]
fn test_rename_element() {
    let mut tree =
        XotTree::parse(r#"<root xmlns="urn:default" xmlns:c="condition:C"><c:item/></root>"#)
            .unwrap();
    let root = tree.document_element().unwrap();
    let item = tree.child_elements(root)[0];

    tree.rename_element(item, &QualifiedName::new("urn:default", "item"))
        .unwrap();

    assert_eq!(
        tree.element_name(item).unwrap(),
        QualifiedName::new("urn:default", "item")
    );
    assert_eq!(
        tree.serialize().unwrap(),
        r#"<root xmlns="urn:default" xmlns:c="condition:C"><item/></root>"#
    );
}

#[test]
fn test_remove_element_and_subtree() {
    let mut tree = XotTree::parse("<root>\n<a><b/></a>\n<c/></root>").unwrap();
    let root = tree.document_element().unwrap();
    let a = tree.child_elements(root)[0];

    tree.remove_element(a).unwrap();

    assert_eq!(tree.serialize().unwrap(), "<root>\n\n<c/></root>");
}

#[test]
fn test_remove_document_element_is_rejected() {
    let mut tree = XotTree::parse("<root/>").unwrap();
    let root = tree.document_element().unwrap();
    assert!(tree.remove_element(root).is_err());
    assert_eq!(tree.serialize().unwrap(), "<root/>");
}

#[test]
fn test_set_attribute_appends_new_name() {
    let mut tree = XotTree::parse(r#"<root x="1" y="2"/>"#).unwrap();
    let root = tree.document_element().unwrap();

    assert!(tree.remove_attribute(root, &QualifiedName::local("x")).unwrap());
    assert!(!tree.remove_attribute(root, &QualifiedName::local("x")).unwrap());
    tree.set_attribute(root, &QualifiedName::local("x"), "3")
        .unwrap();

    assert_eq!(tree.serialize().unwrap(), r#"<root y="2" x="3"/>"#);
}

#[test]
fn test_namespace_declaration_edits() {
    let mut tree = XotTree::parse(r#"<root xmlns:d="condition:D"/>"#).unwrap();
    let root = tree.document_element().unwrap();

    assert!(tree.remove_namespace_declaration(root, "d").unwrap());
    assert!(!tree.remove_namespace_declaration(root, "d").unwrap());
    assert_eq!(tree.serialize().unwrap(), "<root/>");

    tree.declare_namespace(root, &NamespaceDeclaration::new("p", "urn:p"))
        .unwrap();
    assert_eq!(
        tree.namespace_declarations(root),
        vec![NamespaceDeclaration::new("p", "urn:p")]
    );
}

#[test]
fn test_parent_element() {
    let tree = XotTree::parse("<root><item><leaf/></item></root>").unwrap();
    let root = tree.document_element().unwrap();
    let item = tree.child_elements(root)[0];
    let leaf = tree.child_elements(item)[0];

    assert_eq!(tree.parent_element(leaf), Some(item));
    assert_eq!(tree.parent_element(item), Some(root));
    assert_eq!(tree.parent_element(root), None);
}

#[test]
fn test_namespace_scope_follows_ancestors() {
    let tree = XotTree::parse(
        r#"<root xmlns="urn:a" xmlns:p="urn:p"><item xmlns="urn:b"><leaf/></item></root>"#,
    )
    .unwrap();
    let root = tree.document_element().unwrap();
    let item = tree.child_elements(root)[0];
    let leaf = tree.child_elements(item)[0];

    assert_eq!(tree.namespace_for_prefix(leaf, ""), Some("urn:b".to_string()));
    assert_eq!(tree.namespace_for_prefix(leaf, "p"), Some("urn:p".to_string()));
    assert_eq!(tree.namespace_for_prefix(leaf, "q"), None);

    assert!(tree.is_namespace_in_scope(leaf, "urn:b"));
    assert!(tree.is_namespace_in_scope(leaf, "urn:p"));
    // the default prefix is rebound on item
    assert!(!tree.is_namespace_in_scope(leaf, "urn:a"));
    assert!(tree.is_namespace_in_scope(root, "urn:a"));
}

#[test]
fn test_undeclare_default_namespace() {
    let mut tree = XotTree::parse(r#"<root xmlns="urn:b"><item/></root>"#).unwrap();
    let root = tree.document_element().unwrap();
    let item = tree.child_elements(root)[0];

    tree.rename_element(item, &QualifiedName::local("item")).unwrap();
    tree.declare_namespace(item, &NamespaceDeclaration::new("", "")).unwrap();
    assert_eq!(tree.namespace_for_prefix(item, ""), Some(String::new()));

    let reparsed = XotTree::parse(&tree.serialize().unwrap()).unwrap();
    let root = reparsed.document_element().unwrap();
    let item = reparsed.child_elements(root)[0];
    assert_eq!(reparsed.element_name(item).unwrap(), QualifiedName::local("item"));
}
