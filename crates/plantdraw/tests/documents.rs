//! Document-level checks for class and use-case diagrams, and edge
//! references across every kind

use plantdraw::core::{Document, ShapeKind};
use plantdraw::{convert, LINE_BREAK};

/// Every node-attached edge end refers to a node of the same document
fn assert_no_dangling_edges(document: &Document) {
    for edge in &document.edges {
        for end in [&edge.source, &edge.target] {
            if let Some(id) = end.node_id() {
                assert!(
                    document.node(id).is_some(),
                    "edge {} references missing node {}",
                    edge.id,
                    id
                );
            }
        }
    }
}

#[test]
fn test_dangling_references_never_reach_the_document() {
    let inputs = [
        "@startuml\nparticipant A\nA -> Ghost: boo\nGhost -> A\n@enduml",
        "@startuml\nclass A\nA --> Missing\nMissing <|-- A\n@enduml",
        "@startuml\nactor User\nUser --> Ghost\nGhost ..> User\n@enduml",
        "@startuml\nstart\nif (x) then\nstop\nelse\nstop\nendif\n:orphan;\n@enduml",
    ];
    for input in inputs {
        let document = convert(input).unwrap();
        assert_no_dangling_edges(&document);
    }
}

#[test]
fn test_class_members_and_stereotypes() {
    let document = convert(
        "@startuml\n\
         abstract class Shape {\n\
         -id: u32\n\
         +area(): f64\n\
         }\n\
         enum Color {\n\
         RED\n\
         GREEN\n\
         }\n\
         interface Drawable\n\
         Shape ..|> Drawable\n\
         Shape --> Color : fill\n\
         @enduml",
    )
    .unwrap();
    assert_eq!(document.nodes.len(), 3);

    let shape = document
        .nodes
        .iter()
        .find(|n| n.label.contains("Shape"))
        .unwrap();
    assert!(shape.label.contains("-id: u32"));
    assert!(shape.label.contains("+area(): f64"));

    let color = document.nodes.iter().find(|n| n.label.contains("Color")).unwrap();
    assert!(color.label.contains("<<enumeration>>"));
    assert!(color.label.contains("RED"));

    assert_eq!(document.edges.len(), 2);
    assert!(document.edges.iter().any(|e| e.label == "fill"));
    assert_no_dangling_edges(&document);
}

#[test]
fn test_class_grid_wraps_rows() {
    let document = convert("@startuml\nclass A\nclass B\nclass C\nclass D\n@enduml").unwrap();
    let a = &document.nodes[0];
    let d = &document.nodes[3];
    assert_eq!(a.bounds.x, d.bounds.x);
    assert!(d.bounds.y > a.bounds.bottom());
}

#[test]
fn test_use_case_columns() {
    let document = convert(
        "@startuml\n\
         actor Customer\n\
         actor Bank <<secondary>>\n\
         rectangle Shop {\n\
         usecase (Checkout) as UC1\n\
         usecase (Refund) as UC2\n\
         }\n\
         Customer --> UC1\n\
         UC2 -- Bank\n\
         @enduml",
    )
    .unwrap();

    let customer = document.node_by_label("Customer").unwrap();
    let checkout = document.node_by_label("Checkout").unwrap();
    let refund = document.node_by_label("Refund").unwrap();
    let bank = document
        .node_by_label(&format!("<<system>>{}Bank", LINE_BREAK))
        .unwrap();

    assert!(customer.bounds.x < checkout.bounds.x);
    assert!(checkout.bounds.x < bank.bounds.x);
    assert_eq!(checkout.bounds.x, refund.bounds.x);
    assert!(refund.bounds.y > checkout.bounds.y);

    let boundary = &document.nodes[0];
    assert_eq!(boundary.shape, ShapeKind::Container);
    assert_eq!(boundary.label, "Shop");
    assert!(boundary.bounds.x < checkout.bounds.x);
    assert!(boundary.bounds.bottom() > refund.bounds.bottom());

    assert_eq!(document.edges.len(), 2);
    assert_no_dangling_edges(&document);
}

#[test]
fn test_use_case_generalization_arrow() {
    let document = convert(
        "@startuml\nactor User\nactor Admin\nusecase (Manage)\nAdmin --|> User\nAdmin --> (Manage)\n@enduml",
    )
    .unwrap();
    let generalization = &document.edges[0];
    assert!(generalization.style.contains("endArrow=block;endFill=0;"));
    let user = document.node_by_label("User").unwrap();
    assert_eq!(generalization.target.node_id(), Some(user.id.as_str()));
}

#[test]
fn test_xml_escapes_labels() {
    let document = convert("@startuml\nA -> B: a < b & c\n@enduml").unwrap();
    let xml = document.to_xml();
    assert!(xml.contains("a &amp;lt; b &amp;amp; c"));
}
