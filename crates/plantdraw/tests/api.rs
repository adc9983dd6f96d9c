//! Public API tests
//!
//! Exercise the crate the way a consumer would: the top-level helpers, the
//! prelude, and the per-kind plugin pipeline.

use plantdraw::prelude::*;
use plantdraw::{classify, convert, convert_with_config, render};

#[test]
fn test_convert_each_supported_kind() {
    let cases = [
        (
            "@startuml\nparticipant Alice\nAlice -> Bob: hi\n@enduml",
            DiagramKind::Sequence,
        ),
        ("@startuml\nclass A\nclass B\nA --> B\n@enduml", DiagramKind::Class),
        ("@startuml\nactor U\n(Login)\nU --> (Login)\n@enduml", DiagramKind::UseCase),
        ("@startuml\nstart\n:step;\nstop\n@enduml", DiagramKind::Activity),
    ];

    for (input, kind) in cases {
        assert_eq!(classify(input), kind, "classify {:?}", input);
        let document = convert(input).unwrap();
        assert_eq!(document.name, kind.page_name());
        assert!(!document.nodes.is_empty());
    }
}

#[test]
fn test_render_produces_mxfile() {
    let xml = render("@startuml\nclass Order {\n+id: u64\n+total(): f64\n}\n@enduml").unwrap();
    assert!(xml.starts_with("<mxfile host=\"plantdraw\""));
    assert!(xml.contains("<diagram name=\"Class Diagram\""));
    assert!(xml.contains("+id: u64"));
    assert!(xml.trim_end().ends_with("</mxfile>"));
}

#[test]
fn test_config_name_and_columns() {
    let input = "@startuml\nclass A\nclass B\nclass C\n@enduml";
    let config = RenderConfig::default().with_name("Domain").with_class_columns(1);
    let document = convert_with_config(input, config).unwrap();
    assert_eq!(document.name, "Domain");

    let xs: Vec<f64> = document.nodes.iter().map(|n| n.bounds.x).collect();
    assert!(xs.iter().all(|x| *x == xs[0]));
    let ys: Vec<f64> = document.nodes.iter().map(|n| n.bounds.y).collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_manual_pipeline_through_diagram_trait() {
    use plantdraw::plugins::activity::ActivityDiagram;

    let parser = ActivityDiagram::create_parser();
    let mut database = ActivityDiagram::create_database();
    parser
        .parse("@startuml\nstart\n:a;\n:b;\nstop\n@enduml", &mut database)
        .unwrap();
    assert_eq!(database.node_count(), 4);
    assert_eq!(database.edge_count(), 3);

    let renderer = ActivityDiagram::create_renderer(&RenderConfig::default());
    let document = renderer.render(&database).unwrap();
    assert_eq!(document.edges.len(), 3);
    assert_eq!(ActivityDiagram::kind(), DiagramKind::Activity);
    assert_eq!(ActivityDiagram::detector().name(), "activity");
}

#[test]
fn test_cell_ids_are_unique_and_sequential() {
    let document = convert(
        "@startuml\nstart\nif (x?) then (yes)\n:a;\nelse (no)\n:b;\nendif\nstop\n@enduml",
    )
    .unwrap();

    let mut ids: Vec<&str> = document
        .nodes
        .iter()
        .map(|n| n.id.as_str())
        .chain(document.edges.iter().map(|e| e.id.as_str()))
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(document.nodes[0].id, "elem_2");
}

#[test]
fn test_json_output() {
    let document = convert("@startuml\nusecase (Pay\\nNow)\n@enduml").unwrap();
    let json = document.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Use Case Diagram");
    assert_eq!(value["nodes"][0]["label"], "Pay\nNow");
}

#[test]
fn test_orchestrator_is_shareable_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let orchestrator = Arc::new(Orchestrator::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let orchestrator = Arc::clone(&orchestrator);
            thread::spawn(move || {
                let input = format!("@startuml\nstart\n:job {};\nstop\n@enduml", i);
                orchestrator.process(&input).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let document = handle.join().unwrap();
        assert!(document.node_by_label(&format!("job {}", i)).is_some());
    }
}
