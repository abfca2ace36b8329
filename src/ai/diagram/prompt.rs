use crate::normalize::DiagramKind;

/// Build the prompt sent to the backend for diagram generation.
///
/// The instructions pin the expected declaration line so the normalizer has
/// a stable anchor to extract from, and forbid prose and fences outright.
/// Models ignore that last part often enough that the normalizer exists.
pub fn build_diagram_prompt(description: &str, kind: DiagramKind) -> String {
    let declaration = kind.declaration();
    let what = match kind {
        DiagramKind::Flowchart | DiagramKind::Graph => "flowchart",
        DiagramKind::Sequence => "sequence diagram",
        DiagramKind::Class => "class diagram",
        DiagramKind::State => "state diagram",
        DiagramKind::EntityRelationship => "entity-relationship diagram",
        DiagramKind::Gantt => "Gantt chart",
    };

    format!(
        "Convert the following process into a Mermaid {what}. \
         Return only valid Mermaid code starting with '{declaration}'. \
         No explanation, no formatting.\n\n{description}"
    )
}
