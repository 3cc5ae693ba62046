//! Cypher statement builders.
//!
//! Pure functions. Node labels and relationship types are interpolated only
//! from closed enums; every user-supplied value travels as a parameter.

use collabgraph_core::graph::GraphNode;
use collabgraph_core::research::RelationKind;

/// A parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CypherValue {
    Text(String),
    Int(i64),
}

/// Cypher text with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub params: Vec<(String, CypherValue)>,
}

impl Statement {
    fn new(text: String) -> Self {
        Self {
            text,
            params: Vec::new(),
        }
    }

    /// Converts into a driver query.
    pub fn into_query(self) -> neo4rs::Query {
        self.params
            .into_iter()
            .fold(neo4rs::query(&self.text), |q, (key, value)| match value {
                CypherValue::Text(s) => q.param(&key, s),
                CypherValue::Int(i) => q.param(&key, i),
            })
    }
}

/// Builds `(var:Label {..})` for a node pattern, adding its parameters to
/// `params` under names prefixed with `var`.
fn node_pattern(var: &str, node: &GraphNode, params: &mut Vec<(String, CypherValue)>) -> String {
    let mut bound: Vec<(&str, CypherValue)> = Vec::new();
    let mut literal = None;

    match node {
        GraphNode::Researcher { name, department } => {
            bound.push(("name", CypherValue::Text(name.clone())));
            if let Some(department) = department {
                bound.push(("department", CypherValue::Text(department.clone())));
            }
        }
        GraphNode::Project { title } => bound.push(("title", CypherValue::Text(title.clone()))),
        GraphNode::Publication { title, year } => {
            bound.push(("title", CypherValue::Text(title.clone())));
            match year {
                Some(year) => bound.push(("year", CypherValue::Int(i64::from(*year)))),
                None => literal = Some("year_unknown: true"),
            }
        }
    }

    let mut props = Vec::with_capacity(bound.len() + 1);
    for (key, value) in bound {
        let name = format!("{var}_{key}");
        props.push(format!("{key}: ${name}"));
        params.push((name, value));
    }
    props.extend(literal.map(str::to_string));

    format!("({var}:{} {{{}}})", node.label(), props.join(", "))
}

/// `MERGE` of a single node.
pub fn merge_node(node: &GraphNode) -> Statement {
    let mut params = Vec::new();
    let pattern = node_pattern("n", node, &mut params);
    Statement {
        text: format!("MERGE {pattern}"),
        params,
    }
}

/// Merges `target` and an edge to it from every researcher named `source`.
///
/// The leading `MATCH` yields no rows when no researcher has that name, so
/// nothing is written in that case.
pub fn merge_edge(source: &str, relation: RelationKind, target: &GraphNode) -> Statement {
    let mut params = vec![(
        "source_name".to_string(),
        CypherValue::Text(source.to_string()),
    )];
    let target_pattern = node_pattern("t", target, &mut params);
    Statement {
        text: format!(
            "MATCH (r:Researcher {{name: $source_name}})\n\
             MERGE {target_pattern}\n\
             MERGE (r)-[:{}]->(t)",
            relation.as_label()
        ),
        params,
    }
}

/// Outgoing edges of the researchers named `name`.
pub fn outgoing_relations(name: &str) -> Statement {
    let mut statement = Statement::new(
        "MATCH (r:Researcher {name: $name})-[rel]->(t)\n\
         RETURN type(rel) AS relation, coalesce(t.title, t.name) AS target"
            .to_string(),
    );
    statement
        .params
        .push(("name".to_string(), CypherValue::Text(name.to_string())));
    statement
}

/// Outgoing edges of all researchers, at most `limit` rows.
pub fn list_collaborations(limit: usize) -> Statement {
    let mut statement = Statement::new(
        "MATCH (r:Researcher)-[rel]->(t)\n\
         RETURN r.name AS researcher, type(rel) AS relation, \
         coalesce(t.title, t.name) AS target\n\
         LIMIT $limit"
            .to_string(),
    );
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    statement
        .params
        .push(("limit".to_string(), CypherValue::Int(limit)));
    statement
}
