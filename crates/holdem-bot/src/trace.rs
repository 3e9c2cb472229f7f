//! Decision trace emitted by the expectimax strategy: the explored tree with
//! per-node values and reach probabilities, plus a human-readable reasoning
//! log. Serializable so callers can ship it to a debugging UI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceNode {
    /// What happened at this node, e.g. `"raise 150"` or `"opponent folds"`.
    pub label: String,
    /// Backed-up expected value at this node.
    pub value: f64,
    /// Probability of reaching this node from the root.
    pub probability: f64,
    pub leaf: bool,
    /// Set along the line the strategy actually chose.
    pub best_path: bool,
    pub children: Vec<TraceNode>,
}

impl TraceNode {
    pub fn new(label: impl Into<String>, value: f64, probability: f64) -> Self {
        Self {
            label: label.into(),
            value,
            probability,
            leaf: false,
            best_path: false,
            children: Vec::new(),
        }
    }

    pub fn leaf(label: impl Into<String>, value: f64, probability: f64) -> Self {
        Self {
            leaf: true,
            ..Self::new(label, value, probability)
        }
    }

    pub fn with_children(mut self, children: Vec<TraceNode>) -> Self {
        self.children = children;
        self
    }

    /// Marks this node and, recursively, its highest-valued child as the
    /// chosen line.
    pub fn mark_best_path(&mut self) {
        self.best_path = true;
        let best = self
            .children
            .iter_mut()
            .max_by(|a, b| a.value.total_cmp(&b.value));
        if let Some(child) = best {
            child.mark_best_path();
        }
    }

    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TraceNode::count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TraceNode::depth)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub root: TraceNode,
    pub nodes_explored: usize,
    pub max_depth: usize,
    /// Step-by-step narration of the decision, most recent last.
    pub reasoning: Vec<String>,
}

impl DecisionTrace {
    pub fn new(root: TraceNode, reasoning: Vec<String>) -> Self {
        let nodes_explored = root.count();
        let max_depth = root.depth();
        Self {
            root,
            nodes_explored,
            max_depth,
            reasoning,
        }
    }

    /// Labels along the marked best path, root first.
    pub fn best_line(&self) -> Vec<&str> {
        let mut line = Vec::new();
        let mut node = &self.root;
        while node.best_path {
            line.push(node.label.as_str());
            match node.children.iter().find(|child| child.best_path) {
                Some(next) => node = next,
                None => break,
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_root() -> TraceNode {
        TraceNode::new("root", 12.0, 1.0).with_children(vec![
            TraceNode::leaf("call", 8.0, 1.0),
            TraceNode::new("raise 100", 12.0, 1.0).with_children(vec![
                TraceNode::leaf("opponent folds", 40.0, 0.3),
                TraceNode::leaf("opponent calls", 2.0, 0.5),
            ]),
        ])
    }

    #[test]
    fn counters_cover_the_whole_tree() {
        let trace = DecisionTrace::new(sample_root(), Vec::new());
        assert_eq!(trace.nodes_explored, 5);
        assert_eq!(trace.max_depth, 3);
    }

    #[test]
    fn best_path_follows_highest_value() {
        let mut root = sample_root();
        root.mark_best_path();
        let trace = DecisionTrace::new(root, vec!["chose raise 100".to_string()]);
        assert_eq!(trace.best_line(), vec!["root", "raise 100", "opponent folds"]);
    }

    #[test]
    fn trace_round_trips_through_json() {
        let mut root = sample_root();
        root.mark_best_path();
        let trace = DecisionTrace::new(root, vec!["hand strength 0.62".to_string()]);
        let encoded = serde_json::to_string(&trace).expect("serialize");
        let decoded: DecisionTrace = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded.nodes_explored, trace.nodes_explored);
        assert_eq!(decoded.best_line(), trace.best_line());
    }
}
