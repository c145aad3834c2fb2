//! Human-readable rendering of fitted trees
//!
//! ```text
//! |--- Thirst <= 0.50
//! |   |--- class: 0
//! |--- Thirst >  0.50
//! |   |--- class: 1
//! ```

use crate::training::tree::{DecisionTree, Node};
use std::fmt::Write;

/// Render a tree as nested threshold rules
pub fn export_text(tree: &DecisionTree, feature_names: &[String]) -> String {
    let mut out = String::new();
    render(tree.root(), feature_names, 1, &mut out);
    out
}

fn render(node: &Node, names: &[String], depth: usize, out: &mut String) {
    let indent = format!("{}--- ", "|   ".repeat(depth - 1) + "|");

    match node {
        Node::Leaf { .. } => {
            let class = u8::from(node.predicts_present());
            let _ = writeln!(out, "{}class: {}", indent, class);
        }
        Node::Split {
            feature,
            threshold,
            left,
            right,
            ..
        } => {
            let name = names
                .get(*feature)
                .cloned()
                .unwrap_or_else(|| format!("feature_{}", feature));

            let _ = writeln!(out, "{}{} <= {:.2}", indent, name, threshold);
            render(left, names, depth + 1, out);
            let _ = writeln!(out, "{}{} >  {:.2}", indent, name, threshold);
            render(right, names, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::tree::TreeParams;

    fn names() -> Vec<String> {
        vec!["Thirst".to_string(), "Fatigue".to_string()]
    }

    #[test]
    fn test_single_split() {
        let x = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        let tree = DecisionTree::fit(&x, &[false, true], &TreeParams::default());

        let text = export_text(&tree, &names());
        assert_eq!(
            text,
            "|--- Thirst <= 0.50\n|   |--- class: 0\n|--- Thirst >  0.50\n|   |--- class: 1\n"
        );
    }

    #[test]
    fn test_leaf_only() {
        let x = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        let tree = DecisionTree::fit(&x, &[true, true], &TreeParams::default());
        assert_eq!(export_text(&tree, &names()), "|--- class: 1\n");
    }

    #[test]
    fn test_nested_indentation() {
        let x = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![1.0, 1.0],
        ];
        let y = [false, false, false, true, true];
        let tree = DecisionTree::fit(&x, &y, &TreeParams::default());

        let text = export_text(&tree, &names());
        assert!(text.contains("|   |--- "));
        assert!(text.lines().any(|l| l.ends_with("class: 1")));
    }

    #[test]
    fn test_unknown_feature_index_is_named() {
        let x = vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]];
        let tree = DecisionTree::fit(&x, &[false, true], &TreeParams::default());
        assert!(export_text(&tree, &names()).contains("feature_2 <= 0.50"));
    }
}
