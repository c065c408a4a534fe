use std::{fmt, str::FromStr};

use serde_json::Value;

use super::normalize::SUBRESOURCES_KEY;
use crate::abstract_gateway::ServerError;

/// Address of a node in the displayed tree: the index of the root, then the
/// index into each successive `subresources` list.  Written `0/2/1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root(index: usize) -> NodePath {
        NodePath(vec![index])
    }

    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn resolve<'a>(&self, roots: &'a [Value]) -> Option<&'a Value> {
        let (first, rest) = self.0.split_first()?;
        let mut node = roots.get(*first)?;
        for index in rest {
            node = node.get(SUBRESOURCES_KEY)?.as_array()?.get(*index)?;
        }
        Some(node)
    }
}

impl FromStr for NodePath {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(ServerError::bad_input("empty node path"));
        }

        trimmed
            .split('/')
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| ServerError::bad_input(format!("bad node path: {}", s)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NodePath)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_and_prints() {
        let path: NodePath = "0/2/1".parse().unwrap();
        assert_eq!(path, NodePath::root(0).child(2).child(1));
        assert_eq!(path.to_string(), "0/2/1");
        assert_eq!(path.depth(), 3);
        assert_eq!("/3/".parse::<NodePath>().unwrap(), NodePath::root(3));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<NodePath>().is_err());
        assert!("a/1".parse::<NodePath>().is_err());
        assert!("1//2".parse::<NodePath>().is_err());
        assert!("-1".parse::<NodePath>().is_err());
    }

    #[test]
    fn resolves_through_subresources() {
        let roots = vec![
            json!({"name": "a"}),
            json!({"name": "b", "subresources": [{"name": "b0"}, {"name": "b1", "subresources": [{"name": "b1x"}]}]}),
        ];
        let resolve = |s: &str| s.parse::<NodePath>().unwrap().resolve(&roots).cloned();

        assert_eq!(resolve("0"), Some(json!({"name": "a"})));
        assert_eq!(resolve("1/1/0"), Some(json!({"name": "b1x"})));
        assert_eq!(resolve("2"), None);
        assert_eq!(resolve("0/0"), None);
        assert_eq!(resolve("1/5"), None);
    }
}
