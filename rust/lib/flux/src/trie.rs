use std::collections::HashMap;
use std::sync::RwLock;

/// Pattern index over `/`-separated paths with MQTT-style wildcards.
///
/// - `+` matches exactly one level (`page/+/state` matches `page/clients/state`)
/// - `#` matches zero or more trailing levels and must be the last segment
///
/// Used for both state subscriptions and translation handler routing.
pub struct Trie<T> {
    root: RwLock<Node<T>>,
}

struct Node<T> {
    literal: HashMap<String, Node<T>>,
    single: Option<Box<Node<T>>>,
    /// Values registered with a trailing `#` at this level.
    rest: Vec<T>,
    /// Values whose pattern ends exactly here.
    values: Vec<T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literal: HashMap::new(),
            single: None,
            rest: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T: Clone> Trie<T> {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::default()),
        }
    }

    /// Register `value` under `pattern`.
    pub fn insert(&self, pattern: &str, value: T) {
        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let mut node = &mut *root;
        for segment in segments(pattern) {
            node = match segment {
                "#" => {
                    node.rest.push(value);
                    return;
                }
                "+" => node.single.get_or_insert_with(Box::default).as_mut(),
                literal => node.literal.entry(literal.to_string()).or_default(),
            };
        }
        node.values.push(value);
    }

    /// All values whose pattern matches the concrete `topic`, in
    /// registration order per node: exact first, then `+`, then `#`.
    pub fn match_topic(&self, topic: &str) -> Vec<T> {
        let root = self.root.read().unwrap_or_else(|e| e.into_inner());
        let parts: Vec<&str> = segments(topic).collect();
        let mut out = Vec::new();
        root.collect(&parts, &mut out);
        out
    }

    /// Remove values under the exact `pattern` for which `predicate` holds.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove<F>(&self, pattern: &str, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut root = self.root.write().unwrap_or_else(|e| e.into_inner());
        let mut node = &mut *root;
        for segment in segments(pattern) {
            let next = match segment {
                "#" => return retain_not(&mut node.rest, &predicate),
                "+" => node.single.as_deref_mut(),
                literal => node.literal.get_mut(literal),
            };
            match next {
                Some(n) => node = n,
                None => return false,
            }
        }
        retain_not(&mut node.values, &predicate)
    }

    /// Whether any value matches `topic`.
    pub fn matches(&self, topic: &str) -> bool {
        !self.match_topic(topic).is_empty()
    }
}

impl<T: Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Node<T> {
    fn collect(&self, parts: &[&str], out: &mut Vec<T>) {
        match parts.split_first() {
            None => out.extend(self.values.iter().cloned()),
            Some((head, tail)) => {
                if let Some(child) = self.literal.get(*head) {
                    child.collect(tail, out);
                }
                if let Some(single) = &self.single {
                    single.collect(tail, out);
                }
            }
        }
        out.extend(self.rest.iter().cloned());
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn retain_not<T, F: Fn(&T) -> bool>(values: &mut Vec<T>, predicate: &F) -> bool {
    let before = values.len();
    values.retain(|v| !predicate(v));
    values.len() < before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        let trie = Trie::new();
        trie.insert("auth/state", 1);
        assert_eq!(trie.match_topic("auth/state"), vec![1]);
        assert!(trie.match_topic("auth").is_empty());
        assert!(trie.match_topic("auth/state/extra").is_empty());
    }

    #[test]
    fn single_level_wildcard() {
        let trie = Trie::new();
        trie.insert("page/+/state", 1);
        assert_eq!(trie.match_topic("page/clients/state"), vec![1]);
        assert!(trie.match_topic("page/clients/list/state").is_empty());
    }

    #[test]
    fn multi_level_wildcard_matches_zero_or_more() {
        let trie = Trie::new();
        trie.insert("page/#", 1);
        assert_eq!(trie.match_topic("page"), vec![1]);
        assert_eq!(trie.match_topic("page/orders"), vec![1]);
        assert_eq!(trie.match_topic("page/orders/items/42"), vec![1]);
        assert!(trie.match_topic("auth/state").is_empty());
    }

    #[test]
    fn root_hash_matches_everything() {
        let trie = Trie::new();
        trie.insert("#", 9);
        assert_eq!(trie.match_topic("a/b/c"), vec![9]);
        assert_eq!(trie.match_topic("x"), vec![9]);
    }

    #[test]
    fn overlapping_patterns_all_fire() {
        let trie = Trie::new();
        trie.insert("auth/state", 1);
        trie.insert("auth/+", 2);
        trie.insert("#", 3);
        let mut got = trie.match_topic("auth/state");
        got.sort();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn remove_by_predicate() {
        let trie = Trie::new();
        trie.insert("ui/toast", 1);
        trie.insert("ui/toast", 2);
        trie.insert("ui/#", 3);

        assert!(trie.remove("ui/toast", |v| *v == 1));
        assert_eq!(trie.match_topic("ui/toast"), vec![2, 3]);

        assert!(trie.remove("ui/#", |_| true));
        assert_eq!(trie.match_topic("ui/toast"), vec![2]);

        assert!(!trie.remove("never/registered", |_| true));
        assert!(!trie.remove("ui/toast", |v| *v == 99));
    }

    #[test]
    fn matches_reports_presence() {
        let trie = Trie::new();
        trie.insert("nav/+", ());
        assert!(trie.matches("nav/clients"));
        assert!(!trie.matches("nav"));
    }
}
