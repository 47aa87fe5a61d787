//! Scope ordering for aggregation composition
//!
//! Records, for each distinct nesting scope used by the group fields, the
//! forward index of the first group field in that scope. Entries are kept
//! sorted by that position descending, so index 0 is the innermost scope and
//! the last entry is the outermost one.

/// First-seen position of one nesting scope (`""` is the root document)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeRank {
    pub name: String,
    pub position: usize,
}

/// Small sorted list of scopes, innermost first
#[derive(Clone, Debug, Default)]
pub struct ScopeOrder {
    ranks: Vec<ScopeRank>,
}

impl ScopeOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a group field at `position` uses `scope`
    ///
    /// A scope keeps the lowest position it has been recorded with.
    pub fn record(&mut self, scope: &str, position: usize) {
        if let Some(rank) = self.ranks.iter_mut().find(|r| r.name == scope) {
            if position < rank.position {
                rank.position = position;
                self.resort();
            }
            return;
        }
        self.ranks.push(ScopeRank {
            name: scope.to_string(),
            position,
        });
        self.resort();
    }

    fn resort(&mut self) {
        self.ranks.sort_by(|a, b| b.position.cmp(&a.position));
    }

    pub fn get(&self, index: usize) -> Option<&ScopeRank> {
        self.ranks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopeRank> {
        self.ranks.iter()
    }

    pub fn innermost(&self) -> Option<&ScopeRank> {
        self.ranks.first()
    }

    pub fn outermost(&self) -> Option<&ScopeRank> {
        self.ranks.last()
    }

    pub fn names(&self) -> Vec<&str> {
        self.ranks.iter().map(|r| r.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scan scopes the way composition does: last group field first
    fn order_of(scopes: &[&str]) -> ScopeOrder {
        let mut order = ScopeOrder::new();
        for (i, scope) in scopes.iter().enumerate().rev() {
            order.record(scope, i);
        }
        order
    }

    #[test]
    fn test_single_scope() {
        let order = order_of(&["", "", ""]);
        assert_eq!(order.names(), vec![""]);
        assert_eq!(order.innermost().unwrap().position, 0);
    }

    #[test]
    fn test_first_occurrence_wins() {
        // root at 0 and 2, orders at 1
        let order = order_of(&["", "orders", ""]);
        assert_eq!(order.names(), vec!["orders", ""]);
        assert_eq!(order.outermost().unwrap().position, 0);
        assert_eq!(order.innermost().unwrap().position, 1);
    }

    #[test]
    fn test_innermost_first() {
        let order = order_of(&["orders", "", "shipments"]);
        assert_eq!(order.names(), vec!["shipments", "", "orders"]);
    }

    #[test]
    fn test_higher_position_never_overrides() {
        let mut order = ScopeOrder::new();
        order.record("orders", 1);
        order.record("orders", 4);
        assert_eq!(order.get(0).unwrap().position, 1);
        assert!(order.get(1).is_none());
    }

    #[test]
    fn test_same_scope_swap_keeps_order() {
        let a = order_of(&["", "orders", "orders"]);
        let b = order_of(&["", "orders", "orders"]);
        assert_eq!(a.names(), b.names());

        let swapped = order_of(&["orders", "orders", ""]);
        assert_eq!(swapped.names(), vec!["", "orders"]);
    }
}
