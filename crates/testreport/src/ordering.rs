//! Name ordering shared by every level of the report hierarchy.
//!
//! Modules, files, suites and repeatable tests are all ordered with
//! [`compare_names`], so the output sort invariant holds identically
//! at each level.

use std::cmp::Ordering;

/// Anything ordered by name in rendered output.
pub trait Named {
    /// The name used for ordering
    fn name(&self) -> &str;
}

/// Case-sensitive ordinal comparison of two names.
///
/// Compares UTF-8 bytes, so `"Zebra" < "apple"`.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Borrow and sort items by name.
///
/// The sort is stable: items with equal names keep their input order.
#[must_use]
pub fn sorted_by_name<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<&T> = items.into_iter().collect();
    sorted.sort_by(|a, b| compare_names(a.name(), b.name()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, usize);

    impl Named for Item {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_compare_is_case_sensitive() {
        assert_eq!(compare_names("Zebra", "apple"), Ordering::Less);
        assert_eq!(compare_names("apple", "apple"), Ordering::Equal);
        assert_eq!(compare_names("b", "a"), Ordering::Greater);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare_names("test", "testLogin"), Ordering::Less);
    }

    #[test]
    fn test_sorted_by_name_is_stable() {
        let items = [Item("b", 0), Item("a", 1), Item("b", 2), Item("a", 3)];
        let sorted = sorted_by_name(&items);
        let order: Vec<usize> = sorted.iter().map(|i| i.1).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_sorted_by_name_empty() {
        let items: Vec<Item> = Vec::new();
        assert!(sorted_by_name(&items).is_empty());
    }
}
