//! Identity-stable memoization of host-supplied file lists.

use widget_host::FileList;

/// Returns whether `a` and `b` look like the same list under the cheap heuristic: equal
/// non-zero length and equal first-record identifiers.
///
/// This is a pre-filter only. Reconciliation still compares full values before pushing.
pub fn same_list_heuristic(a: &FileList, b: &FileList) -> bool {
    !b.is_empty() && a.len() == b.len() && a.first_key() == b.first_key()
}

/// Cache that hands out the same [`FileList`] handle while the incoming list "looks" unchanged.
#[derive(Debug, Clone)]
pub struct FileListMemo {
    cached: FileList,
    empty: FileList,
}

impl Default for FileListMemo {
    fn default() -> Self {
        let empty = FileList::empty();
        Self {
            cached: empty.clone(),
            empty,
        }
    }
}

impl FileListMemo {
    /// Returns a reference-stable list for `raw`.
    ///
    /// 1. Missing or empty input yields the memo's canonical empty list.
    /// 2. Input matching the cache under [`same_list_heuristic`] yields the cached handle.
    /// 3. Anything else is cached and returned as-is.
    pub fn memoize(&mut self, raw: Option<&FileList>) -> FileList {
        let Some(raw) = raw.filter(|list| !list.is_empty()) else {
            self.cached = self.empty.clone();
            return self.empty.clone();
        };
        if same_list_heuristic(&self.cached, raw) {
            return self.cached.clone();
        }
        self.cached = raw.clone();
        raw.clone()
    }

    /// Returns the currently cached list.
    pub fn cached(&self) -> &FileList {
        &self.cached
    }

    /// Forgets the cached list.
    pub fn reset(&mut self) {
        self.cached = self.empty.clone();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn list(value: serde_json::Value) -> FileList {
        FileList::from_json(&value).expect("file list")
    }

    #[test]
    fn empty_and_missing_input_share_one_canonical_list() {
        let mut memo = FileListMemo::default();
        let first = memo.memoize(None);
        let second = memo.memoize(Some(&FileList::empty()));
        assert!(first.ptr_eq(&second));
        assert!(first.is_empty());
    }

    #[test]
    fn same_length_and_first_id_return_the_cached_reference() {
        let mut memo = FileListMemo::default();
        let original = memo.memoize(Some(&list(json!([{"Id": 1}, {"Id": 2}]))));
        let next = memo.memoize(Some(&list(json!([{"Id": 1}, {"Id": 2}]))));
        assert!(next.ptr_eq(&original));
    }

    #[test]
    fn heuristic_ignores_changes_past_the_first_record() {
        let mut memo = FileListMemo::default();
        let original = memo.memoize(Some(&list(json!([{"Id": 1}, {"Id": 2}]))));
        let next = memo.memoize(Some(&list(json!([{"Id": 1}, {"Id": 99}]))));
        assert!(next.ptr_eq(&original));
    }

    #[test]
    fn length_or_first_id_change_returns_a_new_reference() {
        let mut memo = FileListMemo::default();
        let original = memo.memoize(Some(&list(json!([{"Id": 1}]))));

        let other_id = memo.memoize(Some(&list(json!([{"Id": 2}]))));
        assert!(!other_id.ptr_eq(&original));

        let longer = memo.memoize(Some(&list(json!([{"Id": 2}, {"Id": 3}]))));
        assert!(!longer.ptr_eq(&other_id));
        assert!(memo.cached().ptr_eq(&longer));
    }

    #[test]
    fn emptying_then_refilling_is_not_mistaken_for_the_old_list() {
        let mut memo = FileListMemo::default();
        let original = memo.memoize(Some(&list(json!([{"Id": 1}]))));
        memo.memoize(None);
        let refilled = memo.memoize(Some(&list(json!([{"Id": 1}]))));
        assert!(!refilled.ptr_eq(&original));
    }

    #[test]
    fn heuristic_never_matches_empty_input() {
        assert!(!same_list_heuristic(&FileList::empty(), &FileList::empty()));
    }
}
