use std::collections::BTreeSet;

/// Session ids checked in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// True when every displayed id is checked. An empty display is never
    /// "all selected".
    pub fn is_all_selected<'a, I>(&self, displayed: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut any = false;
        for id in displayed {
            any = true;
            if !self.ids.contains(id) {
                return false;
            }
        }
        any
    }

    /// Select-all checkbox. Selects exactly the displayed ids, or clears the
    /// selection when they were all selected already.
    pub fn toggle_all<'a, I>(&mut self, displayed: I)
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        if self.is_all_selected(displayed.clone()) {
            self.ids.clear();
        } else {
            self.ids = displayed.into_iter().map(str::to_string).collect();
        }
    }

    /// Drops ids that no longer exist, e.g. after a reload.
    pub fn retain_existing<'a, I>(&mut self, existing: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let existing: BTreeSet<&str> = existing.into_iter().collect();
        self.ids.retain(|id| existing.contains(id.as_str()));
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_single() {
        let mut selection = Selection::new();
        selection.toggle("a");
        assert!(selection.contains("a"));
        selection.toggle("a");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_selects_exactly_displayed() {
        let mut selection = Selection::new();
        selection.toggle("hidden");
        selection.toggle("a");

        let displayed = ["a", "b", "c"];
        selection.toggle_all(displayed.iter().copied());
        assert_eq!(selection.ids(), vec!["a", "b", "c"]);
        assert!(selection.is_all_selected(displayed.iter().copied()));
    }

    #[test]
    fn test_toggle_all_twice_returns_to_empty() {
        let mut selection = Selection::new();
        let displayed = ["a", "b"];
        selection.toggle_all(displayed.iter().copied());
        selection.toggle_all(displayed.iter().copied());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_display_is_not_all_selected() {
        let selection = Selection::new();
        assert!(!selection.is_all_selected(std::iter::empty()));
    }

    #[test]
    fn test_retain_existing() {
        let mut selection = Selection::new();
        selection.toggle("a");
        selection.toggle("gone");
        selection.retain_existing(["a", "b"].iter().copied());
        assert_eq!(selection.ids(), vec!["a"]);
    }
}
