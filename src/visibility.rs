//! Host-provided visibility detection.
//!
//! The browser's IntersectionObserver is hidden behind [`VisibilityHost`] so the
//! section tracker and reveal triggers can be driven by scripted batches in tests.

use std::rc::Rc;

use thiserror::Error;

/// One region's report inside a visibility-change batch.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry {
    pub region: String,
    pub ratio: f64,
    pub is_intersecting: bool,
}

impl VisibilityEntry {
    pub fn new(region: impl Into<String>, ratio: f64) -> Self {
        Self {
            region: region.into(),
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    pub fn hidden(region: impl Into<String>) -> Self {
        Self::new(region, 0.0)
    }

    /// Whether this entry reports the region as on-screen at or above `threshold`.
    ///
    /// A threshold of zero means any intersection at all.
    pub fn meets(&self, threshold: f64) -> bool {
        if !self.is_intersecting {
            return false;
        }
        threshold <= 0.0 || self.ratio >= threshold
    }
}

/// Callback invoked with each batch of entries, in host delivery order.
pub type VisibilityHandler = Rc<dyn Fn(&[VisibilityEntry])>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObserveError {
    #[error("no region with id `{0}` in the document")]
    MissingRegion(String),
    #[error("visibility observer rejected `{region}`: {reason}")]
    Rejected { region: String, reason: String },
}

pub trait VisibilityHost {
    /// Start delivering batches for `region` whenever its intersection ratio crosses `threshold`.
    fn observe(
        &mut self,
        region: &str,
        threshold: f64,
        on_change: VisibilityHandler,
    ) -> Result<(), ObserveError>;

    /// Stop delivering batches for `region`. Unknown regions are ignored.
    fn unobserve(&mut self, region: &str);
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::{cell::RefCell, collections::HashSet, rc::Rc};

    use super::*;

    #[derive(Default)]
    struct Inner {
        present: HashSet<String>,
        observed: Vec<(String, f64, VisibilityHandler)>,
        unobserved: Vec<String>,
    }

    /// A host whose document contains a fixed set of regions and whose
    /// notifications are delivered by hand.
    #[derive(Clone, Default)]
    pub struct ScriptedHost {
        inner: Rc<RefCell<Inner>>,
    }

    impl ScriptedHost {
        pub fn with_regions(regions: &[&str]) -> Self {
            let host = Self::default();
            host.inner
                .borrow_mut()
                .present
                .extend(regions.iter().map(|r| r.to_string()));
            host
        }

        pub fn observed_regions(&self) -> Vec<String> {
            self.inner
                .borrow()
                .observed
                .iter()
                .map(|(r, _, _)| r.clone())
                .collect()
        }

        pub fn threshold_for(&self, region: &str) -> Option<f64> {
            self.inner
                .borrow()
                .observed
                .iter()
                .find(|(r, _, _)| r == region)
                .map(|(_, t, _)| *t)
        }

        pub fn unobserved_regions(&self) -> Vec<String> {
            self.inner.borrow().unobserved.clone()
        }

        /// Deliver one batch. Entries are grouped per distinct handler, keeping
        /// delivery order, the way a shared observer reports all of its targets.
        pub fn deliver(&self, batch: &[VisibilityEntry]) {
            let mut groups: Vec<(VisibilityHandler, Vec<VisibilityEntry>)> = Vec::new();
            {
                let inner = self.inner.borrow();
                for entry in batch {
                    let Some((_, _, handler)) =
                        inner.observed.iter().find(|(r, _, _)| *r == entry.region)
                    else {
                        continue;
                    };
                    match groups.iter_mut().find(|(h, _)| Rc::ptr_eq(h, handler)) {
                        Some((_, entries)) => entries.push(entry.clone()),
                        None => groups.push((Rc::clone(handler), vec![entry.clone()])),
                    }
                }
            }
            for (handler, entries) in groups {
                handler(entries.as_slice());
            }
        }
    }

    impl VisibilityHost for ScriptedHost {
        fn observe(
            &mut self,
            region: &str,
            threshold: f64,
            on_change: VisibilityHandler,
        ) -> Result<(), ObserveError> {
            let mut inner = self.inner.borrow_mut();
            if !inner.present.contains(region) {
                return Err(ObserveError::MissingRegion(region.to_string()));
            }
            inner.observed.push((region.to_string(), threshold, on_change));
            Ok(())
        }

        fn unobserve(&mut self, region: &str) {
            let mut inner = self.inner.borrow_mut();
            inner.observed.retain(|(r, _, _)| r != region);
            inner.unobserved.push(region.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::scripted::ScriptedHost;
    use super::*;

    #[test]
    fn test_entry_threshold() {
        assert!(VisibilityEntry::new("about", 0.45).meets(0.45));
        assert!(!VisibilityEntry::new("about", 0.4495).meets(0.45));
        assert!(!VisibilityEntry::new("about", 0.3).meets(0.45));
        assert!(VisibilityEntry::new("about", 0.01).meets(0.0));
        assert!(!VisibilityEntry::hidden("about").meets(0.0));

        // a crossing reported without intersection never counts
        let entry = VisibilityEntry {
            region: "about".to_string(),
            ratio: 0.9,
            is_intersecting: false,
        };
        assert!(!entry.meets(0.45));
    }

    #[test]
    fn test_scripted_host_missing_region() {
        let mut host = ScriptedHost::with_regions(&["about"]);
        let handler: VisibilityHandler = Rc::new(|_: &[VisibilityEntry]| {});
        assert!(host.observe("about", 0.45, handler.clone()).is_ok());
        assert_eq!(
            host.observe("nowhere", 0.45, handler),
            Err(ObserveError::MissingRegion("nowhere".to_string()))
        );
        assert_eq!(host.observed_regions(), vec!["about".to_string()]);
    }

    #[test]
    fn test_scripted_host_groups_by_handler() {
        let mut host = ScriptedHost::with_regions(&["a", "b", "c"]);
        let seen = Rc::new(RefCell::new(Vec::<Vec<String>>::new()));
        let shared: VisibilityHandler = {
            let seen = Rc::clone(&seen);
            Rc::new(move |batch: &[VisibilityEntry]| {
                seen.borrow_mut()
                    .push(batch.iter().map(|e| e.region.clone()).collect());
            })
        };
        host.observe("a", 0.0, shared.clone()).unwrap();
        host.observe("b", 0.0, shared).unwrap();

        host.deliver(&[
            VisibilityEntry::new("b", 1.0),
            VisibilityEntry::new("c", 1.0),
            VisibilityEntry::new("a", 1.0),
        ]);

        // c is never observed, a and b arrive together in delivery order
        assert_eq!(
            *seen.borrow(),
            vec![vec!["b".to_string(), "a".to_string()]]
        );

        host.unobserve("a");
        host.deliver(&[VisibilityEntry::new("a", 1.0)]);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(host.unobserved_regions(), vec!["a".to_string()]);
    }
}
