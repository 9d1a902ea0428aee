use std::{cell::Cell, fmt, rc::Rc};

use crate::visibility::{ObserveError, VisibilityEntry, VisibilityHandler, VisibilityHost};

/// Fraction of a section that must be on-screen for it to become active.
pub const ACTIVE_THRESHOLD: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SectionId {
    #[default]
    Hero,
    About,
    Projects,
    Experience,
    Contact,
}

impl SectionId {
    /// Document order.
    pub const ALL: [SectionId; 5] = [
        Self::Hero,
        Self::About,
        Self::Projects,
        Self::Experience,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Contact => "contact",
        }
    }

    /// The element id of the region this section occupies.
    pub fn region_id(self) -> &'static str {
        match self {
            Self::Hero => "hero-section",
            other => other.as_str(),
        }
    }

    pub fn from_region_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.region_id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Experience => "Experience",
            Self::Contact => "Contact",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How to choose between several sections crossing the threshold in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The last qualifying entry in delivery order wins.
    #[default]
    LastReported,
    /// The qualifying entry with the largest intersection ratio wins,
    /// falling back to delivery order on equal ratios.
    LargestRatio,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerOptions {
    pub threshold: f64,
    pub tie_break: TieBreak,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            threshold: ACTIVE_THRESHOLD,
            tie_break: TieBreak::default(),
        }
    }
}

/// Pick the section a batch makes active, if any entry qualifies.
///
/// Entries for regions that aren't sections are ignored.
pub fn select_active(batch: &[VisibilityEntry], options: TrackerOptions) -> Option<SectionId> {
    let candidates = batch.iter().filter_map(|entry| {
        let section = SectionId::from_region_id(&entry.region)?;
        entry.meets(options.threshold).then_some((section, entry.ratio))
    });
    let winner = match options.tie_break {
        TieBreak::LastReported => candidates.last(),
        // max_by keeps the last of equal elements
        TieBreak::LargestRatio => candidates.max_by(|(_, a), (_, b)| a.total_cmp(b)),
    };
    winner.map(|(section, _)| section)
}

/// Keeps the active section in step with what the host reports as visible.
///
/// Observation of every section starts in [`SectionTracker::attach`] and is
/// released by [`SectionTracker::detach`] or when the tracker is dropped.
pub struct SectionTracker<H: VisibilityHost> {
    host: H,
    active: Rc<Cell<SectionId>>,
    observed: Vec<SectionId>,
}

impl<H: VisibilityHost> SectionTracker<H> {
    pub fn attach<F>(mut host: H, options: TrackerOptions, on_change: F) -> Self
    where
        F: Fn(SectionId) + 'static,
    {
        let active = Rc::new(Cell::new(SectionId::default()));
        let handler: VisibilityHandler = {
            let active = Rc::clone(&active);
            Rc::new(move |batch: &[VisibilityEntry]| {
                let Some(next) = select_active(batch, options) else {
                    return;
                };
                let prev = active.replace(next);
                if prev != next {
                    log::debug!("active section {prev} -> {next}");
                    on_change(next);
                }
            })
        };

        let mut observed = Vec::with_capacity(SectionId::ALL.len());
        for section in SectionId::ALL {
            match host.observe(section.region_id(), options.threshold, Rc::clone(&handler)) {
                Ok(()) => observed.push(section),
                Err(ObserveError::MissingRegion(id)) => {
                    log::debug!("section region `{id}` not in document, skipping");
                }
                Err(err) => log::warn!("couldn't observe section {section}: {err}"),
            }
        }

        Self {
            host,
            active,
            observed,
        }
    }

    pub fn active(&self) -> SectionId {
        self.active.get()
    }

    pub fn observed(&self) -> &[SectionId] {
        &self.observed
    }

    pub fn detach(&mut self) {
        for section in self.observed.drain(..) {
            self.host.unobserve(section.region_id());
        }
    }
}

impl<H: VisibilityHost> Drop for SectionTracker<H> {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::visibility::scripted::ScriptedHost;

    const ALL_REGIONS: [&str; 5] = ["hero-section", "about", "projects", "experience", "contact"];

    fn tracker(host: &ScriptedHost) -> SectionTracker<ScriptedHost> {
        SectionTracker::attach(host.clone(), TrackerOptions::default(), |_| {})
    }

    #[test]
    fn test_region_ids() {
        assert_eq!(SectionId::Hero.region_id(), "hero-section");
        assert_eq!(SectionId::Contact.region_id(), "contact");
        for section in SectionId::ALL {
            assert_eq!(SectionId::from_region_id(section.region_id()), Some(section));
        }
        assert_eq!(SectionId::from_region_id("hero"), None);
        assert_eq!(SectionId::from_region_id("skills"), None);
    }

    #[test]
    fn test_attach_observes_all_sections() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let tracker = tracker(&host);
        assert_eq!(tracker.observed(), &SectionId::ALL);
        assert_eq!(tracker.active(), SectionId::Hero);
        assert_eq!(host.threshold_for("about"), Some(ACTIVE_THRESHOLD));
    }

    #[test]
    fn test_single_visible_section_becomes_active() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let tracker = tracker(&host);

        host.deliver(&[VisibilityEntry::new("contact", 0.8)]);
        assert_eq!(tracker.active(), SectionId::Contact);

        host.deliver(&[VisibilityEntry::new("about", 0.5)]);
        assert_eq!(tracker.active(), SectionId::About);
    }

    #[test]
    fn test_below_threshold_is_ignored() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let tracker = tracker(&host);

        host.deliver(&[VisibilityEntry::new("projects", 0.2)]);
        assert_eq!(tracker.active(), SectionId::Hero);

        host.deliver(&[
            VisibilityEntry::new("projects", 0.6),
            VisibilityEntry::hidden("hero-section"),
        ]);
        assert_eq!(tracker.active(), SectionId::Projects);
    }

    #[test]
    fn test_just_under_threshold_stays_inactive() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let tracker = tracker(&host);

        host.deliver(&[VisibilityEntry::new("about", 0.4491)]);
        assert_eq!(tracker.active(), SectionId::Hero);

        host.deliver(&[VisibilityEntry::new("about", ACTIVE_THRESHOLD)]);
        assert_eq!(tracker.active(), SectionId::About);
    }

    #[test]
    fn test_same_batch_last_reported_wins() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let tracker = tracker(&host);

        host.deliver(&[
            VisibilityEntry::new("projects", 0.9),
            VisibilityEntry::new("experience", 0.5),
        ]);
        assert_eq!(tracker.active(), SectionId::Experience);

        host.deliver(&[
            VisibilityEntry::new("experience", 0.5),
            VisibilityEntry::new("projects", 0.5),
        ]);
        assert_eq!(tracker.active(), SectionId::Projects);
    }

    #[test]
    fn test_same_batch_largest_ratio_wins() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let options = TrackerOptions {
            tie_break: TieBreak::LargestRatio,
            ..TrackerOptions::default()
        };
        let tracker = SectionTracker::attach(host.clone(), options, |_| {});

        host.deliver(&[
            VisibilityEntry::new("projects", 0.9),
            VisibilityEntry::new("experience", 0.5),
        ]);
        assert_eq!(tracker.active(), SectionId::Projects);

        // equal ratios fall back to delivery order
        host.deliver(&[
            VisibilityEntry::new("about", 0.7),
            VisibilityEntry::new("contact", 0.7),
        ]);
        assert_eq!(tracker.active(), SectionId::Contact);
    }

    #[test]
    fn test_active_stays_within_sections() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let tracker = tracker(&host);
        let batches = [
            vec![VisibilityEntry::new("about", 1.0)],
            vec![VisibilityEntry::new("footer", 1.0)],
            vec![
                VisibilityEntry::new("skills", 0.9),
                VisibilityEntry::hidden("about"),
            ],
            vec![
                VisibilityEntry::new("experience", 0.46),
                VisibilityEntry::new("contact", 0.1),
            ],
            vec![],
        ];
        for batch in &batches {
            host.deliver(batch);
            assert!(SectionId::ALL.contains(&tracker.active()));
        }
        assert_eq!(tracker.active(), SectionId::Experience);
    }

    #[test]
    fn test_missing_regions_never_become_active() {
        let host = ScriptedHost::with_regions(&["hero-section", "about", "contact"]);
        let tracker = tracker(&host);
        assert_eq!(
            tracker.observed(),
            &[SectionId::Hero, SectionId::About, SectionId::Contact]
        );

        host.deliver(&[VisibilityEntry::new("projects", 1.0)]);
        assert_eq!(tracker.active(), SectionId::Hero);
    }

    #[test]
    fn test_empty_document_observes_nothing() {
        let host = ScriptedHost::default();
        let tracker = tracker(&host);
        assert!(tracker.observed().is_empty());
        assert!(host.observed_regions().is_empty());

        host.deliver(&[VisibilityEntry::new("about", 1.0)]);
        assert_eq!(tracker.active(), SectionId::Hero);
    }

    #[test]
    fn test_on_change_fires_only_on_change() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let changes = Rc::new(RefCell::new(Vec::new()));
        let _tracker = {
            let changes = Rc::clone(&changes);
            SectionTracker::attach(host.clone(), TrackerOptions::default(), move |s| {
                changes.borrow_mut().push(s)
            })
        };

        host.deliver(&[VisibilityEntry::new("hero-section", 1.0)]);
        host.deliver(&[VisibilityEntry::new("about", 0.5)]);
        host.deliver(&[VisibilityEntry::new("about", 0.9)]);
        host.deliver(&[VisibilityEntry::new("contact", 0.5)]);

        assert_eq!(*changes.borrow(), vec![SectionId::About, SectionId::Contact]);
    }

    #[test]
    fn test_drop_releases_observation() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let changes = Rc::new(Cell::new(0));
        {
            let changes = Rc::clone(&changes);
            let _tracker =
                SectionTracker::attach(host.clone(), TrackerOptions::default(), move |_| {
                    changes.set(changes.get() + 1)
                });
            assert_eq!(host.observed_regions().len(), 5);
        }
        assert!(host.observed_regions().is_empty());
        assert_eq!(host.unobserved_regions().len(), 5);

        host.deliver(&[VisibilityEntry::new("about", 1.0)]);
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let host = ScriptedHost::with_regions(&ALL_REGIONS);
        let mut tracker = tracker(&host);
        tracker.detach();
        tracker.detach();
        drop(tracker);
        assert_eq!(host.unobserved_regions().len(), 5);
    }
}
