use std::{cell::Cell, rc::Rc, time::Duration};

use crate::visibility::{VisibilityEntry, VisibilityHandler, VisibilityHost};

/// Any intersection at all reveals an element.
pub const REVEAL_THRESHOLD: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl VisualState {
    pub const SETTLED: VisualState = VisualState {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Invisible, displaced by the given offsets.
    pub const fn hidden_at(x: f64, y: f64) -> Self {
        Self {
            opacity: 0.0,
            x,
            y,
            scale: 1.0,
        }
    }

    pub const fn hidden_scaled(scale: f64) -> Self {
        Self {
            opacity: 0.0,
            x: 0.0,
            y: 0.0,
            scale,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "opacity: {}; transform: translate({}px, {}px) scale({})",
            self.opacity, self.x, self.y, self.scale
        )
    }
}

/// An enter animation from `initial` to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub initial: VisualState,
    pub target: VisualState,
    pub duration: Duration,
    pub delay: Duration,
    /// Extra delay per position in a sibling sequence.
    pub stagger: Duration,
}

impl Transition {
    pub fn from_state(initial: VisualState) -> Self {
        Self {
            initial,
            target: VisualState::SETTLED,
            duration: Duration::from_millis(600),
            delay: Duration::ZERO,
            stagger: Duration::ZERO,
        }
    }

    /// Fade in while rising `offset` pixels.
    pub fn rise(offset: f64) -> Self {
        Self::from_state(VisualState::hidden_at(0.0, offset))
    }

    /// Fade in while sliding horizontally from `offset` pixels.
    pub fn slide(offset: f64) -> Self {
        Self::from_state(VisualState::hidden_at(offset, 0.0))
    }

    /// Fade in while growing from `scale`.
    pub fn grow(scale: f64) -> Self {
        Self::from_state(VisualState::hidden_scaled(scale))
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn delay_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.delay.saturating_add(self.stagger.saturating_mul(index))
    }

    /// Inline style for the element at `index` among its siblings.
    ///
    /// Both states carry the same `transition` declaration so the switch to
    /// the target state animates.
    pub fn style(&self, revealed: bool, index: usize) -> String {
        let state = if revealed {
            self.target
        } else {
            self.initial
        };
        let duration = self.duration.as_millis();
        let delay = self.delay_for(index).as_millis();
        format!(
            "{}; transition: opacity {duration}ms ease-out {delay}ms, transform {duration}ms ease-out {delay}ms",
            state.css()
        )
    }
}

/// Pointer-hover motion.
///
/// Rendered as the `--hover-transform` custom property so it can sit on an
/// element inside a [`Transition`] without fighting its inline `transform`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    /// Upward movement in pixels.
    pub lift: f64,
    pub scale: f64,
}

impl Hover {
    pub const fn lift(lift: f64) -> Self {
        Self { lift, scale: 1.0 }
    }

    pub const fn grow(scale: f64) -> Self {
        Self { lift: 0.0, scale }
    }

    pub const fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub fn css(&self) -> String {
        format!(
            "--hover-transform: translate(0px, {}px) scale({})",
            // subtracting keeps zero lift from printing as -0
            0.0 - self.lift,
            self.scale
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealMode {
    /// Reveal the first time the element intersects the viewport.
    #[default]
    OnScroll,
    /// Reveal as soon as the trigger attaches, for content visible at load.
    OnMount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Pending,
    Revealed,
}

/// One-shot enter trigger for a single element.
///
/// `Pending -> Revealed` happens at most once; later notifications are ignored.
/// Dropping the trigger releases the element's observation.
pub struct RevealTrigger<H: VisibilityHost> {
    host: H,
    region: String,
    state: Rc<Cell<RevealState>>,
    observing: bool,
}

impl<H: VisibilityHost> RevealTrigger<H> {
    pub fn attach<F>(mut host: H, region: impl Into<String>, mode: RevealMode, on_reveal: F) -> Self
    where
        F: Fn() + 'static,
    {
        let region = region.into();
        let state = Rc::new(Cell::new(RevealState::Pending));

        let observing = match mode {
            RevealMode::OnMount => {
                state.set(RevealState::Revealed);
                on_reveal();
                false
            }
            RevealMode::OnScroll => {
                let handler: VisibilityHandler = {
                    let state = Rc::clone(&state);
                    let region = region.clone();
                    Rc::new(move |batch: &[VisibilityEntry]| {
                        let visible = batch
                            .iter()
                            .any(|e| e.region == region && e.meets(REVEAL_THRESHOLD));
                        if visible && state.replace(RevealState::Revealed) == RevealState::Pending
                        {
                            log::debug!("revealed {region}");
                            on_reveal();
                        }
                    })
                };
                match host.observe(&region, REVEAL_THRESHOLD, handler) {
                    Ok(()) => true,
                    Err(err) => {
                        log::debug!("reveal target stays hidden: {err}");
                        false
                    }
                }
            }
        };

        Self {
            host,
            region,
            state,
            observing,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state.get()
    }

    pub fn is_revealed(&self) -> bool {
        self.state() == RevealState::Revealed
    }
}

impl<H: VisibilityHost> Drop for RevealTrigger<H> {
    fn drop(&mut self) {
        if self.observing {
            self.host.unobserve(&self.region);
        }
    }
}
