use leptos::prelude::*;

use crate::motion::{RevealMode, Transition};

/// Wraps children in an element that plays `transition` the first time it
/// scrolls into view, or right after mount for [`RevealMode::OnMount`].
///
/// `key` must be unique on the page; it becomes the element id the browser
/// observes, so it has to match between server render and hydration.
#[component]
pub fn Reveal(
    #[prop(into)] key: String,
    transition: Transition,
    #[prop(optional)] index: usize,
    #[prop(optional)] mode: RevealMode,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let revealed = RwSignal::new(false);
    let id = format!("reveal-{key}");

    #[cfg(feature = "hydrate")]
    {
        use super::dom::DomVisibilityHost;
        use crate::motion::RevealTrigger;

        // dropped with this component's owner, which releases the observation
        let trigger = StoredValue::new_local(None::<RevealTrigger<DomVisibilityHost>>);
        let region = id.clone();
        Effect::new(move |_| {
            let region = region.clone();
            let attach = move || {
                let attached = RevealTrigger::attach(
                    DomVisibilityHost::default(),
                    region,
                    mode,
                    move || revealed.set(true),
                );
                // a removed element hands the trigger back and drops it here
                let _ = trigger.try_set_value(Some(attached));
            };
            match mode {
                // wait a frame so the initial state is painted before it animates
                RevealMode::OnMount => request_animation_frame(attach),
                RevealMode::OnScroll => attach(),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = mode;

    view! {
        <div id=id class=class style=move || transition.style(revealed.get(), index)>
            {children()}
        </div>
    }
}
