use leptos::{html, prelude::*};

use crate::{sections::SectionId, theme::Theme};

/// Web component that renders the decorative 3D scene.
pub const SPLINE_VIEWER_SCRIPT: &str =
    "https://unpkg.com/@splinetool/viewer@1.9.48/build/spline-viewer.js";

/// Full-viewport canvas behind the page, painted with the theme's gradient.
#[component]
pub fn BackgroundCanvas(theme: ReadSignal<Theme>, active: ReadSignal<SectionId>) -> impl IntoView {
    let canvas_ref = NodeRef::<html::Canvas>::new();

    #[cfg(feature = "hydrate")]
    {
        use leptos_use::{use_window_size, UseWindowSizeReturn};

        let UseWindowSizeReturn { width, height } = use_window_size();
        Effect::new(move |_| {
            let (width, height) = (width.get(), height.get());
            let theme = theme.get();
            // repaint when the active section moves too
            active.track();
            if let Some(canvas) = canvas_ref.get() {
                super::dom::paint_backdrop(&canvas, theme, width, height);
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (theme, active);

    view! {
        <canvas
            node_ref=canvas_ref
            id="bgCanvas"
            aria-hidden="true"
            style="position: fixed; inset: 0; z-index: 0;"
        ></canvas>
    }
}

/// Opaque 3D scene: fills its region and never takes pointer input.
#[component]
pub fn SplineScene(#[prop(into)] url: String) -> impl IntoView {
    view! {
        <spline-viewer
            url=url
            class="spline-scene"
            style="pointer-events: none; width: 100%; height: 100%;"
        ></spline-viewer>
    }
}
