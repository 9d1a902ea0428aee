use leptos::{either::Either, prelude::*};

use crate::{content::portfolio, sections::SectionId};

use super::{ActiveSection, ThemeHandle};

/// Smoothly scroll the section's region to the top of the viewport.
pub fn scroll_to(section: SectionId) {
    #[cfg(feature = "hydrate")]
    super::dom::scroll_to(section);
    #[cfg(not(feature = "hydrate"))]
    let _ = section;
}

#[component]
pub fn Navbar() -> impl IntoView {
    let ActiveSection(active) = expect_context::<ActiveSection>();
    let brand = portfolio()
        .map(|p| p.owner.name.clone())
        .unwrap_or_default();

    view! {
        <header class="navbar" role="navigation" aria-label="Main navigation">
            <div class="nav-brand" on:click=move |_| scroll_to(SectionId::Hero)>
                {brand}
            </div>
            <div class="nav-links" role="menu" aria-label="Sections">
                {SectionId::ALL
                    .into_iter()
                    .filter(|s| *s != SectionId::Hero)
                    .map(|section| {
                        view! {
                            <button
                                class="nav-btn"
                                class:active=move || active.get() == section
                                aria-label=section.label()
                                aria-current=move || (active.get() == section).then_some("true")
                                on:click=move |_| scroll_to(section)
                            >
                                {section.label()}
                            </button>
                        }
                    })
                    .collect_view()}
                <ThemeToggle />
            </div>
        </header>
    }
}

#[component]
fn ThemeToggle() -> impl IntoView {
    let handle = expect_context::<ThemeHandle>();
    let theme = handle.theme;

    view! {
        <button
            class="theme-toggle"
            on:click=move |_| handle.toggle()
            aria-label="Toggle theme"
            title=move || {
                if theme.get().is_dark() { "Switch to light" } else { "Switch to dark" }
            }
        >
            {move || {
                if theme.get().is_dark() {
                    Either::Left(view! { <SunIcon /> })
                } else {
                    Either::Right(view! { <MoonIcon /> })
                }
            }}
        </button>
    }
}

#[component]
fn SunIcon() -> impl IntoView {
    view! {
        <svg class="theme-icon" viewBox="0 0 24 24" fill="none" aria-hidden="true">
            <circle cx="12" cy="12" r="4" fill="currentColor" />
            <g stroke="currentColor" stroke-width="1.2" stroke-linecap="round">
                <line x1="12" y1="1.5" x2="12" y2="4.5" />
                <line x1="12" y1="19.5" x2="12" y2="22.5" />
                <line x1="1.5" y1="12" x2="4.5" y2="12" />
                <line x1="19.5" y1="12" x2="22.5" y2="12" />
                <line x1="4.2" y1="4.2" x2="6.1" y2="6.1" />
                <line x1="17.9" y1="17.9" x2="19.8" y2="19.8" />
                <line x1="4.2" y1="19.8" x2="6.1" y2="17.9" />
                <line x1="17.9" y1="6.1" x2="19.8" y2="4.2" />
            </g>
        </svg>
    }
}

#[component]
fn MoonIcon() -> impl IntoView {
    view! {
        <svg class="theme-icon" viewBox="0 0 24 24" fill="none" aria-hidden="true">
            <path d="M21 12.8A8.5 8.5 0 1111.2 3a6.5 6.5 0 109.8 9.8z" fill="currentColor" />
        </svg>
    }
}
