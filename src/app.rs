mod backdrop;
#[cfg(feature = "hydrate")]
mod dom;
mod header;
mod homepage;
mod reveal;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::{content::portfolio, sections::SectionId, theme::Theme};
use backdrop::{BackgroundCanvas, SPLINE_VIEWER_SCRIPT};
use header::Navbar;
use homepage::HomePage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    // the stored preference is applied once hydrated
    let theme = Theme::default().as_str();
    view! {
        <!DOCTYPE html>
        <html lang="en" data-theme=theme>
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark light" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <script type="module" src=SPLINE_VIEWER_SCRIPT></script>
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

/// Section currently highlighted in the navbar.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSection(pub RwSignal<SectionId>);

/// Read access to the theme plus the toggle action.
#[derive(Clone, Copy)]
pub struct ThemeHandle {
    pub theme: ReadSignal<Theme>,
    toggle: Callback<()>,
}

impl ThemeHandle {
    pub fn toggle(&self) {
        self.toggle.run(());
    }
}

fn provide_theme() -> ThemeHandle {
    let (theme, set_theme) = signal(Theme::default());

    // the stored preference is only reachable once hydrated
    #[cfg(feature = "hydrate")]
    let toggle = {
        use codee::string::FromToStringCodec;
        use leptos_use::storage::use_local_storage;

        use crate::theme::{ThemePreference, THEME_STORAGE_KEY};
        use dom::{DocumentTheme, LocalStorageTheme};

        let (stored, set_stored, _) =
            use_local_storage::<String, FromToStringCodec>(THEME_STORAGE_KEY);
        let preference =
            StoredValue::new_local(None::<ThemePreference<LocalStorageTheme, DocumentTheme>>);

        Effect::new(move |_| {
            let restored = ThemePreference::initialize(
                LocalStorageTheme::new(stored, set_stored),
                DocumentTheme,
            );
            set_theme.set(restored.theme());
            preference.set_value(Some(restored));
        });

        Callback::new(move |_: ()| {
            preference.update_value(|preference| {
                if let Some(preference) = preference {
                    set_theme.set(preference.toggle());
                }
            });
        })
    };
    #[cfg(not(feature = "hydrate"))]
    let toggle = Callback::new(move |_: ()| set_theme.update(|t| *t = t.toggled()));

    let handle = ThemeHandle { theme, toggle };
    provide_context(handle);
    handle
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let theme = provide_theme();
    let active = RwSignal::new(SectionId::default());
    provide_context(ActiveSection(active));

    let owner = portfolio()
        .map(|p| p.owner.name.clone())
        .unwrap_or_default();

    view! {
        // sets the document title
        <Title formatter=move |title| format!("{owner} - {title}") />

        <Router>
            <main class="modern-portfolio">
                <BackgroundCanvas theme=theme.theme active=active.read_only() />
                <Navbar />
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage />
                </Routes>
            </main>
        </Router>
    }
}
