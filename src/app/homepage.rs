use std::time::Duration;

use leptos::{either::*, prelude::*};
use leptos_meta::Title;

use crate::{
    content::{portfolio, Owner, Project, Skill, SocialKind, SocialLink, TimelineEntry},
    motion::{Hover, RevealMode, Transition},
    sections::SectionId,
};

use super::{backdrop::SplineScene, header::scroll_to, reveal::Reveal, ThemeHandle};

const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Follow which section is on-screen for as long as the page is mounted.
#[cfg(feature = "hydrate")]
fn track_sections() {
    use super::{dom::DomVisibilityHost, ActiveSection};
    use crate::sections::{SectionTracker, TrackerOptions};

    let ActiveSection(active) = expect_context::<ActiveSection>();
    let tracker = StoredValue::new_local(None::<SectionTracker<DomVisibilityHost>>);
    Effect::new(move |_| {
        let attached = SectionTracker::attach(
            DomVisibilityHost::default(),
            TrackerOptions::default(),
            move |section| active.set(section),
        );
        tracker.set_value(Some(attached));
    });
}

#[component]
pub fn HomePage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    track_sections();

    match portfolio() {
        Ok(p) => Either::Left(view! {
            <Title text="Portfolio" />
            <Hero owner=&p.owner />
            <About owner=&p.owner />
            <Skills skills=&p.skills />
            <Projects projects=&p.projects />
            <Education entries=&p.education />
            <Experience entries=&p.experience />
            <Contact owner=&p.owner />
            <Footer owner=&p.owner />
        }),
        Err(err) => Either::Right(view! {
            <Title text="Unavailable" />
            <section id=SectionId::Hero.region_id() class="section content-error">
                <p>"This portfolio couldn't be loaded."</p>
                <pre>{err.to_string()}</pre>
            </section>
        }),
    }
}

#[component]
fn SectionHeader(
    key: &'static str,
    title: &'static str,
    #[prop(optional)] subtitle: Option<&'static str>,
) -> impl IntoView {
    let key = format!("{key}-header");
    let entrance = Transition::rise(30.0);

    view! {
        <Reveal key=key transition=entrance class="section-header">
            <h2 class="section-title">{title}</h2>
            <div class="title-underline"></div>
            {subtitle.map(|s| view! { <p class="section-subtitle">{s}</p> })}
        </Reveal>
    }
}

#[component]
fn Hero(owner: &'static Owner) -> impl IntoView {
    let entrance = Transition::rise(50.0)
        .with_duration(ms(800))
        .with_delay(ms(200));
    let (highlight, rest) = owner
        .headline
        .split_first()
        .map(|(first, rest)| (first.as_str(), rest))
        .unwrap_or(("", &[][..]));

    view! {
        <section id=SectionId::Hero.region_id() class="hero-section">
            <div class="hero-content">
                <Reveal key="hero" transition=entrance mode=RevealMode::OnMount class="hero-text">
                    <h1 class="hero-title">
                        <span class="gradient-text">{highlight}</span>
                        {rest
                            .iter()
                            .map(|line| {
                                view! {
                                    <br />
                                    {line.as_str()}
                                }
                            })
                            .collect_view()}
                    </h1>
                    <p class="hero-description">{owner.tagline.as_str()}</p>
                    <div class="hero-buttons">
                        <a
                            href="#projects"
                            class="btn-primary"
                            on:click=move |ev| {
                                ev.prevent_default();
                                scroll_to(SectionId::Projects);
                            }
                        >
                            "View Projects"
                        </a>
                        <a
                            href=owner.compose_url.as_str()
                            class="btn-secondary"
                            target="_blank"
                            rel="noopener noreferrer"
                            aria-label="Compose email"
                        >
                            "Contact Me"
                        </a>
                    </div>
                </Reveal>
            </div>
            <div class="hero-spline" aria-hidden="true">
                <SplineScene url=owner.scene_url.as_str() />
                <div class="spline-gradient-overlay"></div>
            </div>
        </section>
    }
}

#[component]
fn About(owner: &'static Owner) -> impl IntoView {
    let theme = expect_context::<ThemeHandle>().theme;
    let text = Transition::slide(-50.0).with_delay(ms(200));
    let image = Transition::grow(0.8).with_delay(ms(400));

    view! {
        <section id=SectionId::About.region_id() class="section about-section">
            <div class="container">
                <SectionHeader key="about" title="About Me" />
                <div class="about-content">
                    <Reveal key="about-text" transition=text class="about-text">
                        <p>{owner.about.as_str()}</p>
                        <SocialLinks links=&owner.socials />
                    </Reveal>
                    <Reveal key="about-image" transition=image class="profile-image-container">
                        <img
                            src=move || theme.get().profile_image()
                            alt=owner.name.as_str()
                            class="profile-image"
                        />
                    </Reveal>
                </div>
            </div>
        </section>
    }
}

#[component]
fn SocialLinks(links: &'static [SocialLink]) -> impl IntoView {
    view! {
        <div class="social-links">
            {links
                .iter()
                .map(|link| {
                    let icon = match link.kind {
                        SocialKind::LinkedIn => EitherOf3::A(view! {
                            <span class="social-in" aria-hidden="true">"in"</span>
                        }),
                        SocialKind::GitHub => EitherOf3::B(view! {
                            <img src="/github.svg" alt="GitHub" class="social-img" />
                        }),
                        SocialKind::LeetCode => EitherOf3::C(view! {
                            <span class="code-symbol" aria-hidden="true">"</>"</span>
                        }),
                    };
                    view! {
                        <a
                            href=link.href.as_str()
                            target="_blank"
                            rel="noopener noreferrer"
                            aria-label=link.label.as_str()
                            title=link.label.as_str()
                        >
                            {icon}
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn Skills(skills: &'static [Skill]) -> impl IntoView {
    let card = Transition::rise(30.0)
        .with_duration(ms(400))
        .with_stagger(ms(100));
    let hover = Hover::lift(5.0).with_scale(1.02);

    view! {
        <section class="section skills-section">
            <div class="container">
                <SectionHeader key="skills" title="Technical Skills" />
                <div class="skills-grid">
                    {skills
                        .iter()
                        .enumerate()
                        .map(|(index, skill)| {
                            let key = format!("skill-{index}");
                            view! {
                                <Reveal key=key transition=card index=index>
                                    <div class="skill-card hoverable" style=hover.css()>
                                        <div class="skill-icon-wrapper">
                                            <img
                                                src=skill.icon.as_str()
                                                alt=skill.name.as_str()
                                                class="skill-icon"
                                            />
                                        </div>
                                        <h3 class="skill-name">{skill.name.as_str()}</h3>
                                        <div class="skill-progress">
                                            <div
                                                class="skill-progress-bar"
                                                style=skill.bar_style()
                                            ></div>
                                        </div>
                                    </div>
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn Projects(projects: &'static [Project]) -> impl IntoView {
    let card = Transition::rise(30.0).with_stagger(ms(200));
    let hover = Hover::lift(10.0);

    view! {
        <section id=SectionId::Projects.region_id() class="section projects-section">
            <div class="container">
                <SectionHeader key="projects" title="Featured Projects" />
                <div class="projects-grid">
                    {projects
                        .iter()
                        .enumerate()
                        .map(|(index, project)| {
                            let key = format!("project-{index}");
                            view! {
                                <Reveal key=key transition=card index=index>
                                    <div class="project-card hoverable" style=hover.css()>
                                        <div class="project-image" style=project.image_style()>
                                            <div class="project-overlay">
                                                <button class="view-project-btn">"View Project"</button>
                                            </div>
                                        </div>
                                        <div class="project-content">
                                            <h3 class="project-title">{project.title.as_str()}</h3>
                                            <p class="project-description">
                                                {project.description.as_str()}
                                            </p>
                                            <div class="project-tech">
                                                {project
                                                    .tech
                                                    .iter()
                                                    .map(|tech| {
                                                        view! { <span class="tech-tag">{tech.as_str()}</span> }
                                                    })
                                                    .collect_view()}
                                            </div>
                                        </div>
                                    </div>
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn TimelineItem(entry: &'static TimelineEntry) -> impl IntoView {
    view! {
        <div class="education-content">
            <div class="education-year">{entry.period.as_str()}</div>
            <h3 class="education-degree">{entry.title.as_str()}</h3>
            <h4 class="education-institution">{entry.organization.as_str()}</h4>
            {entry
                .location
                .as_deref()
                .map(|location| view! { <p class="education-location">{location}</p> })}
            <p class="education-description">{entry.description.as_str()}</p>
        </div>
    }
}

#[component]
fn Education(entries: &'static [TimelineEntry]) -> impl IntoView {
    view! {
        <section class="section education-section">
            <div class="container">
                <SectionHeader key="education" title="Education" />
                <div class="education-timeline">
                    {entries
                        .iter()
                        .enumerate()
                        .map(|(index, entry)| {
                            // alternate sides down the timeline
                            let offset = if index % 2 == 0 { -50.0 } else { 50.0 };
                            let item = Transition::slide(offset).with_stagger(ms(200));
                            let key = format!("education-{index}");
                            view! {
                                <Reveal key=key transition=item index=index class="education-item">
                                    <TimelineItem entry=entry />
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn Experience(entries: &'static [TimelineEntry]) -> impl IntoView {
    let item = Transition::slide(-50.0).with_stagger(ms(200));

    view! {
        <section id=SectionId::Experience.region_id() class="section experience-section">
            <div class="container">
                <SectionHeader key="experience" title="Professional Experience" />
                <div class="education-timeline">
                    {entries
                        .iter()
                        .enumerate()
                        .map(|(index, entry)| {
                            let key = format!("experience-{index}");
                            view! {
                                <Reveal key=key transition=item index=index class="education-item">
                                    <TimelineItem entry=entry />
                                </Reveal>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn Contact(owner: &'static Owner) -> impl IntoView {
    let email = Transition::grow(0.8).with_duration(ms(400));
    let hover = Hover::grow(1.05);

    view! {
        <section id=SectionId::Contact.region_id() class="section contact-section">
            <div class="container">
                <SectionHeader
                    key="contact"
                    title="Get In Touch"
                    subtitle="Let's collaborate on exciting projects or discuss opportunities"
                />
                <div class="contact-content">
                    <Reveal key="contact-email" transition=email class="contact-email-wrapper">
                        <a
                            href=owner.compose_url.as_str()
                            class="contact-email hoverable"
                            style=hover.css()
                            target="_blank"
                            rel="noopener noreferrer"
                            aria-label="Compose email"
                        >
                            {owner.email.as_str()}
                        </a>
                    </Reveal>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Footer(owner: &'static Owner) -> impl IntoView {
    view! {
        <footer class="footer">
            <div class="container">
                <p>
                    "© " {env!("BUILD_YEAR")} " " {owner.name.as_str()} ". All rights reserved."
                </p>
            </div>
        </footer>
    }
}
