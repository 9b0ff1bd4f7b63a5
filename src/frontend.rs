use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Reflect};
use log::Level;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlAnchorElement, HtmlElement, HtmlFormElement, MouseEvent, Storage};
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

use crate::config::{MotionConfig, CONFIG_ELEMENT_ID};
use crate::contact::{ContactForm, FormEvent, FormTiming};
use crate::dom;
use crate::logging::{self, log_event};
use crate::nav::{self, Menu, SectionBounds};
use crate::theme::{self, Theme, ThemeStore, THEME_ATTRIBUTE, THEME_KEY};
use crate::tilt::{self, CardRect, Glow, Tilt};
use crate::typed::{TypedText, TypingTiming};

const RESUME_PATH: &str = "resume.pdf";
const RESUME_FILE_NAME: &str = "Devarakonda_Jayavardhan_Resume.pdf";

const NAV_ITEMS: [(&str, &str); 7] = [
    ("#home", "Home"),
    ("#about", "About"),
    ("#skills", "Skills"),
    ("#experience", "Experience"),
    ("#certifications", "Certifications"),
    ("#projects", "Projects"),
    ("#contact", "Contact"),
];

const STATS: [(&str, &str); 3] = [("12", "Projects built"), ("5", "Certifications"), ("3", "Years coding")];

const SKILLS: [(&str, &str); 8] = [
    ("fa-brands fa-java", "Java"),
    ("fa-solid fa-microchip", "Embedded C"),
    ("fa-solid fa-code", "C++"),
    ("fa-solid fa-wifi", "IoT & MQTT"),
    ("fa-brands fa-raspberry-pi", "Raspberry Pi"),
    ("fa-solid fa-bolt", "Arduino"),
    ("fa-solid fa-database", "SQL"),
    ("fa-brands fa-git-alt", "Git"),
];

struct Milestone {
    left: bool,
    period: &'static str,
    title: &'static str,
    place: &'static str,
    summary: &'static str,
}

const MILESTONES: [Milestone; 3] = [
    Milestone {
        left: true,
        period: "Recent",
        title: "Embedded Systems Projects",
        place: "Independent work",
        summary: "Sensor boards and firmware for small connected devices.",
    },
    Milestone {
        left: false,
        period: "Earlier",
        title: "Java Application Development",
        place: "Coursework and side projects",
        summary: "Desktop and backend applications with a focus on clean design.",
    },
    Milestone {
        left: true,
        period: "Start",
        title: "First IoT Prototype",
        place: "Hackathon",
        summary: "A smart-home controller built over a weekend.",
    },
];

const CERTIFICATIONS: [(&str, &str); 4] = [
    ("Java Programming", "Professional certificate"),
    ("Embedded Systems Essentials", "Online course"),
    ("Internet of Things", "Specialization"),
    ("Version Control with Git", "Online course"),
];

const EDUCATION: [(&str, &str, &str); 2] = [
    ("Bachelor of Technology", "Electronics and Communication Engineering", "In progress"),
    ("Higher Secondary", "Mathematics, Physics, Chemistry", "Completed"),
];

const PROJECTS: [(&str, &str); 3] = [
    ("Smart Energy Monitor", "Current sensing node that reports usage over MQTT."),
    ("Home Automation Hub", "Relay controller with a small web dashboard."),
    ("Inventory Manager", "Java desktop application for stock tracking."),
];

struct LocalThemeStore;

impl ThemeStore for LocalThemeStore {
    fn read(&self) -> Option<String> {
        local_storage()?.get_item(THEME_KEY).ok().flatten()
    }

    fn write(&self, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(THEME_KEY, value);
        }
    }
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn apply_theme(theme: Theme) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        }
    }
}

pub(crate) fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || {
        apply_theme(theme);
    });

    if start_view_transition
        .call1(&document_js, &callback)
        .is_err()
    {
        apply_theme(theme);
    }
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn read_sections() -> Vec<SectionBounds> {
    let Some(list) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector_all("section[id]").ok())
    else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|section| SectionBounds::new(section.id(), f64::from(section.offset_top())))
        .collect()
}

fn sync_scroll_state(active: &UseStateHandle<Option<String>>, scrolled: &UseStateHandle<bool>) {
    let scroll_y = window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
    let sections = read_sections();
    active.set(nav::active_section(scroll_y, &sections).map(ToString::to_string));
    scrolled.set(nav::is_scrolled(scroll_y));
}

fn download_resume() -> Result<(), JsValue> {
    let document = window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(RESUME_PATH);
    anchor.set_download(RESUME_FILE_NAME);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

fn on_resume_click() -> Callback<MouseEvent> {
    Callback::from(|event: MouseEvent| {
        event.prevent_default();
        if let Err(error) = download_resume() {
            log_event(
                Level::Warn,
                "resume_download_failed",
                json!({ "error": format!("{error:?}") }),
            );
        }
    })
}

#[derive(Properties, PartialEq)]
struct NavbarProps {
    theme: Theme,
    on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(Navbar)]
fn navbar(props: &NavbarProps) -> Html {
    let menu = use_state(Menu::default);
    let active = use_state_eq(|| None::<String>);
    let scrolled = use_state_eq(|| false);

    {
        let active = active.clone();
        let scrolled = scrolled.clone();
        use_effect_with((), move |_| {
            sync_scroll_state(&active, &scrolled);
            let listener = dom::listen_window("scroll", move |_| sync_scroll_state(&active, &scrolled));
            move || drop(listener)
        });
    }

    let on_hamburger = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.toggled()))
    };

    let on_link = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.closed()))
    };

    let links = NAV_ITEMS.iter().map(|(href, label)| {
        let is_active = nav::link_is_active(href, active.as_deref());
        html! {
            <li>
                <a
                    class={classes!("nav-link", is_active.then_some("active"))}
                    href={*href}
                    onclick={on_link.clone()}
                >
                    {*label}
                </a>
            </li>
        }
    });

    html! {
        <header id="navbar" class={classes!("navbar", scrolled.then_some("scrolled"))}>
            <a class="nav-logo" href="#home">{"DJ"}<span class="accent">{"."}</span></a>
            <ul id="nav-links" class={classes!("nav-links", menu.is_open().then_some("open"))}>
                { for links }
            </ul>
            <div class="nav-actions">
                <button
                    id="theme-toggle"
                    class="theme-toggle"
                    type="button"
                    aria-label={props.theme.toggle_label()}
                    onclick={props.on_toggle_theme.clone()}
                >
                    <i id="theme-icon" class={props.theme.icon()} aria-hidden="true"></i>
                </button>
                <button
                    id="hamburger"
                    class={classes!("hamburger", menu.is_open().then_some("open"))}
                    type="button"
                    aria-label="Toggle navigation"
                    aria-expanded={menu.aria_expanded()}
                    onclick={on_hamburger}
                >
                    <span></span><span></span><span></span>
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct TypedLineProps {
    phrases: Vec<String>,
    timing: TypingTiming,
}

#[function_component(TypedLine)]
fn typed_line(props: &TypedLineProps) -> Html {
    let text = use_state(String::new);

    {
        let text = text.clone();
        let phrases = props.phrases.clone();
        let timing = props.timing;
        use_effect_with((), move |_| {
            spawn_local(async move {
                let mut typed = TypedText::new(phrases, timing);
                TimeoutFuture::new(typed.start_delay_ms()).await;
                loop {
                    let frame = typed.step();
                    text.set(frame.text);
                    TimeoutFuture::new(frame.delay_ms).await;
                }
            });
            || ()
        });
    }

    html! {
        <span id="typed-text" class="typed-text">{(*text).clone()}</span>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    phrases: Vec<String>,
    timing: TypingTiming,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    html! {
        <section id="home" class="hero">
            <canvas id="hero-canvas" aria-hidden="true"></canvas>
            <div class="hero-gradient" aria-hidden="true"></div>
            <div class="hero-content">
                <p class="hero-badge">{"Available for opportunities"}</p>
                <h1 class="hero-title">
                    <span class="hero-line">{"Hi, I'm"}</span>
                    <span class="hero-line accent">{"Devarakonda Jayavardhan"}</span>
                </h1>
                <p class="hero-subtext" data-reveal="">
                    {"Java developer and embedded systems enthusiast building connected devices."}
                </p>
                <p class="hero-role">
                    {"I build "}
                    <TypedLine phrases={props.phrases.clone()} timing={props.timing} />
                    <span class="typed-caret" aria-hidden="true">{"|"}</span>
                </p>
                <div class="hero-cta">
                    <a class="btn btn-primary" href="#projects">{"View Projects"}</a>
                    <button id="resume-btn" class="btn btn-ghost" type="button" onclick={on_resume_click()}>
                        <i class="fa-solid fa-download" aria-hidden="true"></i>{" Resume"}
                    </button>
                </div>
                <div class="hero-socials">
                    <a href="https://github.com/" target="_blank" rel="noopener noreferrer" aria-label="GitHub">
                        <i class="fa-brands fa-github"></i>
                    </a>
                    <a href="https://www.linkedin.com/" target="_blank" rel="noopener noreferrer" aria-label="LinkedIn">
                        <i class="fa-brands fa-linkedin"></i>
                    </a>
                </div>
            </div>
            <a class="hero-scroll-indicator" href="#about" aria-label="Scroll to about">
                <span class="mouse"><span class="wheel"></span></span>
            </a>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SectionHeaderProps {
    tag: AttrValue,
    title: AttrValue,
    #[prop_or_default]
    subtitle: Option<AttrValue>,
}

#[function_component(SectionHeader)]
fn section_header(props: &SectionHeaderProps) -> Html {
    html! {
        <div class="section-header">
            <span class="section-tag">{props.tag.clone()}</span>
            <h2 class="section-title">{props.title.clone()}</h2>
            if let Some(subtitle) = props.subtitle.clone() {
                <p class="section-subtitle">{subtitle}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    title: AttrValue,
    summary: AttrValue,
    #[prop_or_default]
    placeholder: bool,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let card_ref = use_node_ref();
    let glow = use_state(|| None::<Glow>);
    let tilt_state = use_state(Tilt::flat);

    let onmousemove = {
        let card_ref = card_ref.clone();
        let glow = glow.clone();
        let tilt_state = tilt_state.clone();
        let placeholder = props.placeholder;
        Callback::from(move |event: MouseEvent| {
            if placeholder {
                return;
            }
            let Some(card) = card_ref.cast::<HtmlElement>() else {
                return;
            };
            let bounds = card.get_bounding_client_rect();
            let rect = CardRect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            };
            let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));

            if let Some(origin) = tilt::glow_origin(x, y, &rect) {
                glow.set(Some(origin));
            }
            if let Some(next) = tilt::tilt(x, y, &rect) {
                tilt_state.set(next);
            }
        })
    };

    let onmouseleave = {
        let tilt_state = tilt_state.clone();
        Callback::from(move |_: MouseEvent| tilt_state.set(Tilt::flat()))
    };

    let style = if props.placeholder {
        String::new()
    } else {
        let glow_style = (*glow).as_ref().map(Glow::style).unwrap_or_default();
        format!("{glow_style} {}", tilt_state.style())
    };

    html! {
        <div class="project-slot" data-reveal="">
            <article
                ref={card_ref}
                class={classes!("project-card", props.placeholder.then_some("project-placeholder"))}
                data-tilt={(!props.placeholder).then_some("")}
                style={style}
                onmousemove={onmousemove}
                onmouseleave={onmouseleave}
            >
                <div class="project-glow" aria-hidden="true"></div>
                <h3>{props.title.clone()}</h3>
                <p>{props.summary.clone()}</p>
            </article>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ContactProps {
    timing: FormTiming,
}

async fn drive_contact_form(
    machine: Rc<RefCell<ContactForm>>,
    driver: u64,
    redraw: UseForceUpdateHandle,
    form_ref: NodeRef,
) {
    loop {
        let Some(deadline) = machine.borrow().driver_deadline(driver) else {
            break;
        };
        let wait = (deadline - now_ms()).ceil().max(1.0);
        TimeoutFuture::new(wait as u32).await;

        let events = {
            let mut form = machine.borrow_mut();
            if form.driver_deadline(driver).is_none() {
                break;
            }
            form.advance(now_ms())
        };
        if events.contains(&FormEvent::Restored) {
            if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                form.reset();
            }
            log_event(Level::Info, "contact_form_sent", json!({ "simulated": true }));
        }
        if !events.is_empty() {
            redraw.force_update();
        }
    }
}

#[function_component(ContactSection)]
fn contact_section(props: &ContactProps) -> Html {
    let machine = use_mut_ref(|| ContactForm::new(props.timing));
    let redraw = use_force_update();
    let form_ref = use_node_ref();

    let onsubmit = {
        let machine = machine.clone();
        let redraw = redraw.clone();
        let form_ref = form_ref.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if !machine.borrow_mut().submit(now_ms()) {
                return;
            }
            redraw.force_update();
            let driver = machine.borrow_mut().start_driver();
            spawn_local(drive_contact_form(
                machine.clone(),
                driver,
                redraw.clone(),
                form_ref.clone(),
            ));
        })
    };

    let (disabled, label, banner_visible) = {
        let form = machine.borrow();
        (form.button_disabled(), form.button_label(), form.banner_visible())
    };
    let icon = if disabled {
        "fa-solid fa-spinner fa-spin"
    } else {
        "fa-solid fa-paper-plane"
    };

    html! {
        <section id="contact" class="section contact">
            <SectionHeader
                tag="Contact"
                title="Let's build something"
                subtitle={Some(AttrValue::from("Questions, collaborations or just a hello."))}
            />
            <div class="contact-grid">
                <div class="contact-info" data-reveal="">
                    <p>{"Prefer a document? Grab the resume."}</p>
                    <button id="download-resume" class="btn btn-ghost" type="button" onclick={on_resume_click()}>
                        <i class="fa-solid fa-file-arrow-down" aria-hidden="true"></i>{" Download Resume"}
                    </button>
                </div>
                <form id="contact-form" class="contact-form" ref={form_ref} onsubmit={onsubmit} data-reveal="" data-delay="0.1">
                    <label>{"Name"}<input name="name" type="text" required=true /></label>
                    <label>{"Email"}<input name="email" type="email" required=true /></label>
                    <label>{"Message"}<textarea name="message" rows="5" required=true></textarea></label>
                    <button class="btn btn-primary" type="submit" disabled={disabled}>
                        <span>{label}</span>{" "}<i class={icon} aria-hidden="true"></i>
                    </button>
                    <p id="form-success" class={classes!("form-success", banner_visible.then_some("visible"))} role="status">
                        {"Thanks! Your message is on its way."}
                    </p>
                </form>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<MotionConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let theme = use_state(|| theme::load_theme(&LocalThemeStore));

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            theme::persist_theme(&LocalThemeStore, current);
            dom::start();
            || ()
        });
    }

    let on_toggle = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme::toggle_theme(*theme, &LocalThemeStore);
            apply_theme_with_transition(next);
            theme.set(next);
            log_event(Level::Debug, "theme_toggled", json!({ "theme": next.as_str() }));
        })
    };

    let config = &props.config;

    html! {
        <>
            <div id="cursor" class="cursor" aria-hidden="true"></div>
            <div id="cursor-follower" class="cursor-follower" aria-hidden="true"></div>
            <Navbar theme={*theme} on_toggle_theme={on_toggle} />

            <main id="content">
                <Hero phrases={config.phrases.clone()} timing={config.typing} />

                <section id="about" class="section about">
                    <SectionHeader tag="About" title="Who I am" />
                    <p class="about-copy" data-reveal="">
                        {"I enjoy the point where software meets hardware: writing Java for the \
                          applications people use and C for the devices that sense the world."}
                    </p>
                    <div class="stats">
                        { for STATS.iter().map(|(count, label)| html! {
                            <div class="stat" data-reveal="">
                                <span class="stat-value" data-count={*count}>{"0"}</span>
                                <span class="stat-label">{*label}</span>
                            </div>
                        }) }
                    </div>
                </section>

                <section id="skills" class="section skills">
                    <SectionHeader
                        tag="Skills"
                        title="Tools of the trade"
                        subtitle={Some(AttrValue::from("Languages, boards and everything in between."))}
                    />
                    <div class="skills-grid">
                        { for SKILLS.iter().map(|(icon, name)| html! {
                            <div class="skill-card">
                                <i class={*icon} aria-hidden="true"></i>
                                <span>{*name}</span>
                                <span class="skill-fill" aria-hidden="true"></span>
                            </div>
                        }) }
                    </div>
                </section>

                <section id="experience" class="section experience">
                    <SectionHeader tag="Journey" title="Experience" />
                    <div class="timeline">
                        { for MILESTONES.iter().map(|milestone| html! {
                            <div class={if milestone.left { "timeline-left" } else { "timeline-right" }}>
                                <div class="timeline-card">
                                    <span class="timeline-period">{milestone.period}</span>
                                    <h3>{milestone.title}</h3>
                                    <p class="timeline-place">{milestone.place}</p>
                                    <p>{milestone.summary}</p>
                                </div>
                            </div>
                        }) }
                    </div>
                </section>

                <section id="certifications" class="section certifications">
                    <SectionHeader tag="Credentials" title="Certifications" />
                    <div class="certs-grid">
                        { for CERTIFICATIONS.iter().map(|(name, kind)| html! {
                            <div class="cert-card">
                                <i class="fa-solid fa-award" aria-hidden="true"></i>
                                <h3>{*name}</h3>
                                <p>{*kind}</p>
                            </div>
                        }) }
                    </div>
                    <div class="education">
                        { for EDUCATION.iter().map(|(degree, field, status)| html! {
                            <div class="edu-item">
                                <h3>{*degree}</h3>
                                <p>{*field}</p>
                                <span class="edu-status">{*status}</span>
                                <span class="edu-fill" aria-hidden="true"></span>
                            </div>
                        }) }
                    </div>
                </section>

                <section id="projects" class="section projects">
                    <SectionHeader tag="Work" title="Projects" />
                    <div class="projects-grid">
                        { for PROJECTS.iter().map(|(title, summary)| html! {
                            <ProjectCard title={*title} summary={*summary} />
                        }) }
                        <ProjectCard title="More on the way" summary="New builds are in progress." placeholder=true />
                    </div>
                </section>

                <ContactSection timing={config.form} />
            </main>

            <footer class="footer">
                <nav class="footer-nav">
                    { for NAV_ITEMS.iter().map(|(href, label)| html! { <a href={*href}>{*label}</a> }) }
                </nav>
                <p>{"Built with Rust and WebAssembly."}</p>
            </footer>
        </>
    }
}

fn read_config_source() -> Option<String> {
    window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

pub fn run() {
    console_error_panic_hook::set_once();

    let parsed = read_config_source().map(|source| MotionConfig::from_json(&source));
    let config = match &parsed {
        Some(Ok(config)) => config.clone(),
        _ => MotionConfig::default(),
    };

    logging::init(config.log_level);
    if let Some(Err(error)) = &parsed {
        log_event(
            Level::Warn,
            "config_invalid",
            json!({ "error": error.to_string() }),
        );
    }

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
}
