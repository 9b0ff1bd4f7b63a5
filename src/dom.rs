//! Browser runtime for everything the page animates outside of yew's render
//! cycle. A single `requestAnimationFrame` loop owns the scheduler, the
//! custom cursor, the hero particles and the backdrop parallax.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use log::Level;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, CanvasRenderingContext2d, Document, Event, EventTarget,
    HtmlCanvasElement, HtmlElement, MouseEvent, NodeList, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::cursor::{self, CursorFollower};
use crate::frontend::prefers_reduced_motion;
use crate::logging::log_event;
use crate::particles::{self, Link, ParticleField, Surface};
use crate::reveal::{self, HeaderParts, Side};
use crate::scheduler::{frame_delta, Scheduler, Stage};
use crate::tilt::{SKILL_HOVER_IN, SKILL_HOVER_OUT, SKILL_HOVER_SCALE};
use crate::timeline::{EntranceTimeline, HeroTargets};
use crate::tween::{Ease, Pose, TweenSpec};

/// An event listener that is removed again when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Keeps the listener attached for the lifetime of the page.
    fn persist(self) {
        std::mem::forget(self);
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;

    Ok(Listener {
        target: target.clone(),
        event,
        callback,
    })
}

/// Passive listener on `window`, `None` outside a browser.
pub(crate) fn listen_window(
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Option<Listener> {
    let win = window()?;
    listen(&win, event, true, handler).ok()
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn select_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    document
        .query_selector_all(selector)
        .map(html_elements)
        .unwrap_or_default()
}

fn select_one(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into().ok())
}

fn select_child(parent: &HtmlElement, selector: &str) -> Option<HtmlElement> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into().ok())
}

struct DomStage;

impl Stage<HtmlElement> for DomStage {
    fn apply(&mut self, target: &HtmlElement, pose: &Pose) {
        let style = target.style();
        if let Some(opacity) = pose.opacity {
            let _ = style.set_property("opacity", &format!("{opacity:.3}"));
        }
        if let Some(transform) = pose.transform() {
            let _ = style.set_property("transform", &transform);
        }
        if let Some(text) = pose.count_text() {
            target.set_text_content(Some(&text));
        }
    }

    fn add_class(&mut self, target: &HtmlElement, class: &str) {
        let _ = target.class_list().add_1(class);
    }
}

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, alpha: f64) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        self.ctx.set_fill_style_str(&particles::rgba(alpha));
        self.ctx.fill();
    }

    fn line(&mut self, link: &Link) {
        self.ctx.begin_path();
        self.ctx.move_to(link.from.0, link.from.1);
        self.ctx.line_to(link.to.0, link.to.1);
        self.ctx.set_stroke_style_str(&particles::rgba(link.alpha));
        self.ctx.set_line_width(particles::LINK_WIDTH);
        self.ctx.stroke();
    }
}

struct HeroCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: ParticleField<SmallRng>,
}

impl HeroCanvas {
    fn mount(document: &Document) -> Result<Option<Self>, JsValue> {
        let Some(element) = document.get_element_by_id("hero-canvas") else {
            return Ok(None);
        };
        let canvas: HtmlCanvasElement = element.dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let (width, height) = parent_size(&canvas);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let field = ParticleField::new(width, height, SmallRng::seed_from_u64(seed));
        Ok(Some(Self { canvas, ctx, field }))
    }

    fn resize(&mut self) {
        let (width, height) = parent_size(&self.canvas);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field.resize(width, height);
    }

    fn frame(&mut self) {
        self.field.tick();
        self.field.draw(&mut CanvasSurface { ctx: &self.ctx });
    }
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    canvas
        .parent_element()
        .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
        .map(|parent| (f64::from(parent.offset_width()), f64::from(parent.offset_height())))
        .unwrap_or((f64::from(canvas.width()), f64::from(canvas.height())))
}

struct Parallax {
    hero: HtmlElement,
    backdrop: HtmlElement,
}

struct Runtime {
    scheduler: Scheduler<HtmlElement>,
    stage: DomStage,
    entrance: EntranceTimeline,
    cursor: CursorFollower,
    cursor_dot: Option<HtmlElement>,
    cursor_follower: Option<HtmlElement>,
    canvas: Option<HeroCanvas>,
    parallax: Option<Parallax>,
    viewport_dirty: bool,
    last_frame_ms: Option<f64>,
}

impl Runtime {
    fn pointer_moved(&mut self, x: f64, y: f64) {
        self.cursor.pointer_moved(x, y);
        if let Some(dot) = &self.cursor_dot {
            self.scheduler.tween_to(
                dot.clone(),
                TweenSpec::to(Pose::at(x, y), cursor::DOT_CATCH_UP).ease(Ease::Power2Out),
            );
        }
    }

    fn frame(&mut self, now_ms: f64) {
        let dt = frame_delta(self.last_frame_ms, now_ms);
        self.last_frame_ms = Some(now_ms);

        if let Some(follower) = &self.cursor_follower {
            let at = self.cursor.tick();
            self.stage.apply(follower, &Pose::at(at.x, at.y));
        }
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.frame();
        }
        if self.viewport_dirty {
            self.viewport_dirty = false;
            self.sync_viewport();
        }
        self.scheduler.advance(dt, &mut self.stage);
    }

    fn sync_viewport(&mut self) {
        let Some(win) = window() else {
            return;
        };
        let viewport_height = win
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);

        let fired = self
            .scheduler
            .scroll(viewport_height, element_top, &mut self.stage);
        if fired > 0 {
            log_event(
                Level::Debug,
                "reveal_fired",
                json!({ "count": fired, "pending": self.scheduler.pending_triggers() }),
            );
        }

        if let Some(parallax) = &self.parallax {
            let scroll_y = win.scroll_y().unwrap_or(0.0);
            let pose = reveal::parallax_pose(
                scroll_y,
                f64::from(parallax.hero.offset_top()),
                f64::from(parallax.hero.offset_height()),
            );
            self.stage.apply(&parallax.backdrop, &pose);
        }
    }

    fn set_hovering(&mut self, hovering: bool, body: Option<&HtmlElement>) {
        if !self.cursor.set_hovering(hovering) {
            return;
        }
        if let Some(body) = body {
            let classes = body.class_list();
            let _ = if hovering {
                classes.add_1(cursor::HOVER_CLASS)
            } else {
                classes.remove_1(cursor::HOVER_CLASS)
            };
        }
    }
}

fn element_top(element: &HtmlElement) -> Option<f64> {
    element
        .is_connected()
        .then(|| element.get_bounding_client_rect().top())
}

fn play_entrance(document: &Document, runtime: &mut Runtime) {
    let hero = HeroTargets {
        badge: select_one(document, ".hero-badge"),
        lines: select_all(document, ".hero-line"),
        subtext: select_one(document, ".hero-subtext"),
        role: select_one(document, ".hero-role"),
        cta: select_one(document, ".hero-cta"),
        socials: select_one(document, ".hero-socials"),
        scroll_indicator: select_one(document, ".hero-scroll-indicator"),
    };

    if let Some(steps) = runtime.entrance.play(hero) {
        for (target, spec) in steps {
            runtime.scheduler.tween(target, spec);
        }
    }
}

fn register_reveals(document: &Document, scheduler: &mut Scheduler<HtmlElement>) -> usize {
    let generic = reveal::generic_reveals(select_all(document, "[data-reveal]").into_iter().map(
        |element| {
            let in_hero = element.closest(".hero").ok().flatten().is_some();
            (element, in_hero)
        },
    ));
    for (index, element) in generic {
        let delay = reveal::parse_delay(element.get_attribute("data-delay").as_deref());
        scheduler.trigger(reveal::fade_up(element, index, delay));
    }

    for card in select_all(document, ".skill-card") {
        scheduler.trigger(reveal::skill_card(card));
    }

    for element in select_all(document, "[data-count]") {
        if let Some(value) = reveal::parse_count(element.get_attribute("data-count").as_deref()) {
            scheduler.trigger(reveal::counter(element, value));
        }
    }

    for item in select_all(document, ".edu-item") {
        scheduler.trigger(reveal::education_item(item));
    }

    for card in select_all(document, ".timeline-left .timeline-card") {
        scheduler.trigger(reveal::timeline_card(card, Side::Left));
    }
    for card in select_all(document, ".timeline-right .timeline-card") {
        scheduler.trigger(reveal::timeline_card(card, Side::Right));
    }

    if let Some(grid) = select_one(document, ".certs-grid") {
        let cards = select_all(document, ".cert-card");
        scheduler.trigger(reveal::cert_grid(grid, cards));
    }

    for header in select_all(document, ".section-header") {
        let parts = HeaderParts {
            tag: select_child(&header, ".section-tag"),
            title: select_child(&header, ".section-title"),
            subtitle: select_child(&header, ".section-subtitle"),
        };
        scheduler.trigger(reveal::section_header(header, parts));
    }

    scheduler.pending_triggers()
}

fn install_pointer(win: &EventTarget, runtime: &Rc<RefCell<Runtime>>) -> Result<(), JsValue> {
    let runtime = Rc::clone(runtime);
    listen(win, "mousemove", true, move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        runtime
            .borrow_mut()
            .pointer_moved(f64::from(event.client_x()), f64::from(event.client_y()));
    })?
    .persist();
    Ok(())
}

fn install_viewport(win: &EventTarget, runtime: &Rc<RefCell<Runtime>>) -> Result<(), JsValue> {
    {
        let runtime = Rc::clone(runtime);
        listen(win, "scroll", true, move |_| {
            runtime.borrow_mut().viewport_dirty = true;
        })?
        .persist();
    }

    let runtime = Rc::clone(runtime);
    listen(win, "resize", true, move |_| {
        let mut runtime = runtime.borrow_mut();
        if let Some(canvas) = runtime.canvas.as_mut() {
            canvas.resize();
        }
        runtime.viewport_dirty = true;
    })?
    .persist();
    Ok(())
}

fn install_hover(document: &Document, runtime: &Rc<RefCell<Runtime>>) -> Result<(), JsValue> {
    let body = document.body();

    for element in select_all(document, cursor::HOVER_SELECTOR) {
        {
            let runtime = Rc::clone(runtime);
            let body = body.clone();
            listen(&element, "mouseenter", false, move |_| {
                runtime.borrow_mut().set_hovering(true, body.as_ref());
            })?
            .persist();
        }
        let runtime = Rc::clone(runtime);
        let body = body.clone();
        listen(&element, "mouseleave", false, move |_| {
            runtime.borrow_mut().set_hovering(false, body.as_ref());
        })?
        .persist();
    }

    for card in select_all(document, ".skill-card") {
        {
            let runtime = Rc::clone(runtime);
            let target = card.clone();
            listen(&card, "mouseenter", false, move |_| {
                runtime.borrow_mut().scheduler.tween_to(
                    target.clone(),
                    TweenSpec::to(Pose::scaled(SKILL_HOVER_SCALE), SKILL_HOVER_IN)
                        .ease(Ease::Power2Out),
                );
            })?
            .persist();
        }
        let runtime = Rc::clone(runtime);
        let target = card.clone();
        listen(&card, "mouseleave", false, move |_| {
            runtime.borrow_mut().scheduler.tween_to(
                target.clone(),
                TweenSpec::to(Pose::scaled(1.0), SKILL_HOVER_OUT).ease(Ease::Power2InOut),
            );
        })?
        .persist();
    }

    Ok(())
}

fn install_anchor_scrolling(document: &Document) -> Result<(), JsValue> {
    for anchor in select_all(document, "a[href^=\"#\"]") {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let document = document.clone();
        listen(&anchor, "click", false, move |event| {
            let Some(target) = document.query_selector(&href).ok().flatten() else {
                return;
            };
            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        })?
        .persist();
    }
    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
    if let Some(win) = window() {
        let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

fn start_frame_loop(runtime: Rc<RefCell<Runtime>>) {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&frame);

    *frame.borrow_mut() = Some(Closure::new(move |now: f64| {
        runtime.borrow_mut().frame(now);
        if let Some(callback) = next.borrow().as_ref() {
            request_frame(callback);
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        request_frame(callback);
    }
}

fn try_start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = HeroCanvas::mount(&document).unwrap_or_else(|error| {
        log_event(
            Level::Warn,
            "particles_unavailable",
            json!({ "error": format!("{error:?}") }),
        );
        None
    });
    let parallax = select_one(&document, ".hero")
        .zip(select_one(&document, ".hero-gradient"))
        .map(|(hero, backdrop)| Parallax { hero, backdrop });

    let mut runtime = Runtime {
        scheduler: Scheduler::new(),
        stage: DomStage,
        entrance: EntranceTimeline::default(),
        cursor: CursorFollower::default(),
        cursor_dot: document
            .get_element_by_id("cursor")
            .and_then(|element| element.dyn_into().ok()),
        cursor_follower: document
            .get_element_by_id("cursor-follower")
            .and_then(|element| element.dyn_into().ok()),
        canvas,
        parallax,
        viewport_dirty: true,
        last_frame_ms: None,
    };

    play_entrance(&document, &mut runtime);
    let triggers = register_reveals(&document, &mut runtime.scheduler);

    let reduced = prefers_reduced_motion();
    if reduced {
        runtime.scheduler.reduce_motion();
    }

    let particles = runtime.canvas.is_some();
    let runtime = Rc::new(RefCell::new(runtime));
    install_pointer(&win, &runtime)?;
    install_viewport(&win, &runtime)?;
    install_hover(&document, &runtime)?;
    install_anchor_scrolling(&document)?;
    start_frame_loop(runtime);

    log_event(
        Level::Info,
        "motion_started",
        json!({ "triggers": triggers, "particles": particles, "reduced_motion": reduced }),
    );
    Ok(())
}

/// Wires the page's motion once the app has rendered. Failures are logged
/// and leave the static page usable.
pub fn start() {
    if let Err(error) = try_start() {
        log_event(
            Level::Warn,
            "motion_setup_failed",
            json!({ "error": format!("{error:?}") }),
        );
    }
}
