//! Renders the content model into the document and wires the per-element
//! interactions: card tilt, cursor follower, nav state and in-page links.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use super::events::Listener;
use super::motion::query_all;
use crate::content::{Achievement, ContentModel, Project, SkillCategory};
use crate::error::{Error, Result};
use crate::pointer::UiState;
use crate::tilt::CardTilt;

const SKILLS_ID: &str = "skills-grid";
const PROJECTS_ID: &str = "projects-grid";
const ACHIEVEMENTS_ID: &str = "achievements-grid";
const INTERACTIVE_SELECTOR: &str = "a, button, .project-card";

fn element(document: &Document, tag: &str, class: &str, text: Option<&str>) -> Result<HtmlElement> {
    let el = document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| Error::Js(format!("<{tag}> is not an HTML element")))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

/// Fills the three content containers. Missing containers are skipped.
pub fn render_content(document: &Document, model: &ContentModel) -> Result<()> {
    if let Some(grid) = document.get_element_by_id(SKILLS_ID) {
        for category in model.skill_categories() {
            grid.append_child(&skill_category(document, category)?)?;
        }
    }
    if let Some(grid) = document.get_element_by_id(PROJECTS_ID) {
        for project in model.projects() {
            grid.append_child(&project_card(document, project)?)?;
        }
    }
    if let Some(grid) = document.get_element_by_id(ACHIEVEMENTS_ID) {
        for achievement in model.achievements() {
            grid.append_child(&achievement_card(document, achievement)?)?;
        }
    }
    Ok(())
}

fn skill_category(document: &Document, category: &SkillCategory) -> Result<HtmlElement> {
    let root = element(document, "div", "skill-category reveal", None)?;
    root.append_child(&element(document, "h3", "skill-category-title", Some(category.title))?)?;
    for skill in category.skills {
        let item = element(document, "div", "skill-item", None)?;
        item.append_child(&element(document, "span", "skill-name", Some(skill.name))?)?;
        let dots = element(document, "div", "skill-dots", None)?;
        for filled in skill.dots() {
            let class = if filled { "dot filled" } else { "dot" };
            dots.append_child(&element(document, "span", class, None)?)?;
        }
        item.append_child(&dots)?;
        root.append_child(&item)?;
    }
    Ok(root)
}

fn project_card(document: &Document, project: &Project) -> Result<HtmlElement> {
    let card = element(document, "div", "project-card reveal", None)?;

    let header = element(document, "div", "project-header", None)?;
    header.append_child(&element(document, "span", "project-number", Some(project.number))?)?;
    let icon_class = format!("project-icon {}", project.icon_class.as_str());
    header.append_child(&element(document, "span", &icon_class, Some(project.icon))?)?;
    card.append_child(&header)?;

    card.append_child(&element(document, "h3", "project-title", Some(project.title))?)?;
    card.append_child(&element(document, "p", "project-description", Some(project.description))?)?;

    let tech = element(document, "div", "project-tech", None)?;
    for tag in project.tech {
        tech.append_child(&element(document, "span", "tech-tag", Some(tag))?)?;
    }
    card.append_child(&tech)?;

    let metric = element(document, "div", "project-metric", None)?;
    metric.append_child(&element(document, "span", "metric-value", Some(project.metric_value))?)?;
    metric.append_child(&element(document, "span", "metric-label", Some(project.metric_label))?)?;
    card.append_child(&metric)?;

    Ok(card)
}

fn achievement_card(document: &Document, achievement: &Achievement) -> Result<HtmlElement> {
    let card = element(document, "div", "achievement-card reveal", None)?;
    card.append_child(&element(document, "span", "achievement-icon", Some(achievement.icon))?)?;
    card.append_child(&element(document, "h4", "achievement-title", Some(achievement.title))?)?;
    card.append_child(&element(document, "p", "achievement-description", Some(achievement.description))?)?;
    Ok(card)
}

/// Applies a tilt transform to `card` for a pointer at client coordinates.
pub fn tilt_card(card: &HtmlElement, tilt: &CardTilt, client_x: f64, client_y: f64) {
    let rect = card.get_bounding_client_rect();
    let transform = tilt.transform_at(
        client_x - rect.left(),
        client_y - rect.top(),
        rect.width(),
        rect.height(),
    );
    let _ = card.style().set_property("transform", &transform);
}

pub fn reset_card(card: &HtmlElement, tilt: &CardTilt) {
    let _ = card.style().set_property("transform", &tilt.neutral());
}

pub fn bind_cards(document: &Document, tilt: CardTilt) -> Result<Vec<Listener>> {
    let tilt = Rc::new(tilt);
    let mut listeners = Vec::new();
    for card in query_all(document, ".project-card") {
        let on_move = {
            let (card, tilt) = (card.clone(), Rc::clone(&tilt));
            move |event: Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    tilt_card(&card, &tilt, event.client_x() as f64, event.client_y() as f64);
                }
            }
        };
        let on_leave = {
            let (card, tilt) = (card.clone(), Rc::clone(&tilt));
            move |_: Event| reset_card(&card, &tilt)
        };
        listeners.push(Listener::new(&card, "mousemove", on_move)?);
        listeners.push(Listener::new(&card, "mouseleave", on_leave)?);
    }
    Ok(listeners)
}

/// The two-part cursor and the nav bar, redrawn from `UiState`.
pub struct CursorView {
    halo: Option<HtmlElement>,
    dot: Option<HtmlElement>,
    nav: Option<Element>,
}

impl CursorView {
    pub fn find(document: &Document) -> Self {
        let html = |selector: &str| {
            document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        };
        Self {
            halo: html(".cursor"),
            dot: html(".cursor-dot"),
            nav: document.query_selector("nav").ok().flatten(),
        }
    }

    pub fn apply(&self, state: &UiState) {
        let place = |el: &HtmlElement, (x, y): (f64, f64)| {
            let style = el.style();
            let _ = style.set_property("left", &format!("{x}px"));
            let _ = style.set_property("top", &format!("{y}px"));
        };
        if let Some(halo) = &self.halo {
            place(halo, state.pointer.cursor);
            let _ = halo
                .class_list()
                .toggle_with_force("hover", state.pointer.hovering_interactive);
        }
        if let Some(dot) = &self.dot {
            place(dot, state.pointer.cursor_dot);
        }
        if let Some(nav) = &self.nav {
            let _ = nav
                .class_list()
                .toggle_with_force("scrolled", state.scroll.past_threshold);
        }
    }
}

pub fn bind_hover(
    document: &Document,
    ui: &Rc<RefCell<UiState>>,
    cursor: &Rc<CursorView>,
) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    for target in query_all(document, INTERACTIVE_SELECTOR) {
        let enter = {
            let (ui, cursor) = (Rc::clone(ui), Rc::clone(cursor));
            move |_: Event| {
                ui.borrow_mut().on_hover_start();
                cursor.apply(&ui.borrow());
            }
        };
        let leave = {
            let (ui, cursor) = (Rc::clone(ui), Rc::clone(cursor));
            move |_: Event| {
                ui.borrow_mut().on_hover_end();
                cursor.apply(&ui.borrow());
            }
        };
        listeners.push(Listener::new(&target, "mouseenter", enter)?);
        listeners.push(Listener::new(&target, "mouseleave", leave)?);
    }
    Ok(listeners)
}

/// Smooth-scrolls the element with the given id into view; unknown ids are
/// ignored.
pub fn scroll_to(document: &Document, element_id: &str) {
    if let Some(target) = document.get_element_by_id(element_id) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

/// Wires every `[data-scroll-to]` element to [`scroll_to`].
pub fn bind_scroll_links(document: &Document) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    for link in query_all(document, "[data-scroll-to]") {
        let Some(id) = link.get_attribute("data-scroll-to") else {
            continue;
        };
        let doc = document.clone();
        listeners.push(Listener::new(&link, "click", move |event: Event| {
            event.prevent_default();
            scroll_to(&doc, &id);
        })?);
    }
    Ok(listeners)
}
