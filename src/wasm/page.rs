//! DOM wiring: scene switcher and render loop, hero carousel, filter grid,
//! and the detail overlay. Shared state sits behind `Rc` handles cloned into
//! the event closures. One-shot closures that live for the page's lifetime
//! are leaked with `forget`; closures tied to rebuilt DOM (cards, dots) are
//! kept in the `Ui` so they drop with their elements on re-render.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    HtmlInputElement, HtmlSelectElement, MouseEvent, Window,
};

use super::loader;
use super::render::Renderer;
use crate::carousel::{Carousel, Direction};
use crate::config::{PROJECTS_URL, SLIDE_INTERVAL_MS};
use crate::gallery::{FilterQuery, Gallery, ProjectRecord};
use crate::scene::{PointerTarget, SceneState, SceneStore, SceneVariant};

type SharedPointer = Rc<Cell<PointerTarget>>;

pub fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let pointer = wire_pointer(&window, &document)?;
    wire_scene(&window, &document, pointer)?;

    let ui = Rc::new(Ui::grab(&document)?);
    wire_filters(&ui)?;
    wire_overlay_chrome(&ui)?;

    wasm_bindgen_futures::spawn_local({
        let ui = ui.clone();
        async move {
            match loader::fetch_gallery(PROJECTS_URL).await {
                Ok(gallery) if !gallery.is_empty() => present(&ui, gallery),
                Ok(_) => ui.show_empty_state("No projects published yet."),
                Err(err) => {
                    log::error!("failed to load project data: {err}");
                    ui.show_empty_state("Projects failed to load. Try refreshing the page.");
                }
            }
        }
    });

    Ok(())
}

fn js_rng() -> impl FnMut() -> f32 {
    || js_sys::Math::random() as f32
}

// ---------------------------------------------------------------------------
// Background scene
// ---------------------------------------------------------------------------

fn wire_pointer(window: &Window, document: &Document) -> Result<SharedPointer, JsValue> {
    let pointer: SharedPointer = Rc::new(Cell::new(PointerTarget::default()));
    let cursor: Option<HtmlElement> = document
        .query_selector(".cursor-ball")?
        .and_then(|el| el.dyn_into().ok());

    let closure = {
        let pointer = pointer.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let x = event.client_x() as f32;
            let y = event.client_y() as f32;
            let (w, h) = window_size(&window);
            pointer.set(PointerTarget::from_client(x, y, w, h));
            if let Some(cursor) = &cursor {
                let style = cursor.style();
                style.set_property("left", &format!("{x}px")).ok();
                style.set_property("top", &format!("{y}px")).ok();
            }
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(pointer)
}

fn wire_scene(window: &Window, document: &Document, pointer: SharedPointer) -> Result<(), JsValue> {
    let canvas: HtmlCanvasElement = typed_element(document, "bg-canvas")?;
    fit_canvas(window, &canvas);

    let mut renderer = Renderer::new(canvas.clone())?;
    let mut rng = js_rng();
    let state = SceneState::new(SceneVariant::ParticleField, &mut rng);
    let mut store = SceneStore::new();
    store.install(&mut renderer, &state.scene)?;

    let renderer = Rc::new(RefCell::new(renderer));
    let state = Rc::new(RefCell::new(state));
    let store = Rc::new(RefCell::new(store));

    // Keep canvas size and projection aspect in step with the window.
    let resize_closure = {
        let window = window.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || fit_canvas(&window, &canvas)) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    wire_scene_buttons(document, &renderer, &state, &store)?;

    // Animation loop. The frame closure reschedules itself; holding it in an
    // `Option` lets it obtain a reference to itself after construction.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let performance = window.performance().ok_or("no performance")?;
    let mut last = performance.now();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = performance.now();
        // Clamp so a backgrounded tab does not teleport the animation.
        let dt = (((now - last) / 1000.0) as f32).min(0.1);
        last = now;

        let mut state = state.borrow_mut();
        state.tick(dt, pointer.get());
        if let Some(geometry) = store.borrow().handle() {
            renderer.borrow().draw(geometry, &state);
        }

        // schedule next
        web_sys::window()
            .unwrap()
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;
    Ok(())
}

fn wire_scene_buttons(
    document: &Document,
    renderer: &Rc<RefCell<Renderer>>,
    state: &Rc<RefCell<SceneState>>,
    store: &Rc<RefCell<SceneStore<Renderer>>>,
) -> Result<(), JsValue> {
    let buttons = document.query_selector_all(".scene-btn")?;
    for i in 0..buttons.length() {
        let Some(node) = buttons.item(i) else { continue };
        let button: Element = node.dyn_into()?;
        let Some(name) = button.get_attribute("data-scene") else {
            continue;
        };
        let Some(variant) = SceneVariant::from_name(&name) else {
            log::warn!("unknown scene '{name}' on switcher button");
            continue;
        };

        let closure = {
            let document = document.clone();
            let renderer = renderer.clone();
            let state = state.clone();
            let store = store.clone();
            let button = button.clone();
            Closure::wrap(Box::new(move || {
                mark_active(&document, &button);
                let mut rng = js_rng();
                state.borrow_mut().switch_to(variant, &mut rng);
                let state = state.borrow();
                if let Err(err) = store
                    .borrow_mut()
                    .install(&mut *renderer.borrow_mut(), &state.scene)
                {
                    log::error!("scene switch failed: {err:?}");
                }
            }) as Box<dyn FnMut()>)
        };
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn mark_active(document: &Document, button: &Element) {
    if let Ok(buttons) = document.query_selector_all(".scene-btn") {
        for i in 0..buttons.length() {
            if let Some(el) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                el.class_list().remove_1("active").ok();
            }
        }
    }
    button.class_list().add_1("active").ok();
}

fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) {
    let (w, h) = window_size(window);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
}

fn window_size(window: &Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w as f32, h as f32)
}

// ---------------------------------------------------------------------------
// Gallery chrome: grid, filters, hero, overlay
// ---------------------------------------------------------------------------

struct Ui {
    document: Document,
    body: HtmlElement,

    gallery: RefCell<Option<Gallery>>,
    featured: RefCell<Vec<ProjectRecord>>,
    carousel: RefCell<Carousel>,
    timer: Cell<Option<i32>>,
    auto_tick: RefCell<Option<Closure<dyn FnMut()>>>,
    card_handlers: RefCell<Vec<Closure<dyn FnMut()>>>,
    hero_handlers: RefCell<Vec<Closure<dyn FnMut()>>>,

    grid: Element,
    search: HtmlInputElement,
    category: HtmlSelectElement,
    year: HtmlSelectElement,

    hero_title: Element,
    hero_desc: Element,
    hero_link: HtmlAnchorElement,
    hero_images: Element,
    hero_dots: Element,

    modal: Element,
    modal_image: HtmlImageElement,
    modal_category: Element,
    modal_year: Element,
    modal_title: Element,
    modal_desc: Element,
    modal_tech: Element,
    modal_github: HtmlAnchorElement,
    modal_demo: HtmlAnchorElement,
}

impl Ui {
    fn grab(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            body: document.body().ok_or("no body")?,
            gallery: RefCell::new(None),
            featured: RefCell::new(Vec::new()),
            carousel: RefCell::new(Carousel::new(0)),
            timer: Cell::new(None),
            auto_tick: RefCell::new(None),
            card_handlers: RefCell::new(Vec::new()),
            hero_handlers: RefCell::new(Vec::new()),
            grid: element(document, "projects-grid")?,
            search: typed_element(document, "search-input")?,
            category: typed_element(document, "category-filter")?,
            year: typed_element(document, "year-filter")?,
            hero_title: element(document, "hero-title")?,
            hero_desc: element(document, "hero-desc")?,
            hero_link: typed_element(document, "hero-link")?,
            hero_images: element(document, "hero-images")?,
            hero_dots: element(document, "hero-dots")?,
            modal: element(document, "project-modal")?,
            modal_image: typed_element(document, "modal-image")?,
            modal_category: element(document, "modal-category")?,
            modal_year: element(document, "modal-year")?,
            modal_title: element(document, "modal-title")?,
            modal_desc: element(document, "modal-desc")?,
            modal_tech: element(document, "modal-tech")?,
            modal_github: typed_element(document, "modal-github")?,
            modal_demo: typed_element(document, "modal-demo")?,
        })
    }

    fn current_query(&self) -> FilterQuery {
        let category = match self.category.value() {
            v if v == "all" => None,
            v => Some(v),
        };
        let year = match self.year.value().as_str() {
            "all" => None,
            v => v.parse::<u16>().ok(),
        };
        FilterQuery {
            search: self.search.value(),
            category,
            year,
        }
    }

    fn populate_filter_options(&self) {
        let gallery = self.gallery.borrow();
        let Some(gallery) = gallery.as_ref() else {
            return;
        };
        for category in gallery.categories() {
            if let Ok(option) = self.document.create_element("option") {
                option.set_attribute("value", category).ok();
                option.set_text_content(Some(category));
                self.category.append_child(&option).ok();
            }
        }
        for year in gallery.years() {
            let year = year.to_string();
            if let Ok(option) = self.document.create_element("option") {
                option.set_attribute("value", &year).ok();
                option.set_text_content(Some(&year));
                self.year.append_child(&option).ok();
            }
        }
    }

    fn show_empty_state(&self, message: &str) {
        self.grid.set_inner_html("");
        self.card_handlers.borrow_mut().clear();
        if let Ok(note) = self.document.create_element("p") {
            note.set_class_name("empty-note");
            note.set_text_content(Some(message));
            self.grid.append_child(&note).ok();
        }
    }

    fn open_overlay(&self, id: &str) {
        let gallery = self.gallery.borrow();
        let Some(record) = gallery.as_ref().and_then(|g| g.find(id)) else {
            // Unknown ids leave the overlay untouched.
            log::warn!("no project with id '{id}'");
            return;
        };

        self.modal_title.set_text_content(Some(&record.title));
        let long = if record.long_description.is_empty() {
            &record.description
        } else {
            &record.long_description
        };
        self.modal_desc.set_text_content(Some(long));
        self.modal_image
            .set_src(record.image.as_deref().unwrap_or(""));
        self.modal_category
            .set_text_content(Some(&record.category));
        self.modal_year
            .set_text_content(Some(&record.year.to_string()));
        self.modal_tech.set_inner_html("");
        for tag in &record.tech {
            if let Ok(span) = self.document.create_element("span") {
                span.set_text_content(Some(tag));
                self.modal_tech.append_child(&span).ok();
            }
        }
        self.modal_github
            .set_href(record.github.as_deref().unwrap_or("#"));
        self.modal_demo
            .set_href(record.demo.as_deref().unwrap_or("#"));

        self.modal.class_list().add_1("open").ok();
        self.body.style().set_property("overflow", "hidden").ok();
    }

    fn close_overlay(&self) {
        self.modal.class_list().remove_1("open").ok();
        self.body.style().set_property("overflow", "auto").ok();
    }

    fn change_slide(&self, index: usize) {
        self.carousel.borrow_mut().goto(index);
        self.show_slide(index);
        self.update_hero_text(index);
    }

    fn manual_slide(&self, direction: Direction) {
        self.stop_auto();
        let index = self.carousel.borrow_mut().advance(direction);
        self.change_slide(index);
        self.start_auto();
    }

    fn show_slide(&self, index: usize) {
        for container in [&self.hero_images, &self.hero_dots] {
            let children = container.children();
            for i in 0..children.length() {
                if let Some(child) = children.item(i) {
                    if i as usize == index {
                        child.class_list().add_1("active").ok();
                    } else {
                        child.class_list().remove_1("active").ok();
                    }
                }
            }
        }
    }

    fn update_hero_text(&self, index: usize) {
        let featured = self.featured.borrow();
        let Some(record) = featured.get(index) else {
            return;
        };
        self.hero_title.set_text_content(Some(&record.title));
        self.hero_desc.set_text_content(Some(&record.description));
        self.hero_link.set_href(record.primary_link().unwrap_or("#"));
        self.hero_link.set_text_content(Some(if record.demo.is_some() {
            "View Project"
        } else {
            "View Code"
        }));
    }

    fn start_auto(&self) {
        self.stop_auto();
        let auto = self.auto_tick.borrow();
        let Some(auto) = auto.as_ref() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                auto.as_ref().unchecked_ref(),
                SLIDE_INTERVAL_MS,
            ) {
                Ok(handle) => self.timer.set(Some(handle)),
                Err(err) => log::error!("failed to start slide timer: {err:?}"),
            }
        }
    }

    fn stop_auto(&self) {
        if let Some(handle) = self.timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }
}

fn present(ui: &Rc<Ui>, gallery: Gallery) {
    *ui.gallery.borrow_mut() = Some(gallery);
    ui.populate_filter_options();
    apply_filters(ui);
    if let Err(err) = init_hero(ui) {
        log::error!("failed to initialise hero: {err:?}");
    }
}

fn wire_filters(ui: &Rc<Ui>) -> Result<(), JsValue> {
    let refresh = {
        let ui = ui.clone();
        Closure::wrap(Box::new(move || apply_filters(&ui)) as Box<dyn FnMut()>)
    };
    ui.search
        .add_event_listener_with_callback("input", refresh.as_ref().unchecked_ref())?;
    ui.category
        .add_event_listener_with_callback("change", refresh.as_ref().unchecked_ref())?;
    ui.year
        .add_event_listener_with_callback("change", refresh.as_ref().unchecked_ref())?;
    refresh.forget();
    Ok(())
}

fn wire_overlay_chrome(ui: &Rc<Ui>) -> Result<(), JsValue> {
    let close = {
        let ui = ui.clone();
        Closure::wrap(Box::new(move || ui.close_overlay()) as Box<dyn FnMut()>)
    };
    for selector in [".modal-close", ".modal-backdrop"] {
        if let Some(el) = ui.document.query_selector(selector)? {
            el.add_event_listener_with_callback("click", close.as_ref().unchecked_ref())?;
        }
    }
    close.forget();
    Ok(())
}

fn apply_filters(ui: &Rc<Ui>) {
    let query = ui.current_query();
    let gallery = ui.gallery.borrow();
    let Some(gallery) = gallery.as_ref() else {
        return;
    };
    let visible = gallery.filter(&query);
    render_grid(ui, &visible);
}

fn render_grid(ui: &Rc<Ui>, records: &[&ProjectRecord]) {
    ui.grid.set_inner_html("");
    ui.card_handlers.borrow_mut().clear();

    if records.is_empty() {
        ui.show_empty_state("Nothing matches the current filters.");
        return;
    }

    for record in records {
        match build_card(ui, record) {
            Ok(card) => {
                ui.grid.append_child(&card).ok();
            }
            Err(err) => log::error!("failed to render card for '{}': {err:?}", record.id),
        }
    }
}

fn build_card(ui: &Rc<Ui>, record: &ProjectRecord) -> Result<Element, JsValue> {
    let doc = &ui.document;
    let card = doc.create_element("div")?;
    card.set_class_name("card");

    let image_box = doc.create_element("div")?;
    image_box.set_class_name("card-img-box");
    if let Some(src) = &record.image {
        let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
        img.set_src(src);
        img.set_alt(&record.title);
        img.set_loading("lazy");
        image_box.append_child(&img)?;
    }

    let body = doc.create_element("div")?;
    body.set_class_name("card-body");

    let meta = doc.create_element("div")?;
    meta.set_class_name("card-meta");
    let category = doc.create_element("span")?;
    category.set_text_content(Some(&record.category));
    let year = doc.create_element("span")?;
    year.set_text_content(Some(&record.year.to_string()));
    meta.append_child(&category)?;
    meta.append_child(&year)?;

    let title = doc.create_element("h3")?;
    title.set_class_name("card-title");
    title.set_text_content(Some(&record.title));

    let desc = doc.create_element("p")?;
    desc.set_class_name("card-desc");
    desc.set_text_content(Some(&record.description));

    let actions = doc.create_element("div")?;
    actions.set_class_name("card-actions");
    let code: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    code.set_class_name("btn-outline");
    code.set_text_content(Some("Code"));
    code.set_href(record.github.as_deref().unwrap_or("#"));
    let live: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    live.set_class_name("btn-fill");
    live.set_text_content(Some("Live"));
    live.set_href(record.demo.as_deref().unwrap_or("#"));
    actions.append_child(&code)?;
    actions.append_child(&live)?;

    body.append_child(&meta)?;
    body.append_child(&title)?;
    body.append_child(&desc)?;
    body.append_child(&actions)?;
    card.append_child(&image_box)?;
    card.append_child(&body)?;

    // Image and title both open the detail overlay.
    let open = {
        let ui = ui.clone();
        let id = record.id.clone();
        Closure::wrap(Box::new(move || ui.open_overlay(&id)) as Box<dyn FnMut()>)
    };
    image_box.add_event_listener_with_callback("click", open.as_ref().unchecked_ref())?;
    title.add_event_listener_with_callback("click", open.as_ref().unchecked_ref())?;
    ui.card_handlers.borrow_mut().push(open);

    Ok(card)
}

fn init_hero(ui: &Rc<Ui>) -> Result<(), JsValue> {
    let featured: Vec<ProjectRecord> = {
        let gallery = ui.gallery.borrow();
        let Some(gallery) = gallery.as_ref() else {
            return Ok(());
        };
        gallery.featured().into_iter().cloned().collect()
    };
    if featured.is_empty() {
        return Ok(());
    }

    ui.hero_images.set_inner_html("");
    ui.hero_dots.set_inner_html("");
    ui.hero_handlers.borrow_mut().clear();

    for (i, record) in featured.iter().enumerate() {
        let img: HtmlImageElement = ui.document.create_element("img")?.dyn_into()?;
        img.set_src(record.image.as_deref().unwrap_or("assets/placeholder.svg"));
        img.set_alt(&record.title);
        img.set_class_name(if i == 0 { "hero-slide active" } else { "hero-slide" });
        ui.hero_images.append_child(&img)?;

        let dot = ui.document.create_element("div")?;
        dot.set_class_name(if i == 0 { "hero-dot active" } else { "hero-dot" });
        ui.hero_dots.append_child(&dot)?;

        let jump = {
            let ui = ui.clone();
            Closure::wrap(Box::new(move || {
                ui.stop_auto();
                ui.change_slide(i);
                ui.start_auto();
            }) as Box<dyn FnMut()>)
        };
        dot.add_event_listener_with_callback("click", jump.as_ref().unchecked_ref())?;
        ui.hero_handlers.borrow_mut().push(jump);
    }

    let len = featured.len();
    *ui.featured.borrow_mut() = featured;
    *ui.carousel.borrow_mut() = Carousel::new(len);
    ui.update_hero_text(0);

    for (id, direction) in [
        ("hero-prev", Direction::Backward),
        ("hero-next", Direction::Forward),
    ] {
        let arrow = element(&ui.document, id)?;
        let step = {
            let ui = ui.clone();
            Closure::wrap(Box::new(move || ui.manual_slide(direction)) as Box<dyn FnMut()>)
        };
        arrow.add_event_listener_with_callback("click", step.as_ref().unchecked_ref())?;
        ui.hero_handlers.borrow_mut().push(step);
    }

    // The rotation timer fires this without resetting itself; manual
    // navigation goes through manual_slide, which does.
    let auto = {
        let ui = ui.clone();
        Closure::wrap(Box::new(move || {
            let index = ui.carousel.borrow_mut().advance(Direction::Forward);
            ui.change_slide(index);
        }) as Box<dyn FnMut()>)
    };
    *ui.auto_tick.borrow_mut() = Some(auto);
    ui.start_auto();
    Ok(())
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn typed_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    element(document, id)?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has unexpected element type")))
}
