//! Product carousel: prev/next/jump navigation over a sliding track, driven
//! by control clicks, indicator clicks, swipes, arrow keys and resizes.

mod engine;

pub use engine::{swipe, CarouselEngine, Geometry, Swipe};

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::CarouselConfig;
use crate::core::format;
use crate::core::timing::{AnimationGuard, Debouncer};
use crate::host::{Event, EventKind, Host, Target};

#[derive(Debug, Default)]
struct Drag {
    active: bool,
    start_x: f64,
    end_x: f64,
}

pub struct Carousel<H: Host> {
    host: Rc<H>,
    config: CarouselConfig,
    track: H::Node,
    items: Vec<H::Node>,
    prev: Option<H::Node>,
    next: Option<H::Node>,
    indicators: Vec<H::Node>,
    engine: RefCell<CarouselEngine>,
    guard: AnimationGuard,
    resize: Debouncer,
    drag: RefCell<Drag>,
}

impl<H: Host> Carousel<H> {
    /// Returns `None` (and wires nothing) when the track or the items are missing.
    pub fn mount(host: Rc<H>, config: &CarouselConfig) -> Option<Rc<Self>> {
        let Some(track) = host.query(&config.track_selector) else {
            tracing::debug!("carousel disabled: no `{}`", config.track_selector);
            return None;
        };
        let items = host.query_all(&config.item_selector);
        if items.is_empty() {
            tracing::debug!("carousel disabled: no `{}`", config.item_selector);
            return None;
        }

        let carousel = Rc::new(Self {
            prev: host.query(&config.prev_selector),
            next: host.query(&config.next_selector),
            indicators: host.query_all(&config.indicator_selector),
            host: host.clone(),
            config: config.clone(),
            track,
            items,
            engine: RefCell::new(CarouselEngine::new()),
            guard: AnimationGuard::new(),
            resize: Debouncer::new(config.resize_debounce_ms),
            drag: RefCell::new(Drag::default()),
        });

        if let Some(next) = &carousel.next {
            let this = carousel.clone();
            host.listen(
                Target::Node(next.clone()),
                EventKind::Click,
                Box::new(move |_: &Event| this.next()),
            );
        }
        if let Some(prev) = &carousel.prev {
            let this = carousel.clone();
            host.listen(
                Target::Node(prev.clone()),
                EventKind::Click,
                Box::new(move |_: &Event| this.prev()),
            );
        }
        for (position, indicator) in carousel.indicators.iter().enumerate() {
            let this = carousel.clone();
            let index = i64::try_from(position).unwrap_or(i64::MAX);
            host.listen(
                Target::Node(indicator.clone()),
                EventKind::Click,
                Box::new(move |_: &Event| this.go_to(index)),
            );
        }

        Self::wire_drag(&carousel);

        let this = carousel.clone();
        host.listen(
            Target::Document,
            EventKind::KeyDown,
            Box::new(move |event: &Event| match event.key() {
                Some("ArrowLeft") => this.prev(),
                Some("ArrowRight") => this.next(),
                _ => {}
            }),
        );

        let this = carousel.clone();
        host.listen(
            Target::Window,
            EventKind::Resize,
            Box::new(move |_: &Event| {
                let settled = this.clone();
                this.resize
                    .trigger(this.host.as_ref(), move || settled.relayout());
            }),
        );

        carousel.reposition(false);
        Some(carousel)
    }

    fn wire_drag(carousel: &Rc<Self>) {
        let host = &carousel.host;
        let track = Target::Node(carousel.track.clone());

        let this = carousel.clone();
        host.listen(
            track.clone(),
            EventKind::DragStart,
            Box::new(move |event: &Event| {
                let Some(x) = event.screen_x() else { return };
                // A tap without movement ends where it started.
                *this.drag.borrow_mut() = Drag {
                    active: true,
                    start_x: x,
                    end_x: x,
                };
            }),
        );

        let this = carousel.clone();
        host.listen(
            track.clone(),
            EventKind::DragMove,
            Box::new(move |event: &Event| {
                let mut drag = this.drag.borrow_mut();
                if let (true, Some(x)) = (drag.active, event.screen_x()) {
                    drag.end_x = x;
                }
            }),
        );

        let this = carousel.clone();
        host.listen(
            track,
            EventKind::DragEnd,
            Box::new(move |_: &Event| {
                let gesture = {
                    let mut drag = this.drag.borrow_mut();
                    if !drag.active {
                        return;
                    }
                    drag.active = false;
                    swipe(drag.start_x, drag.end_x, this.config.swipe_threshold_px)
                };
                match gesture {
                    Some(Swipe::Next) => this.next(),
                    Some(Swipe::Prev) => this.prev(),
                    None => {}
                }
            }),
        );
    }

    pub fn geometry(&self) -> Geometry {
        let container_width = self
            .host
            .parent(&self.track)
            .map(|viewport| self.host.offset_width(&viewport))
            .unwrap_or(0.0);
        Geometry {
            container_width,
            item_width: self.host.offset_width(&self.items[0]),
            gap: self.config.gap_px,
            item_count: self.items.len(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.engine.borrow().current()
    }

    pub fn max_index(&self) -> usize {
        self.geometry().max_index()
    }

    pub fn is_animating(&self) -> bool {
        self.guard.is_active()
    }

    // The index always moves; only the slide is dropped while one is in
    // flight, so the track can lag the index until the next reposition.

    pub fn next(&self) {
        let max_index = self.max_index();
        let moved = self.engine.borrow_mut().next(max_index);
        if moved {
            self.reposition(true);
        }
    }

    pub fn prev(&self) {
        let moved = self.engine.borrow_mut().prev();
        if moved {
            self.reposition(true);
        }
    }

    pub fn go_to(&self, index: i64) {
        let max_index = self.max_index();
        self.engine.borrow_mut().go_to(index, max_index);
        self.reposition(true);
    }

    /// Slide the track to the current index. A smooth request while a smooth
    /// slide is still running is dropped. A jump (`smooth == false`) always
    /// applies and releases the guard.
    pub fn reposition(&self, smooth: bool) {
        if smooth && self.guard.is_active() {
            return;
        }

        let geometry = self.geometry();
        let index = self.current_index();
        let max_index = geometry.max_index();
        let host = self.host.as_ref();

        if smooth {
            let transition =
                format::slide_transition(self.config.transition_ms, &self.config.easing);
            host.set_style(&self.track, "transition", &transition);
            self.guard.arm(host, self.config.transition_ms);
        } else {
            self.guard.release();
            host.set_style(&self.track, "transition", "none");
        }
        host.set_style(
            &self.track,
            "transform",
            &format::translate_x(geometry.offset(index)),
        );

        for (position, indicator) in self.indicators.iter().enumerate() {
            host.set_class(indicator, &self.config.active_class, position == index);
        }

        if let Some(prev) = &self.prev {
            host.set_style(prev, "opacity", self.opacity(index == 0));
        }
        if let Some(next) = &self.next {
            host.set_style(next, "opacity", self.opacity(index >= max_index));
        }
    }

    fn opacity(&self, dimmed: bool) -> &str {
        if dimmed {
            self.config.dimmed_opacity.as_str()
        } else {
            "1"
        }
    }

    fn relayout(&self) {
        let max_index = self.max_index();
        self.engine.borrow_mut().reclamp(max_index);
        self.reposition(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{FakeHost, NodeId};

    struct Page {
        host: Rc<FakeHost>,
        viewport: NodeId,
        track: NodeId,
        prev: NodeId,
        next: NodeId,
        dots: Vec<NodeId>,
    }

    /// Five 352px cards in a 1200px viewport: three visible, max index 2.
    fn page() -> Page {
        let host = Rc::new(FakeHost::new());
        let section = host.create("section");
        let viewport = host.create_in(section, "div", &["carousel-container"]);
        host.set_width(viewport, 1200.0);
        let track = host.create_in(viewport, "div", &["carousel-track"]);
        for _ in 0..5 {
            let card = host.create_in(track, "article", &["product-card"]);
            host.set_width(card, 352.0);
        }
        let prev = host.create_in(section, "button", &["carousel-prev"]);
        let next = host.create_in(section, "button", &["carousel-next"]);
        let dots = (0..5)
            .map(|_| host.create_in(section, "button", &["carousel-dot"]))
            .collect();
        Page {
            host,
            viewport,
            track,
            prev,
            next,
            dots,
        }
    }

    fn mount(page: &Page) -> Rc<Carousel<FakeHost>> {
        Carousel::mount(page.host.clone(), &CarouselConfig::default()).expect("carousel mounts")
    }

    #[test]
    fn missing_track_or_items_disables() {
        let host = Rc::new(FakeHost::new());
        assert!(Carousel::mount(host.clone(), &CarouselConfig::default()).is_none());

        host.create("div");
        let track = host.create("div");
        host.add_class(track, "carousel-track");
        assert!(Carousel::mount(host.clone(), &CarouselConfig::default()).is_none());
        assert_eq!(host.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn initial_layout_has_no_transition() {
        let page = page();
        let carousel = mount(&page);
        let host = &page.host;

        assert_eq!(carousel.current_index(), 0);
        assert_eq!(carousel.max_index(), 2);
        assert!(!carousel.is_animating());
        assert_eq!(host.style(page.track, "transition").as_deref(), Some("none"));
        assert_eq!(
            host.style(page.track, "transform").as_deref(),
            Some("translateX(0px)")
        );
        assert_eq!(host.style(page.prev, "opacity").as_deref(), Some("0.3"));
        assert_eq!(host.style(page.next, "opacity").as_deref(), Some("1"));
        assert!(host.has_class(page.dots[0], "active"));
        assert!(!host.has_class(page.dots[1], "active"));
    }

    #[test]
    fn next_slides_and_guards_until_transition_ends() {
        let page = page();
        let carousel = mount(&page);
        let host = &page.host;

        host.click(page.next);
        assert_eq!(carousel.current_index(), 1);
        assert!(carousel.is_animating());
        assert_eq!(
            host.style(page.track, "transform").as_deref(),
            Some("translateX(-384px)")
        );
        assert_eq!(
            host.style(page.track, "transition").as_deref(),
            Some("transform 600ms cubic-bezier(0.4, 0, 0.2, 1)")
        );

        // The index moves, the slide does not while one is in flight.
        host.click(page.next);
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(
            host.style(page.track, "transform").as_deref(),
            Some("translateX(-384px)")
        );
        assert!(!host.has_class(page.dots[2], "active"));

        host.advance(600);
        assert!(!carousel.is_animating());
        carousel.reposition(true);
        assert_eq!(
            host.style(page.track, "transform").as_deref(),
            Some("translateX(-768px)")
        );
        assert_eq!(host.style(page.next, "opacity").as_deref(), Some("0.3"));
        assert_eq!(host.style(page.prev, "opacity").as_deref(), Some("1"));
        assert!(host.has_class(page.dots[2], "active"));
        assert!(!host.has_class(page.dots[1], "active"));
    }

    #[test]
    fn repeated_navigation_stays_in_bounds() {
        let page = page();
        let carousel = mount(&page);

        for _ in 0..10 {
            carousel.next();
            page.host.advance(600);
        }
        assert_eq!(carousel.current_index(), 2);

        for _ in 0..10 {
            carousel.prev();
            page.host.advance(600);
        }
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn go_to_clamps_both_ends() {
        let page = page();
        let carousel = mount(&page);

        carousel.go_to(999);
        assert_eq!(carousel.current_index(), carousel.max_index());
        page.host.advance(600);

        carousel.go_to(-5);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn indicator_click_jumps() {
        let page = page();
        let carousel = mount(&page);

        page.host.click(page.dots[2]);
        assert_eq!(carousel.current_index(), 2);
        page.host.advance(600);

        // Indicator past max index clamps.
        page.host.click(page.dots[4]);
        assert_eq!(carousel.current_index(), 2);
    }

    #[test]
    fn arrow_keys_navigate() {
        let page = page();
        let carousel = mount(&page);

        page.host.key_down("ArrowRight");
        assert_eq!(carousel.current_index(), 1);
        page.host.advance(600);
        page.host.key_down("Enter");
        assert_eq!(carousel.current_index(), 1);
        page.host.key_down("ArrowLeft");
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn swipes_follow_threshold() {
        let page = page();
        let carousel = mount(&page);
        let host = &page.host;

        host.drag(page.track, 300.0, 270.0);
        assert_eq!(carousel.current_index(), 0);

        host.drag(page.track, 300.0, 200.0);
        assert_eq!(carousel.current_index(), 1);
        host.advance(600);

        host.drag(page.track, 200.0, 300.0);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn tap_without_move_does_not_navigate() {
        let page = page();
        let carousel = mount(&page);
        let host = &page.host;

        host.drag(page.track, 300.0, 100.0);
        host.advance(600);
        assert_eq!(carousel.current_index(), 1);

        host.dispatch(
            Target::Node(page.track),
            Event::new(EventKind::DragStart).with_screen_x(500.0),
        );
        host.dispatch(Target::Node(page.track), Event::new(EventKind::DragEnd));
        assert_eq!(carousel.current_index(), 1);
    }

    #[test]
    fn resize_is_debounced_and_reclamps() {
        let page = page();
        let carousel = mount(&page);
        let host = &page.host;

        carousel.go_to(2);
        host.advance(600);
        assert_eq!(carousel.current_index(), 2);

        // Wide enough for every card: max index drops to 0.
        host.set_width(page.viewport, 2000.0);
        host.clear_mutations();
        for _ in 0..4 {
            host.resize();
            host.advance(50);
        }
        assert_eq!(carousel.current_index(), 2);
        assert!(host.mutations().is_empty());

        host.advance(50);
        assert_eq!(carousel.current_index(), 0);
        assert_eq!(host.style(page.track, "transition").as_deref(), Some("none"));
        assert_eq!(
            host.style(page.track, "transform").as_deref(),
            Some("translateX(0px)")
        );
        assert!(!carousel.is_animating());
    }

    #[test]
    fn relayout_mid_slide_releases_the_guard() {
        let page = page();
        let carousel = mount(&page);
        let host = &page.host;

        host.click(page.next);
        assert!(carousel.is_animating());
        host.resize();
        host.advance(100);
        assert!(!carousel.is_animating());

        host.click(page.next);
        assert_eq!(carousel.current_index(), 2);
        assert_eq!(
            host.style(page.track, "transform").as_deref(),
            Some("translateX(-768px)")
        );
        assert!(carousel.is_animating());
    }

    #[test]
    fn optional_controls_may_be_missing() {
        let host = Rc::new(FakeHost::new());
        let viewport = host.create("div");
        host.set_width(viewport, 400.0);
        let track = host.create_in(viewport, "div", &["carousel-track"]);
        for _ in 0..3 {
            let card = host.create_in(track, "article", &["product-card"]);
            host.set_width(card, 352.0);
        }

        let carousel = Carousel::mount(host.clone(), &CarouselConfig::default()).unwrap();
        assert_eq!(carousel.max_index(), 2);
        host.key_down("ArrowRight");
        assert_eq!(carousel.current_index(), 1);
    }
}
