use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use core_types::{Color, Point, PointerEvent, PointerPhase};
use dom::build::{document, element, element_with, text};
use dom::snapshot::{DomSnapshot, DomSnapshotOptions};
use dom::{Node, dom_utils};
use highlight::HighlightEngine;
use layout::FixedMeasurer;
use page::{Page, route_pointer_event};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn sample_page() -> Node {
    document(vec![
        element("h1", vec![text("Highlight demo")]),
        element(
            "p",
            vec![text("The quick brown fox jumps over the lazy dog.")],
        ),
        element(
            "p",
            vec![
                text("Grab any run of text with the pointer, "),
                element_with(
                    "a",
                    vec![("href", Some("#docs"))],
                    vec![text("or follow this link")],
                ),
                text(" instead."),
            ],
        ),
        element_with("div", vec![("class", Some("floating-control"))], vec![text("B")]),
    ])
}

struct Session {
    page: Page,
    engine: HighlightEngine,
    measurer: FixedMeasurer,
    clock_ms: f64,
}

impl Session {
    fn feed(&mut self, phase: PointerPhase, pos: (f32, f32)) {
        self.clock_ms += 40.0;
        let event = PointerEvent::new(phase, Point::new(pos.0, pos.1), self.clock_ms);
        route_pointer_event(&mut self.page, &mut self.engine, &self.measurer, &event);
    }

    fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.feed(PointerPhase::Down, from);
        self.feed(PointerPhase::Move, to);
        self.feed(PointerPhase::Up, to);
    }

    fn report(&self, label: &str) {
        println!("== {label} ==");
        println!(
            "{}",
            DomSnapshot::new(self.page.document(), DomSnapshotOptions::default())
        );
        println!(
            "markers: {}, text: {:?}\n",
            self.engine.marker_count(self.page.document()),
            self.page.text_content()
        );
    }
}

fn overlay_id(root: &Node) -> dom::Id {
    fn walk(node: &Node) -> Option<dom::Id> {
        if dom_utils::has_class(node, "floating-control") {
            return Some(node.id());
        }
        node.children()?.iter().find_map(walk)
    }
    walk(root).expect("demo page has a floating control")
}

fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let mut page = Page::new(sample_page(), 640.0);
    let overlay = overlay_id(page.document());
    page.register_overlay(overlay);

    let mut engine = HighlightEngine::new();
    engine.enable(Color::DEFAULT_HIGHLIGHT);

    let mut session = Session {
        page,
        engine,
        measurer: FixedMeasurer::new(8.0, 18.0),
        clock_ms: 0.0,
    };

    session.report("initial page");

    // forward drag across both paragraphs (the extract fallback)
    session.drag((16.0, 27.0), (100.0, 45.0));
    // backward drag within the first paragraph (the same-node fast path)
    session.drag((200.0, 27.0), (136.0, 27.0));
    session.report("after two drags");

    // a different color for the next marker
    session.engine.set_color(Color::from_hex("#80d8ff").unwrap_or(Color::DEFAULT_HIGHLIGHT));
    session.drag((330.0, 45.0), (410.0, 45.0));
    session.report("after recoloring and a link-area drag");

    let removed = session.engine.clear_all(session.page.document_mut());
    log::info!("cleared {removed} markers");
    session.report("after clear_all");
}
