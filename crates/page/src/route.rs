use crate::{Page, PageProbe};
use core_types::{EventDisposition, PointerEvent, PointerPhase};
use dom::{Id, dom_utils, traverse};
use highlight::{
    GesturePoint, HighlightEngine, TargetFlags, is_marker, mark_error_category, resolve,
};
use layout::{HitKind, TextMeasurer};

/// Route one pointer event through the engine.
///
/// Computes the hit target and its classification flags, captures the caret
/// under the pointer while a gesture is live, and on a completed drag runs
/// resolve-then-mark. Failures stay on the diagnostic channel; the tree is
/// only touched by a successful mark.
pub fn route_pointer_event(
    page: &mut Page,
    engine: &mut HighlightEngine,
    measurer: &dyn TextMeasurer,
    event: &PointerEvent,
) -> EventDisposition {
    if !engine.is_enabled() {
        return EventDisposition::Pass;
    }

    match event.phase {
        PointerPhase::Down => on_down(page, engine, measurer, event),
        PointerPhase::Move => on_move(page, engine, measurer, event),
        PointerPhase::Up => on_up(page, engine, measurer, event),
    }
}

fn gesture_point(
    page: &Page,
    measurer: &dyn TextMeasurer,
    event: &PointerEvent,
) -> Option<GesturePoint> {
    let hit = page.hit_at(measurer, (event.pos.x, event.pos.y))?;
    let flags = target_flags(page, hit.node_id, hit.kind);
    let text_offset = page.caret_from_point(measurer, (event.pos.x, event.pos.y));
    Some(GesturePoint {
        point: event.pos,
        target: hit.node_id,
        flags,
        text_offset,
    })
}

fn target_flags(page: &Page, target: Id, kind: HitKind) -> TargetFlags {
    let doc = page.document();
    let in_overlay = page
        .overlay_roots()
        .iter()
        .any(|o| traverse::is_within(doc, *o, target));
    let form_control = matches!(kind, HitKind::FormControl)
        || traverse::ancestor_matching(doc, target, dom_utils::is_form_control).is_some();
    let in_link = matches!(kind, HitKind::Link)
        || traverse::ancestor_matching(doc, target, dom_utils::is_link).is_some();
    let in_marker = traverse::ancestor_matching(doc, target, is_marker).is_some();
    TargetFlags {
        in_overlay,
        form_control,
        in_link,
        in_marker,
    }
}

fn on_down(
    page: &mut Page,
    engine: &mut HighlightEngine,
    measurer: &dyn TextMeasurer,
    event: &PointerEvent,
) -> EventDisposition {
    let Some(point) = gesture_point(page, measurer, event) else {
        return EventDisposition::Pass;
    };

    // pressing outside any existing highlight drops the current selection;
    // a Ctrl press keeps it so native copy still has something to copy
    if !point.flags.in_marker && !event.modifiers.ctrl {
        page.clear_selection();
    }

    engine.pointer_down(point, event)
}

fn on_move(
    page: &mut Page,
    engine: &mut HighlightEngine,
    measurer: &dyn TextMeasurer,
    event: &PointerEvent,
) -> EventDisposition {
    if !engine.is_tracking() {
        return EventDisposition::Pass;
    }
    let Some(point) = gesture_point(page, measurer, event) else {
        engine.abort_gesture();
        return EventDisposition::Pass;
    };
    engine.pointer_move(point, event)
}

fn on_up(
    page: &mut Page,
    engine: &mut HighlightEngine,
    measurer: &dyn TextMeasurer,
    event: &PointerEvent,
) -> EventDisposition {
    let Some(point) = gesture_point(page, measurer, event) else {
        engine.abort_gesture();
        return EventDisposition::Pass;
    };

    let (disposition, gesture) = engine.pointer_up(point, event);
    if let Some((start, end)) = gesture {
        complete_drag(page, engine, measurer, &start, &end);
    }
    disposition
}

fn complete_drag(
    page: &mut Page,
    engine: &HighlightEngine,
    measurer: &dyn TextMeasurer,
    start: &GesturePoint,
    end: &GesturePoint,
) {
    let resolved = {
        let probe = PageProbe::new(page, measurer);
        resolve(start, end, &probe)
    };

    match resolved {
        Ok(range) => match engine.mark(page.document_mut(), &range) {
            Ok(id) => {
                page.clear_selection();
                log::debug!(target: "highlight", "marked {range:?} as node {}", id.0);
            }
            Err(err) => log::debug!(
                target: "highlight",
                "{}: {err} ({:?} -> {:?})",
                mark_error_category(&err),
                start.point,
                end.point
            ),
        },
        Err(err) => log::debug!(
            target: "highlight",
            "{}: {err} ({:?} -> {:?})",
            err.category(),
            start.point,
            end.point
        ),
    }
}
