use std::sync::{Arc, Mutex};

use doodle_pad::command::Damage;
use doodle_pad::engine::Engine;
use doodle_pad::event::{EngineEvent, EventHandler};
use doodle_pad::surface::Surface;
use egui::{pos2, Color32, Pos2};

/// Records every draw call so tests can assert on exactly what a repaint
/// produced.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Polyline {
        points: Vec<Pos2>,
        width: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Glyph {
        glyph: String,
        anchor: Pos2,
        size: f32,
        rotation_deg: f32,
        color: Color32,
    },
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        self.calls.push(Call::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, _width: f32, color: Color32) {
        self.calls.push(Call::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_glyph(&mut self, glyph: &str, anchor: Pos2, size: f32, rotation_deg: f32, color: Color32) {
        self.calls.push(Call::Glyph {
            glyph: glyph.to_owned(),
            anchor,
            size,
            rotation_deg,
            color,
        });
    }
}

struct CaptureEvents(Arc<Mutex<Vec<EngineEvent>>>);

impl EventHandler for CaptureEvents {
    fn handle_event(&mut self, event: &EngineEvent) {
        self.0.lock().unwrap().push(*event);
    }
}

fn capture(engine: &Engine) -> Arc<Mutex<Vec<EngineEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    engine.subscribe(Box::new(CaptureEvents(events.clone())));
    events
}

/// Index of the 🌳 sticker in the startup tool set.
const TREE_STICKER: usize = 4;

#[test]
fn click_without_move_still_renders_a_stroke() {
    let mut engine = Engine::new();
    engine.pointer_down(pos2(4.0, 4.0));
    engine.pointer_up();

    let mut surface = RecordingSurface::default();
    engine.full_repaint(&mut surface);

    assert_eq!(surface.calls.len(), 2);
    assert_eq!(surface.calls[0], Call::Clear);
    match &surface.calls[1] {
        Call::Polyline { points, .. } => {
            assert_eq!(points.as_slice(), &[pos2(4.0, 4.0), pos2(4.0, 4.0)]);
        }
        other => panic!("expected a polyline, got {other:?}"),
    }
}

#[test]
fn stamp_follows_cursor_instead_of_leaving_a_trail() {
    let mut engine = Engine::new();
    engine.select_tool(TREE_STICKER);

    engine.pointer_down(pos2(10.0, 10.0));
    let damage = engine.pointer_move(pos2(40.0, 25.0));
    assert_eq!(damage, Some(Damage::Full));
    engine.pointer_up();

    let mut surface = RecordingSurface::default();
    engine.full_repaint(&mut surface);

    let glyphs: Vec<&Call> = surface
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Glyph { .. }))
        .collect();
    assert_eq!(glyphs.len(), 1, "a stamp is a single glyph, not a trail");
    match glyphs[0] {
        Call::Glyph { glyph, anchor, .. } => {
            assert_eq!(glyph, "🌳");
            assert_eq!(*anchor, pos2(40.0, 25.0));
        }
        _ => unreachable!(),
    }
}

#[test]
fn extending_a_stroke_reports_incremental_damage() {
    let mut engine = Engine::new();
    engine.pointer_down(pos2(0.0, 0.0));
    let damage = engine.pointer_move(pos2(5.0, 5.0));

    match damage {
        Some(Damage::Segment { from, to, width, .. }) => {
            assert_eq!(from, pos2(0.0, 0.0));
            assert_eq!(to, pos2(5.0, 5.0));
            assert_eq!(width, 1.0);
        }
        other => panic!("expected segment damage, got {other:?}"),
    }
}

#[test]
fn style_changes_do_not_alter_committed_commands() {
    let mut engine = Engine::new();
    engine.pointer_down(pos2(0.0, 0.0));
    engine.pointer_move(pos2(5.0, 5.0));
    engine.pointer_up();

    // New live style; the committed stroke keeps its creation snapshot.
    engine.set_line_width(9.0);
    engine.set_color(Color32::RED);

    let mut surface = RecordingSurface::default();
    engine.full_repaint(&mut surface);
    match &surface.calls[1] {
        Call::Polyline { width, color, .. } => {
            assert_eq!(*width, 1.0);
            assert_eq!(*color, Color32::BLACK);
        }
        other => panic!("expected a polyline, got {other:?}"),
    }

    // Same rule for a stamp's rotation.
    engine.select_tool(TREE_STICKER);
    engine.set_rotation(45.0);
    engine.pointer_down(pos2(20.0, 20.0));
    engine.pointer_up();
    engine.set_rotation(300.0);

    let mut surface = RecordingSurface::default();
    engine.full_repaint(&mut surface);
    match surface.calls.last() {
        Some(Call::Glyph { rotation_deg, .. }) => assert_eq!(*rotation_deg, 45.0),
        other => panic!("expected a glyph, got {other:?}"),
    }
}

#[test]
fn preview_overlay_never_commits_anything() {
    let mut engine = Engine::new();
    engine.pointer_move(pos2(30.0, 30.0));

    let mut surface = RecordingSurface::default();
    for _ in 0..5 {
        engine.preview_overlay(&mut surface);
    }
    assert!(engine.history().is_empty());

    // Marker preview: a translucent circle whose diameter is the line width.
    match surface.calls.last() {
        Some(Call::Circle { center, radius, color }) => {
            assert_eq!(*center, pos2(30.0, 30.0));
            assert_eq!(*radius, 0.5);
            assert!(color.a() < 255, "preview ink must be translucent");
        }
        other => panic!("expected a circle preview, got {other:?}"),
    }
}

#[test]
fn sticker_preview_is_rotated_translucent_and_transient() {
    let mut engine = Engine::new();
    let events = capture(&engine);

    engine.select_tool(TREE_STICKER);
    engine.set_rotation(45.0);
    engine.pointer_move(pos2(50.0, 50.0));

    assert!(events
        .lock()
        .unwrap()
        .contains(&EngineEvent::ToolMoved { pos: pos2(50.0, 50.0) }));

    let mut surface = RecordingSurface::default();
    engine.preview_overlay(&mut surface);
    match surface.calls.last() {
        Some(Call::Glyph {
            glyph,
            anchor,
            rotation_deg,
            color,
            ..
        }) => {
            assert_eq!(glyph, "🌳");
            assert_eq!(*anchor, pos2(50.0, 50.0));
            assert_eq!(*rotation_deg, 45.0);
            assert!(color.a() < 255);
        }
        other => panic!("expected a glyph preview, got {other:?}"),
    }

    // A later full repaint carries no rotation from the preview.
    let mut surface = RecordingSurface::default();
    engine.full_repaint(&mut surface);
    assert_eq!(surface.calls, vec![Call::Clear]);
}

#[test]
fn drawing_changed_reports_emptiness() {
    let mut engine = Engine::new();
    let events = capture(&engine);

    // No-ops on empty history emit nothing.
    engine.undo();
    engine.redo();
    engine.clear();
    assert!(events.lock().unwrap().is_empty());

    engine.pointer_down(pos2(1.0, 1.0));
    engine.pointer_up();
    engine.undo();

    let seen = events.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[
            EngineEvent::DrawingChanged { empty: false },
            EngineEvent::DrawingChanged { empty: false },
            EngineEvent::DrawingChanged { empty: true },
        ]
    );
}

#[test]
fn pointer_leave_finalizes_drag_and_hides_preview() {
    let mut engine = Engine::new();
    engine.pointer_down(pos2(5.0, 5.0));
    engine.pointer_move(pos2(8.0, 8.0));
    engine.pointer_leave();

    let cursor = engine.cursor();
    assert!(!cursor.active);
    assert_eq!(cursor.position, None);

    // No stale preview at the old position.
    let mut surface = RecordingSurface::default();
    engine.preview_overlay(&mut surface);
    assert!(
        !surface.calls.iter().any(|c| matches!(c, Call::Circle { .. })),
        "no preview mark may be drawn with the pointer off-surface"
    );

    // The interrupted stroke itself was committed and survives.
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn pointer_down_while_drawing_is_ignored() {
    let mut engine = Engine::new();
    engine.pointer_down(pos2(0.0, 0.0));
    engine.pointer_down(pos2(9.0, 9.0));
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn tool_selection_resets_style_defaults() {
    let mut engine = Engine::new();
    assert_eq!(engine.style().line_width, 1.0);

    engine.select_tool(1); // thick marker
    assert_eq!(engine.style().line_width, 3.0);
    assert!(!engine.tools().sticker_mode());

    engine.select_tool(TREE_STICKER);
    assert_eq!(engine.style().line_width, 5.0);
    assert!(engine.tools().sticker_mode());

    // Out-of-range selection is ignored.
    engine.select_tool(99);
    assert_eq!(engine.tools().selected_index(), TREE_STICKER);

    // Selecting the same tool twice is idempotent.
    engine.select_tool(TREE_STICKER);
    assert_eq!(engine.tools().selected_index(), TREE_STICKER);
}

#[test]
fn user_stickers_extend_the_tool_set() {
    let mut engine = Engine::new();
    let before = engine.tools().tools().len();

    let index = engine.add_user_sticker("🦀");
    assert_eq!(index, before);

    engine.select_tool(index);
    assert!(engine.tools().sticker_mode());
    assert_eq!(engine.style().line_width, 5.0);

    engine.pointer_down(pos2(12.0, 12.0));
    engine.pointer_up();

    let mut surface = RecordingSurface::default();
    engine.full_repaint(&mut surface);
    match surface.calls.last() {
        Some(Call::Glyph { glyph, .. }) => assert_eq!(glyph, "🦀"),
        other => panic!("expected a glyph, got {other:?}"),
    }
}

#[test]
fn rotation_wraps_into_a_full_turn() {
    let mut engine = Engine::new();
    engine.set_rotation(400.0);
    assert_eq!(engine.style().rotation_deg, 40.0);
    engine.set_rotation(-30.0);
    assert_eq!(engine.style().rotation_deg, 330.0);
}
