use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tonecurve_core::curve::channel::{IDENTITY_TABLE, build_lookup_table};
use tonecurve_core::{
    Channel, ChannelPoints, CurveEditor, CurveEvent, CurvePoint, EditorConfig, GesturePhase,
    PointerEvent,
};

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 300.0;

fn editor() -> CurveEditor {
    let mut editor = CurveEditor::new(EditorConfig::default());
    editor.resize(WIDTH, HEIGHT);
    editor
}

fn tap(editor: &mut CurveEditor, x: f32, y: f32) {
    editor.handle_pointer(PointerEvent::Down { x, y });
    editor.handle_pointer(PointerEvent::Up { x, y });
}

fn drag(editor: &mut CurveEditor, from: (f32, f32), to: (f32, f32)) {
    editor.handle_pointer(PointerEvent::Down { x: from.0, y: from.1 });
    editor.handle_pointer(PointerEvent::Move { x: to.0, y: to.1 });
    editor.handle_pointer(PointerEvent::Up { x: to.0, y: to.1 });
}

fn assert_well_formed(points: &[CurvePoint]) {
    assert!(points.len() >= 2);
    assert_eq!(points[0].x, 0);
    assert_eq!(points[points.len() - 1].x, 255);
    for w in points.windows(2) {
        assert!(w[0].x < w[1].x, "crossover in {points:?}");
    }
}

fn random_valid_points(rng: &mut StdRng) -> Vec<CurvePoint> {
    let mut xs: Vec<u8> = (0..rng.random_range(0..8))
        .map(|_| rng.random_range(1..255))
        .collect();
    xs.sort_unstable();
    xs.dedup();

    let mut points = vec![CurvePoint::new(0, rng.random_range(0..=255))];
    points.extend(
        xs.into_iter()
            .map(|x| CurvePoint::new(x.into(), rng.random_range(0..=255))),
    );
    points.push(CurvePoint::new(255, rng.random_range(0..=255)));
    points
}

#[test]
fn identity_curve_passes_values_through() {
    let editor = editor();
    let tables = editor.curves().tables();
    for i in 0..256 {
        assert_eq!(usize::from(tables.composite[i]), i);
        assert_eq!(usize::from(tables.red[i]), i);
    }
}

#[test]
fn random_point_lists_fill_every_table_entry() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let points = random_valid_points(&mut rng);
        let table = build_lookup_table(&points);
        assert_eq!(table.len(), 256);
        assert_eq!(table[0], 255 - points[0].y);
        assert_eq!(table[255], 255 - points[points.len() - 1].y);
    }
}

#[test]
fn symmetric_three_point_curve() {
    let mut editor = editor();
    editor
        .curves_mut()
        .set_channel_points(
            Channel::Green,
            vec![
                CurvePoint::new(0, 255),
                CurvePoint::new(128, 128),
                CurvePoint::new(255, 0),
            ],
        )
        .unwrap();
    let table = editor.curves().tables().green;
    assert_eq!(table[0], 0);
    assert_eq!(table[255], 255);
    assert!((i32::from(table[128]) - 127).abs() <= 1);
    assert!(table.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn insert_then_delete_restores_table() {
    let mut editor = editor();
    editor.set_active_channel(Channel::Blue);
    let before = editor.curves().tables().blue;

    tap(&mut editor, 200.0, 90.0);
    assert_eq!(editor.curves().active_points().len(), 3);
    assert_ne!(editor.curves().tables().blue, before);

    assert!(editor.delete_touched_point());
    assert_eq!(editor.curves().active_points().len(), 2);
    assert_eq!(editor.curves().tables().blue, before);
    assert_eq!(editor.curves().touched_index(), None);
}

#[test]
fn endpoints_keep_their_x_when_dragged() {
    let mut editor = editor();
    drag(&mut editor, (10.0, 287.0), (180.0, 150.0));
    drag(&mut editor, (390.0, 13.0), (100.0, 120.0));
    let points = editor.curves().active_points();
    assert_eq!(points[0].x, 0);
    assert_eq!(points[1].x, 255);
    assert!(editor.curves().is_modified(Channel::Composite));
}

#[test]
fn insertion_too_close_to_a_point_is_rejected() {
    let mut editor = editor();
    tap(&mut editor, 200.0, 150.0);
    assert_eq!(editor.curves().active_points().len(), 3);

    let radius = editor.curves().config().point_radius;
    let mapper = *editor.curves().mapper().unwrap();
    let center = mapper.render_x(f32::from(editor.curves().active_points()[1].x));
    // Outside the hit circle but inside the 2 × 1.1 × radius spacing.
    let near = center + 2.0 * 1.1 * radius - 1.0;
    tap(&mut editor, near, 100.0);
    assert_eq!(editor.curves().active_points().len(), 3);
}

#[test]
fn modified_flag_follows_edits_and_reset() {
    let mut editor = editor();
    assert!(!editor.curves().is_modified(Channel::Composite));

    tap(&mut editor, 200.0, 150.0);
    assert!(editor.curves().is_modified(Channel::Composite));

    editor.curves_mut().reset_channel(Channel::Composite);
    assert!(!editor.curves().is_modified(Channel::Composite));

    drag(&mut editor, (390.0, 13.0), (390.0, 60.0));
    assert!(editor.curves().is_modified(Channel::Composite));
}

#[test]
fn randomized_drags_never_cross_points() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut editor = editor();

    for gesture in 0..400 {
        if gesture % 50 == 0 {
            editor.set_active_channel(Channel::ALL[rng.random_range(0..4)]);
        }
        let start = (rng.random_range(0.0..WIDTH), rng.random_range(0.0..HEIGHT));
        editor.handle_pointer(PointerEvent::Down { x: start.0, y: start.1 });
        for _ in 0..rng.random_range(1..12) {
            let x = rng.random_range(-50.0..WIDTH + 50.0);
            let y = rng.random_range(-50.0..HEIGHT + 50.0);
            editor.handle_pointer(PointerEvent::Move { x, y });
            assert_well_formed(editor.curves().active_points());
        }
        editor.handle_pointer(PointerEvent::Up { x: 0.0, y: 0.0 });
        if rng.random_bool(0.1) {
            editor.delete_touched_point();
        }
        for channel in Channel::ALL {
            assert_well_formed(editor.curves().points_of(channel));
        }
    }
}

#[test]
fn gesture_completion_reports_channel() {
    let log = Rc::new(RefCell::new(Vec::<CurveEvent>::new()));
    let mut editor = editor();
    editor.set_active_channel(Channel::Green);
    editor.set_listener(log.clone());

    tap(&mut editor, 200.0, 100.0);

    let events = log.borrow();
    assert!(events.contains(&CurveEvent::GreenChanged));
    assert!(events.contains(&CurveEvent::ChannelChanged(Channel::Green)));
    let last_values = events
        .iter()
        .rev()
        .find_map(|e| match e {
            CurveEvent::ValuesChanged(tables) => Some(tables.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(*last_values, editor.curves().tables());
    assert_eq!(last_values.red, IDENTITY_TABLE);
}

#[test]
fn cancelled_drag_is_committed() {
    let log = Rc::new(RefCell::new(Vec::<CurveEvent>::new()));
    let mut editor = editor();
    editor.set_active_channel(Channel::Blue);
    editor.set_listener(log.clone());

    editor.handle_pointer(PointerEvent::Down { x: 200.0, y: 150.0 });
    editor.handle_pointer(PointerEvent::Move { x: 230.0, y: 110.0 });
    assert!(matches!(editor.gesture_phase(), GesturePhase::Dragging { .. }));
    let dragged = editor.curves().active_points().to_vec();
    editor.handle_pointer(PointerEvent::Cancel { x: 230.0, y: 110.0 });

    assert_eq!(editor.gesture_phase(), GesturePhase::Idle);
    assert_eq!(editor.curves().active_points(), dragged.as_slice());
    let events = log.borrow();
    assert!(events.contains(&CurveEvent::BlueChanged));
    assert!(events.contains(&CurveEvent::ChannelChanged(Channel::Blue)));
    let Some(CurveEvent::ValuesChanged(tables)) = events
        .iter()
        .rev()
        .find(|e| matches!(e, CurveEvent::ValuesChanged(_)))
    else {
        panic!("no values changed event in {events:?}");
    };
    assert_eq!(**tables, editor.curves().tables());
}

#[test]
fn non_finite_moves_leave_points_alone() {
    let mut editor = editor();
    editor.handle_pointer(PointerEvent::Down { x: 200.0, y: 150.0 });
    let before = editor.curves().active_points().to_vec();
    assert_eq!(before.len(), 3);

    editor.handle_pointer(PointerEvent::Move {
        x: f32::NAN,
        y: f32::NAN,
    });
    editor.handle_pointer(PointerEvent::Up { x: 200.0, y: 150.0 });
    assert_eq!(editor.curves().active_points(), before.as_slice());
    assert_well_formed(editor.curves().active_points());
}

#[test]
fn invalid_config_does_not_break_the_editor() {
    let mut editor = CurveEditor::new(EditorConfig {
        outline_step: 0.0,
        ..EditorConfig::default()
    });
    editor
        .curves_mut()
        .set_channel_points(
            Channel::Composite,
            vec![
                CurvePoint::new(0, 255),
                CurvePoint::new(128, 128),
                CurvePoint::new(255, 0),
            ],
        )
        .unwrap();
    editor.resize(WIDTH, HEIGHT);
    assert!(editor.curves().outline(Channel::Composite).vertices().len() > 3);

    let mut editor = CurveEditor::new(EditorConfig {
        point_radius: f32::NAN,
        ..EditorConfig::default()
    });
    editor.resize(WIDTH, HEIGHT);
    assert!(editor.curves().mapper().is_some());
    tap(&mut editor, 200.0, 150.0);
    assert_eq!(editor.curves().active_points().len(), 3);
}

#[test]
fn reset_all_returns_every_channel_to_identity() {
    let mut editor = editor();
    for channel in Channel::ALL {
        editor.set_active_channel(channel);
        tap(&mut editor, 200.0, 90.0);
        assert!(editor.curves().is_modified(channel));
    }
    editor.curves_mut().reset_all();
    for channel in Channel::ALL {
        assert!(!editor.curves().is_modified(channel));
    }
    assert!(editor.curves().tables().is_identity());
}

#[test]
fn saved_points_restore_exactly() {
    let mut editor = editor();
    editor.set_active_channel(Channel::Red);
    tap(&mut editor, 120.0, 200.0);
    tap(&mut editor, 300.0, 60.0);
    editor.set_active_channel(Channel::Composite);
    drag(&mut editor, (200.0, 150.0), (230.0, 110.0));

    let json = editor.curves().export_points().to_json().unwrap();
    let tables = editor.curves().tables();

    let mut restored = CurveEditor::default();
    restored.resize(WIDTH, HEIGHT);
    restored
        .curves_mut()
        .import_points(ChannelPoints::from_json(&json).unwrap())
        .unwrap();

    assert_eq!(restored.curves().export_points(), editor.curves().export_points());
    assert_eq!(restored.curves().tables(), tables);
    for channel in Channel::ALL {
        assert_eq!(restored.curves().outline(channel), editor.curves().outline(channel));
    }
}

#[test]
fn renderer_thread_sees_consistent_snapshots() {
    let mut editor = editor();
    let cell = editor.curves_mut().attach_snapshot_cell();
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let cell = Arc::clone(&cell);
        let done = Arc::clone(&done);
        std::thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                let snapshot = cell.load();
                for channel in &snapshot.channels {
                    assert_eq!(channel.table, build_lookup_table(&channel.points));
                }
            }
        })
    };

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let x = rng.random_range(0.0..WIDTH);
        let y = rng.random_range(0.0..HEIGHT);
        drag(&mut editor, (x, y), (x + 15.0, y - 10.0));
    }
    done.store(true, Ordering::Release);
    reader.join().unwrap();

    let snapshot = cell.load();
    assert_eq!(
        snapshot.channel(Channel::Composite).points,
        editor.curves().active_points()
    );
}
