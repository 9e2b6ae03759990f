use std::cell::RefCell;

use madori_layout::{
    Extent, FixedSigma, LayoutIntent, LayoutMode, Outcome, PlacementConfig, PlacementError,
    Placer, Point, Presets, Rect, Result, Size, WindowBackend,
};

/// Records every write instead of touching a real window.
struct MockBackend {
    window: Result<Rect>,
    displays: Result<Vec<Rect>>,
    fail_write: bool,
    writes: RefCell<Vec<(Option<Size>, Option<Point>)>>,
}

impl MockBackend {
    fn new(window: Rect, displays: Vec<Rect>) -> Self {
        Self {
            window: Ok(window),
            displays: Ok(displays),
            fail_write: false,
            writes: RefCell::new(Vec::new()),
        }
    }

    fn writes(&self) -> Vec<(Option<Size>, Option<Point>)> {
        self.writes.borrow().clone()
    }
}

impl WindowBackend for MockBackend {
    fn active_window_geometry(&self) -> Result<Rect> {
        self.window.clone()
    }

    fn set_active_window_geometry(&self, size: Option<Size>, position: Option<Point>) -> Result<()> {
        if self.fail_write {
            return Err(PlacementError::backend("AX operation failed: code -25200"));
        }
        self.writes.borrow_mut().push((size, position));
        Ok(())
    }

    fn displays(&self) -> Result<Vec<Rect>> {
        self.displays.clone()
    }
}

fn primary() -> Rect {
    Rect::new(0.0, 0.0, 1920.0, 1080.0)
}

fn new_placer(backend: MockBackend) -> Placer<MockBackend, FixedSigma> {
    Placer::new(backend, FixedSigma(0.0), PlacementConfig::default())
}

#[test]
fn test_center_writes_position_and_size() {
    let backend = MockBackend::new(Rect::new(10.0, 10.0, 640.0, 480.0), vec![primary()]);
    let mut placer = new_placer(backend);
    let mut intent = Presets::default().intent(LayoutMode::Center);
    intent.random_bias = false;

    let outcome = placer.place(&intent).unwrap();

    let expected_size = Size {
        width: 1280,
        height: 800,
    };
    let expected_pos = Point { x: 320, y: 140 };
    assert_eq!(
        outcome,
        Outcome::Applied(madori_layout::PlacementResult {
            size: expected_size,
            position: expected_pos,
        })
    );
    assert_eq!(
        placer.backend().writes(),
        vec![(Some(expected_size), Some(expected_pos))]
    );
}

#[test]
fn test_already_sized_window_is_left_alone() {
    let backend = MockBackend::new(Rect::new(10.0, 10.0, 1280.0, 800.0), vec![primary()]);
    let mut placer = new_placer(backend);
    let intent = Presets::default().intent(LayoutMode::Center);

    assert_eq!(placer.place(&intent).unwrap(), Outcome::Unchanged);
    assert!(placer.backend().writes().is_empty());
}

#[test]
fn test_move_to_center_omits_size() {
    let backend = MockBackend::new(Rect::new(10.0, 10.0, 640.0, 480.0), vec![primary()]);
    let mut placer = new_placer(backend);

    placer
        .place(&LayoutIntent::fill(LayoutMode::MoveToCenter))
        .unwrap();

    assert_eq!(
        placer.backend().writes(),
        vec![(None, Some(Point { x: 640, y: 300 }))]
    );
}

#[test]
fn test_window_on_secondary_display() {
    // Secondary display to the right, shorter, aligned to the bottom in
    // AppKit space: its top-left y is 1080 - 1024 = 56.
    let secondary = Rect::new(1920.0, 0.0, 1280.0, 1024.0);
    let backend = MockBackend::new(
        Rect::new(2000.0, 200.0, 400.0, 300.0),
        vec![primary(), secondary],
    );
    let mut placer = new_placer(backend);

    let outcome = placer
        .place(&LayoutIntent::fill(LayoutMode::LeftHalf))
        .unwrap();

    let Outcome::Applied(result) = outcome else {
        panic!("expected a write, got {:?}", outcome);
    };
    // margin (89.6, 71.68); usable x 2009.6, width 1100.8
    assert_eq!(result.size.width, 505);
    assert_eq!(result.position.x, 2009);
    assert_eq!(result.position.y, 127);
}

#[test]
fn test_offscreen_window_aborts_without_write() {
    let backend = MockBackend::new(Rect::new(9000.0, 9000.0, 640.0, 480.0), vec![primary()]);
    let mut placer = new_placer(backend);

    let err = placer
        .place(&LayoutIntent::fill(LayoutMode::Center))
        .unwrap_err();
    assert_eq!(err, PlacementError::DisplayNotFound);
    assert!(placer.backend().writes().is_empty());
}

#[test]
fn test_missing_window_is_reported() {
    let mut backend = MockBackend::new(Rect::default(), vec![primary()]);
    backend.window = Err(PlacementError::WindowNotFound);
    let mut placer = new_placer(backend);

    let err = placer
        .place(&LayoutIntent::fill(LayoutMode::RightHalf))
        .unwrap_err();
    assert_eq!(err, PlacementError::WindowNotFound);
}

#[test]
fn test_backend_errors_propagate() {
    let mut backend = MockBackend::new(Rect::new(0.0, 0.0, 640.0, 480.0), vec![primary()]);
    backend.displays = Err(PlacementError::backend("no screens"));
    let mut placer = new_placer(backend);
    let err = placer
        .place(&LayoutIntent::fill(LayoutMode::Center))
        .unwrap_err();
    assert!(matches!(err, PlacementError::Backend(_)));

    let mut backend = MockBackend::new(Rect::new(0.0, 0.0, 640.0, 480.0), vec![primary()]);
    backend.fail_write = true;
    let mut placer = new_placer(backend);
    let err = placer
        .place(&LayoutIntent {
            width: Extent::Pixels(1000.0),
            ..LayoutIntent::fill(LayoutMode::Center)
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "window backend failed: AX operation failed: code -25200");
}
