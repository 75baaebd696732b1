use super::*;
use crate::eval::context::AnimationContext;
use crate::eval::scene::SceneComposer;

fn setup() -> (ShortConfig, Stage, SceneComposer) {
    let cfg = ShortConfig::default();
    let stage = Stage::build(&cfg).unwrap();
    let composer = SceneComposer::new(&stage).unwrap();
    (cfg, stage, composer)
}

fn plan_at(time: f64) -> FramePlan {
    let (cfg, stage, composer) = setup();
    let pose = composer.evaluate(&AnimationContext::new(time)).unwrap();
    compile_frame(&stage, &cfg, &pose)
}

fn texts(plan: &FramePlan) -> Vec<(&str, TextPlacement)> {
    plan.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                text, placement, ..
            } => Some((text.as_str(), *placement)),
            DrawOp::FillPath { .. } => None,
        })
        .collect()
}

#[test]
fn credits_frame_is_text_on_black() {
    let plan = plan_at(1.234);
    assert_eq!(plan.clear, Rgba8::BLACK);
    assert_eq!(
        texts(&plan),
        vec![
            ("Windowsill", TextPlacement::Baseline(Point::new(300.0, 300.0))),
            (
                "a short in four actors",
                TextPlacement::Baseline(Point::new(300.0, 350.0))
            ),
            ("1.23", TextPlacement::Baseline(COUNTER_AT)),
        ]
    );
    assert_eq!(plan.ops.len(), 3);
}

#[test]
fn sequence_frame_paints_back_to_front() {
    let plan = plan_at(12.0);
    assert_eq!(plan.clear, palette::WALL);
    // 8 windows, rectangle, trapezoid, crescent, counter.
    assert_eq!(plan.ops.len(), 12);

    let colors: Vec<Rgba8> = plan
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillPath { color, .. } => Some(*color),
            DrawOp::Text { .. } => None,
        })
        .collect();
    assert!(colors[..8].iter().all(|&c| c == palette::WINDOW_DAY));
    assert_eq!(
        &colors[8..],
        &[palette::RECTANGLE, palette::TRAPEZOID, palette::CRESCENT]
    );
    assert_eq!(texts(&plan), vec![("12.00", TextPlacement::Baseline(COUNTER_AT))]);
}

#[test]
fn night_turns_windows_and_rectangle_dark() {
    let plan = plan_at(35.0);
    let DrawOp::FillPath { color, .. } = &plan.ops[0] else {
        panic!("first op should be a window");
    };
    assert_eq!(*color, palette::WINDOW_NIGHT);
    let DrawOp::FillPath { color, .. } = &plan.ops[8] else {
        panic!("ninth op should be the rectangle");
    };
    assert_eq!(*color, palette::RECTANGLE_NIGHT);
}

#[test]
fn the_end_is_centered_after_thirty_seven() {
    let plan = plan_at(37.01);
    let t = texts(&plan);
    assert_eq!(
        t.last(),
        Some(&(THE_END, TextPlacement::Centered(Point::new(960.0, 540.0))))
    );
    assert!(!texts(&plan_at(36.99)).iter().any(|(s, _)| *s == THE_END));
}

#[test]
fn counter_rounds_to_two_decimals() {
    assert_eq!(format_counter(0.0), "0.00");
    assert_eq!(format_counter(3.005 + 1e-9), "3.01");
    assert_eq!(format_counter(37.0), "37.00");
}
