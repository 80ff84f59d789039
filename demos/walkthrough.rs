//! Combination Lock Walkthrough
//!
//! This example drives a lock headlessly through both ways of opening it.
//!
//! Key concepts:
//! - Driving the widget from a simulated display refresh
//! - Step-by-step dialing with NEXT_STEP
//! - Resetting mid-animation
//! - Reading the control layout a host would render
//!
//! Run with: RUST_LOG=combolock=debug cargo run --example walkthrough

use combolock::{LockConfig, LockError, LockWidget, Phase, Scene};
use std::f64::consts::TAU;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FRAME: Duration = Duration::from_millis(16);

/// Dial position under the pointer for a scene.
fn pointer(scene: &Scene) -> u32 {
    let ticks = f64::from(scene.ticks_on_dial);
    let turned = (-scene.angle).rem_euclid(TAU) / TAU * ticks;
    (turned.round() as u32) % scene.ticks_on_dial
}

fn settle(widget: &mut LockWidget, now: &mut Duration) -> usize {
    let mut frames = 0;
    let mut renderer = |_: &Scene| frames += 1;
    while !widget.is_idle() {
        *now += FRAME;
        widget.frame(*now, &mut renderer);
    }
    frames
}

fn report(widget: &LockWidget) {
    let view = widget.view();
    println!(
        "  phase: {:<20} step: {}  pointer at: {}",
        view.phase.to_string(),
        view.step,
        pointer(&widget.scene())
    );
    println!(
        "  controls: reset={:?} next_step={:?} inputs_enabled={}",
        view.controls.reset, view.controls.next_step, view.controls.combination
    );
}

fn main() -> Result<(), LockError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    println!("=== Combination Lock Walkthrough ===\n");

    let config = LockConfig::from_toml_str(
        r#"
        ticks_on_dial = 40
        speed = 70.0
        combination = [10, 25, 20]
        "#,
    )?;
    let mut widget = LockWidget::new(config)?;
    let mut now = Duration::ZERO;

    println!("1. Out-of-range digits are rejected before anything moves");
    widget.set_combination([10, 45, 20])?;
    if let Err(err) = widget.unlock() {
        println!("  {err}");
    }
    widget.set_combination([10, 25, 20])?;
    report(&widget);

    println!("\n2. Unlock in one go");
    widget.unlock()?;
    let frames = settle(&mut widget, &mut now);
    println!("  {frames} repaints over {:.1}s", now.as_secs_f64());
    report(&widget);

    println!("\n3. Reset");
    widget.reset()?;
    settle(&mut widget, &mut now);
    report(&widget);

    println!("\n4. Step by step");
    widget.step_by_step()?;
    settle(&mut widget, &mut now);
    report(&widget);
    while widget.phase() == Phase::Stepping(combolock::SubPhase::Idle) {
        widget.next_step()?;
        settle(&mut widget, &mut now);
        report(&widget);
    }

    println!("\n5. Abort halfway through a turn");
    widget.reset()?;
    settle(&mut widget, &mut now);
    widget.step_by_step()?;
    for _ in 0..40 {
        now += FRAME;
        widget.frame(now, &mut combolock::NoopRenderer);
    }
    widget.reset()?;
    report(&widget);
    settle(&mut widget, &mut now);
    report(&widget);

    println!("\nTransitions:");
    let history = widget.machine().history();
    for transition in history.transitions() {
        println!(
            "  {} {:<20} --{}--> {}",
            transition.timestamp.format("%H:%M:%S%.3f"),
            transition.from.to_string(),
            transition.event,
            transition.to
        );
    }
    if let Some(span) = history.duration() {
        println!("  ({} transitions over {:.3}s)", history.len(), span.as_secs_f64());
    }

    println!("\nFinal snapshot:\n{}", widget.snapshot().to_json()?);
    Ok(())
}
