//! Headless walkthrough of a push followed by a pop.
//!
//! Reads `navslide.toml` (plus `NAVSLIDE_*` overrides), builds a navigator
//! with two pages and drives both transitions at 60 frames per second.
//! Run with `RUST_LOG=debug` to see the transition lifecycle.

use anyhow::{Context, Result};
use std::cell::Cell;
use std::rc::Rc;

use navslide_config::NavslideConfig;
use navslide_scene::tree::{ElementTree, NodeId, Rect};
use navslide_transition::page::{
    BACK_BUTTON_CLASS, BACK_BUTTON_ICON_CLASS, BACK_BUTTON_LABEL_CLASS, CONTENT_CLASS, PAGE_CLASS,
    TOOLBAR_CENTER_CLASS, TOOLBAR_CLASS, TOOLBAR_LEFT_CLASS, TOOLBAR_RIGHT_CLASS,
};
use navslide_transition::{
    ClassPage, NavigatorTransition, SlideTransition, Stage, TransitionHandle,
};

const WIDTH: f64 = 390.0;
const HEIGHT: f64 = 844.0;
const FRAME: f64 = 1.0 / 60.0;
/// Give up on a transition that has not finished after ten seconds.
const MAX_FRAMES: usize = 600;

fn child(tree: &mut ElementTree, parent: NodeId, class: &str, rect: Rect) -> NodeId {
    let node = tree.create_with_classes("div", &[class]);
    tree.append_child(parent, node);
    tree.set_rect(node, rect);
    node
}

fn build_page(tree: &mut ElementTree, navigator: NodeId, back_label: bool) -> NodeId {
    let page = child(tree, navigator, PAGE_CLASS, Rect::new(0.0, 0.0, WIDTH, HEIGHT));
    child(tree, page, CONTENT_CLASS, Rect::new(0.0, 44.0, WIDTH, HEIGHT - 44.0));

    let toolbar = child(tree, page, TOOLBAR_CLASS, Rect::new(0.0, 0.0, WIDTH, 44.0));
    let left = child(tree, toolbar, TOOLBAR_LEFT_CLASS, Rect::new(0.0, 0.0, 110.0, 44.0));
    child(tree, toolbar, TOOLBAR_CENTER_CLASS, Rect::new(110.0, 0.0, 170.0, 44.0));
    child(tree, toolbar, TOOLBAR_RIGHT_CLASS, Rect::new(280.0, 0.0, 110.0, 44.0));

    if back_label {
        let button = child(tree, left, BACK_BUTTON_CLASS, Rect::new(0.0, 0.0, 90.0, 44.0));
        child(tree, button, BACK_BUTTON_ICON_CLASS, Rect::new(8.0, 10.0, 14.0, 24.0));
        child(tree, button, BACK_BUTTON_LABEL_CLASS, Rect::new(24.0, 10.0, 48.0, 24.0));
    }
    page
}

fn drive(stage: &mut Stage, handle: &TransitionHandle, name: &str) -> Result<()> {
    let mut frames = 0;
    while !handle.is_complete() {
        anyhow::ensure!(frames < MAX_FRAMES, "{name} did not finish");
        stage.tick(FRAME);
        for event in stage.drain_events() {
            log::trace!("{name}: {event:?}");
        }
        frames += 1;
    }
    log::info!("{name} finished after {frames} frames");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let config = NavslideConfig::load();
    log::info!(
        "timing={} delay={}s duration={}s",
        config.transition.timing,
        config.transition.delay,
        config.transition.duration
    );
    let animator =
        SlideTransition::from_config(&config).context("invalid transition configuration")?;

    let mut stage = Stage::default();
    let navigator = stage.tree.create("navigator");
    stage
        .tree
        .set_rect(navigator, Rect::new(0.0, 0.0, WIDTH, HEIGHT));
    let home = ClassPage::shared(build_page(&mut stage.tree, navigator, false));
    let detail = ClassPage::shared(build_page(&mut stage.tree, navigator, true));

    let completions = Rc::new(Cell::new(0));

    let counter = completions.clone();
    let handle = animator.push(
        &mut stage,
        Rc::clone(&detail),
        Rc::clone(&home),
        Box::new(move || counter.set(counter.get() + 1)),
    )?;
    drive(&mut stage, &handle, "push")?;

    let counter = completions.clone();
    let handle = animator.pop(
        &mut stage,
        home,
        detail,
        Box::new(move || counter.set(counter.get() + 1)),
    )?;
    drive(&mut stage, &handle, "pop")?;

    log::info!(
        "{} transitions completed, mask attached: {}",
        completions.get(),
        animator.is_mask_attached(&stage.tree)
    );
    Ok(())
}
