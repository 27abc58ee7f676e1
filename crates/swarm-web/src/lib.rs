#![cfg(target_arch = "wasm32")]
use glam::Vec3;
use instant::Instant;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use swarm_core::{GestureTracker, LandmarkSet, Swarm, LANDMARKS_PER_HAND};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod render;
mod ui;

use constants::{SWARM_SEED, SWORD_COUNT};

thread_local! {
    // Ingestion slot for the hand tracking provider; filled once init ran.
    static TRACKER: RefCell<Option<Rc<RefCell<GestureTracker>>>> = RefCell::new(None);
}

/// Entry point for the hand tracking provider.
///
/// The JS side flattens each processed video frame into `hands * 21 * 3`
/// floats (normalized image coordinates, landmark-major) and calls this once
/// per frame — with an empty slice when no hand is detected. Malformed
/// lengths are rejected with a logged error, never a panic.
#[wasm_bindgen]
pub fn ingest_hand_frame(data: &[f32]) {
    const FLOATS_PER_HAND: usize = LANDMARKS_PER_HAND * 3;
    if data.len() % FLOATS_PER_HAND != 0 {
        log::error!(
            "hand frame carries {} floats, expected a multiple of {}",
            data.len(),
            FLOATS_PER_HAND
        );
        return;
    }
    let mut hands: SmallVec<[LandmarkSet; 2]> = SmallVec::new();
    for chunk in data.chunks_exact(FLOATS_PER_HAND) {
        let mut hand = [Vec3::ZERO; LANDMARKS_PER_HAND];
        for (point, xyz) in hand.iter_mut().zip(chunk.chunks_exact(3)) {
            *point = Vec3::new(xyz[0], xyz[1], xyz[2]);
        }
        hands.push(hand);
    }
    TRACKER.with(|slot| {
        if let Some(tracker) = slot.borrow().as_ref() {
            tracker.borrow_mut().ingest(&hands);
        }
    });
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("swarm-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the backing store in sync with CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let swarm = Rc::new(RefCell::new(Swarm::new(SWORD_COUNT, SWARM_SEED)));
    let tracker = Rc::new(RefCell::new(GestureTracker::new()));
    ui::set_sword_count(SWORD_COUNT);
    ui::set_state_text(swarm.borrow().state().as_str());

    {
        let swarm_on_gesture = swarm.clone();
        tracker.borrow_mut().subscribe(move |label, _position| {
            swarm_on_gesture.borrow_mut().set_state(label);
            ui::set_state_text(label.as_str());
        });
    }
    TRACKER.with(|slot| *slot.borrow_mut() = Some(tracker.clone()));

    // The swarm keeps animating toward its default focal point if WebGPU
    // (or the camera feed) never comes up.
    let gpu = frame::init_gpu(&canvas, SWORD_COUNT).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        swarm,
        tracker,
        canvas,
        gpu,
        started: Instant::now(),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
