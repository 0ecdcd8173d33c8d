//! Headless Drag Example
//!
//! Drives a resizer through a few drag gestures on the in-memory document
//! and logs each committed size.
//!
//! Run with `RUST_LOG=trace` to see every pointer event. Pass `--profile` to
//! serve puffin data on port 8585.

use rz_core::logging;
use rz_core::math::Vec2;
use rz_core::profiling::{ProfilingBackend, init_profiling, new_frame};
use rz_dom::{LayoutRect, PointerEvent, StyleSink};
use rz_resizer::{Resizer, ResizerOptions};
use rz_test_utils::{MemoryDocument, create_container};

fn main() {
    logging::init();
    if std::env::args().any(|arg| arg == "--profile") {
        init_profiling(ProfilingBackend::PuffinHttp);
    }

    let doc = MemoryDocument::new();
    let fixture = create_container(&doc, 640.0);
    doc.set_layout(fixture.container, LayoutRect::new(40.0, 20.0, 640.0, 480.0));

    let rz = match Resizer::new(&doc, ".container", ResizerOptions::new().width(6.0)) {
        Ok(rz) => rz,
        Err(e) => {
            tracing::error!("Failed to attach resizer: {}", e);
            return;
        }
    };
    rz.on_resize(|commit| {
        tracing::info!(
            "Resized: handle at {}px, target basis {}px",
            commit.handle_x,
            commit.basis
        );
    });

    let body = doc.body();
    for release_x in [200.0, 520.0, 10.0, 900.0] {
        new_frame();
        doc.dispatch(rz.handle(), &mut PointerEvent::down(Vec2::ZERO, Vec2::new(3.0, 0.0)));
        for step in 1..=8 {
            let x = release_x * step as f32 / 8.0;
            doc.dispatch(body, &mut PointerEvent::moved(Vec2::new(x, 100.0)));
        }
        doc.dispatch(body, &mut PointerEvent::up(Vec2::new(release_x, 100.0)));

        tracing::info!(
            "Target flex: {}",
            doc.style(&rz.target(), "flex").unwrap_or_default()
        );
    }

    rz.remove();
    tracing::info!("Recorded {} document calls", doc.calls().len());
}
