use resolution_switcher::{
    host::headless::HeadlessHost, runtime, ImageLayer, Resolution, Switcher, SwitcherConfig,
};
use std::time::Duration;

/// One step of the scripted session
#[derive(Debug, Clone, Copy)]
enum Step {
    Click,
    Zoom(f64),
}

const SESSION: &[Step] = &[
    Step::Click,
    Step::Zoom(3.0),
    Step::Zoom(6.5),
    Step::Zoom(1.25),
    Step::Click,
    Step::Zoom(4.0),
    Step::Click,
];

/// Runs the switcher against a simulated viewer page that finishes loading
/// after a few polls, then replays a click/zoom session.
///
/// An optional JSON argument overrides the default configuration.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    resolution_switcher::init_logger();

    let config = match std::env::args().nth(1) {
        Some(json) => SwitcherConfig::from_json(&json)?,
        None => SwitcherConfig::default(),
    };
    log::info!("Using configuration:\n{}", config.to_json()?);

    let host = HeadlessHost::new();
    let mut switcher = Switcher::new(config.clone(), host.bindings());

    let local = tokio::task::LocalSet::new();
    let controller = local
        .run_until(async {
            runtime::spawn_local(load_page(host.clone(), config.clone()));
            switcher.run().await
        })
        .await?;

    println!("Viewer ready, button shows {}", label(&host));

    for step in SESSION {
        match *step {
            Step::Click => {
                host.click_toggle();
            }
            Step::Zoom(zoom) => host.set_zoom(zoom),
        }
        println!(
            "{:<12} -> {:<4} layer={:?} stored={:?}",
            format!("{:?}", step),
            label(&host),
            host.render_scale_target(&config.layer_name),
            host.storage().get(&config.storage_key),
        );
    }

    let last = controller.borrow().current();
    println!(
        "Session ended at {} ({})",
        last,
        if last == Resolution::High {
            "full quality"
        } else {
            "reduced quality"
        }
    );
    Ok(())
}

/// Builds the page piece by piece, the way the viewer does after load
async fn load_page(host: HeadlessHost, config: SwitcherConfig) {
    runtime::async_delay(Duration::from_millis(120)).await;
    host.show_toolbar(
        &config.top_bar_class,
        &["neuroglancer-viewer-layout", config.anchor_class.as_str()],
    );
    log::debug!("Toolbar attached");

    runtime::async_delay(Duration::from_millis(80)).await;
    host.set_navigation(1.5);
    log::debug!("Navigation state created");

    runtime::async_delay(Duration::from_millis(100)).await;
    host.add_layer(ImageLayer::new(config.layer_name.clone()));
    log::debug!("Layer '{}' loaded", config.layer_name);
}

fn label(host: &HeadlessHost) -> String {
    host.toggle_label().unwrap_or_default()
}
