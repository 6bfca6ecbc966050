//! Slidepanel Demo
//!
//! Builds a small page in memory, attaches a panel to it and replays a
//! scripted session of label clicks. A single-threaded tokio loop drives the
//! animator one frame at a time, the way a host event loop would.
//!
//! Usage: `slidepanel-demo [options.json]`

mod page;

use chrono::Utc;
use std::time::Duration;

use slidepanel_core::{Options, SlidingPanel};

use page::DemoPage;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy)]
enum Step {
    Click(usize),
    Toggle,
    Remove,
}

const SCRIPT: &[Step] = &[
    Step::Click(0),
    Step::Click(1),
    Step::Click(1),
    Step::Toggle,
    Step::Remove,
];

pub fn run() -> anyhow::Result<()> {
    slidepanel_core::init_logging();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::from_path(&path)?,
        None => Options::default(),
    };

    tracing::info!(options = %serde_json::to_string(&options)?, "Starting demo");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(play(options))
}

async fn play(options: Options) -> anyhow::Result<()> {
    let page = DemoPage::build(&["Files", "Search", "Settings"])?;
    page.log_notifications(Utc::now());

    let panel = SlidingPanel::init(page.host.host(), page.container, options)?;
    tracing::info!(tabs = %serde_json::to_string(&panel.tabs())?, "Discovered tabs");

    for step in SCRIPT {
        tracing::info!(?step, "Running step");

        match *step {
            Step::Click(index) => page.click(index),
            Step::Toggle => {
                panel.toggle(None, false);
            }
            Step::Remove => {
                panel.remove();
            }
        }

        let frames = settle(&page).await;

        tracing::info!(
            state = %panel.state(),
            selected = ?panel.selected(),
            frames,
            classes = ?page.host.document.classes(page.container),
            "Step settled"
        );
    }

    let history = page.host.events.history();
    tracing::info!(
        events = history.len(),
        history = %serde_json::to_string(&history)?,
        "Demo finished"
    );

    Ok(())
}

/// Advance the animator frame by frame until nothing is running
async fn settle(page: &DemoPage) -> usize {
    let mut interval = tokio::time::interval(FRAME);
    let mut frames = 0;

    while !page.host.animator.is_idle() {
        interval.tick().await;
        page.host.animator.advance(FRAME);
        frames += 1;
    }

    frames
}
