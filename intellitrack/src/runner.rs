use crate::config::{Input, Settings};
use crate::control_loop::{ControlLoop, TickOutcome};
use crate::frame_feed::FrameFeed;
use crate::operator_input::{self, OperatorCommand};
use crate::ptz::PtzController;
use crate::raw_video::RawVideoReader;
use crate::template_tracker::TemplateTracker;
use crate::tracker::ObjectTracker;
use crate::transport::{CommandSink, UdpSink};
use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

/// Runs the tracking loop until the operator quits, Ctrl+C arrives or the
/// frame source ends.
pub async fn run(settings: Settings) -> Result<()> {
    let sink = UdpSink::connect(settings.endpoint())
        .await
        .context("camera link setup failed")?;
    let ptz = PtzController::new(sink, settings.framing());
    let tracker = TemplateTracker::new(settings.tracker());
    let mut control = ControlLoop::new(tracker, ptz, settings.loop_options());
    let mut feed = open_feed(settings.input())?;

    let (tx, mut rx) = mpsc::channel(16);
    operator_input::spawn_input_loop(tx);
    tracing::info!("{}", operator_input::HELP);

    let mut ticker = time::interval(settings.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut input_open = true;
    let mut pending_select = settings.select_on_start();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let outcome = control.tick(&mut feed);
                if let Some(err) = feed.try_recv_error() {
                    tracing::warn!("frame source: {}", err);
                }
                match outcome {
                    TickOutcome::NoFrame if feed.is_closed() => {
                        tracing::info!("frame source ended");
                        break;
                    }
                    TickOutcome::NoFrame => {}
                    _ if pending_select => {
                        pending_select = false;
                        select_roi(&mut control, &settings);
                    }
                    outcome => tracing::trace!("tick: {:?}", outcome),
                }
            }
            command = rx.recv(), if input_open => match command {
                Some(OperatorCommand::SelectRoi) => select_roi(&mut control, &settings),
                Some(OperatorCommand::ToggleActuation) => {
                    control.toggle_actuation();
                }
                Some(OperatorCommand::Quit) => break,
                None => {
                    tracing::debug!("operator input closed");
                    input_open = false;
                }
            },
            result = &mut ctrl_c => {
                if let Err(err) = result {
                    tracing::warn!("ctrl+c handler failed: {}", err);
                }
                break;
            }
        }
    }

    while let Some(err) = feed.try_recv_error() {
        tracing::warn!("frame source: {}", err);
    }
    control.shutdown();
    Ok(())
}

fn open_feed(input: &Input) -> Result<FrameFeed> {
    match input {
        Input::Raw {
            path,
            width,
            height,
        } => {
            let reader = RawVideoReader::open(path, *width, *height)
                .with_context(|| format!("open raw input {}", path.display()))?;
            Ok(FrameFeed::spawn(move |tx| reader.run(tx)))
        }
        #[cfg(feature = "ffmpeg")]
        Input::Ffmpeg { url } => {
            let url = url.clone();
            Ok(FrameFeed::spawn(move |tx| {
                crate::ffmpeg_decoder::run(&url, tx)
            }))
        }
        #[cfg(not(feature = "ffmpeg"))]
        Input::Ffmpeg { url } => {
            anyhow::bail!("cannot open {url}: built without the `ffmpeg` feature")
        }
    }
}

fn select_roi<T: ObjectTracker, S: CommandSink>(control: &mut ControlLoop<T, S>, settings: &Settings) {
    let Some((width, height)) = control.latest_frame().map(|f| (f.width, f.height)) else {
        tracing::warn!("no frame yet, cannot select a region");
        return;
    };
    let Some(bbox) = settings.roi_for(width, height) else {
        tracing::warn!("frame {}x{} too small for a default region", width, height);
        return;
    };
    if let Err(err) = control.select_roi_on_latest(bbox) {
        tracing::warn!("region {} not selected: {}", bbox, err);
    }
}
