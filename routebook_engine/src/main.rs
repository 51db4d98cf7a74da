#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Routebook **
//! Terminal viewer for speedrun guide documents.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;

use routebook_engine::bridge::FsBridge;
use routebook_engine::session::Session;
use routebook_engine::settings::Settings;
use routebook_engine::style::GuideStyle;
use routebook_engine::tracker::{Tracker, default_tracker_path};
use routebook_engine::view;
use routebook_engine::{load_guide, run_repl};

fn main() -> Result<()> {
    env_logger::init();

    let Some(guide_path) = env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: routebook_engine <guide.json>");
    };

    let settings_path = guide_path
        .parent()
        .map_or_else(|| PathBuf::from("settings.toml"), |dir| dir.join("settings.toml"));
    let mut settings = Settings::load_or_default(&settings_path);
    let tracker = Tracker::load_or_default(&default_tracker_path());

    info!("loading guide from {}", guide_path.display());
    let guide = match load_guide(&guide_path, &FsBridge) {
        Ok(guide) => guide,
        Err(err) => {
            println!("{}", view::error_state(&err));
            return Err(err).context("while loading the guide");
        },
    };

    let mut session = Session::new(guide, tracker);
    run_repl(&mut session, &mut settings)?;

    if let Err(err) = session.state.tracker.save_to(&default_tracker_path()) {
        println!("{} {err:#}", "could not save tracker on exit:".error_style());
    }
    Ok(())
}
