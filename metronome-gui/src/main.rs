//! # Metronome - Desktop GUI
//!
//! The iced application around the headless metronome controller.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme; all controller
//!   work happens here, in `update`
//! - **Tick Chain**: each beat returns a `Task` that sleeps until the next
//!   deadline and comes back as a `Message::Beat`
//! - **Audio Thread**: owns the output stream; tone requests cross over a
//!   crossbeam channel

mod audio_worker;
mod ui;

use audio_worker::AppOutput;
use iced::{Element, Task, Theme};
use metronome_core::{
    ChainToken, ControlPanel, Metronome, MetronomeConfig, ScheduledTick, TimeSignature,
};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::main_display::create_main_view;

/// Main entry point for the Metronome application.
pub fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("[MAIN] Starting Metronome application...");
    let result = iced::application("Metronome", MetronomeApp::update, MetronomeApp::view)
        .theme(MetronomeApp::theme)
        .window_size(iced::Size::new(340.0, 280.0))
        .run();
    tracing::info!("[MAIN] Application finished with result: {:?}", result);
    result
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    BpmEdited(String),         // User typed in the BPM field
    PreviousSignature,         // Cycle the time signature selector backwards
    NextSignature,             // Cycle the time signature selector forwards
    Start,                     // Start button or Enter in the BPM field
    Stop,                      // Stop button
    Beat(ChainToken),          // A scheduled tick came due
}

/// The widget values the controller reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub bpm_text: String,
    pub time_signature: TimeSignature,
    /// Value of the beat counter label.
    pub beat: u32,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            bpm_text: MetronomeConfig::default().default_bpm.to_string(),
            time_signature: TimeSignature::default(),
            beat: 0,
        }
    }
}

impl ControlPanel for PanelState {
    fn bpm_text(&self) -> String {
        self.bpm_text.clone()
    }

    fn set_bpm_text(&mut self, text: &str) {
        self.bpm_text = text.to_string();
    }

    fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    fn show_beat(&mut self, beat: u32) {
        self.beat = beat;
    }
}

#[derive(Debug)]
struct MetronomeApp {
    metronome: Metronome<AppOutput>,
    panel: PanelState,
}

impl Default for MetronomeApp {
    /// Creates the application and opens the audio output.
    fn default() -> Self {
        let config = MetronomeConfig::default();
        let output = AppOutput::open(config.gain);
        Self::with_output(output)
    }
}

impl MetronomeApp {
    fn with_output(output: AppOutput) -> Self {
        Self {
            metronome: Metronome::new(output),
            panel: PanelState::default(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BpmEdited(text) => {
                self.panel.bpm_text = text;
                Task::none()
            }
            Message::PreviousSignature => {
                self.panel.time_signature = self.panel.time_signature.previous();
                Task::none()
            }
            Message::NextSignature => {
                self.panel.time_signature = self.panel.time_signature.next();
                Task::none()
            }
            Message::Start => {
                let next = self.metronome.start(&mut self.panel, Instant::now());
                schedule(next)
            }
            Message::Stop => {
                self.metronome.stop();
                Task::none()
            }
            Message::Beat(token) => {
                let next = self.metronome.tick(token, &mut self.panel, Instant::now());
                schedule(next)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.panel, self.metronome.state())
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Turns a booked tick into a task that fires at its deadline.
fn schedule(next: Option<ScheduledTick>) -> Task<Message> {
    match next {
        Some(tick) => {
            let deadline = tokio::time::Instant::from_std(tick.deadline);
            // The sleep is created inside the executor, where the tokio timer lives.
            Task::perform(
                async move { tokio::time::sleep_until(deadline).await },
                move |_| Message::Beat(tick.token),
            )
        }
        None => Task::none(),
    }
}
