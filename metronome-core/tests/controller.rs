use metronome_core::config::{DOWNBEAT_TONE, OFFBEAT_TONE};
use metronome_core::{ControlPanel, Metronome, ScheduledTick, TimeSignature, Tone, ToneOutput};
use std::time::Instant;

#[derive(Debug)]
struct FakePanel {
    bpm_text: String,
    signature: TimeSignature,
    shown: Vec<u32>,
}

impl FakePanel {
    fn new(bpm_text: &str, signature: TimeSignature) -> Self {
        Self {
            bpm_text: bpm_text.to_string(),
            signature,
            shown: Vec::new(),
        }
    }
}

impl ControlPanel for FakePanel {
    fn bpm_text(&self) -> String {
        self.bpm_text.clone()
    }

    fn set_bpm_text(&mut self, text: &str) {
        self.bpm_text = text.to_string();
    }

    fn time_signature(&self) -> TimeSignature {
        self.signature
    }

    fn show_beat(&mut self, beat: u32) {
        self.shown.push(beat);
    }
}

#[derive(Debug, Default)]
struct RecordingOutput {
    tones: Vec<Tone>,
}

impl ToneOutput for RecordingOutput {
    fn play_tone(&mut self, tone: Tone) {
        self.tones.push(tone);
    }
}

fn started(bpm_text: &str, signature: TimeSignature) -> (Metronome<RecordingOutput>, FakePanel, ScheduledTick) {
    let mut panel = FakePanel::new(bpm_text, signature);
    let mut metronome = Metronome::new(RecordingOutput::default());
    let next = metronome
        .start(&mut panel, Instant::now())
        .expect("start schedules the second beat");
    (metronome, panel, next)
}

/// Delivers `count` ticks on time, as the GUI event loop would.
fn run_ticks(
    metronome: &mut Metronome<RecordingOutput>,
    panel: &mut FakePanel,
    mut next: ScheduledTick,
    count: usize,
) -> ScheduledTick {
    for _ in 0..count {
        next = metronome
            .tick(next.token, panel, next.deadline)
            .expect("chain keeps running");
    }
    next
}

#[test]
fn test_non_numeric_input_defaults_to_sixty() {
    for input in ["", "  ", "abc", "sixty", "12.5", "75abc"] {
        let (metronome, panel, _) = started(input, TimeSignature::FourFour);
        assert_eq!(metronome.state().bpm, 60, "input {input:?}");
        // Recovery is silent: the field keeps what the user typed.
        assert_eq!(panel.bpm_text, input);
    }
}

#[test]
fn test_simple_signature_ceiling() {
    let (metronome, panel, _) = started("450", TimeSignature::ThreeFour);
    assert_eq!(metronome.state().bpm, 300);
    assert_eq!(panel.bpm_text, "300");

    let (metronome, panel, _) = started("250", TimeSignature::FourFour);
    assert_eq!(metronome.state().bpm, 250);
    assert_eq!(panel.bpm_text, "250");
}

#[test]
fn test_oversized_integer_is_clamped() {
    let (metronome, panel, _) = started("99999999999999999999999", TimeSignature::FourFour);
    assert_eq!(metronome.state().bpm, 300);
    assert_eq!(panel.bpm_text, "300");
}

#[test]
fn test_compound_signature_ceiling() {
    let (metronome, panel, _) = started("250", TimeSignature::SixEight);
    assert_eq!(metronome.state().bpm, 200);
    assert_eq!(panel.bpm_text, "200");

    let (metronome, _, _) = started("199", TimeSignature::SixEight);
    assert_eq!(metronome.state().bpm, 199);
}

#[test]
fn test_tempo_below_one_is_raised() {
    let (metronome, panel, _) = started("0", TimeSignature::FourFour);
    assert_eq!(metronome.state().bpm, 1);
    assert_eq!(panel.bpm_text, "1");
}

#[test]
fn test_start_twice_keeps_one_chain() {
    let (mut metronome, mut panel, first) = started("60", TimeSignature::FourFour);

    assert_eq!(metronome.start(&mut panel, Instant::now()), None);
    assert!(metronome.is_running());
    assert_eq!(metronome.output().tones.len(), 1);
    assert_eq!(panel.shown, [1]);

    // The first chain is still the live one.
    assert!(metronome.tick(first.token, &mut panel, first.deadline).is_some());
}

#[test]
fn test_start_while_running_ignores_new_input() {
    let (mut metronome, mut panel, _) = started("90", TimeSignature::FourFour);
    panel.bpm_text = "500".to_string();
    metronome.start(&mut panel, Instant::now());

    assert_eq!(metronome.state().bpm, 90);
    assert_eq!(panel.bpm_text, "500");
}

#[test]
fn test_interval_formula() {
    let (metronome, _, _) = started("60", TimeSignature::FourFour);
    assert_eq!(metronome.state().interval_ms, 900);

    let (metronome, _, _) = started("120", TimeSignature::SixEight);
    assert_eq!(metronome.state().beats_per_measure, 6);
    assert_eq!(metronome.state().interval_ms, 150);
}

#[test]
fn test_four_four_cycle() {
    let (mut metronome, mut panel, next) = started("120", TimeSignature::FourFour);
    run_ticks(&mut metronome, &mut panel, next, 5);

    assert_eq!(panel.shown, [1, 2, 3, 4, 1, 2]);
    assert_eq!(
        metronome.output().tones,
        [DOWNBEAT_TONE, OFFBEAT_TONE, OFFBEAT_TONE, OFFBEAT_TONE, DOWNBEAT_TONE, OFFBEAT_TONE]
    );
}

#[test]
fn test_six_eight_cycle() {
    let (mut metronome, mut panel, next) = started("80", TimeSignature::SixEight);
    run_ticks(&mut metronome, &mut panel, next, 6);

    assert_eq!(panel.shown, [1, 2, 3, 4, 5, 6, 1]);
    let downbeats = metronome
        .output()
        .tones
        .iter()
        .filter(|&&tone| tone == DOWNBEAT_TONE)
        .count();
    assert_eq!(downbeats, 2);
}

#[test]
fn test_pending_tick_after_stop_is_silent() {
    let (mut metronome, mut panel, next) = started("60", TimeSignature::FourFour);
    metronome.stop();

    assert_eq!(metronome.tick(next.token, &mut panel, next.deadline), None);
    assert!(!metronome.is_running());
    assert_eq!(metronome.output().tones.len(), 1);
    assert_eq!(panel.shown, [1]);
    assert_eq!(metronome.state().beat_count, 1);
}

#[test]
fn test_stop_is_idempotent() {
    let mut metronome = Metronome::new(RecordingOutput::default());
    metronome.stop();
    metronome.stop();
    assert!(!metronome.is_running());
}

#[test]
fn test_restart_does_not_revive_old_chain() {
    let (mut metronome, mut panel, stale) = started("60", TimeSignature::FourFour);
    metronome.stop();
    let fresh = metronome.start(&mut panel, Instant::now()).unwrap();

    assert_eq!(metronome.tick(stale.token, &mut panel, stale.deadline), None);
    assert!(metronome.tick(fresh.token, &mut panel, fresh.deadline).is_some());
    // Counting resumes where it left off: 1 before the stop, then 2 and 3.
    assert_eq!(panel.shown, [1, 2, 3]);
}

#[test]
fn test_unparseable_three_four_scenario() {
    let (metronome, panel, _) = started("75abc", TimeSignature::ThreeFour);

    assert_eq!(metronome.state().bpm, 60);
    assert_eq!(metronome.state().interval_ms, 900);
    assert_eq!(panel.shown, [1]);
    assert_eq!(metronome.output().tones, [DOWNBEAT_TONE]);
}
