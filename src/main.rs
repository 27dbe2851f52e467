use clavier::ui::PianoApp;
use clavier::{
    AudioEngine, ChannelSink, NullSink, Piano, SampleSink, SoundBank, create_command_channel,
};
use std::path::Path;

// Presses are one command each; a handful per frame at most, so a small
// buffer is already generous
const COMMAND_RINGBUFFER_CAPACITY: usize = 64;

/// Where the per-note WAV files live, one file per key ("C.wav", "C#.wav").
const SOUND_DIR: &str = "sounds";

fn main() {
    env_logger::init();

    let bank = SoundBank::load_dir(Path::new(SOUND_DIR));
    if bank.is_empty() {
        log::warn!("no samples found in {SOUND_DIR}/; keys will flash but stay silent");
    }

    let (command_tx, command_rx) = create_command_channel(COMMAND_RINGBUFFER_CAPACITY);

    // A missing or broken audio device is not fatal: fall back to a silent
    // sink and keep the keyboard usable
    let (sink, _engine): (Box<dyn SampleSink>, Option<AudioEngine>) =
        match AudioEngine::new(command_rx, bank) {
            Ok(engine) => (Box::new(ChannelSink::new(command_tx)), Some(engine)),
            Err(e) => {
                log::error!("audio disabled: {e}");
                (Box::new(NullSink), None)
            }
        };

    let piano = Piano::new(sink);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 380.0])
            .with_title("Clavier"),
        ..Default::default()
    };

    let _ = eframe::run_native(
        "Clavier",
        native_options,
        Box::new(|_cc| Ok(Box::new(PianoApp::new(piano)))),
    );
}
