// Main app UI - keyboard row, pitch toggle and recorder panel
//
// The UI is deliberately thin: it renders the layout the piano core hands
// it, reports presses back, and drives the core's timers by calling tick
// once per frame. Repaints are requested for the next pending deadline so
// scheduled playback keeps moving while the mouse is idle.

use crate::notes::Note;
use crate::piano::Piano;
use eframe::egui;
use std::time::Instant;

/// Computer-keyboard mapping, one octave: A W S E D F T G Y H U J.
const KEY_MAP: [(egui::Key, Note); 12] = [
    (egui::Key::A, Note::C),
    (egui::Key::W, Note::Cs),
    (egui::Key::S, Note::D),
    (egui::Key::E, Note::Ds),
    (egui::Key::D, Note::E),
    (egui::Key::F, Note::F),
    (egui::Key::T, Note::Fs),
    (egui::Key::G, Note::G),
    (egui::Key::Y, Note::Gs),
    (egui::Key::H, Note::A),
    (egui::Key::U, Note::As),
    (egui::Key::J, Note::B),
];

pub struct PianoApp {
    piano: Piano,
}

impl PianoApp {
    pub fn new(piano: Piano) -> Self {
        Self { piano }
    }

    fn handle_key_presses(&mut self, ctx: &egui::Context, now: Instant) {
        for (key, note) in KEY_MAP {
            if ctx.input(|i| i.key_pressed(key)) {
                self.piano.press(now, note);
            }
        }
    }

    fn draw_keyboard(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.heading("Keyboard");
        ui.label("Click the keys or play A W S E D F T G Y H U J");
        ui.add_space(8.0);

        let active = self.piano.active_key();
        let mut pressed = None;

        ui.horizontal(|ui| {
            for &note in self.piano.layout() {
                let is_active = active == Some(note);

                let button = if note.is_accidental() {
                    egui::Button::new(egui::RichText::new(note.name()).color(egui::Color32::WHITE))
                        .fill(if is_active {
                            egui::Color32::from_rgb(100, 100, 255)
                        } else {
                            egui::Color32::from_gray(40)
                        })
                        .min_size(egui::vec2(44.0, 70.0))
                } else {
                    egui::Button::new(egui::RichText::new(note.name()).color(egui::Color32::BLACK))
                        .fill(if is_active {
                            egui::Color32::from_rgb(150, 150, 255)
                        } else {
                            egui::Color32::WHITE
                        })
                        .stroke(egui::Stroke::new(1.0, egui::Color32::BLACK))
                        .min_size(egui::vec2(44.0, 100.0))
                };

                if ui.add(button).clicked() {
                    pressed = Some(note);
                }
            }
        });

        if let Some(note) = pressed {
            self.piano.press(now, note);
        }
    }

    fn draw_recorder(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.heading("Recorder");
        ui.horizontal(|ui| {
            let record_label = if self.piano.is_recording() {
                "⏹ Stop recording"
            } else {
                "⏺ Record"
            };
            if ui.button(record_label).clicked() {
                self.piano.toggle_recording();
            }

            let can_play = self.piano.has_recording();
            if ui
                .add_enabled(can_play, egui::Button::new("▶ Play"))
                .clicked()
            {
                self.piano.play_recorded(now);
            }

            if self.piano.is_playing() {
                ui.label("playing…");
            }
        });

        if self.piano.is_recording() {
            ui.label(format!(
                "recording… {} notes so far",
                self.piano.pending_capture().len()
            ));
        } else if let Some(take) = self.piano.recorded() {
            let names: Vec<&str> = take.notes().iter().map(|n| n.name()).collect();
            ui.label(format!("recorded: {}", names.join(" ")));
        }
    }
}

impl eframe::App for PianoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.piano.tick(now);

        self.handle_key_presses(ctx, now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Clavier");
            ui.separator();
            ui.add_space(8.0);

            self.draw_keyboard(ui, now);

            ui.add_space(12.0);
            let raised = self.piano.pitch().is_raised();
            if ui.selectable_label(raised, "Raised pitch (1.5x)").clicked() {
                self.piano.toggle_pitch();
            }

            ui.add_space(12.0);
            ui.separator();
            self.draw_recorder(ui, now);
        });

        // Wake up exactly when the next timer step is due; otherwise only
        // repaint on input
        if let Some(deadline) = self.piano.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
