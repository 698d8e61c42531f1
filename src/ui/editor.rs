use egui::{FontId, Ui};

/// Plain-text editor for the edited report.
pub struct Editor {
    font_size: f32,
}

impl Editor {
    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }

    /// Returns true when the text changed this frame.
    pub fn show(&mut self, ui: &mut Ui, content: &mut String) -> bool {
        egui::ScrollArea::vertical()
            .id_salt("report_editor")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(content)
                        .font(FontId::monospace(self.font_size))
                        .frame(false) // No border for that clean look
                        .desired_width(f32::INFINITY)
                        .desired_rows(30),
                )
                .changed()
            })
            .inner
    }
}
