use super::sync::Pane;
use crate::engine::{ChangeKind, MarkupRow, SegmentTag};
use egui::{Align, Color32, FontId, RichText, TextFormat, Ui, text::LayoutJob};

// Color constants for better maintainability
const REMOVED_LINE_BG: Color32 = Color32::from_rgb(255, 230, 230);
const ADDED_LINE_BG: Color32 = Color32::from_rgb(230, 255, 230);
const MODIFIED_LINE_BG: Color32 = Color32::from_rgb(255, 248, 220);
const REMOVED_WORD_BG: Color32 = Color32::from_rgb(255, 170, 170);
const ADDED_WORD_BG: Color32 = Color32::from_rgb(170, 255, 170);
const MODIFIED_WORD_BG: Color32 = Color32::from_rgb(255, 225, 140);
const REMOVED_TEXT_COLOR: Color32 = Color32::from_rgb(150, 0, 0);
const ADDED_TEXT_COLOR: Color32 = Color32::from_rgb(0, 100, 0);
const FOCUS_LINE_BG: Color32 = Color32::from_rgb(200, 220, 255);

const LINE_HEIGHT: f32 = 22.0;
const REVERT_BUTTON_WIDTH: f32 = 28.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowHighlight {
    /// Target of a recent scroll-to-line
    pub focus: bool,
    /// Revert was just clicked on this row
    pub fading: bool,
}

pub struct PaneStyle {
    pub font_id: FontId,
    pub show_line_numbers: bool,
}

/// Which pane shows the revert control for a row of `kind`.
///
/// Removed rows only exist on the original side; every other change is
/// reverted from the edited side.
pub fn carries_revert(kind: ChangeKind, pane: Pane) -> bool {
    matches!(
        (kind, pane),
        (ChangeKind::Removed, Pane::Original)
            | (ChangeKind::Added, Pane::Edited)
            | (ChangeKind::Modified, Pane::Edited)
    )
}

fn line_background(kind: ChangeKind, pane: Pane) -> Color32 {
    match (kind, pane) {
        (ChangeKind::Added, _) => ADDED_LINE_BG,
        (ChangeKind::Removed, _) => REMOVED_LINE_BG,
        (ChangeKind::Modified, Pane::Original) => REMOVED_LINE_BG,
        (ChangeKind::Modified, Pane::Edited) => ADDED_LINE_BG,
        (ChangeKind::Unchanged, _) => Color32::TRANSPARENT,
    }
}

fn segment_format(tag: SegmentTag, pane: Pane, font_id: &FontId, base: Color32) -> TextFormat {
    let (color, background) = match (tag, pane) {
        (SegmentTag::Plain, _) => (base, Color32::TRANSPARENT),
        (SegmentTag::Added, _) => (ADDED_TEXT_COLOR, ADDED_WORD_BG),
        (SegmentTag::Removed, _) => (REMOVED_TEXT_COLOR, REMOVED_WORD_BG),
        (SegmentTag::Modified, Pane::Original) => (REMOVED_TEXT_COLOR, MODIFIED_WORD_BG),
        (SegmentTag::Modified, Pane::Edited) => (ADDED_TEXT_COLOR, MODIFIED_WORD_BG),
    };
    TextFormat {
        font_id: font_id.clone(),
        color,
        background,
        line_height: Some(LINE_HEIGHT),
        ..Default::default()
    }
}

fn row_job(row: &MarkupRow, pane: Pane, font_id: &FontId, base: Color32, width: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for segment in &row.segments {
        if segment.text.is_empty() {
            continue;
        }
        job.append(
            &segment.text,
            0.0,
            segment_format(segment.tag, pane, font_id, base),
        );
    }
    // keep blank lines one line tall
    if job.text.is_empty() {
        job.append(" ", 0.0, segment_format(SegmentTag::Plain, pane, font_id, base));
    }
    job.wrap.max_width = width;
    job
}

/// Render one pane's rows. Returns the line number whose revert control was
/// clicked this frame, if any.
pub fn render_rows(
    ui: &mut Ui,
    pane: Pane,
    rows: &[MarkupRow],
    style: &PaneStyle,
    highlight: impl Fn(usize) -> RowHighlight,
    scroll_target: Option<usize>,
) -> Option<usize> {
    ui.style_mut().spacing.item_spacing.y = 1.0;
    let mut clicked = None;

    for row in rows {
        let state = highlight(row.line_number);
        let base = ui.visuals().text_color();
        let (fill, text_color) = match (state.focus, state.fading) {
            (true, _) => (FOCUS_LINE_BG, base),
            (false, true) => (
                line_background(row.kind, pane).gamma_multiply(0.4),
                base.gamma_multiply(0.5),
            ),
            (false, false) => (line_background(row.kind, pane), base),
        };

        ui.push_id(row.line_number, |ui| {
            ui.horizontal_top(|ui| {
                if style.show_line_numbers {
                    ui.label(
                        RichText::new(format!("{:>4}", row.line_number))
                            .font(style.font_id.clone())
                            .weak(),
                    );
                }

                let width = (ui.available_width() - REVERT_BUTTON_WIDTH - 12.0).max(60.0);
                let response = egui::Frame::default()
                    .fill(fill)
                    .inner_margin(egui::Margin::symmetric(6, 1))
                    .show(ui, |ui| {
                        ui.set_min_width(width);
                        let job = row_job(row, pane, &style.font_id, text_color, width);
                        ui.add(egui::Label::new(job).wrap());
                    })
                    .response;

                if carries_revert(row.kind, pane)
                    && ui
                        .small_button("↺")
                        .on_hover_text("Revert this change")
                        .clicked()
                {
                    clicked = Some(row.line_number);
                }

                if scroll_target == Some(row.line_number) {
                    response.scroll_to_me(Some(Align::Center));
                }
            });
        });
    }

    clicked
}
