use crate::engine::ChangeStats;
use egui::{Align, Layout, Ui};

pub enum TitleBarAction {
    ToggleEditor,
    CopyHtml,
}

pub struct TitleBar;

pub struct TitleBarState<'a> {
    pub title: &'a str,
    pub stats: Option<ChangeStats>,
    pub is_modified: bool,
    pub is_editor_visible: bool,
}

impl TitleBar {
    pub fn show(ui: &mut Ui, state: TitleBarState<'_>) -> Option<TitleBarAction> {
        let TitleBarState {
            title,
            stats,
            is_modified,
            is_editor_visible,
        } = state;

        let mut action = None;
        let title_bar_rect = ui.available_rect_before_wrap();

        // Dragging logic - registered BEFORE widgets so they can steal input
        let interact = ui.interact(
            title_bar_rect,
            ui.id().with("title_bar_drag"),
            egui::Sense::click_and_drag(),
        );
        if interact.dragged() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::StartDrag);
        }

        ui.horizontal(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                let marker = if is_modified { " •" } else { "" };
                ui.label(format!("{title}{marker}"));
                ui.add_space(16.0);

                if ui
                    .selectable_label(is_editor_visible, "✏ Edit")
                    .on_hover_text(if is_editor_visible {
                        "Hide editor"
                    } else {
                        "Show editor"
                    })
                    .clicked()
                {
                    action = Some(TitleBarAction::ToggleEditor);
                }
                if ui
                    .add_enabled(stats.is_some(), egui::Button::new("📋 HTML"))
                    .on_hover_text("Copy highlighted HTML of both panes")
                    .on_disabled_hover_text("Nothing compared yet")
                    .clicked()
                {
                    action = Some(TitleBarAction::CopyHtml);
                }
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(egui::RichText::new(Self::format_badge(stats)).small());
            });
        });

        action
    }

    /// Short change summary, e.g. "3 changes / 120 lines"
    fn format_badge(stats: Option<ChangeStats>) -> String {
        match stats {
            None => "not compared".to_string(),
            Some(stats) if stats.changed_lines() == 0 => {
                format!("no changes / {} lines", stats.total_lines)
            }
            Some(stats) => {
                let changes = stats.changed_lines();
                let noun = if changes == 1 { "change" } else { "changes" };
                format!("{changes} {noun} / {} lines", stats.total_lines)
            }
        }
    }
}
