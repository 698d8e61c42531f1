use crate::config::Config;
use crate::document::ReportDocument;
use crate::engine::generate_highlighted_html;
use crate::messages::ComparisonEvent;
use crate::style::configure_style;
use crate::ui::comparison::ComparisonView;
use crate::ui::editor::Editor;
use crate::ui::title_bar::{TitleBar, TitleBarAction, TitleBarState};
use std::sync::mpsc::{self, Receiver};
use tracing::{info, warn};

/// Owns the report text and answers the comparison view's intents.
pub struct ReportCompareApp {
    ctx: egui::Context,
    config: Config,
    document: ReportDocument,
    view: Option<ComparisonView>,
    events: Receiver<ComparisonEvent>,
    editor: Editor,
    is_editor_visible: bool,
}

impl ReportCompareApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, document: ReportDocument) -> Self {
        configure_style(&cc.egui_ctx, &config.settings.theme);

        let (sender, events) = mpsc::channel();
        let mut view = ComparisonView::new(
            "report_comparison",
            config.settings.comparison.clone(),
            sender,
        );
        view.update_comparison(document.original(), document.edited());

        let font_size = if config.settings.font_size > 0.0 {
            config.settings.font_size
        } else {
            crate::constant::DEFAULT_FONT_SIZE
        };

        Self {
            ctx: cc.egui_ctx.clone(),
            editor: Editor::new(font_size),
            config,
            document,
            view: Some(view),
            events,
            is_editor_visible: false,
        }
    }

    fn refresh(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.update_comparison(self.document.original(), self.document.edited());
        }
    }

    /// Apply every intent queued by the view, then recompare once.
    fn drain_events(&mut self) {
        let mut received = false;
        while let Ok(event) = self.events.try_recv() {
            received = true;
            if let Err(e) = self.document.apply(&event) {
                warn!("Could not apply {}: {}", event.name(), e);
            }
        }
        if received {
            self.refresh();
        }
    }

    fn copy_html(&self, ctx: &egui::Context) {
        let Some(diff) = self.view.as_ref().and_then(|view| view.current_diff()) else {
            return;
        };
        let html = generate_highlighted_html(diff);
        ctx.copy_text(format!(
            "<div class=\"diff-original\">\n{}</div>\n<div class=\"diff-edited\">\n{}</div>\n",
            html.original_markup, html.edited_markup
        ));
        info!("Copied comparison HTML to clipboard");
    }
}

impl eframe::App for ReportCompareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        // Title Bar
        egui::TopBottomPanel::top("title_bar_panel").show(ctx, |ui| {
            let state = TitleBarState {
                title: crate::constant::DEFAULT_WINDOW_TITLE,
                stats: self.view.as_ref().and_then(|view| view.get_stats()),
                is_modified: self.document.is_modified(),
                is_editor_visible: self.is_editor_visible,
            };
            if let Some(action) = TitleBar::show(ui, state) {
                match action {
                    TitleBarAction::ToggleEditor => {
                        self.is_editor_visible = !self.is_editor_visible;
                    }
                    TitleBarAction::CopyHtml => self.copy_html(ctx),
                }
            }
        });

        // Editor for the edited report
        if self.is_editor_visible {
            let mut changed = false;
            egui::SidePanel::right("editor_panel")
                .resizable(true)
                .default_width(360.0)
                .show(ctx, |ui| {
                    changed = self.editor.show(ui, self.document.edited_mut());
                });
            if changed {
                self.refresh();
            }
        }

        // Main Content
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(view) = self.view.as_mut() {
                view.show(ui);
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(view) = self.view.take() {
            self.config.set_scroll_sync(view.is_scroll_sync_enabled());
            view.teardown(&self.ctx);
        }
    }
}
