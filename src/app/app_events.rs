use std::time::Instant;
use eframe::egui;
use log::info;

use super::app_core::GSensorApp;
use super::handlers::{DeviceHandler, RecordingHandler};

/// 一帧内按下的快捷键
#[derive(Debug, Default, Clone, Copy)]
struct Hotkeys {
    toggle_recording: bool,
    save: bool,
    clear: bool,
    reset_peak: bool,
}

impl GSensorApp {
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        // 有输入框获得焦点时不响应快捷键
        if ctx.wants_keyboard_input() {
            return;
        }

        let keys = ctx.input(|i| Hotkeys {
            toggle_recording: i.key_pressed(egui::Key::Space),
            save: i.key_pressed(egui::Key::S),
            clear: i.key_pressed(egui::Key::C),
            reset_peak: i.key_pressed(egui::Key::R),
        });

        if keys.toggle_recording {
            RecordingHandler::toggle_recording(self);
        }
        if keys.save {
            RecordingHandler::save_csv_with_dialog(self);
        }
        if keys.clear {
            DeviceHandler::clear_data(self);
        }
        if keys.reset_peak {
            DeviceHandler::reset_peak(self);
        }
    }

    /// `--duration` 到时后关闭窗口
    pub fn check_run_duration(&mut self, ctx: &egui::Context) {
        if let Some(deadline) = self.state.deadline {
            if Instant::now() >= deadline {
                info!("Run duration elapsed, closing window");
                if self.state.session.is_recording() {
                    RecordingHandler::toggle_recording(self);
                }
                self.state.deadline = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}
