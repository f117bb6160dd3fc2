use std::time::{Duration, Instant};
use eframe::{egui, Frame};
use log::{info, warn};

use crate::config::ConfigManager;
use crate::serial::LineSource;
use crate::session::Session;
use super::handlers::AcquisitionHandler;
use super::state::AppState;

pub struct GSensorApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: ConfigManager,
}

impl GSensorApp {
    pub fn new(
        config: ConfigManager,
        session: Session,
        link: Option<Box<dyn LineSource>>,
        run_for: Option<Duration>,
    ) -> Self {
        let mut state = AppState::new(session, link, config.get_config());
        if let Some(run_for) = run_for {
            state.deadline = Instant::now().checked_add(run_for);
            match state.deadline {
                Some(_) => info!("Window will close after {:.1}s", run_for.as_secs_f64()),
                None => warn!(
                    "Run duration {:.0}s is out of range, running indefinitely",
                    run_for.as_secs_f64()
                ),
            }
        }
        info!("Keyboard: Space=Record, S=Save, C=Clear, R=Reset");

        GSensorApp { state, config }
    }

    fn frame_period(&self) -> Duration {
        Duration::from_millis(self.config.get_config().plot.frame_period_ms)
    }
}

impl eframe::App for GSensorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // 每一帧：先读串口，再重新计算绘图状态
        AcquisitionHandler::handle_tick(self);

        // 处理键盘输入
        self.handle_keyboard_input(ctx);

        // 渲染UI组件
        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_control_bar(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);

        self.check_run_duration(ctx);

        ctx.request_repaint_after(self.frame_period());
    }
}
